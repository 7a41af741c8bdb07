use std::sync::Arc;

/// Events emitted while loading a series and running a command
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The catalog document is being fetched
    FetchingSeries { url: String },

    /// An episode's audio file is being probed for its headers
    ProbingEpisode {
        episode_index: usize,
        total_episodes: usize,
        url: String,
    },

    /// All metadata has been fetched and every enclosure resolved
    SeriesLoaded {
        series_title: String,
        total_episodes: usize,
    },

    /// The RSS document has been written to disk
    FeedWritten { path: String, item_count: usize },

    /// A download is starting
    DownloadStarting {
        /// Position of the episode in the series
        episode_index: usize,
        total_episodes: usize,
        url: String,
        /// Expected content length in bytes, if known
        content_length: Option<u64>,
    },

    /// Download progress update
    DownloadProgress {
        episode_index: usize,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },

    /// A download completed successfully
    DownloadCompleted {
        episode_index: usize,
        path: String,
        bytes_downloaded: u64,
    },

    /// A download failed; no further episodes will be attempted
    DownloadFailed {
        episode_index: usize,
        url: String,
        error: String,
    },

    /// Every episode has been downloaded
    DownloadsCompleted { downloaded_count: usize },
}

/// Trait for reporting progress events.
///
/// This is the only logging channel of the library: implementations can
/// display progress bars, print log lines, or collect events in tests.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every event it receives
    #[derive(Default)]
    pub struct RecordingReporter {
        pub events: Mutex<Vec<ProgressEvent>>,
    }

    impl RecordingReporter {
        pub fn events(&self) -> Vec<ProgressEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
