pub mod commands;
pub mod episode;
pub mod error;
pub mod feed;
pub mod http;
pub mod progress;
pub mod series;

// Re-export main types for convenience
pub use commands::{download_audio, download_rss};
pub use episode::{DownloadResult, audio_extension, download_all, download_episode};
pub use error::{CommandError, DownloadError, FeedError, FetchError, MalformedDataError, SeriesError};
pub use feed::build_feed;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use series::{Enclosure, Episode, FetchOptions, Series, fetch_series};
