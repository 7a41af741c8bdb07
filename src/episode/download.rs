use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{DownloadError, FetchError};
use crate::http::{HttpClient, is_success};
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::series::{Episode, Series};

use super::extension::{audio_extension, episode_filename};

/// Position of a download within the series
#[derive(Debug, Clone, Copy)]
pub struct DownloadContext {
    /// Zero-based index of the episode, also its filename stem
    pub episode_index: usize,
    /// Number of episodes in the series
    pub total_episodes: usize,
}

/// Outcome of a single successful download
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub path: PathBuf,
    pub bytes_downloaded: u64,
}

/// Download an episode into `output_dir`
///
/// The file is named after the episode index, with the extension derived
/// from the response Content-Type. An existing file is overwritten.
pub async fn download_episode<C: HttpClient>(
    client: &C,
    episode: &Episode,
    output_dir: &Path,
    context: DownloadContext,
    reporter: &SharedProgressReporter,
) -> Result<DownloadResult, DownloadError> {
    let url = episode.enclosure.url.as_str();

    let response = client
        .get_stream(url)
        .await
        .map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !is_success(response.status) {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        }
        .into());
    }

    let content_length = response.headers.content_length_bytes();

    reporter.report(ProgressEvent::DownloadStarting {
        episode_index: context.episode_index,
        total_episodes: context.total_episodes,
        url: url.to_string(),
        content_length,
    });

    let extension = audio_extension(
        response.headers.content_type.as_deref(),
        &episode.enclosure.url,
    );
    let output_path = output_dir.join(episode_filename(context.episode_index, &extension));

    let mut file =
        File::create(&output_path)
            .await
            .map_err(|e| DownloadError::FileCreateFailed {
                path: output_path.clone(),
                source: e,
            })?;

    // Stream body to file
    let mut bytes_downloaded: u64 = 0;
    let mut stream = response.body;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::StreamFailed {
            url: url.to_string(),
            source: e,
        })?;

        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::FileWriteFailed {
                path: output_path.clone(),
                source: e,
            })?;

        bytes_downloaded += chunk.len() as u64;

        reporter.report(ProgressEvent::DownloadProgress {
            episode_index: context.episode_index,
            bytes_downloaded,
            total_bytes: content_length,
        });
    }

    // Ensure all data is flushed to disk
    file.flush()
        .await
        .map_err(|e| DownloadError::FileWriteFailed {
            path: output_path.clone(),
            source: e,
        })?;

    reporter.report(ProgressEvent::DownloadCompleted {
        episode_index: context.episode_index,
        path: output_path.display().to_string(),
        bytes_downloaded,
    });

    Ok(DownloadResult {
        path: output_path,
        bytes_downloaded,
    })
}

/// Download every episode of a series, one after another, in series order
///
/// Stops at the first failure. Files written before the failure are left
/// in place.
pub async fn download_all<C: HttpClient>(
    client: &C,
    series: &Series,
    output_dir: &Path,
    reporter: &SharedProgressReporter,
) -> Result<Vec<DownloadResult>, DownloadError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| DownloadError::CreateDirectoryFailed {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

    let total_episodes = series.episodes.len();
    let mut results = Vec::with_capacity(total_episodes);

    for (episode_index, episode) in series.episodes.iter().enumerate() {
        let context = DownloadContext {
            episode_index,
            total_episodes,
        };

        match download_episode(client, episode, output_dir, context, reporter).await {
            Ok(result) => results.push(result),
            Err(e) => {
                reporter.report(ProgressEvent::DownloadFailed {
                    episode_index,
                    url: episode.enclosure.url.to_string(),
                    error: e.to_string(),
                });
                return Err(e);
            }
        }
    }

    reporter.report(ProgressEvent::DownloadsCompleted {
        downloaded_count: results.len(),
    });

    Ok(results)
}
