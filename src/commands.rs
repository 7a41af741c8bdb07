// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use crate::episode::{DownloadResult, download_all};
use crate::error::{CommandError, FeedError};
use crate::feed::build_feed;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::series::{FetchOptions, fetch_series};

/// Fetch a series and write its RSS feed to `output_path`
///
/// Nothing is written unless the whole series loaded and serialized.
/// Returns the number of items in the feed.
pub async fn download_rss<C: HttpClient>(
    client: &C,
    slug: &str,
    output_path: &Path,
    options: &FetchOptions,
    reporter: SharedProgressReporter,
) -> Result<usize, CommandError> {
    let series = fetch_series(client, slug, options, &reporter).await?;
    let xml = build_feed(&series)?;

    tokio::fs::write(output_path, &xml)
        .await
        .map_err(|e| FeedError::WriteFailed {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    reporter.report(ProgressEvent::FeedWritten {
        path: output_path.display().to_string(),
        item_count: series.episodes.len(),
    });

    Ok(series.episodes.len())
}

/// Fetch a series and download every episode's audio into `output_dir`
pub async fn download_audio<C: HttpClient>(
    client: &C,
    slug: &str,
    output_dir: &Path,
    options: &FetchOptions,
    reporter: SharedProgressReporter,
) -> Result<Vec<DownloadResult>, CommandError> {
    let series = fetch_series(client, slug, options, &reporter).await?;
    let results = download_all(client, &series, output_dir, &reporter).await?;
    Ok(results)
}
