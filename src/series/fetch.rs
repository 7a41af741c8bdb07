// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDateTime;
use futures::{StreamExt, TryStreamExt, stream};
use url::Url;

use crate::error::{FetchError, MalformedDataError, SeriesError};
use crate::http::{HttpClient, is_success};
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::model::{Enclosure, Episode, Series};
use super::schema::{Card, CatalogDocument};

/// Public address of the RaiPlay Sound catalog
pub const DEFAULT_BASE_URL: &str = "https://www.raiplaysound.it";

/// Catalog timestamps are two fields, joined with a space before parsing
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Options for loading a series
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Catalog base URL, without the `/audiolibri` segment
    pub base_url: String,
    /// Maximum number of enclosure probes in flight at once
    pub max_concurrent_probes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent_probes: 3,
        }
    }
}

/// Determine if a string is already an absolute http(s) URL
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn parse_url(value: &str) -> Result<Url, MalformedDataError> {
    Url::parse(value).map_err(|e| MalformedDataError::InvalidUrl {
        value: value.to_string(),
        source: e,
    })
}

/// Resolve a catalog-relative path against the base URL
///
/// Exactly one `/` separates the two parts. Paths that are already
/// absolute are returned unchanged.
pub fn absolute_url(base_url: &str, path: &str) -> Result<Url, MalformedDataError> {
    if is_url(path) {
        return parse_url(path);
    }

    parse_url(&format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// Web page of a series, e.g. `https://www.raiplaysound.it/audiolibri/<slug>`
pub fn series_page_url(base_url: &str, slug: &str) -> Result<Url, MalformedDataError> {
    absolute_url(base_url, &format!("audiolibri/{}", slug))
}

/// Parse the catalog's separate date (`DD-MM-YYYY`) and time (`HH:MM`) fields
pub fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, MalformedDataError> {
    let value = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
        .map_err(|e| MalformedDataError::InvalidTimestamp { value, source: e })
}

/// Episode fields known before the audio file has been probed
struct PendingEpisode {
    id: String,
    title: String,
    description: String,
    logo: Url,
    page_url: Url,
    audio_url: Url,
    duration: String,
    published_at: NaiveDateTime,
}

impl PendingEpisode {
    fn from_card(card: Card, base_url: &str) -> Result<Self, MalformedDataError> {
        Ok(Self {
            logo: absolute_url(base_url, &card.image)?,
            page_url: absolute_url(base_url, &card.weblink)?,
            audio_url: parse_url(&card.audio.url)?,
            published_at: parse_timestamp(&card.create_date, &card.create_time)?,
            id: card.uniquename,
            title: card.audio.title,
            description: card.description,
            duration: card.audio.duration,
        })
    }

    fn into_episode(self, enclosure: Enclosure) -> Episode {
        Episode {
            id: self.id,
            title: self.title,
            description: self.description,
            logo: self.logo,
            page_url: self.page_url,
            enclosure,
            duration: self.duration,
            published_at: self.published_at,
        }
    }
}

/// Download and validate the catalog document
async fn fetch_document<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<CatalogDocument, SeriesError> {
    let response = client
        .get_bytes(url)
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

    // Two passes so that broken JSON and unexpected JSON are told apart
    let value: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(|e| FetchError::InvalidJson {
            url: url.to_string(),
            source: e,
        })?;

    let document = serde_json::from_value(value).map_err(|e| MalformedDataError::Schema {
        url: url.to_string(),
        source: e,
    })?;

    Ok(document)
}

/// Resolve the MIME type and byte length of an audio file with a HEAD request
pub async fn probe_enclosure<C: HttpClient>(
    client: &C,
    url: &Url,
) -> Result<Enclosure, SeriesError> {
    let response = client
        .head(url.as_str())
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

    let mime_type =
        response
            .headers
            .content_type
            .ok_or_else(|| MalformedDataError::MissingHeader {
                url: url.to_string(),
                header: "content-type",
            })?;

    let raw_length =
        response
            .headers
            .content_length
            .ok_or_else(|| MalformedDataError::MissingHeader {
                url: url.to_string(),
                header: "content-length",
            })?;

    let length = raw_length
        .parse::<u64>()
        .map_err(|_| MalformedDataError::InvalidContentLength {
            url: url.to_string(),
            value: raw_length.clone(),
        })?;

    Ok(Enclosure {
        url: url.clone(),
        mime_type,
        length,
    })
}

/// Load a series from the catalog and probe every episode's audio file
///
/// Probes run concurrently up to `options.max_concurrent_probes`, but the
/// episodes keep the catalog order. The first failure aborts the load.
pub async fn fetch_series<C: HttpClient>(
    client: &C,
    slug: &str,
    options: &FetchOptions,
    reporter: &SharedProgressReporter,
) -> Result<Series, SeriesError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(SeriesError::EmptySlug);
    }

    let base_url = options.base_url.as_str();
    let page_url = series_page_url(base_url, slug)?;
    let document_url = format!("{}.json", page_url);

    reporter.report(ProgressEvent::FetchingSeries {
        url: document_url.clone(),
    });

    let document = fetch_document(client, &document_url).await?;
    let info = document.podcast_info;

    let logo = absolute_url(base_url, &info.image)?;
    let published_at = parse_timestamp(&info.create_date, &info.create_time)?;

    let pending = document
        .block
        .cards
        .into_iter()
        .map(|card| PendingEpisode::from_card(card, base_url))
        .collect::<Result<Vec<_>, _>>()?;

    let total_episodes = pending.len();

    // `buffered` yields results in input order regardless of completion order
    let episodes = stream::iter(pending.into_iter().enumerate())
        .map(move |(episode_index, episode)| async move {
            reporter.report(ProgressEvent::ProbingEpisode {
                episode_index,
                total_episodes,
                url: episode.audio_url.to_string(),
            });

            let enclosure = probe_enclosure(client, &episode.audio_url).await?;
            Ok::<_, SeriesError>(episode.into_episode(enclosure))
        })
        .buffered(options.max_concurrent_probes.max(1))
        .try_collect::<Vec<_>>()
        .await?;

    reporter.report(ProgressEvent::SeriesLoaded {
        series_title: info.title.clone(),
        total_episodes,
    });

    Ok(Series {
        id: document.uniquename,
        title: info.title,
        page_url,
        logo,
        published_at,
        episodes,
    })
}
