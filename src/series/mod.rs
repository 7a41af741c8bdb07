mod fetch;
mod model;
mod schema;

pub use fetch::{
    DEFAULT_BASE_URL, FetchOptions, absolute_url, fetch_series, is_url, parse_timestamp,
    probe_enclosure, series_page_url,
};
pub use model::{Enclosure, Episode, Series};
pub use schema::{Block, Card, CardAudio, CatalogDocument, PodcastInfo};

#[cfg(test)]
pub(crate) use fetch::fixtures;
