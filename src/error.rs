use std::path::PathBuf;
use thiserror::Error;

/// Transport-level failures: the request did not complete, the server
/// answered with a non-success status, or the body was not JSON at all
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed for {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Response from {url} is not valid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The server answered, but the data does not have the expected shape
#[derive(Error, Debug)]
pub enum MalformedDataError {
    #[error("Unexpected catalog data from {url}: {source}")]
    Schema {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse timestamp '{value}' (expected DD-MM-YYYY HH:MM): {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Response from {url} has no {header} header")]
    MissingHeader { url: String, header: &'static str },

    #[error("Response from {url} has a non-numeric content-length '{value}'")]
    InvalidContentLength { url: String, value: String },
}

/// Errors that can occur while loading a series from the catalog
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Series name must not be empty")]
    EmptySlug,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Malformed(#[from] MalformedDataError),
}

/// Errors that can occur when producing the RSS document
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to serialize RSS feed: {0}")]
    SerializeFailed(#[from] rss::Error),

    #[error("Failed to write feed file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during episode downloads
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {path}: {source}")]
    FileCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to file {path}: {source}")]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stream error while downloading {url}: {source}")]
    StreamFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Top-level errors for the two commands
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),
}
