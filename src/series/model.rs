use chrono::NaiveDateTime;
use url::Url;

/// An audiobook series as published in the catalog
#[derive(Debug, Clone)]
pub struct Series {
    /// Catalog unique name
    pub id: String,
    pub title: String,
    pub page_url: Url,
    pub logo: Url,
    pub published_at: NaiveDateTime,
    /// Episodes in catalog order
    pub episodes: Vec<Episode>,
}

/// A single installment of a series
#[derive(Debug, Clone)]
pub struct Episode {
    /// Catalog unique name, used as the feed item GUID
    pub id: String,
    pub title: String,
    pub description: String,
    pub logo: Url,
    pub page_url: Url,
    pub enclosure: Enclosure,
    /// Human-readable duration exactly as the catalog reports it
    pub duration: String,
    pub published_at: NaiveDateTime,
}

/// The audio file attached to an episode, as resolved by a probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: Url,
    /// Content-Type of the final response after redirects
    pub mime_type: String,
    /// Content-Length in bytes
    pub length: u64,
}
