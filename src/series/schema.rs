// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape of the catalog's `audiolibri/<name>.json` document.
//!
//! Only the fields the pipeline reads are declared; anything else in the
//! document is ignored. A missing or mistyped field fails deserialization.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub uniquename: String,
    pub podcast_info: PodcastInfo,
    pub block: Block,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodcastInfo {
    pub title: String,
    /// Path relative to the catalog base URL
    pub image: String,
    pub create_date: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub cards: Vec<Card>,
}

/// One episode entry
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub uniquename: String,
    pub audio: CardAudio,
    pub description: String,
    /// Path relative to the catalog base URL
    pub image: String,
    /// Path relative to the catalog base URL
    pub weblink: String,
    pub create_date: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardAudio {
    /// Absolute URL of the audio file
    pub url: String,
    pub title: String,
    pub duration: String,
}
