// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rss::extension::itunes::{ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder};
use rss::extension::{ExtensionBuilder, ExtensionMap};
use rss::{
    Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder,
};

use crate::error::FeedError;
use crate::series::{Episode, Series};

/// Channel description; the catalog has no series-level summary
pub const FEED_DESCRIPTION: &str = "Audiobook";
/// Publisher of every series in the catalog
pub const FEED_AUTHOR: &str = "RAI";
/// The catalog is Italian-only
pub const FEED_LANGUAGE: &str = "it";
/// Podcasting 2.0 namespace, used for `podcast:guid`
pub const PODCAST_NAMESPACE: &str = "https://podcastindex.org/namespace/1.0";

const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Format a catalog timestamp for `pubDate`
///
/// Catalog times carry no zone, so the RFC 2822 "unknown zone" marker
/// `-0000` is used.
pub fn format_rfc2822(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S -0000").to_string()
}

fn build_item(episode: &Episode) -> Item {
    let guid = GuidBuilder::default()
        .value(episode.id.clone())
        .permalink(false)
        .build();

    let enclosure = EnclosureBuilder::default()
        .url(episode.enclosure.url.to_string())
        .length(episode.enclosure.length.to_string())
        .mime_type(episode.enclosure.mime_type.clone())
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .duration(Some(episode.duration.clone()))
        .image(Some(episode.logo.to_string()))
        .build();

    ItemBuilder::default()
        .guid(Some(guid))
        .title(Some(episode.title.clone()))
        .description(Some(episode.description.clone()))
        .link(Some(episode.page_url.to_string()))
        .enclosure(Some(enclosure))
        .pub_date(Some(format_rfc2822(&episode.published_at)))
        .itunes_ext(Some(itunes))
        .build()
}

/// Build the RSS channel for a series, one item per episode in series order
pub fn build_channel(series: &Series) -> Channel {
    let image = ImageBuilder::default()
        .url(series.logo.to_string())
        .title(series.title.clone())
        .link(series.page_url.to_string())
        .build();

    let itunes = ITunesChannelExtensionBuilder::default()
        .author(Some(FEED_AUTHOR.to_string()))
        .image(Some(series.logo.to_string()))
        .build();

    let guid = ExtensionBuilder::default()
        .name("podcast:guid".to_string())
        .value(Some(series.id.clone()))
        .build();

    let mut extensions = ExtensionMap::new();
    extensions
        .entry("podcast".to_string())
        .or_default()
        .insert("guid".to_string(), vec![guid]);

    // The itunes namespace is declared by the rss crate whenever an
    // iTunes extension is present
    let namespaces = BTreeMap::from([("podcast".to_string(), PODCAST_NAMESPACE.to_string())]);

    ChannelBuilder::default()
        .title(series.title.clone())
        .link(series.page_url.to_string())
        .description(FEED_DESCRIPTION.to_string())
        .language(Some(FEED_LANGUAGE.to_string()))
        .pub_date(Some(format_rfc2822(&series.published_at)))
        .generator(Some(GENERATOR.to_string()))
        .image(Some(image))
        .itunes_ext(Some(itunes))
        .namespaces(namespaces)
        .extensions(extensions)
        .items(series.episodes.iter().map(build_item).collect::<Vec<_>>())
        .build()
}

/// Serialize a series as a pretty-printed RSS 2.0 podcast feed
pub fn build_feed(series: &Series) -> Result<Vec<u8>, FeedError> {
    let channel = build_channel(series);
    Ok(channel.pretty_write_to(Vec::new(), b' ', 2)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Enclosure, parse_timestamp};
    use url::Url;

    fn make_episode(index: usize, length: u64, duration: &str) -> Episode {
        Episode {
            id: format!("ep-{}", index),
            title: format!("Capitolo {}", index),
            description: format!("Descrizione {}", index),
            logo: Url::parse(&format!("https://catalog.example/img/{}.jpg", index)).unwrap(),
            page_url: Url::parse(&format!("https://catalog.example/ep/{}", index)).unwrap(),
            enclosure: Enclosure {
                url: Url::parse(&format!("https://audio.example/{}.mp3", index)).unwrap(),
                mime_type: "audio/mpeg".to_string(),
                length,
            },
            duration: duration.to_string(),
            published_at: parse_timestamp("12-03-2021", "07:05").unwrap(),
        }
    }

    fn make_series(episodes: Vec<Episode>) -> Series {
        Series {
            id: "ilgattopardo".to_string(),
            title: "Il Gattopardo".to_string(),
            page_url: Url::parse("https://catalog.example/audiolibri/ilgattopardo").unwrap(),
            logo: Url::parse("https://catalog.example/img/series.jpg").unwrap(),
            published_at: parse_timestamp("05-03-2021", "10:30").unwrap(),
            episodes,
        }
    }

    fn roundtrip(series: &Series) -> (String, Channel) {
        let bytes = build_feed(series).unwrap();
        let channel = Channel::read_from(&bytes[..]).unwrap();
        (String::from_utf8(bytes).unwrap(), channel)
    }

    #[test]
    fn format_rfc2822_uses_unknown_zone() {
        let ts = parse_timestamp("05-03-2021", "10:30").unwrap();
        assert_eq!(format_rfc2822(&ts), "Fri, 05 Mar 2021 10:30:00 -0000");
    }

    #[test]
    fn feed_contains_channel_metadata() {
        let (xml, channel) = roundtrip(&make_series(vec![make_episode(0, 10, "1:00")]));

        assert_eq!(channel.title(), "Il Gattopardo");
        assert_eq!(channel.description(), "Audiobook");
        assert_eq!(
            channel.link(),
            "https://catalog.example/audiolibri/ilgattopardo"
        );
        assert_eq!(channel.language(), Some("it"));
        assert_eq!(channel.pub_date(), Some("Fri, 05 Mar 2021 10:30:00 -0000"));
        assert_eq!(
            channel.image().map(|i| i.url()),
            Some("https://catalog.example/img/series.jpg")
        );
        assert_eq!(
            channel.itunes_ext().and_then(|ext| ext.author()),
            Some("RAI")
        );
        assert!(xml.contains("<podcast:guid>ilgattopardo</podcast:guid>"));
        assert!(xml.contains(PODCAST_NAMESPACE));
        assert_eq!(xml.matches("xmlns:itunes=").count(), 1);
    }

    #[test]
    fn feed_has_one_item_per_episode_in_order() {
        let episodes = vec![
            make_episode(0, 1_000, "00:41:12"),
            make_episode(1, 2_000, "1:02:03"),
            make_episode(2, 3_000, "circa un'ora"),
        ];
        let (_, channel) = roundtrip(&make_series(episodes.clone()));

        assert_eq!(channel.items().len(), 3);

        for (item, episode) in channel.items().iter().zip(&episodes) {
            let enclosure = item.enclosure().unwrap();
            assert_eq!(enclosure.url(), episode.enclosure.url.as_str());
            assert_eq!(enclosure.mime_type(), "audio/mpeg");
            assert_eq!(
                enclosure.length().parse::<u64>().unwrap(),
                episode.enclosure.length
            );
            assert_eq!(
                item.itunes_ext().and_then(|ext| ext.duration()),
                Some(episode.duration.as_str())
            );
            assert_eq!(item.guid().map(|g| g.value()), Some(episode.id.as_str()));
            assert!(!item.guid().unwrap().is_permalink());
            assert_eq!(item.title(), Some(episode.title.as_str()));
            assert_eq!(item.description(), Some(episode.description.as_str()));
            assert_eq!(item.link(), Some(episode.page_url.as_str()));
            assert_eq!(item.pub_date(), Some("Fri, 12 Mar 2021 07:05:00 -0000"));
        }
    }

    #[test]
    fn feed_without_episodes_is_valid() {
        let (xml, channel) = roundtrip(&make_series(vec![]));

        assert!(channel.items().is_empty());
        assert_eq!(channel.title(), "Il Gattopardo");
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn feed_is_indented() {
        let (xml, _) = roundtrip(&make_series(vec![make_episode(0, 10, "1:00")]));
        assert!(xml.contains("\n  <channel>"));
        assert!(xml.contains("\n    <item>"));
    }

    #[test]
    fn feed_escapes_markup_in_text() {
        let mut episode = make_episode(0, 10, "1:00");
        episode.description = "Tom & Jerry <b>live</b>".to_string();

        let (_, channel) = roundtrip(&make_series(vec![episode]));

        assert_eq!(
            channel.items()[0].description(),
            Some("Tom & Jerry <b>live</b>")
        );
    }
}
