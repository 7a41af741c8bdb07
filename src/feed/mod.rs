mod build;

pub use build::{
    FEED_AUTHOR, FEED_DESCRIPTION, FEED_LANGUAGE, PODCAST_NAMESPACE, build_channel, build_feed,
    format_rfc2822,
};
