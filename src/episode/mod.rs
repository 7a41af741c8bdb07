mod download;
mod extension;

pub use download::{DownloadContext, DownloadResult, download_all, download_episode};
pub use extension::{FALLBACK_EXTENSION, audio_extension, episode_filename, mime_to_extension};
