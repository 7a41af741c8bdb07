use url::Url;

/// Extension used when neither the response nor the URL identifies the format
pub const FALLBACK_EXTENSION: &str = "bin";

/// Map a Content-Type value to a file extension
///
/// Parameters after `;` are ignored and matching is case-insensitive.
pub fn mime_to_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    match essence.to_lowercase().as_str() {
        "audio/mpeg" | "audio/mp3" | "audio/mpeg3" | "audio/x-mpeg" => Some("mp3"),
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some("m4a"),
        "audio/aac" | "audio/aacp" | "audio/x-aac" => Some("aac"),
        "audio/ogg" | "application/ogg" => Some("ogg"),
        "audio/opus" => Some("opus"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/webm" => Some("weba"),
        "video/mp4" => Some("mp4"),
        _ => None,
    }
}

/// Known audio extension at the end of the URL path, lowercased
fn url_extension(url: &Url) -> Option<String> {
    let filename = url.path_segments()?.next_back()?;
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_lowercase();

    matches!(
        ext.as_str(),
        "mp3" | "m4a" | "mp4" | "aac" | "ogg" | "opus" | "wav" | "flac"
    )
    .then_some(ext)
}

/// Choose the extension for a downloaded audio file
///
/// The response Content-Type wins. Unknown or missing types fall back to
/// the URL's extension, then to [`FALLBACK_EXTENSION`].
pub fn audio_extension(content_type: Option<&str>, url: &Url) -> String {
    content_type
        .and_then(mime_to_extension)
        .map(String::from)
        .or_else(|| url_extension(url))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// Output filename for the episode at `index` (zero-based)
pub fn episode_filename(index: usize, extension: &str) -> String {
    format!("{}.{}", index, extension)
}
