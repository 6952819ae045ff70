/// Bundled image shown when a record has no thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "/images/NO IMAGE AVAILABLE.jpg";

/// Resolve a relative media path against the API's `/storage/` prefix.
///
/// Missing or blank paths fall back to [`PLACEHOLDER_IMAGE`].
/// Example: ("https://data.example", Some("artikel/a.jpg")) -> "https://data.example/storage/artikel/a.jpg"
pub fn storage_url(base_url: &str, path: Option<&str>) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => format!(
            "{}/storage/{}",
            base_url.trim_end_matches('/'),
            p.trim_start_matches('/')
        ),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Link for a podcast episode. An explicit URL wins over the video id.
pub fn youtube_url(video_id: Option<&str>, explicit: Option<&str>) -> Option<String> {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return Some(url.to_string());
    }
    video_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://www.youtube.com/watch?v={}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_url_joins_prefix() {
        assert_eq!(
            storage_url("https://data.genbipurwokerto.com", Some("artikel/a.jpg")),
            "https://data.genbipurwokerto.com/storage/artikel/a.jpg"
        );
    }

    #[test]
    fn test_storage_url_handles_slashes() {
        assert_eq!(
            storage_url("http://localhost/", Some("/x.png")),
            "http://localhost/storage/x.png"
        );
    }

    #[test]
    fn test_storage_url_placeholder() {
        assert_eq!(storage_url("http://localhost", None), PLACEHOLDER_IMAGE);
        assert_eq!(storage_url("http://localhost", Some("  ")), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_youtube_url() {
        assert_eq!(
            youtube_url(Some("abc123"), None),
            Some("https://www.youtube.com/watch?v=abc123".to_string())
        );
        assert_eq!(
            youtube_url(Some("abc123"), Some("https://youtu.be/xyz")),
            Some("https://youtu.be/xyz".to_string())
        );
        assert_eq!(youtube_url(None, Some("")), None);
    }
}
