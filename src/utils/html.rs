use html2text::from_read;

use once_cell::sync::Lazy;
use regex::Regex;

static IMG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\s+[^>]*alt=["']([^"']*)["'][^>]*>"#).expect("image regex compiles")
});

static IFRAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<iframe\s+[^>]*src=["']([^"']*)["'][^>]*>.*?</iframe>"#)
        .expect("iframe regex compiles")
});

/// Readable text from the HTML body of an article or event.
///
/// `<img alt>` becomes `[Gambar: alt]` and embedded iframes become
/// `[Video: src]` before the markup is flattened with `html2text`.
pub fn extract_text_from_html(html: &str, width: usize) -> String {
    let with_images = IMG_REGEX.replace_all(html, "[Gambar: $1]");
    let with_embeds = IFRAME_REGEX.replace_all(&with_images, "[Video: $1]");

    let mut bytes = with_embeds.as_bytes();
    from_read(&mut bytes, width.max(20)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text() {
        let html = "<p>Halo <strong>GenBI</strong> &amp; kawan</p>";
        let out = extract_text_from_html(html, 80);
        assert!(out.contains("Halo"));
        assert!(out.contains("GenBI"));
        assert!(out.contains("& kawan"));
    }

    #[test]
    fn replaces_images_and_embeds() {
        let html = "<p>Lihat: <img src=\"a.jpg\" alt=\"Foto Kegiatan\" /></p>\
                    <iframe src=\"https://www.youtube.com/embed/abc\"></iframe>";
        let out = extract_text_from_html(html, 80);
        assert!(out.contains("[Gambar: Foto Kegiatan]"));
        assert!(out.contains("[Video: https://www.youtube.com/embed/abc]"));
    }
}
