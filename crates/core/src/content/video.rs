//! YouTube video-ID extraction for video blocks.
//!
//! The editor stores whatever URL the author pasted; the renderer needs
//! the bare 11-character video id to build an embed URL. Recognized URL
//! shapes: a bare id, `/v/`, `/u/<x>/`, `/embed/`, `?v=`, and `&v=`.

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|/v/|/u/\w/|embed/|watch\?v=|&v=)([^#&?/]*)").expect("valid regex")
});

/// Length of every YouTube video id.
const YOUTUBE_ID_LEN: usize = 11;

/// Extract a YouTube video id from a URL, or `None` if the URL matches no
/// known shape. A candidate is only accepted when it is exactly 11
/// characters from the id alphabet; everything else renders as a
/// placeholder card rather than a broken embed.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    let candidate = match YOUTUBE_ID_RE.captures(url) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        // No marker anywhere: treat the whole string as a bare id.
        None => url,
    };
    let valid = candidate.len() == YOUTUBE_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(candidate)
}

/// Build the embed URL for an extracted video id.
pub fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_short_link() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_youtube_id("https://youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_embed_url() {
        assert_eq!(
            extract_youtube_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_v_path_and_ampersand_param() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/v/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn accepts_bare_id() {
        assert_eq!(extract_youtube_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(extract_youtube_id("not-a-url"), None);
        assert_eq!(extract_youtube_id(""), None);
        assert_eq!(extract_youtube_id("https://example.com/plants"), None);
    }

    #[test]
    fn rejects_wrong_length_candidate() {
        assert_eq!(extract_youtube_id("https://youtu.be/short"), None);
        assert_eq!(
            extract_youtube_id("https://youtu.be/waaaaaaaaaytoolong"),
            None
        );
    }

    #[test]
    fn embed_url_shape() {
        assert_eq!(
            youtube_embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }
}
