pub mod chapters;
pub mod config;
pub mod output;
pub mod reflow;
pub mod server;
pub mod timestamp;
pub mod transcribe;
pub mod youtube;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the transcript pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not extract video ID from: {0}")]
    InvalidUrl(String),

    #[error("no transcript available for video {0}")]
    NoTranscript(String),

    #[error("request to YouTube failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error: {0}")]
    Provider(String),
}

/// One unit of raw transcript as returned by the caption provider.
/// Ordering is significant and preserved end to end.
#[derive(Debug, Clone, Serialize)]
pub struct CaptionFragment {
    pub text: String,
    pub start_seconds: Option<f64>,
}

/// A chapter marker, either from provider metadata or parsed out of
/// the video description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub start_seconds: u64,
    pub end_seconds: Option<u64>,
    pub display_timestamp: String,
}

/// Raw chapter record as the metadata provider reports it
#[derive(Debug, Clone, Default)]
pub struct ChapterSpan {
    pub title: Option<String>,
    pub start_time: u64,
    pub end_time: Option<u64>,
}

/// Video metadata; every field defaults when the provider omits it
#[derive(Debug, Clone, Default)]
pub struct VideoInfo {
    pub title: String,
    pub duration_seconds: u64,
    pub description: String,
    pub uploader: String,
    pub upload_date: String,
    pub chapters: Vec<ChapterSpan>,
}

/// Final output for one video: reflowed transcript plus chapters
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptArtifact {
    pub video_id: String,
    pub title: String,
    pub body_text: String,
    pub chapters: Vec<Chapter>,
    pub duration_seconds: u64,
    pub uploader: String,
    pub upload_date: String,
}

const ID_PATTERN: &str = r"^[a-zA-Z0-9_-]{11}$";

const URL_PATTERNS: &[&str] = &[
    r"(?i)(?:https?://)?(?:www\.)?youtube\.com/watch\?.*?v=([a-zA-Z0-9_-]{11})",
    r"(?i)(?:https?://)?youtu\.be/([a-zA-Z0-9_-]{11})",
    r"(?i)(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})",
    r"(?i)(?:https?://)?(?:www\.)?youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
    r"(?i)(?:https?://)?(?:www\.)?youtube\.com/live/([a-zA-Z0-9_-]{11})",
    r"(?i)(?:https?://)?m\.youtube\.com/watch\?.*?v=([a-zA-Z0-9_-]{11})",
    r"^([a-zA-Z0-9_-]{11})$",
];

fn is_valid_video_id(candidate: &str) -> bool {
    regex::Regex::new(ID_PATTERN).unwrap().is_match(candidate)
}

/// Extract a video ID from various YouTube URL formats, or a bare ID.
/// Returns None for anything unrecognized; never panics on malformed input.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Prioritized pattern match: first pattern that yields a valid ID wins
    for pattern in URL_PATTERNS {
        if let Some(caps) = regex::Regex::new(pattern).unwrap().captures(input) {
            let candidate = &caps[1];
            if is_valid_video_id(candidate) {
                return Some(candidate.to_string());
            }
        }
    }

    // Fall back to generic URL parsing with host-specific path rules
    extract_from_parsed_url(input)
}

fn extract_from_parsed_url(input: &str) -> Option<String> {
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let url = reqwest::Url::parse(&with_scheme).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    let candidate = match host.as_str() {
        "youtube.com" | "www.youtube.com" | "m.youtube.com" => {
            let path = url.path();
            if path == "/watch" {
                url.query_pairs().find(|(k, _)| k == "v").map(|(_, v)| v.into_owned())
            } else {
                ["/embed/", "/shorts/", "/live/"]
                    .iter()
                    .find_map(|prefix| path.strip_prefix(prefix))
                    .map(|rest| rest.split(['/', '?']).next().unwrap_or("").to_string())
            }
        }
        "youtu.be" => url
            .path()
            .strip_prefix('/')
            .map(|p| p.split(['/', '?']).next().unwrap_or("").to_string()),
        _ => None,
    }?;

    if is_valid_video_id(&candidate) { Some(candidate) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_video_id() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_v_not_first_param() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_live_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/live/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_mobile_url() {
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_no_scheme() {
        assert_eq!(
            extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_uppercase_host() {
        assert_eq!(
            extract_video_id("https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(extract_video_id("not a url"), None);
    }

    #[test]
    fn test_wrong_length_id() {
        assert_eq!(extract_video_id("https://youtu.be/shortid"), None);
    }

    #[test]
    fn test_unrelated_host() {
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(extract_video_id("  dQw4w9WgXcQ  "), Some("dQw4w9WgXcQ".to_string()));
    }
}
