use eyre::Result;
use regex::Regex;

use crate::{TranscriptArtifact, timestamp};

/// Render the artifact as plain text, optionally prefixed with a
/// fixed-width metadata banner
pub fn render_text(artifact: &TranscriptArtifact, include_metadata: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    if include_metadata {
        let separator = "=".repeat(80);
        lines.push(separator.clone());
        lines.push(format!("Title: {}", or_unknown(&artifact.title)));
        lines.push(format!("Uploader: {}", or_unknown(&artifact.uploader)));
        if artifact.duration_seconds > 0 {
            lines.push(format!("Duration: {}", timestamp::format(artifact.duration_seconds)));
        }
        lines.push(format!("URL: https://www.youtube.com/watch?v={}", artifact.video_id));
        lines.push(separator);
        lines.push(String::new());
    }

    lines.push(artifact.body_text.clone());
    lines.join("\n")
}

/// Render the full artifact, chapters included, as pretty JSON
pub fn render_json(artifact: &TranscriptArtifact) -> Result<String> {
    Ok(serde_json::to_string_pretty(artifact)?)
}

/// Derive a filesystem-safe filename from the video title and ID
pub fn auto_filename(artifact: &TranscriptArtifact) -> String {
    let base = if artifact.title.is_empty() { "transcript" } else { &artifact.title };

    let safe = Regex::new(r"[^\w\s-]").unwrap().replace_all(base, "");
    let safe = Regex::new(r"[-\s]+").unwrap().replace_all(&safe, "-");
    let safe: String = safe.chars().take(100).collect();
    let safe = safe.trim_matches('-');

    let stem = if safe.is_empty() { "transcript" } else { safe };
    format!("{}_{}.txt", stem, artifact.video_id)
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "Unknown" } else { value }
}
