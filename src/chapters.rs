use log::debug;
use regex::Regex;

use crate::{Chapter, ChapterSpan, timestamp};

/// Timestamp+separator patterns tried against the description, in order.
/// The first pattern that yields any chapter wins; results from different
/// patterns are never merged. Each pattern consumes only the timestamp
/// and its separator; the title is the text that follows, ending at the
/// next timestamp on the same line or at the end of the line, so several
/// entries on one line each become a chapter.
const DESCRIPTION_PATTERNS: &[&str] = &[
    // "0:00 - Title" (dash-separated, also en/em dashes)
    r"(\d{1,2}:\d{2}(?::\d{2})?)[ \t]*[-\u{2013}\u{2014}][ \t]*",
    // "0:00 Title" (whitespace-separated)
    r"(\d{1,2}:\d{2}(?::\d{2})?)[ \t]+",
    // "0:00: Title" (colon/dash-separated)
    r"(\d{1,2}:\d{2}(?::\d{2})?)[ \t]*[:\-\u{2013}\u{2014}][ \t]*",
];

/// A bare timestamp, used to find where a same-line title ends
const TIMESTAMP_BOUNDARY: &str = r"\d{1,2}:\d{2}(?::\d{2})?";

/// Derive chapters, preferring provider metadata over description parsing.
/// Always total: anything that cannot be interpreted yields an empty list.
pub fn infer(meta: &[ChapterSpan], description: &str) -> Vec<Chapter> {
    let chapters = from_metadata(meta);
    if !chapters.is_empty() {
        return chapters;
    }
    from_description(description)
}

/// Build chapters from provider metadata records, backfilling each missing
/// end with the following chapter's start
pub fn from_metadata(spans: &[ChapterSpan]) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = Vec::new();

    for (i, span) in spans.iter().enumerate() {
        if let Some(last) = chapters.last_mut() {
            if last.end_seconds.is_none() {
                last.end_seconds = Some(span.start_time);
            }
        }

        let title = span
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Chapter {}", i + 1));

        chapters.push(Chapter {
            title,
            start_seconds: span.start_time,
            end_seconds: span.end_time,
            display_timestamp: timestamp::format(span.start_time),
        });
    }

    chapters
}

/// Scan a free-text description for "timestamp title" lines
pub fn from_description(description: &str) -> Vec<Chapter> {
    if description.is_empty() {
        return Vec::new();
    }

    let boundary = Regex::new(TIMESTAMP_BOUNDARY).unwrap();

    for pattern in DESCRIPTION_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        let mut chapters: Vec<Chapter> = Vec::new();

        for caps in re.captures_iter(description) {
            let raw_timestamp = caps[1].to_string();
            let Some(start) = timestamp::parse(&raw_timestamp) else {
                continue;
            };

            // Title: from the end of the separator to the next timestamp
            // on the line, or the end of the line
            let rest = &description[caps.get(0).unwrap().end()..];
            let line = rest.split('\n').next().unwrap_or("");
            let raw_title = match boundary.find(line) {
                Some(next) => &line[..next.start()],
                None => line,
            };

            let title = clean_title(raw_title);
            if title.is_empty() {
                continue;
            }

            // Keep starts non-decreasing; drop entries that jump backwards
            if chapters.last().is_some_and(|c| start < c.start_seconds) {
                debug!("Skipping out-of-order chapter candidate at {raw_timestamp}");
                continue;
            }

            if let Some(last) = chapters.last_mut() {
                if last.end_seconds.is_none() {
                    last.end_seconds = Some(start);
                }
            }

            chapters.push(Chapter {
                title,
                start_seconds: start,
                end_seconds: None,
                display_timestamp: raw_timestamp,
            });
        }

        if !chapters.is_empty() {
            return chapters;
        }
    }

    Vec::new()
}

fn clean_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
