use regex::Regex;

use crate::CaptionFragment;

/// Discourse markers that force a paragraph break. The marker sentence
/// opens the new paragraph; the sentence before it closes the old one.
/// The list and its order are part of the output contract.
const DISCOURSE_MARKERS: &[&str] = &[
    "now ",
    "next,",
    "however,",
    "but ",
    "so ",
    "therefore",
    "furthermore",
    "additionally",
    "finally",
    "in conclusion",
    "let me",
    "let's",
    "okay",
    "alright",
    "well,",
];

/// Reflow raw caption fragments into readable paragraphs.
/// Deterministic for a given fragment ordering; empty input yields "".
pub fn reflow(fragments: &[CaptionFragment]) -> String {
    let annotation = Regex::new(r"\[.*?\]").unwrap();

    let mut pieces = Vec::new();
    for fragment in fragments {
        let text = fragment.text.replace('\n', " ");
        let text = annotation.replace_all(&text, "");
        let text = text.trim();
        if !text.is_empty() {
            pieces.push(text.to_string());
        }
    }

    let joined = pieces.join(" ");
    let full_text = Regex::new(r"\s+").unwrap().replace_all(&joined, " ").trim().to_string();
    if full_text.is_empty() {
        return String::new();
    }

    let mut sentences = split_sentences(&full_text);

    // Caption sources without punctuation produce one giant "sentence";
    // re-segment those by word count instead
    if sentences.len() <= 3 && full_text.chars().count() > 200 {
        sentences = resegment_by_words(&full_text);
    }

    group_paragraphs(sentences)
        .iter()
        .map(|p| finish_paragraph(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split on `.`, `!`, or `?` followed by whitespace, keeping the punctuation
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut after_terminal = false;

    for ch in text.chars() {
        if after_terminal && ch.is_whitespace() {
            sentences.push(current.trim().to_string());
            current.clear();
            after_terminal = false;
            continue;
        }
        current.push(ch);
        after_terminal = matches!(ch, '.' | '!' | '?');
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Accumulate words into candidate sentences: close at 15 words when the
/// next word starts uppercase, or at 20 words regardless
fn resegment_by_words(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut sentences = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        current.push(word);

        if current.len() >= 15 {
            let next_starts_upper = words
                .get(i + 1)
                .and_then(|w| w.chars().next())
                .is_some_and(|c| c.is_uppercase());

            if next_starts_upper || current.len() >= 20 {
                sentences.push(current.join(" "));
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        sentences.push(current.join(" "));
    }
    sentences
}

fn starts_with_marker(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    DISCOURSE_MARKERS.iter().any(|marker| lower.starts_with(marker))
}

fn group_paragraphs(sentences: Vec<String>) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for sentence in sentences {
        let sentence = sentence.trim().to_string();
        if sentence.is_empty() {
            continue;
        }

        current.push(sentence.clone());
        let paragraph_text = current.join(" ");

        let mut should_break = false;

        if current.len() >= 4 {
            should_break = true;
        } else if paragraph_text.chars().count() > 500 && current.len() >= 2 {
            should_break = true;
        } else if starts_with_marker(&sentence) && current.len() > 1 {
            // The marker sentence starts the new paragraph; everything
            // before it closes out the old one
            current.pop();
            paragraphs.push(current.join(" "));
            current = vec![sentence];
        }

        if should_break {
            paragraphs.push(paragraph_text);
            current.clear();
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

/// Capitalize the first character and ensure terminal punctuation
fn finish_paragraph(paragraph: &str) -> String {
    let paragraph = paragraph.trim();
    let mut chars = paragraph.chars();

    let mut finished = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => return String::new(),
    };

    if !finished.ends_with(['.', '!', '?']) {
        finished.push('.');
    }
    finished
}
