//! Derived article metadata.
//!
//! Cheap deterministic heuristics computed from the final content; they feed
//! the article record and the SEO plugin fields on the published post.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const EXCERPT_MAX_CHARS: usize = 150;
const KEYWORD_COUNT: usize = 5;
const WORDS_PER_MINUTE: usize = 200;

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w{3,}").expect("static regex"))
}

/// First paragraph of the content, truncated to 150 characters. Leading
/// Markdown heading markers are dropped so a content that opens with a
/// heading still yields a usable excerpt.
pub fn excerpt(content: &str) -> String {
    let first_paragraph = content
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or("");

    first_paragraph
        .trim_start_matches('#')
        .trim()
        .chars()
        .take(EXCERPT_MAX_CHARS)
        .collect()
}

/// Top-5 most frequent word-like tokens, lowercased. Ties break by first
/// occurrence so the result is deterministic.
pub fn extract_keywords(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, token) in token_regex().find_iter(&lowered).enumerate() {
        let entry = counts.entry(token.as_str()).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(KEYWORD_COUNT)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Estimated reading time: ceil(words / 200), minimum one minute.
pub fn reading_time_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    (words.div_ceil(WORDS_PER_MINUTE)).max(1) as i32
}

/// Additive scoring rubric, capped at 100:
/// base 40; +15 title length 20-60 chars; +15 top keyword appears in the
/// title; +15 content at least 600 chars; +10 body uses Markdown headings;
/// +5 non-empty excerpt paragraph.
pub fn seo_score(title: &str, content: &str, keywords: &[String]) -> i32 {
    let mut score = 40;

    let title_chars = title.chars().count();
    if (20..=60).contains(&title_chars) {
        score += 15;
    }

    if let Some(top) = keywords.first() {
        if title.to_lowercase().contains(top.as_str()) {
            score += 15;
        }
    }

    if content.chars().count() >= 600 {
        score += 15;
    }

    if content.starts_with('#') || content.contains("\n#") {
        score += 10;
    }

    if !excerpt(content).is_empty() {
        score += 5;
    }

    score.min(100)
}
