//! Deterministic report file names.
//!
//! A report is named `AGENT{n}_{keywords}_{SUFFIX}.md`, where the keywords are
//! the first few meaningful words of the topic or task, made filesystem-safe.

use super::document::ReportKind;
use crate::credential::CredentialNumber;
use regex::Regex;
use std::sync::LazyLock;

/// Words never used as file name keywords
pub const STOP_WORDS: &[&str] = &[
    "research", "analyze", "study", "investigate", "examine", "explore", "the", "and", "or",
    "in", "on", "about", "for", "with", "by", "from", "a", "an", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "can", "must", "shall", "why", "how", "what",
];

/// Stem used when nothing usable remains after sanitizing
pub const FALLBACK_STEM: &str = "research_report";

const MAX_KEYWORDS: usize = 3;
const MAX_STEM_CHARS: usize = 50;
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'', '-',
];

static FORBIDDEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-.]+").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// First few non-stop-words of `text`, lowercased and joined by `_`.
///
/// Tokens of two characters or fewer are skipped before punctuation is stripped.
pub fn extract_keywords(text: &str) -> String {
    text.split_whitespace()
        .filter(|raw| raw.chars().count() > 2)
        .map(|raw| raw.to_lowercase().trim_matches(EDGE_PUNCTUATION).to_string())
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .take(MAX_KEYWORDS)
        .collect::<Vec<_>>()
        .join("_")
}

/// Make `text` safe for use as a file name stem
pub fn sanitize_stem(text: &str) -> String {
    let cleaned = FORBIDDEN_CHARS.replace_all(text, "");
    let cleaned = SEPARATOR_RUNS.replace_all(&cleaned, "_");
    let cleaned = UNDERSCORE_RUNS.replace_all(&cleaned, "_");
    let stem: String = cleaned.trim_matches('_').chars().take(MAX_STEM_CHARS).collect();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_lowercase()
    }
}

/// File name for a report produced with credential/agent number `agent`
pub fn report_file_name(agent: CredentialNumber, subject: &str, kind: ReportKind) -> String {
    format!(
        "AGENT{}_{}_{}.md",
        agent,
        sanitize_stem(&extract_keywords(subject)),
        kind.file_suffix()
    )
}
