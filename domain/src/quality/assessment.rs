//! Assessment response parsing.
//!
//! The assessor is asked to answer in a fixed line format:
//!
//! ```text
//! SCORE: 6
//! EXPLANATION: ...
//! IMPROVEMENTS: Add a rollout timeline
//! ```
//!
//! Parsing is tolerant: markdown emphasis and list bullets in front of a
//! marker are ignored, `8/10` reads as 8, and anything missing falls back to
//! explicit defaults instead of failing.

use serde::{Deserialize, Serialize};

/// Line prefix carrying the numeric score
pub const SCORE_MARKER: &str = "SCORE:";

/// Line prefix carrying the improvement notes
pub const IMPROVEMENTS_MARKER: &str = "IMPROVEMENTS:";

/// Score used when no parsable score line exists
pub const DEFAULT_SCORE: f64 = 5.0;

/// Notes used when the assessor gave none
pub const FALLBACK_IMPROVEMENTS: &str = "Please provide more detailed analysis, clearer actionable steps, and better organization of the content.";

/// Structured view of one assessment response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: f64,
    pub improvements: String,
    /// Whether the score came from the response rather than the default
    pub score_parsed: bool,
}

impl Assessment {
    /// Parse an assessor response, applying defaults for missing fields
    pub fn parse(response: &str) -> Self {
        let parsed = parse_score(response);
        Self {
            score: parsed.unwrap_or(DEFAULT_SCORE),
            improvements: parse_improvements(response)
                .unwrap_or_else(|| FALLBACK_IMPROVEMENTS.to_string()),
            score_parsed: parsed.is_some(),
        }
    }

    /// Result used when the assessment request itself failed
    pub fn unavailable() -> Self {
        Self {
            score: DEFAULT_SCORE,
            improvements: FALLBACK_IMPROVEMENTS.to_string(),
            score_parsed: false,
        }
    }
}

/// Text following `marker` on the first line that starts with it
fn marker_value<'a>(response: &'a str, marker: &str) -> Option<&'a str> {
    response.lines().find_map(|line| {
        let line = line
            .trim()
            .trim_start_matches(|c: char| matches!(c, '*' | '#' | '-' | '>' | '_') || c.is_whitespace());
        line.strip_prefix(marker)
            .map(|rest| rest.trim().trim_matches(|c: char| c == '*' || c == '_').trim())
    })
}

/// Extract the score from the first `SCORE:` line.
///
/// Only the first marker line is considered; if its value does not start
/// with a number the score is unknown.
pub fn parse_score(response: &str) -> Option<f64> {
    let value = marker_value(response, SCORE_MARKER)?;
    let numeric: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.trim_end_matches('.').parse::<f64>().ok()
}

/// Extract improvement notes from the first `IMPROVEMENTS:` line.
///
/// Returns `None` when absent, empty, or "none".
pub fn parse_improvements(response: &str) -> Option<String> {
    let value = marker_value(response, IMPROVEMENTS_MARKER)?;
    let value = value.trim_matches(|c: char| c == '"' || c == '\'');
    if value.is_empty() || value.trim_end_matches('.').eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}
