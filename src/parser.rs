// ABOUTME: Defensive multi-stage parsing of model output into domain values
// ABOUTME: Strict JSON first, then relaxed repair, then regex extraction, then fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Response Parser
//!
//! Model output is semi-structured at best: markdown fences, trailing
//! commas, truncation mid-array, or prose instead of JSON. The parsers here
//! are pipelines of small pure stages where the first stage producing a
//! value wins, and the final stage is always fallback content. Neither
//! entry point can fail or panic.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::fallback::{self, MIN_TIPS};
use crate::mapper::{map_entry, RawTipEntry};
use crate::models::{Difficulty, TipDetails, WellnessGoal, WellnessTip};

/// Default time estimate when the model omits or mangles `timeRequired`
const DEFAULT_TIME_REQUIRED: &str = "15-30 minutes";

// ============================================================================
// Shared stages
// ============================================================================

/// Strip markdown code-fence framing from a response
///
/// Removes any ```` ``` ```` or ```` ```json ```` marker lines, keeping the
/// content between them.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locate the first balanced JSON array in a string via bracket matching
///
/// String-aware: brackets inside quoted values do not count. Returns `None`
/// when no opening bracket exists or the array never closes.
#[must_use]
pub fn extract_json_array(text: &str) -> Option<&str> {
    extract_balanced(text, '[', ']')
}

/// Locate the first balanced JSON object in a string
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    extract_balanced(text, '{', '}')
}

fn extract_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..=start + offset]);
            }
        }
    }
    None
}

// Patterns are fixed, so each compiles once for the process lifetime.
fn trailing_comma_regex() -> Option<&'static Regex> {
    static TRAILING_COMMA: OnceLock<Option<Regex>> = OnceLock::new();
    TRAILING_COMMA
        .get_or_init(|| Regex::new(r",\s*([\]}])").ok())
        .as_ref()
}

fn string_pair_regex() -> Option<&'static Regex> {
    static STRING_PAIR: OnceLock<Option<Regex>> = OnceLock::new();
    STRING_PAIR
        .get_or_init(|| Regex::new(r#""([A-Za-z]+)"\s*:\s*"((?:[^"\\]|\\.)*)""#).ok())
        .as_ref()
}

fn array_pair_regex() -> Option<&'static Regex> {
    static ARRAY_PAIR: OnceLock<Option<Regex>> = OnceLock::new();
    ARRAY_PAIR
        .get_or_init(|| Regex::new(r#""([A-Za-z]+)"\s*:\s*\[([^\]]*)\]"#).ok())
        .as_ref()
}

fn quoted_item_regex() -> Option<&'static Regex> {
    static QUOTED_ITEM: OnceLock<Option<Regex>> = OnceLock::new();
    QUOTED_ITEM
        .get_or_init(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).ok())
        .as_ref()
}

/// Remove trailing commas before `]` or `}` so near-JSON parses
#[must_use]
pub fn strip_trailing_commas(text: &str) -> String {
    match trailing_comma_regex() {
        Some(re) => re.replace_all(text, "$1").into_owned(),
        None => text.to_owned(),
    }
}

/// Parse a JSON fragment strictly, then once more after trailing-comma repair
fn parse_strict_then_relaxed(fragment: &str) -> Option<Value> {
    serde_json::from_str(fragment)
        .ok()
        .or_else(|| serde_json::from_str(&strip_trailing_commas(fragment)).ok())
}

// ============================================================================
// Recommendation list parsing
// ============================================================================

/// Parse a raw model response into a recommendation list
///
/// Always returns at least [`MIN_TIPS`] tips: survivors of the parse are
/// mapped (capped at `max_count`) and padded with fallback content, and a
/// response with nothing salvageable yields the pure fallback list.
#[must_use]
pub fn parse_recommendations(
    raw: &str,
    goals: &[WellnessGoal],
    max_count: usize,
) -> Vec<WellnessTip> {
    try_parse_recommendations(raw, goals, max_count)
        .unwrap_or_else(|| fallback::fallback_tips(goals))
}

/// Parse stage shared with the engine, which also wants to know whether the
/// response contributed anything or the list is pure fallback
///
/// Returns `None` when nothing in the response survived.
pub(crate) fn try_parse_recommendations(
    raw: &str,
    goals: &[WellnessGoal],
    max_count: usize,
) -> Option<Vec<WellnessTip>> {
    let cleaned = strip_code_fences(raw);

    let Some(fragment) = extract_json_array(&cleaned) else {
        debug!("no JSON array in response");
        return None;
    };

    let Some(Value::Array(entries)) = parse_strict_then_relaxed(fragment) else {
        debug!("JSON array unparseable after repair");
        return None;
    };

    let survivors: Vec<RawTipEntry> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawTipEntry>(entry).ok())
        .filter(RawTipEntry::is_complete)
        .collect();

    if survivors.is_empty() {
        debug!("no complete entries in parsed array");
        return None;
    }

    let mut tips: Vec<WellnessTip> = survivors
        .iter()
        .take(max_count)
        .enumerate()
        .map(|(index, entry)| map_entry(entry, index, goals))
        .collect();

    // Pad cyclically over the goal list up to the floor
    let mut pad_index = tips.len();
    while tips.len() < MIN_TIPS {
        tips.push(fallback::generated_tip(pad_index, goals));
        pad_index += 1;
    }

    Some(tips)
}

// ============================================================================
// Detail parsing
// ============================================================================

/// Best-effort parse of a detail-augmentation response
///
/// Fields absent or malformed stay at their neutral values; `time_required`
/// and `difficulty` are normalized here so callers see concrete values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDetails {
    /// Detailed explanation when one was recovered
    pub long_description: Option<String>,
    /// Implementation steps, possibly empty
    pub steps: Vec<String>,
    /// Key benefits, possibly empty
    pub benefits: Vec<String>,
    /// Time estimate, defaulted when absent
    pub time_required: String,
    /// Difficulty, defaulted to easy when absent or invalid
    pub difficulty: Difficulty,
}

impl ParsedDetails {
    /// Promote to complete [`TipDetails`], substituting defaults for any
    /// field the response did not supply
    #[must_use]
    pub fn into_details(self) -> TipDetails {
        let defaults = fallback::default_details();
        TipDetails {
            long_description: self
                .long_description
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(defaults.long_description),
            steps: if self.steps.is_empty() {
                defaults.steps
            } else {
                self.steps
            },
            benefits: if self.benefits.is_empty() {
                defaults.benefits
            } else {
                self.benefits
            },
            time_required: self.time_required,
            difficulty: self.difficulty,
        }
    }
}

/// Parse a raw detail-augmentation response
///
/// Strict object parse first; failing that, per-field regex extraction
/// tolerant of responses that are not well-formed JSON at all.
#[must_use]
pub fn parse_detail(raw: &str) -> ParsedDetails {
    let cleaned = strip_code_fences(raw);

    if let Some(fragment) = extract_json_object(&cleaned) {
        if let Some(Value::Object(map)) = parse_strict_then_relaxed(fragment) {
            return ParsedDetails {
                long_description: map
                    .get("longDescription")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                steps: string_array(map.get("steps")),
                benefits: string_array(map.get("benefits")),
                time_required: map
                    .get("timeRequired")
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(DEFAULT_TIME_REQUIRED)
                    .to_owned(),
                difficulty: map
                    .get("difficulty")
                    .and_then(Value::as_str)
                    .map_or(Difficulty::Easy, Difficulty::from_str_or_default),
            };
        }
    }

    debug!("detail response not valid JSON, extracting fields by pattern");
    ParsedDetails {
        long_description: extract_string_field(&cleaned, "longDescription"),
        steps: extract_array_field(&cleaned, "steps"),
        benefits: extract_array_field(&cleaned, "benefits"),
        time_required: extract_string_field(&cleaned, "timeRequired")
            .unwrap_or_else(|| DEFAULT_TIME_REQUIRED.to_owned()),
        difficulty: extract_string_field(&cleaned, "difficulty")
            .map_or(Difficulty::Easy, |s| Difficulty::from_str_or_default(&s)),
    }
}

/// Coerce a JSON value into a vector of non-empty strings
fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Pull a quoted string field out of near-JSON text
///
/// Scans all `"name": "value"` pairs and keeps the first whose name matches.
fn extract_string_field(text: &str, field: &str) -> Option<String> {
    let re = string_pair_regex()?;
    re.captures_iter(text)
        .find(|c| c.get(1).is_some_and(|name| name.as_str() == field))
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().replace("\\\"", "\"").replace("\\n", "\n"))
}

/// Pull a bracketed array of quoted strings out of near-JSON text
///
/// Requires a closing bracket: an array truncated mid-stream yields
/// nothing rather than a partial item list.
fn extract_array_field(text: &str, field: &str) -> Vec<String> {
    let Some(re) = array_pair_regex() else {
        return Vec::new();
    };
    let Some(inner) = re
        .captures_iter(text)
        .find(|c| c.get(1).is_some_and(|name| name.as_str() == field))
        .and_then(|c| c.get(2))
    else {
        return Vec::new();
    };
    let Some(item_re) = quoted_item_regex() else {
        return Vec::new();
    };
    item_re
        .captures_iter(inner.as_str())
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().replace("\\\"", "\""))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        let fenced = "```json\n[1, 2]\n```";
        assert_eq!(strip_code_fences(fenced).trim(), "[1, 2]");
    }

    #[test]
    fn test_extract_json_array_ignores_brackets_in_strings() {
        let text = r#"note [here]: [{"title":"a [b] c"}] trailing"#;
        // First bracket pair is the literal "[here]"
        assert_eq!(extract_json_array(text), Some("[here]"));
        let text = r#"answer: [{"title":"a [b] c"}] trailing"#;
        assert_eq!(extract_json_array(text), Some(r#"[{"title":"a [b] c"}]"#));
    }

    #[test]
    fn test_extract_json_array_unclosed_is_none() {
        assert_eq!(extract_json_array(r#"[{"title":"cut of"#), None);
        assert_eq!(extract_json_array("no array at all"), None);
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(strip_trailing_commas(r#"[{"a":1},]"#), r#"[{"a":1}]"#);
        assert_eq!(strip_trailing_commas("{\"a\": 1, }"), "{\"a\": 1}");
    }
}
