//! Best-effort recovery of JSON from LLM completion text.
//!
//! Completions often wrap the payload in Markdown fences or surround it with
//! prose. The parser strips fences, tries the whole text, and then falls back
//! to the first balanced `{…}` / `[…]` block.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ParseError;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)```").expect("valid regex"));

/// Parses JSON out of completion text.
///
/// # Errors
///
/// Returns [`ParseError::Empty`] for blank input, [`ParseError::NoJsonFound`]
/// when no candidate block exists, and [`ParseError::Json`] when the best
/// candidate is not valid JSON.
pub fn try_parse_trip_text(text: &str) -> Result<Value, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let body = CODE_FENCE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str().trim());

    let direct_err = match serde_json::from_str::<Value>(body) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let Some(start) = body.find(['{', '[']) else {
        return if body.starts_with('"') {
            Err(ParseError::Json(direct_err))
        } else {
            Err(ParseError::NoJsonFound)
        };
    };

    match extract_balanced_block(&body[start..]) {
        Some(block) => Ok(serde_json::from_str(block)?),
        None => Err(ParseError::Json(direct_err)),
    }
}

/// Never-failing wrapper over [`try_parse_trip_text`]; failures are logged
/// and surface as `None`.
#[must_use]
pub fn parse_trip_text(text: &str) -> Option<Value> {
    match try_parse_trip_text(text) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "trip text is not parseable JSON");
            None
        }
    }
}

/// Returns the shortest prefix of `s` forming a complete, properly nested
/// JSON object or array.
///
/// Tracks brackets while respecting string literals and escape sequences.
/// A closer that does not match the innermost opener aborts the scan, so
/// `[42}` is never accepted.
fn extract_balanced_block(s: &str) -> Option<&str> {
    if !(s.starts_with('{') || s.starts_with('[')) {
        return None;
    }
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(c) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
