//! Lenient JSON parsing for model output and literal-style form fields.
//!
//! Strict `serde_json` first. When that fails, a single rewrite pass normalises the
//! looseness models and hand-written list literals tend to produce:
//! single-quoted strings, `True`/`False`/`None`, trailing commas and raw control
//! characters inside strings. Nothing is evaluated; anything still invalid is an error.

use serde_json::Value;
use thiserror::Error;

use crate::llm_client::strip_json_fences;

#[derive(Debug, Error)]
#[error("could not parse structured output: {strict} (after repair: {repaired})")]
pub struct LenientParseError {
    pub strict: serde_json::Error,
    pub repaired: serde_json::Error,
}

pub fn parse_lenient(text: &str) -> Result<Value, LenientParseError> {
    let text = strip_json_fences(text);

    let strict = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let repaired = match serde_json::from_str(&repair(text)) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    // Prose around the payload: retry on the outermost bracketed span.
    if let Some(span) = outermost_span(text) {
        if span.len() < text.len() {
            if let Ok(value) = serde_json::from_str(&repair(span)) {
                return Ok(value);
            }
        }
    }

    Err(LenientParseError { strict, repaired })
}

/// Rewrites literal-style syntax into JSON. String contents are preserved; only
/// quoting, keywords and separators outside strings change.
fn repair(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                i = copy_string(&chars, i, &mut out);
                continue;
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(',');
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
                continue;
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

/// Copies the string literal starting at `start` as a double-quoted JSON string.
/// Returns the index just past the closing quote (or the end of input).
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    out.push('"');

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' if i + 1 < chars.len() => {
                let escaped = chars[i + 1];
                match escaped {
                    '\'' => out.push('\''),
                    '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u' => {
                        out.push('\\');
                        out.push(escaped);
                    }
                    other => {
                        out.push_str("\\\\");
                        out.push(other);
                    }
                }
                i += 2;
                continue;
            }
            c if c == quote => {
                out.push('"');
                return i + 1;
            }
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
        i += 1;
    }

    out.push('"');
    i
}

fn outermost_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
