//! JavaScript array literal location and JS-to-JSON repair
//!
//! Handles the one quasi-JS shape the helmet dataset is published in:
//! - `const|let|var <name> = [ ... ];` declarations
//! - unquoted object keys
//! - single-quoted strings
//! - trailing commas
//!
//! This is not a JavaScript parser. Template literals, comments and
//! computed expressions inside the literal are not supported.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::error::ExtractionError;

/// Find the array literal assigned to `identifier` and return its text,
/// from the opening `[` to the matching `]` inclusive.
pub(crate) fn locate_array_literal<'a>(
    js_code: &'a str,
    identifier: &str,
) -> Result<&'a str, ExtractionError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*\[")
            .expect("declaration regex is valid")
    });

    let open = re
        .captures_iter(js_code)
        .filter(|cap| cap.get(1).is_some_and(|m| m.as_str() == identifier))
        .find_map(|cap| cap.get(0))
        .map(|m| m.end() - 1)
        .ok_or_else(|| ExtractionError::MarkerNotFound {
            identifier: identifier.to_string(),
        })?;

    let end = matching_bracket(&js_code[open..]).ok_or_else(|| ExtractionError::Unterminated {
        identifier: identifier.to_string(),
    })?;
    Ok(&js_code[open..open + end])
}

/// Byte length of the bracketed region starting at `text[0] == '['`,
/// skipping brackets that appear inside string literals.
fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Rewrite a JS object/array literal into strict JSON.
///
/// One left-to-right regex pass, so text inside string literals is never
/// mistaken for a key or a comma. Double-quoted strings pass through as-is.
pub fn repair_js_literal(js_str: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(concat!(
            r#""(?:[^"\\]|\\.)*""#,
            r#"|'((?:[^'\\]|\\.)*)'"#,
            r#"|([A-Za-z_$][\w$]*|\d+)(\s*:)"#,
            r#"|,(\s*[\]}])"#,
        ))
        .expect("repair regex is valid")
    });

    re.replace_all(js_str, |caps: &Captures| {
        if let Some(body) = caps.get(1) {
            // 'text' -> "text"
            format!("\"{}\"", requote_single(body.as_str()))
        } else if let (Some(key), Some(colon)) = (caps.get(2), caps.get(3)) {
            // key: -> "key":
            format!("\"{}\"{}", key.as_str(), colon.as_str())
        } else if let Some(close) = caps.get(4) {
            // , ] -> ]
            close.as_str().to_string()
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}

// Body of a single-quoted string, made safe to wrap in double quotes
fn requote_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }

    out
}
