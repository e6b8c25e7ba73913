//! Block body parser.
//!
//! Splits a body on unescaped `|` into alternatives, each alternative on the
//! first unescaped `:` into token groups and text. For complex blocks the
//! token side is split on `+` into one group per kind; within a group specs
//! are separated by `,`.

use crate::data::names::is_valid_token_name;

use super::ast::{AltText, Alternative, TokenSpec};

/// Characters that a backslash turns into literal text inside a body.
const BODY_ESCAPES: [char; 4] = ['|', ':', '{', '}'];

/// Parse the raw text between a block's braces.
///
/// `arity` is the length of the block's kind path; zero and one both mean a
/// simple block with a single token group per alternative.
pub fn parse_body(raw: &str, arity: usize) -> Vec<Alternative> {
    split_unescaped(raw, '|')
        .into_iter()
        .map(|alt| parse_alternative(alt, arity))
        .collect()
}

fn parse_alternative(raw: &str, arity: usize) -> Alternative {
    let Some(colon) = find_unescaped(raw, ':') else {
        return Alternative {
            groups: Vec::new(),
            text: parse_text(raw),
        };
    };

    let (tokens, text) = (&raw[..colon], &raw[colon + 1..]);
    let groups = if arity > 1 {
        tokens.split('+').map(parse_group).collect()
    } else {
        vec![parse_group(tokens)]
    };

    Alternative {
        groups,
        text: parse_text(text),
    }
}

/// Parse a comma-separated token group. An empty group yields no specs.
fn parse_group(raw: &str) -> Vec<TokenSpec> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(parse_spec).collect()
}

/// Classify one token spec.
pub fn parse_spec(raw: &str) -> TokenSpec {
    if raw == "*" {
        return TokenSpec::Wildcard;
    }
    if let Some(name) = raw.strip_prefix('!') {
        if is_valid_token_name(name) {
            return TokenSpec::Negated(name.to_string());
        }
    } else if is_valid_token_name(raw) {
        return TokenSpec::Name(raw.to_string());
    }
    TokenSpec::Invalid(raw.to_string())
}

/// Unescape alternative text and detect the loud marker.
///
/// `~` alone is loud. A run of backslashes followed by `~` loses one
/// backslash and is literal, so `\~` gives `~` and `\\~` gives `\~`.
pub fn parse_text(raw: &str) -> AltText {
    let text = unescape(raw);
    if text == "~" {
        return AltText::Loud;
    }
    if let Some(slashes) = text.strip_suffix('~') {
        if !slashes.is_empty() && slashes.chars().all(|c| c == '\\') {
            return AltText::Plain(text[1..].to_string());
        }
    }
    AltText::Plain(text)
}

/// Replace `\|`, `\:`, `\{`, `\}` with the bare character. Other backslashes
/// are kept.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if BODY_ESCAPES.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Split on `sep` where it is not preceded by a backslash.
fn split_unescaped(raw: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(&raw[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// Byte offset of the first `needle` not preceded by a backslash.
fn find_unescaped(raw: &str, needle: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == needle {
            return Some(i);
        }
    }
    None
}
