//! String scanner using winnow.
//!
//! Splits a raw translation string into segments. Handles:
//! - Pattern blocks: `@{...}`, `@kind{...}`, `@kind+kind{...}`
//! - Chained blocks: `@kind{...}{...}` reuses the kind path
//! - Escapes: `@@{...}` and `\@{...}` emit the block text unprocessed

use std::iter::once;

use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, none_of, take_while};

use super::ast::{Block, Segment, Template};
use super::pattern::parse_body;

/// Scan a raw string into literal and block segments.
///
/// Scanning never fails; text that does not form a block stays literal.
pub fn scan(input: &str) -> Template {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => t,
        // Every branch of `segment` consumes input, so this only guards
        // against an unexpected early stop.
        Ok(mut t) => {
            t.segments.push(Segment::Literal(remaining.to_string()));
            Template {
                segments: merge_literals(t.segments),
            }
        }
        Err(_) => Template {
            segments: vec![Segment::Literal(input.to_string())],
        },
    }
}

/// Raw output of one scanning step, before literal merging.
enum Piece {
    Literal(String),
    Blocks(Vec<Block>),
}

fn template(input: &mut &str) -> ModalResult<Template> {
    let pieces: Vec<Piece> = repeat(0.., segment).parse_next(input)?;

    let mut segments = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match piece {
            Piece::Literal(text) => segments.push(Segment::Literal(text)),
            Piece::Blocks(blocks) => segments.extend(blocks.into_iter().map(Segment::Block)),
        }
    }

    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else if !text.is_empty() {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (escaped block, block chain, or literal text).
fn segment(input: &mut &str) -> ModalResult<Piece> {
    alt((escaped_block, block_chain, literal_run, literal_char)).parse_next(input)
}

/// Parse `@@kind{...}` or `\@kind{...}`, keeping the block text verbatim.
fn escaped_block(input: &mut &str) -> ModalResult<Piece> {
    preceded(
        alt(("@@", "\\@")),
        (header, repeat::<_, _, (), _, _>(1.., body)).take(),
    )
    .map(|raw: &str| Piece::Literal(format!("@{raw}")))
    .parse_next(input)
}

/// Parse `@kind{...}` followed by any number of chained `{...}` bodies.
fn block_chain(input: &mut &str) -> ModalResult<Piece> {
    let header = preceded('@', header).parse_next(input)?;
    let first = body(input)?;
    let chained: Vec<&str> = repeat(0.., body).parse_next(input)?;

    let kind_path = kind_path(header);
    let blocks = once(first)
        .chain(chained)
        .map(|raw| Block {
            kind_path: kind_path.clone(),
            alternatives: parse_body(raw, kind_path.len()),
            source: format!("@{header}{{{raw}}}"),
        })
        .collect();

    Ok(Piece::Blocks(blocks))
}

/// Parse a run of text that cannot start a block.
fn literal_run(input: &mut &str) -> ModalResult<Piece> {
    take_while(1.., |c: char| c != '@' && c != '\\')
        .map(|s: &str| Piece::Literal(s.to_string()))
        .parse_next(input)
}

/// Parse a single `@` or `\` that did not start a block.
fn literal_char(input: &mut &str) -> ModalResult<Piece> {
    any.map(|c: char| Piece::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse a block header: the kind path text between `@` and `{`.
fn header<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., is_header_char).parse_next(input)
}

/// Parse a `{...}` body, returning the raw text between the braces.
///
/// The body ends at the first `}` not preceded by a backslash. Braces are
/// not nested.
fn body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('{', body_text, '}').parse_next(input)
}

fn body_text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat::<_, _, (), _, _>(
        0..,
        alt((preceded('\\', any).void(), none_of(['\\', '}']).void())),
    )
    .take()
    .parse_next(input)
}

/// Split a header into its kind path (`gender+tense` -> `[gender, tense]`).
fn kind_path(header: &str) -> Vec<String> {
    if header.is_empty() {
        Vec::new()
    } else {
        header.split('+').map(ToString::to_string).collect()
    }
}

/// Check if a character can appear in a block header.
fn is_header_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '}' | '|' | '@' | '\\')
}
