//! Inflection pattern scanner and parser.
//!
//! Scanning splits a raw translation string into literal text and pattern
//! blocks (`@kind{alt|alt}`); parsing turns each block body into structured
//! alternatives. Neither step fails: malformed pieces are carried in the AST
//! and judged at resolution time, where the caller's options decide whether
//! they raise.

pub mod ast;
mod pattern;
mod scanner;

pub use ast::*;
pub use pattern::{parse_body, parse_spec, parse_text};
pub use scanner::scan;
