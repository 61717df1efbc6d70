//! JSON parser and serializer.
//!
//! Parses RFC 8259 JSON text into a [`Value`] tree and serializes the
//! tree back to pretty-printed text. Objects preserve insertion order
//! and duplicate keys; numbers are 64-bit floats. One known leniency:
//! unescaped control characters inside string literals are accepted
//! rather than rejected.
//!
//! # Parsing Pipeline
//!
//! The parser operates in two phases:
//!
//! 1. **Tokenizer**: Scans source text into tokens carrying their kind,
//!    exact source span, and 1-based line/column position. String
//!    tokens span the raw text including quotes; escape sequences stay
//!    undecoded at this stage.
//!
//! 2. **Parser**: Recursively consumes the token stream into [`Value`]
//!    trees, decoding string escapes, converting numbers, and
//!    enforcing the configured nesting-depth limit.
//!
//! Errors come back as structured [`ParseError`] values with a
//! category, position and message; the library itself never prints.

mod error;
mod options;
mod parser;
mod serializer;
mod tokenizer;
mod value;

use std::fs;
use std::path::Path;

pub use error::{ErrorKind, ParseError, Result};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use serializer::serialize;
pub use value::Value;

/// Parse a JSON document from a string with strict defaults.
///
/// # Example
///
/// ```
/// use libjson::parse;
///
/// let value = parse("{\"answer\": 42}").unwrap();
/// assert_eq!(value.find("answer").and_then(|v| v.as_f64()), Some(42.0));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parser::parse_document(input, ParseOptions::strict())
}

/// Parse a JSON document from a string with explicit options.
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Value> {
    parser::parse_document(input, options)
}

/// Read `path` and parse its contents with strict defaults.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    parse_file_with_options(path, ParseOptions::strict())
}

/// Read `path` and parse its contents with explicit options.
///
/// Read failures surface as [`ErrorKind::Io`] errors naming the path.
pub fn parse_file_with_options(path: impl AsRef<Path>, options: ParseOptions) -> Result<Value> {
    let path = path.as_ref();
    let input = fs::read_to_string(path)
        .map_err(|err| ParseError::io(format!("{}: {}", path.display(), err)))?;
    parser::parse_document(&input, options)
}
