//! Error types for JSON parsing.

use std::io;
use thiserror::Error;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// The broad category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The scanner hit text it could not classify as a token:
    /// an unrecognized character, an unterminated string, a malformed
    /// number or keyword, or a bad escape sequence.
    Lexical,
    /// A well-formed token appeared where the grammar forbids it.
    Syntax,
    /// A configured bound (nesting depth) was exceeded.
    LimitExceeded,
    /// The file-loading wrapper failed to read its input.
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::LimitExceeded => write!(f, "limit exceeded"),
            ErrorKind::Io => write!(f, "io error"),
        }
    }
}

/// A structured parse failure.
///
/// `line` and `column` are 1-based and locate the offending input.
/// Io errors carry no input location; their `line`/`column` are 0.
/// The library never prints diagnostics; presentation belongs to the
/// caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.render())]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    /// A scanning-stage failure at the given position.
    pub(crate) fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            line,
            column,
            message: message.into(),
        }
    }

    /// A grammar-stage failure at the given position.
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            line,
            column,
            message: message.into(),
        }
    }

    /// A configured-bound failure at the given position.
    pub(crate) fn limit(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::LimitExceeded,
            line,
            column,
            message: message.into(),
        }
    }

    /// A read failure from the file-loading wrapper.
    pub(crate) fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        match self.kind {
            ErrorKind::Io => format!("{}: {}", self.kind, self.message),
            _ => format!(
                "{} at line {}, column {}: {}",
                self.kind, self.line, self.column, self.message
            ),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let err = ParseError::syntax(3, 14, "expected ':' after object key");
        assert_eq!(
            err.to_string(),
            "syntax error at line 3, column 14: expected ':' after object key"
        );
    }

    #[test]
    fn test_display_io_without_location() {
        let err = ParseError::io("no such file");
        assert_eq!(err.to_string(), "io error: no such file");
    }

    #[test]
    fn test_kind_is_preserved() {
        let err = ParseError::limit(1, 1, "nesting depth exceeds the configured limit of 512");
        assert_eq!(err.kind, ErrorKind::LimitExceeded);
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 1);
    }
}
