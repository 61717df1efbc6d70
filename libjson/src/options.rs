//! Parsing options and limits.

/// Default cap on container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options threaded through a parse call.
///
/// The defaults follow RFC 8259 (except that the scanner accepts
/// unescaped control characters in strings); the two leniencies
/// observed in informal JSON are opt-in flags rather than baked-in
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of arrays/objects. Recursion mirrors
    /// input nesting, so this bounds both stack use and the cost of
    /// adversarial inputs like a megabyte of `[`.
    pub max_depth: usize,
    /// Accept the uppercase keyword spellings `TRUE`, `FALSE` and
    /// `NULL` in addition to the standard lowercase ones.
    pub lenient_keywords: bool,
    /// Accept (and ignore) non-whitespace content after the top-level
    /// value instead of failing with "trailing data".
    pub allow_trailing: bool,
}

impl ParseOptions {
    /// Strict RFC 8259 parsing with the default depth limit.
    pub const fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            lenient_keywords: false,
            allow_trailing: false,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let options = ParseOptions::default();
        assert_eq!(options.max_depth, 512);
        assert!(!options.lenient_keywords);
        assert!(!options.allow_trailing);
    }
}
