//! Phase 1: Tokenizer
//!
//! The tokenizer converts raw JSON text into a lazy stream of
//! classified tokens. Each token carries a span borrowed from the
//! input buffer plus the 1-based line/column where it starts, so
//! tokens are only valid for the duration of the parse call that owns
//! the buffer.
//!
//! String tokens span the raw text including both quotes; escape
//! sequences are left undecoded here and decoded by the parser.
//! Lexical failures are reported as `Error` tokens rather than by
//! printing anything: the parser turns them into structured errors.

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Raw string span, quotes included, escapes undecoded.
    String,
    /// Numeric text matching `-? digit+ (. digit+)? ([eE] [+-]? digit+)?`.
    Number,
    True,
    False,
    Null,
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    Colon,
    Comma,
    /// Unscannable input, classified so the parser can report it.
    Error(LexCondition),
    EndOfInput,
}

/// What went wrong when an `Error` token was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexCondition {
    /// A string's closing quote was never found.
    UnterminatedString,
    /// A keyword literal (`true`/`false`/`null`) was misspelled.
    MalformedKeyword,
    /// A number was missing a required digit.
    MalformedNumber,
    /// A character that cannot begin any token.
    UnexpectedCharacter,
}

/// A single token with its source span and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    /// The token's exact text, borrowed from the input buffer.
    pub text: &'a str,
    /// 1-based line of the token's first character.
    pub line: usize,
    /// 1-based column of the token's first character.
    pub column: usize,
}

/// Single-pass cursor over the input text.
pub(crate) struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    lenient_keywords: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(text: &'a str, lenient_keywords: bool) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            column: 1,
            lenient_keywords,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consume one byte, maintaining the line/column counters.
    /// UTF-8 continuation bytes do not advance the column, so a
    /// multi-byte character counts as one column.
    fn bump(&mut self) {
        let b = self.text.as_bytes()[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if b & 0xC0 != 0x80 {
            self.column += 1;
        }
    }

    fn make(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.text[start..self.pos],
            line,
            column,
        }
    }

    /// Consume one whole character, continuation bytes included, so
    /// the cursor always lands on a char boundary.
    fn bump_char(&mut self) {
        self.bump();
        while matches!(self.peek(), Some(b) if b & 0xC0 == 0x80) {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.bump();
        }
    }

    /// Scan the next token, advancing past it and any preceding
    /// whitespace. At end of input this returns `EndOfInput` forever.
    pub(crate) fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let start = self.pos;
        let (line, column) = (self.line, self.column);

        let Some(b) = self.peek() else {
            return self.make(TokenKind::EndOfInput, start, line, column);
        };

        match b {
            b'{' => self.single(TokenKind::ObjectStart, start, line, column),
            b'}' => self.single(TokenKind::ObjectEnd, start, line, column),
            b'[' => self.single(TokenKind::ArrayStart, start, line, column),
            b']' => self.single(TokenKind::ArrayEnd, start, line, column),
            b':' => self.single(TokenKind::Colon, start, line, column),
            b',' => self.single(TokenKind::Comma, start, line, column),
            b'"' => self.scan_string(start, line, column),
            b'-' | b'0'..=b'9' => self.scan_number(start, line, column),
            b't' => self.scan_keyword("true", TokenKind::True, start, line, column),
            b'f' => self.scan_keyword("false", TokenKind::False, start, line, column),
            b'n' => self.scan_keyword("null", TokenKind::Null, start, line, column),
            b'T' if self.lenient_keywords => {
                self.scan_keyword("TRUE", TokenKind::True, start, line, column)
            }
            b'F' if self.lenient_keywords => {
                self.scan_keyword("FALSE", TokenKind::False, start, line, column)
            }
            b'N' if self.lenient_keywords => {
                self.scan_keyword("NULL", TokenKind::Null, start, line, column)
            }
            _ => {
                // Advance one character so the caller can resynchronize.
                self.bump_char();
                self.make(
                    TokenKind::Error(LexCondition::UnexpectedCharacter),
                    start,
                    line,
                    column,
                )
            }
        }
    }

    fn single(&mut self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token<'a> {
        self.bump();
        self.make(kind, start, line, column)
    }

    /// Scan a string span. A backslash escapes the next character,
    /// which stays raw in the span; decoding happens in the parser.
    /// A missing closing quote yields an `Error` token spanning what
    /// was scanned.
    ///
    /// Unescaped control characters are accepted here even though
    /// RFC 8259 forbids them inside string literals.
    fn scan_string(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        self.bump(); // opening quote
        loop {
            match self.peek() {
                None => {
                    return self.make(
                        TokenKind::Error(LexCondition::UnterminatedString),
                        start,
                        line,
                        column,
                    );
                }
                Some(b'"') => {
                    self.bump();
                    return self.make(TokenKind::String, start, line, column);
                }
                Some(b'\\') => {
                    self.bump();
                    if self.peek().is_some() {
                        self.bump();
                    }
                }
                Some(_) => self.bump(),
            }
        }
    }

    /// Scan a keyword literal, matching the spelling exactly. Any
    /// mismatch yields an `Error` token of one character at the
    /// mismatch point; a malformed prefix is never accepted.
    fn scan_keyword(
        &mut self,
        spelling: &str,
        kind: TokenKind,
        start: usize,
        line: usize,
        column: usize,
    ) -> Token<'a> {
        for expected in spelling.bytes() {
            if self.peek() != Some(expected) {
                return self.error_here(LexCondition::MalformedKeyword);
            }
            self.bump();
        }
        self.make(kind, start, line, column)
    }

    /// Scan a number per `-? digit+ (. digit+)? ([eE] [+-]? digit+)?`.
    /// Every digit position requires at least one digit: a lone `-`,
    /// a trailing `.`, or a bare exponent is a lexical error located
    /// at the point where the digit is missing.
    fn scan_number(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        if self.peek() == Some(b'-') {
            self.bump();
        }
        if !self.digits() {
            return self.error_here(LexCondition::MalformedNumber);
        }
        if self.peek() == Some(b'.') {
            self.bump();
            if !self.digits() {
                return self.error_here(LexCondition::MalformedNumber);
            }
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            if !self.digits() {
                return self.error_here(LexCondition::MalformedNumber);
            }
        }
        self.make(TokenKind::Number, start, line, column)
    }

    /// Consume a run of ASCII digits, reporting whether any were seen.
    fn digits(&mut self) -> bool {
        let mut seen = false;
        while let Some(b'0'..=b'9') = self.peek() {
            self.bump();
            seen = true;
        }
        seen
    }

    /// An `Error` token of at most one character at the current
    /// position (empty at end of input).
    fn error_here(&mut self, condition: LexCondition) -> Token<'a> {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        if self.peek().is_some() {
            self.bump_char();
        }
        self.make(TokenKind::Error(condition), start, line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token<'_>> {
        let mut tokenizer = Tokenizer::new(input, false);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(
            kinds("{}[]:,"),
            vec![
                TokenKind::ObjectStart,
                TokenKind::ObjectEnd,
                TokenKind::ArrayStart,
                TokenKind::ArrayEnd,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true false null"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_uppercase_keywords_rejected_by_default() {
        let mut tokenizer = Tokenizer::new("TRUE", false);
        let token = tokenizer.next_token();
        assert_eq!(
            token.kind,
            TokenKind::Error(LexCondition::UnexpectedCharacter)
        );
    }

    #[test]
    fn test_uppercase_keywords_in_lenient_mode() {
        let mut tokenizer = Tokenizer::new("TRUE FALSE NULL", true);
        assert_eq!(tokenizer.next_token().kind, TokenKind::True);
        assert_eq!(tokenizer.next_token().kind, TokenKind::False);
        assert_eq!(tokenizer.next_token().kind, TokenKind::Null);
        // Mixed case stays malformed even in lenient mode.
        let mut tokenizer = Tokenizer::new("True", true);
        assert_eq!(
            tokenizer.next_token().kind,
            TokenKind::Error(LexCondition::MalformedKeyword)
        );
    }

    #[test]
    fn test_misspelled_keyword_positions() {
        // Mismatch inside "true" at the third character.
        let mut tokenizer = Tokenizer::new("troo", false);
        let token = tokenizer.next_token();
        assert_eq!(
            token.kind,
            TokenKind::Error(LexCondition::MalformedKeyword)
        );
        assert_eq!((token.line, token.column), (1, 3));
        assert_eq!(token.text, "o");
    }

    #[test]
    fn test_string_span_is_raw_and_includes_quotes() {
        let tokens = tokenize(r#" "a\"b" "#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#""a\"b""#);
        assert_eq!((tokens[0].line, tokens[0].column), (1, 2));
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize(r#""abc"#);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Error(LexCondition::UnterminatedString)
        );
        assert_eq!(tokens[0].text, r#""abc"#);
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    }

    #[test]
    fn test_number_spans() {
        let tokens = tokenize("0 -12 3.25 6e4 -1.5e-3 10E+2");
        let texts: Vec<&str> = tokens[..6].iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["0", "-12", "3.25", "6e4", "-1.5e-3", "10E+2"]);
        assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_number_span_is_exactly_bounded() {
        let mut tokenizer = Tokenizer::new("12,", false);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.text, "12");
        assert_eq!(tokenizer.next_token().kind, TokenKind::Comma);
    }

    #[test]
    fn test_lone_minus() {
        let mut tokenizer = Tokenizer::new("-", false);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Error(LexCondition::MalformedNumber));
        assert_eq!((token.line, token.column), (1, 2));
        assert!(token.text.is_empty());
    }

    #[test]
    fn test_trailing_fraction_dot() {
        let mut tokenizer = Tokenizer::new("1. ", false);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Error(LexCondition::MalformedNumber));
        assert_eq!((token.line, token.column), (1, 3));
    }

    #[test]
    fn test_bare_exponent() {
        let mut tokenizer = Tokenizer::new("1e", false);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Error(LexCondition::MalformedNumber));
        assert_eq!((token.line, token.column), (1, 3));

        let mut tokenizer = Tokenizer::new("2E+x", false);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Error(LexCondition::MalformedNumber));
        assert_eq!((token.line, token.column), (1, 4));
        assert_eq!(token.text, "x");
    }

    #[test]
    fn test_multibyte_after_keyword_prefix() {
        // The error token must swallow the whole character, not one
        // byte of it.
        let mut tokenizer = Tokenizer::new("trué", false);
        let token = tokenizer.next_token();
        assert_eq!(
            token.kind,
            TokenKind::Error(LexCondition::MalformedKeyword)
        );
        assert_eq!((token.line, token.column), (1, 4));
        assert_eq!(token.text, "é");
        assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_multibyte_after_number_fraction_dot() {
        let mut tokenizer = Tokenizer::new("1.é", false);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Error(LexCondition::MalformedNumber));
        assert_eq!((token.line, token.column), (1, 3));
        assert_eq!(token.text, "é");
        assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = tokenize("{\n  \"key\": 1\n}");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1)); // {
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3)); // "key"
        assert_eq!((tokens[2].line, tokens[2].column), (2, 8)); // :
        assert_eq!((tokens[3].line, tokens[3].column), (2, 10)); // 1
        assert_eq!((tokens[4].line, tokens[4].column), (3, 1)); // }
    }

    #[test]
    fn test_multibyte_characters_count_one_column() {
        let tokens = tokenize("[\"é\", 1]");
        // The number starts after `["é", `, seven columns in.
        assert_eq!((tokens[3].line, tokens[3].column), (1, 7));
        assert_eq!(tokens[1].text, "\"é\"");
    }

    #[test]
    fn test_unexpected_character() {
        let mut tokenizer = Tokenizer::new("?", false);
        let token = tokenizer.next_token();
        assert_eq!(
            token.kind,
            TokenKind::Error(LexCondition::UnexpectedCharacter)
        );
        assert_eq!(token.text, "?");
        // The cursor advanced past it.
        assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_end_of_input_is_stable() {
        let mut tokenizer = Tokenizer::new("null  \n ", false);
        assert_eq!(tokenizer.next_token().kind, TokenKind::Null);
        for _ in 0..10 {
            assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfInput);
        }
    }
}
