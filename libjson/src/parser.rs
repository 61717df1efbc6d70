//! Phase 2: Parser
//!
//! Recursive-descent consumer of the token stream. Each grammar rule
//! is one method; containers recurse through `parse_value`, and a
//! depth counter threaded through every container entry enforces the
//! configured nesting limit so adversarial input cannot exhaust the
//! call stack.
//!
//! Partial state on failure paths is released by scope exit: a key or
//! subtree that has not yet been attached to its container is dropped
//! by the returning scope, and once attached it is owned (and later
//! dropped) by the container. No failure path prints anything; all
//! diagnostics travel back as [`ParseError`] values.

use crate::error::{ParseError, Result};
use crate::options::ParseOptions;
use crate::tokenizer::{LexCondition, Token, TokenKind, Tokenizer};
use crate::value::Value;

/// Parse exactly one JSON value from `input`, then require end of
/// input unless `allow_trailing` is set.
pub(crate) fn parse_document(input: &str, options: ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(input, options);
    let value = parser.parse_value()?;
    if !options.allow_trailing {
        let token = parser.next();
        match token.kind {
            TokenKind::EndOfInput => {}
            TokenKind::Error(condition) => return Err(lexical_error(condition, &token)),
            _ => {
                return Err(ParseError::syntax(
                    token.line,
                    token.column,
                    "trailing data after the top-level value",
                ));
            }
        }
    }
    Ok(value)
}

struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(input, options.lenient_keywords),
            options,
            depth: 0,
        }
    }

    fn next(&mut self) -> Token<'a> {
        self.tokenizer.next_token()
    }

    /// Count one level of container nesting, failing at the opening
    /// token when the configured limit is exceeded.
    fn enter(&mut self, open: &Token) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::limit(
                open.line,
                open.column,
                format!(
                    "nesting depth exceeds the configured limit of {}",
                    self.options.max_depth
                ),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value> {
        let token = self.next();
        self.dispatch(token)
    }

    /// Build a value from an already-fetched token.
    fn dispatch(&mut self, token: Token<'a>) -> Result<Value> {
        match token.kind {
            TokenKind::String => Ok(Value::String(decode_string(&token)?)),
            TokenKind::Number => {
                // The tokenizer validated the grammar over the exact
                // span, so conversion cannot fail in practice.
                let number = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::lexical(token.line, token.column, "malformed number"))?;
                Ok(Value::Number(number))
            }
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::ObjectStart => self.parse_object(&token),
            TokenKind::ArrayStart => self.parse_array(&token),
            TokenKind::Error(condition) => Err(lexical_error(condition, &token)),
            other => Err(ParseError::syntax(
                token.line,
                token.column,
                format!("expected a value, found {}", describe(other)),
            )),
        }
    }

    /// Parse the pairs of an object whose `{` has been consumed.
    fn parse_object(&mut self, open: &Token) -> Result<Value> {
        self.enter(open)?;
        let mut pairs: Vec<(String, Value)> = Vec::new();

        let mut token = self.next();
        if token.kind == TokenKind::ObjectEnd {
            self.leave();
            return Ok(Value::Object(pairs));
        }

        loop {
            let key = match token.kind {
                TokenKind::String => decode_string(&token)?,
                TokenKind::Error(condition) => return Err(lexical_error(condition, &token)),
                other => {
                    return Err(ParseError::syntax(
                        token.line,
                        token.column,
                        format!("expected object key, found {}", describe(other)),
                    ));
                }
            };

            let colon = self.next();
            match colon.kind {
                TokenKind::Colon => {}
                TokenKind::Error(condition) => return Err(lexical_error(condition, &colon)),
                other => {
                    return Err(ParseError::syntax(
                        colon.line,
                        colon.column,
                        format!("expected ':' after object key, found {}", describe(other)),
                    ));
                }
            }

            let value = self.parse_value()?;
            // Duplicate keys are permitted and preserved; lookup takes
            // the first match in insertion order.
            pairs.push((key, value));

            let separator = self.next();
            match separator.kind {
                TokenKind::ObjectEnd => {
                    self.leave();
                    return Ok(Value::Object(pairs));
                }
                TokenKind::Comma => token = self.next(),
                TokenKind::Error(condition) => return Err(lexical_error(condition, &separator)),
                other => {
                    return Err(ParseError::syntax(
                        separator.line,
                        separator.column,
                        format!("expected ',' or '}}' in object, found {}", describe(other)),
                    ));
                }
            }
        }
    }

    /// Parse the elements of an array whose `[` has been consumed.
    fn parse_array(&mut self, open: &Token) -> Result<Value> {
        self.enter(open)?;
        let mut items: Vec<Value> = Vec::new();

        let mut token = self.next();
        if token.kind == TokenKind::ArrayEnd {
            self.leave();
            return Ok(Value::Array(items));
        }

        loop {
            let value = self.dispatch(token)?;
            items.push(value);

            let separator = self.next();
            match separator.kind {
                TokenKind::ArrayEnd => {
                    self.leave();
                    return Ok(Value::Array(items));
                }
                TokenKind::Comma => token = self.next(),
                TokenKind::Error(condition) => return Err(lexical_error(condition, &separator)),
                other => {
                    return Err(ParseError::syntax(
                        separator.line,
                        separator.column,
                        format!("expected ',' or ']' in array, found {}", describe(other)),
                    ));
                }
            }
        }
    }
}

/// Turn an `Error` token into the structured lexical failure it
/// classifies.
fn lexical_error(condition: LexCondition, token: &Token) -> ParseError {
    let message = match condition {
        LexCondition::UnterminatedString => "unterminated string".to_string(),
        LexCondition::MalformedKeyword => "malformed keyword literal".to_string(),
        LexCondition::MalformedNumber => "malformed number".to_string(),
        LexCondition::UnexpectedCharacter => {
            format!("unexpected character '{}'", token.text)
        }
    };
    ParseError::lexical(token.line, token.column, message)
}

/// Human spelling of a token kind for syntax errors.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::String => "a string",
        TokenKind::Number => "a number",
        TokenKind::True => "'true'",
        TokenKind::False => "'false'",
        TokenKind::Null => "'null'",
        TokenKind::ObjectStart => "'{'",
        TokenKind::ObjectEnd => "'}'",
        TokenKind::ArrayStart => "'['",
        TokenKind::ArrayEnd => "']'",
        TokenKind::Colon => "':'",
        TokenKind::Comma => "','",
        TokenKind::Error(_) => "unscannable input",
        TokenKind::EndOfInput => "end of input",
    }
}

/// Decode a raw string token into owned text: strip the surrounding
/// quotes and decode backslash escapes, including `\uXXXX` with
/// surrogate pairs combined into one code point. A raw copy would
/// corrupt any string containing an escape, so this always decodes.
fn decode_string(token: &Token) -> Result<String> {
    let inner = &token.text[1..token.text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    // Position of the next character, for locating bad escapes.
    let mut line = token.line;
    let mut column = token.column + 1;

    while let Some(c) = chars.next() {
        if c != '\\' {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            out.push(c);
            continue;
        }

        let (escape_line, escape_column) = (line, column);
        // The tokenizer guarantees a character after every backslash
        // inside a terminated string.
        let Some(escape) = chars.next() else {
            return Err(ParseError::lexical(
                escape_line,
                escape_column,
                "invalid escape sequence at end of string",
            ));
        };
        column += 2;

        match escape {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let unit = read_hex4(&mut chars, escape_line, escape_column)?;
                column += 4;
                let decoded = if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: a low surrogate escape must follow.
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(unpaired_surrogate(escape_line, escape_column));
                    }
                    column += 2;
                    let low = read_hex4(&mut chars, escape_line, escape_column)?;
                    column += 4;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(unpaired_surrogate(escape_line, escape_column));
                    }
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(combined)
                        .ok_or_else(|| unpaired_surrogate(escape_line, escape_column))?
                } else if (0xDC00..=0xDFFF).contains(&unit) {
                    return Err(unpaired_surrogate(escape_line, escape_column));
                } else {
                    char::from_u32(unit).ok_or_else(|| {
                        ParseError::lexical(escape_line, escape_column, "invalid unicode escape")
                    })?
                };
                out.push(decoded);
            }
            other => {
                return Err(ParseError::lexical(
                    escape_line,
                    escape_column,
                    format!("invalid escape sequence '\\{}'", other),
                ));
            }
        }
    }

    Ok(out)
}

/// Read the four hex digits of a `\uXXXX` escape.
fn read_hex4(chars: &mut std::str::Chars<'_>, line: usize, column: usize) -> Result<u32> {
    let mut value: u32 = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| ParseError::lexical(line, column, "invalid unicode escape"))?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

fn unpaired_surrogate(line: usize, column: usize) -> ParseError {
    ParseError::lexical(line, column, "unpaired surrogate in unicode escape")
}
