//! Tokenizer for JSON text.
//!
//! The lexer walks a bound `&str` source one scalar at a time and hands out
//! [`Token`]s on demand: a lazy, finite, forward-only sequence that always
//! terminates with [`Token::Eof`]. It owns all low-level error detection —
//! malformed literals, invalid escapes, unterminated strings — and tracks the
//! character offset of the current token start for diagnostics.
//!
//! A lexer is not restartable in place; [`Lexer::reset`] re-binds a new
//! source and clears all position state.

use crate::error::ParseError;
use crate::token::Token;
use crate::value::{Number, Value};

/// A forward-only tokenizer over a bound source.
#[derive(Debug)]
pub(crate) struct Lexer<'src> {
    src: &'src str,
    /// Byte offset of the next unread scalar.
    byte_pos: usize,
    /// Character offset of the next unread scalar.
    char_pos: usize,
    /// Character offset where the most recent token began.
    token_start: usize,
}

impl<'src> Lexer<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Self {
            src,
            byte_pos: 0,
            char_pos: 0,
            token_start: 0,
        }
    }

    /// Re-binds the lexer to a fresh source, discarding all position state.
    pub(crate) fn reset(&mut self, src: &'src str) {
        *self = Self::new(src);
    }

    /// Character offset of the start of the most recent token.
    pub(crate) fn position(&self) -> usize {
        self.token_start
    }

    fn peek(&self) -> Option<char> {
        self.src[self.byte_pos..].chars().next()
    }

    /// The unread tail of the bound source.
    pub(crate) fn remaining(&self) -> &'src str {
        &self.src[self.byte_pos..]
    }

    fn bump(&mut self, ch: char) {
        self.byte_pos += ch.len_utf8();
        self.char_pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\n' | '\r' => self.bump(ch),
                _ => break,
            }
        }
    }

    /// Scans and returns the next token.
    pub(crate) fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        self.token_start = self.char_pos;
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };
        match ch {
            '{' => {
                self.bump(ch);
                Ok(Token::LeftBrace)
            }
            '}' => {
                self.bump(ch);
                Ok(Token::RightBrace)
            }
            '[' => {
                self.bump(ch);
                Ok(Token::LeftSquare)
            }
            ']' => {
                self.bump(ch);
                Ok(Token::RightSquare)
            }
            ',' => {
                self.bump(ch);
                Ok(Token::Comma)
            }
            ':' => {
                self.bump(ch);
                Ok(Token::Colon)
            }
            '"' => self.string(),
            '-' | '0'..='9' => self.number(),
            't' => self.literal("true", Value::Boolean(true)),
            'f' => self.literal("false", Value::Boolean(false)),
            'n' => self.literal("null", Value::Null),
            other => Err(ParseError::UnexpectedCharacter {
                ch: other,
                position: self.char_pos,
            }),
        }
    }

    /// Matches one of the keywords `true`, `false`, `null` case-sensitively.
    fn literal(&mut self, word: &'static str, value: Value) -> Result<Token, ParseError> {
        for expected in word.chars() {
            match self.peek() {
                Some(ch) if ch == expected => self.bump(ch),
                Some(ch) => {
                    return Err(ParseError::UnexpectedCharacter {
                        ch,
                        position: self.char_pos,
                    });
                }
                None => {
                    // Input ended mid-keyword; point at where it began.
                    return Err(ParseError::UnexpectedCharacter {
                        ch: word.chars().next().unwrap_or_default(),
                        position: self.token_start,
                    });
                }
            }
        }
        Ok(Token::Value(value))
    }

    /// Scans a double-quoted string literal, decoding escapes.
    fn string(&mut self) -> Result<Token, ParseError> {
        self.bump('"');
        let mut buf = String::new();
        loop {
            match self.peek() {
                // Unterminated string: point at the opening quote.
                None => {
                    return Err(ParseError::UnexpectedCharacter {
                        ch: '"',
                        position: self.token_start,
                    });
                }
                Some('"') => {
                    self.bump('"');
                    return Ok(Token::Value(Value::String(buf)));
                }
                Some('\\') => {
                    self.bump('\\');
                    self.escape(&mut buf)?;
                }
                Some(ch) => {
                    self.bump(ch);
                    buf.push(ch);
                }
            }
        }
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn escape(&mut self, buf: &mut String) -> Result<(), ParseError> {
        let Some(ch) = self.peek() else {
            return Err(ParseError::UnexpectedCharacter {
                ch: '"',
                position: self.token_start,
            });
        };
        match ch {
            '"' | '\\' | '/' => buf.push(ch),
            'b' => buf.push('\u{0008}'),
            'f' => buf.push('\u{000C}'),
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'u' => {
                self.bump('u');
                return self.unicode_escape(buf);
            }
            other => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: other,
                    position: self.char_pos,
                });
            }
        }
        self.bump(ch);
        Ok(())
    }

    /// Decodes `\uXXXX`, combining surrogate pairs where both halves are
    /// present. An unpaired surrogate half decodes to U+FFFD rather than
    /// failing, matching the replacement strategy used elsewhere for
    /// undecodable input.
    fn unicode_escape(&mut self, buf: &mut String) -> Result<(), ParseError> {
        let unit = self.hex4()?;
        if (0xD800..=0xDBFF).contains(&unit) {
            if self.remaining().starts_with("\\u") {
                self.bump('\\');
                self.bump('u');
                let low = self.hex4()?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    buf.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                } else {
                    buf.push('\u{FFFD}');
                    buf.push(char::from_u32(low).unwrap_or('\u{FFFD}'));
                }
            } else {
                buf.push('\u{FFFD}');
            }
        } else {
            buf.push(char::from_u32(unit).unwrap_or('\u{FFFD}'));
        }
        Ok(())
    }

    /// Reads exactly four hex digits.
    fn hex4(&mut self) -> Result<u32, ParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let Some(ch) = self.peek() else {
                return Err(ParseError::UnexpectedCharacter {
                    ch: '"',
                    position: self.token_start,
                });
            };
            let Some(digit) = ch.to_digit(16) else {
                return Err(ParseError::UnexpectedCharacter {
                    ch,
                    position: self.char_pos,
                });
            };
            self.bump(ch);
            code = code * 16 + digit;
        }
        Ok(code)
    }

    /// Scans a numeric literal with maximal munch: a fraction or exponent is
    /// only consumed when it is complete, so `3.` lexes as `3` followed by a
    /// stray `.`.
    fn number(&mut self) -> Result<Token, ParseError> {
        let start_byte = self.byte_pos;
        if self.peek() == Some('-') {
            self.bump('-');
        }
        if self.digits() == 0 {
            return match self.peek() {
                Some(ch) => Err(ParseError::UnexpectedCharacter {
                    ch,
                    position: self.char_pos,
                }),
                None => Err(ParseError::UnexpectedCharacter {
                    ch: '-',
                    position: self.token_start,
                }),
            };
        }
        let mut is_float = false;
        if self.peek() == Some('.') && self.fraction_follows() {
            self.bump('.');
            self.digits();
            is_float = true;
        }
        if self.exponent_follows() {
            let e = self.peek().unwrap_or('e');
            self.bump(e);
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.bump(sign);
            }
            self.digits();
            is_float = true;
        }
        let text = &self.src[start_byte..self.byte_pos];
        let number = if is_float {
            text.parse::<f64>().map(Number::Float)
        } else {
            // Digits that overflow i64 still fit an f64, at reduced
            // precision.
            text.parse::<i64>()
                .map(Number::Integer)
                .or_else(|_| text.parse::<f64>().map(Number::Float))
        };
        match number {
            Ok(n) => Ok(Token::Value(Value::Number(n))),
            // The scanned text always satisfies the float grammar.
            Err(_) => Err(ParseError::UnexpectedCharacter {
                ch: text.chars().next().unwrap_or_default(),
                position: self.token_start,
            }),
        }
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.bump(ch);
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    fn fraction_follows(&self) -> bool {
        let mut it = self.remaining().chars();
        it.next() == Some('.') && matches!(it.next(), Some(c) if c.is_ascii_digit())
    }

    fn exponent_follows(&self) -> bool {
        let mut it = self.remaining().chars();
        if !matches!(it.next(), Some('e' | 'E')) {
            return false;
        }
        match it.next() {
            Some('+' | '-') => matches!(it.next(), Some(c) if c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }
}
