//! Lexical tokens produced by the lexer.

use core::fmt;

use crate::value::Value;

/// One lexical unit of JSON text.
///
/// A payload is carried if and only if the token is [`Value`], and the lexer
/// only ever produces scalar payloads (string, number, boolean or null),
/// never containers.
///
/// [`Value`]: Token::Value
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A decoded primitive value.
    Value(Value),
    /// `{` — an object begins.
    LeftBrace,
    /// `}` — an object ends.
    RightBrace,
    /// `[` — an array begins.
    LeftSquare,
    /// `]` — an array ends.
    RightSquare,
    /// `,` — the next element or entry follows.
    Comma,
    /// `:` — a key ends and its value follows.
    Colon,
    /// End of input.
    Eof,
}

impl Token {
    /// Returns `true` if the token is [`Eof`].
    ///
    /// [`Eof`]: Token::Eof
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Strings render unquoted here; this text only feeds diagnostics.
            Self::Value(Value::String(s)) => write!(f, "VALUE({s})"),
            Self::Value(v) => write!(f, "VALUE({v})"),
            Self::LeftBrace => f.write_str("LEFT BRACE({)"),
            Self::RightBrace => f.write_str("RIGHT BRACE(})"),
            Self::LeftSquare => f.write_str("LEFT SQUARE([)"),
            Self::RightSquare => f.write_str("RIGHT SQUARE(])"),
            Self::Comma => f.write_str("COMMA(,)"),
            Self::Colon => f.write_str("COLON(:)"),
            Self::Eof => f.write_str("END OF FILE"),
        }
    }
}
