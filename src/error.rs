//! Parse failure reporting.

use thiserror::Error;

use crate::token::Token;

/// Explains why and where a parse failed.
///
/// Every failure carries the zero-based character offset into the source that
/// was bound when the error occurred. There are exactly three kinds:
/// malformed lexical input, a structurally invalid token sequence, and a
/// wrapped lower-level I/O fault (only reachable through the reader-based
/// entry points).
///
/// # Examples
///
/// ```
/// use jsonsax::{parse, ParseError};
///
/// let err = parse("{\"a\":}").unwrap_err();
/// assert!(matches!(err, ParseError::UnexpectedToken { position: 5, .. }));
/// assert_eq!(err.to_string(), "Unexpected token RIGHT BRACE(}) at position 5.");
/// ```
#[derive(Debug, Error)]
pub enum ParseError {
    /// The lexer hit a character that cannot start or continue any token.
    #[error("Unexpected character ({ch}) at position {position}.")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Character offset of the offending character.
        position: usize,
    },

    /// A well-formed token arrived where the grammar does not allow it.
    #[error("Unexpected token {token} at position {position}.")]
    UnexpectedToken {
        /// The offending token.
        token: Token,
        /// Character offset of the start of the offending token.
        position: usize,
    },

    /// A lower-level I/O fault while draining a reader into memory.
    #[error("Unexpected exception at position {position}: {source}")]
    Io {
        /// Character offset reached before the fault, zero if none was read.
        position: usize,
        /// The underlying fault.
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// The character offset the error was raised at.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::Io { position, .. } => *position,
        }
    }
}
