//! Streaming, resumable JSON parsing.
//!
//! [`StreamParser`] drives a [`ContentHandler`] with SAX-like events instead
//! of building a tree. It is an explicit session object: the preserved
//! status stack lives on the parser between calls, so a paused parse can be
//! resumed later — with more of the same document — exactly where it
//! stopped. One session serves one document at a time; it is not meant to be
//! shared across threads without external serialization.

use std::io::Read;

use crate::error::ParseError;
use crate::handler::ContentHandler;
use crate::lexer::Lexer;
use crate::parser::{peek_status, State};
use crate::token::Token;
use crate::value::Value;

/// A stoppable, resumable streaming JSON parser session.
///
/// The same pushdown state machine as the tree mode, but with no value
/// stack: primitives go straight to the handler, and two extra states track
/// the end of object entries (`PairValue`) and overall completion (`End`).
///
/// # Examples
///
/// Pause after every array element; each resume picks up exactly where the
/// previous call stopped, replaying whatever it had not yet consumed:
///
/// ```
/// use jsonsax::{ContentHandler, ParseError, StreamParser, Value};
///
/// #[derive(Default)]
/// struct TakeOne {
///     seen: Vec<Value>,
/// }
///
/// impl ContentHandler for TakeOne {
///     fn primitive(&mut self, value: Value) -> Result<bool, ParseError> {
///         self.seen.push(value);
///         Ok(false) // pause after every primitive
///     }
/// }
///
/// let mut handler = TakeOne::default();
/// let mut parser = StreamParser::new();
/// parser.parse("[10, 20]", &mut handler).unwrap();
/// parser.resume("", &mut handler).unwrap();
/// parser.resume("", &mut handler).unwrap();
/// assert_eq!(handler.seen, vec![Value::from(10), Value::from(20)]);
/// ```
#[derive(Debug)]
pub struct StreamParser {
    status: State,
    status_stack: Vec<State>,
    /// Whether a document is in progress, i.e. whether there is state worth
    /// resuming.
    started: bool,
    /// Last token consumed, kept for error reporting from the trap state.
    token: Token,
    /// Character offset of the last token, relative to the source bound by
    /// the current call (carried-over tail included).
    position: usize,
    /// Unconsumed tail of the source bound by the last paused call, replayed
    /// ahead of the text passed to the next resume.
    pending: String,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamParser {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: State::Init,
            status_stack: Vec::new(),
            started: false,
            token: Token::Eof,
            position: 0,
            pending: String::new(),
        }
    }

    /// Discards any in-progress document state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Character offset of the start of the most recent token, relative to
    /// the source bound by the current call (any replayed tail from a paused
    /// call comes first).
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Parses `text` as a fresh document, discarding any preserved session
    /// state, and drives `handler` with events.
    ///
    /// Returns `Ok(())` both on a completed document and when the handler
    /// paused the parse by returning `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Lexical and structural faults surface as [`ParseError`]; a handler
    /// error propagates unchanged. Any error poisons the session: further
    /// [`resume`] calls fail with an unexpected-token error until [`reset`]
    /// or a fresh [`parse`].
    ///
    /// [`parse`]: StreamParser::parse
    /// [`resume`]: StreamParser::resume
    /// [`reset`]: StreamParser::reset
    pub fn parse<H: ContentHandler>(
        &mut self,
        text: &str,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        self.reset();
        self.started = true;
        self.run(text, handler)
    }

    /// Continues a paused session with `text`, the next portion of the same
    /// document.
    ///
    /// Any input the paused call had not yet consumed is replayed before
    /// `text`, so a pause mid-chunk loses nothing; resuming with `""` simply
    /// continues through the carried tail.
    ///
    /// With no session in progress this silently behaves like a fresh
    /// [`parse`]. `start_json` is never re-fired on a resumed call.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`parse`].
    ///
    /// [`parse`]: StreamParser::parse
    pub fn resume<H: ContentHandler>(
        &mut self,
        text: &str,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        if !self.started {
            return self.parse(text, handler);
        }
        self.run(text, handler)
    }

    /// Drains `reader` and parses its contents as a fresh document.
    ///
    /// # Errors
    ///
    /// An I/O fault while draining surfaces as [`ParseError::Io`]; parsing
    /// then fails the same ways as [`parse`].
    ///
    /// [`parse`]: StreamParser::parse
    pub fn parse_reader<R: Read, H: ContentHandler>(
        &mut self,
        reader: R,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        let text = drain(reader)?;
        self.parse(&text, handler)
    }

    /// Drains `reader` and continues a paused session with its contents.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`parse_reader`].
    ///
    /// [`parse_reader`]: StreamParser::parse_reader
    pub fn resume_reader<R: Read, H: ContentHandler>(
        &mut self,
        reader: R,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        let text = drain(reader)?;
        self.resume(&text, handler)
    }

    fn run<H: ContentHandler>(&mut self, text: &str, handler: &mut H) -> Result<(), ParseError> {
        // A pause can land anywhere in the bound text, so the unread tail of
        // the paused call is replayed ahead of the new text.
        let carried;
        let mut lexer = Lexer::new(text);
        if !self.pending.is_empty() {
            let mut replay = core::mem::take(&mut self.pending);
            replay.push_str(text);
            carried = replay;
            lexer.reset(&carried);
        }
        let result = self.drive(&mut lexer, handler);
        match result {
            // Any fault ends this document for good; resuming now also
            // fails.
            Err(_) => self.status = State::Error,
            Ok(()) if self.status == State::End => self.pending.clear(),
            Ok(()) => self.pending = lexer.remaining().to_string(),
        }
        result
    }

    fn advance(&mut self, lexer: &mut Lexer<'_>) -> Result<Token, ParseError> {
        let token = lexer.next_token()?;
        self.position = lexer.position();
        self.token = token.clone();
        Ok(token)
    }

    fn push_status(&mut self, status: State) {
        self.status = status;
        self.status_stack.push(status);
    }

    fn trap(&self) -> ParseError {
        ParseError::UnexpectedToken {
            token: self.token.clone(),
            position: self.position,
        }
    }

    #[allow(clippy::too_many_lines)]
    fn drive<H: ContentHandler>(
        &mut self,
        lexer: &mut Lexer<'_>,
        handler: &mut H,
    ) -> Result<(), ParseError> {
        loop {
            match self.status {
                State::Init => {
                    handler.start_json()?;
                    match self.advance(lexer)? {
                        Token::Value(v) => {
                            self.push_status(State::FinishedValue);
                            if !handler.primitive(v)? {
                                return Ok(());
                            }
                        }
                        Token::LeftBrace => {
                            self.push_status(State::InObject);
                            if !handler.start_object()? {
                                return Ok(());
                            }
                        }
                        Token::LeftSquare => {
                            self.push_status(State::InArray);
                            if !handler.start_array()? {
                                return Ok(());
                            }
                        }
                        _ => self.status = State::Error,
                    }
                }

                State::FinishedValue => {
                    let token = self.advance(lexer)?;
                    if token.is_eof() {
                        handler.end_json()?;
                        self.status = State::End;
                        return Ok(());
                    }
                    self.status = State::Error;
                    return Err(ParseError::UnexpectedToken {
                        token,
                        position: self.position,
                    });
                }

                State::InObject => match self.advance(lexer)? {
                    Token::Comma => {}
                    Token::Value(Value::String(key)) => {
                        self.push_status(State::PassedPairKey);
                        if !handler.start_object_entry(key)? {
                            return Ok(());
                        }
                    }
                    Token::RightBrace => {
                        if self.status_stack.len() > 1 {
                            self.status_stack.pop();
                            self.status = peek_status(&self.status_stack);
                        } else {
                            self.status = State::FinishedValue;
                        }
                        if !handler.end_object()? {
                            return Ok(());
                        }
                    }
                    _ => self.status = State::Error,
                },

                State::PassedPairKey => match self.advance(lexer)? {
                    Token::Colon => {}
                    Token::Value(v) => {
                        self.status_stack.pop();
                        self.status = peek_status(&self.status_stack);
                        if !handler.primitive(v)? {
                            return Ok(());
                        }
                        if !handler.end_object_entry()? {
                            return Ok(());
                        }
                    }
                    Token::LeftBrace => {
                        self.status_stack.pop();
                        self.status_stack.push(State::PairValue);
                        self.push_status(State::InObject);
                        if !handler.start_object()? {
                            return Ok(());
                        }
                    }
                    Token::LeftSquare => {
                        self.status_stack.pop();
                        self.status_stack.push(State::PairValue);
                        self.push_status(State::InArray);
                        if !handler.start_array()? {
                            return Ok(());
                        }
                    }
                    _ => self.status = State::Error,
                },

                // A marker only: fire the end-of-entry callback for a nested
                // container that closed as an entry value. No token is
                // consumed here.
                State::PairValue => {
                    self.status_stack.pop();
                    self.status = peek_status(&self.status_stack);
                    if !handler.end_object_entry()? {
                        return Ok(());
                    }
                }

                State::InArray => match self.advance(lexer)? {
                    Token::Comma => {}
                    Token::Value(v) => {
                        if !handler.primitive(v)? {
                            return Ok(());
                        }
                    }
                    Token::RightSquare => {
                        if self.status_stack.len() > 1 {
                            self.status_stack.pop();
                            self.status = peek_status(&self.status_stack);
                        } else {
                            self.status = State::FinishedValue;
                        }
                        if !handler.end_array()? {
                            return Ok(());
                        }
                    }
                    Token::LeftBrace => {
                        self.push_status(State::InObject);
                        if !handler.start_object()? {
                            return Ok(());
                        }
                    }
                    Token::LeftSquare => {
                        self.push_status(State::InArray);
                        if !handler.start_array()? {
                            return Ok(());
                        }
                    }
                    _ => self.status = State::Error,
                },

                // Completed documents stay completed; calling again does
                // nothing further.
                State::End => return Ok(()),

                State::Error => return Err(self.trap()),
            }

            if self.status == State::Error {
                return Err(self.trap());
            }
        }
    }
}

fn drain<R: Read>(mut reader: R) -> Result<String, ParseError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| ParseError::Io {
            position: 0,
            source,
        })?;
    Ok(text)
}
