//! Tree-building JSON parsing.
//!
//! One pushdown state machine drives both consumption modes of this crate.
//! This module holds the shared [`State`] tags and the tree-building
//! entry points, which fold the token sequence into a [`Value`]; the
//! streaming counterpart lives in [`crate::stream`].
//!
//! Nesting is tracked with two explicit stacks instead of recursion: a
//! status stack whose depth always equals the current container nesting
//! (plus one bookkeeping tag per key awaiting its value), and a value stack
//! of in-progress containers. Arbitrarily deep documents therefore never
//! threaten the call stack.

use std::io::Read;

use crate::error::ParseError;
use crate::factory::{ContainerFactory, DefaultContainers};
use crate::lexer::Lexer;
use crate::token::Token;
use crate::value::Value;

/// Parser status tags, pushed on entering a nested context and popped on
/// leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// No token consumed yet.
    Init,
    /// A complete top-level value has been read; only end of input may follow.
    FinishedValue,
    /// Inside an object, before or between entries.
    InObject,
    /// Inside an array, before or between elements.
    InArray,
    /// An entry key has been read; a colon and the value follow.
    PassedPairKey,
    /// Bookkeeping tag: a nested container just closed as an entry value.
    /// Consumes no token; only the streaming mode enters it.
    PairValue,
    /// Terminal success (streaming mode).
    End,
    /// Trap state; always raises an unexpected-token error.
    Error,
}

/// One slot of the tree-building value stack.
///
/// Keys sit on the same stack as in-progress containers, directly above the
/// object that will receive them.
enum Slot {
    Value(Value),
    Key(String),
}

/// Parses a complete JSON text into a [`Value`].
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the character offset when the text is
/// lexically or structurally malformed. A failed parse yields no partial
/// value.
///
/// # Examples
///
/// ```
/// use jsonsax::{parse, Value};
///
/// let v = parse(r#"{"a": [1, 2.5, null]}"#).unwrap();
/// assert!(v.is_object());
/// ```
pub fn parse(text: &str) -> Result<Value, ParseError> {
    parse_with_factory(text, &DefaultContainers)
}

/// Parses a complete JSON text, creating containers through `factory`.
///
/// Wherever a factory hook returns `None`, the default container is used
/// instead; a declined hook never propagates into the tree.
///
/// # Errors
///
/// Same failure modes as [`parse`].
pub fn parse_with_factory<F: ContainerFactory>(
    text: &str,
    factory: &F,
) -> Result<Value, ParseError> {
    let mut lexer = Lexer::new(text);
    let mut status = State::Init;
    let mut status_stack: Vec<State> = Vec::new();
    let mut value_stack: Vec<Slot> = Vec::new();

    loop {
        let token = lexer.next_token()?;
        match status {
            State::Init => match token {
                Token::Value(v) => {
                    status = State::FinishedValue;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(v));
                }
                Token::LeftBrace => {
                    status = State::InObject;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(new_object(factory)));
                }
                Token::LeftSquare => {
                    status = State::InArray;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(new_array(factory)));
                }
                other => return Err(unexpected(&lexer, other)),
            },

            State::FinishedValue => {
                if token.is_eof() {
                    if let Some(Slot::Value(v)) = value_stack.pop() {
                        return Ok(v);
                    }
                    unreachable!("finished value missing from stack");
                }
                // Trailing content after a complete value.
                return Err(unexpected(&lexer, token));
            }

            State::InObject => match token {
                Token::Comma => {}
                Token::Value(Value::String(key)) => {
                    value_stack.push(Slot::Key(key));
                    status = State::PassedPairKey;
                    status_stack.push(status);
                }
                Token::RightBrace => {
                    if value_stack.len() > 1 {
                        status_stack.pop();
                        close_container(&mut value_stack);
                        status = peek_status(&status_stack);
                    } else {
                        status = State::FinishedValue;
                    }
                }
                // Keys must be strings; any other primitive is an error.
                other => return Err(unexpected(&lexer, other)),
            },

            State::PassedPairKey => match token {
                Token::Colon => {}
                Token::Value(v) => {
                    status_stack.pop();
                    insert_entry(&mut value_stack, v);
                    status = peek_status(&status_stack);
                }
                Token::LeftBrace => {
                    status_stack.pop();
                    status = State::InObject;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(new_object(factory)));
                }
                Token::LeftSquare => {
                    status_stack.pop();
                    status = State::InArray;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(new_array(factory)));
                }
                other => return Err(unexpected(&lexer, other)),
            },

            State::InArray => match token {
                Token::Comma => {}
                Token::Value(v) => append_element(&mut value_stack, v),
                Token::RightSquare => {
                    if value_stack.len() > 1 {
                        status_stack.pop();
                        close_container(&mut value_stack);
                        status = peek_status(&status_stack);
                    } else {
                        status = State::FinishedValue;
                    }
                }
                Token::LeftBrace => {
                    status = State::InObject;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(new_object(factory)));
                }
                Token::LeftSquare => {
                    status = State::InArray;
                    status_stack.push(status);
                    value_stack.push(Slot::Value(new_array(factory)));
                }
                other => return Err(unexpected(&lexer, other)),
            },

            State::PairValue | State::End | State::Error => {
                return Err(unexpected(&lexer, token));
            }
        }
    }
}

/// Drains `reader` and parses its contents.
///
/// # Errors
///
/// An I/O fault while draining surfaces as [`ParseError::Io`]; parsing then
/// fails the same ways as [`parse`].
pub fn parse_reader<R: Read>(reader: R) -> Result<Value, ParseError> {
    parse_reader_with_factory(reader, &DefaultContainers)
}

/// Drains `reader` and parses its contents, creating containers through
/// `factory`.
///
/// # Errors
///
/// Same failure modes as [`parse_reader`].
pub fn parse_reader_with_factory<R: Read, F: ContainerFactory>(
    mut reader: R,
    factory: &F,
) -> Result<Value, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|source| ParseError::Io {
        position: 0,
        source,
    })?;
    parse_with_factory(&text, factory)
}

pub(crate) fn peek_status(stack: &[State]) -> State {
    stack.last().copied().unwrap_or(State::Error)
}

fn unexpected(lexer: &Lexer<'_>, token: Token) -> ParseError {
    ParseError::UnexpectedToken {
        token,
        position: lexer.position(),
    }
}

fn new_object<F: ContainerFactory>(factory: &F) -> Value {
    Value::Object(factory.create_object().unwrap_or_default())
}

fn new_array<F: ContainerFactory>(factory: &F) -> Value {
    Value::Array(factory.create_array().unwrap_or_default())
}

/// Pops the key below the stack top and stores `value` under it in the
/// object that is then on top.
fn insert_entry(value_stack: &mut Vec<Slot>, value: Value) {
    let Some(Slot::Key(key)) = value_stack.pop() else {
        unreachable!("entry value without a pending key");
    };
    match value_stack.last_mut() {
        Some(Slot::Value(Value::Object(map))) => {
            map.insert(key, value);
        }
        _ => unreachable!("pending key without an open object"),
    }
}

/// Appends `value` to the array on top of the stack.
fn append_element(value_stack: &mut [Slot], value: Value) {
    match value_stack.last_mut() {
        Some(Slot::Value(Value::Array(arr))) => arr.push(value),
        _ => unreachable!("array element without an open array"),
    }
}

/// Pops a finished container and attaches it to its parent: stored under the
/// pending key when the parent is an object, appended when it is an array.
///
/// Children are attached at close rather than at open; until then the child
/// sits on the stack directly above its parent (and above the pending key,
/// for object entries).
fn close_container(value_stack: &mut Vec<Slot>) {
    let Some(Slot::Value(child)) = value_stack.pop() else {
        unreachable!("closing a container that is not on the stack");
    };
    if matches!(value_stack.last(), Some(Slot::Key(_))) {
        insert_entry(value_stack, child);
    } else {
        match value_stack.last_mut() {
            Some(Slot::Value(Value::Array(arr))) => arr.push(child),
            _ => unreachable!("closed container has no parent slot"),
        }
    }
}
