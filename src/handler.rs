//! The event-consumer interface for streaming parses.

use crate::error::ParseError;
use crate::value::Value;

/// A simplified, stoppable SAX-style content handler for stream processing
/// of JSON text.
///
/// The streaming parser calls one method per structural event. Each
/// `bool`-returning callback may answer `Ok(false)` to pause parsing: the
/// parser returns immediately without an error, and the session can later be
/// resumed exactly where it left off. Pausing is a normal outcome, not a
/// failure.
///
/// Returning `Err` from any callback aborts the document: the error
/// propagates unchanged to the parser's caller and the session is poisoned.
///
/// All methods have default implementations that do nothing and continue, so
/// a handler implements only the events it cares about.
///
/// # Examples
///
/// A handler that counts object entries:
///
/// ```
/// use jsonsax::{ContentHandler, ParseError, StreamParser};
///
/// #[derive(Default)]
/// struct EntryCounter {
///     entries: usize,
/// }
///
/// impl ContentHandler for EntryCounter {
///     fn start_object_entry(&mut self, _key: String) -> Result<bool, ParseError> {
///         self.entries += 1;
///         Ok(true)
///     }
/// }
///
/// let mut counter = EntryCounter::default();
/// let mut parser = StreamParser::new();
/// parser.parse(r#"{"a": 1, "b": {"c": 2}}"#, &mut counter).unwrap();
/// assert_eq!(counter.entries, 3);
/// ```
#[allow(unused_variables)]
pub trait ContentHandler {
    /// Called once when a fresh document begins, never on a resumed call.
    fn start_json(&mut self) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called when the document has been fully consumed.
    fn end_json(&mut self) -> Result<(), ParseError> {
        Ok(())
    }

    /// A JSON object begins.
    fn start_object(&mut self) -> Result<bool, ParseError> {
        Ok(true)
    }

    /// A JSON object ends.
    fn end_object(&mut self) -> Result<bool, ParseError> {
        Ok(true)
    }

    /// An object entry begins; its value follows as further events.
    fn start_object_entry(&mut self, key: String) -> Result<bool, ParseError> {
        Ok(true)
    }

    /// The value of the most recently started object entry is complete.
    fn end_object_entry(&mut self) -> Result<bool, ParseError> {
        Ok(true)
    }

    /// A JSON array begins.
    fn start_array(&mut self) -> Result<bool, ParseError> {
        Ok(true)
    }

    /// A JSON array ends.
    fn end_array(&mut self) -> Result<bool, ParseError> {
        Ok(true)
    }

    /// A primitive value: string, number, boolean or null.
    fn primitive(&mut self, value: Value) -> Result<bool, ParseError> {
        Ok(true)
    }
}
