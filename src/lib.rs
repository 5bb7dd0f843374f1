//! A stoppable, resumable SAX-style JSON parser with a tree-building mode.
//!
//! One hand-written pushdown state machine — explicit status and value
//! stacks, no recursion — backs two independent consumption modes:
//!
//! - **Tree mode**: [`parse`] folds a whole document into a [`Value`], with
//!   an optional [`ContainerFactory`] seam for substituting the containers.
//! - **Streaming mode**: [`StreamParser`] drives a [`ContentHandler`] with
//!   one callback per structural event, without materializing the document.
//!   Any callback can pause the parse, and the session resumes later exactly
//!   where it stopped.
//!
//! # Examples
//!
//! ```
//! use jsonsax::{parse, Value};
//!
//! let v = parse(r#"{"ok": true, "n": [1, 2.5]}"#).unwrap();
//! assert!(v.is_object());
//! assert_eq!(v.to_string(), r#"{"ok":true,"n":[1,2.5]}"#);
//! ```

mod error;
mod factory;
mod handler;
mod lexer;
mod parser;
mod stream;
mod token;
mod value;

pub use error::ParseError;
pub use factory::{ContainerFactory, DefaultContainers};
pub use handler::ContentHandler;
pub use parser::{parse, parse_reader, parse_reader_with_factory, parse_with_factory};
pub use stream::StreamParser;
pub use token::Token;
pub use value::{Array, Number, Object, Value};
