//! Streaming mode: callback sequences, pausing, resuming, poisoning.

mod common;

use std::io;

use common::{events_of, Event, Recorder};
use jsonsax::{parse, ContentHandler, ParseError, StreamParser, Token, Value};
use rstest::rstest;

#[rstest]
#[case("3")]
#[case("\"hi\"")]
#[case("null")]
#[case("{}")]
#[case("[]")]
#[case("[1, [2, {\"x\": []}], null]")]
#[case(r#"{"a": [1, {"b": null}], "c": "x", "d": {}}"#)]
#[case(r#"{"nested": {"deep": {"deeper": [true, false]}}}"#)]
fn streaming_events_match_tree_traversal(#[case] text: &str) {
    let tree = parse(text).unwrap();
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    parser.parse(text, &mut recorder).unwrap();
    assert_eq!(recorder.events, events_of(&tree));
}

#[test]
fn pausing_handler_stops_with_zero_further_callbacks() {
    // StartArray is the second event; answer false there.
    let mut recorder = Recorder::pausing_at(2);
    let mut parser = StreamParser::new();
    parser.parse("[1, 2, 3]", &mut recorder).unwrap();
    assert_eq!(recorder.events, vec![Event::StartJson, Event::StartArray]);
}

#[test]
fn paused_session_resumes_where_it_stopped() {
    let full = {
        let mut recorder = Recorder::new();
        let mut parser = StreamParser::new();
        parser.parse("[\"foo\",2]", &mut recorder).unwrap();
        recorder.events
    };

    // Pause at the third event (the "foo" primitive), which is also the last
    // event the first piece can produce, then feed the rest of the document.
    let mut recorder = Recorder::pausing_at(3);
    let mut parser = StreamParser::new();
    parser.parse("[\"foo\"", &mut recorder).unwrap();
    assert_eq!(recorder.events.len(), 3);
    parser.resume(",2]", &mut recorder).unwrap();
    assert_eq!(recorder.events, full);

    // The document is complete; further resume calls do nothing.
    parser.resume("", &mut recorder).unwrap();
    assert_eq!(recorder.events, full);
}

#[test]
fn paused_session_resumes_mid_object() {
    let full = {
        let mut recorder = Recorder::new();
        let mut parser = StreamParser::new();
        parser.parse(r#"{"a":1,"b":2}"#, &mut recorder).unwrap();
        recorder.events
    };

    // Events for the first piece: StartJson, StartObject,
    // StartObjectEntry(a), Primitive(1), EndObjectEntry — pause at the
    // fifth.
    let mut recorder = Recorder::pausing_at(5);
    let mut parser = StreamParser::new();
    parser.parse(r#"{"a":1"#, &mut recorder).unwrap();
    assert_eq!(recorder.events.len(), 5);
    parser.resume(r#","b":2}"#, &mut recorder).unwrap();
    assert_eq!(recorder.events, full);
}

#[test]
fn pause_mid_chunk_keeps_the_unread_tail() {
    let full = {
        let mut recorder = Recorder::new();
        let mut parser = StreamParser::new();
        parser.parse("[1, 2, 3]", &mut recorder).unwrap();
        recorder.events
    };

    // Pause at the third event (the 1 primitive) with most of the chunk
    // still unread; resuming with no new text must deliver the rest.
    let mut recorder = Recorder::pausing_at(3);
    let mut parser = StreamParser::new();
    parser.parse("[1, 2, 3]", &mut recorder).unwrap();
    assert_eq!(
        recorder.events,
        vec![
            Event::StartJson,
            Event::StartArray,
            Event::Primitive(Value::from(1)),
        ]
    );
    parser.resume("", &mut recorder).unwrap();
    assert_eq!(recorder.events, full);
}

#[test]
fn resumed_text_follows_the_unread_tail() {
    let full = {
        let mut recorder = Recorder::new();
        let mut parser = StreamParser::new();
        parser.parse("[1, 2, 3]", &mut recorder).unwrap();
        recorder.events
    };

    // The pause leaves ", 2" unread; the next call appends ", 3]" after it.
    let mut recorder = Recorder::pausing_at(3);
    let mut parser = StreamParser::new();
    parser.parse("[1, 2", &mut recorder).unwrap();
    parser.resume(", 3]", &mut recorder).unwrap();
    assert_eq!(recorder.events, full);
}

#[test]
fn start_json_fires_only_on_fresh_start() {
    let mut recorder = Recorder::pausing_at(2);
    let mut parser = StreamParser::new();
    parser.parse("[", &mut recorder).unwrap();
    parser.resume("1]", &mut recorder).unwrap();
    let starts = recorder
        .events
        .iter()
        .filter(|e| **e == Event::StartJson)
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn resume_without_prior_state_is_a_fresh_parse() {
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    parser.resume("[1]", &mut recorder).unwrap();
    assert_eq!(
        recorder.events,
        vec![
            Event::StartJson,
            Event::StartArray,
            Event::Primitive(Value::from(1)),
            Event::EndArray,
            Event::EndJson,
        ]
    );
}

#[test]
fn completed_session_ignores_further_input() {
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    parser.parse("1", &mut recorder).unwrap();
    let done = recorder.events.clone();
    // Even garbage is ignored once the document has ended.
    parser.resume("%%%", &mut recorder).unwrap();
    assert_eq!(recorder.events, done);
}

#[test]
fn structural_error_poisons_the_session() {
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    let err = parser.parse("[1,}", &mut recorder).unwrap_err();
    let ParseError::UnexpectedToken { token, position } = err else {
        panic!("expected UnexpectedToken, got {err:?}");
    };
    assert_eq!(token, Token::RightBrace);
    assert_eq!(position, 3);

    // Resuming the poisoned session fails too, without new callbacks.
    let events = recorder.events.clone();
    let err = parser.resume("]", &mut recorder).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    assert_eq!(recorder.events, events);
}

#[test]
fn lexical_error_poisons_the_session() {
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    let err = parser.parse("[tru]", &mut recorder).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedCharacter { .. }));
    assert!(parser.resume("e]", &mut recorder).is_err());
}

#[test]
fn handler_error_propagates_unchanged_and_poisons() {
    struct Faulty;

    impl ContentHandler for Faulty {
        fn primitive(&mut self, _value: Value) -> Result<bool, ParseError> {
            Err(ParseError::Io {
                position: 0,
                source: io::Error::other("handler gave up"),
            })
        }
    }

    let mut parser = StreamParser::new();
    let err = parser.parse("[1]", &mut Faulty).unwrap_err();
    let ParseError::Io { source, .. } = err else {
        panic!("expected Io, got {err:?}");
    };
    assert_eq!(source.to_string(), "handler gave up");

    let err = parser.resume("]", &mut Faulty).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn trailing_content_fails_in_streaming_mode_too() {
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    let err = parser.parse("123 456", &mut recorder).unwrap_err();
    let ParseError::UnexpectedToken { token, position } = err else {
        panic!("expected UnexpectedToken, got {err:?}");
    };
    assert_eq!(token, Token::Value(Value::from(456)));
    assert_eq!(position, 4);
}

#[test]
fn fresh_parse_discards_a_paused_session() {
    let mut recorder = Recorder::pausing_at(2);
    let mut parser = StreamParser::new();
    parser.parse("[1, 2", &mut recorder).unwrap();

    // A non-resume call starts over: a new document, a new start_json.
    let mut second = Recorder::new();
    parser.parse("{\"a\": true}", &mut second).unwrap();
    let tree = parse("{\"a\": true}").unwrap();
    assert_eq!(second.events, events_of(&tree));
}

#[test]
fn reset_discards_a_paused_session() {
    let mut recorder = Recorder::pausing_at(2);
    let mut parser = StreamParser::new();
    parser.parse("[1, 2", &mut recorder).unwrap();
    parser.reset();

    let mut second = Recorder::new();
    parser.resume("[3]", &mut second).unwrap();
    assert_eq!(
        second.events,
        vec![
            Event::StartJson,
            Event::StartArray,
            Event::Primitive(Value::from(3)),
            Event::EndArray,
            Event::EndJson,
        ]
    );
}

#[test]
fn reader_input_streams() {
    let text = r#"{"a": [1, {"b": null}]}"#;
    let tree = parse(text).unwrap();
    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    parser
        .parse_reader(io::Cursor::new(text.as_bytes().to_vec()), &mut recorder)
        .unwrap();
    assert_eq!(recorder.events, events_of(&tree));
}

#[test]
fn reader_fault_surfaces_as_io_error() {
    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("wire fell out"))
        }
    }

    let mut recorder = Recorder::new();
    let mut parser = StreamParser::new();
    let err = parser.parse_reader(Broken, &mut recorder).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(recorder.events.is_empty());
}
