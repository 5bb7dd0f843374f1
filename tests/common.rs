//! Shared recording handler for the integration tests.
#![allow(dead_code)]

use jsonsax::{ContentHandler, ParseError, Value};

/// One observed handler callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartJson,
    EndJson,
    StartObject,
    EndObject,
    StartObjectEntry(String),
    EndObjectEntry,
    StartArray,
    EndArray,
    Primitive(Value),
}

/// Records every callback, optionally pausing once at a given event count.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    /// Return `false` from the callback that records this many events.
    pub pause_at: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pausing_at(n: usize) -> Self {
        Self {
            events: Vec::new(),
            pause_at: Some(n),
        }
    }

    fn record(&mut self, event: Event) -> Result<bool, ParseError> {
        self.events.push(event);
        Ok(Some(self.events.len()) != self.pause_at)
    }
}

impl ContentHandler for Recorder {
    fn start_json(&mut self) -> Result<(), ParseError> {
        self.events.push(Event::StartJson);
        Ok(())
    }

    fn end_json(&mut self) -> Result<(), ParseError> {
        self.events.push(Event::EndJson);
        Ok(())
    }

    fn start_object(&mut self) -> Result<bool, ParseError> {
        self.record(Event::StartObject)
    }

    fn end_object(&mut self) -> Result<bool, ParseError> {
        self.record(Event::EndObject)
    }

    fn start_object_entry(&mut self, key: String) -> Result<bool, ParseError> {
        self.record(Event::StartObjectEntry(key))
    }

    fn end_object_entry(&mut self) -> Result<bool, ParseError> {
        self.record(Event::EndObjectEntry)
    }

    fn start_array(&mut self) -> Result<bool, ParseError> {
        self.record(Event::StartArray)
    }

    fn end_array(&mut self) -> Result<bool, ParseError> {
        self.record(Event::EndArray)
    }

    fn primitive(&mut self, value: Value) -> Result<bool, ParseError> {
        self.record(Event::Primitive(value))
    }
}

/// The callback sequence implied by traversing a parsed tree.
pub fn events_of(value: &Value) -> Vec<Event> {
    let mut out = vec![Event::StartJson];
    walk(value, &mut out);
    out.push(Event::EndJson);
    out
}

fn walk(value: &Value, out: &mut Vec<Event>) {
    match value {
        Value::Object(map) => {
            out.push(Event::StartObject);
            for (key, entry) in map {
                out.push(Event::StartObjectEntry(key.clone()));
                walk(entry, out);
                out.push(Event::EndObjectEntry);
            }
            out.push(Event::EndObject);
        }
        Value::Array(arr) => {
            out.push(Event::StartArray);
            for element in arr {
                walk(element, out);
            }
            out.push(Event::EndArray);
        }
        primitive => out.push(Event::Primitive(primitive.clone())),
    }
}
