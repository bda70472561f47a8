//! Text encoding of the answer and reveal maps as kept in the store.
//!
//! Both maps are JSON objects keyed by the question index written as text:
//! `{"0":"A","1":"C"}` and `{"0":true,"1":true}`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

pub const ANSWERS_KEY: &str = "quizAnswers";
pub const RESULTS_KEY: &str = "quizResults";

pub type AnswerMap = BTreeMap<usize, String>;
pub type RevealMap = BTreeMap<usize, bool>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected an object, found {0}")]
    NotAnObject(String),

    #[error("key {0:?} is not a question index")]
    BadIndex(String),

    #[error("value for question {index} is {found}, expected {expected}")]
    BadValue {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

pub fn encode_answers(answers: &AnswerMap) -> String {
    let object: Map<String, Value> = answers
        .iter()
        .map(|(index, label)| (index.to_string(), Value::String(label.clone())))
        .collect();
    Value::Object(object).to_string()
}

pub fn encode_reveals(reveals: &RevealMap) -> String {
    let object: Map<String, Value> = reveals
        .iter()
        .map(|(index, flag)| (index.to_string(), Value::Bool(*flag)))
        .collect();
    Value::Object(object).to_string()
}

pub fn decode_answers(text: &str) -> Result<AnswerMap, CodecError> {
    decode_object(text)?
        .into_iter()
        .map(|(key, value)| {
            let index = parse_index(&key)?;
            match value {
                Value::String(label) => Ok((index, label)),
                other => Err(CodecError::BadValue {
                    index,
                    expected: "an option label",
                    found: other.to_string(),
                }),
            }
        })
        .collect()
}

/// A reveal flag is a presence marker; only `true` is a valid value.
pub fn decode_reveals(text: &str) -> Result<RevealMap, CodecError> {
    decode_object(text)?
        .into_iter()
        .map(|(key, value)| {
            let index = parse_index(&key)?;
            match value {
                Value::Bool(true) => Ok((index, true)),
                other => Err(CodecError::BadValue {
                    index,
                    expected: "true",
                    found: other.to_string(),
                }),
            }
        })
        .collect()
}

fn decode_object(text: &str) -> Result<Map<String, Value>, CodecError> {
    match serde_json::from_str(text)? {
        Value::Object(object) => Ok(object),
        other => Err(CodecError::NotAnObject(other.to_string())),
    }
}

// Only canonical decimal indices: "01" or "+1" would not round-trip.
fn parse_index(key: &str) -> Result<usize, CodecError> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));

    key.parse()
        .ok()
        .filter(|_| canonical)
        .ok_or_else(|| CodecError::BadIndex(key.to_string()))
}
