use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{AnswerOption, Question};

/// Error raised while reading the question document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse question document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question document must contain at least one question")]
    Empty,

    #[error("question {number}: {reason}")]
    InvalidQuestion { number: usize, reason: String },
}

#[derive(Deserialize)]
struct QuestionDocument {
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<Map<String, Value>>,
    correct_answer: String,
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions = parse_questions(&json_content)?;
    tracing::debug!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

/// Parse a `{ "questions": [...] }` document.
pub fn parse_questions(json_content: &str) -> Result<Vec<Question>, LoadError> {
    let document: QuestionDocument = serde_json::from_str(json_content)?;

    if document.questions.is_empty() {
        return Err(LoadError::Empty);
    }

    document
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, raw)| convert_question(index + 1, raw))
        .collect()
}

/// Check that a question set can be shown: at least one question, and
/// every question has at least one option.
pub fn validate_questions(questions: &[Question]) -> Result<(), LoadError> {
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    if let Some(position) = questions.iter().position(|q| q.options.is_empty()) {
        return Err(LoadError::InvalidQuestion {
            number: position + 1,
            reason: "question has no options".to_string(),
        });
    }
    Ok(())
}

fn convert_question(number: usize, raw: RawQuestion) -> Result<Question, LoadError> {
    let invalid = |reason: String| LoadError::InvalidQuestion { number, reason };

    let [option_map]: [Map<String, Value>; 1] = raw.options.try_into().map_err(
        |options: Vec<Map<String, Value>>| {
            invalid(format!(
                "options must wrap exactly one mapping, found {}",
                options.len()
            ))
        },
    )?;

    if option_map.is_empty() {
        return Err(invalid("question has no options".to_string()));
    }

    let options = option_map
        .into_iter()
        .map(|(label, text)| match text {
            Value::String(text) => Ok(AnswerOption { label, text }),
            other => Err(invalid(format!("option {label} is not text: {other}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !options.iter().any(|option| option.label == raw.correct_answer) {
        return Err(invalid(format!(
            "correct answer {} is not one of the options",
            raw.correct_answer
        )));
    }

    Ok(Question {
        text: raw.question,
        options,
        correct_answer: raw.correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "questions": [
            {
                "question": "Which keyword declares an immutable binding?",
                "options": [{ "D": "const", "A": "let", "B": "mut", "C": "static" }],
                "correct_answer": "A"
            }
        ]
    }"#;

    #[test]
    fn test_parse_keeps_option_order() {
        let questions = parse_questions(DOCUMENT).unwrap();
        assert_eq!(questions.len(), 1);

        let labels: Vec<&str> = questions[0]
            .options
            .iter()
            .map(|option| option.label.as_str())
            .collect();
        assert_eq!(labels, ["D", "A", "B", "C"]);
        assert_eq!(questions[0].correct_answer, "A");
        assert_eq!(questions[0].option("B").unwrap().text, "mut");
    }

    #[test]
    fn test_parse_rejects_empty_document() {
        let err = parse_questions(r#"{ "questions": [] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_correct_answer() {
        let document = r#"{ "questions": [
            { "question": "q", "options": [{ "A": "a", "B": "b" }], "correct_answer": "E" }
        ] }"#;
        let err = parse_questions(document).unwrap_err();
        assert!(matches!(err, LoadError::InvalidQuestion { number: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_split_option_mappings() {
        let document = r#"{ "questions": [
            { "question": "q", "options": [{ "A": "a" }, { "B": "b" }], "correct_answer": "A" }
        ] }"#;
        let err = parse_questions(document).unwrap_err();
        assert!(err.to_string().contains("exactly one mapping"));
    }

    #[test]
    fn test_parse_rejects_non_text_option() {
        let document = r#"{ "questions": [
            { "question": "q", "options": [{ "A": 1 }], "correct_answer": "A" }
        ] }"#;
        let err = parse_questions(document).unwrap_err();
        assert!(matches!(err, LoadError::InvalidQuestion { .. }));
    }

    #[test]
    fn test_validate_questions() {
        assert!(matches!(validate_questions(&[]), Err(LoadError::Empty)));

        let questions = [
            Question::new("q", &[("A", "a")], "A"),
            Question::new("no options", &[], "A"),
        ];
        assert!(matches!(
            validate_questions(&questions),
            Err(LoadError::InvalidQuestion { number: 2, .. })
        ));
        assert!(validate_questions(&questions[..1]).is_ok());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_questions_from_json(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, DOCUMENT).unwrap();

        let questions = load_questions_from_json(&path).unwrap();
        assert_eq!(questions[0].text, "Which keyword declares an immutable binding?");
    }
}
