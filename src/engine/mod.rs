//! Answer and reveal state for a loaded question set.
//!
//! [`QuizEngine`] owns two maps keyed by question index: the option label the
//! user picked, and a reveal flag that is present exactly when an answer is.
//! Every mutation is mirrored into the injected [`KeyValueStore`] so that a
//! later engine built over the same store picks up where this one left off.

pub mod codec;

use std::fmt;

use crate::models::Question;
use crate::store::{KeyValueStore, StoreError};

pub use codec::{AnswerMap, CodecError, RevealMap, ANSWERS_KEY, RESULTS_KEY};

/// Message shown under a revealed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_answer: String },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "Correct!"),
            Feedback::Incorrect { correct_answer } => {
                write!(f, "Incorrect! The correct answer is {correct_answer}.")
            }
        }
    }
}

/// Highlight for a single rendered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStatus {
    Unmarked,
    Correct,
    Incorrect,
}

pub struct QuizEngine<S> {
    questions: Vec<Question>,
    answers: AnswerMap,
    reveals: RevealMap,
    store: S,
    hydrated: bool,
    sync_error: Option<String>,
}

impl<S: KeyValueStore> QuizEngine<S> {
    /// Build an engine over `questions`, restoring any progress kept in
    /// `store`.
    pub fn new(questions: Vec<Question>, store: S) -> Self {
        let mut engine = Self {
            questions,
            answers: AnswerMap::new(),
            reveals: RevealMap::new(),
            store,
            hydrated: false,
            sync_error: None,
        };
        engine.hydrate();
        engine
    }

    fn hydrate(&mut self) {
        match self.read_persisted() {
            Ok((answers, reveals)) => {
                tracing::debug!(answered = answers.len(), "restored quiz progress");
                self.answers = answers;
                self.reveals = reveals;
            }
            Err(reason) => {
                tracing::warn!(%reason, "discarding stored quiz progress");
                self.delete_persisted();
            }
        }
        self.hydrated = true;
    }

    fn read_persisted(&self) -> Result<(AnswerMap, RevealMap), String> {
        let stored_answers = self.store.get(ANSWERS_KEY).map_err(|e| e.to_string())?;
        let stored_reveals = self.store.get(RESULTS_KEY).map_err(|e| e.to_string())?;

        let answers = match stored_answers {
            Some(text) => codec::decode_answers(&text).map_err(|e| format!("{ANSWERS_KEY}: {e}"))?,
            None => AnswerMap::new(),
        };
        let reveals = match stored_reveals {
            Some(text) => codec::decode_reveals(&text).map_err(|e| format!("{RESULTS_KEY}: {e}"))?,
            None => RevealMap::new(),
        };

        if !answers.keys().eq(reveals.keys()) {
            return Err("answered and revealed questions differ".to_string());
        }
        if let Some(index) = answers.keys().find(|&&i| i >= self.questions.len()) {
            return Err(format!(
                "question {index} is outside the {} loaded questions",
                self.questions.len()
            ));
        }

        Ok((answers, reveals))
    }

    /// Both keys are always attempted; the first failure is reported.
    fn delete_persisted(&mut self) {
        let answers = self.store.delete(ANSWERS_KEY);
        let reveals = self.store.delete(RESULTS_KEY);
        self.record_store_result(answers.and(reveals));
    }

    /// Write both maps to the store in full.
    fn sync(&mut self) {
        if !self.hydrated {
            return;
        }

        let answers = codec::encode_answers(&self.answers);
        let reveals = codec::encode_reveals(&self.reveals);
        let answers = self.store.set(ANSWERS_KEY, &answers);
        let reveals = self.store.set(RESULTS_KEY, &reveals);
        tracing::debug!(answered = self.answers.len(), "synced quiz progress");
        self.record_store_result(answers.and(reveals));
    }

    fn record_store_result(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => self.sync_error = None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist quiz progress");
                self.sync_error = Some(err.to_string());
            }
        }
    }

    /// Record `option_label` as the answer to a question and reveal it.
    /// Answering again replaces the previous pick.
    pub fn select_option(&mut self, question_index: usize, option_label: &str) {
        if question_index >= self.questions.len() {
            tracing::warn!(question_index, "ignoring selection for unknown question");
            return;
        }

        self.answers.insert(question_index, option_label.to_string());
        self.reveals.insert(question_index, true);
        self.sync();
    }

    /// Forget the answer to a question. Clearing an unanswered question is a
    /// no-op apart from the store write.
    pub fn clear_answer(&mut self, question_index: usize) {
        self.answers.remove(&question_index);
        self.reveals.remove(&question_index);
        self.sync();
    }

    /// `None` until the question has been revealed.
    pub fn is_correct(&self, question_index: usize, option_label: &str) -> Option<bool> {
        if !self.is_revealed(question_index) {
            return None;
        }
        let question = self.questions.get(question_index)?;
        Some(option_label == question.correct_answer)
    }

    /// Drop every answer and remove the stored copies outright.
    pub fn reset_all(&mut self) {
        self.answers.clear();
        self.reveals.clear();
        self.delete_persisted();
        tracing::info!("reset all answers");
    }

    pub fn feedback(&self, question_index: usize) -> Option<Feedback> {
        let selected = self.selected(question_index)?;
        let question = self.questions.get(question_index)?;

        match self.is_correct(question_index, selected)? {
            true => Some(Feedback::Correct),
            false => Some(Feedback::Incorrect {
                correct_answer: question.correct_answer.clone(),
            }),
        }
    }

    /// Only the user's own pick is ever highlighted.
    pub fn option_status(&self, question_index: usize, option_label: &str) -> OptionStatus {
        if self.selected(question_index) != Some(option_label) {
            return OptionStatus::Unmarked;
        }

        match self.is_correct(question_index, option_label) {
            Some(true) => OptionStatus::Correct,
            Some(false) => OptionStatus::Incorrect,
            None => OptionStatus::Unmarked,
        }
    }

    pub fn selected(&self, question_index: usize) -> Option<&str> {
        self.answers.get(&question_index).map(String::as_str)
    }

    pub fn is_revealed(&self, question_index: usize) -> bool {
        self.reveals.get(&question_index).copied().unwrap_or(false)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn reveals(&self) -> &RevealMap {
        &self.reveals
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|(index, label)| self.is_correct(**index, label) == Some(true))
            .count()
    }

    /// Message of the last failed store operation, cleared by the next
    /// successful one.
    pub fn sync_error(&self) -> Option<&str> {
        self.sync_error.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
