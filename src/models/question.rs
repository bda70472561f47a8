/// A single labelled answer, e.g. `B. A borrowed string slice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: String,
    pub text: String,
}

/// A multiple-choice question, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    /// Options in the order the source document lists them.
    pub options: Vec<AnswerOption>,
    pub correct_answer: String,
}

impl Question {
    pub fn new(text: impl Into<String>, options: &[(&str, &str)], correct_answer: &str) -> Self {
        Self {
            text: text.into(),
            options: options
                .iter()
                .map(|(label, text)| AnswerOption {
                    label: label.to_string(),
                    text: text.to_string(),
                })
                .collect(),
            correct_answer: correct_answer.to_string(),
        }
    }

    pub fn option(&self, label: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.label == label)
    }

    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|option| option.label == label)
    }
}
