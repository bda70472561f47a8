use crate::data::{validate_questions, LoadError};
use crate::engine::QuizEngine;
use crate::models::Question;
use crate::store::KeyValueStore;

/// Front-end state: the engine plus which question and option have focus.
pub struct App<S> {
    engine: QuizEngine<S>,
    focused_question: usize,
    focused_option: usize,
}

impl<S: KeyValueStore> App<S> {
    /// Fails when there is no question to focus or a question has no
    /// options to move between.
    pub fn new(engine: QuizEngine<S>) -> Result<Self, LoadError> {
        validate_questions(engine.questions())?;

        let mut app = Self {
            engine,
            focused_question: 0,
            focused_option: 0,
        };
        app.focus_question(0);
        Ok(app)
    }

    pub fn engine(&self) -> &QuizEngine<S> {
        &self.engine
    }

    pub fn focused_question(&self) -> &Question {
        &self.engine.questions()[self.focused_question]
    }

    pub fn focused_question_index(&self) -> usize {
        self.focused_question
    }

    pub fn focused_option(&self) -> usize {
        self.focused_option
    }

    pub fn total_questions(&self) -> usize {
        self.engine.questions().len()
    }

    pub fn next_question(&mut self) {
        let next = (self.focused_question + 1) % self.total_questions();
        self.focus_question(next);
    }

    pub fn previous_question(&mut self) {
        let total = self.total_questions();
        self.focus_question((self.focused_question + total - 1) % total);
    }

    pub fn next_option(&mut self) {
        let count = self.focused_question().options.len();
        self.focused_option = (self.focused_option + 1) % count;
    }

    pub fn previous_option(&mut self) {
        let count = self.focused_question().options.len();
        self.focused_option = (self.focused_option + count - 1) % count;
    }

    pub fn select_focused_option(&mut self) {
        let label = self.focused_question().options[self.focused_option]
            .label
            .clone();
        self.engine.select_option(self.focused_question, &label);
    }

    /// Select the option with the given label on the focused question.
    /// Returns false when no such option exists.
    pub fn select_label(&mut self, label: &str) -> bool {
        let Some(position) = self.focused_question().position_of(label) else {
            return false;
        };
        self.focused_option = position;
        self.select_focused_option();
        true
    }

    /// Select the option at a 1-based position, as typed on the keyboard.
    pub fn select_number(&mut self, number: usize) -> bool {
        if number == 0 || number > self.focused_question().options.len() {
            return false;
        }
        self.focused_option = number - 1;
        self.select_focused_option();
        true
    }

    /// Clear the focused question. Only revealed questions offer this.
    pub fn clear_focused(&mut self) {
        if self.engine.is_revealed(self.focused_question) {
            self.engine.clear_answer(self.focused_question);
        }
    }

    pub fn reset_all(&mut self) {
        self.engine.reset_all();
        self.focused_option = 0;
    }

    fn focus_question(&mut self, index: usize) {
        self.focused_question = index;
        let question = &self.engine.questions()[index];
        self.focused_option = self
            .engine
            .selected(index)
            .and_then(|label| question.position_of(label))
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn app() -> App<MemoryStore> {
        let options = [("A", "one"), ("B", "two"), ("C", "three")];
        let questions = vec![
            Question::new("first", &options, "A"),
            Question::new("second", &options, "C"),
        ];
        App::new(QuizEngine::new(questions, MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_new_rejects_unusable_question_sets() {
        let empty = App::new(QuizEngine::new(Vec::new(), MemoryStore::new()));
        assert!(matches!(empty, Err(LoadError::Empty)));

        let questions = vec![Question::new("no options", &[], "A")];
        let optionless = App::new(QuizEngine::new(questions, MemoryStore::new()));
        assert!(matches!(
            optionless,
            Err(LoadError::InvalidQuestion { number: 1, .. })
        ));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous_option();
        assert_eq!(app.focused_option(), 2);
        app.next_option();
        assert_eq!(app.focused_option(), 0);

        app.previous_question();
        assert_eq!(app.focused_question_index(), 1);
        app.next_question();
        assert_eq!(app.focused_question_index(), 0);
    }

    #[test]
    fn test_select_focused_option() {
        let mut app = app();
        app.next_option();
        app.select_focused_option();

        assert_eq!(app.engine().selected(0), Some("B"));
        assert_eq!(app.engine().is_correct(0, "B"), Some(false));
    }

    #[test]
    fn test_focus_follows_saved_answer() {
        let mut app = app();
        app.next_question();
        assert!(app.select_label("C"));
        app.next_question();
        assert_eq!(app.focused_option(), 0);

        app.next_question();
        assert_eq!(app.focused_option(), 2);
    }

    #[test]
    fn test_select_by_label_and_number() {
        let mut app = app();
        assert!(!app.select_label("Z"));
        assert!(!app.select_number(0));
        assert!(!app.select_number(4));
        assert!(app.engine().answers().is_empty());

        assert!(app.select_number(3));
        assert_eq!(app.engine().selected(0), Some("C"));
    }

    #[test]
    fn test_clear_and_reset() {
        let mut app = app();
        app.select_label("A");
        app.clear_focused();
        assert!(!app.engine().is_revealed(0));

        app.select_label("A");
        app.next_question();
        app.select_label("B");
        app.reset_all();
        assert!(app.engine().answers().is_empty());
        assert!(app.engine().store().is_empty());
    }
}
