//! # quiz-tracker
//!
//! A terminal multiple-choice quiz that reveals each answer as soon as it is
//! picked and remembers progress between runs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_tracker::{FileStore, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Progress is kept in storage.json between runs
//!     let store = FileStore::open("storage.json")?;
//!     let quiz = Quiz::from_json("questions.json", Box::new(store))?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
pub mod engine;
mod models;
pub mod store;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

pub use app::App;
pub use data::{load_questions_from_json, parse_questions, validate_questions, LoadError};
pub use engine::{Feedback, OptionStatus, QuizEngine};
pub use models::{AnswerOption, Question};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to open progress storage: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Store chosen at runtime.
pub type DynStore = Box<dyn KeyValueStore>;

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App<DynStore>,
}

impl Quiz {
    /// Create a quiz over `questions`, restoring any progress in `store`.
    pub fn new(questions: Vec<Question>, store: DynStore) -> Result<Self, QuizError> {
        // Before hydration, which drops progress naming missing questions.
        validate_questions(&questions)?;

        let engine = QuizEngine::new(questions, store);
        Ok(Self {
            app: App::new(engine)?,
        })
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file containing questions.
    /// * `store` - Where answers are kept between runs.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_tracker::{MemoryStore, Quiz};
    ///
    /// let quiz = Quiz::from_json("questions.json", Box::new(MemoryStore::new()))
    ///     .expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P, store: DynStore) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions, store)
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut session = terminal::TerminalSession::start()?;
        run_event_loop(&mut session, &mut self.app)
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App<DynStore> {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App<DynStore> {
        &mut self.app
    }
}

fn run_event_loop<S: KeyValueStore>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<S>,
) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.next_option(),
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('n') => app.next_question(),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_focused_option(),
        KeyCode::Char('c') => app.clear_focused(),
        KeyCode::Char('r') => app.reset_all(),
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            app.select_label(&c.to_string());
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(number) = c.to_digit(10) {
                app.select_number(number as usize);
            }
        }
        _ => {}
    }

    false
}
