mod card;
mod status;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::store::KeyValueStore;

pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    status::render_header(frame, chunks[0], app);
    card::render(frame, chunks[1], app);
    status::render_footer(frame, chunks[2], app);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::engine::QuizEngine;
    use crate::models::Question;
    use crate::store::MemoryStore;

    fn screen_text(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App<MemoryStore> {
        let options = [("A", "Stack"), ("B", "Heap"), ("C", "Registers"), ("D", "Disk")];
        let questions = vec![
            Question::new("Where does a Box<T> store its value?", &options, "B"),
            Question::new("Where do local integers live?", &options, "A"),
        ];
        App::new(QuizEngine::new(questions, MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_render_unanswered_question() {
        let screen = screen_text(&app());
        assert!(screen.contains("Question 1 of 2"));
        assert!(screen.contains("Where does a Box<T> store its value?"));
        assert!(screen.contains("C. Registers"));
        assert!(screen.contains("0/2 answered"));
        assert!(!screen.contains("Correct!"));
    }

    #[test]
    fn test_render_feedback() {
        let mut app = app();
        app.select_label("A");
        let screen = screen_text(&app);
        assert!(screen.contains("Incorrect! The correct answer is B."));
        assert!(screen.contains("1/2 answered"));

        app.select_label("B");
        let screen = screen_text(&app);
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("1 correct"));
    }
}
