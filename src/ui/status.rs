use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::store::KeyValueStore;

pub fn render_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let engine = app.engine();
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "QUIZ",
        Style::default().fg(Color::Cyan).bold(),
    )))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Color::DarkGray));
    frame.render_widget(title, chunks[0]);

    let progress = format!(
        "{}/{} answered  ·  {} correct",
        engine.answered_count(),
        app.total_questions(),
        engine.correct_count()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Color::DarkGray));
    frame.render_widget(widget, chunks[1]);
}

pub fn render_footer<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut lines = vec![Line::from(
        "j/k option  ·  n/p question  ·  enter select  ·  r reset all  ·  q quit"
            .fg(Color::DarkGray),
    )];

    if let Some(error) = app.engine().sync_error() {
        lines.push(Line::from(
            format!("progress not saved: {}", error).fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
