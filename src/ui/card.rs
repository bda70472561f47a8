//! The focused question: text, options and feedback.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::{Feedback, OptionStatus};
use crate::store::KeyValueStore;

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let index = app.focused_question_index();
    let question = app.focused_question();
    let feedback = app.engine().feedback(index);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .title(format!(" Question {} of {} ", index + 1, app.total_questions()))
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .split(inner);

    let text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(text, chunks[0]);

    render_options(frame, chunks[1], app);

    if let Some(feedback) = feedback {
        render_feedback(frame, chunks[2], &feedback);
    }
}

fn render_options<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let index = app.focused_question_index();
    let question = app.focused_question();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (position, option) in question.options.iter().enumerate() {
        let is_focused = position == app.focused_option();
        let style = match app.engine().option_status(index, &option.label) {
            OptionStatus::Correct => Style::default().fg(Color::Green).bold(),
            OptionStatus::Incorrect => Style::default().fg(Color::Red).bold(),
            OptionStatus::Unmarked if is_focused => Style::default().fg(Color::Cyan).bold(),
            OptionStatus::Unmarked => Style::default().fg(Color::Gray),
        };
        let marker = if is_focused { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.label), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &Feedback) {
    let color = match feedback {
        Feedback::Correct => Color::Green,
        Feedback::Incorrect { .. } => Color::Red,
    };

    let content = vec![
        Line::from(Span::styled(
            feedback.to_string(),
            Style::default().fg(color).bold(),
        )),
        Line::from("c clear answer".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content), area);
}
