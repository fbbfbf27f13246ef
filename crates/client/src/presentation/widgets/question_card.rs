//! The question card: prompt and the typed answer.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let quiz = &state.quiz;

    let prompt = match quiz.question {
        Some(question) => question.to_string(),
        // Between feedback and the next reveal there is nothing to answer.
        None => "…".to_string(),
    };

    let text = vec![
        Line::default(),
        Line::from(Span::styled(
            prompt,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::raw("Your answer: "),
            Span::styled(
                format!("{}▏", quiz.answer_input),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
