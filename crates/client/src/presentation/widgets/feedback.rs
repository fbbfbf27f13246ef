//! Transient judgement banner.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{AppState, FeedbackKind};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL);

    let Some(banner) = &state.feedback else {
        frame.render_widget(block, area);
        return;
    };

    let style = match banner.kind {
        FeedbackKind::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        FeedbackKind::Incorrect => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    };

    let paragraph = Paragraph::new(banner.text.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(paragraph, area);
}
