//! Welcome screen.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::ui::centered_rect;
use crate::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let card = centered_rect(area, 56, 12);

    let text = vec![
        Line::default(),
        Line::from(Span::styled(
            "MULTIPLICATION MASTER",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Work through the 1× to 10× tables, one level at a time."),
        Line::from("Each level: ten in order, then ten mixed."),
        Line::from(format!(
            "One mistake or a missed {}s countdown sends you back to 1 × 1.",
            state.settings.time_limit
        )),
        Line::default(),
        Line::from(Span::styled(
            "Enter — start    s — settings    q — quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, card);
}
