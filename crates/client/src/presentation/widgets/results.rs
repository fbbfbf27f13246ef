//! End-of-game results screen.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::ui::centered_rect;
use crate::state::GameSummary;

pub fn render(frame: &mut Frame, area: Rect, summary: &GameSummary) {
    let card = centered_rect(area, 52, 11);

    let (title, title_color) = if summary.completed {
        ("You finished every level! 🏆", Color::Green)
    } else {
        ("Game over", Color::Yellow)
    };

    let text = vec![
        Line::default(),
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("Final score: {}", summary.final_score)),
        Line::from(format!("Reached level: {}×", summary.final_level)),
        Line::from(format!("Total time: {}s", summary.elapsed_seconds)),
        Line::default(),
        Line::from(Span::styled(
            "Enter — back to start    q — quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Results"));

    frame.render_widget(paragraph, card);
}
