//! Header panel: current table, score, and countdown.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let quiz = &state.quiz;

    // Countdown color mirrors urgency: calm, warning, alert.
    let timer_style = if quiz.time_remaining <= 5 {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::RAPID_BLINK)
    } else if quiz.time_remaining <= 10 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let text = vec![Line::from(vec![
        Span::styled(
            format!("{}× table", quiz.level),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({})", quiz.stage)),
        Span::raw(" | Score: "),
        Span::styled(
            quiz.score.to_string(),
            Style::default().fg(Color::LightGreen),
        ),
        Span::raw(" | Time: "),
        Span::styled(format!("{}s", quiz.time_remaining), timer_style),
    ])];

    let paragraph =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Drill"));

    frame.render_widget(paragraph, area);
}
