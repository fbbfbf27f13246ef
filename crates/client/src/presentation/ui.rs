//! Screen layout and dispatch to widgets.
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::state::{AppState, Screen};

use super::widgets;

pub fn render(frame: &mut Frame, state: &AppState) {
    match &state.screen {
        Screen::Welcome => widgets::welcome::render(frame, frame.area(), state),
        Screen::Quiz => render_quiz(frame, state),
        Screen::Results(summary) => widgets::results::render(frame, frame.area(), summary),
        Screen::Settings(form) => widgets::settings::render(frame, frame.area(), form),
    }
}

fn render_quiz(frame: &mut Frame, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header: level, score, countdown
            Constraint::Min(7),    // question card
            Constraint::Length(3), // stage progress
            Constraint::Length(3), // feedback banner
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    widgets::header::render(frame, rows[0], state);
    widgets::question_card::render(frame, rows[1], state);
    widgets::progress::render(frame, rows[2], state);
    widgets::feedback::render(frame, rows[3], state);
    widgets::hints::render(frame, rows[4], "Enter submit · Backspace edit · Esc abandon run");
}

/// Centers a fixed-size box inside `area`, clamped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
