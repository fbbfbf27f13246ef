//! Stage progress bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};

use quiz_core::QuizConfig;

use crate::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let quiz = &state.quiz;
    let total = QuizConfig::QUESTIONS_PER_STAGE;
    let done = quiz.question_index.min(total);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(f64::from(done) / f64::from(total))
        .label(format!("Question {}/{}", (done + 1).min(total), total));

    frame.render_widget(gauge, area);
}
