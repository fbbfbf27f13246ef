//! Passphrase-gated settings form.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::presentation::ui::centered_rect;
use crate::state::{SettingsField, SettingsForm};

pub fn render(frame: &mut Frame, area: Rect, form: &SettingsForm) {
    let card = centered_rect(area, 48, 10);
    frame.render_widget(Clear, card);

    let text = match form {
        SettingsForm::Locked {
            passphrase_input,
            notice,
        } => {
            // Masked like any other passphrase prompt, nuisance gate or not.
            let masked = "*".repeat(passphrase_input.len());
            vec![
                Line::default(),
                Line::from("Enter the passphrase to edit settings"),
                Line::default(),
                Line::from(Span::styled(
                    format!("{masked}▏"),
                    Style::default().fg(Color::Cyan),
                )),
                Line::default(),
                notice_line(notice),
                Line::from(Span::styled(
                    "Enter — unlock    Esc — close",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
        SettingsForm::Unlocked {
            time_limit_input,
            sound_enabled,
            focus,
            notice,
        } => {
            let focused = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
            let blurred = Style::default().fg(Color::White);

            vec![
                Line::default(),
                Line::from(vec![
                    Span::styled(
                        "Time limit (seconds): ",
                        if *focus == SettingsField::TimeLimit {
                            focused
                        } else {
                            blurred
                        },
                    ),
                    Span::raw(format!("{time_limit_input}▏")),
                ]),
                Line::from(vec![
                    Span::styled(
                        "Sound: ",
                        if *focus == SettingsField::Sound {
                            focused
                        } else {
                            blurred
                        },
                    ),
                    Span::raw(if *sound_enabled { "on" } else { "off" }),
                    Span::styled("  (space toggles)", Style::default().fg(Color::DarkGray)),
                ]),
                Line::default(),
                notice_line(notice),
                Line::from(Span::styled(
                    "Tab — switch field    Enter — save    Esc — close",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
    };

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Settings"));

    frame.render_widget(paragraph, card);
}

fn notice_line(notice: &Option<String>) -> Line<'_> {
    match notice {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )),
        None => Line::default(),
    }
}
