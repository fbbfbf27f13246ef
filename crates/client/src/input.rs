//! Input processing for the terminal client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::Screen;

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Begin a play session from the welcome screen.
    StartGame,
    /// Submit the typed answer.
    SubmitAnswer,
    /// Append a character to the focused text input.
    InputChar(char),
    Backspace,
    /// Open the passphrase-gated settings form.
    OpenSettings,
    /// Close the settings form without saving.
    CloseSettings,
    /// Confirm the settings form (unlock attempt or save).
    Confirm,
    /// Move focus to the next settings field.
    NextField,
    /// Abandon the session and return to the welcome screen.
    ResetGame,
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into commands based on the visible screen.
pub struct InputHandler;

impl InputHandler {
    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&self, screen: &Screen, key: KeyEvent) -> KeyAction {
        // Global chords first.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => KeyAction::Quit,
                KeyCode::Char('r') => KeyAction::ResetGame,
                KeyCode::Char('s') if matches!(screen, Screen::Welcome) => KeyAction::OpenSettings,
                _ => KeyAction::None,
            };
        }

        match screen {
            Screen::Welcome => match key.code {
                KeyCode::Enter => KeyAction::StartGame,
                KeyCode::Char('s') => KeyAction::OpenSettings,
                KeyCode::Char('q') => KeyAction::Quit,
                _ => KeyAction::None,
            },
            Screen::Quiz => match key.code {
                KeyCode::Enter => KeyAction::SubmitAnswer,
                KeyCode::Backspace => KeyAction::Backspace,
                KeyCode::Esc => KeyAction::ResetGame,
                KeyCode::Char(ch) if ch.is_ascii_digit() => KeyAction::InputChar(ch),
                _ => KeyAction::None,
            },
            Screen::Results(_) => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => KeyAction::ResetGame,
                KeyCode::Char('q') => KeyAction::Quit,
                _ => KeyAction::None,
            },
            Screen::Settings(_) => match key.code {
                KeyCode::Enter => KeyAction::Confirm,
                KeyCode::Esc => KeyAction::CloseSettings,
                KeyCode::Tab => KeyAction::NextField,
                KeyCode::Backspace => KeyAction::Backspace,
                KeyCode::Char(ch) => KeyAction::InputChar(ch),
                _ => KeyAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SettingsForm;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn welcome_screen_starts_and_opens_settings() {
        let handler = InputHandler;
        assert_eq!(
            handler.handle_key(&Screen::Welcome, key(KeyCode::Enter)),
            KeyAction::StartGame
        );
        assert_eq!(
            handler.handle_key(&Screen::Welcome, key(KeyCode::Char('s'))),
            KeyAction::OpenSettings
        );
        assert_eq!(
            handler.handle_key(&Screen::Welcome, key(KeyCode::Char('q'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn quiz_screen_accepts_only_digits() {
        let handler = InputHandler;
        assert_eq!(
            handler.handle_key(&Screen::Quiz, key(KeyCode::Char('7'))),
            KeyAction::InputChar('7')
        );
        assert_eq!(
            handler.handle_key(&Screen::Quiz, key(KeyCode::Char('x'))),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key(&Screen::Quiz, key(KeyCode::Enter)),
            KeyAction::SubmitAnswer
        );
        assert_eq!(
            handler.handle_key(&Screen::Quiz, key(KeyCode::Esc)),
            KeyAction::ResetGame
        );
    }

    #[test]
    fn control_chords_work_everywhere() {
        let handler = InputHandler;
        assert_eq!(handler.handle_key(&Screen::Quiz, ctrl('c')), KeyAction::Quit);
        assert_eq!(
            handler.handle_key(&Screen::Quiz, ctrl('r')),
            KeyAction::ResetGame
        );
        assert_eq!(
            handler.handle_key(&Screen::Welcome, ctrl('s')),
            KeyAction::OpenSettings
        );
        // No settings shortcut mid-quiz.
        assert_eq!(handler.handle_key(&Screen::Quiz, ctrl('s')), KeyAction::None);
    }

    #[test]
    fn settings_screen_routes_form_keys() {
        let handler = InputHandler;
        let screen = Screen::Settings(SettingsForm::locked());
        assert_eq!(
            handler.handle_key(&screen, key(KeyCode::Enter)),
            KeyAction::Confirm
        );
        assert_eq!(
            handler.handle_key(&screen, key(KeyCode::Esc)),
            KeyAction::CloseSettings
        );
        assert_eq!(
            handler.handle_key(&screen, key(KeyCode::Tab)),
            KeyAction::NextField
        );
        assert_eq!(
            handler.handle_key(&screen, key(KeyCode::Char('0'))),
            KeyAction::InputChar('0')
        );
    }
}
