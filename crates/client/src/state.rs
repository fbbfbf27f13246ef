//! Client-side presentation state.
//!
//! Mirrors session events into a small view model the widgets render from.
//! Nothing in here is authoritative; the session worker owns the real state.
use std::time::{Duration, Instant};

use quiz_core::{Question, Stage};
use runtime::Settings;

/// How long a feedback banner stays on screen without replacement.
pub const FEEDBACK_TTL: Duration = Duration::from_secs(3);

/// Fixed literal gate for the settings editor. A UI nuisance gate, not an
/// auth mechanism: no attempt counting, no lockout.
const SETTINGS_PASSPHRASE: &str = "090909";

/// Accepted range for the per-question time allowance, in seconds.
const TIME_LIMIT_RANGE: std::ops::RangeInclusive<u16> = 5..=300;

/// Which screen the client is showing.
#[derive(Debug)]
pub enum Screen {
    Welcome,
    Quiz,
    Results(GameSummary),
    Settings(SettingsForm),
}

/// Final numbers shown on the results screen.
#[derive(Clone, Copy, Debug)]
pub struct GameSummary {
    pub completed: bool,
    pub final_score: u32,
    pub final_level: u32,
    pub elapsed_seconds: u64,
}

/// Progress snapshot mirrored from session events.
#[derive(Debug)]
pub struct QuizView {
    pub level: u32,
    pub stage: Stage,
    pub question_index: u32,
    pub score: u32,
    pub time_remaining: u16,
    pub question: Option<Question>,
    pub answer_input: String,
}

impl QuizView {
    fn new() -> Self {
        Self {
            level: 1,
            stage: Stage::Sequential,
            question_index: 0,
            score: 0,
            time_remaining: 0,
            question: None,
            answer_input: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// Transient banner below the question card.
#[derive(Debug)]
pub struct FeedbackBanner {
    pub text: String,
    pub kind: FeedbackKind,
    pub shown_at: Instant,
}

/// Top-level client state.
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub quiz: QuizView,
    pub feedback: Option<FeedbackBanner>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Welcome,
            quiz: QuizView::new(),
            feedback: None,
            settings,
        }
    }

    pub fn show_feedback(&mut self, text: impl Into<String>, kind: FeedbackKind) {
        self.feedback = Some(FeedbackBanner {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Clears a stale banner. Returns true if something was cleared.
    pub fn expire_feedback(&mut self) -> bool {
        match &self.feedback {
            Some(banner) if banner.shown_at.elapsed() >= FEEDBACK_TTL => {
                self.feedback = None;
                true
            }
            _ => false,
        }
    }

    /// Resets the view for a fresh session or a return to the welcome screen.
    pub fn clear_view(&mut self) {
        self.quiz = QuizView::new();
        self.feedback = None;
    }
}

/// Field focus inside the unlocked settings form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    TimeLimit,
    Sound,
}

/// Passphrase-gated settings editor state.
#[derive(Debug)]
pub enum SettingsForm {
    Locked {
        passphrase_input: String,
        notice: Option<String>,
    },
    Unlocked {
        time_limit_input: String,
        sound_enabled: bool,
        focus: SettingsField,
        notice: Option<String>,
    },
}

impl SettingsForm {
    pub fn locked() -> Self {
        Self::Locked {
            passphrase_input: String::new(),
            notice: None,
        }
    }

    /// Checks the entered passphrase; on success the editor opens prefilled
    /// with the current settings.
    pub fn try_unlock(&mut self, current: &Settings) {
        let Self::Locked {
            passphrase_input,
            notice,
        } = self
        else {
            return;
        };

        if passphrase_input == SETTINGS_PASSPHRASE {
            *self = Self::Unlocked {
                time_limit_input: current.time_limit.to_string(),
                sound_enabled: current.sound_enabled,
                focus: SettingsField::TimeLimit,
                notice: None,
            };
        } else {
            passphrase_input.clear();
            *notice = Some("Wrong passphrase".into());
        }
    }

    pub fn push_char(&mut self, ch: char) {
        match self {
            Self::Locked {
                passphrase_input, ..
            } => {
                if passphrase_input.len() < 16 {
                    passphrase_input.push(ch);
                }
            }
            Self::Unlocked {
                time_limit_input,
                sound_enabled,
                focus,
                ..
            } => match focus {
                SettingsField::TimeLimit => {
                    if ch.is_ascii_digit() && time_limit_input.len() < 3 {
                        time_limit_input.push(ch);
                    }
                }
                SettingsField::Sound => {
                    if ch == ' ' {
                        *sound_enabled = !*sound_enabled;
                    }
                }
            },
        }
    }

    pub fn backspace(&mut self) {
        match self {
            Self::Locked {
                passphrase_input, ..
            } => {
                passphrase_input.pop();
            }
            Self::Unlocked {
                time_limit_input,
                focus: SettingsField::TimeLimit,
                ..
            } => {
                time_limit_input.pop();
            }
            Self::Unlocked { .. } => {}
        }
    }

    pub fn next_field(&mut self) {
        if let Self::Unlocked { focus, .. } = self {
            *focus = match focus {
                SettingsField::TimeLimit => SettingsField::Sound,
                SettingsField::Sound => SettingsField::TimeLimit,
            };
        }
    }

    /// Validates the form into a settings value, or records a notice.
    pub fn parse(&mut self) -> Option<Settings> {
        let Self::Unlocked {
            time_limit_input,
            sound_enabled,
            notice,
            ..
        } = self
        else {
            return None;
        };

        match time_limit_input.parse::<u16>() {
            Ok(seconds) if TIME_LIMIT_RANGE.contains(&seconds) => Some(Settings {
                time_limit: seconds,
                sound_enabled: *sound_enabled,
            }),
            _ => {
                *notice = Some(format!(
                    "Time limit must be {}-{} seconds",
                    TIME_LIMIT_RANGE.start(),
                    TIME_LIMIT_RANGE.end()
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_passphrase_keeps_the_form_locked() {
        let mut form = SettingsForm::locked();
        for ch in "123456".chars() {
            form.push_char(ch);
        }
        form.try_unlock(&Settings::default());

        match form {
            SettingsForm::Locked {
                passphrase_input,
                notice,
            } => {
                assert!(passphrase_input.is_empty());
                assert!(notice.is_some());
            }
            other => panic!("form unexpectedly unlocked: {other:?}"),
        }
    }

    #[test]
    fn correct_passphrase_opens_prefilled_editor() {
        let settings = Settings {
            time_limit: 45,
            sound_enabled: false,
        };
        let mut form = SettingsForm::locked();
        for ch in "090909".chars() {
            form.push_char(ch);
        }
        form.try_unlock(&settings);

        match form {
            SettingsForm::Unlocked {
                time_limit_input,
                sound_enabled,
                ..
            } => {
                assert_eq!(time_limit_input, "45");
                assert!(!sound_enabled);
            }
            other => panic!("form still locked: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_time_limit_is_rejected() {
        let mut form = SettingsForm::Unlocked {
            time_limit_input: "3".into(),
            sound_enabled: true,
            focus: SettingsField::TimeLimit,
            notice: None,
        };
        assert!(form.parse().is_none());

        let mut form = SettingsForm::Unlocked {
            time_limit_input: "60".into(),
            sound_enabled: true,
            focus: SettingsField::TimeLimit,
            notice: None,
        };
        let settings = form.parse().expect("valid form");
        assert_eq!(settings.time_limit, 60);
    }

    #[test]
    fn stale_feedback_expires() {
        let mut state = AppState::new(Settings::default());
        state.show_feedback("Correct!", FeedbackKind::Correct);
        assert!(!state.expire_feedback());

        state.feedback.as_mut().unwrap().shown_at = Instant::now() - FEEDBACK_TTL;
        assert!(state.expire_feedback());
        assert!(state.feedback.is_none());
    }
}
