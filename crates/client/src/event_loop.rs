//! Pumps runtime events, user input, and rendering.
//!
//! Three concerns share one `select!` loop: session events update the view
//! model, timer events drive the countdown display, and a frame-interval
//! tick polls the keyboard and expires stale feedback banners.
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyEvent, KeyEventKind};
use tokio::sync::broadcast::error::RecvError;
use tokio::time;

use quiz_core::{Stage, Verdict};
use runtime::{
    Event as RuntimeEvent, SessionEvent, SessionHandle, SettingsStore, TimerEvent, Topic,
};

use crate::audio::{AudioHandle, SoundKind};
use crate::config::CliConfig;
use crate::input::{InputHandler, KeyAction};
use crate::presentation::{terminal::Tui, ui};
use crate::state::{AppState, FeedbackKind, GameSummary, Screen, SettingsForm};

const FRAME_INTERVAL_MS: u64 = 16;

pub struct EventLoop {
    handle: SessionHandle,
    input: InputHandler,
    app_state: AppState,
    store: SettingsStore,
    audio: Option<AudioHandle>,
    config: CliConfig,
}

impl EventLoop {
    pub fn new(
        handle: SessionHandle,
        app_state: AppState,
        store: SettingsStore,
        audio: Option<AudioHandle>,
        config: CliConfig,
    ) -> Self {
        Self {
            handle,
            input: InputHandler,
            app_state,
            store,
            audio,
            config,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        let mut session_rx = self.handle.subscribe(Topic::Session);
        let mut timer_rx = self.handle.subscribe(Topic::Timer);

        self.render(terminal)?;

        loop {
            tokio::select! {
                result = session_rx.recv() => {
                    if self.handle_stream(result, terminal)? {
                        break;
                    }
                }
                result = timer_rx.recv() => {
                    if self.handle_stream(result, terminal)? {
                        break;
                    }
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(terminal).await? {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Applies one bus event. Returns true when the stream is gone and the
    /// client should exit.
    fn handle_stream(
        &mut self,
        result: std::result::Result<RuntimeEvent, RecvError>,
        terminal: &mut Tui,
    ) -> Result<bool> {
        match result {
            Ok(event) => {
                self.on_runtime_event(event);
                self.render(terminal)?;
                Ok(false)
            }
            Err(RecvError::Closed) => {
                tracing::warn!("event stream closed");
                Ok(true)
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("dropped {} stale events", skipped);
                Ok(false)
            }
        }
    }

    fn on_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Session(event) => self.on_session_event(event),
            RuntimeEvent::Timer(event) => self.on_timer_event(event),
        }
    }

    fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started => {
                self.app_state.clear_view();
                self.app_state.screen = Screen::Quiz;
                self.play(SoundKind::Start);
            }
            SessionEvent::QuestionIssued {
                question,
                level,
                stage,
                question_index,
            } => {
                let quiz = &mut self.app_state.quiz;
                quiz.question = Some(question);
                quiz.level = level;
                quiz.stage = stage;
                quiz.question_index = question_index;
                quiz.answer_input.clear();
                self.app_state.feedback = None;
            }
            SessionEvent::ScoreChanged(score) => {
                self.app_state.quiz.score = score;
            }
            SessionEvent::Feedback { verdict, expected } => match verdict {
                Verdict::Correct => {
                    self.app_state
                        .show_feedback("Correct! 🎉", FeedbackKind::Correct);
                    self.play(SoundKind::Correct);
                }
                Verdict::Incorrect => {
                    self.app_state.show_feedback(
                        format!("Wrong! The answer was {expected} 😔"),
                        FeedbackKind::Incorrect,
                    );
                    self.play(SoundKind::Incorrect);
                }
            },
            SessionEvent::StageAdvanced { level, stage } => {
                let quiz = &mut self.app_state.quiz;
                quiz.level = level;
                quiz.stage = stage;
                quiz.question_index = 0;
                quiz.question = None;
                let message = match stage {
                    Stage::Mixed => format!("{level}× table done! Now mixed questions… 🚀"),
                    Stage::Sequential => format!("Level up! Moving to the {level}× table… 🎯"),
                };
                self.app_state.show_feedback(message, FeedbackKind::Correct);
            }
            SessionEvent::ProgressReset => {
                // The banner from the judgement stays up; the view numbers
                // follow with the replacement question.
                tracing::debug!("progress reset");
            }
            SessionEvent::GameEnded {
                completed,
                final_score,
                final_level,
                elapsed_seconds,
            } => {
                self.app_state.screen = Screen::Results(GameSummary {
                    completed,
                    final_score,
                    final_level,
                    elapsed_seconds,
                });
                self.play(if completed {
                    SoundKind::Victory
                } else {
                    SoundKind::GameOver
                });
            }
            SessionEvent::SessionReset => {
                self.app_state.clear_view();
                self.app_state.screen = Screen::Welcome;
            }
        }
    }

    fn on_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick { remaining } => {
                self.app_state.quiz.time_remaining = remaining;
            }
            TimerEvent::Expired { expected } => {
                self.app_state.show_feedback(
                    format!("Time's up! The answer was {expected} ⏰"),
                    FeedbackKind::Incorrect,
                );
                self.play(SoundKind::TimeUp);
            }
        }
    }

    /// Keyboard poll and banner expiry, once per frame interval.
    async fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        let mut dirty = self.app_state.expire_feedback();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key).await? {
                        return Ok(true);
                    }
                    dirty = true;
                }
                TermEvent::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if dirty {
            self.render(terminal)?;
        }
        Ok(false)
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.input.handle_key(&self.app_state.screen, key) {
            KeyAction::Quit => return Ok(true),
            KeyAction::StartGame => self.handle.start().await?,
            KeyAction::SubmitAnswer => {
                // Anything unparseable counts as a mismatch, including an
                // empty field.
                let answer = self.app_state.quiz.answer_input.trim().parse::<u32>().ok();
                self.handle.submit(answer).await?;
            }
            KeyAction::InputChar(ch) => match &mut self.app_state.screen {
                Screen::Quiz => {
                    let input = &mut self.app_state.quiz.answer_input;
                    if input.len() < self.config.answer_max_digits {
                        input.push(ch);
                    }
                }
                Screen::Settings(form) => form.push_char(ch),
                _ => {}
            },
            KeyAction::Backspace => match &mut self.app_state.screen {
                Screen::Quiz => {
                    self.app_state.quiz.answer_input.pop();
                }
                Screen::Settings(form) => form.backspace(),
                _ => {}
            },
            KeyAction::OpenSettings => {
                self.app_state.screen = Screen::Settings(SettingsForm::locked());
            }
            KeyAction::CloseSettings => {
                self.app_state.screen = Screen::Welcome;
            }
            KeyAction::Confirm => self.confirm_settings().await?,
            KeyAction::NextField => {
                if let Screen::Settings(form) = &mut self.app_state.screen {
                    form.next_field();
                }
            }
            KeyAction::ResetGame => self.handle.reset().await?,
            KeyAction::None => {}
        }
        Ok(false)
    }

    /// Enter in the settings form: unlock attempt while locked, save once
    /// unlocked.
    async fn confirm_settings(&mut self) -> Result<()> {
        let parsed = {
            let current = self.app_state.settings.clone();
            let Screen::Settings(form) = &mut self.app_state.screen else {
                return Ok(());
            };
            match form {
                SettingsForm::Locked { .. } => {
                    form.try_unlock(&current);
                    None
                }
                SettingsForm::Unlocked { .. } => form.parse(),
            }
        };

        if let Some(settings) = parsed {
            if let Err(err) = self.store.save(&settings) {
                tracing::warn!("failed to persist settings: {err}");
            }
            self.handle.update_settings(settings.clone()).await?;
            self.app_state.settings = settings;
            self.app_state.screen = Screen::Welcome;
        }
        Ok(())
    }

    fn play(&self, kind: SoundKind) {
        if !self.app_state.settings.sound_enabled {
            return;
        }
        if let Some(audio) = &self.audio {
            audio.play(kind);
        }
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal.draw(|frame| ui::render(frame, &self.app_state))?;
        Ok(())
    }
}
