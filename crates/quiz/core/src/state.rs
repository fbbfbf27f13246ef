//! Authoritative session state representation.
//!
//! This module owns the data that describes one play session: lifecycle
//! phase, progression (level, stage, question index), score, and countdown
//! bookkeeping. Runtime layers clone or query this state but mutate it
//! exclusively through the engine.
use crate::config::QuizConfig;
use crate::question::Question;

/// Lifecycle phase of a play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Welcome screen; no question outstanding.
    #[default]
    NotStarted,
    /// A question has been issued and the countdown is running.
    AwaitingAnswer,
    /// The final Mixed pass at the top level was completed.
    Finished,
}

/// Question phase within a level.
///
/// Each level is drilled in two passes: a Sequential pass stepping the
/// multiplicand 1..10 in order, then a Mixed pass with random multiplicands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    #[default]
    Sequential,
    Mixed,
}

/// Canonical snapshot of one drill session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub phase: Phase,
    /// Multiplicand level being drilled, 1..=10.
    pub level: u32,
    pub stage: Stage,
    /// Position within the current stage pass, 0..=9.
    pub question_index: u32,
    pub score: u32,
    /// Seconds allowed per question.
    pub time_limit: u16,
    /// Seconds left on the current question's countdown.
    pub time_remaining: u16,
    /// The outstanding question, if any. Immutable once issued.
    pub current: Option<Question>,

    /// RNG seed for deterministic Mixed-stage generation.
    ///
    /// Set once at session initialization and never modified. Combined with
    /// `nonce` to derive a unique seed for each issued question.
    pub game_seed: u64,
    /// Monotone counter of issued questions, mixed into per-question seeds.
    pub nonce: u64,
}

impl GameState {
    /// Creates a fresh idle state with the default seed.
    pub fn new(config: &QuizConfig) -> Self {
        Self::with_seed(0, config)
    }

    /// Creates a fresh idle state with a specific game seed.
    pub fn with_seed(game_seed: u64, config: &QuizConfig) -> Self {
        Self {
            phase: Phase::NotStarted,
            level: 1,
            stage: Stage::Sequential,
            question_index: 0,
            score: 0,
            time_limit: config.time_limit,
            time_remaining: 0,
            current: None,
            game_seed,
            nonce: 0,
        }
    }

    /// Whether a game is in progress (between start and end-of-game).
    pub fn is_active(&self) -> bool {
        self.phase == Phase::AwaitingAnswer
    }

    /// Changes the per-question time allowance.
    ///
    /// Applies from the next issued question; an already-running countdown
    /// keeps its remaining time.
    pub fn set_time_limit(&mut self, seconds: u16) {
        self.time_limit = seconds;
    }

    /// Returns all fields to their idle values, keeping seed and settings.
    pub(crate) fn clear(&mut self) {
        self.phase = Phase::NotStarted;
        self.collapse_progress();
        self.time_remaining = 0;
        self.current = None;
    }

    /// Collapses progression to the very beginning of level 1.
    pub(crate) fn collapse_progress(&mut self) {
        self.level = 1;
        self.stage = Stage::Sequential;
        self.question_index = 0;
        self.score = 0;
    }
}
