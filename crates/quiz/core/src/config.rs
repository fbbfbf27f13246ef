/// Drill configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuizConfig {
    /// Seconds allowed per question before the countdown expires.
    pub time_limit: u16,
}

impl QuizConfig {
    // ===== fixed rule constants =====
    /// Questions in each stage pass (Sequential covers multiplicands 1..10).
    pub const QUESTIONS_PER_STAGE: u32 = 10;
    /// Highest multiplicand level; completing its Mixed pass ends the game.
    pub const MAX_LEVEL: u32 = 10;
    /// Score awarded per correct answer.
    pub const REWARD_PER_CORRECT: u32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIME_LIMIT: u16 = 30;

    pub fn new() -> Self {
        Self {
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    pub fn with_time_limit(time_limit: u16) -> Self {
        Self { time_limit }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new()
    }
}
