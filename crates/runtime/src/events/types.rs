//! Event types for each topic.
use quiz_core::{Question, Stage, Verdict};
use serde::{Deserialize, Serialize};

/// Events describing session progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A play session began.
    Started,

    /// A new question is ready to display.
    ///
    /// Carries the progression snapshot alongside the question so the UI can
    /// render header and progress without querying state.
    QuestionIssued {
        question: Question,
        level: u32,
        stage: Stage,
        question_index: u32,
    },

    ScoreChanged(u32),

    /// A submitted answer was judged.
    Feedback { verdict: Verdict, expected: u32 },

    /// A stage pass was completed; carries what is now being drilled.
    StageAdvanced { level: u32, stage: Stage },

    /// A miss or expiry collapsed progression back to the beginning.
    ProgressReset,

    /// The session ended.
    GameEnded {
        completed: bool,
        final_score: u32,
        final_level: u32,
        elapsed_seconds: u64,
    },

    /// Session cleared back to the welcome state.
    SessionReset,
}

/// Events from the countdown ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Seconds left on the current question. Also emitted once when the
    /// countdown is armed, carrying the full allowance.
    Tick { remaining: u16 },

    /// The countdown hit zero; the penalty transitions follow on the
    /// session topic.
    Expired { expected: u32 },
}
