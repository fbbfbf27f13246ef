//! Deterministic drill logic shared across the runtime and offline tools.
//!
//! `quiz-core` defines the canonical rules of the multiplication drill: the
//! progression state machine, the question generator, and the countdown
//! bookkeeping. All state mutation flows through [`engine::QuizEngine`];
//! supporting crates depend on the types re-exported here. The crate performs
//! no I/O and holds no clocks, which keeps every transition unit-testable.
pub mod config;
pub mod engine;
pub mod question;
pub mod rng;
pub mod state;

pub use config::QuizConfig;
pub use engine::{QuizEngine, Transition, Verdict};
pub use question::Question;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use state::{GameState, Phase, Stage};
