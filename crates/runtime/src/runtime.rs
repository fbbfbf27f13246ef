//! High-level runtime orchestrator.
//!
//! The runtime spawns the session worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the drill.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use quiz_core::{GameState, QuizConfig};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::events::EventBus;
use crate::settings::Settings;
use crate::worker::SessionWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub quiz: QuizConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            quiz: QuizConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that owns the session worker.
///
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: SessionHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Dropping the last handle closes the command channel, which stops the
    /// worker loop.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    settings: Option<Settings>,
    game_seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            settings: None,
            game_seed: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply persisted settings (time allowance) to the session.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Fix the Mixed-stage generation seed. Defaults to entropy.
    pub fn game_seed(mut self, seed: u64) -> Self {
        self.game_seed = Some(seed);
        self
    }

    /// Spawn the worker and return the runtime. Must be called from within
    /// a tokio context.
    pub fn build(self) -> Runtime {
        let mut quiz = self.config.quiz.clone();
        if let Some(settings) = &self.settings {
            quiz.time_limit = settings.time_limit;
        }

        let game_seed = self.game_seed.unwrap_or_else(rand::random);
        let state = GameState::with_seed(game_seed, &quiz);

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let worker = SessionWorker::new(state, event_bus.clone());
        let worker_handle = tokio::spawn(worker.run(command_rx));

        Runtime {
            handle: SessionHandle::new(command_tx, event_bus),
            worker_handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, SessionEvent, TimerEvent, Topic};
    use quiz_core::{Phase, Stage, Verdict};
    use tokio::sync::broadcast;
    use tokio::time::Instant;

    fn test_runtime(time_limit: u16) -> Runtime {
        Runtime::builder()
            .config(RuntimeConfig {
                quiz: QuizConfig::with_time_limit(time_limit),
                ..Default::default()
            })
            .game_seed(7)
            .build()
    }

    async fn next_session(rx: &mut broadcast::Receiver<Event>) -> SessionEvent {
        match rx.recv().await.expect("session stream open") {
            Event::Session(event) => event,
            other => panic!("expected session event, got {other:?}"),
        }
    }

    async fn next_timer(rx: &mut broadcast::Receiver<Event>) -> TimerEvent {
        match rx.recv().await.expect("timer stream open") {
            Event::Timer(event) => event,
            other => panic!("expected timer event, got {other:?}"),
        }
    }

    async fn started_question(
        handle: &SessionHandle,
        session: &mut broadcast::Receiver<Event>,
    ) -> quiz_core::Question {
        handle.start().await.unwrap();
        assert!(matches!(
            next_session(session).await,
            SessionEvent::Started
        ));
        match next_session(session).await {
            SessionEvent::QuestionIssued { question, .. } => question,
            other => panic!("expected first question, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_issues_question_and_arms_countdown() {
        let runtime = test_runtime(30);
        let handle = runtime.handle();
        let mut session = handle.subscribe(Topic::Session);
        let mut timer = handle.subscribe(Topic::Timer);

        let question = started_question(&handle, &mut session).await;
        assert_eq!(question.num1, 1);
        assert_eq!(question.num2, 1);

        assert!(matches!(
            next_timer(&mut timer).await,
            TimerEvent::Tick { remaining: 30 }
        ));
        assert!(matches!(
            next_timer(&mut timer).await,
            TimerEvent::Tick { remaining: 29 }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn correct_answer_rewards_then_reveals_next_question() {
        let runtime = test_runtime(30);
        let handle = runtime.handle();
        let mut session = handle.subscribe(Topic::Session);

        let question = started_question(&handle, &mut session).await;
        let before = Instant::now();
        handle.submit(Some(question.expected_answer)).await.unwrap();

        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::Feedback {
                verdict: Verdict::Correct,
                ..
            }
        ));
        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::ScoreChanged(10)
        ));

        match next_session(&mut session).await {
            SessionEvent::QuestionIssued { question_index, .. } => {
                assert_eq!(question_index, 1);
            }
            other => panic!("expected next question, got {other:?}"),
        }
        // The reveal was held back while the banner showed.
        assert!(before.elapsed().as_millis() >= 1_500);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_answer_collapses_and_drops_answers_meanwhile() {
        let runtime = test_runtime(30);
        let handle = runtime.handle();
        let mut session = handle.subscribe(Topic::Session);

        let question = started_question(&handle, &mut session).await;
        handle
            .submit(Some(question.expected_answer + 1))
            .await
            .unwrap();
        // Lands in the feedback window and must be ignored.
        handle.submit(Some(question.expected_answer)).await.unwrap();

        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::Feedback {
                verdict: Verdict::Incorrect,
                ..
            }
        ));
        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::ProgressReset
        ));
        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::ScoreChanged(0)
        ));
        match next_session(&mut session).await {
            SessionEvent::QuestionIssued { level, stage, .. } => {
                assert_eq!(level, 1);
                assert_eq!(stage, Stage::Sequential);
            }
            other => panic!("expected replacement question, got {other:?}"),
        }

        let state = handle.query_state().await.unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, Phase::AwaitingAnswer);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expiry_resets_progress_and_stops_ticking() {
        // Scenario D with a three-second allowance.
        let runtime = test_runtime(3);
        let handle = runtime.handle();
        let mut session = handle.subscribe(Topic::Session);
        let mut timer = handle.subscribe(Topic::Timer);

        started_question(&handle, &mut session).await;

        for expected_remaining in [3u16, 2, 1, 0] {
            match next_timer(&mut timer).await {
                TimerEvent::Tick { remaining } => assert_eq!(remaining, expected_remaining),
                other => panic!("expected tick, got {other:?}"),
            }
        }
        let expired_at = Instant::now();
        assert!(matches!(
            next_timer(&mut timer).await,
            TimerEvent::Expired { .. }
        ));

        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::ProgressReset
        ));
        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::ScoreChanged(0)
        ));

        // The ticker stays silent until the deferred reveal re-arms it.
        match next_timer(&mut timer).await {
            TimerEvent::Tick { remaining } => assert_eq!(remaining, 3),
            other => panic!("expected re-arm tick, got {other:?}"),
        }
        assert!(expired_at.elapsed().as_millis() >= 2_000);

        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::QuestionIssued { level: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn updated_time_limit_applies_to_next_question() {
        let runtime = test_runtime(30);
        let handle = runtime.handle();
        let mut session = handle.subscribe(Topic::Session);

        let question = started_question(&handle, &mut session).await;

        handle
            .update_settings(Settings {
                time_limit: 10,
                sound_enabled: false,
            })
            .await
            .unwrap();
        assert_eq!(handle.query_state().await.unwrap().time_limit, 10);

        handle.submit(Some(question.expected_answer)).await.unwrap();
        // Countdown is halted during the feedback window, so the next timer
        // event is the re-arm with the new allowance.
        let mut timer = handle.subscribe(Topic::Timer);
        assert!(matches!(
            next_timer(&mut timer).await,
            TimerEvent::Tick { remaining: 10 }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_idle() {
        let runtime = test_runtime(30);
        let handle = runtime.handle();
        let mut session = handle.subscribe(Topic::Session);

        started_question(&handle, &mut session).await;
        handle.reset().await.unwrap();

        assert!(matches!(
            next_session(&mut session).await,
            SessionEvent::SessionReset
        ));
        let state = handle.query_state().await.unwrap();
        assert_eq!(state.phase, Phase::NotStarted);
        assert!(state.current.is_none());
    }
}
