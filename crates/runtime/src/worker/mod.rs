//! Background worker owning the session state and countdown.
//!
//! All mutation happens synchronously inside this task: commands arrive on
//! an mpsc channel, the 1 Hz countdown and the deferred question reveal are
//! `select!` branches of the same loop, so there is never more than one
//! execution context touching the state. At most one countdown deadline
//! exists per session; arming replaces it, which rules out double-expiry.
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};

use quiz_core::{GameState, PcgRng, QuizEngine, Transition, Verdict};

use crate::events::{Event, EventBus, SessionEvent, TimerEvent};
use crate::settings::Settings;

/// Countdown period.
const TICK_PERIOD: Duration = Duration::from_secs(1);
/// How long a correct-answer banner stays up before the next question.
const CORRECT_REVEAL_DELAY: Duration = Duration::from_millis(1500);
/// How long a miss, expiry, or stage-advance banner stays up.
const RESET_REVEAL_DELAY: Duration = Duration::from_millis(2000);

/// Commands that can be sent to the session worker
pub enum Command {
    Start {
        reply: oneshot::Sender<()>,
    },
    Submit {
        answer: Option<u32>,
        reply: oneshot::Sender<()>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    UpdateSettings {
        settings: Settings,
        reply: oneshot::Sender<()>,
    },
    QueryState {
        reply: oneshot::Sender<GameState>,
    },
}

/// Transitions held back until the feedback banner has been seen.
struct Deferred {
    deadline: Instant,
    transitions: Vec<Transition>,
}

/// Session worker that owns the engine state and processes commands.
pub struct SessionWorker {
    state: GameState,
    rng: PcgRng,
    bus: EventBus,
    /// Next countdown deadline; `None` while no countdown is armed.
    next_tick: Option<Instant>,
    deferred: Option<Deferred>,
    started_at: Option<Instant>,
}

impl SessionWorker {
    pub fn new(state: GameState, bus: EventBus) -> Self {
        Self {
            state,
            rng: PcgRng,
            bus,
            next_tick: None,
            deferred: None,
            started_at: None,
        }
    }

    /// Main worker loop
    pub async fn run(mut self, mut command_rx: mpsc::Receiver<Command>) {
        loop {
            let tick_at = self.next_tick;
            let reveal_at = self.deferred.as_ref().map(|d| d.deadline);

            tokio::select! {
                maybe_cmd = command_rx.recv() => {
                    match maybe_cmd {
                        Some(cmd) => self.handle_command(cmd),
                        // All handles dropped; nothing can reach us anymore.
                        None => break,
                    }
                }
                _ = async { time::sleep_until(tick_at.unwrap()).await }, if tick_at.is_some() => {
                    self.handle_tick();
                }
                _ = async { time::sleep_until(reveal_at.unwrap()).await }, if reveal_at.is_some() => {
                    self.reveal_deferred();
                }
            }
        }

        tracing::debug!("session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                self.cancel_pending();
                self.started_at = Some(Instant::now());
                let transitions = QuizEngine::new(&mut self.state).start(&self.rng);
                self.apply(transitions);
                let _ = reply.send(());
            }
            Command::Submit { answer, reply } => {
                if self.deferred.is_some() {
                    // Feedback is still on screen and the next question has
                    // not been revealed; same policy as submitting outside a
                    // session.
                    tracing::trace!("answer dropped during feedback window");
                } else {
                    let transitions = QuizEngine::new(&mut self.state).submit(answer, &self.rng);
                    self.apply(transitions);
                }
                let _ = reply.send(());
            }
            Command::Reset { reply } => {
                self.cancel_pending();
                self.started_at = None;
                let transitions = QuizEngine::new(&mut self.state).reset();
                self.apply(transitions);
                let _ = reply.send(());
            }
            Command::UpdateSettings { settings, reply } => {
                self.state.set_time_limit(settings.time_limit);
                tracing::debug!(time_limit = settings.time_limit, "settings applied");
                let _ = reply.send(());
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    fn handle_tick(&mut self) {
        let Some(deadline) = self.next_tick else {
            return;
        };

        let transitions = QuizEngine::new(&mut self.state).tick(&self.rng);
        if transitions.is_empty() {
            self.next_tick = None;
            return;
        }

        // Keep cadence from the previous deadline; the expiry path below
        // clears this again.
        self.next_tick = Some(deadline + TICK_PERIOD);
        self.apply(transitions);
    }

    fn reveal_deferred(&mut self) {
        if let Some(deferred) = self.deferred.take() {
            for transition in &deferred.transitions {
                self.publish(transition);
            }
        }
    }

    fn cancel_pending(&mut self) {
        self.next_tick = None;
        self.deferred = None;
    }

    /// Publishes a transition batch, holding back the next question (and its
    /// countdown) while a judgement or stage banner is on screen.
    fn apply(&mut self, transitions: Vec<Transition>) {
        let reveal_index = transitions
            .iter()
            .position(|t| matches!(t, Transition::QuestionIssued(_)));

        match (reveal_index, reveal_delay(&transitions)) {
            (Some(index), Some(delay)) => {
                for transition in &transitions[..index] {
                    self.publish(transition);
                }
                // Countdown halts while the banner shows; the deferred
                // TimerArmed re-arms it.
                self.next_tick = None;
                self.deferred = Some(Deferred {
                    deadline: Instant::now() + delay,
                    transitions: transitions[index..].to_vec(),
                });
            }
            _ => {
                for transition in &transitions {
                    self.publish(transition);
                }
            }
        }
    }

    fn publish(&mut self, transition: &Transition) {
        match *transition {
            Transition::Started => self.bus.publish(Event::Session(SessionEvent::Started)),
            Transition::Judged { verdict, expected } => self
                .bus
                .publish(Event::Session(SessionEvent::Feedback { verdict, expected })),
            Transition::ScoreChanged(score) => self
                .bus
                .publish(Event::Session(SessionEvent::ScoreChanged(score))),
            Transition::StageAdvanced { level, stage } => self
                .bus
                .publish(Event::Session(SessionEvent::StageAdvanced { level, stage })),
            Transition::ProgressReset => {
                self.bus.publish(Event::Session(SessionEvent::ProgressReset));
            }
            Transition::QuestionIssued(question) => {
                self.bus.publish(Event::Session(SessionEvent::QuestionIssued {
                    question,
                    level: self.state.level,
                    stage: self.state.stage,
                    question_index: self.state.question_index,
                }));
            }
            Transition::TimerArmed { limit } => {
                self.next_tick = Some(Instant::now() + TICK_PERIOD);
                self.bus
                    .publish(Event::Timer(TimerEvent::Tick { remaining: limit }));
            }
            Transition::Tick { remaining } => {
                self.bus
                    .publish(Event::Timer(TimerEvent::Tick { remaining }));
            }
            Transition::TimerExpired { expected } => {
                self.next_tick = None;
                self.bus
                    .publish(Event::Timer(TimerEvent::Expired { expected }));
            }
            Transition::Finished {
                completed,
                final_score,
                final_level,
            } => {
                self.next_tick = None;
                let elapsed_seconds = self
                    .started_at
                    .map(|at| at.elapsed().as_secs())
                    .unwrap_or_default();
                self.bus.publish(Event::Session(SessionEvent::GameEnded {
                    completed,
                    final_score,
                    final_level,
                    elapsed_seconds,
                }));
            }
            Transition::Cleared => {
                self.bus.publish(Event::Session(SessionEvent::SessionReset));
            }
        }
    }
}

/// How long to hold the next question back, if at all.
fn reveal_delay(transitions: &[Transition]) -> Option<Duration> {
    let mut delay = None;
    for transition in transitions {
        match transition {
            Transition::Judged {
                verdict: Verdict::Correct,
                ..
            } => delay = delay.or(Some(CORRECT_REVEAL_DELAY)),
            Transition::Judged {
                verdict: Verdict::Incorrect,
                ..
            }
            | Transition::TimerExpired { .. }
            | Transition::StageAdvanced { .. } => return Some(RESET_REVEAL_DELAY),
            _ => {}
        }
    }
    delay
}
