//! Cloneable façade for issuing commands to the runtime.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use quiz_core::GameState;

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::settings::Settings;
use crate::worker::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Begin a play session. No-op if one is already running.
    pub async fn start(&self) -> Result<()> {
        self.send(|reply| Command::Start { reply }).await
    }

    /// Submit an answer for the outstanding question.
    ///
    /// `None` stands for non-numeric input and is judged as a mismatch.
    /// Ignored outside a session or while feedback is on screen.
    pub async fn submit(&self, answer: Option<u32>) -> Result<()> {
        self.send(|reply| Command::Submit { answer, reply }).await
    }

    /// Abandon the session and return to the idle state.
    pub async fn reset(&self) -> Result<()> {
        self.send(|reply| Command::Reset { reply }).await
    }

    /// Apply new settings; the time allowance takes effect from the next
    /// armed countdown.
    pub async fn update_settings(&self, settings: Settings) -> Result<()> {
        self.send(|reply| Command::UpdateSettings { settings, reply })
            .await
    }

    /// Query the current session state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Questions, judgements, resets, game end
    /// - `Topic::Timer` - Countdown ticks and expiry
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn send(&self, make: impl FnOnce(oneshot::Sender<()>) -> Command) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
