//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the settings store so clients
//! can bubble them up with consistent context. Quiz-level outcomes (a miss,
//! an expiry) are never errors; the progress reset is the designed penalty.
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::settings::SettingsError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
