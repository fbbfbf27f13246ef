//! Runtime orchestration for the drill session.
//!
//! This crate wires the pure engine from `quiz-core` into a running
//! application: a background worker task owns the session state, drives the
//! one-second countdown, and sequences feedback delays; clients interact
//! through [`SessionHandle`] and subscribe to topics on the event bus.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`settings`] persists player settings across runs
//! - `worker` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod settings;

mod worker;

pub use api::{Result, RuntimeError, SessionHandle};
pub use events::{Event, EventBus, SessionEvent, TimerEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use settings::{Settings, SettingsError, SettingsStore};
