//! Client configuration structures and loaders.
use std::env;

/// Configuration required to bootstrap the runtime and UI.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Event bus capacity per topic.
    pub event_buffer: usize,
    /// Command queue size towards the session worker.
    pub command_buffer: usize,
    /// Maximum digits accepted in the answer field.
    pub answer_max_digits: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            event_buffer: 100,
            command_buffer: 32,
            answer_max_digits: 5,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DRILL_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `DRILL_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("DRILL_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("DRILL_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
