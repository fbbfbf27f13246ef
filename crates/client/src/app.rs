//! Glue code tying the runtime, settings store, and terminal UI together.
use anyhow::Result;

use runtime::{Runtime, RuntimeConfig, SettingsStore};

use crate::audio;
use crate::config::CliConfig;
use crate::event_loop::EventLoop;
use crate::presentation::terminal;
use crate::state::AppState;

pub struct App {
    config: CliConfig,
}

impl App {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let store = SettingsStore::from_project_dirs()?;
        let settings = store.load();
        tracing::info!(
            time_limit = settings.time_limit,
            sound = settings.sound_enabled,
            "settings loaded"
        );

        let runtime = Runtime::builder()
            .config(RuntimeConfig {
                event_buffer_size: self.config.event_buffer,
                command_buffer_size: self.config.command_buffer,
                ..Default::default()
            })
            .settings(settings.clone())
            .build();

        let audio = match audio::spawn() {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!("audio disabled: {err}");
                None
            }
        };

        let mut terminal = terminal::init()?;
        let guard = terminal::TerminalGuard;

        let event_loop = EventLoop::new(
            runtime.handle(),
            AppState::new(settings),
            store,
            audio,
            self.config,
        );
        let result = event_loop.run(&mut terminal).await;

        drop(guard);
        runtime.shutdown().await?;
        tracing::info!("client exiting");

        result
    }
}
