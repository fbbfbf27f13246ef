//! Terminal client entry point.
mod app;
mod audio;
mod config;
mod event_loop;
mod input;
mod logging;
mod presentation;
mod state;

use anyhow::Result;

use app::App;
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Log to a file; the terminal belongs to the UI.
    let _log_guard = logging::init()?;

    let config = CliConfig::from_env();

    App::new(config).run().await
}
