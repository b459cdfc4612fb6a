#![windows_subsystem = "windows"]

use anyhow::Result;
use portola::{config::Config, gui};
use tracing_subscriber;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Only the API base URL comes from the environment
    let config = Config::from_env()?;
    tracing::info!("Using transactions API at {}", config.api_base_url);
    gui::launch(config)?;

    Ok(())
}
