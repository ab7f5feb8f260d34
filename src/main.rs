//! countdown - a terminal countdown timer with a ring per time unit
//!
//! This is the entry point for the countdown binary.

use anyhow::Context;
use bubbletea_rs::Program;
use tracing::info;

use countdown_rings::{config, logging, widget, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    logging::init(&config).context("initializing logging")?;

    info!(
        "Starting countdown v{} (prefill {:?}, interval {}ms, autostart {})",
        env!("CARGO_PKG_VERSION"),
        config.duration_spec(),
        config.interval_ms,
        config.start
    );

    if config::install(config).is_err() {
        anyhow::bail!("configuration installed twice");
    }

    let program = Program::<widget::Model>::builder()
        .alt_screen(true)
        .build()?;
    program.run().await?;

    info!("countdown exited");
    Ok(())
}
