//! Bingo caller entry point.

use std::error::Error;
use std::sync::Arc;

use bingo_cli::app::App;
use bingo_cli::config::AppConfig;
use bingo_cli::terminal::Console;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting bingo caller");

    let config = AppConfig::from_env()?;
    tracing::info!(
        from = config.from,
        to = config.to,
        spin_ms = config.spin_ms,
        tick_ms = config.tick_ms,
        seeded = config.seed.is_some(),
        "configuration loaded"
    );

    let app = App::new(&config, Arc::new(Console::stdout()));
    app.run(BufReader::new(tokio::io::stdin())).await?;

    Ok(())
}
