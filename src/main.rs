use anyhow::Result;
use botwatch::{config::Config, ui::App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (to stderr, not the terminal the TUI owns)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting botwatch");

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        "Polling {} every {}ms",
        config.server.base_url,
        config.ui.poll_interval_ms
    );

    // Run the application
    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
