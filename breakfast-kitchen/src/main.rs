use breakfast_core::StdoutWriter;
use breakfast_kitchen::breakfast::serve_breakfast;
use breakfast_kitchen::config::KitchenConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Diagnostics go to stderr; stdout carries the report lines only.
  let subscriber = FmtSubscriber::builder()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .finish();

  tracing::subscriber::set_global_default(subscriber)?;

  let config = KitchenConfig::from_env();

  info!(?config, "starting breakfast run");

  serve_breakfast(&config, Box::new(StdoutWriter)).await?;

  Ok(())
}
