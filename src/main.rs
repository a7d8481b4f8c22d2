use anyhow::Result;
use nordcast::{pipeline, AppConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    println!("Nordic Weather Forecast Fetcher for Energy Price Forecasting");
    println!("{}", "=".repeat(60));

    let report = pipeline::run(&config).await?;

    println!("\nData includes energy-relevant parameters:");
    println!("  - Temperature (min, max, average)");
    println!("  - Wind speed and direction (crucial for wind power)");
    println!("  - Precipitation (affects hydropower)");
    println!("  - Cloud cover (affects solar in summer)");
    println!("  - Atmospheric pressure and humidity");

    tracing::info!(
        "Run complete: {}/{} locations fetched",
        report.successful,
        report.total
    );

    // Partial fetch failures are reported above but never fail the process
    Ok(())
}
