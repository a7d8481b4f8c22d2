//! Run orchestration: fetch, aggregate, write
//!
//! Countries are processed strictly sequentially in registry order. Within a
//! country the locations are fetched by a bounded pool of concurrent workers,
//! and the country's aggregation only starts once every fetch has completed
//! or failed. A failed fetch drops that location from the output and is
//! counted in the final summary.

use anyhow::{Context, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::config::AppConfig;
use crate::forecast::{aggregate, entries_for_today};
use crate::locations::{nordic_registry, Location};
use crate::output::{write_run, CountryResults, LocationResult, RunOutput, RunPaths};
use crate::smhi::{PointForecast, SmhiClient};

/// Fetch counts for one run. `total == successful + failed` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Fetch all locations of one country through a bounded worker pool and wait
/// for the pool to drain. After consuming each completed fetch the loop
/// pauses briefly to avoid hammering the API.
async fn fetch_country(
    client: &SmhiClient,
    locations: Vec<Location>,
    config: &AppConfig,
) -> Vec<(Location, Option<PointForecast>)> {
    let delay = Duration::from_millis(config.fetch.completion_delay_ms);

    let mut completions = stream::iter(locations.into_iter().map(|location| async move {
        let outcome = client.fetch(&location).await;
        (location, outcome)
    }))
    .buffer_unordered(config.fetch.workers);

    let mut fetched = Vec::new();
    while let Some((location, outcome)) = completions.next().await {
        match outcome {
            Ok(forecast) => {
                println!("  ✓ {} ({})", location.name, location.category);
                fetched.push((location, Some(forecast)));
            }
            Err(error) => {
                warn!("{error}");
                println!("  ✗ {} ({}) - Failed", location.name, location.category);
                fetched.push((location, None));
            }
        }
        tokio::time::sleep(delay).await;
    }
    fetched
}

/// Filter a country's fetched forecasts to today and aggregate per location.
/// Locations whose fetch failed are excluded here.
fn aggregate_country(fetched: Vec<(Location, Option<PointForecast>)>) -> Vec<LocationResult> {
    fetched
        .into_iter()
        .filter_map(|(location, forecast)| {
            let forecast = forecast?;
            let todays_entries = entries_for_today(&forecast);
            Some(LocationResult {
                location,
                energy: aggregate(&todays_entries),
                raw_forecast: todays_entries,
            })
        })
        .collect()
}

/// Run the full pipeline: fetch every registry location, aggregate, write the
/// output tree, and print the fetch summary. Individual fetch failures never
/// abort the run; only configuration and write errors do.
pub async fn run(config: &AppConfig) -> Result<RunReport> {
    let client = SmhiClient::new(config).with_context(|| "Failed to create SMHI client")?;
    let registry = nordic_registry();
    let total: usize = registry.iter().map(|(_, locations)| locations.len()).sum();

    println!("\nFetching forecasts for {total} locations across Nordic countries...");
    println!(
        "This includes major cities, hydropower regions, wind power areas, and industrial centers.\n"
    );

    let mut countries = Vec::new();
    for (country, locations) in registry {
        println!("\nProcessing {country} ({} locations)...", locations.len());

        let attempted = locations.len();
        let fetched = fetch_country(&client, locations, config).await;
        let results = aggregate_country(fetched);

        countries.push(CountryResults {
            country,
            attempted,
            results,
        });
    }

    let output = RunOutput {
        generated_at: Utc::now(),
        countries,
    };

    println!("\nSaving forecast data...");
    let _paths: RunPaths = write_run(&output, Path::new(&config.output.base_dir))
        .with_context(|| format!("Failed to write output under {}", config.output.base_dir))?;

    let successful: usize = output.countries.iter().map(|c| c.results.len()).sum();
    let report = RunReport {
        total,
        successful,
        failed: total - successful,
    };

    println!("\nFetch Summary:");
    println!("  - Total locations: {}", report.total);
    println!("  - Successful: {}", report.successful);
    println!("  - Failed: {}", report.failed);

    Ok(report)
}
