//! Run output assembly and the JSON/CSV writer
//!
//! One run produces, under `{base_dir}/{YYYY-MM-DD}/`:
//! - `{Country}/all_forecasts.json` per country, with the country's location
//!   results and the same results partitioned by category,
//! - `nordic_energy_weather_data.json`, the combined document for analysis,
//! - `weather_summary.csv`, one row per location with a daily summary.
//!
//! The directory stamp carries no time of day, so repeated runs on the same
//! date overwrite the previous output instead of accumulating.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::forecast::EnergyData;
use crate::locations::{Country, Location};
use crate::smhi::ForecastEntry;
use crate::Result;

/// Aggregated result for one successfully fetched location
#[derive(Debug, Clone, Serialize)]
pub struct LocationResult {
    pub location: Location,
    /// `None` when the forecast held no entries for the run date
    #[serde(rename = "energy_relevant_data")]
    pub energy: Option<EnergyData>,
    /// The raw entries for the run date, kept for downstream analysis
    pub raw_forecast: Vec<ForecastEntry>,
}

/// All results for one country. `attempted` counts fetch attempts including
/// failures; `results` holds successful fetches only.
#[derive(Debug, Clone)]
pub struct CountryResults {
    pub country: Country,
    pub attempted: usize,
    pub results: Vec<LocationResult>,
}

/// Everything one run produced, in registry order
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub generated_at: DateTime<Utc>,
    pub countries: Vec<CountryResults>,
}

impl RunOutput {
    /// Total fetch attempts across all countries
    #[must_use]
    pub fn total_locations(&self) -> usize {
        self.countries.iter().map(|c| c.attempted).sum()
    }
}

/// Paths written by [`write_run`]
#[derive(Debug)]
pub struct RunPaths {
    pub run_dir: PathBuf,
    pub combined_file: PathBuf,
    pub summary_file: PathBuf,
}

#[derive(Serialize)]
struct CountryDoc<'a> {
    locations: &'a [LocationResult],
    by_type: BTreeMap<&'static str, Vec<&'a LocationResult>>,
}

impl<'a> CountryDoc<'a> {
    /// Partition a country's results by location category
    fn new(results: &'a [LocationResult]) -> Self {
        let mut by_type: BTreeMap<&'static str, Vec<&'a LocationResult>> = BTreeMap::new();
        for result in results {
            by_type
                .entry(result.location.category.as_str())
                .or_default()
                .push(result);
        }
        Self {
            locations: results,
            by_type,
        }
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    timestamp: DateTime<Utc>,
    total_locations: usize,
    countries: Vec<&'a str>,
}

#[derive(Serialize)]
struct CombinedDoc<'a> {
    metadata: Metadata<'a>,
    forecasts: BTreeMap<&'static str, CountryDoc<'a>>,
}

/// One flattened row of the summary CSV. Field order is the column order.
#[derive(Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Country")]
    country: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Type")]
    category: &'a str,
    #[serde(rename = "Lat")]
    lat: f64,
    #[serde(rename = "Lon")]
    lon: f64,
    #[serde(rename = "Temp_Min")]
    temp_min: f64,
    #[serde(rename = "Temp_Max")]
    temp_max: f64,
    #[serde(rename = "Temp_Avg")]
    temp_avg: f64,
    #[serde(rename = "Wind_Avg")]
    wind_avg: f64,
    #[serde(rename = "Wind_Max")]
    wind_max: f64,
    #[serde(rename = "Precip_Total")]
    precip_total: f64,
    #[serde(rename = "Cloud_Avg")]
    cloud_avg: f64,
}

fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}

const SUMMARY_COLUMNS: [&str; 12] = [
    "Country",
    "Location",
    "Type",
    "Lat",
    "Lon",
    "Temp_Min",
    "Temp_Max",
    "Temp_Avg",
    "Wind_Avg",
    "Wind_Max",
    "Precip_Total",
    "Cloud_Avg",
];

fn write_summary_csv(path: &Path, output: &RunOutput) -> Result<()> {
    // Field values are written verbatim; location names are not escaped.
    // The header is written up front so it is present even when no location
    // produced a summary.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_path(path)?;
    writer.write_record(SUMMARY_COLUMNS)?;

    for country_results in &output.countries {
        for result in &country_results.results {
            let Some(energy) = &result.energy else {
                continue;
            };
            let summary = &energy.daily_summary;
            writer.serialize(SummaryRow {
                country: country_results.country.as_str(),
                location: &result.location.name,
                category: result.location.category.as_str(),
                lat: result.location.lat,
                lon: result.location.lon,
                temp_min: summary.temp_min,
                temp_max: summary.temp_max,
                temp_avg: summary.temp_avg,
                wind_avg: summary.wind_speed_avg,
                wind_max: summary.wind_speed_max,
                precip_total: summary.precipitation_total,
                cloud_avg: summary.cloud_cover_avg,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the full run output under a dated directory. Existing files from an
/// earlier run on the same date are overwritten.
pub fn write_run(output: &RunOutput, base_dir: &Path) -> Result<RunPaths> {
    let run_dir = base_dir.join(Utc::now().date_naive().format("%Y-%m-%d").to_string());
    fs::create_dir_all(&run_dir)?;

    let mut forecasts: BTreeMap<&'static str, CountryDoc<'_>> = BTreeMap::new();

    for country_results in &output.countries {
        let country_dir = run_dir.join(country_results.country.as_str());
        fs::create_dir_all(&country_dir)?;

        let doc = CountryDoc::new(&country_results.results);
        write_json(&country_dir.join("all_forecasts.json"), &doc)?;
        forecasts.insert(country_results.country.as_str(), doc);
    }

    let combined = CombinedDoc {
        metadata: Metadata {
            timestamp: output.generated_at,
            total_locations: output.total_locations(),
            countries: output
                .countries
                .iter()
                .map(|c| c.country.as_str())
                .collect(),
        },
        forecasts,
    };

    let combined_file = run_dir.join("nordic_energy_weather_data.json");
    write_json(&combined_file, &combined)?;

    let summary_file = run_dir.join("weather_summary.csv");
    write_summary_csv(&summary_file, output)?;

    info!("Wrote run output to {}", run_dir.display());

    println!("\nAll forecasts saved to: {}", run_dir.display());
    println!("  - Combined data: {}", combined_file.display());
    println!("  - Summary CSV: {}", summary_file.display());
    println!(
        "  - Country-specific files in: {}/[country]/all_forecasts.json",
        run_dir.display()
    );

    Ok(RunPaths {
        run_dir,
        combined_file,
        summary_file,
    })
}
