//! `nordcast` - Nordic weather forecasts for electricity price forecasting
//!
//! This library fetches SMHI point forecasts for a fixed registry of
//! energy-relevant Nordic locations, filters them to the current UTC day,
//! aggregates daily summary statistics, and writes JSON and CSV output to a
//! dated directory tree.

pub mod config;
pub mod error;
pub mod forecast;
pub mod locations;
pub mod output;
pub mod pipeline;
pub mod smhi;

// Re-export core types for the public API
pub use config::AppConfig;
pub use error::NordcastError;
pub use forecast::{
    aggregate, entries_for_date, entries_for_today, DailySummary, EnergyData, HourlyObservation,
};
pub use locations::{nordic_registry, Country, Location, LocationCategory};
pub use output::{write_run, CountryResults, LocationResult, RunOutput, RunPaths};
pub use pipeline::RunReport;
pub use smhi::{ForecastEntry, Parameter, PointForecast, SmhiClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, NordcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
