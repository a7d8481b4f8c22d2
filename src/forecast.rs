//! Day-filtering and energy-relevant aggregation of SMHI forecasts
//!
//! The eight extracted parameters are the ones that move Nordic electricity
//! prices: temperature (heating demand), wind speed/direction/gusts (wind
//! power), precipitation (hydropower inflow), cloud cover (solar), pressure
//! and humidity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::smhi::{ForecastEntry, PointForecast};

/// One hour of energy-relevant weather values. Parameters missing from the
/// upstream entry stay `None` rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub time: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wind_gust: Option<f64>,
}

impl HourlyObservation {
    /// Extract the energy-relevant parameters from one forecast entry
    #[must_use]
    pub fn from_entry(entry: &ForecastEntry) -> Self {
        Self {
            time: entry.valid_time,
            temperature: entry.parameter("t"),
            wind_speed: entry.parameter("ws"),
            wind_direction: entry.parameter("wd"),
            precipitation: entry.parameter("pmean"),
            humidity: entry.parameter("r"),
            pressure: entry.parameter("msl"),
            cloud_cover: entry.parameter("tcc_mean"),
            wind_gust: entry.parameter("gust"),
        }
    }
}

/// Daily summary statistics over one location's hourly observations.
///
/// `temp_min`/`temp_max` start at the infinity sentinels and are only updated
/// when an observation carries a temperature; with no temperature data at all
/// they stay at the sentinels. Averages divide the sum of present values by
/// the total entry count, so missing values pull the average toward zero.
/// Both behaviors are part of the output contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_avg: f64,
    pub wind_speed_avg: f64,
    pub wind_speed_max: f64,
    pub precipitation_total: f64,
    pub cloud_cover_avg: f64,
}

impl Default for DailySummary {
    fn default() -> Self {
        Self {
            temp_min: f64::INFINITY,
            temp_max: f64::NEG_INFINITY,
            temp_avg: 0.0,
            wind_speed_avg: 0.0,
            wind_speed_max: 0.0,
            precipitation_total: 0.0,
            cloud_cover_avg: 0.0,
        }
    }
}

/// Hourly observations plus their daily summary for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyData {
    pub hourly_data: Vec<HourlyObservation>,
    pub daily_summary: DailySummary,
}

/// Entries of a forecast whose valid time falls on the given UTC date
#[must_use]
pub fn entries_for_date(forecast: &PointForecast, date: NaiveDate) -> Vec<ForecastEntry> {
    forecast
        .time_series
        .iter()
        .filter(|entry| entry.valid_time.date_naive() == date)
        .cloned()
        .collect()
}

/// Entries valid on the current UTC date. Evaluated per location, so a run
/// that straddles midnight may pick different dates for different locations.
#[must_use]
pub fn entries_for_today(forecast: &PointForecast) -> Vec<ForecastEntry> {
    entries_for_date(forecast, Utc::now().date_naive())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fold the day's entries into hourly observations and summary statistics.
/// Returns `None` for an empty day.
#[must_use]
pub fn aggregate(entries: &[ForecastEntry]) -> Option<EnergyData> {
    if entries.is_empty() {
        return None;
    }

    let mut summary = DailySummary::default();
    let mut hourly_data = Vec::with_capacity(entries.len());

    let mut temp_sum = 0.0;
    let mut wind_sum = 0.0;
    let mut cloud_sum = 0.0;
    let mut count = 0usize;

    for entry in entries {
        let hourly = HourlyObservation::from_entry(entry);

        if let Some(temp) = hourly.temperature {
            summary.temp_min = summary.temp_min.min(temp);
            summary.temp_max = summary.temp_max.max(temp);
            temp_sum += temp;
        }

        if let Some(wind) = hourly.wind_speed {
            wind_sum += wind;
            summary.wind_speed_max = summary.wind_speed_max.max(wind);
        }

        if let Some(precipitation) = hourly.precipitation {
            summary.precipitation_total += precipitation;
        }

        if let Some(cloud) = hourly.cloud_cover {
            cloud_sum += cloud;
        }

        count += 1;
        hourly_data.push(hourly);
    }

    // Denominator is the total entry count, not the count of present values
    summary.temp_avg = round1(temp_sum / count as f64);
    summary.wind_speed_avg = round1(wind_sum / count as f64);
    summary.cloud_cover_avg = round1(cloud_sum / count as f64);

    Some(EnergyData {
        hourly_data,
        daily_summary: summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smhi::Parameter;
    use chrono::TimeZone;
    use rstest::rstest;

    fn param(name: &str, value: f64) -> Parameter {
        Parameter {
            name: name.to_string(),
            level_type: None,
            level: None,
            unit: None,
            values: vec![value],
        }
    }

    fn entry(valid_time: &str, params: Vec<Parameter>) -> ForecastEntry {
        ForecastEntry {
            valid_time: valid_time.parse().unwrap(),
            parameters: params,
        }
    }

    #[test]
    fn test_filter_splits_on_utc_date() {
        let forecast = PointForecast {
            time_series: vec![
                entry("2024-01-15T22:00:00Z", vec![]),
                entry("2024-01-15T23:00:00Z", vec![]),
                entry("2024-01-16T00:00:00Z", vec![]),
            ],
        };

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let todays = entries_for_date(&forecast, date);
        assert_eq!(todays.len(), 2);
        for entry in &todays {
            assert_eq!(entry.valid_time.date_naive(), date);
        }
    }

    #[test]
    fn test_filter_empty_forecast() {
        let forecast = PointForecast {
            time_series: vec![],
        };
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(entries_for_date(&forecast, date).is_empty());
    }

    #[test]
    fn test_aggregate_empty_returns_none() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_aggregate_single_entry() {
        let entries = vec![entry(
            "2024-01-15T12:00:00Z",
            vec![
                param("t", 5.0),
                param("ws", 3.0),
                param("pmean", 1.2),
                param("tcc_mean", 50.0),
            ],
        )];

        let energy = aggregate(&entries).unwrap();
        let summary = &energy.daily_summary;
        assert_eq!(summary.temp_min, 5.0);
        assert_eq!(summary.temp_max, 5.0);
        assert_eq!(summary.temp_avg, 5.0);
        assert_eq!(summary.wind_speed_avg, 3.0);
        assert_eq!(summary.wind_speed_max, 3.0);
        assert_eq!(summary.precipitation_total, 1.2);
        assert_eq!(summary.cloud_cover_avg, 50.0);
        assert_eq!(energy.hourly_data.len(), 1);
    }

    #[test]
    fn test_average_denominator_is_total_entry_count() {
        // Only one of two entries has a temperature; the average still
        // divides by two.
        let entries = vec![
            entry("2024-01-15T12:00:00Z", vec![param("t", 10.0)]),
            entry("2024-01-15T13:00:00Z", vec![]),
        ];

        let energy = aggregate(&entries).unwrap();
        assert_eq!(energy.daily_summary.temp_avg, 5.0);
        assert_eq!(energy.daily_summary.temp_min, 10.0);
        assert_eq!(energy.daily_summary.temp_max, 10.0);
    }

    #[test]
    fn test_no_temperature_keeps_infinity_sentinels() {
        let entries = vec![entry("2024-01-15T12:00:00Z", vec![param("ws", 4.0)])];

        let energy = aggregate(&entries).unwrap();
        assert!(energy.daily_summary.temp_min.is_infinite());
        assert!(energy.daily_summary.temp_min.is_sign_positive());
        assert!(energy.daily_summary.temp_max.is_infinite());
        assert!(energy.daily_summary.temp_max.is_sign_negative());
        assert_eq!(energy.daily_summary.temp_avg, 0.0);
    }

    #[test]
    fn test_missing_parameters_become_none() {
        let entries = vec![entry("2024-01-15T12:00:00Z", vec![param("t", 1.0)])];
        let energy = aggregate(&entries).unwrap();
        let hourly = &energy.hourly_data[0];
        assert_eq!(hourly.temperature, Some(1.0));
        assert!(hourly.wind_speed.is_none());
        assert!(hourly.wind_gust.is_none());
        assert!(hourly.humidity.is_none());
    }

    #[rstest]
    #[case(vec![2.0, 4.0, 6.0], 4.0)]
    #[case(vec![1.0, 2.0], 1.5)]
    #[case(vec![0.04, 0.04, 0.04], 0.0)]
    fn test_temp_avg_rounded_to_one_decimal(#[case] temps: Vec<f64>, #[case] expected: f64) {
        let entries: Vec<ForecastEntry> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                entry(
                    &format!("2024-01-15T{:02}:00:00Z", i),
                    vec![param("t", *t)],
                )
            })
            .collect();

        let energy = aggregate(&entries).unwrap();
        assert_eq!(energy.daily_summary.temp_avg, expected);
    }

    #[rstest]
    #[case(vec![0.2, 0.0, 1.1], 1.3)]
    #[case(vec![], 0.0)]
    fn test_precipitation_total(#[case] amounts: Vec<f64>, #[case] expected: f64) {
        let entries: Vec<ForecastEntry> = if amounts.is_empty() {
            vec![entry("2024-01-15T00:00:00Z", vec![])]
        } else {
            amounts
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    entry(
                        &format!("2024-01-15T{:02}:00:00Z", i),
                        vec![param("pmean", *p)],
                    )
                })
                .collect()
        };

        let energy = aggregate(&entries).unwrap();
        let total = energy.daily_summary.precipitation_total;
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_wind_max_over_several_hours() {
        let entries = vec![
            entry("2024-01-15T00:00:00Z", vec![param("ws", 3.0)]),
            entry("2024-01-15T01:00:00Z", vec![param("ws", 9.5)]),
            entry("2024-01-15T02:00:00Z", vec![param("ws", 7.0)]),
        ];
        let energy = aggregate(&entries).unwrap();
        assert_eq!(energy.daily_summary.wind_speed_max, 9.5);
        assert_eq!(energy.daily_summary.wind_speed_avg, 6.5);
    }

    #[test]
    fn test_observation_time_matches_entry() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let entries = vec![entry("2024-01-15T12:00:00Z", vec![])];
        let energy = aggregate(&entries).unwrap();
        assert_eq!(energy.hourly_data[0].time, ts);
    }
}
