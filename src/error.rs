//! Error types and handling for the `nordcast` pipeline

use thiserror::Error;

/// Main error type for the `nordcast` pipeline
#[derive(Error, Debug)]
pub enum NordcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network-level failure while fetching a forecast (connection error,
    /// timeout, unreadable body)
    #[error("Failed to fetch forecast for {location}: {source}")]
    Fetch {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream API answered with a non-success HTTP status
    #[error("Forecast request for {location} returned HTTP {status}")]
    Status {
        location: String,
        status: reqwest::StatusCode,
    },

    /// I/O operation errors (output directory and file writes)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization errors while writing output documents
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// CSV writer errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

impl NordcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error for a named location
    pub fn fetch<S: Into<String>>(location: S, source: reqwest::Error) -> Self {
        Self::Fetch {
            location: location.into(),
            source,
        }
    }

    /// Create a new HTTP status error for a named location
    pub fn status<S: Into<String>>(location: S, status: reqwest::StatusCode) -> Self {
        Self::Status {
            location: location.into(),
            status,
        }
    }
}
