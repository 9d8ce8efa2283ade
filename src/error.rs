//! Error types for climate-heatmap operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, laying out, or writing the heatmap.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level HTTP failure (DNS, TLS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body is not a valid dataset document.
    #[error("Malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid chart dimensions (no room left for the plot area).
    #[error("Invalid dimensions: {width}x{height} with padding {padding}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
        /// Padding around the plot area.
        padding: u32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A record carries a month outside 1..=12.
    #[error("Invalid month {month} for year {year} (expected 1-12)")]
    InvalidMonth {
        /// Year of the offending record.
        year: i32,
        /// Month value as found in the input.
        month: u32,
    },

    /// Base temperature or a variance is NaN or infinite.
    #[error("Non-finite {field} in dataset")]
    NonFinite {
        /// Which value was not finite.
        field: String,
    },

    /// Two records share the same (year, month) pair.
    #[error("Duplicate record for {year}-{month:02}")]
    DuplicateRecord {
        /// Year of the duplicated pair.
        year: i32,
        /// Month of the duplicated pair (1-based).
        month: u32,
    },

    /// Scale domain error (e.g., equal bounds, unordered thresholds).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}
