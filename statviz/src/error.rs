// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Result alias for dataset loading.
pub type LoadResult<T> = Result<T, DataLoadError>;

/// Failure to read or parse the dataset.
///
/// Line numbers are 1-based physical lines, header included.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A network fetch failed (browser builds).
    #[error("failed to fetch `{path}`: {message}")]
    Fetch {
        /// URL that was requested.
        path: String,
        /// Transport or status description.
        message: String,
    },

    /// The input has no header row.
    #[error("dataset has no header row")]
    Empty,

    /// A required column is absent from the header.
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    /// The text is not readable CSV.
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric field could not be parsed under [`NumericPolicy::Reject`](crate::NumericPolicy).
    #[error("line {line}: invalid number {value:?} in column `{column}`")]
    InvalidNumber {
        /// Record line.
        line: u64,
        /// Column name.
        column: &'static str,
        /// Raw field text.
        value: String,
    },
}

/// Failure to load a [`ChartConfig`](crate::ChartConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config `{path}`: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config JSON.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
