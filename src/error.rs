//! Error taxonomy for the recommendation core.
//!
//! Every failure the core can produce is a distinct variant so the request
//! boundary can tell a missing dataset from an unreachable classifier. Nothing
//! in the core retries; the variants carry enough context to diagnose the
//! failure after the fact.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The configured dataset location does not exist.
    #[error("dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// One or more required columns are absent from the dataset header.
    #[error("dataset is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A feature cell holds something that is neither empty nor a number.
    #[error("invalid value {value:?} in column {column} on line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("dataset could not be parsed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A lookup was attempted before the feature store finished loading.
    #[error("feature store is not initialized")]
    NotInitialized,

    /// The external sentiment classifier failed or returned nothing usable.
    #[error("sentiment classification unavailable: {0}")]
    ClassificationUnavailable(String),

    /// An external API answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token error: {0}")]
    Token(String),
}

pub type Result<T> = std::result::Result<T, Error>;
