//! # Error Hierarchy
//!
//! Structured errors for the domain core, built with `thiserror`.
//!
//! Only two things can fail in this crate: loading the dataset at startup,
//! and parsing the compact query encodings used by the comparison view.
//! Lookups, normalisation, and filtering are total functions and have no
//! error type at all.

use thiserror::Error;

/// Errors raised while loading and validating the candidate dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("I/O error reading dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON for the candidate schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset is not valid YAML for the candidate schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported dataset format: \"{0}\" (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// Candidate ids must be positive integers.
    #[error("invalid candidate id {0}: ids must be positive")]
    InvalidId(u64),

    /// Two records share the same id.
    #[error("duplicate candidate id {0}")]
    DuplicateId(u32),

    /// A record has an empty or whitespace-only name.
    #[error("candidate {0} has a blank name")]
    BlankName(u32),

    /// Two promise fields resolve to the same slot number
    /// (e.g. `promise1` and `promise_1`).
    #[error("candidate {id} defines promise slot {slot} more than once")]
    DuplicatePromiseSlot {
        /// The candidate whose record is malformed.
        id: u32,
        /// The slot number that was defined twice.
        slot: u32,
    },
}

/// Errors parsing compact query-string encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A comparison section name is not one of `career`, `promises`, `stances`.
    #[error("unknown comparison section: \"{0}\" (expected career, promises or stances)")]
    UnknownSection(String),

    /// An entry in a comma-separated id list is not a positive integer.
    #[error("malformed candidate id: \"{0}\"")]
    MalformedId(String),
}
