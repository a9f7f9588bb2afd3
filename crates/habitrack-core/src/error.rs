//! Core error types for habitrack-core.
//!
//! The interval engine itself never fails; everything here belongs to the
//! layers around it (save file, configuration, record validation).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Save file errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Save file errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The save file exists but could not be read
    #[error("Failed to read save file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The save file could not be written
    #[error("Failed to write save file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The save file is not valid JSON for the expected schema
    #[error("Save data at {path} could not be parsed: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The habits could not be encoded as JSON
    #[error("Failed to encode save file {path}: {source}")]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record inside the save file is malformed
    #[error("Habit '{id}' in save file is invalid: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// No habit matches the given id or index
    #[error("Habit not found: {0}")]
    HabitNotFound(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
