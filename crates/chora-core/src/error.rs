//! Error types for Chora

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChoraError {
    // Layer errors
    #[error("Layer data directory not found at {path}")]
    DataDirMissing { path: PathBuf },

    #[error("Malformed layer {id}: {reason}")]
    LayerMalformed { id: String, reason: String },

    #[error("Shapefile {path} could not be converted: {reason}")]
    ShapefileInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ChoraError>;
