use std::path::PathBuf;
use thiserror::Error;

use crate::analyzer::AnalyzerError;
use crate::secrets::SecretError;

#[derive(Error, Debug)]
pub enum SpoofscanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("{0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Failures local to a single input file. The pipeline turns these into an
/// unsafe verdict for that file instead of aborting the batch.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file type: .{0}")]
    UnsupportedFormat(String),

    #[error("Failed to read document '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),
}

pub type Result<T> = std::result::Result<T, SpoofscanError>;
