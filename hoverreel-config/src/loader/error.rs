use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ConfigGuardRailError;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read preview config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse preview config {origin}: toml error: {toml}; json error: {json}"
    )]
    Parse {
        origin: String,
        toml: String,
        json: String,
    },

    #[error("invalid preview config {origin}: {message}")]
    Invalid { origin: String, message: String },

    #[error("preview config {origin} rejected: {source}")]
    GuardRail {
        origin: String,
        #[source]
        source: ConfigGuardRailError,
    },
}
