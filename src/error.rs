//! Error types for configuration sources.

use thiserror::Error;

/// Failure reading a configuration source.
///
/// `NotFound` is an expected condition (an absent override or version
/// file) and is handled as absence by the resolver. The other variants
/// are step failures: logged at error severity, the step's effect
/// skipped, resolution continues.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The local file does not exist.
    #[error("source not found: {0}")]
    NotFound(String),

    /// Any file read failure other than not-found.
    #[error("failed reading {locator}: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// Fetch of an http/https locator failed.
    #[error("failed fetching {locator}: {source}")]
    Http {
        locator: String,
        #[source]
        source: reqwest::Error,
    },

    /// The source was read but is not valid JSON. Malformed JSON is an
    /// operator mistake worth surfacing loudly.
    #[error("invalid JSON in {locator}: {source}")]
    Parse {
        locator: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
