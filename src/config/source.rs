//! Reading JSON content from a file path or an http/https URL.

use crate::error::{SourceError, SourceResult};
use crate::net;
use serde_json::Value;
use tracing::debug;

/// Read and parse JSON from `locator`.
///
/// Dispatch, checked in order: an `http://` locator is fetched over plain
/// HTTP, an `https://` locator over TLS, anything else is read as a local
/// UTF-8 file. An absent file or an empty body yields `Ok(None)` — absence
/// is not an error. Read failures other than not-found and malformed JSON
/// propagate for the caller to handle.
pub async fn read_source(locator: &str) -> SourceResult<Option<Value>> {
    let body = if locator.starts_with("http://") || locator.starts_with("https://") {
        net::fetch_text(locator)
            .await
            .map_err(|source| SourceError::Http {
                locator: locator.to_string(),
                source,
            })?
    } else {
        // The filename comes from the environment or the override file;
        // anyone who can change those already controls the process.
        match std::fs::read_to_string(locator) {
            Ok(body) => body,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration file found. Using environment variables or defaults.");
                return Ok(None);
            }
            Err(source) => {
                debug!("read_source: failed read of {}: {}", locator, source);
                return Err(SourceError::Io {
                    locator: locator.to_string(),
                    source,
                });
            }
        }
    };

    if body.trim().is_empty() {
        return Ok(None);
    }

    let parsed = serde_json::from_str(&body).map_err(|source| SourceError::Parse {
        locator: locator.to_string(),
        source,
    })?;
    Ok(Some(parsed))
}
