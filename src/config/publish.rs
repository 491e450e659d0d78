//! Publication of the client-visible configuration subset.
//!
//! Browser-served static pages read the same effective configuration the
//! server resolved, without a round trip through an API endpoint. Only
//! the non-sensitive `metaverse`, `server` and `debug` domains are
//! published.

use super::types::{Config, DebugConfig, MetaverseConfig, ServerConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The whitelisted domains, borrowed from the resolved tree.
#[derive(Debug, Serialize)]
pub struct StaticSubset<'a> {
    pub metaverse: &'a MetaverseConfig,
    pub server: &'a ServerConfig,
    pub debug: &'a DebugConfig,
}

impl<'a> StaticSubset<'a> {
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            metaverse: &config.metaverse,
            server: &config.server,
            debug: &config.debug,
        }
    }
}

/// Write the subset as `config.json` into the first existing candidate
/// static directory (`<root>/<static-base>` per candidate root).
///
/// Returns the path written, or `None` when no candidate directory
/// exists. Probing stops at the first existing directory; a write failure
/// there is not retried against later candidates.
pub fn publish_subset(config: &Config, roots: &[PathBuf]) -> Result<Option<PathBuf>> {
    let static_base = config.server.static_base.trim_start_matches('/');
    for root in roots {
        let static_dir = root.join(static_base);
        if static_dir.exists() {
            let path = static_dir.join("config.json");
            write_subset(config, &path)?;
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn write_subset(config: &Config, path: &Path) -> Result<()> {
    let body = serde_json::to_string(&StaticSubset::from_config(config))?;
    std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
