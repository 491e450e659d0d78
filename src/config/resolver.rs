//! Configuration resolution pipeline.
//!
//! Five ordered steps turn the env-constructed default tree into the
//! effective configuration: override-file merge, version-metadata
//! replacement, derived network identity, URL normalization, and
//! static-subset publication. Each step is an independent unit of
//! failure — a failed step is logged at error severity and skipped, and
//! [`ConfigResolver::resolve`] always returns a fully-populated tree.

use super::merge::deep_merge;
use super::publish;
use super::source::read_source;
use super::types::{Config, ServerVersion};
use crate::net::{ExternalIpProbe, HttpIpProbe};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Resolves a constructed [`Config`] into the effective configuration.
///
/// Consumes the tree and returns it by value; callers own the result and
/// pass it to the rest of the process. Candidate roots default to the
/// working directory and the build-output directory, matching where the
/// server is started from in source checkouts and packaged installs.
pub struct ConfigResolver {
    config: Config,
    roots: Vec<PathBuf>,
    probe: Box<dyn ExternalIpProbe>,
}

impl ConfigResolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            roots: vec![PathBuf::from("."), PathBuf::from("./dist")],
            probe: Box::new(HttpIpProbe::default()),
        }
    }

    /// Replace the candidate root directories probed for `VERSION.json`
    /// and the static directory.
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = roots;
        self
    }

    /// Replace the external-address probe.
    pub fn with_probe(mut self, probe: Box<dyn ExternalIpProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Run the pipeline. Never fails; steps that cannot complete leave
    /// their part of the tree at its prior value.
    pub async fn resolve(mut self) -> Config {
        if let Err(err) = self.merge_override_file().await {
            error!("resolve: exception adding user config: {:#}", err);
        }
        if let Err(err) = self.merge_version_info().await {
            error!("resolve: exception reading version info: {:#}", err);
        }
        if let Err(err) = self.fill_network_identity().await {
            error!("resolve: exception deriving network identity: {:#}", err);
        }
        self.normalize_server_url();
        self.publish_static_subset();
        self.config
    }

    /// Step 1: deep-merge the operator override file over the tree.
    /// File values win on conflict at every nesting depth.
    async fn merge_override_file(&mut self) -> Result<()> {
        let locator = self.config.server.user_config_file.clone();
        if locator.is_empty() {
            return Ok(());
        }
        debug!("resolve: reading configuration file {}", locator);
        let Some(overlay) = read_source(&locator).await? else {
            return Ok(());
        };
        let base = serde_json::to_value(&self.config)?;
        let merged = deep_merge(base, overlay);
        self.config = serde_json::from_value(merged)
            .context("override file does not match the configuration shape")?;
        Ok(())
    }

    /// Step 2: replace `server.server-version` wholesale from the first
    /// existing `VERSION.json`, or the unknown sentinel when none exists.
    /// Replacement, not merge — the version object has its own shape.
    async fn merge_version_info(&mut self) -> Result<()> {
        let mut version_info = None;
        // Depending on how the server was built, the version file can be
        // in different places.
        for root in &self.roots {
            let path = root.join("VERSION.json");
            if path.exists() {
                version_info = read_source(&path.to_string_lossy()).await?;
                break;
            }
        }
        let version = match version_info {
            Some(value) => serde_json::from_value::<ServerVersion>(value)?,
            None => ServerVersion::unknown(),
        };
        debug!("resolve: version info: {}", serde_json::to_string(&version)?);
        self.config.server.server_version = version;
        Ok(())
    }

    /// Step 3: fill the network-identity fields still empty after the
    /// overlays from the self-detected external address.
    async fn fill_network_identity(&mut self) -> Result<()> {
        if self.config.metaverse.default_ice_server_url.is_empty() {
            let addr = self
                .probe
                .external_ip()
                .await
                .context("external address detection failed")?;
            debug!("resolve: made ice server addr of {}", addr);
            self.config.metaverse.default_ice_server_url = addr;
        }
        if self.config.metaverse.metaverse_server_url.is_empty() {
            let addr = self
                .probe
                .external_ip()
                .await
                .context("external address detection failed")?;
            let url = format!("http://{}:{}/", addr, self.config.server.listen_port);
            debug!("resolve: built metaverse url of {}", url);
            self.config.metaverse.metaverse_server_url = url;
        }
        Ok(())
    }

    /// Step 4: strip trailing slashes from the metaverse-server URL.
    /// Downstream code appends path segments that begin with `/`.
    fn normalize_server_url(&mut self) {
        let url = &mut self.config.metaverse.metaverse_server_url;
        while url.ends_with('/') {
            url.pop();
        }
    }

    /// Step 5: publish the client-visible subset next to the static assets.
    fn publish_static_subset(&self) {
        match publish::publish_subset(&self.config, &self.roots) {
            Ok(Some(path)) => {
                info!("resolve: wrote static config subset to {}", path.display());
            }
            Ok(None) => {
                debug!("resolve: no static directory found, subset not written");
            }
            Err(err) => {
                error!("resolve: error writing static config subset: {:#}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::{FailingIpProbe, StaticIpProbe};
    use tempfile::TempDir;

    fn resolver_in(temp: &TempDir) -> ConfigResolver {
        let mut config = Config::default();
        config.server.user_config_file = temp
            .path()
            .join("iamus.json")
            .to_string_lossy()
            .to_string();
        ConfigResolver::new(config)
            .with_roots(vec![temp.path().to_path_buf()])
            .with_probe(Box::new(StaticIpProbe("1.2.3.4")))
    }

    #[tokio::test]
    async fn test_derived_address_fill_and_normalization() {
        let temp = TempDir::new().unwrap();
        let resolved = resolver_in(&temp).resolve().await;
        assert_eq!(resolved.metaverse.default_ice_server_url, "1.2.3.4");
        // Composed as http://1.2.3.4:9400/ then trailing slash stripped.
        assert_eq!(resolved.metaverse.metaverse_server_url, "http://1.2.3.4:9400");
    }

    #[tokio::test]
    async fn test_operator_urls_left_alone() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.server.user_config_file = String::new();
        config.metaverse.metaverse_server_url = "http://mv.example.org:9400".to_string();
        config.metaverse.default_ice_server_url = "ice.example.org".to_string();
        let resolved = ConfigResolver::new(config)
            .with_roots(vec![temp.path().to_path_buf()])
            .with_probe(Box::new(FailingIpProbe))
            .resolve()
            .await;
        assert_eq!(resolved.metaverse.metaverse_server_url, "http://mv.example.org:9400");
        assert_eq!(resolved.metaverse.default_ice_server_url, "ice.example.org");
    }

    #[tokio::test]
    async fn test_many_trailing_slashes_stripped() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.server.user_config_file = String::new();
        config.metaverse.metaverse_server_url = "http://host:9400/////".to_string();
        config.metaverse.default_ice_server_url = "ice".to_string();
        let resolved = ConfigResolver::new(config)
            .with_roots(vec![temp.path().to_path_buf()])
            .with_probe(Box::new(FailingIpProbe))
            .resolve()
            .await;
        assert_eq!(resolved.metaverse.metaverse_server_url, "http://host:9400");
    }

    #[tokio::test]
    async fn test_version_sentinel_when_no_version_file() {
        let temp = TempDir::new().unwrap();
        let resolved = resolver_in(&temp).resolve().await;
        assert_eq!(resolved.server.server_version.version_tag, "unknown");
    }

    #[tokio::test]
    async fn test_version_file_replaces_wholesale() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("VERSION.json"),
            r#"{"version-tag": "2.4.1-20260815-fedcba9", "commit": "fedcba9"}"#,
        )
        .unwrap();
        let resolved = resolver_in(&temp).resolve().await;
        assert_eq!(
            resolved.server.server_version.version_tag,
            "2.4.1-20260815-fedcba9"
        );
        assert_eq!(
            resolved.server.server_version.extra["commit"],
            serde_json::json!("fedcba9")
        );
    }

    #[tokio::test]
    async fn test_first_existing_version_candidate_wins() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(first.join("VERSION.json"), r#"{"version-tag": "one"}"#).unwrap();
        std::fs::write(second.join("VERSION.json"), r#"{"version-tag": "two"}"#).unwrap();

        let mut config = Config::default();
        config.server.user_config_file = String::new();
        let resolved = ConfigResolver::new(config)
            .with_roots(vec![first, second])
            .with_probe(Box::new(StaticIpProbe("1.2.3.4")))
            .resolve()
            .await;
        assert_eq!(resolved.server.server_version.version_tag, "one");
    }

    #[tokio::test]
    async fn test_failed_ip_detection_leaves_fields_empty() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.server.user_config_file = String::new();
        let resolved = ConfigResolver::new(config)
            .with_roots(vec![temp.path().to_path_buf()])
            .with_probe(Box::new(FailingIpProbe))
            .resolve()
            .await;
        // Step failed, logged, pipeline continued; prior (empty) values kept.
        assert!(resolved.metaverse.metaverse_server_url.is_empty());
        assert!(resolved.metaverse.default_ice_server_url.is_empty());
        // Later steps still ran.
        assert_eq!(resolved.server.server_version.version_tag, "unknown");
    }
}
