//! End-to-end configuration resolution tests.
//!
//! Exercises the whole pipeline against temporary root directories:
//! override-file merge, version replacement, derived network identity,
//! URL normalization, and static-subset publication.

use iamus_config::config::{Config, ConfigResolver};
use iamus_config::net::testing::StaticIpProbe;
use serde_json::Value;
use tempfile::TempDir;

/// Build a resolver rooted in `temp`, reading `iamus.json` from there and
/// detecting the external address as 1.2.3.4.
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
async fn test_missing_override_file_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let resolved = resolver_in(&temp).resolve().await;

    assert_eq!(resolved.metaverse.metaverse_name, "Overte noobie");
    assert_eq!(resolved.server.listen_port, 9400);
    assert_eq!(resolved.auth.owner_token_expire_hours, 168);
    assert_eq!(resolved.server.server_version.version_tag, "unknown");
}

#[tokio::test]
async fn test_override_file_wins_at_depth() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("iamus.json"),
        r#"{
            "metaverse": { "metaverse-name": "My World" },
            "server": { "listen-port": 9500 },
            "metaverse-server": { "allow-temp-domain-creation": true }
        }"#,
    )
    .unwrap();

    let resolved = resolver_in(&temp).resolve().await;

    // Overridden leaves.
    assert_eq!(resolved.metaverse.metaverse_name, "My World");
    assert_eq!(resolved.server.listen_port, 9500);
    assert!(resolved.metaverse_server.allow_temp_domain_creation);
    // Sibling leaves in touched domains keep their defaults.
    assert_eq!(resolved.metaverse.metaverse_nick_name, "Noobie");
    assert_eq!(resolved.server.listen_host, "0.0.0.0");
    assert_eq!(resolved.metaverse_server.max_name_length, 32);
}

#[tokio::test]
async fn test_override_port_flows_into_derived_url() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("iamus.json"),
        r#"{ "server": { "listen-port": 9500 } }"#,
    )
    .unwrap();

    let resolved = resolver_in(&temp).resolve().await;
    assert_eq!(resolved.metaverse.metaverse_server_url, "http://1.2.3.4:9500");
    assert_eq!(resolved.metaverse.default_ice_server_url, "1.2.3.4");
}

#[tokio::test]
async fn test_malformed_override_file_is_survived() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("iamus.json"), "{ this is not json").unwrap();

    let resolved = resolver_in(&temp).resolve().await;

    // Step failed and was skipped; later steps ran against defaults.
    assert_eq!(resolved.metaverse.metaverse_name, "Overte noobie");
    assert_eq!(resolved.server.server_version.version_tag, "unknown");
    assert_eq!(resolved.metaverse.metaverse_server_url, "http://1.2.3.4:9400");
}

#[tokio::test]
async fn test_mistyped_override_value_is_survived() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("iamus.json"),
        r#"{ "server": { "listen-port": "not-a-number" } }"#,
    )
    .unwrap();

    let resolved = resolver_in(&temp).resolve().await;
    assert_eq!(resolved.server.listen_port, 9400);
}

#[tokio::test]
async fn test_override_url_normalized_after_merge() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("iamus.json"),
        r#"{ "metaverse": { "metaverse-server-url": "http://mv.example.org:9400/////" } }"#,
    )
    .unwrap();

    let resolved = resolver_in(&temp).resolve().await;
    assert_eq!(
        resolved.metaverse.metaverse_server_url,
        "http://mv.example.org:9400"
    );
}

#[tokio::test]
async fn test_version_file_and_subset_publication() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("VERSION.json"),
        r#"{ "version-tag": "2.4.1-20260815-fedcba9" }"#,
    )
    .unwrap();
    std::fs::create_dir_all(temp.path().join("static")).unwrap();

    let resolved = resolver_in(&temp).resolve().await;
    assert_eq!(
        resolved.server.server_version.version_tag,
        "2.4.1-20260815-fedcba9"
    );

    let published = temp.path().join("static").join("config.json");
    let body: Value =
        serde_json::from_str(&std::fs::read_to_string(published).unwrap()).unwrap();

    // Exactly the whitelisted domains, nothing else.
    let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["debug", "metaverse", "server"]);

    // Published values are the resolved, post-normalization ones.
    assert_eq!(
        body["metaverse"]["metaverse-server-url"],
        serde_json::json!("http://1.2.3.4:9400")
    );
    assert_eq!(
        body["server"]["server-version"]["version-tag"],
        serde_json::json!("2.4.1-20260815-fedcba9")
    );
}

#[tokio::test]
async fn test_remote_override_locator_failure_is_survived() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::default();
    // Discard port on localhost; the fetch fails immediately.
    config.server.user_config_file = "http://127.0.0.1:9/iamus.json".to_string();
    let resolved = ConfigResolver::new(config)
        .with_roots(vec![temp.path().to_path_buf()])
        .with_probe(Box::new(StaticIpProbe("1.2.3.4")))
        .resolve()
        .await;

    assert_eq!(resolved.metaverse.metaverse_name, "Overte noobie");
    assert_eq!(resolved.metaverse.metaverse_server_url, "http://1.2.3.4:9400");
}

#[tokio::test]
async fn test_empty_override_locator_skips_merge() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.server.user_config_file = String::new();
    let resolved = ConfigResolver::new(config)
        .with_roots(vec![temp.path().to_path_buf()])
        .with_probe(Box::new(StaticIpProbe("1.2.3.4")))
        .resolve()
        .await;

    assert_eq!(resolved.server.listen_port, 9400);
}

#[tokio::test]
async fn test_round_trip_resolved_tree_is_stable() {
    // Merging an overlay identical to the current tree changes nothing.
    let temp = TempDir::new().unwrap();
    let first = resolver_in(&temp).resolve().await;

    std::fs::write(
        temp.path().join("iamus.json"),
        serde_json::to_string(&first).unwrap(),
    )
    .unwrap();
    let second = resolver_in(&temp).resolve().await;

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}
