//! Operator binary: resolve the Iamus domain-server configuration and
//! inspect the result.

use anyhow::Result;
use clap::Parser;
use iamus_config::cli::{Cli, Command};
use iamus_config::config::{Config, ConfigResolver, StaticSubset};
use iamus_config::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Environment overlays are read once, here, at construction.
    let mut config = Config::from_env();
    if let Some(ref locator) = cli.config {
        config.server.user_config_file = locator.clone();
    }

    logging::init(&config.debug, cli.verbose, &cli.log)?;

    let resolved = ConfigResolver::new(config).resolve().await;

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => {
            let scheme = if !resolved.server.key_file.is_empty()
                && !resolved.server.cert_file.is_empty()
            {
                "https"
            } else {
                "http"
            };
            info!(
                "listening on {}://{}:{}",
                scheme, resolved.server.listen_host, resolved.server.listen_port
            );
            info!(
                "metaverse {:?} at {}",
                resolved.metaverse.metaverse_name, resolved.metaverse.metaverse_server_url
            );
            info!("ice server {}", resolved.metaverse.default_ice_server_url);
            info!("version {}", resolved.server.server_version.version_tag);
        }
        Command::Dump => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Command::Subset => {
            println!(
                "{}",
                serde_json::to_string_pretty(&StaticSubset::from_config(&resolved))?
            );
        }
    }

    Ok(())
}
