//! Tracing subscriber setup from the debug configuration domain.
//!
//! The sink is chosen by the `--log` option: `0`/`off`, `1`/`stdout`,
//! `2`/`stderr`, a filename, or `auto` to follow the `debug` domain of
//! the configuration (console flag, file logging directory/filename).
//! Logging is initialized from the env-constructed tree, before the
//! resolver runs, so resolution itself is captured.

use crate::config::DebugConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Map the configured `loglevel` string to a tracing level.
///
/// Unrecognized values fall back to info rather than failing startup.
pub fn parse_level(loglevel: &str) -> Level {
    match loglevel.to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Initialize the global subscriber.
///
/// `verbose` forces debug level regardless of the configured `loglevel`.
pub fn init(debug_config: &DebugConfig, verbose: bool, log_option: &str) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        parse_level(&debug_config.loglevel)
    };

    match log_option {
        "0" | "off" => Ok(()),
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(())
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(())
        }
        "auto" => {
            if debug_config.log_to_files {
                let dir = Path::new(&debug_config.log_directory);
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
                init_file(level, &dir.join(&debug_config.log_filename))
            } else {
                // Console flag or not, something has to receive the output.
                let subscriber = FmtSubscriber::builder()
                    .with_max_level(level)
                    .with_writer(std::io::stderr)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)?;
                Ok(())
            }
        }
        filename => init_file(level, Path::new(filename)),
    }
}

fn init_file(level: Level, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(file)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
