//! CLI definitions for the iamus-config binary.

use clap::{Parser, Subcommand};

/// Resolve and inspect the Iamus domain-server configuration.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path or http/https URL of the override file (overrides
    /// server.user-config-file)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr, a filename, or "auto"
    /// to follow the debug configuration domain
    #[arg(short, long, default_value = "auto", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the configuration and log a summary (default)
    Check,

    /// Resolve and print the full effective configuration as JSON
    Dump,

    /// Resolve and print the client-visible static subset as JSON
    Subset,
}
