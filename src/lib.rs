//! Runtime configuration for the Iamus metaverse domain-server.
//!
//! Builds the effective configuration from layered defaults, environment
//! variables, and an operator override file, computes derived network
//! identity, and publishes the client-visible subset for static assets.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod net;
pub mod template;
