//! # pix-cli
//!
//! Library half of the `pix` binary: merchant configuration and the
//! subcommand implementations, kept out of `main.rs` so they can be tested.

pub mod commands;
pub mod config;

pub use config::{ConfigError, MerchantConfig};
