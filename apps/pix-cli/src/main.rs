//! # pix
//!
//! Command-line front end for PIX "Copia e Cola" payloads.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pix payload --key K --name N --city C [--amount A] [--txid T]         │
//! │  pix donate  --giver G --amount A [--json]        (configured merchant) │
//! │  pix verify  --payload P --hash H --giver G --amount A                  │
//! │  pix crc     <data>                                                     │
//! │  pix inspect <payload>                                                  │
//! │                                                                         │
//! │  stdout: the result only          stderr: logs (RUST_LOG, --verbose)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pix_cli::commands;
use pix_cli::MerchantConfig;

#[derive(Parser)]
#[command(name = "pix")]
#[command(about = "Generate and check PIX Copia e Cola payloads", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Merchant config file (TOML); environment variables take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload from explicit merchant data
    Payload {
        /// PIX key (e-mail, CPF/CNPJ, phone or random key)
        #[arg(long)]
        key: String,

        /// Receiver name
        #[arg(long)]
        name: String,

        /// Receiver city
        #[arg(long)]
        city: String,

        /// Fixed amount, e.g. 10.50 (omit for an open amount)
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// Transaction id
        #[arg(long, default_value = pix_core::DEFAULT_TXID)]
        txid: String,
    },

    /// Validate a donation and encode it for the configured merchant
    Donate {
        /// Donor name (4-25 characters: letters, digits, - _ . @)
        #[arg(long)]
        giver: String,

        /// Donation amount, at least 1.00
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// Print the payload and integrity hash as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a stored payload and hash; exits 1 when they were altered
    Verify {
        /// Stored payload
        #[arg(long)]
        payload: String,

        /// Stored integrity hash
        #[arg(long)]
        hash: String,

        /// Donor name the payload was made for
        #[arg(long)]
        giver: String,

        /// Amount the payload was made for
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Print the CRC-16/CCITT-FALSE of a string
    Crc {
        /// Data to checksum
        data: String,
    },

    /// List the fields of a payload and check its CRC
    Inspect {
        /// Payload to decode
        payload: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Payload {
            key,
            name,
            city,
            amount,
            txid,
        } => {
            println!(
                "{}",
                commands::payload(&key, &name, &city, amount.as_deref(), &txid)?
            );
        }

        Commands::Donate {
            giver,
            amount,
            json,
        } => {
            let config = MerchantConfig::load(cli.config.as_deref())?;
            println!("{}", commands::donate(&config, &giver, &amount, json)?);
        }

        Commands::Verify {
            payload,
            hash,
            giver,
            amount,
        } => {
            let config = MerchantConfig::load(cli.config.as_deref())?;
            if commands::verify(&config, &payload, &hash, &giver, &amount)? {
                info!("Payload verified");
                println!("valid");
            } else {
                warn!("Payload does not match its integrity hash");
                println!("tampered");
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Crc { data } => {
            println!("{}", commands::crc(&data));
        }

        Commands::Inspect { payload } => {
            println!("{}", commands::inspect(&payload)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - Default: WARN
/// - `RUST_LOG=pix_core=trace` - per-field encoding detail
/// - `--verbose` - debug for the pix crates, overrides `RUST_LOG`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info,pix_core=debug,pix_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
