//! # pix-core: PIX "Copia e Cola" Payload Encoding
//!
//! This crate builds the EMV merchant-presented string behind a PIX QR code
//! (the "Copia e Cola" text) as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PIX Donation Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Donation UI / pix CLI (apps/pix-cli)               │   │
//! │  │    Form ──► Validate ──► Payload ──► QR / Clipboard ──► Verify  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pix-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   text    │  │    emv    │  │    crc    │  │  payload  │  │   │
//! │  │   │ normalize │  │ EmvField  │  │  crc16    │  │ assembler │  │   │
//! │  │   │ abbreviate│  │ TLV parse │  │ CCITT-F   │  │ PixPayload│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │  amount   │  │ integrity │  │ donation  │                 │   │
//! │  │   │ centavos  │  │  SHA-256  │  │ validate  │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`text`] - Accent stripping, city abbreviation, txid sanitizing
//! - [`emv`] - TLV field encoding and parsing
//! - [`crc`] - CRC-16/CCITT-FALSE
//! - [`amount`] - Amount type in integer centavos
//! - [`payload`] - Payload assembly
//! - [`integrity`] - Salted hash for tamper detection
//! - [`validation`] - Donation input rules
//! - [`donation`] - Validate, encode and hash a donation in one call
//! - [`types`] - Domain types
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same payload, byte for byte
//! 2. **No I/O**: configuration and output belong to the caller
//! 3. **Integer Money**: amounts are centavos (u64), rounded once at the boundary
//! 4. **Explicit Errors**: encoding faults are typed, never partial payloads
//!
//! ## Example Usage
//!
//! ```rust
//! use pix_core::generate_pix_payload;
//!
//! let payload = generate_pix_payload(
//!     "test@example.com",
//!     "José Açúcar",
//!     "São José do Rio Preto",
//!     10,
//!     "TXID",
//! )
//! .unwrap();
//!
//! assert!(payload.starts_with("000201"));
//! assert!(payload.contains("5911JOSE ACUCAR"));
//! assert!(payload.contains("6012SAO JOSE R P"));
//! assert!(pix_core::crc::verify_payload_crc(&payload));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod crc;
pub mod donation;
pub mod emv;
pub mod error;
pub mod integrity;
pub mod payload;
pub mod text;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pix_core::Amount` instead of
// `use pix_core::amount::Amount`

pub use amount::{Amount, IntoAmount};
pub use donation::prepare_donation;
pub use error::{CoreError, CoreResult, PixError, PixResult, ValidationError};
pub use payload::{generate_pix_payload, PixPayload};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Transaction id for donations from an anonymous giver.
pub const DEFAULT_DONATION_TXID: &str = "GENTEFINA";

/// Salt used when the deployment doesn't configure one.
///
/// Hashes made with it protect nothing; callers should warn when it is in use.
pub const DEFAULT_VALIDATION_SALT: &str = "default-salt-change-me";
