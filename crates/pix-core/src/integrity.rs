//! # Integrity Hash
//!
//! Detects tampering with a stored payload between generation and display.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate:  input ──► payload                                           │
//! │             input + salt ──► SHA-256 ──► hash                           │
//! │                                                                         │
//! │  store (payload, hash) in the UI                                        │
//! │                                                                         │
//! │  verify:    recompute both from the same input + salt                   │
//! │             stored payload == recomputed payload                        │
//! │             stored hash    == recomputed hash      ──► true / false     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The salt lives in the deployment configuration, so someone editing the
//! stored payload cannot produce a matching hash for a different input.
//!
//! ## Canonical String
//! `pixKey|merchantName|merchantCity|amount|txid|salt` with the raw (unsanitized)
//! input values and the amount rendered as `10.50`, or empty when absent.
//! The donation page's JavaScript store interpolates the raw number (`25`,
//! `10.5`) instead, so hashes from the two are not interchangeable: receipts
//! must be verified by the same implementation that produced them.

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::payload::PixPayload;
use crate::types::PixPayloadInput;

/// Lowercase hex SHA-256 of the canonical string for `input`.
///
/// ## Example
/// ```rust
/// use pix_core::integrity::compute_integrity_hash;
/// use pix_core::{Amount, PixPayloadInput};
///
/// let input = PixPayloadInput::new("test@example.com", "TESTE", "CIDADE")
///     .with_amount(Some(Amount::from_centavos(1050)))
///     .with_txid("TXID123");
///
/// let hash = compute_integrity_hash(&input, "salt");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, compute_integrity_hash(&input, "salt"));
/// assert_ne!(hash, compute_integrity_hash(&input, "other-salt"));
/// ```
pub fn compute_integrity_hash(input: &PixPayloadInput, salt: &str) -> String {
    let digest = Sha256::digest(canonical_string(input, salt).as_bytes());
    hex::encode(digest)
}

fn canonical_string(input: &PixPayloadInput, salt: &str) -> String {
    let amount = input
        .amount
        .map(|a| a.to_string())
        .unwrap_or_default();

    format!(
        "{}|{}|{}|{}|{}|{}",
        input.pix_key, input.merchant_name, input.merchant_city, amount, input.txid, salt
    )
}

/// Checks a stored payload and hash against the input they claim to encode.
///
/// Both must match the values recomputed from `input` and `salt`. An input
/// that can no longer be encoded counts as a failed check.
///
/// ## Example
/// ```rust
/// use pix_core::integrity::{compute_integrity_hash, verify};
/// use pix_core::{PixPayload, PixPayloadInput};
///
/// let input = PixPayloadInput::new("k@x.com", "Loja", "Recife").with_txid("A");
/// let payload = PixPayload::generate(&input).unwrap();
/// let hash = compute_integrity_hash(&input, "salt");
///
/// assert!(verify(payload.as_str(), &hash, &input, "salt"));
/// assert!(!verify("tampered", &hash, &input, "salt"));
/// ```
pub fn verify(stored_payload: &str, stored_hash: &str, input: &PixPayloadInput, salt: &str) -> bool {
    if stored_payload.is_empty() || stored_hash.is_empty() {
        debug!("Integrity check skipped: nothing stored");
        return false;
    }

    let expected_payload = match PixPayload::generate(input) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Integrity check failed: input no longer encodes");
            return false;
        }
    };
    let expected_hash = compute_integrity_hash(input, salt);

    let payload_ok = expected_payload.as_str() == stored_payload;
    let hash_ok = expected_hash == stored_hash;

    if payload_ok && hash_ok {
        debug!(crc = %expected_payload.crc(), "Integrity check passed");
        true
    } else {
        warn!(payload_ok, hash_ok, "Integrity check failed: stored payload was altered");
        false
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
