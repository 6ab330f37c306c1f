//! # Donation Flow
//!
//! Turns a donation form submission into a payload plus integrity hash, and
//! re-checks a stored pair before it is shown again.
//!
//! ## Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DonationRequest { giver_name: "joao", amount: 25.00 }                  │
//! │       │                                                                 │
//! │       ▼  validate (name rules, minimum R$ 1,00, merchant sanity)        │
//! │       │                                                                 │
//! │       ▼  derive_txid("joao") = "JOAO"                                   │
//! │       │                                                                 │
//! │       ▼  PixPayload::generate + compute_integrity_hash                  │
//! │       │                                                                 │
//! │  DonationReceipt { payload, integrity_hash }                            │
//! │       │                                                                 │
//! │       ▼  later: receipt.verify(merchant, request, salt)                 │
//! │  true  → show the stored payload again                                  │
//! │  false → discard it, the stored pair was altered                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::error::CoreResult;
use crate::integrity::{compute_integrity_hash, verify};
use crate::payload::PixPayload;
use crate::text::MAX_TXID_LEN;
use crate::types::{DonationReceipt, DonationRequest, Merchant, PixPayloadInput};
use crate::validation::{validate_donation, validate_merchant};
use crate::DEFAULT_DONATION_TXID;

/// Transaction id for a donation.
///
/// The name is uppercased and cut to 25 characters before anything outside
/// `[A-Z0-9]` is dropped, so the result can be shorter than 25. An empty name
/// gives [`DEFAULT_DONATION_TXID`].
///
/// ## Example
/// ```rust
/// use pix_core::donation::derive_txid;
///
/// assert_eq!(derive_txid("joao.silva"), "JOAOSILVA");
/// assert_eq!(derive_txid(""), "GENTEFINA");
/// ```
pub fn derive_txid(giver_name: &str) -> String {
    if giver_name.is_empty() {
        return DEFAULT_DONATION_TXID.to_string();
    }

    giver_name
        .to_uppercase()
        .chars()
        .take(MAX_TXID_LEN)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

fn donation_input(merchant: &Merchant, request: &DonationRequest) -> PixPayloadInput {
    merchant.payload_input(Some(request.amount), derive_txid(&request.giver_name))
}

/// Validates a donation and produces its payload and integrity hash.
///
/// ## Errors
/// - `CoreError::Validation` when the merchant or the request breaks a rule
/// - `CoreError::Encoding` when the payload cannot be encoded
///
/// ## Example
/// ```rust
/// use pix_core::donation::prepare_donation;
/// use pix_core::{Amount, DonationRequest, Merchant};
///
/// let merchant = Merchant::new("streamer@pix.com", "Streamer", "São Paulo");
/// let request = DonationRequest::new("joao", Amount::from_centavos(2500));
///
/// let receipt = prepare_donation(&merchant, &request, "s3cret").unwrap();
/// assert!(receipt.payload.contains("62080504JOAO"));
/// assert!(receipt.verify(&merchant, &request, "s3cret"));
/// ```
pub fn prepare_donation(
    merchant: &Merchant,
    request: &DonationRequest,
    salt: &str,
) -> CoreResult<DonationReceipt> {
    validate_merchant(merchant)?;
    validate_donation(request)?;

    let input = donation_input(merchant, request);
    let payload = PixPayload::generate(&input)?;
    let integrity_hash = compute_integrity_hash(&input, salt);

    info!(
        amount = %request.amount,
        txid = %input.txid,
        crc = %payload.crc(),
        "Prepared donation payload"
    );

    Ok(DonationReceipt {
        payload: payload.into_string(),
        integrity_hash,
    })
}

impl DonationReceipt {
    /// Recomputes payload and hash for `request` and compares both with the
    /// stored values.
    pub fn verify(&self, merchant: &Merchant, request: &DonationRequest, salt: &str) -> bool {
        let input = donation_input(merchant, request);
        let valid = verify(&self.payload, &self.integrity_hash, &input, salt);
        if !valid {
            warn!(txid = %input.txid, "Donation receipt failed verification");
        }
        valid
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
