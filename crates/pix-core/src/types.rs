//! # Domain Types
//!
//! Value types exchanged with the donation UI.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PixPayloadInput │   │    Merchant     │   │ DonationRequest │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  pix_key        │   │  pix_key        │   │  giver_name     │       │
//! │  │  merchant_name  │   │  name           │   │  amount         │       │
//! │  │  merchant_city  │   │  city           │   └────────┬────────┘       │
//! │  │  amount?        │   └────────┬────────┘            │                │
//! │  │  txid           │            └──────────┬──────────┘                │
//! │  └─────────────────┘                       ▼                           │
//! │                                  ┌─────────────────┐                   │
//! │                                  │ DonationReceipt │                   │
//! │                                  │  payload        │                   │
//! │                                  │  integrity_hash │                   │
//! │                                  └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types are immutable values: build, encode, discard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::Amount;

/// Transaction id used when the caller doesn't supply one.
///
/// Sanitizes to an empty string, so the payload carries `62040500`.
pub const DEFAULT_TXID: &str = "***";

// =============================================================================
// Payload Input
// =============================================================================

/// Everything the payload assembler needs.
///
/// `pix_key` is used verbatim; name, city and txid are sanitized during
/// encoding, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PixPayloadInput {
    /// PIX key: e-mail, CPF/CNPJ, phone (+55…) or random key (EVP).
    pub pix_key: String,

    /// Receiver name, free text (max 25 after sanitizing).
    pub merchant_name: String,

    /// Receiver city, free text (max 15 after abbreviation).
    pub merchant_city: String,

    /// Fixed amount; `None` leaves the amount field out.
    #[serde(default)]
    pub amount: Option<Amount>,

    /// Transaction id, free text (max 25 after sanitizing).
    #[serde(default = "default_txid")]
    pub txid: String,
}

fn default_txid() -> String {
    DEFAULT_TXID.to_string()
}

impl PixPayloadInput {
    /// Creates an input with no amount and the default txid.
    pub fn new(
        pix_key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
    ) -> Self {
        PixPayloadInput {
            pix_key: pix_key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
            amount: None,
            txid: default_txid(),
        }
    }

    pub fn with_amount(mut self, amount: Option<Amount>) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = txid.into();
        self
    }
}

// =============================================================================
// Merchant
// =============================================================================

/// The party receiving donations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Merchant {
    pub pix_key: String,
    pub name: String,
    pub city: String,
}

impl Merchant {
    pub fn new(
        pix_key: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Merchant {
            pix_key: pix_key.into(),
            name: name.into(),
            city: city.into(),
        }
    }

    /// Payload input for this merchant with the given amount and txid.
    pub fn payload_input(&self, amount: Option<Amount>, txid: impl Into<String>) -> PixPayloadInput {
        PixPayloadInput::new(&self.pix_key, &self.name, &self.city)
            .with_amount(amount)
            .with_txid(txid)
    }
}

// =============================================================================
// Donation
// =============================================================================

/// What the donor typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DonationRequest {
    /// Donor name; also becomes the transaction id.
    pub giver_name: String,

    /// Donation amount (at least R$ 1,00 once validated).
    pub amount: Amount,
}

impl DonationRequest {
    pub fn new(giver_name: impl Into<String>, amount: Amount) -> Self {
        DonationRequest {
            giver_name: giver_name.into(),
            amount,
        }
    }
}

/// A generated donation payload plus the hash that guards it.
///
/// The UI stores both; before showing or copying the payload again it calls
/// [`DonationReceipt::verify`](crate::donation) to detect tampering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DonationReceipt {
    /// The "Copia e Cola" string.
    pub payload: String,

    /// Lowercase hex SHA-256 over the payload inputs and salt.
    pub integrity_hash: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_input_defaults() {
        let input = PixPayloadInput::new("key@example.com", "Loja", "Recife");
        assert_eq!(input.amount, None);
        assert_eq!(input.txid, DEFAULT_TXID);
    }

    #[test]
    fn test_payload_input_json_is_camel_case() {
        let input = PixPayloadInput::new("key@example.com", "Loja", "Recife")
            .with_amount(Some(Amount::from_centavos(1050)))
            .with_txid("ABC");
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["pixKey"], "key@example.com");
        assert_eq!(json["merchantCity"], "Recife");
        assert_eq!(json["amount"], 1050);
    }

    #[test]
    fn test_payload_input_json_defaults() {
        let json = r#"{"pixKey":"k","merchantName":"n","merchantCity":"c"}"#;
        let input: PixPayloadInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.amount, None);
        assert_eq!(input.txid, "***");
    }

    #[test]
    fn test_merchant_payload_input() {
        let merchant = Merchant::new("key@example.com", "Streamer", "Natal");
        let input = merchant.payload_input(Some(Amount::from_centavos(500)), "FULANO");
        assert_eq!(input.pix_key, "key@example.com");
        assert_eq!(input.merchant_name, "Streamer");
        assert_eq!(input.merchant_city, "Natal");
        assert_eq!(input.txid, "FULANO");
    }
}
