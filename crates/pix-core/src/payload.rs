//! # Payload Assembler
//!
//! Builds the complete "Copia e Cola" string from merchant data.
//!
//! ## Field Layout
//! ```text
//! ┌─────┬──────────────────────────────┬────────────────────────────────────┐
//! │ Tag │ Field                        │ Value                              │
//! ├─────┼──────────────────────────────┼────────────────────────────────────┤
//! │ 00  │ Payload format indicator     │ "01"                               │
//! │ 01  │ Point of initiation          │ "12" (single use)                  │
//! │ 26  │ Merchant account info        │ 00 = br.gov.bcb.pix, 01 = key      │
//! │ 52  │ Merchant category code       │ "0000"                             │
//! │ 53  │ Transaction currency         │ "986" (BRL)                        │
//! │ 54  │ Transaction amount           │ "10.50" (omitted without amount)   │
//! │ 58  │ Country code                 │ "BR"                               │
//! │ 59  │ Merchant name                │ normalized, max 25                 │
//! │ 60  │ Merchant city                │ abbreviated, max 15                │
//! │ 62  │ Additional data              │ 05 = txid                          │
//! │ 63  │ CRC-16                       │ over everything before + "6304"    │
//! └─────┴──────────────────────────────┴────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pix_core::generate_pix_payload;
//!
//! let payload = generate_pix_payload(
//!     "test@example.com", "TESTE", "CIDADE", 10.5, "TXID123",
//! ).unwrap();
//!
//! assert!(payload.starts_with("000201"));
//! assert!(payload.contains("540510.50"));
//! assert!(payload.ends_with("63044353"));
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::amount::IntoAmount;
use crate::crc::{crc16_hex, CRC_FIELD_HEADER};
use crate::emv::{tags, EmvField};
use crate::error::{PixError, PixResult};
use crate::text::{abbreviate_city, sanitize_name, sanitize_txid};
use crate::types::PixPayloadInput;

/// Globally unique identifier of the PIX arrangement.
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// EMV payload format version.
pub const PAYLOAD_FORMAT: &str = "01";

/// Point of initiation: `12` marks a single-use code. Never `11`.
pub const POINT_OF_INITIATION_SINGLE_USE: &str = "12";

/// Merchant category code: not informed.
pub const MERCHANT_CATEGORY_CODE: &str = "0000";

/// ISO 4217 numeric code for BRL.
pub const CURRENCY_BRL: &str = "986";

pub const COUNTRY_CODE_BR: &str = "BR";

// =============================================================================
// PixPayload
// =============================================================================

/// A finished payload, CRC included.
///
/// Only produced by [`PixPayload::generate`], so the trailing checksum always
/// matches the content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PixPayload(String);

impl PixPayload {
    /// Assembles the payload for `input`.
    ///
    /// ## Errors
    /// - `NonAsciiKey`: a pix key with non-ASCII characters
    /// - `FieldTooLong`: a pix key too long for the account template
    /// - `AmountOutOfRange`: an amount above
    ///   [`MAX_CENTAVOS`](crate::amount::MAX_CENTAVOS), however it was
    ///   built (`Amount::from_centavos`, JSON)
    ///
    /// ## Example
    /// ```rust
    /// use pix_core::{PixPayload, PixPayloadInput};
    ///
    /// let input = PixPayloadInput::new("chave@pix.com.br", "Loja Exemplo", "São José do Rio Preto");
    /// let payload = PixPayload::generate(&input).unwrap();
    ///
    /// assert!(payload.as_str().contains("6012SAO JOSE R P"));
    /// assert!(!payload.as_str().contains("5405"));
    /// assert_eq!(payload.crc(), "5A4A");
    /// ```
    pub fn generate(input: &PixPayloadInput) -> PixResult<Self> {
        if !input.pix_key.is_ascii() {
            return Err(PixError::NonAsciiKey);
        }

        let name = sanitize_name(&input.merchant_name);
        let city = abbreviate_city(&input.merchant_city);
        let txid = sanitize_txid(&input.txid);

        let account = EmvField::template(
            tags::MERCHANT_ACCOUNT_INFO,
            &[
                EmvField::new(tags::account::GUI, PIX_GUI)?,
                EmvField::new(tags::account::KEY, input.pix_key.as_str())?,
            ],
        )?;

        let additional = EmvField::template(
            tags::ADDITIONAL_DATA,
            &[EmvField::new(tags::additional::TXID, txid.as_str())?],
        )?;

        let mut fields = vec![
            EmvField::new(tags::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT)?,
            EmvField::new(tags::POINT_OF_INITIATION, POINT_OF_INITIATION_SINGLE_USE)?,
            account,
            EmvField::new(tags::MERCHANT_CATEGORY_CODE, MERCHANT_CATEGORY_CODE)?,
            EmvField::new(tags::TRANSACTION_CURRENCY, CURRENCY_BRL)?,
        ];

        let amount = input.amount.into_amount()?;
        if let Some(amount) = amount {
            fields.push(EmvField::new(tags::TRANSACTION_AMOUNT, amount.to_string())?);
        }

        fields.push(EmvField::new(tags::COUNTRY_CODE, COUNTRY_CODE_BR)?);
        fields.push(EmvField::new(tags::MERCHANT_NAME, name)?);
        fields.push(EmvField::new(tags::MERCHANT_CITY, city)?);
        fields.push(additional);

        let mut payload: String = fields.iter().map(EmvField::encode).collect();
        payload.push_str(CRC_FIELD_HEADER);
        let crc = crc16_hex(&payload);
        payload.push_str(&crc);

        debug!(
            len = payload.len(),
            crc = %crc,
            has_amount = amount.is_some(),
            txid = %txid,
            "Generated PIX payload"
        );

        Ok(PixPayload(payload))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four hex digits of the trailing CRC field.
    pub fn crc(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PixPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PixPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PixPayload> for String {
    fn from(payload: PixPayload) -> Self {
        payload.0
    }
}

// =============================================================================
// Convenience Entry Point
// =============================================================================

/// Generates a payload from loose arguments.
///
/// `amount` accepts anything implementing [`IntoAmount`]: floats, integers,
/// numeric strings, `Option`s of those. Zero, negative, NaN and missing
/// amounts leave tag 54 out. Pass [`DEFAULT_TXID`](crate::DEFAULT_TXID) when
/// there is no transaction id.
///
/// ## Example
/// ```rust
/// use pix_core::generate_pix_payload;
///
/// let with = generate_pix_payload("k@x.com", "Loja", "Recife", 10, "***").unwrap();
/// let without = generate_pix_payload("k@x.com", "Loja", "Recife", -5, "***").unwrap();
///
/// assert!(with.contains("540510.00"));
/// assert!(!without.contains("5405"));
/// ```
pub fn generate_pix_payload(
    pix_key: &str,
    merchant_name: &str,
    merchant_city: &str,
    amount: impl IntoAmount,
    txid: &str,
) -> PixResult<String> {
    let input = PixPayloadInput::new(pix_key, merchant_name, merchant_city)
        .with_amount(amount.into_amount()?)
        .with_txid(txid);

    Ok(PixPayload::generate(&input)?.into_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::{Amount, MAX_CENTAVOS};
    use crate::crc::verify_payload_crc;
    use crate::emv::parse_fields;

    #[test]
    fn test_reference_payload() {
        let payload =
            generate_pix_payload("test@example.com", "TESTE", "CIDADE", 10.5, "TXID123").unwrap();
        assert_eq!(
            payload,
            "00020101021226380014br.gov.bcb.pix0116test@example.com\
             520400005303986540510.505802BR5905TESTE6006CIDADE\
             62110507TXID12363044353"
        );
    }

    #[test]
    fn test_field_order() {
        let payload =
            generate_pix_payload("test@example.com", "TESTE", "CIDADE", 10.5, "TXID123").unwrap();
        let tags: Vec<String> = parse_fields(&payload)
            .unwrap()
            .iter()
            .map(|f| f.tag().to_string())
            .collect();
        assert_eq!(
            tags,
            ["00", "01", "26", "52", "53", "54", "58", "59", "60", "62", "63"]
        );
    }

    #[test]
    fn test_amount_omitted() {
        for payload in [
            generate_pix_payload("k@x.com", "Loja", "Recife", 0, "***").unwrap(),
            generate_pix_payload("k@x.com", "Loja", "Recife", -5, "***").unwrap(),
            generate_pix_payload("k@x.com", "Loja", "Recife", f64::NAN, "***").unwrap(),
            generate_pix_payload("k@x.com", "Loja", "Recife", None::<f64>, "***").unwrap(),
            generate_pix_payload("k@x.com", "Loja", "Recife", "", "***").unwrap(),
        ] {
            assert!(parse_fields(&payload).unwrap().iter().all(|f| f.tag() != "54"));
            assert!(verify_payload_crc(&payload));
        }
    }

    #[test]
    fn test_zero_amount_in_input_is_omitted() {
        let input = PixPayloadInput::new("k@x.com", "Loja", "Recife")
            .with_amount(Some(Amount::from_centavos(0)));
        assert!(!PixPayload::generate(&input).unwrap().as_str().contains("5404"));
    }

    #[test]
    fn test_default_txid_yields_empty_subfield() {
        let payload = generate_pix_payload("k@x.com", "Loja", "Recife", 1, crate::DEFAULT_TXID).unwrap();
        assert!(payload.contains("62040500"));
    }

    #[test]
    fn test_point_of_initiation_is_single_use() {
        let payload = generate_pix_payload("k@x.com", "Loja", "Recife", 1, "A").unwrap();
        assert!(payload.starts_with("0002010102126"));
    }

    #[test]
    fn test_pix_key_is_verbatim() {
        let payload = generate_pix_payload("Mixed.Case+tag@Example.com", "Loja", "Recife", 1, "A").unwrap();
        assert!(payload.contains("0126Mixed.Case+tag@Example.com"));
    }

    #[test]
    fn test_non_ascii_pix_key_is_an_error() {
        let err = generate_pix_payload("😀@x.com", "Loja", "Recife", 1, "A").unwrap_err();
        assert_eq!(err, PixError::NonAsciiKey);
        assert!(generate_pix_payload("joão@pix.com", "Loja", "Recife", 1, "A").is_err());
    }

    #[test]
    fn test_oversized_pix_key_is_an_error() {
        // "0014br.gov.bcb.pix" plus the key's own "01LL" header leaves 77
        let key = "k".repeat(78);
        let err = generate_pix_payload(&key, "Loja", "Recife", 1, "A").unwrap_err();
        assert!(matches!(err, PixError::FieldTooLong { ref tag, .. } if tag == "26"));

        let key = "k".repeat(77);
        assert!(generate_pix_payload(&key, "Loja", "Recife", 1, "A").is_ok());
    }

    #[test]
    fn test_oversized_amount_is_an_error() {
        let err = generate_pix_payload("k@x.com", "Loja", "Recife", 1e10, "A").unwrap_err();
        assert!(matches!(err, PixError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_oversized_typed_amount_is_an_error() {
        let input = PixPayloadInput::new("k@x.com", "Loja", "Recife")
            .with_amount(Some(Amount::from_centavos(MAX_CENTAVOS * 1000)));
        assert!(matches!(
            PixPayload::generate(&input),
            Err(PixError::AmountOutOfRange { .. })
        ));

        let largest = PixPayloadInput::new("k@x.com", "Loja", "Recife")
            .with_amount(Some(Amount::from_centavos(MAX_CENTAVOS)));
        assert!(PixPayload::generate(&largest)
            .unwrap()
            .as_str()
            .contains("54139999999999.99"));
    }

    #[test]
    fn test_oversized_deserialized_amount_is_an_error() {
        let json = r#"{"pixKey":"k@x.com","merchantName":"Loja","merchantCity":"Recife","amount":99999999999999999}"#;
        let input: PixPayloadInput = serde_json::from_str(json).unwrap();
        assert!(matches!(
            PixPayload::generate(&input),
            Err(PixError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_payload_accessors() {
        let input = PixPayloadInput::new("test@example.com", "TESTE", "CIDADE")
            .with_amount(Some(Amount::from_centavos(1050)))
            .with_txid("TXID123");
        let payload = PixPayload::generate(&input).unwrap();
        assert_eq!(payload.crc(), "4353");
        assert_eq!(payload.to_string(), payload.as_str());
        assert_eq!(serde_json::to_string(&payload).unwrap(), format!("\"{payload}\""));
    }
}
