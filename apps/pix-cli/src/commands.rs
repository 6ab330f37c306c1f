//! Subcommand implementations.
//!
//! Each function returns what the binary prints, so the commands can be tested
//! without capturing stdout.

use anyhow::{Context, Result};
use pix_core::crc::{crc16_hex, verify_payload_crc};
use pix_core::emv::{parse_fields, tags, EmvField};
use pix_core::{generate_pix_payload, prepare_donation, Amount, DonationReceipt, DonationRequest};
use tracing::debug;

use crate::config::MerchantConfig;

/// `pix payload`: encodes a payload from explicit arguments.
pub fn payload(key: &str, name: &str, city: &str, amount: Option<&str>, txid: &str) -> Result<String> {
    generate_pix_payload(key, name, city, amount, txid).context("Failed to generate PIX payload")
}

/// Reads a donation amount; anything that is not a positive number becomes
/// zero so that validation reports the minimum.
fn donation_amount(text: &str) -> Result<Amount> {
    let amount = Amount::parse(text)?;
    Ok(amount.unwrap_or(Amount::from_centavos(0)))
}

/// `pix donate`: validated donation for the configured merchant.
///
/// Plain mode prints only the payload; JSON mode prints the whole receipt.
pub fn donate(config: &MerchantConfig, giver: &str, amount: &str, json: bool) -> Result<String> {
    let request = DonationRequest::new(giver, donation_amount(amount)?);
    let receipt = prepare_donation(&config.merchant(), &request, &config.validation_salt)
        .context("Donation rejected")?;

    if json {
        Ok(serde_json::to_string_pretty(&receipt)?)
    } else {
        Ok(receipt.payload)
    }
}

/// `pix verify`: checks a stored payload/hash pair against the donation it
/// claims to encode.
pub fn verify(
    config: &MerchantConfig,
    payload: &str,
    hash: &str,
    giver: &str,
    amount: &str,
) -> Result<bool> {
    let request = DonationRequest::new(giver, donation_amount(amount)?);
    let receipt = DonationReceipt {
        payload: payload.to_string(),
        integrity_hash: hash.to_string(),
    };
    Ok(receipt.verify(&config.merchant(), &request, &config.validation_salt))
}

/// `pix crc`: CRC-16/CCITT-FALSE of the argument's UTF-8 bytes.
pub fn crc(data: &str) -> String {
    crc16_hex(data)
}

/// `pix inspect`: one line per field, templates indented, then the CRC
/// verdict.
pub fn inspect(payload: &str) -> Result<String> {
    let payload = payload.trim();
    let fields = parse_fields(payload).context("Not a valid EMV payload")?;
    debug!(fields = fields.len(), "Parsed payload");

    let mut out = String::new();
    for field in &fields {
        out.push_str(&field_line(field, 0));
        if is_template(field.tag()) {
            for child in field.children().context("Malformed template")? {
                out.push_str(&field_line(&child, 1));
            }
        }
    }

    let verdict = if verify_payload_crc(payload) {
        "valid"
    } else {
        "INVALID"
    };
    out.push_str("CRC: ");
    out.push_str(verdict);
    Ok(out)
}

fn is_template(tag: &str) -> bool {
    tag == tags::MERCHANT_ACCOUNT_INFO || tag == tags::ADDITIONAL_DATA
}

/// `TT LL value`, indented two spaces per nesting level.
fn field_line(field: &EmvField, depth: usize) -> String {
    format!(
        "{:indent$}{} {:02} {}\n",
        "",
        field.tag(),
        field.len(),
        field.value(),
        indent = depth * 2
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "00020101021226380014br.gov.bcb.pix0116test@example.com\
                             520400005303986540510.505802BR5905TESTE6006CIDADE\
                             62110507TXID12363044353";

    fn config() -> MerchantConfig {
        MerchantConfig {
            pix_key: "streamer@pix.com".to_string(),
            merchant_name: "Streamer".to_string(),
            merchant_city: "São Paulo".to_string(),
            validation_salt: "s3cret".to_string(),
        }
    }

    #[test]
    fn test_payload_command() {
        let out = payload("test@example.com", "TESTE", "CIDADE", Some("10.5"), "TXID123").unwrap();
        assert_eq!(out, REFERENCE);
    }

    #[test]
    fn test_payload_without_amount() {
        let out = payload("k@x.com", "Loja", "Recife", None, "***").unwrap();
        assert!(!out.contains("5405"));
        assert!(out.contains("62040500"));
    }

    #[test]
    fn test_payload_rejects_long_key() {
        assert!(payload(&"k".repeat(90), "Loja", "Recife", None, "***").is_err());
    }

    #[test]
    fn test_donate_plain_and_json() {
        let plain = donate(&config(), "joao", "25", false).unwrap();
        assert!(plain.ends_with("62080504JOAO6304D97E"));

        let json = donate(&config(), "joao", "25", true).unwrap();
        let receipt: DonationReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt.payload, plain);
        assert_eq!(
            receipt.integrity_hash,
            "4a7e4fbc6d3ff6c35da3139d7aec5361e08eb77940fabd311c75d82591c1fb13"
        );
    }

    #[test]
    fn test_donate_validation_errors() {
        let err = donate(&config(), "ab", "25", false).unwrap_err();
        assert!(format!("{err:#}").contains("at least 4 characters"));

        let err = donate(&config(), "joao", "0.50", false).unwrap_err();
        assert!(format!("{err:#}").contains("at least 1.00"));

        let err = donate(&config(), "joao", "abc", false).unwrap_err();
        assert!(format!("{err:#}").contains("at least 1.00"));
    }

    #[test]
    fn test_verify_command() {
        let json = donate(&config(), "joao", "25", true).unwrap();
        let receipt: DonationReceipt = serde_json::from_str(&json).unwrap();

        assert!(verify(&config(), &receipt.payload, &receipt.integrity_hash, "joao", "25").unwrap());
        assert!(!verify(&config(), &receipt.payload, &receipt.integrity_hash, "joao", "26").unwrap());

        let tampered = receipt.payload.replace("streamer@pix.com", "attacker@pix.co");
        assert!(!verify(&config(), &tampered, &receipt.integrity_hash, "joao", "25").unwrap());
    }

    #[test]
    fn test_crc_command() {
        assert_eq!(crc("123456789"), "29B1");
    }

    #[test]
    fn test_inspect_command() {
        let out = inspect(REFERENCE).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "00 02 01");
        assert!(lines.contains(&"  01 16 test@example.com"));
        assert!(lines.contains(&"54 05 10.50"));
        assert!(lines.contains(&"  05 07 TXID123"));
        assert_eq!(lines.last(), Some(&"CRC: valid"));
    }

    #[test]
    fn test_field_line_indents_children() {
        let field = EmvField::new("05", "TXID").unwrap();
        assert_eq!(field_line(&field, 0), "05 04 TXID\n");
        assert_eq!(field_line(&field, 1), "  05 04 TXID\n");
    }

    #[test]
    fn test_inspect_flags_bad_crc() {
        let tampered = REFERENCE.replace("10.50", "99.50");
        assert!(inspect(&tampered).unwrap().ends_with("CRC: INVALID"));
        assert!(inspect("0005AB").is_err());
    }
}
