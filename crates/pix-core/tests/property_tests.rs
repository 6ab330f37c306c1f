//! Property-based tests for pix-core

use pix_core::crc::{crc16_hex, CRC_FIELD_HEADER};
use pix_core::emv::parse_fields;
use pix_core::text::{abbreviate_city, normalize, sanitize_name, sanitize_txid, MAX_CITY_LEN};
use pix_core::generate_pix_payload;
use proptest::prelude::*;

/// Any text a donation form could send: accents, symbols, emoji, whitespace.
fn free_text() -> impl Strategy<Value = String> {
    "\\PC{0,40}"
}

/// Pix keys short enough for the account template.
fn pix_key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9@.+_-]{1,60}"
}

proptest! {
    /// Same arguments always give the same payload
    #[test]
    fn test_generation_is_deterministic(
        key in pix_key(),
        name in free_text(),
        city in free_text(),
        cents in 0u32..1_000_000,
        txid in free_text(),
    ) {
        let amount = f64::from(cents) / 100.0;
        let first = generate_pix_payload(&key, &name, &city, amount, &txid).unwrap();
        let second = generate_pix_payload(&key, &name, &city, amount, &txid).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every payload starts with the format indicator and ends with a CRC
    /// computed over everything before it, "6304" included
    #[test]
    fn test_prefix_and_crc(
        key in pix_key(),
        name in free_text(),
        city in free_text(),
        txid in free_text(),
    ) {
        let payload = generate_pix_payload(&key, &name, &city, 12.34, &txid).unwrap();
        prop_assert!(payload.starts_with("000201"));

        let (covered, crc) = payload.split_at(payload.len() - 4);
        prop_assert!(covered.ends_with(CRC_FIELD_HEADER));
        prop_assert_eq!(crc16_hex(covered), crc);
    }

    /// Payloads always decode back into well-formed fields ending with tag 63
    #[test]
    fn test_payload_is_well_formed_tlv(
        key in pix_key(),
        name in free_text(),
        city in free_text(),
    ) {
        let payload = generate_pix_payload(&key, &name, &city, 1, "***").unwrap();
        let fields = parse_fields(&payload).unwrap();
        prop_assert_eq!(fields.last().map(|f| f.tag()), Some("63"));
    }

    /// normalize(normalize(x)) == normalize(x)
    #[test]
    fn test_normalize_is_idempotent(text in free_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Sanitized fields never carry forbidden characters or lowercase
    #[test]
    fn test_sanitized_fields_have_no_forbidden_characters(text in free_text()) {
        for sanitized in [sanitize_name(&text), sanitize_txid(&text), abbreviate_city(&text)] {
            prop_assert!(
                !sanitized.chars().any(|c| matches!(c, '@' | '#' | '_') || c.is_lowercase()),
                "sanitized: {:?}", sanitized
            );
            prop_assert!(sanitized.is_ascii());
        }
    }

    /// City output fits its field
    #[test]
    fn test_city_fits_field(city in free_text()) {
        prop_assert!(abbreviate_city(&city).len() <= MAX_CITY_LEN);
    }

    /// The pix key appears verbatim, '@' and case included
    #[test]
    fn test_pix_key_passthrough(key in pix_key()) {
        let payload = generate_pix_payload(&key, "Loja", "Recife", 1, "***").unwrap();
        let account = parse_fields(&payload)
            .unwrap()
            .into_iter()
            .find(|f| f.tag() == "26")
            .unwrap();
        let children = account.children().unwrap();
        prop_assert_eq!(children[1].value(), key.as_str());
    }

    /// Zero and negative amounts never produce tag 54
    #[test]
    fn test_non_positive_amounts_are_omitted(amount in -1_000_000i64..=0) {
        let payload = generate_pix_payload("k@x.com", "Loja", "Recife", amount, "***").unwrap();
        let has_amount = parse_fields(&payload).unwrap().iter().any(|f| f.tag() == "54");
        prop_assert!(!has_amount);
    }
}

#[test]
fn test_amount_zero_and_minus_five_are_omitted() {
    for amount in [0, -5] {
        let payload = generate_pix_payload("k@x.com", "Loja", "Recife", amount, "***").unwrap();
        assert!(parse_fields(&payload).unwrap().iter().all(|f| f.tag() != "54"));
    }
}
