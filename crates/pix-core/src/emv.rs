//! # EMV TLV Encoding
//!
//! Every field of a merchant-presented payload is `ID + LEN + VALUE`:
//!
//! ```text
//! ┌──────┬──────┬──────────────────────┐
//! │  ID  │ LEN  │ VALUE                │
//! │ 2 ch │ 2 ch │ LEN chars            │
//! ├──────┼──────┼──────────────────────┤
//! │  58  │  02  │ BR                   │  → "5802BR"
//! │  26  │  38  │ 0014br.gov.bcb.pix…  │  → nested template
//! └──────┴──────┴──────────────────────┘
//! ```
//!
//! The length is explicit, so values are never escaped and may themselves
//! contain tag-like text. Templates (26, 62) are just fields whose value is a
//! concatenation of encoded subfields.

use std::fmt;

use tracing::trace;

use crate::error::{PixError, PixResult};

/// Largest value a two-digit length can describe.
pub const MAX_VALUE_LEN: usize = 99;

/// Field ids used by PIX payloads.
pub mod tags {
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    pub const POINT_OF_INITIATION: &str = "01";
    pub const MERCHANT_ACCOUNT_INFO: &str = "26";
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    pub const TRANSACTION_CURRENCY: &str = "53";
    pub const TRANSACTION_AMOUNT: &str = "54";
    pub const COUNTRY_CODE: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";
    pub const CRC: &str = "63";

    /// Subfields of the merchant account template (26).
    pub mod account {
        pub const GUI: &str = "00";
        pub const KEY: &str = "01";
    }

    /// Subfields of the additional data template (62).
    pub mod additional {
        pub const TXID: &str = "05";
    }
}

// =============================================================================
// EmvField
// =============================================================================

/// A single encoded-ready field.
///
/// Construction validates both invariants (two-digit tag, value of at most
/// 99 characters), so [`EmvField::encode`] cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmvField {
    tag: String,
    value: String,
}

impl EmvField {
    /// Creates a field, checking tag shape and value length.
    ///
    /// ## Example
    /// ```rust
    /// use pix_core::emv::EmvField;
    ///
    /// let field = EmvField::new("58", "BR").unwrap();
    /// assert_eq!(field.encode(), "5802BR");
    ///
    /// assert!(EmvField::new("5", "BR").is_err());
    /// assert!(EmvField::new("59", "X".repeat(100)).is_err());
    /// ```
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> PixResult<Self> {
        let tag = tag.into();
        let value = value.into();

        if tag.len() != 2 || !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PixError::InvalidTag(tag));
        }

        let len = value.chars().count();
        if len > MAX_VALUE_LEN {
            return Err(PixError::FieldTooLong {
                tag,
                len,
                max: MAX_VALUE_LEN,
            });
        }

        Ok(EmvField { tag, value })
    }

    /// Builds a template field whose value is the concatenation of `children`.
    ///
    /// ## Example
    /// ```rust
    /// use pix_core::emv::EmvField;
    ///
    /// let txid = EmvField::new("05", "TXID").unwrap();
    /// let additional = EmvField::template("62", &[txid]).unwrap();
    /// assert_eq!(additional.encode(), "62080504TXID");
    /// ```
    pub fn template(tag: impl Into<String>, children: &[EmvField]) -> PixResult<Self> {
        let value: String = children.iter().map(EmvField::encode).collect();
        EmvField::new(tag, value)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Length of the value in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Serializes to `ID + LEN + VALUE`.
    pub fn encode(&self) -> String {
        let encoded = self.to_string();
        trace!(tag = %self.tag, len = self.len(), "Encoded EMV field");
        encoded
    }

    /// Decodes this field's value as a nested TLV sequence.
    pub fn children(&self) -> PixResult<Vec<EmvField>> {
        parse_fields(&self.value)
    }
}

impl fmt::Display for EmvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}", self.tag, self.len(), self.value)
    }
}

/// Encodes a single field as `tag + zero-padded length + value`.
///
/// ## Example
/// ```rust
/// use pix_core::emv::format_field;
///
/// assert_eq!(format_field("26", "chave").unwrap(), "2605chave");
/// assert_eq!(format_field("62", "").unwrap(), "6200");
/// ```
pub fn format_field(tag: &str, value: &str) -> PixResult<String> {
    Ok(EmvField::new(tag, value)?.encode())
}

// =============================================================================
// Parsing
// =============================================================================

/// Splits a flat TLV sequence into fields.
///
/// Nested templates are returned as single fields; call
/// [`EmvField::children`] to descend.
///
/// ## Example
/// ```rust
/// use pix_core::emv::parse_fields;
///
/// let fields = parse_fields("0002015802BR").unwrap();
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].tag(), "58");
/// assert_eq!(fields[1].value(), "BR");
/// ```
pub fn parse_fields(data: &str) -> PixResult<Vec<EmvField>> {
    let chars: Vec<char> = data.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars.len() - pos < 4 {
            return Err(PixError::Malformed {
                offset: pos,
                reason: "truncated field header".to_string(),
            });
        }

        let tag: String = chars[pos..pos + 2].iter().collect();
        let len_text: String = chars[pos + 2..pos + 4].iter().collect();
        let len: usize = len_text
            .parse()
            .ok()
            .filter(|_| len_text.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| PixError::Malformed {
                offset: pos + 2,
                reason: format!("invalid length '{len_text}'"),
            })?;

        let start = pos + 4;
        let end = start + len;
        if end > chars.len() {
            return Err(PixError::Malformed {
                offset: start,
                reason: format!("field {tag} declares {len} characters, {} left", chars.len() - start),
            });
        }

        let value: String = chars[start..end].iter().collect();
        fields.push(EmvField::new(tag, value)?);
        pos = end;
    }

    Ok(fields)
}

// =============================================================================
// Unit Tests
// =============================================================================
