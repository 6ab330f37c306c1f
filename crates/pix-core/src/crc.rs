//! # CRC-16/CCITT-FALSE
//!
//! Checksum carried in the last field (tag 63) of every PIX payload.
//!
//! ## Parameters
//! ```text
//! ┌──────────────┬──────────┐
//! │ width        │ 16       │
//! │ poly         │ 0x1021   │
//! │ init         │ 0xFFFF   │
//! │ reflect in   │ no       │
//! │ reflect out  │ no       │
//! │ xor out      │ 0x0000   │
//! │ check        │ 0x29B1   │  ← crc16(b"123456789")
//! └──────────────┴──────────┘
//! ```
//!
//! Readers reject payloads computed with any other variant (XMODEM's init of
//! 0x0000 is the usual mistake).

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

/// Header of the CRC field: tag `63`, length `04`.
pub const CRC_FIELD_HEADER: &str = "6304";

/// Computes CRC-16/CCITT-FALSE over raw bytes.
///
/// ## Example
/// ```rust
/// use pix_core::crc::crc16;
///
/// assert_eq!(crc16(b"123456789"), 0x29B1);
/// assert_eq!(crc16(b""), 0xFFFF);
/// ```
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = INIT;

    for &byte in data {
        crc ^= u16::from(byte) << 8;

        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// Computes the CRC of a string's UTF-8 bytes as 4 uppercase hex digits.
///
/// ## Example
/// ```rust
/// use pix_core::crc::crc16_hex;
///
/// assert_eq!(crc16_hex("123456789"), "29B1");
/// assert_eq!(crc16_hex("A"), "B915");
/// ```
pub fn crc16_hex(data: &str) -> String {
    format!("{:04X}", crc16(data.as_bytes()))
}

/// Checks the trailing `6304XXXX` field of a payload.
///
/// The checksum covers everything before it including its own `6304` header.
/// Returns `false` for anything too short or without that header.
pub fn verify_payload_crc(payload: &str) -> bool {
    let Some(split) = payload.len().checked_sub(4) else {
        return false;
    };
    if !payload.is_char_boundary(split) {
        return false;
    }

    let (covered, checksum) = payload.split_at(split);
    if !covered.ends_with(CRC_FIELD_HEADER) {
        return false;
    }

    crc16_hex(covered) == checksum
}

// =============================================================================
// Unit Tests
// =============================================================================
