//! # Text Sanitization
//!
//! Prepares free-form user text for the fixed-width EMV fields.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "São José do Rio Preto"                                                │
//! │        │                                                                │
//! │        ▼  normalize()                                                   │
//! │  NFD ─► drop U+0300..U+036F ─► uppercase ─► keep [A-Z0-9 .-] ─► trim    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  "SAO JOSE DO RIO PRETO"  (21 chars, too long for tag 60)               │
//! │        │                                                                │
//! │        ▼  abbreviate_city()                                             │
//! │  "SAO JOSE R P"           (12 chars)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total: any input string yields an output, and the
//! output is always ASCII.

use unicode_normalization::UnicodeNormalization;

/// Maximum length of the merchant city field (tag 60).
pub const MAX_CITY_LEN: usize = 15;

/// Maximum length of the merchant name field (tag 59).
pub const MAX_NAME_LEN: usize = 25;

/// Maximum length of the transaction id subfield (tag 62/05).
pub const MAX_TXID_LEN: usize = 25;

/// Words dropped when abbreviating past the second word.
const LINKING_WORDS: &[&str] = &["DE", "DO", "DA", "DAS", "DOS", "E"];

// =============================================================================
// Normalizer
// =============================================================================

/// Strips accents, uppercases and removes characters outside `[A-Z0-9 .-]`.
///
/// ## Example
/// ```rust
/// use pix_core::text::normalize;
///
/// assert_eq!(normalize("José Açúcar"), "JOSE ACUCAR");
/// assert_eq!(normalize("João@Silva#123"), "JOAOSILVA123");
/// assert_eq!(normalize("  são paulo  "), "SAO PAULO");
/// ```
pub fn normalize(text: &str) -> String {
    let upper: String = text
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect::<String>()
        .to_uppercase();

    upper
        .chars()
        .filter(|c| is_field_char(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn is_field_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, ' ' | '.' | '-')
}

/// Normalizes a merchant name and caps it to [`MAX_NAME_LEN`].
///
/// The cut is a plain prefix; a trailing space left by the cut is kept.
pub fn sanitize_name(name: &str) -> String {
    truncate(&normalize(name), MAX_NAME_LEN).to_string()
}

/// Uppercases a transaction id, keeps only `[A-Z0-9]` and caps it to
/// [`MAX_TXID_LEN`].
///
/// Stricter than [`normalize`]: spaces, dots and dashes are dropped too, and
/// accented letters are dropped rather than stripped.
///
/// ## Example
/// ```rust
/// use pix_core::text::sanitize_txid;
///
/// assert_eq!(sanitize_txid("tx-id@123#456"), "TXID123456");
/// assert_eq!(sanitize_txid("***"), "");
/// ```
pub fn sanitize_txid(txid: &str) -> String {
    txid.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .take(MAX_TXID_LEN)
        .collect()
}

// =============================================================================
// City Abbreviator
// =============================================================================

/// Shrinks a city name to at most [`MAX_CITY_LEN`] characters.
///
/// ## Rules
/// - Fits already: returned normalized, untouched
/// - One word: hard cut at 15 characters
/// - Several words: first word in full, second in full if it fits (else its
///   initial), then initials of the remaining words, skipping linking words
///   (DE, DO, DA, DAS, DOS, E) and stopping at the first initial that does
///   not fit
///
/// ## Example
/// ```rust
/// use pix_core::text::abbreviate_city;
///
/// assert_eq!(abbreviate_city("São José do Rio Preto"), "SAO JOSE R P");
/// assert_eq!(abbreviate_city("Belo Horizonte"), "BELO HORIZONTE");
/// assert_eq!(abbreviate_city("Paranaguamirimzinho"), "PARANAGUAMIRIMZ");
/// ```
pub fn abbreviate_city(city: &str) -> String {
    let sanitized = normalize(city);

    if sanitized.len() <= MAX_CITY_LEN {
        return sanitized;
    }

    let words: Vec<&str> = sanitized.split_whitespace().collect();

    if words.len() == 1 {
        return truncate(&sanitized, MAX_CITY_LEN).to_string();
    }

    let mut abbreviated = words[0].to_string();

    let second = words[1];
    if abbreviated.len() + 1 + second.len() <= MAX_CITY_LEN {
        abbreviated.push(' ');
        abbreviated.push_str(second);
    } else {
        abbreviated.push(' ');
        abbreviated.push_str(initial(second));
    }

    for word in &words[2..] {
        if LINKING_WORDS.contains(word) {
            continue;
        }

        if abbreviated.len() + 2 > MAX_CITY_LEN {
            break;
        }
        abbreviated.push(' ');
        abbreviated.push_str(initial(word));
    }

    if abbreviated.len() > MAX_CITY_LEN {
        return truncate(&abbreviated, MAX_CITY_LEN).trim_end().to_string();
    }

    abbreviated
}

/// First character of an ASCII word.
fn initial(word: &str) -> &str {
    &word[..1]
}

/// Prefix of at most `max` bytes. Inputs here are ASCII, so bytes are chars.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        text
    } else {
        &text[..max]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
