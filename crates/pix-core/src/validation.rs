//! # Validation Module
//!
//! Donation input rules, checked before any payload is generated.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Donation form (TypeScript)                                   │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Giver name rules (length, charset)                                │
//! │  ├── Minimum donation                                                  │
//! │  └── Merchant configuration sanity                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Encoder (crate::payload)                                     │
//! │  └── Field length limits (PixError::FieldTooLong)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pix_core::validation::{validate_giver_name, validate_donation_amount};
//! use pix_core::Amount;
//!
//! validate_giver_name("gente_fina").unwrap();
//! validate_donation_amount(Amount::from_centavos(500)).unwrap();
//! ```

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::types::{DonationRequest, Merchant};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shortest accepted giver name.
pub const MIN_GIVER_NAME_LEN: usize = 4;

/// Longest accepted giver name (after trimming).
pub const MAX_GIVER_NAME_LEN: usize = 25;

/// Smallest accepted donation: R$ 1,00.
pub const MIN_DONATION: Amount = Amount::from_centavos(100);

/// Longest pix key that still fits the merchant account template.
pub const MAX_PIX_KEY_LEN: usize = 77;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the donor's display name.
///
/// ## Rules
/// - At least 4 characters
/// - At most 25 characters once surrounding whitespace is trimmed
/// - Only ASCII letters, digits, and `-`, `_`, `.`, `@`
///
/// ## Example
/// ```rust
/// use pix_core::validation::validate_giver_name;
///
/// assert!(validate_giver_name("joao.silva").is_ok());
/// assert!(validate_giver_name("ana").is_err());
/// assert!(validate_giver_name("João Silva").is_err());
/// ```
pub fn validate_giver_name(name: &str) -> ValidationResult<()> {
    if name.chars().count() < MIN_GIVER_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "giver name".to_string(),
            min: MIN_GIVER_NAME_LEN,
        });
    }

    if name.trim().chars().count() > MAX_GIVER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "giver name".to_string(),
            max: MAX_GIVER_NAME_LEN,
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "giver name".to_string(),
            reason: "use only letters, numbers, and - _ . @".to_string(),
        });
    }

    Ok(())
}

/// Validates a merchant pix key.
///
/// ## Rules
/// - Must not be blank
/// - ASCII only (field lengths and the CRC then count the same units)
/// - At most 77 characters (longer keys overflow tag 26)
pub fn validate_pix_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "pix key".to_string(),
        });
    }

    if !key.is_ascii() {
        return Err(ValidationError::InvalidFormat {
            field: "pix key".to_string(),
            reason: "must contain only ASCII characters".to_string(),
        });
    }

    if key.len() > MAX_PIX_KEY_LEN {
        return Err(ValidationError::TooLong {
            field: "pix key".to_string(),
            max: MAX_PIX_KEY_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a donation amount.
///
/// ## Rules
/// - At least [`MIN_DONATION`] (R$ 1,00)
///
/// ## Example
/// ```rust
/// use pix_core::validation::validate_donation_amount;
/// use pix_core::Amount;
///
/// assert!(validate_donation_amount(Amount::from_centavos(100)).is_ok());
/// assert!(validate_donation_amount(Amount::from_centavos(99)).is_err());
/// ```
pub fn validate_donation_amount(amount: Amount) -> ValidationResult<()> {
    if amount < MIN_DONATION {
        return Err(ValidationError::BelowMinimum {
            field: "amount".to_string(),
            min: MIN_DONATION.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the merchant side: key present and encodable, name and city
/// present.
pub fn validate_merchant(merchant: &Merchant) -> ValidationResult<()> {
    validate_pix_key(&merchant.pix_key)?;

    if merchant.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "merchant name".to_string(),
        });
    }

    if merchant.city.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "merchant city".to_string(),
        });
    }

    Ok(())
}

/// Validates a donation request: name first, then amount.
pub fn validate_donation(request: &DonationRequest) -> ValidationResult<()> {
    validate_giver_name(&request.giver_name)?;
    validate_donation_amount(request.amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
