//! # Error Types
//!
//! Domain-specific error types for pix-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pix-core errors (this file)                                           │
//! │  ├── PixError         - Encoding faults (payload cannot be built)      │
//! │  ├── ValidationError  - Donation input rule failures                   │
//! │  └── CoreError        - Wraps both for the donation flow               │
//! │                                                                         │
//! │  pix-cli errors (separate crate)                                       │
//! │  └── ConfigError      - Missing/invalid merchant configuration         │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        PixError ────────┴─► CoreError ─► anyhow (CLI) ─► stderr        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! A zero, negative or unparseable amount is not an error: the amount field
//! is simply left out of the payload. Callers that want a hard failure for
//! those amounts validate before encoding (see [`crate::validation`]).

use thiserror::Error;

// =============================================================================
// Encoding Error
// =============================================================================

/// Faults that prevent a payload from being encoded.
///
/// When one of these is returned the caller must not show, copy or store any
/// payload; there is no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixError {
    /// Tag is not exactly two ASCII digits.
    #[error("Invalid EMV tag '{0}': must be two decimal digits")]
    InvalidTag(String),

    /// Value does not fit the field's length limit.
    ///
    /// ## When This Occurs
    /// - A pix key longer than 77 characters (tag 26 would exceed 99)
    /// - A hand-built [`crate::emv::EmvField`] with more than 99 characters
    #[error("Field {tag} is {len} characters long, maximum is {max}")]
    FieldTooLong { tag: String, len: usize, max: usize },

    /// Pix key contains non-ASCII characters.
    ///
    /// Field lengths count characters while the CRC runs over bytes, so such a
    /// key would yield a payload whose lengths and checksum disagree.
    #[error("Pix key must contain only ASCII characters")]
    NonAsciiKey,

    /// Amount is positive but too large for the 13-character amount field.
    #[error("Amount {value} does not fit the EMV amount field")]
    AmountOutOfRange { value: String },

    /// Input is not a well-formed TLV sequence.
    #[error("Malformed payload at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when donation form input doesn't meet the rules enforced
/// before a payload is generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., disallowed characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Amount is below the accepted minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors of the donation flow, which both validates and encodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Payload encoding failed (wraps PixError).
    #[error("Encoding error: {0}")]
    Encoding(#[from] PixError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PixError.
pub type PixResult<T> = Result<T, PixError>;

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
