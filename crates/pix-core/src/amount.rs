//! # Amount Module
//!
//! Provides the `Amount` type for the transaction amount field (tag 54).
//!
//! ## Why Integer Centavos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The donation form hands us a JavaScript number:                       │
//! │    10.5, 0.1 + 0.2 = 0.30000000000000004, 2.675 (really 2.67499…)      │
//! │                                                                         │
//! │  OUR SOLUTION: round ONCE at the boundary, then integer centavos        │
//! │    10.5  → 1050 centavos → "10.50"                                      │
//! │    2.675 → 267 centavos  → "2.67"  (same as fixed-point formatting)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Missing Amounts
//! Zero, negative, NaN, infinite and unparseable inputs all mean "no amount":
//! the payload is built without tag 54. This is not an error.
//!
//! ## Usage
//! ```rust
//! use pix_core::amount::{Amount, IntoAmount};
//!
//! let amount = 10.5_f64.into_amount().unwrap().unwrap();
//! assert_eq!(amount.to_string(), "10.50");
//!
//! assert_eq!(0_i32.into_amount().unwrap(), None);
//! assert_eq!("abc".into_amount().unwrap(), None);
//! assert_eq!(Amount::from_centavos(2500).to_string(), "25.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{PixError, PixResult};

/// Largest amount whose rendering fits the 13-character amount field
/// ("9999999999.99").
pub const MAX_CENTAVOS: u64 = 999_999_999_999;

/// Smallest power of ten that no longer fits, in reais.
const OVERFLOW_REAIS: f64 = 10_000_000_000.0;

// =============================================================================
// Amount Type
// =============================================================================

/// A positive amount in centavos (1/100 BRL).
///
/// ## Design Decisions
/// - **u64**: PIX amounts are never negative; "no amount" is `Option::None`
/// - **Single field tuple struct**: Zero-cost abstraction over u64
/// - **Display** renders the EMV form: `<reais>.<cc>`, dot separator, no
///   grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Amount(u64);

impl Amount {
    /// Creates an amount from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use pix_core::amount::Amount;
    ///
    /// let amount = Amount::from_centavos(1099); // R$ 10,99
    /// assert_eq!(amount.centavos(), 1099);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: u64) -> Self {
        Amount(centavos)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> u64 {
        self.0
    }

    /// Returns the whole reais portion.
    #[inline]
    pub const fn reais(&self) -> u64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> u64 {
        self.0 % 100
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Rounds a float to the nearest centavo.
    ///
    /// ## Rounding
    /// The exact binary value of `value` is rounded; exact halves round up.
    /// `1.005` is stored as 1.00499… and becomes `1.00`, while `0.125` is
    /// exact and becomes `0.13`.
    ///
    /// ## Returns
    /// - `Ok(None)` for NaN, infinities, zero, negatives, and anything that
    ///   rounds to 0 centavos
    /// - `Err(AmountOutOfRange)` above [`MAX_CENTAVOS`]
    pub fn from_f64(value: f64) -> PixResult<Option<Self>> {
        if !value.is_finite() || value <= 0.0 {
            return Ok(None);
        }

        if value >= OVERFLOW_REAIS {
            return Err(PixError::AmountOutOfRange {
                value: value.to_string(),
            });
        }

        // Exact ties can only occur when value * 8 is an integer; those are
        // computed exactly, everything else is correctly rounded by fmt.
        let eighths = value * 8.0;
        let centavos = if eighths.fract() == 0.0 {
            (eighths * 12.5 + 0.5).floor() as u64
        } else {
            parse_fixed_two(&format!("{value:.2}"))
        };

        Self::checked(centavos, || value.to_string())
    }

    /// Parses a decimal string such as `"25.00"` or `" 10.5 "`.
    ///
    /// No locale handling: `"10,50"` is not a number and yields `Ok(None)`.
    pub fn parse(text: &str) -> PixResult<Option<Self>> {
        match text.trim().parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => Ok(None),
        }
    }

    /// Converts whole reais.
    pub fn from_reais(reais: i64) -> PixResult<Option<Self>> {
        if reais <= 0 {
            return Ok(None);
        }
        let centavos = (reais as u64).checked_mul(100).unwrap_or(u64::MAX);
        Self::checked(centavos, || reais.to_string())
    }

    fn checked(centavos: u64, describe: impl FnOnce() -> String) -> PixResult<Option<Self>> {
        if centavos == 0 {
            return Ok(None);
        }
        if centavos > MAX_CENTAVOS {
            return Err(PixError::AmountOutOfRange { value: describe() });
        }
        Ok(Some(Amount(centavos)))
    }
}

/// Reads a `"<digits>.<2 digits>"` string produced by `{:.2}` formatting.
fn parse_fixed_two(text: &str) -> u64 {
    let (whole, frac) = text.split_once('.').unwrap_or((text, "0"));
    let whole: u64 = whole.parse().unwrap_or(0);
    let frac: u64 = frac.parse().unwrap_or(0);
    whole * 100 + frac
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the EMV form, e.g. `10.50`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.reais(), self.centavos_part())
    }
}

// =============================================================================
// Conversion Trait
// =============================================================================

/// Anything the payload assembler accepts as an amount.
///
/// Mirrors the loose "number or numeric string" input of the donation form
/// while keeping the result typed: `Ok(None)` means "omit tag 54".
pub trait IntoAmount {
    fn into_amount(self) -> PixResult<Option<Amount>>;
}

impl IntoAmount for Amount {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::checked(self.0, || self.to_string())
    }
}

impl IntoAmount for f64 {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::from_f64(self)
    }
}

impl IntoAmount for f32 {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::from_f64(f64::from(self))
    }
}

impl IntoAmount for i32 {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::from_reais(i64::from(self))
    }
}

impl IntoAmount for i64 {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::from_reais(self)
    }
}

impl IntoAmount for u32 {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::from_reais(i64::from(self))
    }
}

impl IntoAmount for u64 {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::from_reais(i64::try_from(self).unwrap_or(i64::MAX))
    }
}

impl IntoAmount for &str {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::parse(self)
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::parse(&self)
    }
}

impl IntoAmount for &String {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        Amount::parse(self)
    }
}

impl<T: IntoAmount> IntoAmount for Option<T> {
    fn into_amount(self) -> PixResult<Option<Amount>> {
        match self {
            Some(inner) => inner.into_amount(),
            None => Ok(None),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: IntoAmount>(value: T) -> Option<String> {
        value.into_amount().unwrap().map(|a| a.to_string())
    }

    #[test]
    fn test_from_centavos() {
        let amount = Amount::from_centavos(1099);
        assert_eq!(amount.centavos(), 1099);
        assert_eq!(amount.reais(), 10);
        assert_eq!(amount.centavos_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_centavos(1050).to_string(), "10.50");
        assert_eq!(Amount::from_centavos(5).to_string(), "0.05");
        assert_eq!(Amount::from_centavos(100).to_string(), "1.00");
        assert_eq!(
            Amount::from_centavos(MAX_CENTAVOS).to_string(),
            "9999999999.99"
        );
    }

    #[test]
    fn test_float_rounding_matches_fixed_two() {
        assert_eq!(render(10.5), Some("10.50".to_string()));
        assert_eq!(render(10.0), Some("10.00".to_string()));
        assert_eq!(render(1.005), Some("1.00".to_string()));
        assert_eq!(render(0.125), Some("0.13".to_string()));
        assert_eq!(render(0.375), Some("0.38".to_string()));
        assert_eq!(render(2.675), Some("2.67".to_string()));
        assert_eq!(render(19.999), Some("20.00".to_string()));
        assert_eq!(render(0.1 + 0.2), Some("0.30".to_string()));
    }

    #[test]
    fn test_missing_amounts() {
        assert_eq!(render(0), None);
        assert_eq!(render(-5), None);
        assert_eq!(render(0.0), None);
        assert_eq!(render(-0.01), None);
        assert_eq!(render(f64::NAN), None);
        assert_eq!(render(f64::INFINITY), None);
        assert_eq!(render(None::<f64>), None);
        // Rounds to zero centavos
        assert_eq!(render(0.001), None);
    }

    #[test]
    fn test_string_amounts() {
        assert_eq!(render("25.00"), Some("25.00".to_string()));
        assert_eq!(render(" 10.5 "), Some("10.50".to_string()));
        assert_eq!(render("7"), Some("7.00".to_string()));
        assert_eq!(render(""), None);
        assert_eq!(render("abc"), None);
        assert_eq!(render("10,50"), None);
        assert_eq!(render("-3"), None);
        assert_eq!(render(String::from("1.5")), Some("1.50".to_string()));
    }

    #[test]
    fn test_integer_amounts() {
        assert_eq!(render(10), Some("10.00".to_string()));
        assert_eq!(render(20_i64), Some("20.00".to_string()));
        assert_eq!(render(3_u32), Some("3.00".to_string()));
        assert_eq!(render(0_u64), None);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            10_000_000_000.0_f64.into_amount(),
            Err(PixError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            9_999_999_999.999_f64.into_amount(),
            Err(PixError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            i64::MAX.into_amount(),
            Err(PixError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            Amount::from_centavos(MAX_CENTAVOS + 1).into_amount(),
            Err(PixError::AmountOutOfRange { .. })
        ));
        assert_eq!(
            render(9_999_999_999.99),
            Some("9999999999.99".to_string())
        );
    }

    #[test]
    fn test_zero_amount_value_is_omitted() {
        assert_eq!(Amount::from_centavos(0).into_amount().unwrap(), None);
        assert!(Amount::from_centavos(0).is_zero());
    }
}
