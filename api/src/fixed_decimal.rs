//! Provides an exact decimal type for on-chain 18-decimal fixed-point values.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use thiserror::Error;

/// Number of fractional digits carried by every on-chain amount.
pub const DECIMALS: usize = 18;

/// 10^18, the scale of one whole unit.
pub const SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// An error that can occur when parsing a string into a `FixedDecimal`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseAmountError {
    /// Nothing was entered.
    #[error("amount is empty")]
    Empty,
    /// The string is not in a valid numeric format (e.g., "abc", "1.2.3", "-4").
    #[error("invalid amount format")]
    InvalidFormat,
    /// The string has more than 18 decimal places.
    #[error("too many decimal places (at most 18)")]
    TooManyDecimals,
    /// The value does not fit into 256 bits once scaled.
    #[error("amount is too large")]
    Overflow,
}

/// A non-negative decimal quantity stored as an integer scaled by 10^18.
///
/// This is the representation the token and staking contracts use for every
/// amount, so conversion to and from the wire is lossless. The default
/// `Display` implementation prints the exact value with trailing zeros
/// trimmed, keeping at least one fractional digit (e.g. "100.0", "0.25").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedDecimal(U256);

impl FixedDecimal {
    pub const ZERO: Self = Self(U256::ZERO);
    pub const MAX: Self = Self(U256::MAX);

    // --- Constructors ---

    /// Wraps a raw on-chain value (already scaled by 10^18).
    pub const fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// Creates a value from a whole number of units.
    pub fn from_units(units: u64) -> Self {
        Self(U256::from(units) * SCALE)
    }

    /// Parses a plain decimal string such as "100", "0.5" or ".25".
    ///
    /// Surrounding whitespace is ignored. Signs, exponents and thousands
    /// separators are rejected.
    pub fn new_from_str(s: &str) -> Result<Self, ParseAmountError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseAmountError::Empty);
        }

        let mut parts = s.split('.');
        let major_str = parts.next().unwrap_or("");
        let minor_str = parts.next().unwrap_or("");

        if parts.next().is_some() || (major_str.is_empty() && minor_str.is_empty()) {
            return Err(ParseAmountError::InvalidFormat);
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(major_str) || !all_digits(minor_str) {
            return Err(ParseAmountError::InvalidFormat);
        }
        if minor_str.len() > DECIMALS {
            return Err(ParseAmountError::TooManyDecimals);
        }

        let major = if major_str.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(major_str, 10).map_err(|_| ParseAmountError::Overflow)?
        };
        let minor = if minor_str.is_empty() {
            U256::ZERO
        } else {
            let padded = format!("{minor_str:0<width$}", width = DECIMALS);
            U256::from_str_radix(&padded, 10).map_err(|_| ParseAmountError::InvalidFormat)?
        };

        major
            .checked_mul(SCALE)
            .and_then(|scaled| scaled.checked_add(minor))
            .map(Self)
            .ok_or(ParseAmountError::Overflow)
    }

    // --- Getters ---

    /// Returns the raw fixed-point integer.
    pub const fn as_wei(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    // --- Display Methods ---

    /// Formats the value rounded half-up to `places` fractional digits, always
    /// printing exactly that many (e.g. `to_fixed(2)` of 0.31536 is "0.32").
    pub fn to_fixed(&self, places: usize) -> String {
        if places >= DECIMALS {
            let (major, minor) = self.split();
            return format!("{major}.{minor:0<places$}");
        }

        let drop = U256::from(10u8).pow(U256::from(DECIMALS - places));
        let half = drop / U256::from(2u8);
        let rounded = self.0.saturating_add(half) / drop;

        if places == 0 {
            return rounded.to_string();
        }
        let keep = U256::from(10u8).pow(U256::from(places));
        let major = rounded / keep;
        let minor = (rounded % keep).to_string();
        format!("{major}.{minor:0>places$}")
    }

    /// Whole units and the zero-padded 18-digit fraction.
    fn split(&self) -> (U256, String) {
        let major = self.0 / SCALE;
        let minor = (self.0 % SCALE).to_string();
        (major, format!("{minor:0>DECIMALS$}"))
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.split();
        let trimmed = minor.trim_end_matches('0');
        let minor = if trimmed.is_empty() { "0" } else { trimmed };
        write!(f, "{major}.{minor}")
    }
}

impl FromStr for FixedDecimal {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new_from_str(s)
    }
}

impl From<U256> for FixedDecimal {
    fn from(wei: U256) -> Self {
        Self::from_wei(wei)
    }
}
