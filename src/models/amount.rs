use crate::error::{LedgerError, Result};
use ethers::{
    types::U256,
    utils::{format_units, parse_units},
};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fractional digits of the payment token.
pub const TOKEN_DECIMALS: u32 = 6;

// Largest whole part whose scaled value still fits in a U256.
const MAX_WHOLE_DIGITS: usize = 71;

/// A token amount held in smallest units.
///
/// Decimal strings are parsed once on the way in and rendered once on the way
/// out; everything in between works on the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(U256([0; 4]));

    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a human decimal such as `"12.5"` into smallest units.
    ///
    /// Only digits and a single `.` are accepted; separators such as `,`
    /// are rejected.
    pub fn parse(decimal: &str) -> Result<Self> {
        let cleaned = decimal.trim();
        if cleaned.is_empty() {
            return Err(LedgerError::InvalidAmount(decimal.to_string()));
        }

        let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned, ""));
        let digits_ok = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !digits_ok(whole) || !digits_ok(fraction) {
            return Err(LedgerError::InvalidAmount(decimal.to_string()));
        }
        if fraction.len() > TOKEN_DECIMALS as usize {
            return Err(LedgerError::InvalidAmount(format!(
                "{} has more than {} fractional digits",
                decimal, TOKEN_DECIMALS
            )));
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > MAX_WHOLE_DIGITS {
            return Err(LedgerError::InvalidAmount(format!("{} is too large", decimal)));
        }

        let normalized = format!(
            "{}.{}",
            if whole.is_empty() { "0" } else { whole },
            if fraction.is_empty() { "0" } else { fraction }
        );
        let raw: U256 = parse_units(&normalized, TOKEN_DECIMALS)
            .map_err(|e| LedgerError::InvalidAmount(format!("{}: {}", decimal, e)))?
            .into();

        Ok(Self(raw))
    }

    /// Decimal rendering without trailing fractional zeros, e.g. `"12.5"`.
    pub fn to_decimal_string(&self) -> String {
        let formatted = format_units(self.0, TOKEN_DECIMALS)
            .unwrap_or_else(|_| self.0.to_string());
        match formatted.split_once('.') {
            Some((whole, fraction)) => {
                let fraction = fraction.trim_end_matches('0');
                if fraction.is_empty() {
                    whole.to_string()
                } else {
                    format!("{}.{}", whole, fraction)
                }
            }
            None => formatted,
        }
    }
}

impl From<U256> for TokenAmount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl FromStr for TokenAmount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}
