//! Promo codes.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A whitelisted promo code and the percentage it takes off the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromoCode {
    /// 10% off.
    Ostad10,
    /// 5% off.
    Ostad5,
}

impl PromoCode {
    /// Every accepted code.
    pub const ALL: [PromoCode; 2] = [PromoCode::Ostad10, PromoCode::Ostad5];

    /// Canonical (normalized) spelling.
    pub fn code(&self) -> &'static str {
        match self {
            PromoCode::Ostad10 => "ostad10",
            PromoCode::Ostad5 => "ostad5",
        }
    }

    /// Whole-number percentage off.
    pub fn percent_off(&self) -> u32 {
        match self {
            PromoCode::Ostad10 => 10,
            PromoCode::Ostad5 => 5,
        }
    }

    /// Look up user input after trimming and lowercasing it.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "ostad10" => Some(PromoCode::Ostad10),
            "ostad5" => Some(PromoCode::Ostad5),
            _ => None,
        }
    }

    /// Amount this code takes off `subtotal`.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.percent_off())
    }
}

impl FromStr for PromoCode {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CommerceError::InvalidPromoCode(s.trim().to_string()))
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
