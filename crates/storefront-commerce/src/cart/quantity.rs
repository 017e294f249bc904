//! Line item quantities.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line item quantity, always at least one.
///
/// User input never fails to become a quantity: it is normalized with
/// [`Quantity::normalize`] or [`Quantity::parse_or_default`]. Stored data
/// only rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity; `None` for zero.
    pub fn new(n: u32) -> Option<Self> {
        match n {
            0 => None,
            n => Some(Quantity(n)),
        }
    }

    /// `max(1, floor(n))`, saturating at `u32::MAX`. Non-finite input yields one.
    ///
    /// ```
    /// use storefront_commerce::cart::Quantity;
    /// assert_eq!(Quantity::normalize(2.9).get(), 2);
    /// assert_eq!(Quantity::normalize(-4.0).get(), 1);
    /// assert_eq!(Quantity::normalize(f64::NAN).get(), 1);
    /// assert_eq!(Quantity::normalize(10000.0).get(), 10000);
    /// ```
    pub fn normalize(n: f64) -> Self {
        if !n.is_finite() {
            return Self::ONE;
        }
        let floored = n.floor();
        if floored < 1.0 {
            Self::ONE
        } else if floored >= f64::from(u32::MAX) {
            Quantity(u32::MAX)
        } else {
            Quantity(floored as u32)
        }
    }

    /// Parse free-form user input, falling back to one when the text is not
    /// a number.
    pub fn parse_or_default(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(Self::normalize)
            .unwrap_or(Self::ONE)
    }

    /// The raw count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Add two quantities, saturating at `u32::MAX`.
    pub fn saturating_add(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CommerceError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        if n == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        Ok(Quantity(n))
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
