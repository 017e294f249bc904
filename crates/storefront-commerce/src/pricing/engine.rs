//! Cart pricing calculations.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{Cart, Quantity};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::pricing::PromoCode;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Total discount amount.
    pub discount_total: Money,
    /// Final total (subtotal - discount).
    pub grand_total: Money,
    /// Promo code the discount came from.
    pub promo: Option<PromoCode>,
    /// Per-line breakdown, for lines whose product is in the catalog.
    pub line_items: Vec<LineItemPricing>,
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: Quantity,
    /// unit_price * quantity.
    pub total: Money,
}

/// Holds the promo state for one checkout session and prices carts with it.
///
/// At most one code is active. Once set, every further apply is rejected
/// until [`reset_promo`](Self::reset_promo), whatever the codes are worth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingEngine {
    active: Option<PromoCode>,
}

impl PricingEngine {
    /// Create an engine with no promo applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a promo code.
    ///
    /// Fails with [`CommerceError::PromoAlreadyApplied`] if a code is already
    /// active and [`CommerceError::InvalidPromoCode`] if the code is unknown;
    /// state is unchanged on failure.
    pub fn apply_promo_code(&mut self, code: &str) -> Result<PromoCode, CommerceError> {
        if let Some(active) = self.active {
            return Err(CommerceError::PromoAlreadyApplied(active.code().to_string()));
        }

        let promo: PromoCode = code.parse()?;
        self.active = Some(promo);
        info!(code = %promo, percent_off = promo.percent_off(), "promo code applied");
        Ok(promo)
    }

    /// The active promo code, if any.
    pub fn active_promo(&self) -> Option<PromoCode> {
        self.active
    }

    /// Clear the active promo code.
    pub fn reset_promo(&mut self) {
        self.active = None;
    }

    /// Percentage currently taken off (0 when no code is active).
    pub fn discount_percent(&self) -> u32 {
        self.active.map(|p| p.percent_off()).unwrap_or(0)
    }

    /// Cart total after the active discount.
    pub fn discounted_total(&self, cart: &Cart, catalog: &Catalog) -> Money {
        self.quote(cart, catalog).grand_total
    }

    /// Full pricing breakdown.
    pub fn quote(&self, cart: &Cart, catalog: &Catalog) -> CartPricing {
        let line_items: Vec<LineItemPricing> = cart
            .items()
            .iter()
            .filter_map(|item| {
                catalog.find(&item.product_id).map(|product| LineItemPricing {
                    product_id: item.product_id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity: item.quantity,
                    total: product.line_total(item.quantity),
                })
            })
            .collect();

        let subtotal: Money = line_items.iter().map(|l| l.total).sum();
        let discount_total = self
            .active
            .map(|promo| promo.discount_for(subtotal))
            .unwrap_or_else(Money::zero);

        CartPricing {
            subtotal,
            discount_total,
            grand_total: subtotal - discount_total,
            promo: self.active,
            line_items,
        }
    }
}
