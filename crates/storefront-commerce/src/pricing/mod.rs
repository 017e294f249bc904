//! Pricing module.
//!
//! Subtotals, the promo-code whitelist, and the discounted total.

mod engine;
mod promo;

pub use engine::{CartPricing, LineItemPricing, PricingEngine};
pub use promo::PromoCode;
