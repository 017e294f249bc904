//! Checkout module.
//!
//! Customer details collected at checkout and the confirmation returned once
//! an order is placed.

mod details;
mod order;

pub use details::CheckoutDetails;
pub use order::OrderConfirmation;
