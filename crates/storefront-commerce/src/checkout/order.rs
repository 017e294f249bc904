//! Order confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutDetails;
use crate::ids::OrderId;
use crate::money::Money;
use crate::pricing::{CartPricing, LineItemPricing, PromoCode};

/// What the customer gets back when an order is placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Order reference.
    pub order_id: OrderId,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Who placed it.
    pub customer: CheckoutDetails,
    /// Purchased lines, priced.
    pub lines: Vec<LineItemPricing>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    /// Promo code used, if any.
    pub promo: Option<PromoCode>,
}

impl OrderConfirmation {
    /// Build a confirmation from a final quote, stamped now.
    pub fn new(customer: CheckoutDetails, pricing: CartPricing) -> Self {
        Self {
            order_id: OrderId::generate(),
            placed_at: Utc::now(),
            customer,
            lines: pricing.line_items,
            subtotal: pricing.subtotal,
            discount: pricing.discount_total,
            total: pricing.grand_total,
            promo: pricing.promo,
        }
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// One-line summary for receipts and logs.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Order {} for {}: {} item(s), total {}",
            self.order_id,
            self.customer.name,
            self.item_count(),
            self.total
        );
        if let Some(promo) = self.promo {
            line.push_str(&format!(" ({} saved with {})", self.discount, promo));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, Quantity};
    use crate::catalog::{Catalog, Product};
    use crate::ids::ProductId;
    use crate::pricing::PricingEngine;

    fn pricing(promo: Option<&str>) -> CartPricing {
        let catalog =
            Catalog::from_products(vec![Product::new(1, "Kettle", Money::new(2500))]).unwrap();
        let mut cart = Cart::new();
        cart.add(ProductId::Int(1), Quantity::new(2).unwrap());

        let mut engine = PricingEngine::new();
        if let Some(code) = promo {
            engine.apply_promo_code(code).unwrap();
        }
        engine.quote(&cart, &catalog)
    }

    fn customer() -> CheckoutDetails {
        CheckoutDetails::new("Ada", "ada@example.com", "1 Main St")
    }

    #[test]
    fn test_confirmation_from_quote() {
        let order = OrderConfirmation::new(customer(), pricing(Some("ostad10")));

        assert!(order.order_id.as_str().starts_with("ord_"));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.subtotal.amount_cents, 5000);
        assert_eq!(order.discount.amount_cents, 500);
        assert_eq!(order.total.amount_cents, 4500);
        assert_eq!(order.promo, Some(PromoCode::Ostad10));
    }

    #[test]
    fn test_summary() {
        let plain = OrderConfirmation::new(customer(), pricing(None));
        assert!(plain.summary().ends_with("2 item(s), total $50.00"));

        let promo = OrderConfirmation::new(customer(), pricing(Some("ostad5")));
        assert!(promo.summary().ends_with("($2.50 saved with ostad5)"));
    }
}
