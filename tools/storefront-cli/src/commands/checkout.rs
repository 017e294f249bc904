//! Checkout command.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};
use storefront_cache::KvStore;
use storefront_commerce::checkout::{CheckoutDetails, OrderConfirmation};
use storefront_commerce::Storefront;

use super::cart::print_cart;
use super::CheckoutArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront().await?;

    if shop.cart().is_empty() {
        bail!("Your cart is empty. Add something with `shop add <id>` first.");
    }

    for code in &args.promos {
        apply_promo(&mut shop, code, &ctx.output);
    }

    let interactive = !ctx.output.is_json();
    let details = CheckoutDetails::new(
        field(args.name, "Name", interactive)?,
        field(args.email, "Email", interactive)?,
        field(args.address, "Shipping address", interactive)?,
    );

    print_cart(&shop, &ctx.output);

    if interactive && !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", shop.discounted_total()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Checkout cancelled.");
            return Ok(());
        }
    }

    let order = shop.checkout(details)?;
    print_order(&order, &ctx.output);
    Ok(())
}

/// Apply a promo code, reporting the outcome. Rejections leave state alone.
pub fn apply_promo<S: KvStore>(shop: &mut Storefront<S>, code: &str, output: &Output) -> bool {
    match shop.apply_promo_code(code) {
        Ok(promo) => {
            output.success(&format!(
                "Promo {} applied: {}% off",
                promo,
                promo.percent_off()
            ));
            true
        }
        Err(e) => {
            output.warn(&e.to_string());
            false
        }
    }
}

/// Use the flag value, or prompt for it when running interactively.
fn field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

/// Print the order confirmation, or the whole order as JSON.
pub fn print_order(order: &OrderConfirmation, output: &Output) {
    if output.is_json() {
        output.json(order);
        return;
    }

    output.success(&format!("Order placed: {}", order.order_id));
    output.kv("placed", &order.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    output.kv("name", &order.customer.name);
    output.kv("email", &order.customer.email);
    output.kv("ship to", &order.customer.address);
    for line in &order.lines {
        output.kv(
            &format!("{} x{}", line.name, line.quantity),
            &line.total.to_string(),
        );
    }
    output.kv("subtotal", &order.subtotal.to_string());
    if let Some(promo) = order.promo {
        output.kv("discount", &format!("-{} ({})", order.discount, promo));
    }
    output.kv("total", &order.total.to_string());
}
