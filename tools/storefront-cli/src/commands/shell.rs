//! Interactive shopping session.
//!
//! One event loop over a single [`Storefront`], so the promo code applied
//! here stays active until checkout or exit.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use storefront_cache::KvStore;
use storefront_commerce::checkout::CheckoutDetails;
use storefront_commerce::Storefront;
use tracing::debug;

use super::cart::{add_item, print_cart};
use super::checkout::{apply_promo, print_order};
use super::products::print_products;
use super::{parse_product_id, parse_quantity};
use crate::context::Context;
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Products,
    Cart,
    Add,
    SetQuantity,
    Remove,
    Promo,
    Checkout,
    Clear,
    Reload,
    Quit,
}

impl Action {
    const ALL: [Action; 10] = [
        Action::Products,
        Action::Cart,
        Action::Add,
        Action::SetQuantity,
        Action::Remove,
        Action::Promo,
        Action::Checkout,
        Action::Clear,
        Action::Reload,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::Products => "Browse products",
            Action::Cart => "View cart",
            Action::Add => "Add to cart",
            Action::SetQuantity => "Change quantity",
            Action::Remove => "Remove from cart",
            Action::Promo => "Apply promo code",
            Action::Checkout => "Checkout",
            Action::Clear => "Clear cart",
            Action::Reload => "Reload products",
            Action::Quit => "Quit",
        }
    }
}

/// Run the shell command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        anyhow::bail!("The interactive shell does not support --json");
    }

    let mut shop = ctx.open_storefront().await?;
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    ctx.output.header("Storefront");
    ctx.output.info(&format!(
        "{} products, {} item(s) in cart",
        shop.catalog().len(),
        shop.cart().item_count()
    ));

    loop {
        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;
        let action = Action::ALL[choice];
        debug!(action = ?action, "shell action");

        if action == Action::Quit {
            break;
        }
        if action == Action::Reload {
            let catalog = ctx.load_catalog().await?;
            shop.replace_catalog(catalog);
            ctx.output.success(&format!("{} products loaded", shop.catalog().len()));
            continue;
        }

        // Failures are reported and the session continues.
        if let Err(e) = handle(action, &mut shop, &ctx.output) {
            ctx.output.error(&format!("{:#}", e));
        }
    }

    Ok(())
}

fn handle<S: KvStore>(action: Action, shop: &mut Storefront<S>, output: &Output) -> Result<()> {
    match action {
        Action::Products => print_products(shop.catalog(), output),
        Action::Cart => print_cart(shop, output),
        Action::Add => {
            let id = parse_product_id(&prompt("Product id")?);
            let quantity = parse_quantity(Some(&prompt("Quantity")?));
            let now = add_item(shop, id.clone(), quantity, output)?;
            output.success(&format!("Cart now has {} of {}", now, id));
        }
        Action::SetQuantity => {
            let id = parse_product_id(&prompt("Product id")?);
            let quantity = parse_quantity(Some(&prompt("New quantity")?));
            if shop.set_quantity(&id, quantity)? {
                output.success(&format!("Set {} to {}", id, quantity));
            } else {
                output.warn(&format!("{} is not in the cart", id));
            }
        }
        Action::Remove => {
            let id = parse_product_id(&prompt("Product id")?);
            if shop.remove(&id)? {
                output.success(&format!("Removed {}", id));
            } else {
                output.warn(&format!("{} is not in the cart", id));
            }
        }
        Action::Promo => {
            let code = prompt("Promo code")?;
            if apply_promo(shop, &code, output) {
                output.kv("total", &shop.discounted_total().to_string());
            }
        }
        Action::Checkout => checkout(shop, output)?,
        Action::Clear => {
            shop.clear()?;
            output.success("Cart cleared");
        }
        Action::Reload | Action::Quit => {}
    }
    Ok(())
}

fn checkout<S: KvStore>(shop: &mut Storefront<S>, output: &Output) -> Result<()> {
    if shop.cart().is_empty() {
        output.warn("Your cart is empty");
        return Ok(());
    }

    print_cart(shop, output);
    let details = CheckoutDetails::new(
        prompt("Name")?,
        prompt("Email")?,
        prompt("Shipping address")?,
    );
    if let Err(e) = details.validate() {
        output.warn(&e.to_string());
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Place order for {}?", shop.discounted_total()))
        .default(true)
        .interact()?;
    if confirmed {
        let order = shop.checkout(details)?;
        print_order(&order, output);
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels_unique() {
        let mut labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Action::ALL.len());
        assert_eq!(Action::ALL.last(), Some(&Action::Quit));
    }
}
