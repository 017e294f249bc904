//! Cart commands.

use anyhow::Result;
use serde::Serialize;
use storefront_cache::KvStore;
use storefront_commerce::cart::Quantity;
use storefront_commerce::pricing::PromoCode;
use storefront_commerce::{Money, ProductId, Storefront};

use super::{parse_product_id, parse_quantity, AddArgs, RemoveArgs, SetArgs};
use crate::context::Context;
use crate::output::{truncate, Output};

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront().await?;
    print_cart(&shop, &ctx.output);
    Ok(())
}

/// Add a product to the cart.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront().await?;
    let id = parse_product_id(&args.id);
    let quantity = parse_quantity(args.quantity.as_deref());

    let line_quantity = add_item(&mut shop, id, quantity, &ctx.output)?;
    finish(&shop, &ctx.output, &format!("Cart now has {} of {}", line_quantity, args.id));
    Ok(())
}

/// Remove a product from the cart.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront().await?;
    let id = parse_product_id(&args.id);

    if shop.remove(&id)? {
        finish(&shop, &ctx.output, &format!("Removed {}", id));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", id));
        finish(&shop, &ctx.output, "Nothing changed");
    }
    Ok(())
}

/// Set the quantity of a product already in the cart.
pub async fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront().await?;
    let id = parse_product_id(&args.id);
    let quantity = parse_quantity(Some(&args.quantity));

    if shop.set_quantity(&id, quantity)? {
        finish(&shop, &ctx.output, &format!("Set {} to {}", id, quantity));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", id));
        finish(&shop, &ctx.output, "Nothing changed");
    }
    Ok(())
}

/// Empty the cart.
pub async fn clear(ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront().await?;
    shop.clear()?;
    finish(&shop, &ctx.output, "Cart cleared");
    Ok(())
}

/// Add to the cart, warning when the product is not in the catalog.
pub fn add_item<S: KvStore>(
    shop: &mut Storefront<S>,
    id: ProductId,
    quantity: Quantity,
    output: &Output,
) -> Result<Quantity> {
    if !shop.catalog().is_empty() && shop.catalog().find(&id).is_none() {
        output.warn(&format!("{} is not in the catalog; it will not count toward the total", id));
    }
    Ok(shop.add(id, quantity)?)
}

fn finish<S: KvStore>(shop: &Storefront<S>, output: &Output, msg: &str) {
    if output.is_json() {
        output.json(&CartView::build(shop));
    } else {
        output.success(msg);
        output.kv("total", &shop.total().to_string());
    }
}

/// Machine-readable cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub promo: Option<PromoCode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    /// `None` when the product is not in the catalog.
    pub name: Option<String>,
    pub quantity: Quantity,
    pub unit_price: Option<Money>,
    pub line_total: Money,
}

impl CartView {
    pub fn build<S: KvStore>(shop: &Storefront<S>) -> Self {
        let pricing = shop.quote();
        let items = shop
            .cart()
            .items()
            .iter()
            .map(|item| {
                let product = shop.catalog().find(&item.product_id);
                CartLineView {
                    product_id: item.product_id.clone(),
                    name: product.map(|p| p.name.clone()),
                    quantity: item.quantity,
                    unit_price: product.map(|p| p.price),
                    line_total: product
                        .map(|p| p.line_total(item.quantity))
                        .unwrap_or_else(Money::zero),
                }
            })
            .collect();

        Self {
            items,
            item_count: shop.cart().item_count(),
            subtotal: pricing.subtotal,
            discount: pricing.discount_total,
            total: pricing.grand_total,
            promo: pricing.promo,
        }
    }
}

/// Print the cart as a table, or as JSON.
pub fn print_cart<S: KvStore>(shop: &Storefront<S>, output: &Output) {
    let view = CartView::build(shop);
    if output.is_json() {
        output.json(&view);
        return;
    }

    output.header("Cart");

    if view.items.is_empty() {
        output.info("Your cart is empty.");
        return;
    }

    let widths = [8, 24, 6, 10];
    output.table_row(&["ID", "NAME", "QTY", "TOTAL"], &widths);
    for line in &view.items {
        let id = line.product_id.to_string();
        let name = line
            .name
            .as_deref()
            .map(|n| truncate(n, widths[1]))
            .unwrap_or_else(|| "(unavailable)".to_string());
        let quantity = line.quantity.to_string();
        let total = line.line_total.to_string();
        output.table_row(&[&id, &name, &quantity, &total], &widths);
    }

    println!();
    output.kv("items", &view.item_count.to_string());
    output.kv("subtotal", &view.subtotal.to_string());
    if let Some(promo) = view.promo {
        output.kv(
            "discount",
            &format!("-{} ({}, {}% off)", view.discount, promo, promo.percent_off()),
        );
    }
    output.kv("total", &view.total.to_string());
}
