//! Catalog listing.

use anyhow::Result;
use storefront_commerce::catalog::Catalog;

use crate::context::Context;
use crate::output::{truncate, Output};

/// Run the products command.
pub async fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    print_products(&catalog, &ctx.output);
    Ok(())
}

/// Print the catalog as a table, or as JSON.
pub fn print_products(catalog: &Catalog, output: &Output) {
    if output.is_json() {
        output.json(&catalog.products());
        return;
    }

    output.header("Products");

    if catalog.is_empty() {
        output.info("No products available.");
        return;
    }

    let widths = [8, 24, 10, 40];
    output.table_row(&["ID", "NAME", "PRICE", "DESCRIPTION"], &widths);
    for product in catalog.iter() {
        let id = product.id.to_string();
        let price = product.price.to_string();
        let description = truncate(&product.description, widths[3]);
        output.table_row(
            &[&id, &truncate(&product.name, widths[1]), &price, &description],
            &widths,
        );
    }
}
