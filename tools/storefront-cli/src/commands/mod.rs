//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;
pub mod shell;

use clap::{Args, Subcommand};
use storefront_commerce::cart::Quantity;
use storefront_commerce::ProductId;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    pub id: String,

    /// How many to add (anything unparseable counts as 1).
    pub quantity: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product id.
    pub id: String,

    /// New quantity (at least 1).
    pub quantity: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    /// Shipping address.
    #[arg(long)]
    pub address: Option<String>,

    /// Promo code. Only the first valid code is applied.
    #[arg(long = "promo", value_name = "CODE")]
    pub promos: Vec<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Integers become numeric ids, anything else is used as text.
pub fn parse_product_id(input: &str) -> ProductId {
    match input.parse::<ProductId>() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

/// Quantity from user text, falling back to 1.
pub fn parse_quantity(input: Option<&str>) -> Quantity {
    input.map(Quantity::parse_or_default).unwrap_or_default()
}
