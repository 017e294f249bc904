//! Shopping cart module.
//!
//! Contains the cart itself, quantities, and the store that persists it.

mod cart;
mod quantity;
mod storage;
mod store;

pub use cart::{Cart, LineItem};
pub use quantity::Quantity;
pub use storage::{CartStorage, CART_STORAGE_KEY};
pub use store::CartStore;
