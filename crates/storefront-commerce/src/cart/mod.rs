//! Shopping cart module.
//!
//! Contains cart lines, the cart entity with its aggregates, and the
//! session-scoped store the presentation layer mutates.

#[allow(clippy::module_inception)]
mod cart;
mod line;
mod pricing;
mod store;

pub use cart::Cart;
pub use line::{CartLine, CartLineInput, LineIdentity};
pub use pricing::CartTotals;
pub use store::CartStore;
