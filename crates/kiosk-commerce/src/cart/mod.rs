//! Shopping cart module.
//!
//! Contains the cart engine, its lines and the checkout summary.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, Quantity};
pub use pricing::{CartSummary, LineSummary, PricingMode};
