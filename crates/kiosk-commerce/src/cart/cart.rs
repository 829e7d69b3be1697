//! Cart and line types.

use crate::cart::{CartSummary, LineSummary, PricingMode};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive item count.
///
/// The quantity stepper on a product card and every cart line use this type,
/// so a zero or negative quantity cannot reach the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The default stepper value.
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity, rejecting zero.
    pub fn new(n: u32) -> Result<Self, CommerceError> {
        if n == 0 {
            Err(CommerceError::InvalidQuantity(n))
        } else {
            Ok(Self(n))
        }
    }

    /// Get the raw count.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// One more, saturating at `u32::MAX`.
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One less, never going below one.
    pub fn decrement(self) -> Self {
        if self.0 > 1 {
            Self(self.0 - 1)
        } else {
            self
        }
    }

    fn saturating_add(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CommerceError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> u32 {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shopping cart held in memory for the current visit.
///
/// Lines are keyed by product id and kept in insertion order. The cart hands
/// out shared references only; every change goes through its methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    pricing: PricingMode,
}

impl Cart {
    /// Create an empty cart with the default pricing mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart with an explicit pricing mode.
    pub fn with_pricing(pricing: PricingMode) -> Self {
        Self {
            lines: Vec::new(),
            pricing,
        }
    }

    /// The pricing mode applied to repeated adds.
    pub fn pricing(&self) -> PricingMode {
        self.pricing
    }

    /// Add `quantity` units of a product.
    ///
    /// The first add creates a line that snapshots the product's name, image
    /// and price. Later adds of the same id grow the existing line; how its
    /// total grows depends on the [`PricingMode`].
    pub fn add(&mut self, product: &Product, quantity: Quantity) -> &CartLine {
        let pricing = self.pricing;
        let index = match self.lines.iter().position(|l| l.id == product.id) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.grow(product, quantity, pricing);
                }
                index
            }
            None => {
                self.lines.push(CartLine::new(product, quantity));
                self.lines.len() - 1
            }
        };
        &self.lines[index]
    }

    /// Remove the whole line for a product. Returns whether a line existed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != product_id);
        self.lines.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(|l| l.price).sum()
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by product id.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == product_id)
    }

    /// Number of distinct lines (the cart badge count).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshot for the checkout view.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self
                .lines
                .iter()
                .map(|l| LineSummary {
                    product_id: l.id.clone(),
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    total: l.price,
                })
                .collect(),
            line_count: self.len(),
            item_count: self.item_count(),
            total: self.total_price(),
        }
    }
}

/// One aggregated cart entry per product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product id, the cart key.
    pub id: ProductId,
    /// Product name at the time of the first add.
    pub name: String,
    /// Product image at the time of the first add.
    pub img: String,
    /// Catalog price at the time of the first add.
    pub unit_price: Money,
    /// Cumulative quantity.
    pub quantity: Quantity,
    /// Line total.
    pub price: Money,
}

impl CartLine {
    fn new(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            img: product.img.clone(),
            unit_price: product.price,
            quantity,
            price: product.price.multiply(quantity.get()),
        }
    }

    fn grow(&mut self, product: &Product, quantity: Quantity, pricing: PricingMode) {
        self.quantity = self.quantity.saturating_add(quantity);
        self.price = match pricing {
            PricingMode::LiveCatalog => self
                .price
                .saturating_add(product.price.multiply(quantity.get())),
            PricingMode::UnitSnapshot => self.unit_price.multiply(self.quantity.get()),
        };
    }

    /// Whether the line total has drifted from `unit_price * quantity`.
    pub fn has_price_drift(&self) -> bool {
        self.price != self.unit_price.multiply(self.quantity.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            "kiosco",
            Money::new(cents),
            Money::ZERO,
            format!("/images/products/{id}.png"),
        )
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_quantity_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(CommerceError::InvalidQuantity(0)));
        assert_eq!(Quantity::ONE.decrement(), Quantity::ONE);
        assert_eq!(qty(3).decrement().increment(), qty(3));
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let line = cart.add(&product("a", 1000), qty(2));

        assert_eq!(line.quantity, qty(2));
        assert_eq!(line.unit_price, Money::new(1000));
        assert_eq!(line.price, Money::new(2000));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_item_accumulates() {
        let mut cart = Cart::new();
        let p = product("a", 1000);

        cart.add(&p, qty(2));
        cart.add(&p, qty(3));

        assert_eq!(cart.len(), 1);
        let line = cart.line(&p.id).unwrap();
        assert_eq!(line.quantity, qty(5));
        assert_eq!(line.price, Money::new(5000));
        assert!(!line.has_price_drift());
    }

    #[test]
    fn test_repeat_add_uses_live_catalog_price() {
        // Observed storefront behaviour: the increment is priced at the
        // catalog price of the moment, not at the line's unit price.
        let mut cart = Cart::new();
        let mut p = product("a", 1000);

        cart.add(&p, qty(1));
        p.price = Money::new(1500);
        cart.add(&p, qty(2));

        let line = cart.line(&p.id).unwrap();
        assert_eq!(line.unit_price, Money::new(1000));
        assert_eq!(line.quantity, qty(3));
        assert_eq!(line.price, Money::new(4000));
        assert!(line.has_price_drift());
    }

    #[test]
    fn test_unit_snapshot_pricing_has_no_drift() {
        let mut cart = Cart::with_pricing(PricingMode::UnitSnapshot);
        let mut p = product("a", 1000);

        cart.add(&p, qty(1));
        p.price = Money::new(1500);
        cart.add(&p, qty(2));

        let line = cart.line(&p.id).unwrap();
        assert_eq!(line.price, Money::new(3000));
        assert!(!line.has_price_drift());
    }

    #[test]
    fn test_snapshot_fields_do_not_track_catalog() {
        let mut cart = Cart::new();
        let mut p = product("a", 1000);
        cart.add(&p, qty(1));

        p.name = "Renamed".to_string();
        p.img = "/other.png".to_string();
        cart.add(&p, qty(1));

        let line = cart.line(&p.id).unwrap();
        assert_eq!(line.name, "Product a");
        assert_eq!(line.img, "/images/products/a.png");
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = Cart::new();
        let p = product("a", 1000);
        cart.add(&p, qty(4));

        assert!(cart.remove(&p.id));
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::ZERO);
        assert!(!cart.remove(&p.id));
    }

    #[test]
    fn test_total_and_counts() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000), qty(2));
        cart.add(&product("b", 2500), qty(1));
        cart.add(&product("c", 99), qty(10));

        assert_eq!(cart.total_price(), Money::new(2000 + 2500 + 990));
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.item_count(), 13);

        cart.remove(&ProductId::new("b"));
        assert_eq!(cart.total_price(), Money::new(2990));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1000), qty(2));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_summary_preserves_order() {
        let mut cart = Cart::new();
        cart.add(&product("b", 200), qty(1));
        cart.add(&product("a", 100), qty(3));

        let summary = cart.summary();
        let ids: Vec<&str> = summary.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(summary.total, Money::new(500));
        assert_eq!(summary.item_count, 4);
        assert_eq!(summary.line_count, 2);
    }
}
