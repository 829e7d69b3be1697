//! The shared cart.

use kiosk_commerce::cart::{Cart, CartLine, CartSummary, PricingMode, Quantity};
use kiosk_commerce::catalog::Product;
use kiosk_commerce::{Money, ProductId};
use parking_lot::Mutex;
use tracing::debug;

/// The single authoritative cart for the visit.
///
/// Callers get snapshots; the cart itself only changes through these
/// methods.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Mutex<Cart>,
}

impl CartStore {
    pub fn new(pricing: PricingMode) -> Self {
        Self {
            cart: Mutex::new(Cart::with_pricing(pricing)),
        }
    }

    /// Add `quantity` units of `product`. Returns the updated line.
    pub fn add(&self, product: &Product, quantity: Quantity) -> CartLine {
        let line = self.cart.lock().add(product, quantity).clone();
        debug!(
            product_id = %line.id,
            quantity = line.quantity.get(),
            total = %line.price,
            "cart line updated"
        );
        line
    }

    /// Remove a product's line. Returns whether it was in the cart.
    pub fn remove(&self, product_id: &ProductId) -> bool {
        let removed = self.cart.lock().remove(product_id);
        if removed {
            debug!(product_id = %product_id, "cart line removed");
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.cart.lock().clear();
    }

    /// Sum of line totals.
    pub fn total_price(&self) -> Money {
        self.cart.lock().total_price()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.cart.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.lock().is_empty()
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u64 {
        self.cart.lock().item_count()
    }

    /// Get a line by product id.
    pub fn line(&self, product_id: &ProductId) -> Option<CartLine> {
        self.cart.lock().line(product_id).cloned()
    }

    /// Copy of every line.
    pub fn lines(&self) -> Vec<CartLine> {
        self.cart.lock().lines().to_vec()
    }

    /// Copy of the whole cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.lock().clone()
    }

    /// Summary for the checkout view.
    ///
    /// Reading the summary does not clear the cart or contact any backend.
    pub fn checkout_summary(&self) -> CartSummary {
        self.cart.lock().summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(ProductId::new(id), id, "kiosco", Money::new(cents), Money::ZERO, "")
    }

    #[test]
    fn test_add_and_remove() {
        let store = CartStore::new(PricingMode::LiveCatalog);
        let p = product("a", 250);

        store.add(&p, Quantity::new(2).unwrap());
        let line = store.add(&p, Quantity::new(3).unwrap());
        assert_eq!(line.quantity.get(), 5);
        assert_eq!(store.total_price(), Money::new(1250));
        assert_eq!(store.len(), 1);

        assert!(store.remove(&p.id));
        assert!(store.is_empty());
        assert_eq!(store.total_price(), Money::ZERO);
    }

    #[test]
    fn test_checkout_summary_keeps_cart() {
        let store = CartStore::new(PricingMode::UnitSnapshot);
        store.add(&product("a", 100), Quantity::ONE);
        store.add(&product("b", 200), Quantity::new(2).unwrap());

        let summary = store.checkout_summary();
        assert_eq!(summary.total, Money::new(500));
        assert_eq!(summary.item_count, 3);
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.checkout_summary().is_empty());
    }
}
