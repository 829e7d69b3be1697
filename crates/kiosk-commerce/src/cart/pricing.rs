//! Cart pricing policy and the checkout summary.

use crate::cart::Quantity;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a line total grows when the same product is added again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// `price += product.price * added`, using the catalog price at the time
    /// of each add. A price edit between adds makes the line drift away from
    /// `unit_price * quantity`.
    #[default]
    LiveCatalog,
    /// `price = unit_price * quantity`, where `unit_price` is fixed at the
    /// first add.
    UnitSnapshot,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::LiveCatalog => "live_catalog",
            PricingMode::UnitSnapshot => "unit_snapshot",
        }
    }
}

/// Totals shown in the checkout view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// One entry per cart line.
    pub lines: Vec<LineSummary>,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Units across all lines.
    pub item_count: u64,
    /// Amount to pay.
    pub total: Money,
}

impl CartSummary {
    /// Check if nothing is in the cart.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total formatted for display.
    pub fn total_display(&self) -> String {
        self.total.display()
    }
}

/// A cart line as shown in the checkout view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    /// Product id.
    pub product_id: ProductId,
    /// Name snapshot.
    pub name: String,
    /// Units.
    pub quantity: Quantity,
    /// Unit price snapshot.
    pub unit_price: Money,
    /// Line total.
    pub total: Money,
}

impl LineSummary {
    /// "3 x $12.00" style label.
    pub fn quantity_label(&self) -> String {
        format!("{} x {}", self.quantity, self.unit_price.display())
    }
}
