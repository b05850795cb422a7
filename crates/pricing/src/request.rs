//! Calculator input: line items and the request snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use colmado_core::Percent;

/// One product entry in a sale.
///
/// Quantities are decimal because weighed goods sell in fractional units.
/// The calculator assumes `quantity > 0` and `unit_price >= 0`; both are
/// enforced where lines are entered (the sales aggregate), never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Discount applied to this line alone, before tax.
    #[serde(default)]
    pub discount_percent: Percent,
    /// Value-added tax rate applicable to this line.
    #[serde(default)]
    pub tax_percent: Percent,
}

/// Immutable snapshot of a sale, rebuilt on every edit.
///
/// Line order is irrelevant to the totals (it only matters for display).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub lines: Vec<LineItem>,
    /// Applied to the whole order after line-level discounts.
    #[serde(default)]
    pub global_discount_percent: Percent,
}

impl SaleRequest {
    pub fn new(lines: Vec<LineItem>, global_discount_percent: Percent) -> Self {
        Self {
            lines,
            global_discount_percent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
