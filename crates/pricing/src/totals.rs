//! Sale totals computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use colmado_core::round_currency;

use crate::request::SaleRequest;

/// Computed totals for a sale. Derived, never persisted by this module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    /// Sum of quantity × unit price across lines, before any discount.
    pub subtotal: Decimal,
    /// Sum of per-line discount amounts.
    pub line_discount_total: Decimal,
    /// Global discount applied to (subtotal − line discounts).
    pub global_discount_amount: Decimal,
    /// Line discounts + global discount.
    pub discount_total: Decimal,
    /// Sum of per-line tax amounts.
    pub tax_total: Decimal,
    /// Final payable amount: subtotal − discounts + tax.
    pub grand_total: Decimal,
}

/// Deterministically convert a [`SaleRequest`] into [`SaleTotals`].
///
/// Every per-line figure is rounded to 2 decimal places (half away from
/// zero) before accumulation, so the displayed sums never drift from the
/// line figures they were summed from.
///
/// Line tax is charged on the line's net-of-line-discount amount; the global
/// discount is applied to the order figure only and never redistributes into
/// per-line tax bases. That asymmetry is the observed contract of the source
/// system, not an oversight.
pub fn compute_totals(request: &SaleRequest) -> SaleTotals {
    let mut subtotal = Decimal::ZERO;
    let mut line_discount_total = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;

    for line in &request.lines {
        let line_subtotal = round_currency(line.quantity * line.unit_price);
        let line_discount = round_currency(line_subtotal * line.discount_percent.fraction());
        let line_net = line_subtotal - line_discount;
        let line_tax = round_currency(line_net * line.tax_percent.fraction());

        subtotal += line_subtotal;
        line_discount_total += line_discount;
        tax_total += line_tax;
    }

    let net_after_line_discounts = subtotal - line_discount_total;
    let global_discount_amount =
        round_currency(net_after_line_discounts * request.global_discount_percent.fraction());
    let discount_total = line_discount_total + global_discount_amount;
    let grand_total = subtotal - discount_total + tax_total;

    SaleTotals {
        subtotal,
        line_discount_total,
        global_discount_amount,
        discount_total,
        tax_total,
        grand_total,
    }
}
