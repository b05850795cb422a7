//! Invoice total calculation (pure domain module).
//!
//! This crate converts a [`SaleRequest`] (line items + a global discount)
//! into [`SaleTotals`] (subtotal, discount amounts, tax, grand total). The
//! computation is deterministic and stateless: no IO, no HTTP, no storage.
//! Input validation is the caller's contract; the calculator is total over
//! well-formed input.

pub mod request;
pub mod totals;

pub use request::{LineItem, SaleRequest};
pub use totals::{SaleTotals, compute_totals};
