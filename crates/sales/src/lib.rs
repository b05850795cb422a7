//! Sales (ventas) domain module.
//!
//! This crate contains business rules for point-of-sale tickets, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). A sale
//! is assembled transiently (lines added and removed by user actions), its
//! totals are recomputed on every edit via `colmado-pricing`, and on explicit
//! confirmation it is handed to an external order processor through the
//! [`OrderProcessor`] port.

pub mod sale;
pub mod submit;

pub use sale::{
    AddLine, ConfirmSale, GlobalDiscountSet, LineAdded, LineRemoved, OpenSale, ProductId,
    RemoveLine, Sale, SaleCommand, SaleConfirmed, SaleEvent, SaleId, SaleLine, SaleOpened,
    SaleStatus, SetGlobalDiscount,
};
pub use submit::{OrderProcessor, SaleSubmission, submit_sale};
