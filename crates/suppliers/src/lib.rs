//! Suppliers (proveedores) domain module.
//!
//! This crate contains business rules for suppliers, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod supplier;

pub use supplier::{
    ContactInfo, DeactivateSupplier, ReactivateSupplier, RegisterSupplier, Supplier,
    SupplierCommand, SupplierDeactivated, SupplierEvent, SupplierId, SupplierReactivated,
    SupplierRegistered, SupplierStatus, SupplierUpdated, UpdateDetails,
};
