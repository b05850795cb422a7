//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity** - they are defined entirely by their
//! attribute values, and they are immutable: to "modify" one, construct a new
//! one. `Percent` is the canonical example in this workspace; a `SupplierId`
//! on the other hand identifies an entity and is not a value object.

/// Marker trait for value objects.
///
/// Requires `Clone` (values are cheap to copy), `PartialEq` (compared by
/// value) and `Debug` (loggable, testable).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
