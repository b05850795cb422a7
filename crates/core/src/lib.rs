//! `colmado-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod percent;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::AggregateId;
pub use money::{format_currency, round_currency};
pub use percent::Percent;
pub use value_object::ValueObject;
