//! Process-level observability setup.
//!
//! Domain crates only emit `tracing` events; wiring a subscriber is the
//! embedding application's (or a test harness's) job, done once through
//! [`init`].

pub mod tracing;

pub use self::tracing::init;
