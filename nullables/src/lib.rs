//! Nullable infrastructure for deterministic testing.
//!
//! The host capabilities the engine consumes (clock, caller identity) are
//! abstracted behind traits in `accrue-types`. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//!
//! Usage: hand these to the engine in tests instead of host-backed implementations.

pub mod clock;
pub mod identity;

pub use clock::NullClock;
pub use identity::NullCaller;
