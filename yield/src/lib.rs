//! The pure accrual arithmetic of the staking ledger.
//!
//! `yield = principal × rate_bps × whole_days / (365 × 10_000)`
//!
//! This crate handles:
//! - Whole-day truncation of elapsed time
//! - Overflow-checked yield computation
//! - The once-per-day distribution time gate

pub mod compute;
pub mod error;
pub mod schedule;

pub use compute::{compute_yield, whole_days};
pub use error::YieldError;
pub use schedule::DistributionPhase;
