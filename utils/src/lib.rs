//! Shared utilities for the Accrue staking ledger.

pub mod logging;
pub mod stats;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use stats::{OperationStats, OutcomeCounts};
pub use time::format_duration;
