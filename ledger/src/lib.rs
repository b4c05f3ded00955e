//! Ledger storage for the Accrue staking engine.
//!
//! - [`MemoryLedger`]: the in-memory record store.
//! - [`LedgerTxn`] / [`atomically`]: buffered writes committed all-or-nothing.
//! - [`RestrictedScope`]: an account store view that only lets declared
//!   balances change.

pub mod memory;
pub mod restricted;
pub mod txn;

pub use memory::MemoryLedger;
pub use restricted::{AssetGrant, RestrictedScope};
pub use txn::{atomically, LedgerTxn};
