//! Governance surface for the Accrue staking ledger.
//!
//! One owner, fixed at deployment, may:
//! - initialize the protocol once with a bounded yield rate
//! - change the rate within the same bounds
//! - switch insurance bookkeeping on or off
//! - set or clear the token URI

pub mod engine;

pub use engine::GovernanceEngine;
