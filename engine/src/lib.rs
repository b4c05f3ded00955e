//! Accrue: a custodial yield-bearing staking ledger.
//!
//! [`StakingEngine`] is the single entry point. Every mutating call:
//! 1. reads the caller and the time from the host,
//! 2. runs against a transactional overlay of the store,
//! 3. commits all of its writes or none of them,
//! 4. emits its events to subscribers only after commit.
//!
//! Supply policy: harvested yield is added to `total_staked`, so
//! `total_supply() == sum of all balances` after every call.

pub mod accrual;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod event;
pub mod queries;
pub mod staking;
pub mod transfer;

pub use config::{AccrualMode, ConfigError, EngineConfig, TokenConfig};
pub use engine::StakingEngine;
pub use event::{EventBus, StakingEvent};
pub use queries::{DistributionStatus, ParticipantSnapshot, ProtocolMetrics};
