//! Protocol-wide state storage trait.

use crate::StoreError;
use accrue_types::Timestamp;
use serde::{Deserialize, Serialize};

/// The single global protocol record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolState {
    /// Sum of all participant balances (principal and harvested yield alike).
    pub total_staked: u128,
    /// Lifetime sum of distributed amounts.
    pub total_yield_generated: u128,
    /// Gate for every staking-affecting operation.
    pub active: bool,
    /// Gate for insurance bookkeeping.
    pub insurance_active: bool,
    /// Current APY in basis points.
    pub base_yield_rate: u32,
    /// Timestamp of the last successful distribution (or of initialization).
    pub last_distribution_time: Timestamp,
    /// Recorded reserve pool size. No operation mutates it.
    pub insurance_reserve_balance: u128,
}

pub trait ProtocolStore {
    fn get_protocol(&self) -> Result<ProtocolState, StoreError>;
    fn put_protocol(&mut self, state: ProtocolState) -> Result<(), StoreError>;
}
