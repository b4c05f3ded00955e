//! Transfer allowance storage trait.
//!
//! Allowances are part of the persisted layout, but no ledger operation
//! consumes them.

use crate::StoreError;
use accrue_types::Principal;
use serde::{Deserialize, Serialize};

/// An amount `spender` is pre-authorized to move on `owner`'s behalf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAllowance {
    pub owner: Principal,
    pub spender: Principal,
    pub amount: u128,
}

pub trait AllowanceStore {
    /// Zero when no allowance is recorded.
    fn get_allowance(&self, owner: &Principal, spender: &Principal) -> Result<u128, StoreError>;
    fn put_allowance(&mut self, allowance: TransferAllowance) -> Result<(), StoreError>;
}
