//! Participant account storage trait.

use crate::StoreError;
use accrue_types::{Principal, Timestamp};
use serde::{Deserialize, Serialize};

/// One row per participant, created lazily on first write and never deleted.
/// A zero-balance row is logically absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantAccount {
    /// Staked principal plus harvested rewards.
    pub balance: u128,
    /// Rewards computed but not yet folded into `balance`.
    pub accumulated_rewards: u128,
    /// Grows with every deposit, never shrinks.
    pub risk_score: u128,
    /// Insurance coverage amount (meaningful only while insurance is active).
    pub insurance_coverage: u128,
    /// Start of the participant's own accrual window, if one has been set.
    #[serde(default)]
    pub last_accrual_at: Option<Timestamp>,
}

/// Trait for participant account storage operations.
///
/// Field accessors default to zero for unknown participants and write the
/// single field they name.
pub trait AccountStore {
    fn get_account(&self, principal: &Principal) -> Result<Option<ParticipantAccount>, StoreError>;
    fn put_account(
        &mut self,
        principal: &Principal,
        account: ParticipantAccount,
    ) -> Result<(), StoreError>;
    fn iter_accounts(&self) -> Result<Vec<(Principal, ParticipantAccount)>, StoreError>;

    fn account_or_default(&self, principal: &Principal) -> Result<ParticipantAccount, StoreError> {
        Ok(self.get_account(principal)?.unwrap_or_default())
    }

    fn get_balance(&self, principal: &Principal) -> Result<u128, StoreError> {
        Ok(self.account_or_default(principal)?.balance)
    }

    fn set_balance(&mut self, principal: &Principal, balance: u128) -> Result<(), StoreError> {
        let mut account = self.account_or_default(principal)?;
        account.balance = balance;
        self.put_account(principal, account)
    }

    fn get_rewards(&self, principal: &Principal) -> Result<u128, StoreError> {
        Ok(self.account_or_default(principal)?.accumulated_rewards)
    }

    fn set_rewards(&mut self, principal: &Principal, rewards: u128) -> Result<(), StoreError> {
        let mut account = self.account_or_default(principal)?;
        account.accumulated_rewards = rewards;
        self.put_account(principal, account)
    }

    fn get_risk(&self, principal: &Principal) -> Result<u128, StoreError> {
        Ok(self.account_or_default(principal)?.risk_score)
    }

    fn set_risk(&mut self, principal: &Principal, risk: u128) -> Result<(), StoreError> {
        let mut account = self.account_or_default(principal)?;
        account.risk_score = risk;
        self.put_account(principal, account)
    }

    fn get_coverage(&self, principal: &Principal) -> Result<u128, StoreError> {
        Ok(self.account_or_default(principal)?.insurance_coverage)
    }

    fn set_coverage(&mut self, principal: &Principal, coverage: u128) -> Result<(), StoreError> {
        let mut account = self.account_or_default(principal)?;
        account.insurance_coverage = coverage;
        self.put_account(principal, account)
    }

    /// Sum of every stored balance.
    fn sum_balances(&self) -> Result<u128, StoreError> {
        self.iter_accounts()?
            .iter()
            .try_fold(0u128, |acc, (_, a)| acc.checked_add(a.balance))
            .ok_or_else(|| StoreError::Backend("balance sum overflow".into()))
    }
}
