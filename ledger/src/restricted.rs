//! Restricted-asset scopes.
//!
//! A [`RestrictedScope`] is handed the exact set of balances an operation may
//! change before the operation runs. Every write is checked against that
//! grant as it happens:
//! - writes to a principal outside the grant are refused,
//! - any field other than `balance` must stay untouched,
//! - the cumulative net debit of a principal cannot exceed its allowance.
//!
//! Refusals surface as [`StoreError::RestrictionViolated`]. Run the scope
//! inside [`crate::atomically`] so a refusal discards every earlier write too.

use accrue_store::{AccountStore, ParticipantAccount, StoreError};
use accrue_types::Principal;
use std::collections::BTreeMap;

/// The declared set of balances an operation may change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetGrant {
    /// Principal → maximum cumulative net debit.
    max_debit: BTreeMap<Principal, u128>,
}

impl AssetGrant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `principal`'s balance to fall by at most `max` in total.
    pub fn allow_debit(mut self, principal: &Principal, max: u128) -> Self {
        self.max_debit.insert(principal.clone(), max);
        self
    }

    /// Allow `principal`'s balance to grow. Does not widen an existing debit allowance.
    pub fn allow_credit(mut self, principal: &Principal) -> Self {
        self.max_debit.entry(principal.clone()).or_insert(0);
        self
    }
}

/// An account store view that enforces an [`AssetGrant`].
pub struct RestrictedScope<'s, S: ?Sized> {
    inner: &'s mut S,
    grant: AssetGrant,
    /// Net debit so far, per principal. Credits reduce it.
    net_debit: BTreeMap<Principal, i128>,
}

impl<'s, S: AccountStore + ?Sized> RestrictedScope<'s, S> {
    pub fn new(inner: &'s mut S, grant: AssetGrant) -> Self {
        Self {
            inner,
            grant,
            net_debit: BTreeMap::new(),
        }
    }

    /// Net amount debited from `principal` within this scope (negative for a net credit).
    pub fn net_debit(&self, principal: &Principal) -> i128 {
        self.net_debit.get(principal).copied().unwrap_or(0)
    }

    fn check(&self, principal: &Principal, next: &ParticipantAccount) -> Result<i128, StoreError> {
        let violation = || StoreError::RestrictionViolated {
            principal: principal.to_string(),
        };
        let max = *self.grant.max_debit.get(principal).ok_or_else(violation)?;
        let current = self.inner.account_or_default(principal)?;

        let untouched = ParticipantAccount {
            balance: next.balance,
            ..current.clone()
        };
        if untouched != *next {
            return Err(violation());
        }

        let delta = i128::try_from(current.balance)
            .ok()
            .zip(i128::try_from(next.balance).ok())
            .map(|(before, after)| before - after)
            .ok_or_else(violation)?;
        let total = self.net_debit(principal) + delta;
        let max = i128::try_from(max).unwrap_or(i128::MAX);
        if total > max {
            return Err(violation());
        }
        Ok(total)
    }
}

impl<S: AccountStore + ?Sized> AccountStore for RestrictedScope<'_, S> {
    fn get_account(&self, principal: &Principal) -> Result<Option<ParticipantAccount>, StoreError> {
        self.inner.get_account(principal)
    }

    fn put_account(
        &mut self,
        principal: &Principal,
        account: ParticipantAccount,
    ) -> Result<(), StoreError> {
        let total = self.check(principal, &account)?;
        self.inner.put_account(principal, account)?;
        self.net_debit.insert(principal.clone(), total);
        Ok(())
    }

    fn iter_accounts(&self) -> Result<Vec<(Principal, ParticipantAccount)>, StoreError> {
        self.inner.iter_accounts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryLedger;

    fn principal(name: &str) -> Principal {
        Principal::parse(format!("acct_{name}")).unwrap()
    }

    fn funded(alice: &Principal, amount: u128) -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.set_balance(alice, amount).unwrap();
        ledger
    }

    #[test]
    fn declared_debit_and_credit_are_allowed() {
        let (alice, bob) = (principal("alice"), principal("bob"));
        let mut ledger = funded(&alice, 100);
        let grant = AssetGrant::new().allow_debit(&alice, 40).allow_credit(&bob);

        let mut scope = RestrictedScope::new(&mut ledger, grant);
        scope.set_balance(&alice, 60).unwrap();
        scope.set_balance(&bob, 40).unwrap();
        assert_eq!(scope.net_debit(&alice), 40);
        assert_eq!(scope.net_debit(&bob), -40);

        assert_eq!(ledger.get_balance(&alice).unwrap(), 60);
        assert_eq!(ledger.get_balance(&bob).unwrap(), 40);
    }

    #[test]
    fn undeclared_principal_is_refused() {
        let (alice, bob, mallory) = (principal("alice"), principal("bob"), principal("mallory"));
        let mut ledger = funded(&alice, 100);
        let grant = AssetGrant::new().allow_debit(&alice, 40).allow_credit(&bob);

        let mut scope = RestrictedScope::new(&mut ledger, grant);
        let err = scope.set_balance(&mallory, 1).unwrap_err();
        assert_eq!(
            err,
            StoreError::RestrictionViolated {
                principal: mallory.to_string()
            }
        );
        assert_eq!(ledger.get_balance(&mallory).unwrap(), 0);
    }

    #[test]
    fn debit_beyond_grant_is_refused() {
        let (alice, bob) = (principal("alice"), principal("bob"));
        let mut ledger = funded(&alice, 100);
        let grant = AssetGrant::new().allow_debit(&alice, 40).allow_credit(&bob);

        let mut scope = RestrictedScope::new(&mut ledger, grant);
        scope.set_balance(&alice, 70).unwrap();
        assert!(scope.set_balance(&alice, 50).is_err());
        assert_eq!(scope.net_debit(&alice), 30);
    }

    #[test]
    fn credit_only_principal_cannot_be_debited() {
        let (alice, bob) = (principal("alice"), principal("bob"));
        let mut ledger = funded(&bob, 10);
        let grant = AssetGrant::new().allow_debit(&alice, 5).allow_credit(&bob);

        let mut scope = RestrictedScope::new(&mut ledger, grant);
        assert!(scope.set_balance(&bob, 9).is_err());
        scope.set_balance(&bob, 11).unwrap();
    }

    #[test]
    fn non_balance_fields_are_frozen() {
        let alice = principal("alice");
        let mut ledger = funded(&alice, 100);
        let grant = AssetGrant::new().allow_debit(&alice, 100);

        let mut scope = RestrictedScope::new(&mut ledger, grant);
        assert!(scope.set_rewards(&alice, 1).is_err());
        assert!(scope.set_risk(&alice, 1).is_err());
        assert!(scope.set_coverage(&alice, 1).is_err());
    }

    #[test]
    fn allow_credit_keeps_existing_debit_allowance() {
        let alice = principal("alice");
        let grant = AssetGrant::new().allow_debit(&alice, 30).allow_credit(&alice);
        let mut ledger = funded(&alice, 100);
        let mut scope = RestrictedScope::new(&mut ledger, grant);
        scope.set_balance(&alice, 70).unwrap();
    }
}
