//! Balance transfers between participants.
//!
//! Transfers move `balance` and never fold pending yield into it. They work
//! while the protocol is inactive.
//!
//! Under [`AccrualMode::PerParticipant`](crate::AccrualMode::PerParticipant) both parties' windows are settled
//! first: yield earned so far is banked into `accumulated_rewards` and each
//! anchor moves forward, so received coins only earn from the transfer on.
//!
//! Under [`AccrualMode::GlobalCheckpoint`](crate::AccrualMode::GlobalCheckpoint) windows belong to the protocol.
//! An account that has not harvested since the last distribution earns over
//! the whole window on everything it holds, including coins received from a
//! sender who already harvested that window. "A harvest pays once per
//! window" therefore holds per account, not per coin.

use crate::accrual::settle_window;
use crate::engine::StakingEngine;
use crate::event::StakingEvent;
use accrue_ledger::{AssetGrant, RestrictedScope};
use accrue_store::{AccountStore, LedgerStore};
use accrue_types::{AccrueError, Clock, IdentityProvider, Principal};

/// Debit `from` and credit `to` by `amount`.
pub fn move_balance<S: AccountStore + ?Sized>(
    store: &mut S,
    from: &Principal,
    to: &Principal,
    amount: u128,
) -> Result<(), AccrueError> {
    let from_balance = store.get_balance(from)?;
    if from_balance < amount {
        return Err(AccrueError::InsufficientBalance {
            needed: amount,
            available: from_balance,
        });
    }
    let to_balance = store
        .get_balance(to)?
        .checked_add(amount)
        .ok_or(AccrueError::Overflow)?;
    store.set_balance(from, from_balance - amount)?;
    store.set_balance(to, to_balance)?;
    Ok(())
}

fn validate_recipient(
    from: &Principal,
    to: &Principal,
    addressable: bool,
) -> Result<(), AccrueError> {
    if from == to {
        return Err(AccrueError::InvalidRecipient(format!(
            "{to} cannot transfer to itself"
        )));
    }
    if !addressable {
        return Err(AccrueError::InvalidRecipient(to.to_string()));
    }
    Ok(())
}

impl<S, C, I> StakingEngine<S, C, I>
where
    S: LedgerStore,
    C: Clock,
    I: IdentityProvider,
{
    /// Move `amount` of the caller's balance to `to`. The caller must be `from`.
    pub fn transfer(
        &mut self,
        amount: u128,
        from: &Principal,
        to: &Principal,
        memo: Option<Vec<u8>>,
    ) -> Result<(), AccrueError> {
        let (caller, now) = self.context();
        let addressable = self.identity.is_externally_addressable(to);
        let (from, to) = (from.clone(), to.clone());
        self.execute("transfer", |txn, config| {
            if caller != from {
                return Err(AccrueError::Unauthorized);
            }
            if amount == 0 {
                return Err(AccrueError::InvalidAmount(0));
            }
            validate_recipient(&from, &to, addressable)?;
            settle_window(txn, &from, config.accrual_mode, now)?;
            settle_window(txn, &to, config.accrual_mode, now)?;
            move_balance(txn, &from, &to, amount)?;
            Ok((
                (),
                vec![StakingEvent::Transferred {
                    from,
                    to,
                    amount,
                    memo,
                    restricted: false,
                }],
            ))
        })
    }

    /// Move `amount` from the caller to `to` inside a restricted scope that
    /// permits exactly that debit and that credit.
    pub fn secure_transfer(&mut self, amount: u128, to: &Principal) -> Result<(), AccrueError> {
        let (caller, now) = self.context();
        let addressable = self.identity.is_externally_addressable(to);
        let to = to.clone();
        self.execute("secure_transfer", |txn, config| {
            if amount == 0 {
                return Err(AccrueError::InvalidAmount(0));
            }
            validate_recipient(&caller, &to, addressable)?;
            // The scope freezes every non-balance field, so settle outside it.
            settle_window(txn, &caller, config.accrual_mode, now)?;
            settle_window(txn, &to, config.accrual_mode, now)?;
            let grant = AssetGrant::new()
                .allow_debit(&caller, amount)
                .allow_credit(&to);
            let mut scope = RestrictedScope::new(txn, grant);
            move_balance(&mut scope, &caller, &to, amount)?;
            Ok((
                (),
                vec![StakingEvent::Transferred {
                    from: caller.clone(),
                    to,
                    amount,
                    memo: None,
                    restricted: true,
                }],
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccrualMode;
    use crate::engine::tests::{
        active_engine, as_caller, engine_with_mode, principal, TestEngine, DAY,
    };
    use accrue_ledger::MemoryLedger;
    use accrue_store::ProtocolStore;

    fn funded(name: &str, amount: u128) -> TestEngine {
        let mut engine = active_engine();
        as_caller(&engine, name);
        engine.deposit(amount).unwrap();
        engine
    }

    #[test]
    fn move_balance_checks_funds() {
        let mut ledger = MemoryLedger::new();
        let (a, b) = (principal("a"), principal("b"));
        ledger.set_balance(&a, 10).unwrap();
        assert_eq!(
            move_balance(&mut ledger, &a, &b, 11),
            Err(AccrueError::InsufficientBalance {
                needed: 11,
                available: 10
            })
        );
        move_balance(&mut ledger, &a, &b, 10).unwrap();
        assert_eq!(ledger.get_balance(&a).unwrap(), 0);
        assert_eq!(ledger.get_balance(&b).unwrap(), 10);
    }

    #[test]
    fn transfer_moves_balance_and_preserves_supply() {
        let mut engine = funded("alice", 5_000_000);
        let (alice, bob) = (principal("alice"), principal("bob"));
        engine
            .transfer(2_000_000, &alice, &bob, Some(b"rent".to_vec()))
            .unwrap();
        assert_eq!(engine.store().get_balance(&alice).unwrap(), 3_000_000);
        assert_eq!(engine.store().get_balance(&bob).unwrap(), 2_000_000);
        assert_eq!(engine.store().get_protocol().unwrap().total_staked, 5_000_000);
        assert_eq!(engine.store().sum_balances().unwrap(), 5_000_000);
    }

    #[test]
    fn transfer_on_behalf_of_another_is_unauthorized() {
        let mut engine = funded("alice", 5_000_000);
        as_caller(&engine, "mallory");
        assert_eq!(
            engine.transfer(1, &principal("alice"), &principal("mallory"), None),
            Err(AccrueError::Unauthorized)
        );
    }

    #[test]
    fn transfer_rejects_zero_self_and_contract_recipients() {
        let mut engine = funded("alice", 5_000_000);
        let alice = principal("alice");
        assert_eq!(
            engine.transfer(0, &alice, &principal("bob"), None),
            Err(AccrueError::InvalidAmount(0))
        );
        assert!(matches!(
            engine.transfer(1, &alice, &alice, None),
            Err(AccrueError::InvalidRecipient(_))
        ));
        let vault = Principal::parse("acct_dao.vault").unwrap();
        assert!(matches!(
            engine.transfer(1, &alice, &vault, None),
            Err(AccrueError::InvalidRecipient(_))
        ));
        assert_eq!(engine.store().get_balance(&alice).unwrap(), 5_000_000);
    }

    #[test]
    fn transfer_to_blocked_recipient_is_rejected() {
        let mut engine = funded("alice", 5_000_000);
        let bob = principal("bob");
        engine.identity().block_recipient(&bob);
        assert!(matches!(
            engine.transfer(1, &principal("alice"), &bob, None),
            Err(AccrueError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn transfer_works_while_inactive() {
        let mut engine = engine_with_mode(AccrualMode::GlobalCheckpoint);
        let (alice, bob) = (principal("alice"), principal("bob"));
        as_caller(&engine, "alice");
        assert_eq!(
            engine.transfer(1, &alice, &bob, None),
            Err(AccrueError::InsufficientBalance {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn secure_transfer_moves_exactly_the_grant() {
        let mut engine = funded("alice", 5_000_000);
        let bob = principal("bob");
        engine.secure_transfer(1_500_000, &bob).unwrap();
        assert_eq!(engine.store().get_balance(&principal("alice")).unwrap(), 3_500_000);
        assert_eq!(engine.store().get_balance(&bob).unwrap(), 1_500_000);
        assert_eq!(engine.stats().get("secure_transfer").committed, 1);
    }

    #[test]
    fn secure_transfer_overdraft_changes_nothing() {
        let mut engine = funded("alice", 5_000_000);
        let bob = principal("bob");
        assert_eq!(
            engine.secure_transfer(6_000_000, &bob),
            Err(AccrueError::InsufficientBalance {
                needed: 6_000_000,
                available: 5_000_000
            })
        );
        assert_eq!(engine.store().get_balance(&principal("alice")).unwrap(), 5_000_000);
        assert_eq!(engine.store().get_account(&bob).unwrap(), None);
    }

    #[test]
    fn secure_transfer_to_self_is_rejected() {
        let mut engine = funded("alice", 5_000_000);
        assert!(matches!(
            engine.secure_transfer(1, &principal("alice")),
            Err(AccrueError::InvalidRecipient(_))
        ));
    }

    fn per_participant_engine() -> TestEngine {
        let mut engine = engine_with_mode(AccrualMode::PerParticipant);
        engine.initialize(750).unwrap();
        engine
    }

    #[test]
    fn received_coins_earn_only_from_the_transfer_on() {
        let mut engine = per_participant_engine();
        let (alice, bob) = (principal("alice"), principal("bob"));
        as_caller(&engine, "bob");
        engine.deposit(1_000_000).unwrap();
        engine.clock().advance(10 * DAY);

        as_caller(&engine, "alice");
        engine.deposit(100_000_000).unwrap();
        engine.transfer(100_000_000, &alice, &bob, None).unwrap();

        as_caller(&engine, "bob");
        // 1_000_000 staked for 10 days at 750 bps.
        assert_eq!(engine.harvest(), Ok(2_054));
    }

    #[test]
    fn secure_transfer_settles_windows_outside_the_scope() {
        let mut engine = per_participant_engine();
        let bob = principal("bob");
        as_caller(&engine, "bob");
        engine.deposit(1_000_000).unwrap();
        engine.clock().advance(10 * DAY);

        as_caller(&engine, "alice");
        engine.deposit(100_000_000).unwrap();
        engine.secure_transfer(100_000_000, &bob).unwrap();

        as_caller(&engine, "bob");
        assert_eq!(engine.harvest(), Ok(2_054));
    }

    #[test]
    fn sender_keeps_yield_earned_before_sending() {
        let mut engine = per_participant_engine();
        let (alice, bob) = (principal("alice"), principal("bob"));
        as_caller(&engine, "alice");
        engine.deposit(1_000_000).unwrap();
        engine.clock().advance(2 * DAY);

        engine.transfer(500_000, &alice, &bob, None).unwrap();
        let account = engine.store().account_or_default(&alice).unwrap();
        assert_eq!(account.balance, 500_000);
        assert_eq!(account.accumulated_rewards, 410);
        assert_eq!(engine.harvest(), Ok(410));
    }

    #[test]
    fn restriction_violation_aborts_the_whole_call() {
        let mut engine = funded("alice", 5_000_000);
        let (alice, bob, carol) = (principal("alice"), principal("bob"), principal("carol"));

        let result = engine.execute("secure_transfer", |txn, _| {
            txn.set_balance(&bob, 1)?;
            let grant = AssetGrant::new()
                .allow_debit(&alice, 100)
                .allow_credit(&bob);
            let mut scope = RestrictedScope::new(txn, grant);
            move_balance(&mut scope, &alice, &carol, 100)?;
            Ok(((), Vec::new()))
        });

        assert_eq!(
            result,
            Err(AccrueError::AssetRestrictionViolated {
                principal: carol.to_string()
            })
        );
        assert_eq!(engine.store().get_balance(&alice).unwrap(), 5_000_000);
        assert_eq!(engine.store().get_account(&bob).unwrap(), None);
        assert_eq!(engine.store().get_account(&carol).unwrap(), None);
        assert_eq!(engine.stats().get("secure_transfer").rejected, 1);
    }
}
