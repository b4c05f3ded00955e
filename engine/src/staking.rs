//! Deposits, withdrawals and harvesting.

use crate::accrual::{fold_rewards, settle_window};
use crate::engine::StakingEngine;
use crate::event::StakingEvent;
use accrue_store::{AccountStore, LedgerStore, ProtocolState, ProtocolStore};
use accrue_types::params::RISK_GRANULARITY;
use accrue_types::{AccrueError, Clock, IdentityProvider};

fn ensure_active(protocol: &ProtocolState) -> Result<(), AccrueError> {
    if !protocol.active {
        return Err(AccrueError::NotActive);
    }
    Ok(())
}

impl<S, C, I> StakingEngine<S, C, I>
where
    S: LedgerStore,
    C: Clock,
    I: IdentityProvider,
{
    /// Stake `amount` for the caller. Returns the caller's new balance.
    pub fn deposit(&mut self, amount: u128) -> Result<u128, AccrueError> {
        let (caller, now) = self.context();
        self.execute("deposit", |txn, config| {
            let mut protocol = txn.get_protocol()?;
            ensure_active(&protocol)?;
            if !config.params.meets_minimum_stake(amount) {
                return Err(AccrueError::InvalidAmount(amount));
            }

            settle_window(txn, &caller, config.accrual_mode, now)?;
            let mut account = txn.account_or_default(&caller)?;
            account.balance = account
                .balance
                .checked_add(amount)
                .ok_or(AccrueError::Overflow)?;
            account.risk_score = account
                .risk_score
                .checked_add(amount / RISK_GRANULARITY)
                .ok_or(AccrueError::Overflow)?;
            if protocol.insurance_active {
                account.insurance_coverage = amount;
            }
            protocol.total_staked = protocol
                .total_staked
                .checked_add(amount)
                .ok_or(AccrueError::Overflow)?;

            let new_balance = account.balance;
            txn.put_account(&caller, account)?;
            txn.put_protocol(protocol)?;
            Ok((
                new_balance,
                vec![StakingEvent::Staked {
                    participant: caller.clone(),
                    amount,
                    new_balance,
                    at: now,
                }],
            ))
        })
    }

    /// Unstake `amount` for the caller after folding their pending yield.
    /// Returns the caller's new balance.
    pub fn withdraw(&mut self, amount: u128) -> Result<u128, AccrueError> {
        let (caller, now) = self.context();
        self.execute("withdraw", |txn, config| {
            ensure_active(&txn.get_protocol()?)?;
            if amount == 0 {
                return Err(AccrueError::InvalidAmount(0));
            }

            let fold = fold_rewards(txn, &caller, config.accrual_mode, now)?;
            let mut protocol = txn.get_protocol()?;
            let mut account = txn.account_or_default(&caller)?;
            if account.balance < amount {
                return Err(AccrueError::InsufficientBalance {
                    needed: amount,
                    available: account.balance,
                });
            }

            account.balance -= amount;
            protocol.total_staked = protocol
                .total_staked
                .checked_sub(amount)
                .ok_or(AccrueError::Overflow)?;
            if protocol.insurance_active {
                account.insurance_coverage = account.balance;
            }

            let new_balance = account.balance;
            txn.put_account(&caller, account)?;
            txn.put_protocol(protocol)?;

            let mut events = Vec::with_capacity(2);
            if fold.amount > 0 {
                events.push(StakingEvent::Harvested {
                    participant: caller.clone(),
                    amount: fold.amount,
                    new_balance: fold.new_balance,
                    at: now,
                });
            }
            events.push(StakingEvent::Unstaked {
                participant: caller.clone(),
                amount,
                new_balance,
                at: now,
            });
            Ok((new_balance, events))
        })
    }

    /// Fold the caller's pending yield into their balance. Returns the
    /// amount credited.
    pub fn harvest(&mut self) -> Result<u128, AccrueError> {
        let (caller, now) = self.context();
        self.execute("harvest", |txn, config| {
            ensure_active(&txn.get_protocol()?)?;
            let fold = fold_rewards(txn, &caller, config.accrual_mode, now)?;
            if fold.amount == 0 {
                return Err(AccrueError::NoYieldAvailable);
            }
            Ok((
                fold.amount,
                vec![StakingEvent::Harvested {
                    participant: caller.clone(),
                    amount: fold.amount,
                    new_balance: fold.new_balance,
                    at: now,
                }],
            ))
        })
    }
}
