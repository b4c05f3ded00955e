//! Accrual windows and the reward fold shared by harvest and withdraw.
//!
//! A participant's pending yield is `accumulated_rewards` plus simple
//! interest on their balance over the whole days of their current window.
//! Only the whole days that were credited move the window forward, so a
//! partial day is carried into the next window rather than lost.

use crate::config::AccrualMode;
use accrue_store::{AccountStore, ParticipantAccount, ProtocolState, ProtocolStore};
use accrue_types::params::SECONDS_PER_DAY;
use accrue_types::{AccrueError, Principal, Timestamp};
use accrue_yield::{compute_yield, whole_days};

/// Yield accrued by one participant over their current window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrual {
    pub window_start: Timestamp,
    pub days: u64,
    pub amount: u128,
}

impl Accrual {
    /// Start of the window that follows once this accrual is credited.
    pub fn next_window_start(&self) -> Timestamp {
        Timestamp::new(
            self.window_start
                .as_secs()
                .saturating_add(self.days * SECONDS_PER_DAY),
        )
    }
}

pub fn window_start(
    mode: AccrualMode,
    protocol: &ProtocolState,
    account: &ParticipantAccount,
) -> Timestamp {
    match mode {
        AccrualMode::GlobalCheckpoint => match account.last_accrual_at {
            Some(anchor) => anchor.max(protocol.last_distribution_time),
            None => protocol.last_distribution_time,
        },
        AccrualMode::PerParticipant => account
            .last_accrual_at
            .unwrap_or(protocol.last_distribution_time),
    }
}

pub fn accrue(
    mode: AccrualMode,
    protocol: &ProtocolState,
    account: &ParticipantAccount,
    now: Timestamp,
) -> Result<Accrual, AccrueError> {
    let start = window_start(mode, protocol, account);
    let elapsed = start.elapsed_since(now);
    let amount = compute_yield(account.balance, elapsed, protocol.base_yield_rate)?;
    Ok(Accrual {
        window_start: start,
        days: whole_days(elapsed),
        amount,
    })
}

/// `accumulated_rewards` plus the yield of the current window.
pub fn pending_total(
    mode: AccrualMode,
    protocol: &ProtocolState,
    account: &ParticipantAccount,
    now: Timestamp,
) -> Result<u128, AccrueError> {
    let accrual = accrue(mode, protocol, account, now)?;
    account
        .accumulated_rewards
        .checked_add(accrual.amount)
        .ok_or(AccrueError::Overflow)
}

/// Bank the yield of `participant`'s current window into
/// `accumulated_rewards` and open a new window, ahead of a balance change.
///
/// Only per-participant windows are settled. Under the global checkpoint the
/// window belongs to the protocol, not the account, so nothing is written.
pub fn settle_window<S>(
    store: &mut S,
    participant: &Principal,
    mode: AccrualMode,
    now: Timestamp,
) -> Result<(), AccrueError>
where
    S: AccountStore + ProtocolStore + ?Sized,
{
    if mode != AccrualMode::PerParticipant {
        return Ok(());
    }
    let protocol = store.get_protocol()?;
    let mut account = store.account_or_default(participant)?;
    let accrual = accrue(mode, &protocol, &account, now)?;
    account.accumulated_rewards = account
        .accumulated_rewards
        .checked_add(accrual.amount)
        .ok_or(AccrueError::Overflow)?;
    account.last_accrual_at = Some(if account.balance == 0 {
        now
    } else {
        accrual.next_window_start()
    });
    store.put_account(participant, account)?;
    Ok(())
}

/// Amount credited by a fold and the balance it left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fold {
    pub amount: u128,
    pub new_balance: u128,
}

/// Move all pending yield of `participant` into their balance and into
/// `total_staked`. A zero fold writes nothing.
pub fn fold_rewards<S>(
    store: &mut S,
    participant: &Principal,
    mode: AccrualMode,
    now: Timestamp,
) -> Result<Fold, AccrueError>
where
    S: AccountStore + ProtocolStore + ?Sized,
{
    let mut protocol = store.get_protocol()?;
    let mut account = store.account_or_default(participant)?;
    let accrual = accrue(mode, &protocol, &account, now)?;
    let amount = account
        .accumulated_rewards
        .checked_add(accrual.amount)
        .ok_or(AccrueError::Overflow)?;
    if amount == 0 {
        return Ok(Fold {
            amount: 0,
            new_balance: account.balance,
        });
    }

    account.balance = account
        .balance
        .checked_add(amount)
        .ok_or(AccrueError::Overflow)?;
    account.accumulated_rewards = 0;
    account.last_accrual_at = Some(accrual.next_window_start());
    protocol.total_staked = protocol
        .total_staked
        .checked_add(amount)
        .ok_or(AccrueError::Overflow)?;

    tracing::trace!(
        participant = %participant,
        window_start = %accrual.window_start,
        days = accrual.days,
        amount,
        "rewards folded"
    );
    let new_balance = account.balance;
    store.put_account(participant, account)?;
    store.put_protocol(protocol)?;
    Ok(Fold {
        amount,
        new_balance,
    })
}
