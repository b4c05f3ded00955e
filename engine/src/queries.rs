//! Read-only accessors: token metadata, participant and protocol views.

use crate::accrual::pending_total;
use crate::engine::StakingEngine;
use accrue_store::{DistributionRecord, LedgerStore};
use accrue_types::{AccrueError, Clock, IdentityProvider, Principal, Timestamp, TOKEN_DECIMALS};
use accrue_utils::format_duration;
use accrue_yield::DistributionPhase;
use std::fmt;

/// One participant's position, with pending yield evaluated at query time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantSnapshot {
    pub participant: Principal,
    pub balance: u128,
    pub accumulated_rewards: u128,
    pub pending_yield: u128,
    pub risk_score: u128,
    pub insurance_coverage: u128,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolMetrics {
    pub total_value_locked: u128,
    pub total_yield_generated: u128,
    pub base_yield_rate: u32,
    pub active: bool,
    pub insurance_active: bool,
    pub insurance_reserve_balance: u128,
    pub last_distribution_time: Timestamp,
    pub distributions: usize,
    /// Participants holding a non-zero balance.
    pub participants: usize,
}

/// Where the protocol sits relative to its next distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributionStatus {
    pub active: bool,
    pub last_distribution_time: Timestamp,
    pub phase: DistributionPhase,
}

impl DistributionStatus {
    pub fn can_distribute(&self) -> bool {
        self.active && self.phase.is_eligible()
    }
}

impl fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.active {
            return write!(f, "inactive");
        }
        match self.phase {
            DistributionPhase::Eligible { elapsed_secs } => write!(
                f,
                "eligible ({} since last distribution)",
                format_duration(elapsed_secs)
            ),
            DistributionPhase::Idle { remaining_secs } => {
                write!(f, "idle ({} until eligible)", format_duration(remaining_secs))
            }
        }
    }
}

impl<S, C, I> StakingEngine<S, C, I>
where
    S: LedgerStore,
    C: Clock,
    I: IdentityProvider,
{
    // ── Token ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.config.token.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.token.symbol
    }

    pub fn decimals(&self) -> u8 {
        TOKEN_DECIMALS
    }

    pub fn owner(&self) -> &Principal {
        &self.config.owner
    }

    pub fn balance_of(&self, participant: &Principal) -> Result<u128, AccrueError> {
        Ok(self.store.get_balance(participant)?)
    }

    /// Equal to `total_staked`, which tracks the sum of all balances.
    pub fn total_supply(&self) -> Result<u128, AccrueError> {
        Ok(self.store.get_protocol()?.total_staked)
    }

    pub fn token_uri(&self) -> Result<Option<String>, AccrueError> {
        Ok(self.store.get_token_uri()?)
    }

    pub fn allowance(&self, owner: &Principal, spender: &Principal) -> Result<u128, AccrueError> {
        Ok(self.store.get_allowance(owner, spender)?)
    }

    // ── Participants ───────────────────────────────────────────────────

    /// Rewards the participant would receive from harvesting now.
    pub fn pending_yield(&self, participant: &Principal) -> Result<u128, AccrueError> {
        let protocol = self.store.get_protocol()?;
        let account = self.store.account_or_default(participant)?;
        pending_total(self.config.accrual_mode, &protocol, &account, self.clock.now())
    }

    pub fn participant_snapshot(
        &self,
        participant: &Principal,
    ) -> Result<ParticipantSnapshot, AccrueError> {
        let protocol = self.store.get_protocol()?;
        let account = self.store.account_or_default(participant)?;
        let pending_yield =
            pending_total(self.config.accrual_mode, &protocol, &account, self.clock.now())?;
        Ok(ParticipantSnapshot {
            participant: participant.clone(),
            balance: account.balance,
            accumulated_rewards: account.accumulated_rewards,
            pending_yield,
            risk_score: account.risk_score,
            insurance_coverage: account.insurance_coverage,
        })
    }

    // ── Protocol ───────────────────────────────────────────────────────

    pub fn protocol_metrics(&self) -> Result<ProtocolMetrics, AccrueError> {
        let protocol = self.store.get_protocol()?;
        let participants = self
            .store
            .iter_accounts()?
            .iter()
            .filter(|(_, account)| account.balance > 0)
            .count();
        Ok(ProtocolMetrics {
            total_value_locked: protocol.total_staked,
            total_yield_generated: protocol.total_yield_generated,
            base_yield_rate: protocol.base_yield_rate,
            active: protocol.active,
            insurance_active: protocol.insurance_active,
            insurance_reserve_balance: protocol.insurance_reserve_balance,
            last_distribution_time: protocol.last_distribution_time,
            distributions: self.store.iter_distributions()?.len(),
            participants,
        })
    }

    pub fn distribution_status(&self) -> Result<DistributionStatus, AccrueError> {
        let protocol = self.store.get_protocol()?;
        Ok(DistributionStatus {
            active: protocol.active,
            last_distribution_time: protocol.last_distribution_time,
            phase: DistributionPhase::at(protocol.last_distribution_time, self.clock.now()),
        })
    }

    pub fn can_distribute(&self) -> Result<bool, AccrueError> {
        Ok(self.distribution_status()?.can_distribute())
    }

    /// All distribution records, oldest first.
    pub fn distribution_history(&self) -> Result<Vec<DistributionRecord>, AccrueError> {
        Ok(self.store.iter_distributions()?)
    }

    pub fn distribution_at(
        &self,
        timestamp: Timestamp,
    ) -> Result<Option<DistributionRecord>, AccrueError> {
        Ok(self.store.distribution_at(timestamp)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccrualMode;
    use crate::engine::tests::{active_engine, as_caller, engine_with_mode, principal, DAY, START};

    #[test]
    fn token_metadata_defaults() {
        let engine = active_engine();
        assert_eq!(engine.name(), "Accrue Staked Token");
        assert_eq!(engine.symbol(), "stACR");
        assert_eq!(engine.decimals(), 8);
        assert_eq!(engine.owner(), &principal("owner"));
        assert_eq!(engine.token_uri().unwrap(), None);
    }

    #[test]
    fn unknown_participant_reads_as_zero() {
        let engine = active_engine();
        let ghost = principal("ghost");
        assert_eq!(engine.balance_of(&ghost).unwrap(), 0);
        assert_eq!(engine.pending_yield(&ghost).unwrap(), 0);
        assert_eq!(engine.allowance(&ghost, &principal("owner")).unwrap(), 0);
    }

    #[test]
    fn snapshot_reports_pending_yield() {
        let mut engine = active_engine();
        as_caller(&engine, "alice");
        engine.deposit(1_000_000).unwrap();
        engine.clock().advance(DAY);

        let snapshot = engine.participant_snapshot(&principal("alice")).unwrap();
        assert_eq!(snapshot.balance, 1_000_000);
        assert_eq!(snapshot.pending_yield, 205);
        assert_eq!(snapshot.accumulated_rewards, 0);
        assert_eq!(engine.total_supply().unwrap(), 1_000_000);
    }

    #[test]
    fn metrics_count_funded_participants() {
        let mut engine = active_engine();
        as_caller(&engine, "alice");
        engine.deposit(2_000_000).unwrap();
        engine.withdraw(2_000_000).unwrap();
        as_caller(&engine, "bob");
        engine.deposit(3_000_000).unwrap();

        let metrics = engine.protocol_metrics().unwrap();
        assert_eq!(metrics.participants, 1);
        assert_eq!(metrics.total_value_locked, 3_000_000);
        assert_eq!(metrics.base_yield_rate, 750);
        assert!(metrics.active);
        assert_eq!(metrics.distributions, 0);
    }

    #[test]
    fn distribution_status_follows_the_clock() {
        let mut engine = active_engine();
        let status = engine.distribution_status().unwrap();
        assert!(!status.can_distribute());
        assert_eq!(status.to_string(), "idle (1d 0h until eligible)");

        engine.clock().advance(DAY + 3_600);
        assert!(engine.can_distribute().unwrap());
        assert_eq!(
            engine.distribution_status().unwrap().to_string(),
            "eligible (1d 1h since last distribution)"
        );

        engine.distribute().unwrap();
        assert!(!engine.can_distribute().unwrap());
        let at = Timestamp::new(START + DAY + 3_600);
        assert_eq!(engine.distribution_history().unwrap().len(), 1);
        assert_eq!(engine.distribution_at(at).unwrap().unwrap().sequence, 1);
        assert_eq!(engine.distribution_at(Timestamp::new(START)).unwrap(), None);
    }

    #[test]
    fn inactive_protocol_cannot_distribute() {
        let engine = engine_with_mode(AccrualMode::GlobalCheckpoint);
        engine.clock().advance(2 * DAY);
        let status = engine.distribution_status().unwrap();
        assert_eq!(status.to_string(), "inactive");
        assert!(!status.can_distribute());
    }
}
