//! Owner-triggered global yield distribution.

use crate::engine::StakingEngine;
use crate::event::StakingEvent;
use accrue_governance::GovernanceEngine;
use accrue_store::{DistributionRecord, DistributionStore, LedgerStore, ProtocolStore};
use accrue_types::{AccrueError, Clock, IdentityProvider};
use accrue_yield::{compute_yield, DistributionPhase};

impl<S, C, I> StakingEngine<S, C, I>
where
    S: LedgerStore,
    C: Clock,
    I: IdentityProvider,
{
    /// Record one distribution over `total_staked` for the time since the
    /// last checkpoint, then move the checkpoint to now. Returns the amount
    /// recorded. Balances are not touched; participants collect by harvesting.
    pub fn distribute(&mut self) -> Result<u128, AccrueError> {
        let (caller, now) = self.context();
        self.execute("distribute", |txn, config| {
            GovernanceEngine::new(&config.owner, &config.params).ensure_owner(&caller)?;
            let mut protocol = txn.get_protocol()?;
            if !protocol.active {
                return Err(AccrueError::NotActive);
            }
            let elapsed_secs = match DistributionPhase::at(protocol.last_distribution_time, now) {
                DistributionPhase::Eligible { elapsed_secs } => elapsed_secs,
                DistributionPhase::Idle { .. } => return Err(AccrueError::NoYieldAvailable),
            };

            let amount = compute_yield(protocol.total_staked, elapsed_secs, protocol.base_yield_rate)?;
            protocol.total_yield_generated = protocol
                .total_yield_generated
                .checked_add(amount)
                .ok_or(AccrueError::Overflow)?;
            protocol.last_distribution_time = now;
            let effective_apy = protocol.base_yield_rate;

            let sequence = txn.next_distribution_sequence()?;
            txn.put_protocol(protocol)?;
            txn.put_distribution(DistributionRecord {
                sequence,
                distribution_timestamp: now,
                total_amount_distributed: amount,
                effective_apy,
            })?;
            Ok((
                amount,
                vec![StakingEvent::Distributed {
                    sequence,
                    amount,
                    effective_apy,
                    at: now,
                }],
            ))
        })
    }
}
