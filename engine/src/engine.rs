//! The staking engine: host capabilities, store and event plumbing.
//!
//! Operation bodies live in [`crate::staking`], [`crate::distribution`] and
//! [`crate::transfer`]; read-only accessors in [`crate::queries`].

use crate::config::EngineConfig;
use crate::event::{EventBus, StakingEvent};
use accrue_governance::GovernanceEngine;
use accrue_ledger::{atomically, LedgerTxn};
use accrue_store::LedgerStore;
use accrue_types::{AccrueError, Clock, IdentityProvider, Principal, Timestamp};
use accrue_utils::OperationStats;

/// Names under which [`OperationStats`] counts outcomes.
pub const OPERATIONS: &[&str] = &[
    "initialize",
    "update_rate",
    "toggle_insurance",
    "set_token_uri",
    "deposit",
    "withdraw",
    "harvest",
    "distribute",
    "transfer",
    "secure_transfer",
];

pub struct StakingEngine<S, C, I> {
    pub(crate) store: S,
    pub(crate) clock: C,
    pub(crate) identity: I,
    pub(crate) config: EngineConfig,
    events: EventBus,
    stats: OperationStats,
}

impl<S, C, I> StakingEngine<S, C, I>
where
    S: LedgerStore,
    C: Clock,
    I: IdentityProvider,
{
    pub fn new(config: EngineConfig, store: S, clock: C, identity: I) -> Self {
        Self {
            store,
            clock,
            identity,
            config,
            events: EventBus::new(),
            stats: OperationStats::new(OPERATIONS),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StakingEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn stats(&self) -> &OperationStats {
        &self.stats
    }

    pub(crate) fn context(&self) -> (Principal, Timestamp) {
        (self.identity.caller(), self.clock.now())
    }

    // ── Governance ─────────────────────────────────────────────────────

    /// Activate the protocol at `rate_bps`. Owner only, once.
    pub fn initialize(&mut self, rate_bps: u32) -> Result<(), AccrueError> {
        let (caller, now) = self.context();
        self.execute("initialize", |txn, config| {
            let gov = GovernanceEngine::new(&config.owner, &config.params);
            gov.initialize(txn, &caller, rate_bps, now)?;
            Ok(((), vec![StakingEvent::Initialized { rate_bps, at: now }]))
        })
    }

    /// Replace the base yield rate. Returns the previous rate.
    pub fn update_rate(&mut self, rate_bps: u32) -> Result<u32, AccrueError> {
        let (caller, _) = self.context();
        self.execute("update_rate", |txn, config| {
            let gov = GovernanceEngine::new(&config.owner, &config.params);
            let previous = gov.update_rate(txn, &caller, rate_bps)?;
            Ok((previous, vec![StakingEvent::RateUpdated { previous, rate_bps }]))
        })
    }

    pub fn toggle_insurance(&mut self, enable: bool) -> Result<(), AccrueError> {
        let (caller, _) = self.context();
        self.execute("toggle_insurance", |txn, config| {
            let gov = GovernanceEngine::new(&config.owner, &config.params);
            gov.toggle_insurance(txn, &caller, enable)?;
            Ok(((), vec![StakingEvent::InsuranceToggled { enabled: enable }]))
        })
    }

    /// Set or clear the token URI.
    pub fn set_token_uri(&mut self, uri: Option<String>) -> Result<(), AccrueError> {
        let (caller, _) = self.context();
        self.execute("set_token_uri", |txn, config| {
            let gov = GovernanceEngine::new(&config.owner, &config.params);
            gov.set_token_uri(txn, &caller, uri.clone())?;
            Ok(((), vec![StakingEvent::TokenUriUpdated { uri }]))
        })
    }

    /// Run `op` in a transaction. On success its writes are committed and
    /// then its events emitted; on failure nothing is written or emitted.
    pub(crate) fn execute<T, F>(&mut self, operation: &'static str, op: F) -> Result<T, AccrueError>
    where
        F: FnOnce(&mut LedgerTxn<'_, S>, &EngineConfig) -> Result<(T, Vec<StakingEvent>), AccrueError>,
    {
        let config = &self.config;
        match atomically(&mut self.store, |txn| op(txn, config)) {
            Ok((value, events)) => {
                self.stats.record_committed(operation);
                for event in &events {
                    self.events.emit(event);
                }
                Ok(value)
            }
            Err(e) => {
                self.stats.record_rejected(operation);
                tracing::debug!(operation, error = %e, "operation rejected");
                Err(e)
            }
        }
    }
}
