//! Events published to subscribers after an operation commits.

use accrue_types::{Principal, Timestamp};

/// State changes that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StakingEvent {
    /// The protocol was activated.
    Initialized { rate_bps: u32, at: Timestamp },
    RateUpdated { previous: u32, rate_bps: u32 },
    InsuranceToggled { enabled: bool },
    TokenUriUpdated { uri: Option<String> },
    /// A deposit was credited.
    Staked {
        participant: Principal,
        amount: u128,
        new_balance: u128,
        at: Timestamp,
    },
    /// A withdrawal was debited.
    Unstaked {
        participant: Principal,
        amount: u128,
        new_balance: u128,
        at: Timestamp,
    },
    /// Pending rewards were folded into the participant's balance.
    Harvested {
        participant: Principal,
        amount: u128,
        new_balance: u128,
        at: Timestamp,
    },
    /// A global distribution was recorded.
    Distributed {
        sequence: u64,
        amount: u128,
        effective_apy: u32,
        at: Timestamp,
    },
    /// Balance moved between two participants.
    Transferred {
        from: Principal,
        to: Principal,
        amount: u128,
        memo: Option<Vec<u8>>,
        restricted: bool,
    },
}

impl StakingEvent {
    /// Short name, used as the log message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::RateUpdated { .. } => "rate_updated",
            Self::InsuranceToggled { .. } => "insurance_toggled",
            Self::TokenUriUpdated { .. } => "token_uri_updated",
            Self::Staked { .. } => "staked",
            Self::Unstaked { .. } => "unstaked",
            Self::Harvested { .. } => "harvested",
            Self::Distributed { .. } => "distributed",
            Self::Transferred { .. } => "transferred",
        }
    }

    pub(crate) fn log(&self) {
        let kind = self.kind();
        match self {
            Self::Initialized { rate_bps, at } => {
                tracing::info!(rate_bps, at = %at, "{kind}")
            }
            Self::RateUpdated { previous, rate_bps } => {
                tracing::info!(previous, rate_bps, "{kind}")
            }
            Self::InsuranceToggled { enabled } => tracing::info!(enabled, "{kind}"),
            Self::TokenUriUpdated { uri } => tracing::info!(uri = ?uri, "{kind}"),
            Self::Staked {
                participant,
                amount,
                new_balance,
                at,
            }
            | Self::Unstaked {
                participant,
                amount,
                new_balance,
                at,
            }
            | Self::Harvested {
                participant,
                amount,
                new_balance,
                at,
            } => tracing::info!(
                participant = %participant,
                amount,
                new_balance,
                at = %at,
                "{kind}"
            ),
            Self::Distributed {
                sequence,
                amount,
                effective_apy,
                at,
            } => tracing::info!(sequence, amount, effective_apy, at = %at, "{kind}"),
            Self::Transferred {
                from,
                to,
                amount,
                memo,
                restricted,
            } => tracing::info!(
                from = %from,
                to = %to,
                amount,
                memo = ?memo.as_deref().map(hex::encode),
                restricted,
                "{kind}"
            ),
        }
    }
}

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the calling thread after the operation's writes
/// have been committed. A rejected operation emits nothing.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&StakingEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StakingEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&self, event: &StakingEvent) {
        event.log();
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
