//! Owner-gated mutations of the global protocol record.

use accrue_store::{MetaStore, ProtocolState, ProtocolStore};
use accrue_types::params::MAX_TOKEN_URI_LEN;
use accrue_types::{AccrueError, Principal, StakingParams, Timestamp};

/// Applies governance actions to a store. Callers wrap each action in a
/// transaction; this type performs no commit of its own.
pub struct GovernanceEngine<'a> {
    owner: &'a Principal,
    params: &'a StakingParams,
}

impl<'a> GovernanceEngine<'a> {
    pub fn new(owner: &'a Principal, params: &'a StakingParams) -> Self {
        Self { owner, params }
    }

    pub fn owner(&self) -> &Principal {
        self.owner
    }

    pub fn ensure_owner(&self, caller: &Principal) -> Result<(), AccrueError> {
        if caller != self.owner {
            return Err(AccrueError::Unauthorized);
        }
        Ok(())
    }

    pub fn validate_rate(&self, rate_bps: u32) -> Result<(), AccrueError> {
        if !self.params.rate_in_bounds(rate_bps) {
            return Err(AccrueError::InvalidRate {
                rate: rate_bps,
                min: self.params.min_yield_rate,
                max: self.params.max_yield_rate,
            });
        }
        Ok(())
    }

    /// Activate the protocol. The distribution checkpoint starts at `now`.
    pub fn initialize<S: ProtocolStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Principal,
        rate_bps: u32,
        now: Timestamp,
    ) -> Result<ProtocolState, AccrueError> {
        self.ensure_owner(caller)?;
        let mut state = store.get_protocol()?;
        if state.active {
            return Err(AccrueError::AlreadyInitialized);
        }
        self.validate_rate(rate_bps)?;

        state.active = true;
        state.base_yield_rate = rate_bps;
        state.last_distribution_time = now;
        store.put_protocol(state.clone())?;
        tracing::debug!(owner = %self.owner, rate_bps, at = %now, "protocol initialized");
        Ok(state)
    }

    /// Replace the base yield rate. Returns the previous rate.
    pub fn update_rate<S: ProtocolStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Principal,
        rate_bps: u32,
    ) -> Result<u32, AccrueError> {
        self.ensure_owner(caller)?;
        self.validate_rate(rate_bps)?;

        let mut state = store.get_protocol()?;
        let previous = state.base_yield_rate;
        state.base_yield_rate = rate_bps;
        store.put_protocol(state)?;
        tracing::debug!(previous, rate_bps, "yield rate updated");
        Ok(previous)
    }

    pub fn toggle_insurance<S: ProtocolStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Principal,
        enable: bool,
    ) -> Result<(), AccrueError> {
        self.ensure_owner(caller)?;
        let mut state = store.get_protocol()?;
        state.insurance_active = enable;
        store.put_protocol(state)?;
        tracing::debug!(enable, "insurance toggled");
        Ok(())
    }

    /// Set the token URI, or clear it with `None`. A URI must be 1..=256 bytes.
    pub fn set_token_uri<S: MetaStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Principal,
        uri: Option<String>,
    ) -> Result<(), AccrueError> {
        self.ensure_owner(caller)?;
        if let Some(value) = &uri {
            if value.is_empty() || value.len() > MAX_TOKEN_URI_LEN {
                return Err(AccrueError::InvalidMetadata {
                    len: value.len(),
                    max: MAX_TOKEN_URI_LEN,
                });
            }
        }
        tracing::debug!(uri = ?uri, "token uri updated");
        store.put_token_uri(uri)?;
        Ok(())
    }
}
