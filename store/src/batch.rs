//! Buffered writes applied to a store in one step.

use crate::{DistributionRecord, ParticipantAccount, ProtocolState};
use accrue_types::Principal;
use std::collections::BTreeMap;

/// Every write produced by one operation.
///
/// Built by a transactional overlay and handed to [`crate::LedgerStore::apply`]
/// once the operation has succeeded. Dropping a `WriteSet` discards it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSet {
    pub accounts: BTreeMap<Principal, ParticipantAccount>,
    pub protocol: Option<ProtocolState>,
    pub distributions: Vec<DistributionRecord>,
    pub allowances: BTreeMap<(Principal, Principal), u128>,
    /// `Some(None)` clears the URI; `None` leaves it untouched.
    pub token_uri: Option<Option<String>>,
}

impl WriteSet {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.protocol.is_none()
            && self.distributions.is_empty()
            && self.allowances.is_empty()
            && self.token_uri.is_none()
    }
}
