//! Transactional overlay. Buffers every write of one operation so it can be
//! committed to the base store in a single step or discarded.
//!
//! # Usage
//!
//! ```ignore
//! let paid = atomically(&mut ledger, |txn| {
//!     txn.set_balance(&alice, 900)?;
//!     txn.set_balance(&bob, 100)?;
//!     Ok::<_, AccrueError>(100)
//! })?;
//! ```
//!
//! If the closure returns `Err`, the overlay is dropped and the base store is
//! never written.

use accrue_store::{
    AccountStore, AllowanceStore, DistributionRecord, DistributionStore, LedgerStore, MetaStore,
    ParticipantAccount, ProtocolState, ProtocolStore, StoreError, TransferAllowance, WriteSet,
};
use accrue_types::Principal;
use std::collections::BTreeMap;

/// Reads fall through to the base store unless the overlay already holds a
/// newer value; writes only ever reach the overlay.
pub struct LedgerTxn<'a, S: ?Sized> {
    base: &'a S,
    writes: WriteSet,
}

impl<'a, S: LedgerStore + ?Sized> LedgerTxn<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            writes: WriteSet::default(),
        }
    }

    /// Number of buffered records.
    pub fn pending_writes(&self) -> usize {
        self.writes.accounts.len()
            + usize::from(self.writes.protocol.is_some())
            + self.writes.distributions.len()
            + self.writes.allowances.len()
            + usize::from(self.writes.token_uri.is_some())
    }

    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }
}

/// Run `op` against a fresh overlay of `store` and commit its writes only if
/// it succeeds.
pub fn atomically<S, T, E, F>(store: &mut S, op: F) -> Result<T, E>
where
    S: LedgerStore,
    E: From<StoreError>,
    F: FnOnce(&mut LedgerTxn<'_, S>) -> Result<T, E>,
{
    let mut txn = LedgerTxn::new(&*store);
    let value = match op(&mut txn) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(discarded = txn.pending_writes(), "transaction rolled back");
            return Err(e);
        }
    };
    let writes = txn.into_write_set();
    if !writes.is_empty() {
        store.apply(writes)?;
    }
    Ok(value)
}

impl<S: LedgerStore + ?Sized> AccountStore for LedgerTxn<'_, S> {
    fn get_account(&self, principal: &Principal) -> Result<Option<ParticipantAccount>, StoreError> {
        match self.writes.accounts.get(principal) {
            Some(account) => Ok(Some(account.clone())),
            None => self.base.get_account(principal),
        }
    }

    fn put_account(
        &mut self,
        principal: &Principal,
        account: ParticipantAccount,
    ) -> Result<(), StoreError> {
        self.writes.accounts.insert(principal.clone(), account);
        Ok(())
    }

    fn iter_accounts(&self) -> Result<Vec<(Principal, ParticipantAccount)>, StoreError> {
        let mut merged: BTreeMap<_, _> = self.base.iter_accounts()?.into_iter().collect();
        merged.extend(
            self.writes
                .accounts
                .iter()
                .map(|(p, a)| (p.clone(), a.clone())),
        );
        Ok(merged.into_iter().collect())
    }
}

impl<S: LedgerStore + ?Sized> ProtocolStore for LedgerTxn<'_, S> {
    fn get_protocol(&self) -> Result<ProtocolState, StoreError> {
        match &self.writes.protocol {
            Some(state) => Ok(state.clone()),
            None => self.base.get_protocol(),
        }
    }

    fn put_protocol(&mut self, state: ProtocolState) -> Result<(), StoreError> {
        self.writes.protocol = Some(state);
        Ok(())
    }
}

impl<S: LedgerStore + ?Sized> DistributionStore for LedgerTxn<'_, S> {
    fn next_distribution_sequence(&self) -> Result<u64, StoreError> {
        Ok(self.base.next_distribution_sequence()? + self.writes.distributions.len() as u64)
    }

    fn put_distribution(&mut self, record: DistributionRecord) -> Result<(), StoreError> {
        let expected = self.next_distribution_sequence()?;
        if record.sequence != expected {
            return Err(StoreError::Backend(format!(
                "distribution sequence {} out of order, expected {expected}",
                record.sequence
            )));
        }
        self.writes.distributions.push(record);
        Ok(())
    }

    fn get_distribution(&self, sequence: u64) -> Result<Option<DistributionRecord>, StoreError> {
        if let Some(record) = self
            .writes
            .distributions
            .iter()
            .find(|r| r.sequence == sequence)
        {
            return Ok(Some(record.clone()));
        }
        self.base.get_distribution(sequence)
    }

    fn iter_distributions(&self) -> Result<Vec<DistributionRecord>, StoreError> {
        let mut records = self.base.iter_distributions()?;
        records.extend(self.writes.distributions.iter().cloned());
        Ok(records)
    }
}

impl<S: LedgerStore + ?Sized> AllowanceStore for LedgerTxn<'_, S> {
    fn get_allowance(&self, owner: &Principal, spender: &Principal) -> Result<u128, StoreError> {
        match self.writes.allowances.get(&(owner.clone(), spender.clone())) {
            Some(amount) => Ok(*amount),
            None => self.base.get_allowance(owner, spender),
        }
    }

    fn put_allowance(&mut self, allowance: TransferAllowance) -> Result<(), StoreError> {
        self.writes
            .allowances
            .insert((allowance.owner, allowance.spender), allowance.amount);
        Ok(())
    }
}

impl<S: LedgerStore + ?Sized> MetaStore for LedgerTxn<'_, S> {
    fn get_token_uri(&self) -> Result<Option<String>, StoreError> {
        match &self.writes.token_uri {
            Some(uri) => Ok(uri.clone()),
            None => self.base.get_token_uri(),
        }
    }

    fn put_token_uri(&mut self, uri: Option<String>) -> Result<(), StoreError> {
        self.writes.token_uri = Some(uri);
        Ok(())
    }
}

/// Applying a write set to an overlay merges it into the overlay, so
/// transactions nest.
impl<S: LedgerStore + ?Sized> LedgerStore for LedgerTxn<'_, S> {
    fn apply(&mut self, writes: WriteSet) -> Result<(), StoreError> {
        let mut expected = self.next_distribution_sequence()?;
        for record in &writes.distributions {
            if record.sequence != expected {
                return Err(StoreError::Backend(format!(
                    "distribution sequence {} out of order, expected {expected}",
                    record.sequence
                )));
            }
            expected += 1;
        }

        self.writes.accounts.extend(writes.accounts);
        if writes.protocol.is_some() {
            self.writes.protocol = writes.protocol;
        }
        self.writes.distributions.extend(writes.distributions);
        self.writes.allowances.extend(writes.allowances);
        if writes.token_uri.is_some() {
            self.writes.token_uri = writes.token_uri;
        }
        Ok(())
    }
}
