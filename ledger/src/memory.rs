//! In-memory record store.

use accrue_store::{
    AccountStore, AllowanceStore, DistributionRecord, DistributionStore, LedgerStore, MetaStore,
    ParticipantAccount, ProtocolState, ProtocolStore, StoreError, TransferAllowance, WriteSet,
};
use accrue_types::Principal;
use std::collections::BTreeMap;

/// Every ledger record held in ordered maps.
///
/// Durability is the host's concern; this store only holds state for the
/// lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    accounts: BTreeMap<Principal, ParticipantAccount>,
    protocol: ProtocolState,
    distributions: BTreeMap<u64, DistributionRecord>,
    allowances: BTreeMap<(Principal, Principal), u128>,
    token_uri: Option<String>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn check_sequences(&self, records: &[DistributionRecord]) -> Result<(), StoreError> {
        let mut expected = self.next_sequence();
        for record in records {
            if record.sequence != expected {
                return Err(out_of_order(record.sequence, expected));
            }
            expected += 1;
        }
        Ok(())
    }

    fn next_sequence(&self) -> u64 {
        self.distributions.keys().next_back().map_or(1, |s| s + 1)
    }
}

fn out_of_order(got: u64, expected: u64) -> StoreError {
    StoreError::Backend(format!(
        "distribution sequence {got} out of order, expected {expected}"
    ))
}

impl AccountStore for MemoryLedger {
    fn get_account(&self, principal: &Principal) -> Result<Option<ParticipantAccount>, StoreError> {
        Ok(self.accounts.get(principal).cloned())
    }

    fn put_account(
        &mut self,
        principal: &Principal,
        account: ParticipantAccount,
    ) -> Result<(), StoreError> {
        self.accounts.insert(principal.clone(), account);
        Ok(())
    }

    fn iter_accounts(&self) -> Result<Vec<(Principal, ParticipantAccount)>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .map(|(p, a)| (p.clone(), a.clone()))
            .collect())
    }
}

impl ProtocolStore for MemoryLedger {
    fn get_protocol(&self) -> Result<ProtocolState, StoreError> {
        Ok(self.protocol.clone())
    }

    fn put_protocol(&mut self, state: ProtocolState) -> Result<(), StoreError> {
        self.protocol = state;
        Ok(())
    }
}

impl DistributionStore for MemoryLedger {
    fn next_distribution_sequence(&self) -> Result<u64, StoreError> {
        Ok(self.next_sequence())
    }

    fn put_distribution(&mut self, record: DistributionRecord) -> Result<(), StoreError> {
        let expected = self.next_sequence();
        if record.sequence != expected {
            return Err(out_of_order(record.sequence, expected));
        }
        self.distributions.insert(record.sequence, record);
        Ok(())
    }

    fn get_distribution(&self, sequence: u64) -> Result<Option<DistributionRecord>, StoreError> {
        Ok(self.distributions.get(&sequence).cloned())
    }

    fn iter_distributions(&self) -> Result<Vec<DistributionRecord>, StoreError> {
        Ok(self.distributions.values().cloned().collect())
    }
}

impl AllowanceStore for MemoryLedger {
    fn get_allowance(&self, owner: &Principal, spender: &Principal) -> Result<u128, StoreError> {
        Ok(self
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0))
    }

    fn put_allowance(&mut self, allowance: TransferAllowance) -> Result<(), StoreError> {
        self.allowances
            .insert((allowance.owner, allowance.spender), allowance.amount);
        Ok(())
    }
}

impl MetaStore for MemoryLedger {
    fn get_token_uri(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token_uri.clone())
    }

    fn put_token_uri(&mut self, uri: Option<String>) -> Result<(), StoreError> {
        self.token_uri = uri;
        Ok(())
    }
}

impl LedgerStore for MemoryLedger {
    fn apply(&mut self, writes: WriteSet) -> Result<(), StoreError> {
        // Validate before touching anything so a rejected batch leaves no trace.
        self.check_sequences(&writes.distributions)?;

        self.accounts.extend(writes.accounts);
        if let Some(protocol) = writes.protocol {
            self.protocol = protocol;
        }
        for record in writes.distributions {
            self.distributions.insert(record.sequence, record);
        }
        self.allowances.extend(writes.allowances);
        if let Some(uri) = writes.token_uri {
            self.token_uri = uri;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_types::Timestamp;

    fn principal(name: &str) -> Principal {
        Principal::parse(format!("acct_{name}")).unwrap()
    }

    fn record(sequence: u64, at: u64) -> DistributionRecord {
        DistributionRecord {
            sequence,
            distribution_timestamp: Timestamp::new(at),
            total_amount_distributed: 10,
            effective_apy: 750,
        }
    }

    #[test]
    fn unknown_participant_reads_as_zero() {
        let ledger = MemoryLedger::new();
        let alice = principal("alice");
        assert_eq!(ledger.get_balance(&alice).unwrap(), 0);
        assert_eq!(ledger.get_rewards(&alice).unwrap(), 0);
        assert_eq!(ledger.get_risk(&alice).unwrap(), 0);
        assert_eq!(ledger.get_coverage(&alice).unwrap(), 0);
        assert_eq!(ledger.account_count(), 0);
    }

    #[test]
    fn field_setters_touch_only_their_field() {
        let mut ledger = MemoryLedger::new();
        let alice = principal("alice");
        ledger.set_balance(&alice, 500).unwrap();
        ledger.set_risk(&alice, 3).unwrap();
        let account = ledger.get_account(&alice).unwrap().unwrap();
        assert_eq!(account.balance, 500);
        assert_eq!(account.risk_score, 3);
        assert_eq!(account.accumulated_rewards, 0);
        assert_eq!(account.insurance_coverage, 0);
    }

    #[test]
    fn distributions_must_be_appended_in_sequence() {
        let mut ledger = MemoryLedger::new();
        assert_eq!(ledger.next_distribution_sequence().unwrap(), 1);
        ledger.put_distribution(record(1, 100)).unwrap();
        assert!(ledger.put_distribution(record(1, 200)).is_err());
        assert!(ledger.put_distribution(record(3, 200)).is_err());
        ledger.put_distribution(record(2, 100)).unwrap();

        let latest = ledger.distribution_at(Timestamp::new(100)).unwrap().unwrap();
        assert_eq!(latest.sequence, 2);
        assert_eq!(ledger.iter_distributions().unwrap().len(), 2);
    }

    #[test]
    fn rejected_batch_applies_nothing() {
        let mut ledger = MemoryLedger::new();
        let alice = principal("alice");
        let mut writes = WriteSet::default();
        writes.accounts.insert(
            alice.clone(),
            ParticipantAccount {
                balance: 42,
                ..Default::default()
            },
        );
        writes.distributions.push(record(7, 100));

        assert!(ledger.apply(writes).is_err());
        assert_eq!(ledger.get_balance(&alice).unwrap(), 0);
        assert!(ledger.iter_distributions().unwrap().is_empty());
    }

    #[test]
    fn allowance_defaults_to_zero() {
        let mut ledger = MemoryLedger::new();
        let (owner, spender) = (principal("owner"), principal("spender"));
        assert_eq!(ledger.get_allowance(&owner, &spender).unwrap(), 0);
        ledger
            .put_allowance(TransferAllowance {
                owner: owner.clone(),
                spender: spender.clone(),
                amount: 9,
            })
            .unwrap();
        assert_eq!(ledger.get_allowance(&owner, &spender).unwrap(), 9);
        assert_eq!(ledger.get_allowance(&spender, &owner).unwrap(), 0);
    }
}
