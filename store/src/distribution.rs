//! Distribution history storage trait.

use crate::StoreError;
use accrue_types::Timestamp;
use serde::{Deserialize, Serialize};

/// Append-only record of one global distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    /// Monotonically increasing key, starting at 1.
    pub sequence: u64,
    pub distribution_timestamp: Timestamp,
    pub total_amount_distributed: u128,
    /// Rate (basis points) in force when the distribution ran.
    pub effective_apy: u32,
}

pub trait DistributionStore {
    /// Sequence number the next appended record must carry.
    fn next_distribution_sequence(&self) -> Result<u64, StoreError>;
    fn put_distribution(&mut self, record: DistributionRecord) -> Result<(), StoreError>;
    fn get_distribution(&self, sequence: u64) -> Result<Option<DistributionRecord>, StoreError>;
    /// All records, oldest first.
    fn iter_distributions(&self) -> Result<Vec<DistributionRecord>, StoreError>;

    /// The latest record produced at exactly `timestamp`.
    fn distribution_at(&self, timestamp: Timestamp) -> Result<Option<DistributionRecord>, StoreError> {
        Ok(self
            .iter_distributions()?
            .into_iter()
            .filter(|r| r.distribution_timestamp == timestamp)
            .max_by_key(|r| r.sequence))
    }
}
