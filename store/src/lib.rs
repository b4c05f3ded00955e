//! Abstract storage traits for the Accrue staking ledger.
//!
//! Every storage backend (in-memory, transactional overlay, host-provided)
//! implements these traits. The rest of the codebase depends only on the traits.
//! Stores perform no validation: precondition checks belong to callers.

pub mod account;
pub mod allowance;
pub mod batch;
pub mod distribution;
pub mod error;
pub mod meta;
pub mod protocol;

pub use account::{AccountStore, ParticipantAccount};
pub use allowance::{AllowanceStore, TransferAllowance};
pub use batch::WriteSet;
pub use distribution::{DistributionRecord, DistributionStore};
pub use error::StoreError;
pub use meta::MetaStore;
pub use protocol::{ProtocolState, ProtocolStore};

/// A complete ledger: every record store plus atomic application of a write set.
pub trait LedgerStore:
    AccountStore + ProtocolStore + DistributionStore + AllowanceStore + MetaStore
{
    /// Apply every write in `writes`, or none of them.
    fn apply(&mut self, writes: WriteSet) -> Result<(), StoreError>;
}
