//! Per-operation outcome counters.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Committed / rejected tallies for one operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub committed: u64,
    pub rejected: u64,
}

#[derive(Default)]
struct Slot {
    committed: AtomicU64,
    rejected: AtomicU64,
}

/// Counts how each named operation ended. Names outside the registered set
/// are ignored.
pub struct OperationStats {
    slots: BTreeMap<&'static str, Slot>,
}

impl OperationStats {
    pub fn new(operations: &[&'static str]) -> Self {
        Self {
            slots: operations.iter().map(|&op| (op, Slot::default())).collect(),
        }
    }

    pub fn record_committed(&self, op: &str) {
        if let Some(slot) = self.slots.get(op) {
            slot.committed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_rejected(&self, op: &str) {
        if let Some(slot) = self.slots.get(op) {
            slot.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn get(&self, op: &str) -> OutcomeCounts {
        self.slots
            .get(op)
            .map(|slot| OutcomeCounts {
                committed: slot.committed.load(Ordering::Relaxed),
                rejected: slot.rejected.load(Ordering::Relaxed),
            })
            .unwrap_or_default()
    }

    /// Every registered operation, in name order.
    pub fn snapshot(&self) -> BTreeMap<&'static str, OutcomeCounts> {
        self.slots.keys().map(|&op| (op, self.get(op))).collect()
    }
}
