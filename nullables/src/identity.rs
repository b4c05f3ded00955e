//! Nullable caller identity: a switchable acting principal for testing.

use accrue_types::{IdentityProvider, Principal};
use std::collections::HashSet;
use std::sync::Mutex;

/// Reports whichever principal the test last selected as the caller.
pub struct NullCaller {
    current: Mutex<Principal>,
    /// Standard principals the test wants treated as not externally addressable.
    blocked: Mutex<HashSet<Principal>>,
}

impl NullCaller {
    pub fn new(initial: Principal) -> Self {
        Self {
            current: Mutex::new(initial),
            blocked: Mutex::new(HashSet::new()),
        }
    }

    /// Make `principal` the caller of subsequent operations.
    pub fn act_as(&self, principal: &Principal) {
        *self.current.lock().unwrap() = principal.clone();
    }

    /// Have the well-formedness check reject `principal` from now on.
    pub fn block_recipient(&self, principal: &Principal) {
        self.blocked.lock().unwrap().insert(principal.clone());
    }
}

impl IdentityProvider for NullCaller {
    fn caller(&self) -> Principal {
        self.current.lock().unwrap().clone()
    }

    fn is_externally_addressable(&self, principal: &Principal) -> bool {
        principal.is_standard() && !self.blocked.lock().unwrap().contains(principal)
    }
}
