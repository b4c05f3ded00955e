//! Capabilities supplied by the host environment on every call.
//!
//! The engine never reads ambient time or identity; it asks these traits.
//! Deterministic implementations for tests live in `accrue-nullables`.

use crate::principal::Principal;
use crate::time::Timestamp;

/// Monotonically non-decreasing time source.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Verified identity of the party making the current call.
pub trait IdentityProvider {
    fn caller(&self) -> Principal;

    /// Whether `principal` is an externally-addressable identity that may
    /// receive transfers. Contract principals are not.
    fn is_externally_addressable(&self, principal: &Principal) -> bool {
        principal.is_standard()
    }
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn caller(&self) -> Principal {
        (**self).caller()
    }

    fn is_externally_addressable(&self, principal: &Principal) -> bool {
        (**self).is_externally_addressable(principal)
    }
}
