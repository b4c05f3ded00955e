//! Fundamental types for the Accrue staking ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! principals, timestamps, amounts, staking parameters, the caller-facing error
//! taxonomy, and the traits through which the host supplies time and identity.

pub mod amount;
pub mod error;
pub mod host;
pub mod params;
pub mod principal;
pub mod time;

pub use amount::{TOKEN_DECIMALS, TOKEN_UNIT};
pub use error::AccrueError;
pub use host::{Clock, IdentityProvider, SystemClock};
pub use params::StakingParams;
pub use principal::{Principal, PrincipalError, PrincipalKind};
pub use time::Timestamp;
