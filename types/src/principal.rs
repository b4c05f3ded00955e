//! Participant identities.
//!
//! Two shapes are recognised:
//! - standard: `acct_` followed by 1..=64 characters of `[a-z0-9]`
//! - contract: `<standard>.<name>` where `name` is 1..=40 characters of `[a-z0-9-]`
//!
//! Only standard principals are externally addressable and may receive transfers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("principal must start with `{prefix}`: {0}", prefix = Principal::PREFIX)]
    MissingPrefix(String),

    #[error("principal body must be 1..=64 chars of [a-z0-9]: {0}")]
    InvalidBody(String),

    #[error("contract name must be 1..=40 chars of [a-z0-9-]: {0}")]
    InvalidContractName(String),
}

/// Whether a principal is an end-user identity or an internal/contract one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    Standard,
    Contract,
}

/// A validated participant identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// The standard prefix for all principals.
    pub const PREFIX: &'static str = "acct_";

    const MAX_BODY_LEN: usize = 64;
    const MAX_CONTRACT_NAME_LEN: usize = 40;

    /// Parse and validate a principal string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, PrincipalError> {
        let s = raw.into();
        let (standard, contract) = match s.split_once('.') {
            Some((head, name)) => (head, Some(name)),
            None => (s.as_str(), None),
        };

        let body = standard
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| PrincipalError::MissingPrefix(s.clone()))?;
        if body.is_empty()
            || body.len() > Self::MAX_BODY_LEN
            || !body.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(PrincipalError::InvalidBody(s.clone()));
        }

        if let Some(name) = contract {
            if name.is_empty()
                || name.len() > Self::MAX_CONTRACT_NAME_LEN
                || !name
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
            {
                return Err(PrincipalError::InvalidContractName(s.clone()));
            }
        }

        Ok(Self(s))
    }

    pub fn kind(&self) -> PrincipalKind {
        if self.0.contains('.') {
            PrincipalKind::Contract
        } else {
            PrincipalKind::Standard
        }
    }

    pub fn is_standard(&self) -> bool {
        self.kind() == PrincipalKind::Standard
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = PrincipalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}
