//! Caller-facing error taxonomy shared across crates.

use thiserror::Error;

/// Every failure a ledger operation can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccrueError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("protocol is not active")]
    NotActive,

    #[error("protocol is already initialized")]
    AlreadyInitialized,

    #[error("invalid amount: {0}")]
    InvalidAmount(u128),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("no yield available")]
    NoYieldAvailable,

    #[error("yield rate {rate} bps outside [{min}, {max}]")]
    InvalidRate { rate: u32, min: u32, max: u32 },

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("metadata length {len} outside [1, {max}]")]
    InvalidMetadata { len: usize, max: usize },

    #[error("asset restriction violated: {principal} is outside the declared set")]
    AssetRestrictionViolated { principal: String },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(String),
}
