//! Yield-specific errors.

use accrue_types::AccrueError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum YieldError {
    #[error("arithmetic overflow in yield computation")]
    Overflow,
}

impl From<YieldError> for AccrueError {
    fn from(e: YieldError) -> Self {
        match e {
            YieldError::Overflow => AccrueError::Overflow,
        }
    }
}
