use accrue_types::AccrueError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("write to {principal} is outside the restricted scope")]
    RestrictionViolated { principal: String },
}

impl From<StoreError> for AccrueError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::RestrictionViolated { principal } => {
                AccrueError::AssetRestrictionViolated { principal }
            }
            StoreError::Backend(msg) => AccrueError::Storage(msg),
        }
    }
}
