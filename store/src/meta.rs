//! Token metadata storage trait.

use crate::StoreError;

pub trait MetaStore {
    fn get_token_uri(&self) -> Result<Option<String>, StoreError>;
    /// `None` clears the URI.
    fn put_token_uri(&mut self, uri: Option<String>) -> Result<(), StoreError>;
}
