//! Credential Store Port
//!
//! Adapters reference credentials by id; storage and retrieval live behind
//! this trait.

use crate::domain::value_objects::Credentials;

pub trait CredentialStore: Send + Sync {
    /// Look up credentials by id
    fn lookup(&self, id: &str) -> Option<Credentials>;
}

/// Store that knows no credentials
pub struct NoCredentials;

impl CredentialStore for NoCredentials {
    fn lookup(&self, _id: &str) -> Option<Credentials> {
        None
    }
}
