//! Credential lookup used when verifying signed requests.

use std::collections::HashMap;

use crate::error::AuthError;

/// Trait for looking up secret access keys by access key ID.
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the secret access key for the given access key ID.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccessKeyNotFound`] if the access key ID is not recognized.
    fn get_secret_key(&self, access_key_id: &str) -> Result<String, AuthError>;
}

/// An in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use pubsub_auth::credentials::{CredentialProvider, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::new(vec![("ak".to_owned(), "sk".to_owned())]);
/// assert_eq!(provider.get_secret_key("ak").unwrap(), "sk");
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, String>,
}

impl StaticCredentialProvider {
    /// Create a provider from an iterable of (access_key_id, secret_key) pairs.
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            credentials: credentials.into_iter().collect(),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get_secret_key(&self, access_key_id: &str) -> Result<String, AuthError> {
        self.credentials
            .get(access_key_id)
            .cloned()
            .ok_or_else(|| AuthError::AccessKeyNotFound(access_key_id.to_owned()))
    }
}
