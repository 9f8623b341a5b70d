//! Remote repository API.
//!
//! The updater talks to GitHub through the [`RepoApi`] trait so the
//! decision logic can be exercised against an in-memory double.
//!
//! ## Adding a New Transport
//!
//! 1. Implement the `RepoApi` trait
//! 2. Map transport failures onto `ApiError`
//! 3. Re-export from this module

mod github;

#[cfg(test)]
pub(crate) mod mock;

pub use github::GithubClient;

use serde::{Deserialize, Serialize};

use crate::core::types::{KeyId, RepoPublicKey, RepoSlug, SealedPayload};
use crate::error::Result;

/// A repository Actions variable as the server represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVariable {
    pub name: String,
    pub value: String,
}

/// Upload body for a repository secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptedSecret {
    pub encrypted_value: SealedPayload,
    pub key_id: KeyId,
}

/// Operations consumed from the repository hosting service.
///
/// Every call blocks until the server answers or the transport gives up.
/// Implementations must not retry; errors are returned as-is.
pub trait RepoApi {
    /// Fetch the repository's current secret-encryption public key.
    fn get_public_key(&self, repo: &RepoSlug) -> Result<RepoPublicKey>;

    /// Create or overwrite a repository secret.
    fn put_secret(&self, repo: &RepoSlug, name: &str, secret: &EncryptedSecret) -> Result<()>;

    /// List every variable defined on the repository.
    fn list_variables(&self, repo: &RepoSlug) -> Result<Vec<RemoteVariable>>;

    /// Create a new repository variable.
    fn create_variable(&self, repo: &RepoSlug, variable: &RemoteVariable) -> Result<()>;

    /// Update an existing repository variable.
    fn update_variable(&self, repo: &RepoSlug, variable: &RemoteVariable) -> Result<()>;
}

impl<T: RepoApi + ?Sized> RepoApi for &T {
    fn get_public_key(&self, repo: &RepoSlug) -> Result<RepoPublicKey> {
        (**self).get_public_key(repo)
    }

    fn put_secret(&self, repo: &RepoSlug, name: &str, secret: &EncryptedSecret) -> Result<()> {
        (**self).put_secret(repo, name, secret)
    }

    fn list_variables(&self, repo: &RepoSlug) -> Result<Vec<RemoteVariable>> {
        (**self).list_variables(repo)
    }

    fn create_variable(&self, repo: &RepoSlug, variable: &RemoteVariable) -> Result<()> {
        (**self).create_variable(repo, variable)
    }

    fn update_variable(&self, repo: &RepoSlug, variable: &RemoteVariable) -> Result<()> {
        (**self).update_variable(repo, variable)
    }
}
