//! Repository public key retrieval.
//!
//! The key is fetched lazily on the first secret upload and reused for the
//! rest of the run. [`KeyCache`] is a fetch-once cell: the lock is held
//! across the network call so concurrent callers cannot fetch twice.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, trace};

use crate::core::api::RepoApi;
use crate::core::types::{RepoPublicKey, RepoSlug};
use crate::error::Result;

/// Fetch the repository's current public key.
///
/// # Errors
///
/// Propagates the API error unmodified. Nothing is retried.
pub fn fetch_public_key<A: RepoApi + ?Sized>(api: &A, repo: &RepoSlug) -> Result<RepoPublicKey> {
    debug!(repo = %repo, "fetching public key");
    let key = api.get_public_key(repo)?;
    debug!(repo = %repo, key_id = %key.key_id, "public key fetched");
    Ok(key)
}

/// Session-scoped cache for the repository public key.
///
/// Only successful fetches are stored; a failed fetch leaves the cache empty.
#[derive(Debug, Default)]
pub struct KeyCache {
    cached: Mutex<Option<RepoPublicKey>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached key, if one has been fetched.
    pub fn get(&self) -> Option<RepoPublicKey> {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return the cached key, fetching it first if necessary.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; the cache stays empty.
    pub fn get_or_fetch<A: RepoApi + ?Sized>(
        &self,
        api: &A,
        repo: &RepoSlug,
    ) -> Result<RepoPublicKey> {
        let mut slot = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(key) = slot.as_ref() {
            trace!(key_id = %key.key_id, "using cached public key");
            return Ok(key.clone());
        }

        let key = fetch_public_key(api, repo)?;
        *slot = Some(key.clone());
        Ok(key)
    }
}
