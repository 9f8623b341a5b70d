//! State updater.
//!
//! Applies entries strictly in order. Secrets go through the key cache and
//! sealed-box upload; variables go through create-or-update. The first
//! failure stops the run and nothing after it is attempted.

use std::fmt;

use tracing::{debug, info};

use crate::core::api::RepoApi;
use crate::core::config::Config;
use crate::core::keys::KeyCache;
use crate::core::secrets::upload_secret;
use crate::core::state::StateEntry;
use crate::core::types::RepoSlug;
use crate::core::variables::{upsert_variable, Upsert};
use crate::error::{Result, StateError};

/// What happened to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Secret sealed and stored (the endpoint does not say which).
    SecretStored,
    /// Variable created or updated.
    Variable(Upsert),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SecretStored => write!(f, "stored"),
            Outcome::Variable(upsert) => write!(f, "{}", upsert),
        }
    }
}

/// Record of an applied entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub key: String,
    pub outcome: Outcome,
}

/// Pushes state entries to one repository.
pub struct StateUpdater<A> {
    api: A,
    repo: RepoSlug,
    keys: KeyCache,
}

impl<A: RepoApi> StateUpdater<A> {
    pub fn new(api: A, repo: RepoSlug) -> Self {
        Self {
            api,
            repo,
            keys: KeyCache::new(),
        }
    }

    /// Build an updater for the repository named in `config`.
    pub fn from_config(api: A, config: &Config) -> Self {
        Self::new(api, config.repo().clone())
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Apply a single entry.
    ///
    /// The value is resolved before any network call, so an unreadable file
    /// fails without touching the API.
    ///
    /// # Errors
    ///
    /// Returns the first error from value resolution, key fetch, sealing, or
    /// the remote call.
    pub fn apply(&self, entry: &StateEntry) -> Result<Applied> {
        let plaintext = entry.resolve()?;
        debug!(key = entry.key(), kind = entry.kind(), "applying entry");

        let outcome = if entry.is_secret() {
            upload_secret(&self.api, &self.keys, &self.repo, entry.key(), &plaintext)?;
            Outcome::SecretStored
        } else {
            let value = std::str::from_utf8(&plaintext)
                .map_err(|_| StateError::NonUtf8Value(entry.key().to_string()))?;
            Outcome::Variable(upsert_variable(&self.api, &self.repo, entry.key(), value)?)
        };

        info!(key = entry.key(), kind = entry.kind(), %outcome, "applied");

        Ok(Applied {
            key: entry.key().to_string(),
            outcome,
        })
    }

    /// Apply every entry in order, stopping at the first error.
    pub fn execute(&self, entries: &[StateEntry]) -> Result<Vec<Applied>> {
        self.execute_with(entries, |_| {})
    }

    /// Like [`execute`](Self::execute), calling `on_entry` before each entry
    /// is applied.
    pub fn execute_with<F>(&self, entries: &[StateEntry], mut on_entry: F) -> Result<Vec<Applied>>
    where
        F: FnMut(&StateEntry),
    {
        debug!(repo = %self.repo, entries = entries.len(), "executing");

        let mut applied = Vec::with_capacity(entries.len());
        for entry in entries {
            on_entry(entry);
            applied.push(self.apply(entry)?);
        }

        Ok(applied)
    }
}
