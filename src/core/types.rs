//! Domain types and aliases.
//!
//! Semantic aliases keep signatures readable; [`RepoSlug`] is the one type
//! here with real parsing rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A secret or variable name (e.g., API_TOKEN, REGION).
pub type EntryName = String;

/// Base64 ciphertext ready for upload.
pub type SealedPayload = String;

/// Identifier GitHub assigns to a repository public key.
pub type KeyId = String;

/// A repository's public encryption key, as served by the API.
///
/// `key` is the base64 encoding of a 32-byte curve25519 public key. Secrets
/// must be sealed against it and uploaded together with `key_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPublicKey {
    pub key_id: KeyId,
    pub key: String,
}

/// A repository reference in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    repo: String,
}

impl RepoSlug {
    /// Build a slug from its parts, applying the same checks as parsing.
    pub fn new(owner: &str, repo: &str) -> Result<Self, ConfigError> {
        format!("{}/{}", owner, repo).parse()
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

fn valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl FromStr for RepoSlug {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if valid_segment(owner) && valid_segment(repo) => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
