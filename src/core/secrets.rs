//! Secret upload.
//!
//! Fetch (or reuse) the repository key, seal the value, and PUT it. The
//! secrets endpoint is an idempotent upsert, so there is no existence check.

use tracing::debug;

use crate::core::api::{EncryptedSecret, RepoApi};
use crate::core::cipher;
use crate::core::keys::KeyCache;
use crate::core::types::RepoSlug;
use crate::error::Result;

/// Seal `plaintext` against the repository key and store it as `name`.
///
/// Nothing is encrypted or uploaded unless the key fetch succeeds.
///
/// # Errors
///
/// Returns the key-fetch error, a `CipherError` from sealing, or the upload
/// error, whichever happens first.
pub fn upload_secret<A: RepoApi + ?Sized>(
    api: &A,
    keys: &KeyCache,
    repo: &RepoSlug,
    name: &str,
    plaintext: &[u8],
) -> Result<()> {
    let key = keys.get_or_fetch(api, repo)?;
    let encrypted_value = cipher::seal(plaintext, &key)?;

    debug!(name, key_id = %key.key_id, "sealed secret");

    api.put_secret(
        repo,
        name,
        &EncryptedSecret {
            encrypted_value,
            key_id: key.key_id,
        },
    )
}
