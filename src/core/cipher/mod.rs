//! Secret sealing.
//!
//! GitHub only accepts secret values encrypted with libsodium's anonymous
//! sealed box (`crypto_box_seal`) against the repository public key. The
//! [`SealedBox`] type wraps a validated recipient key; [`seal`] is the
//! one-shot convenience used by the updater.
//!
//! ## Format
//!
//! ```text
//! base64( ephemeral_pk[32] || xsalsa20poly1305(plaintext)[len + 16] )
//! ```
//!
//! The nonce is derived from both public keys, so it is not transmitted.

mod sealed_box;

pub use sealed_box::{decode_public_key, SealedBox, SEAL_OVERHEAD};

use crate::core::types::{RepoPublicKey, SealedPayload};
use crate::error::Result;

/// Seal `plaintext` for the holder of `key`'s private half.
///
/// This is a convenience wrapper around [`SealedBox::seal`].
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the key material is not
/// base64 of exactly 32 bytes, or `CipherError::EncryptionFailed` if the
/// primitive fails.
pub fn seal(plaintext: &[u8], key: &RepoPublicKey) -> Result<SealedPayload> {
    SealedBox::for_key(key)?.seal(plaintext)
}
