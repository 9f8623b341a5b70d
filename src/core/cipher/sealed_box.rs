//! Anonymous sealed-box implementation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::PublicKey;
use tracing::trace;

use crate::core::constants::PUBLIC_KEY_LEN;
use crate::core::types::{RepoPublicKey, SealedPayload};
use crate::error::{CipherError, Result};

/// Bytes a sealed box adds to the plaintext: ephemeral key plus MAC tag.
pub const SEAL_OVERHEAD: usize = PUBLIC_KEY_LEN + 16;

/// A recipient public key ready for sealing.
pub struct SealedBox {
    recipient: PublicKey,
}

impl SealedBox {
    /// Build from base64 key material.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` on bad base64 or a length
    /// other than 32 bytes.
    pub fn from_base64(material: &str) -> Result<Self> {
        Ok(Self {
            recipient: decode_public_key(material)?,
        })
    }

    /// Build from a fetched repository key.
    pub fn for_key(key: &RepoPublicKey) -> Result<Self> {
        trace!(key_id = %key.key_id, "loading repository public key");
        Self::from_base64(&key.key)
    }

    /// Encrypt `plaintext` and return the base64 ciphertext.
    ///
    /// A fresh ephemeral keypair is drawn from the OS RNG on every call, so
    /// sealing the same plaintext twice yields different output.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the primitive fails.
    pub fn seal(&self, plaintext: &[u8]) -> Result<SealedPayload> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let sealed = self
            .recipient
            .seal(&mut OsRng, plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = sealed.len(), "sealed");

        Ok(STANDARD.encode(sealed))
    }
}

/// Decode base64 key material into a curve25519 public key.
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the input is not valid base64
/// or does not decode to exactly 32 bytes.
pub fn decode_public_key(material: &str) -> Result<PublicKey> {
    let bytes = STANDARD
        .decode(material.trim())
        .map_err(|e| CipherError::InvalidPublicKey(format!("invalid base64: {}", e)))?;

    let raw: [u8; PUBLIC_KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        CipherError::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LEN,
            bytes.len()
        ))
    })?;

    Ok(PublicKey::from(raw))
}
