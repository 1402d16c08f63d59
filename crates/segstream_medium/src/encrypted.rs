//! AES-256-GCM filter for encrypted media.
//!
//! ## Format
//!
//! The stored form of the whole medium is a single sealed block:
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`. A fresh random nonce
//! is drawn on every encode, so flushing the same plaintext twice yields
//! different stored bytes.
//!
//! An empty stored medium decodes to empty plaintext, which lets a new file
//! be opened through the filter before anything has been written to it.

use crate::error::{MediumError, MediumResult};
use crate::filtered::Filter;
use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;
/// Size of GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Encryption key for [`AesGcmFilter`].
///
/// The key is zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_SIZE],
}

impl EncryptionKey {
    /// Generates a new random key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes slice is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> MediumResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(MediumError::Encryption(format!(
                "invalid key size: expected {KEY_SIZE}, got {}",
                bytes.len()
            )));
        }
        let mut key_bytes = [0u8; KEY_SIZE];
        key_bytes.copy_from_slice(bytes);
        Ok(Self { bytes: key_bytes })
    }

    /// Returns the key as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A [`Filter`] that seals the whole medium with AES-256-GCM.
pub struct AesGcmFilter {
    cipher: Aes256Gcm,
}

impl AesGcmFilter {
    /// Creates a filter using `key`.
    #[must_use]
    pub fn new(key: &EncryptionKey) -> Self {
        let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_bytes()));
        Self { cipher }
    }
}

impl std::fmt::Debug for AesGcmFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmFilter").finish_non_exhaustive()
    }
}

impl Filter for AesGcmFilter {
    fn decode(&self, stored: &[u8]) -> MediumResult<Vec<u8>> {
        if stored.is_empty() {
            return Ok(Vec::new());
        }
        if stored.len() < NONCE_SIZE + TAG_SIZE {
            return Err(MediumError::Encryption("ciphertext too short".to_string()));
        }

        let (nonce, sealed) = stored.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| MediumError::Encryption("authentication failed".to_string()))
    }

    fn encode(&self, plain: &[u8]) -> MediumResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plain)
            .map_err(|_| MediumError::Encryption("encryption error".to_string()))?;

        let mut stored = Vec::with_capacity(NONCE_SIZE + sealed.len());
        stored.extend_from_slice(&nonce_bytes);
        stored.extend_from_slice(&sealed);
        Ok(stored)
    }
}
