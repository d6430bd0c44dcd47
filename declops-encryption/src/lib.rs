//! Encryption capability for declops state at rest.
//!
//! State readers and writers take a [`StateEncryption`] implementation as an
//! explicit parameter. The capability sees only opaque byte containers: it
//! knows nothing about the state schema, and the state codec never sees
//! ciphertext. [`Disabled`] is the identity passthrough used for unencrypted
//! state and in tests; [`AesGcmState`] encrypts with a caller-supplied
//! 256-bit key. Key management (where the key comes from, rotation) is the
//! caller's concern.

mod error;

pub use error::EncryptionError;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Envelope applied around serialized state bytes.
///
/// `open(seal(b))` must equal `b` for every byte payload. `open` must never
/// produce partial output for tampered input.
pub trait StateEncryption {
    /// Transform plaintext state bytes into the stored representation.
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError>;

    /// Transform stored bytes back into plaintext state bytes.
    fn open(&self, raw: &[u8]) -> Result<Vec<u8>, EncryptionError>;
}

/// No-op passthrough for unencrypted state. Never fails.
pub struct Disabled;

impl StateEncryption for Disabled {
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        Ok(plaintext.to_vec())
    }

    fn open(&self, raw: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        Ok(raw.to_vec())
    }
}

pub const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;
const TAG_LENGTH: usize = 16;

/// Envelope format tag, first byte of every sealed container.
const FORMAT_AES_GCM: u8 = 1;

/// 256-bit key material, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LENGTH]);

impl SymmetricKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncryptionError> {
        let arr: [u8; KEY_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| EncryptionError::InvalidKeyLength {
                    expected: KEY_LENGTH,
                    got: bytes.len(),
                })?;
        Ok(SymmetricKey(arr))
    }

    /// Parse a key from its hex form, as stored in key files.
    pub fn from_hex(s: &str) -> Result<Self, EncryptionError> {
        let s = s.trim();
        if s.len() != KEY_LENGTH * 2 {
            return Err(EncryptionError::InvalidKeyLength {
                expected: KEY_LENGTH,
                got: s.len() / 2,
            });
        }
        let mut arr = [0u8; KEY_LENGTH];
        for (i, byte) in arr.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|e| EncryptionError::InvalidKeyEncoding(e.to_string()))?;
        }
        Ok(SymmetricKey(arr))
    }
}

/// AES-256-GCM state encryption.
///
/// Sealed container layout: `[1 byte: format tag][12 bytes: nonce][ciphertext + tag]`.
/// The GCM tag authenticates the whole payload; any bit flip makes `open`
/// fail with [`EncryptionError::DecryptionFailed`].
pub struct AesGcmState {
    cipher: Aes256Gcm,
}

impl AesGcmState {
    pub fn new(key: &SymmetricKey) -> AesGcmState {
        AesGcmState {
            cipher: Aes256Gcm::new(&key.0.into()),
        }
    }
}

impl StateEncryption for AesGcmState {
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        let mut nonce = [0u8; NONCE_LENGTH];
        getrandom::getrandom(&mut nonce).map_err(|e| EncryptionError::RngFailed(e.to_string()))?;

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

        let mut out = Vec::with_capacity(1 + NONCE_LENGTH + ciphertext.len());
        out.push(FORMAT_AES_GCM);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn open(&self, raw: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        if raw.len() < 1 + NONCE_LENGTH + TAG_LENGTH {
            return Err(EncryptionError::CiphertextTooShort);
        }
        let format = raw[0];
        if format != FORMAT_AES_GCM {
            return Err(EncryptionError::UnsupportedFormat(format));
        }
        let nonce = &raw[1..1 + NONCE_LENGTH];
        let ciphertext = &raw[1 + NONCE_LENGTH..];

        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| EncryptionError::DecryptionFailed(e.to_string()))
    }
}
