use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("encrypted state too short to contain a nonce and tag")]
    CiphertextTooShort,

    #[error("unsupported encrypted state format: {0}")]
    UnsupportedFormat(u8),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("random nonce generation failed: {0}")]
    RngFailed(String),
}
