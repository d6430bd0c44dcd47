use declops_encryption::EncryptionError;
use thiserror::Error;

/// Failure categories for state reading and writing.
///
/// Callers branch on these: a future-version error means "upgrade declops",
/// an upgrade or schema error means the state file itself is damaged, and an
/// encryption error means the key material or ciphertext is wrong. No variant
/// is ever produced alongside a partial result.
#[derive(Debug, Error)]
pub enum StateError {
    /// The source was empty. Distinct from corruption: a deployment that has
    /// never been applied has no state at all.
    #[error("no state present")]
    NoState,

    /// The bytes are not a recognizable state container: not JSON, or the
    /// schema version tag is missing or malformed.
    #[error("state container unreadable: {0}")]
    UnreadableContainer(String),

    /// The version tag exceeds what this release knows how to read. Never
    /// guessed around; the state was written by a newer declops.
    #[error(
        "state schema version {found} is newer than this declops supports \
         (latest known: {current}); upgrade declops to read this state"
    )]
    UnsupportedFutureVersion { found: u64, current: u64 },

    /// A schema upgrade step rejected its input as corrupt.
    #[error("cannot upgrade state from schema version {from} to {to}: {message}")]
    Upgrade { from: u64, to: u64, message: String },

    /// The body parses as a container but violates a current-schema
    /// invariant, such as a duplicate resource address.
    #[error("state violates schema: {0}")]
    SchemaViolation(String),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    /// Serializing a valid model failed. Unreachable unless an internal
    /// invariant is broken.
    #[error("state encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
