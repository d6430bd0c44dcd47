//! Reading: decrypt, sniff the schema version, upgrade to current.

use std::io;

use serde::Deserialize;
use serde_json::Value;

use declops_encryption::StateEncryption;

use crate::error::StateError;
use crate::file::StateFile;
use crate::schema::{v1, v2, v3, v4, CURRENT_VERSION};

/// Magic prefix of the binary state format that predates schema versioning.
const LEGACY_BINARY_MAGIC: &[u8] = b"dcstate";

#[derive(Deserialize)]
struct VersionSniff {
    version: Option<Value>,
}

/// Determine the declared schema version without decoding the body.
///
/// Bodies regularly fail strict decoding against the wrong version's types,
/// so the version must be known before any full parse is attempted. Only the
/// `version` field is examined; everything else stays opaque.
pub fn sniff_version(src: &[u8]) -> Result<u64, StateError> {
    if src.starts_with(LEGACY_BINARY_MAGIC) {
        return Err(StateError::UnreadableContainer(
            "this is a binary state file from before schema versioning; \
             it can no longer be read"
                .to_string(),
        ));
    }
    let sniff: VersionSniff = serde_json::from_slice(src)
        .map_err(|e| StateError::UnreadableContainer(format!("not a state container: {}", e)))?;
    match sniff.version {
        None => Err(StateError::UnreadableContainer(
            "state container has no schema version field".to_string(),
        )),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            StateError::UnreadableContainer(format!(
                "schema version must be a non-negative integer, found {}",
                n
            ))
        }),
        Some(other) => Err(StateError::UnreadableContainer(format!(
            "schema version must be an integer, found {}",
            other
        ))),
    }
}

/// Read a state file from `src`, decrypting with `encryption` and upgrading
/// older schema versions to the current one.
///
/// Fails without a partial result: any stage's error surfaces unchanged.
pub fn read<R: io::Read>(mut src: R, encryption: &dyn StateEncryption) -> Result<StateFile, StateError> {
    let mut raw = Vec::new();
    src.read_to_end(&mut raw)?;
    if raw.is_empty() {
        return Err(StateError::NoState);
    }

    let plaintext = encryption.open(&raw)?;
    if plaintext.iter().all(u8::is_ascii_whitespace) {
        return Err(StateError::NoState);
    }

    let version = sniff_version(&plaintext)?;
    tracing::debug!(version, "sniffed state schema version");

    let wire = match version {
        1 => v4::from_v3(v3::from_v2(v2::from_v1(v1::read_state(&plaintext)?))?)?,
        2 => v4::from_v3(v3::from_v2(v2::read_state(&plaintext)?)?)?,
        3 => v4::from_v3(v3::read_state(&plaintext)?)?,
        CURRENT_VERSION => v4::read_state(&plaintext)?,
        found if found > CURRENT_VERSION => {
            return Err(StateError::UnsupportedFutureVersion {
                found,
                current: CURRENT_VERSION,
            })
        }
        found => {
            return Err(StateError::UnreadableContainer(format!(
                "unsupported schema version {}",
                found
            )))
        }
    };

    StateFile::from_wire(wire)
}
