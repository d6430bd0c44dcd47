//! Writing: serialize at the current schema version, then encrypt.

use std::io;

use declops_encryption::StateEncryption;

use crate::error::StateError;
use crate::file::StateFile;

/// Serialize a state file at the current schema version.
///
/// Deterministic: resources and instances are emitted in canonical order and
/// all maps are ordered, so the same logical state always produces identical
/// bytes and unrelated diffs stay quiet.
pub fn encode(file: &StateFile) -> Result<Vec<u8>, StateError> {
    let wire = file.to_wire();
    let mut buf = Vec::new();
    // Prettified to keep the state file reviewable by humans, as with the
    // rest of the on-disk formats.
    serde_json::to_writer_pretty(&mut buf, &wire).map_err(|e| StateError::Encode(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write a state file to `dst`, encrypting with `encryption`.
///
/// The destination sees a single write of the complete container or nothing
/// at all; no partial state is ever emitted.
pub fn write<W: io::Write>(
    file: &StateFile,
    dst: &mut W,
    encryption: &dyn StateEncryption,
) -> Result<(), StateError> {
    let plaintext = encode(file)?;
    let raw = encryption.seal(&plaintext)?;
    dst.write_all(&raw)?;
    Ok(())
}
