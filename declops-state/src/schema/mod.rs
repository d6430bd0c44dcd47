//! On-disk state schemas, one module per historical version.
//!
//! Each module holds the serde types for one frozen schema version. A version
//! with a predecessor exposes exactly one conversion from that predecessor
//! (`v2::from_v1`, `v3::from_v2`, `v4::from_v3`), so every historical edge
//! case is handled in exactly one place and adding a version never touches
//! the frozen ones. Versions are never skipped.

pub(crate) mod v1;
pub(crate) mod v2;
pub(crate) mod v3;
pub mod v4;

/// The schema version this declops release writes.
pub const CURRENT_VERSION: u64 = 4;
