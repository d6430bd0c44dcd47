//! Reading and writing of declops state files.
//!
//! A state file records the infrastructure a deployment currently manages.
//! State written by any historical declops release stays readable: the
//! on-disk schema carries a version tag, and [`read`] upgrades older versions
//! step by step to the current schema before handing back a [`StateFile`].
//! [`write`] always emits the current version.
//!
//! Encryption at rest is transparent to all of this. The
//! [`declops_encryption::StateEncryption`] capability is passed explicitly to
//! [`read`] and [`write`]; the codec never sees ciphertext and the envelope
//! never sees the schema. Pass [`declops_encryption::Disabled`] for plain
//! state files.
//!
//! Failure is all-or-nothing with typed causes ([`StateError`]): corrupt
//! containers, files from a newer declops, damaged upgrades, schema
//! violations and decryption failures are distinct, so callers can tell a
//! user to upgrade their tool apart from telling them their state is broken.

mod error;
mod file;
mod read;
mod schema;
mod write;

pub use error::StateError;
pub use file::StateFile;
pub use read::{read, sniff_version};
pub use schema::v4::{
    EachMode, IndexKey, Instance, InstanceStatus, Output, Resource, ResourceMode,
};
pub use schema::CURRENT_VERSION;
pub use write::{encode, write};
