//! The in-memory state file at the current schema version.

use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use crate::error::StateError;
use crate::schema::v4;
use crate::schema::CURRENT_VERSION;

/// A state file, upgraded to the current schema.
///
/// Produced by [`crate::read`] and consumed by [`crate::write`]. The version
/// tag is implicit: a `StateFile` is always at [`CURRENT_VERSION`]. The
/// serial can only move forward, and lineage, once set, identifies this
/// state's line of descent across writes.
#[derive(Debug, Clone, PartialEq)]
pub struct StateFile {
    /// The declops release that most recently wrote this state.
    pub declops_version: Option<String>,
    serial: u64,
    lineage: String,
    pub outputs: BTreeMap<String, v4::Output>,
    pub resources: Vec<v4::Resource>,
    /// Condition check outcomes from the last apply, carried opaquely.
    pub check_results: Option<Value>,
}

impl StateFile {
    /// An empty state with a freshly minted lineage and serial 0.
    pub fn new() -> StateFile {
        StateFile {
            declops_version: None,
            serial: 0,
            lineage: Uuid::new_v4().to_string(),
            outputs: BTreeMap::new(),
            resources: Vec::new(),
            check_results: None,
        }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Bump the serial before a write that supersedes the stored state.
    /// There is deliberately no way to lower it.
    pub fn advance_serial(&mut self) {
        self.serial += 1;
    }

    pub fn lineage(&self) -> &str {
        &self.lineage
    }

    /// Mint a lineage for state upgraded from a version that predates
    /// lineage tracking. Does nothing when one is already present, so
    /// repeated reads of the same file stay identical.
    pub fn set_lineage_if_empty(&mut self) {
        if self.lineage.is_empty() {
            self.lineage = Uuid::new_v4().to_string();
        }
    }

    pub(crate) fn from_wire(wire: v4::State) -> Result<StateFile, StateError> {
        v4::validate(&wire)?;
        Ok(StateFile {
            declops_version: wire.declops_version,
            serial: wire.serial,
            lineage: wire.lineage,
            outputs: wire.outputs,
            resources: wire.resources,
            check_results: wire.check_results,
        })
    }

    pub(crate) fn to_wire(&self) -> v4::State {
        let mut wire = v4::State {
            version: CURRENT_VERSION,
            declops_version: self.declops_version.clone(),
            serial: self.serial,
            lineage: self.lineage.clone(),
            outputs: self.outputs.clone(),
            resources: self.resources.clone(),
            check_results: self.check_results.clone(),
        };
        wire.normalize();
        wire
    }
}

impl Default for StateFile {
    fn default() -> Self {
        StateFile::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::v4::{Instance, IndexKey, Resource, ResourceMode};

    fn resource(name: &str) -> Resource {
        Resource {
            module: None,
            mode: ResourceMode::Managed,
            type_: "web_server".to_string(),
            name: name.to_string(),
            provider: "provider.web".to_string(),
            each: None,
            instances: vec![Instance {
                index_key: None,
                deposed: None,
                status: None,
                schema_version: 0,
                attributes: Some(serde_json::json!({"id": "srv-1"})),
                attributes_flat: None,
                private: None,
                dependencies: vec![],
                create_before_destroy: false,
                sensitive_attributes: vec![],
            }],
        }
    }

    #[test]
    fn new_states_have_distinct_lineage() {
        let a = StateFile::new();
        let b = StateFile::new();
        assert_ne!(a.lineage(), b.lineage());
        assert_eq!(a.serial(), 0);
    }

    #[test]
    fn serial_only_advances() {
        let mut state = StateFile::new();
        state.advance_serial();
        state.advance_serial();
        assert_eq!(state.serial(), 2);
    }

    #[test]
    fn lineage_minting_is_idempotent() {
        let mut state = StateFile::new();
        let wire = state.to_wire();
        state = StateFile::from_wire(wire).unwrap();
        let before = state.lineage().to_string();
        state.set_lineage_if_empty();
        assert_eq!(state.lineage(), before);
    }

    #[test]
    fn from_wire_validates() {
        let mut state = StateFile::new();
        state.resources = vec![resource("main"), resource("main")];
        let wire = state.to_wire();
        assert!(matches!(
            StateFile::from_wire(wire),
            Err(StateError::SchemaViolation(_))
        ));
    }

    #[test]
    fn to_wire_round_trips() {
        let mut state = StateFile::new();
        state.declops_version = Some("0.9.3".to_string());
        state.resources = vec![resource("a"), resource("b")];
        state.resources[1].instances[0].index_key = Some(IndexKey::Int(0));
        let restored = StateFile::from_wire(state.to_wire()).unwrap();
        assert_eq!(restored, state);
    }
}
