//! Schema version 1: the earliest JSON state format.
//!
//! No lineage, no tool version tag. Outputs are plain strings, instance
//! attributes are a flat string map, and a resource tracks tainted instances
//! as a separate list. Read-only: state is never written at this version.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::StateError;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct State {
    #[serde(default)]
    pub serial: u64,
    /// Remote storage configuration. Carried opaquely; dropped at version 4
    /// where backend configuration lives outside the state file.
    #[serde(default)]
    pub remote: Option<serde_json::Value>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Module {
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,
    /// Keyed by `type.name` or `type.name.N` for counted resources.
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Resource {
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub primary: Option<Instance>,
    #[serde(default)]
    pub tainted: Vec<Instance>,
    #[serde(default)]
    pub deposed: Vec<Instance>,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Instance {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

pub(crate) fn read_state(src: &[u8]) -> Result<State, StateError> {
    serde_json::from_slice(src)
        .map_err(|e| StateError::UnreadableContainer(format!("invalid version 1 state body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_body() {
        let state = read_state(br#"{"version": 1, "serial": 3, "modules": []}"#).unwrap();
        assert_eq!(state.serial, 3);
        assert!(state.modules.is_empty());
    }

    #[test]
    fn parses_resource_with_tainted_list() {
        let src = br#"{
            "version": 1,
            "serial": 0,
            "modules": [{
                "path": ["root"],
                "outputs": {"address": "10.0.0.1"},
                "resources": {
                    "web_server.main": {
                        "type": "web_server",
                        "primary": {"id": "srv-1", "attributes": {"id": "srv-1"}},
                        "tainted": [{"id": "srv-0", "attributes": {"id": "srv-0"}}]
                    }
                }
            }]
        }"#;
        let state = read_state(src).unwrap();
        let module = &state.modules[0];
        assert_eq!(module.outputs["address"], "10.0.0.1");
        let resource = &module.resources["web_server.main"];
        assert_eq!(resource.tainted.len(), 1);
        assert_eq!(resource.tainted[0].id.as_deref(), Some("srv-0"));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            read_state(b"not json"),
            Err(StateError::UnreadableContainer(_))
        ));
    }
}
