//! Schema version 2: adds lineage, the tool version tag, and structured
//! outputs. The version 1 tainted instance list becomes a per-instance
//! `tainted` flag. Read-only: state is never written at this version.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::StateError;
use crate::schema::v1;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct State {
    pub version: u64,
    #[serde(default)]
    pub declops_version: Option<String>,
    #[serde(default)]
    pub serial: u64,
    #[serde(default)]
    pub lineage: String,
    /// Backend configuration blocks. Carried opaquely; dropped at version 4.
    #[serde(default)]
    pub backend: Option<serde_json::Value>,
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
    pub outputs: BTreeMap<String, Output>,
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Output {
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "type", default)]
    pub type_: String,
    pub value: serde_json::Value,
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
    pub meta: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub tainted: bool,
}

pub(crate) fn read_state(src: &[u8]) -> Result<State, StateError> {
    serde_json::from_slice(src)
        .map_err(|e| StateError::UnreadableContainer(format!("invalid version 2 state body: {}", e)))
}

/// Upgrade a version 1 state in place of its version 2 reading.
///
/// Total: every value the version 1 codec can produce converts. Outputs gain
/// the structured form with type `"string"`. Tainted instances move into the
/// representation version 2 can express: each becomes a deposed instance
/// marked tainted, except that a resource with no primary promotes its first
/// tainted instance to (tainted) primary.
pub(crate) fn from_v1(old: v1::State) -> State {
    tracing::debug!(from = 1, to = 2, "upgrading state schema");
    State {
        version: 2,
        declops_version: None,
        serial: old.serial,
        lineage: String::new(),
        backend: None,
        remote: old.remote,
        modules: old.modules.into_iter().map(module_from_v1).collect(),
    }
}

fn module_from_v1(old: v1::Module) -> Module {
    // early version 1 writers omitted the path for the root module
    let path = if old.path.is_empty() {
        vec!["root".to_string()]
    } else {
        old.path
    };
    Module {
        path,
        outputs: old
            .outputs
            .into_iter()
            .map(|(name, value)| {
                (
                    name,
                    Output {
                        sensitive: false,
                        type_: "string".to_string(),
                        value: serde_json::Value::String(value),
                    },
                )
            })
            .collect(),
        resources: old
            .resources
            .into_iter()
            .map(|(key, resource)| (key, resource_from_v1(resource)))
            .collect(),
        depends_on: old.depends_on,
    }
}

fn resource_from_v1(old: v1::Resource) -> Resource {
    let mut primary = old.primary.map(|i| instance_from_v1(i, false));
    let mut deposed: Vec<Instance> = old
        .deposed
        .into_iter()
        .map(|i| instance_from_v1(i, false))
        .collect();

    let mut tainted = old.tainted.into_iter();
    if primary.is_none() {
        primary = tainted.next().map(|i| instance_from_v1(i, true));
    }
    deposed.extend(tainted.map(|i| instance_from_v1(i, true)));

    Resource {
        type_: old.type_,
        depends_on: old.depends_on,
        primary,
        deposed,
        provider: old.provider,
    }
}

fn instance_from_v1(old: v1::Instance, tainted: bool) -> Instance {
    Instance {
        id: old.id,
        attributes: old.attributes,
        meta: old
            .meta
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect(),
        tainted,
    }
}
