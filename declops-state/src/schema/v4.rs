//! Schema version 4: the current state format.
//!
//! The nested module tree of versions 1 through 3 is replaced by a flat
//! resource list addressed by module path, mode, type and name. Instances
//! carry their index explicitly, legacy flatmap attributes survive under
//! `attributes_flat`, and root module outputs move to the top level. This is
//! the only version with a writer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StateError;
use crate::schema::{v2, v3};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct State {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declops_version: Option<String>,
    pub serial: u64,
    pub lineage: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_results: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub value: Value,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Module address, e.g. `module.child`. Absent for the root module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub mode: ResourceMode,
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub each: Option<EachMode>,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    Managed,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EachMode {
    List,
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_key: Option<IndexKey>,
    /// Set for a deposed object awaiting destruction; the current instance
    /// has no deposed key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InstanceStatus>,
    pub schema_version: u64,
    /// Attribute object as produced by current providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    /// Legacy flatmap attributes, preserved verbatim for state upgraded from
    /// versions 1 through 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_flat: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub create_before_destroy: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensitive_attributes: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexKey {
    Int(u64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Tainted,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Resource {
    /// Display address, e.g. `module.child.data.keypair.deploy`.
    pub fn addr(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if let Some(module) = &self.module {
            parts.push(module);
        }
        if self.mode == ResourceMode::Data {
            parts.push("data");
        }
        parts.push(&self.type_);
        parts.push(&self.name);
        parts.join(".")
    }

    fn sort_key(&self) -> (Option<String>, ResourceMode, String, String) {
        (
            self.module.clone(),
            self.mode,
            self.type_.clone(),
            self.name.clone(),
        )
    }
}

impl State {
    /// Put resources and instances in canonical order so that encoding the
    /// same logical state always yields identical bytes.
    pub(crate) fn normalize(&mut self) {
        self.resources.sort_by_key(Resource::sort_key);
        for resource in &mut self.resources {
            resource
                .instances
                .sort_by_key(|i| (i.index_key.clone(), i.deposed.clone()));
        }
    }
}

pub(crate) fn read_state(src: &[u8]) -> Result<State, StateError> {
    serde_json::from_slice(src)
        .map_err(|e| StateError::SchemaViolation(format!("invalid version 4 state body: {}", e)))
}

fn upgrade_err(message: String) -> StateError {
    StateError::Upgrade {
        from: 3,
        to: 4,
        message,
    }
}

/// Restructure a version 3 state into version 4.
///
/// Resources leave the module tree for the flat list; counted instances,
/// recorded as separate `type.name.N` keys in version 3, regroup under one
/// resource with explicit index keys. Root outputs move to the top level;
/// non-root outputs and `remote`/`backend` blocks are dropped (derivable
/// from configuration, not state). Flatmap attributes are preserved
/// verbatim under `attributes_flat`.
pub(crate) fn from_v3(prev: v3::State) -> Result<State, StateError> {
    let old = prev.0;
    if old.version != 3 {
        return Err(upgrade_err(format!(
            "input claims schema version {}, not 3",
            old.version
        )));
    }
    tracing::debug!(from = 3, to = 4, "upgrading state schema");
    if old.remote.is_some() || old.backend.is_some() {
        tracing::debug!(
            "dropping remote/backend blocks; backend configuration lives outside the state file"
        );
    }
    let mut new = State {
        version: 4,
        declops_version: old.declops_version,
        serial: old.serial,
        lineage: old.lineage,
        outputs: BTreeMap::new(),
        resources: Vec::new(),
        check_results: None,
    };

    let mut grouped: BTreeMap<(Option<String>, ResourceMode, String, String), Resource> =
        BTreeMap::new();

    for module in &old.modules {
        let module_addr = module_addr(&module.path)?;

        if !module.depends_on.is_empty() {
            tracing::debug!(
                path = ?module.path,
                "dropping module-level dependencies; version 4 tracks dependencies per instance"
            );
        }

        if module_addr.is_none() {
            for (name, output) in &module.outputs {
                // the type tag is re-derived from the value, not copied from
                // the recorded one
                let type_ = implied_type(&output.value).ok_or_else(|| {
                    upgrade_err(format!(
                        "output {:?} (recorded type {:?}) has a null value",
                        name, output.type_
                    ))
                })?;
                new.outputs.insert(
                    name.clone(),
                    Output {
                        value: output.value.clone(),
                        type_: type_.to_string(),
                        sensitive: output.sensitive,
                    },
                );
            }
        } else if !module.outputs.is_empty() {
            tracing::debug!(
                module = module_addr.as_deref().unwrap_or_default(),
                count = module.outputs.len(),
                "dropping non-root module outputs; version 4 records root outputs only"
            );
        }

        for (key, old_resource) in &module.resources {
            let parsed = parse_resource_key(key)?;
            let provider = match old_resource.provider.as_deref() {
                Some(p) if !p.is_empty() => p.to_string(),
                _ => default_provider(&parsed.type_),
            };

            let entry = grouped
                .entry((
                    module_addr.clone(),
                    parsed.mode,
                    parsed.type_.clone(),
                    parsed.name.clone(),
                ))
                .or_insert_with(|| Resource {
                    module: module_addr.clone(),
                    mode: parsed.mode,
                    type_: parsed.type_.clone(),
                    name: parsed.name.clone(),
                    provider: provider.clone(),
                    each: None,
                    instances: Vec::new(),
                });
            if entry.provider != provider {
                return Err(upgrade_err(format!(
                    "instances of {} disagree on provider: {:?} vs {:?}",
                    entry.addr(),
                    entry.provider,
                    provider
                )));
            }
            if parsed.index.is_some() {
                entry.each = Some(EachMode::List);
            }

            if let Some(primary) = &old_resource.primary {
                entry.instances.push(instance_from_v3(
                    primary,
                    key,
                    parsed.index,
                    None,
                    &old_resource.depends_on,
                )?);
            }
            for (i, deposed) in old_resource.deposed.iter().enumerate() {
                entry.instances.push(instance_from_v3(
                    deposed,
                    key,
                    parsed.index,
                    Some(format!("{:08x}", i + 1)),
                    &old_resource.depends_on,
                )?);
            }
        }
    }

    new.resources = grouped.into_values().collect();
    Ok(new)
}

fn instance_from_v3(
    old: &v2::Instance,
    key: &str,
    index: Option<u64>,
    deposed: Option<String>,
    depends_on: &[String],
) -> Result<Instance, StateError> {
    let mut attributes_flat = old.attributes.clone();
    if let Some(id) = &old.id {
        if let Some(existing) = attributes_flat.get("id") {
            if existing != id {
                return Err(upgrade_err(format!(
                    "resource {}: instance id {:?} conflicts with attribute \"id\" {:?}",
                    key, id, existing
                )));
            }
        }
        attributes_flat.insert("id".to_string(), id.clone());
    }

    let schema_version = match old.meta.get("schema_version") {
        None => 0,
        Some(Value::String(s)) => s.parse().map_err(|_| {
            upgrade_err(format!(
                "resource {}: meta \"schema_version\" {:?} is not an integer",
                key, s
            ))
        })?,
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            upgrade_err(format!(
                "resource {}: meta \"schema_version\" {} is not a non-negative integer",
                key, n
            ))
        })?,
        Some(other) => {
            return Err(upgrade_err(format!(
                "resource {}: meta \"schema_version\" has unexpected type: {}",
                key, other
            )))
        }
    };

    Ok(Instance {
        index_key: index.map(IndexKey::Int),
        deposed,
        status: old.tainted.then_some(InstanceStatus::Tainted),
        schema_version,
        attributes: None,
        attributes_flat: Some(attributes_flat),
        private: None,
        dependencies: depends_on.to_vec(),
        create_before_destroy: false,
        sensitive_attributes: Vec::new(),
    })
}

struct ParsedKey {
    mode: ResourceMode,
    type_: String,
    name: String,
    index: Option<u64>,
}

/// Resource keys in versions 1 through 3 look like `type.name`,
/// `type.name.N` for counted instances, with a `data.` prefix for data
/// sources.
fn parse_resource_key(key: &str) -> Result<ParsedKey, StateError> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let mode = if parts.first() == Some(&"data") {
        parts.remove(0);
        ResourceMode::Data
    } else {
        ResourceMode::Managed
    };
    let index = if parts.len() > 2 {
        match parts.last().and_then(|s| s.parse::<u64>().ok()) {
            Some(i) => {
                parts.pop();
                Some(i)
            }
            None => None,
        }
    } else {
        None
    };
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(upgrade_err(format!("unparseable resource key {:?}", key)));
    }
    Ok(ParsedKey {
        mode,
        type_: parts[0].to_string(),
        name: parts[1].to_string(),
        index,
    })
}

/// A resource recorded without an explicit provider belongs to the default
/// provider named by the first word of its type.
fn default_provider(type_: &str) -> String {
    let provider_type = type_.split('_').next().unwrap_or(type_);
    format!("provider.{}", provider_type)
}

fn module_addr(path: &[String]) -> Result<Option<String>, StateError> {
    match path.split_first() {
        Some((root, rest)) if root == "root" => {
            if rest.is_empty() {
                return Ok(None);
            }
            if rest.iter().any(|name| name.is_empty()) {
                return Err(upgrade_err(format!("invalid module path {:?}", path)));
            }
            Ok(Some(
                rest.iter()
                    .map(|name| format!("module.{}", name))
                    .collect::<Vec<_>>()
                    .join("."),
            ))
        }
        _ => Err(upgrade_err(format!("invalid module path {:?}", path))),
    }
}

/// Coarse type tag for an output value, derived from its JSON shape.
fn implied_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some("bool"),
        Value::Number(_) => Some("number"),
        Value::String(_) => Some("string"),
        Value::Array(_) => Some("list"),
        Value::Object(_) => Some("map"),
    }
}

/// Validate structural invariants that serde cannot express: unique resource
/// addresses, and unique (index, deposed) keys within each resource.
pub(crate) fn validate(state: &State) -> Result<(), StateError> {
    if state.version != 4 {
        return Err(StateError::SchemaViolation(format!(
            "expected schema version 4, found {}",
            state.version
        )));
    }

    let mut addrs = BTreeSet::new();
    for resource in &state.resources {
        let addr = resource.addr();
        if !addrs.insert(resource.sort_key()) {
            return Err(StateError::SchemaViolation(format!(
                "duplicate resource {}",
                addr
            )));
        }
        let mut keys = BTreeSet::new();
        for instance in &resource.instances {
            if !keys.insert((instance.index_key.clone(), instance.deposed.clone())) {
                let which = match &instance.deposed {
                    Some(deposed_key) => format!("deposed object {}", deposed_key),
                    None => "instance".to_string(),
                };
                return Err(StateError::SchemaViolation(format!(
                    "duplicate {} for {}{}",
                    which,
                    addr,
                    instance
                        .index_key
                        .as_ref()
                        .map(|k| format!(" at index {:?}", k))
                        .unwrap_or_default()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::schema::v3;

    fn v3_state(modules: Vec<v2::Module>) -> v3::State {
        v3::State(v2::State {
            version: 3,
            declops_version: Some("0.9.3".to_string()),
            serial: 7,
            lineage: "11111111-2222-3333-4444-555555555555".to_string(),
            backend: None,
            remote: None,
            modules,
        })
    }

    fn v3_instance(id: &str) -> v2::Instance {
        v2::Instance {
            id: Some(id.to_string()),
            attributes: [("id".to_string(), id.to_string())].into(),
            meta: BTreeMap::new(),
            tainted: false,
        }
    }

    fn v3_resource(id: &str) -> v2::Resource {
        v2::Resource {
            type_: "web_server".to_string(),
            depends_on: vec![],
            primary: Some(v3_instance(id)),
            deposed: vec![],
            provider: Some("provider.web".to_string()),
        }
    }

    #[test]
    fn parse_resource_key_forms() {
        let simple = parse_resource_key("web_server.main").unwrap();
        assert_eq!(simple.mode, ResourceMode::Managed);
        assert_eq!(simple.type_, "web_server");
        assert_eq!(simple.name, "main");
        assert_eq!(simple.index, None);

        let counted = parse_resource_key("web_server.main.2").unwrap();
        assert_eq!(counted.index, Some(2));

        let data = parse_resource_key("data.keypair.deploy").unwrap();
        assert_eq!(data.mode, ResourceMode::Data);
        assert_eq!(data.type_, "keypair");

        let counted_data = parse_resource_key("data.keypair.deploy.0").unwrap();
        assert_eq!(counted_data.mode, ResourceMode::Data);
        assert_eq!(counted_data.index, Some(0));

        assert!(parse_resource_key("justtype").is_err());
        assert!(parse_resource_key("a.b.c.d").is_err());
        assert!(parse_resource_key("").is_err());
    }

    #[test]
    fn counted_instances_regroup_under_one_resource() {
        let resources: BTreeMap<String, v2::Resource> = [
            ("web_server.cluster.0".to_string(), v3_resource("srv-0")),
            ("web_server.cluster.1".to_string(), v3_resource("srv-1")),
        ]
        .into();
        let state = v3_state(vec![v2::Module {
            path: vec!["root".to_string()],
            outputs: BTreeMap::new(),
            resources,
            depends_on: vec![],
        }]);

        let new = from_v3(state).unwrap();
        assert_eq!(new.resources.len(), 1);
        let resource = &new.resources[0];
        assert_eq!(resource.each, Some(EachMode::List));
        assert_eq!(resource.instances.len(), 2);
        assert_eq!(resource.instances[0].index_key, Some(IndexKey::Int(0)));
        assert_eq!(resource.instances[1].index_key, Some(IndexKey::Int(1)));
    }

    #[test]
    fn root_outputs_move_to_top_level_and_module_outputs_drop() {
        let state = v3_state(vec![
            v2::Module {
                path: vec!["root".to_string()],
                outputs: [(
                    "addresses".to_string(),
                    v2::Output {
                        sensitive: false,
                        type_: "list".to_string(),
                        value: json!(["10.0.0.1", "10.0.0.2"]),
                    },
                )]
                .into(),
                resources: BTreeMap::new(),
                depends_on: vec![],
            },
            v2::Module {
                path: vec!["root".to_string(), "network".to_string()],
                outputs: [(
                    "subnet".to_string(),
                    v2::Output {
                        sensitive: false,
                        type_: "string".to_string(),
                        value: json!("10.0.0.0/24"),
                    },
                )]
                .into(),
                resources: [("subnet.main".to_string(), v3_resource("net-1"))].into(),
                depends_on: vec![],
            },
        ]);

        let new = from_v3(state).unwrap();
        assert_eq!(new.outputs.len(), 1);
        assert_eq!(new.outputs["addresses"].type_, "list");
        let resource = &new.resources[0];
        assert_eq!(resource.module.as_deref(), Some("module.network"));
        assert_eq!(resource.addr(), "module.network.subnet.main");
    }

    #[test]
    fn tainted_flag_becomes_status_and_deposed_get_keys() {
        let mut resource = v3_resource("srv-1");
        resource.primary.as_mut().unwrap().tainted = true;
        resource.deposed = vec![v3_instance("srv-a"), v3_instance("srv-b")];
        let state = v3_state(vec![v2::Module {
            path: vec!["root".to_string()],
            outputs: BTreeMap::new(),
            resources: [("web_server.main".to_string(), resource)].into(),
            depends_on: vec![],
        }]);

        let new = from_v3(state).unwrap();
        let instances = &new.resources[0].instances;
        assert_eq!(instances.len(), 3);
        assert_eq!(instances[0].status, Some(InstanceStatus::Tainted));
        assert_eq!(instances[0].deposed, None);
        assert_eq!(instances[1].deposed.as_deref(), Some("00000001"));
        assert_eq!(instances[2].deposed.as_deref(), Some("00000002"));
    }

    #[test]
    fn schema_version_parses_from_string_and_number() {
        let mut instance = v3_instance("srv-1");
        instance.meta = [("schema_version".to_string(), json!("3"))].into();
        let upgraded = instance_from_v3(&instance, "web_server.main", None, None, &[]).unwrap();
        assert_eq!(upgraded.schema_version, 3);

        instance.meta = [("schema_version".to_string(), json!(2))].into();
        let upgraded = instance_from_v3(&instance, "web_server.main", None, None, &[]).unwrap();
        assert_eq!(upgraded.schema_version, 2);

        instance.meta = [("schema_version".to_string(), json!("x"))].into();
        assert!(matches!(
            instance_from_v3(&instance, "web_server.main", None, None, &[]),
            Err(StateError::Upgrade { from: 3, to: 4, .. })
        ));
    }

    #[test]
    fn conflicting_instance_id_is_corrupt() {
        let mut instance = v3_instance("srv-1");
        instance
            .attributes
            .insert("id".to_string(), "srv-2".to_string());
        let err = instance_from_v3(&instance, "web_server.main", None, None, &[]).unwrap_err();
        match err {
            StateError::Upgrade { from: 3, to: 4, message } => {
                assert!(message.contains("\"id\""), "message: {}", message);
            }
            other => panic!("expected Upgrade error, got {:?}", other),
        }
    }

    #[test]
    fn missing_provider_falls_back_to_type_prefix() {
        let mut resource = v3_resource("db-1");
        resource.type_ = "pg_database".to_string();
        resource.provider = None;
        let state = v3_state(vec![v2::Module {
            path: vec!["root".to_string()],
            outputs: BTreeMap::new(),
            resources: [("pg_database.main".to_string(), resource)].into(),
            depends_on: vec![],
        }]);
        let new = from_v3(state).unwrap();
        assert_eq!(new.resources[0].provider, "provider.pg");
    }

    #[test]
    fn provider_disagreement_is_corrupt() {
        let mut a = v3_resource("srv-0");
        a.provider = Some("provider.web".to_string());
        let mut b = v3_resource("srv-1");
        b.provider = Some("provider.other".to_string());
        let state = v3_state(vec![v2::Module {
            path: vec!["root".to_string()],
            outputs: BTreeMap::new(),
            resources: [
                ("web_server.cluster.0".to_string(), a),
                ("web_server.cluster.1".to_string(), b),
            ]
            .into(),
            depends_on: vec![],
        }]);
        assert!(matches!(
            from_v3(state),
            Err(StateError::Upgrade { from: 3, to: 4, .. })
        ));
    }

    #[test]
    fn invalid_module_path_is_corrupt() {
        let state = v3_state(vec![v2::Module {
            path: vec!["not-root".to_string()],
            outputs: BTreeMap::new(),
            resources: BTreeMap::new(),
            depends_on: vec![],
        }]);
        assert!(matches!(
            from_v3(state),
            Err(StateError::Upgrade { from: 3, to: 4, .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_resource() {
        let resource = Resource {
            module: None,
            mode: ResourceMode::Managed,
            type_: "web_server".to_string(),
            name: "main".to_string(),
            provider: "provider.web".to_string(),
            each: None,
            instances: vec![],
        };
        let state = State {
            version: 4,
            declops_version: None,
            serial: 0,
            lineage: String::new(),
            outputs: BTreeMap::new(),
            resources: vec![resource.clone(), resource],
            check_results: None,
        };
        assert!(matches!(
            validate(&state),
            Err(StateError::SchemaViolation(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_instance_key() {
        let instance = Instance {
            index_key: Some(IndexKey::Int(0)),
            deposed: None,
            status: None,
            schema_version: 0,
            attributes: Some(json!({"id": "srv-0"})),
            attributes_flat: None,
            private: None,
            dependencies: vec![],
            create_before_destroy: false,
            sensitive_attributes: vec![],
        };
        let state = State {
            version: 4,
            declops_version: None,
            serial: 0,
            lineage: String::new(),
            outputs: BTreeMap::new(),
            resources: vec![Resource {
                module: None,
                mode: ResourceMode::Managed,
                type_: "web_server".to_string(),
                name: "main".to_string(),
                provider: "provider.web".to_string(),
                each: Some(EachMode::List),
                instances: vec![instance.clone(), instance],
            }],
            check_results: None,
        };
        assert!(matches!(
            validate(&state),
            Err(StateError::SchemaViolation(_))
        ));
    }

    #[test]
    fn normalize_orders_resources_and_instances() {
        let mk = |module: Option<&str>, type_: &str, name: &str| Resource {
            module: module.map(str::to_string),
            mode: ResourceMode::Managed,
            type_: type_.to_string(),
            name: name.to_string(),
            provider: "provider.web".to_string(),
            each: None,
            instances: vec![],
        };
        let mut state = State {
            version: 4,
            declops_version: None,
            serial: 0,
            lineage: String::new(),
            outputs: BTreeMap::new(),
            resources: vec![
                mk(Some("module.net"), "subnet", "main"),
                mk(None, "web_server", "main"),
                mk(None, "keypair", "deploy"),
            ],
            check_results: None,
        };
        state.normalize();
        assert_eq!(state.resources[0].type_, "keypair");
        assert_eq!(state.resources[1].type_, "web_server");
        assert_eq!(state.resources[2].module.as_deref(), Some("module.net"));
    }

    #[test]
    fn index_key_serializes_untagged() {
        assert_eq!(serde_json::to_string(&IndexKey::Int(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&IndexKey::String("eu".to_string())).unwrap(),
            "\"eu\""
        );
        let parsed: IndexKey = serde_json::from_str("\"eu\"").unwrap();
        assert_eq!(parsed, IndexKey::String("eu".to_string()));
    }
}
