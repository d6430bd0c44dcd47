//! Schema version 3: structurally identical to version 2. The only change is
//! in the flatmap attribute encoding: the count key for map-shaped
//! collections uses the `.%` sigil, where version 2 used `.#` for lists and
//! maps alike. Read-only: state is never written at this version.

use serde::Deserialize;

use crate::error::StateError;
use crate::schema::v2;

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub(crate) struct State(pub v2::State);

pub(crate) fn read_state(src: &[u8]) -> Result<State, StateError> {
    serde_json::from_slice(src)
        .map_err(|e| StateError::UnreadableContainer(format!("invalid version 3 state body: {}", e)))
}

/// Rewrite map-shaped collection counts from `<prefix>.#` to `<prefix>.%` in
/// every instance of every resource. A collection is map-shaped when any of
/// its element keys has a non-numeric first segment. Nothing else changes.
pub(crate) fn from_v2(old: v2::State) -> Result<State, StateError> {
    if old.version != 2 {
        return Err(StateError::Upgrade {
            from: 2,
            to: 3,
            message: format!("input claims schema version {}, not 2", old.version),
        });
    }
    tracing::debug!(from = 2, to = 3, "upgrading state schema");
    let mut new = old;
    new.version = 3;
    for module in &mut new.modules {
        for resource in module.resources.values_mut() {
            if let Some(primary) = &mut resource.primary {
                rewrite_map_counts(primary);
            }
            for deposed in &mut resource.deposed {
                rewrite_map_counts(deposed);
            }
        }
    }
    Ok(State(new))
}

fn rewrite_map_counts(instance: &mut v2::Instance) {
    let prefixes: Vec<String> = instance
        .attributes
        .keys()
        .filter_map(|key| key.strip_suffix(".#").map(str::to_string))
        .collect();

    for prefix in prefixes {
        let dotted = format!("{}.", prefix);
        let is_map = instance.attributes.keys().any(|key| {
            key.strip_prefix(&dotted).is_some_and(|suffix| {
                let subkey = suffix.split('.').next().unwrap_or("");
                subkey != "#" && subkey != "%" && subkey.parse::<u64>().is_err()
            })
        });
        if is_map {
            if let Some(count) = instance.attributes.remove(&format!("{}.#", prefix)) {
                instance
                    .attributes
                    .insert(format!("{}.%", prefix), count);
            }
        }
    }
}
