//! Fully-qualified field names from `/Parent` links.
//!
//! Resolution happens while the forward object scan parses each `/T`, so only
//! ancestors whose names were already seen contribute. A child declared
//! before its parent keeps a truncated (possibly bare) full name.

use std::collections::{HashMap, HashSet};

use crate::model::AcroField;

#[derive(Debug, Clone)]
struct RegistryEntry {
    name: String,
    parent: Option<u32>,
}

/// Object id to `{name, parent}` for every `/T` seen so far in one parse.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    entries: HashMap<u32, RegistryEntry>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: u32, name: String, parent: Option<u32>) {
        self.entries.insert(id, RegistryEntry { name, parent });
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Names of the known ancestors of `parent`, outermost first.
    ///
    /// The walk stops at the first id missing from the registry, or at an id
    /// already visited (cyclic `/Parent` chains).
    pub fn ancestors(&self, child: u32, parent: Option<u32>) -> Vec<&str> {
        let mut names = Vec::new();
        let mut visited = HashSet::from([child]);
        let mut cursor = parent;
        while let Some(id) = cursor {
            if !visited.insert(id) {
                break;
            }
            let Some(entry) = self.entries.get(&id) else {
                break;
            };
            names.push(entry.name.as_str());
            cursor = entry.parent;
        }
        names.reverse();
        names
    }
}

/// Apply a `/T` name to `field`, register it, and compose its full name.
pub fn resolve_name(
    field: &mut AcroField,
    name: String,
    parent: Option<u32>,
    registry: &mut ObjectRegistry,
) {
    registry.register(field.id, name.clone(), parent);
    let mut segments = registry.ancestors(field.id, parent);
    segments.push(&name);
    field.full_name = segments.join(".");
    field.name = name;
}
