//! inheritance resolution
//!
//! downcast edges run from an interface or union to the types it can be
//! narrowed to; upcast edges are the inverse. both maps only keep immediate
//! relationships, so callers that need every ancestor or descendant walk them
//! recursively (see [`InheritanceInfo::all_downcast_types`]).

use crate::schema::{Schema, SchemaType};
use std::collections::{BTreeMap, BTreeSet};

/// adjacency map from a type name to related type names
pub type TypeMap = BTreeMap<String, BTreeSet<String>>;

/// reduced downcast and upcast maps of a schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InheritanceInfo {
    downcast: TypeMap,
    upcast: TypeMap,
}

impl InheritanceInfo {
    /// collect interface implementations and union memberships, then reduce
    pub fn new(schema: &Schema) -> Self {
        let mut edges = TypeMap::new();
        for ty in schema.types() {
            match ty {
                SchemaType::Object(def) | SchemaType::Interface(def) => {
                    for iface in &def.interfaces {
                        add_edge(&mut edges, iface, &def.name);
                    }
                }
                SchemaType::Union(def) => {
                    for member in &def.members {
                        add_edge(&mut edges, &def.name, member);
                    }
                }
                _ => {}
            }
        }
        Self::from_downcast_edges(edges)
    }

    /// build from raw (possibly redundant) downcast edges
    pub fn from_downcast_edges(edges: TypeMap) -> Self {
        let downcast = remove_superfluous(&edges);
        let mut upcast = TypeMap::new();
        for (ty, cast_types) in &downcast {
            for cast_type in cast_types {
                add_edge(&mut upcast, cast_type, ty);
            }
        }

        tracing::debug!(
            "inheritance resolved: {} downcast roots ({} raw edges, {} kept)",
            downcast.len(),
            edge_count(&edges),
            edge_count(&downcast)
        );

        Self { downcast, upcast }
    }

    pub fn downcast_map(&self) -> &TypeMap {
        &self.downcast
    }

    pub fn upcast_map(&self) -> &TypeMap {
        &self.upcast
    }

    /// immediate narrowing targets of a type
    pub fn downcast_types(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.downcast.get(name)
    }

    /// immediate supertypes of a type
    pub fn upcast_types(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.upcast.get(name)
    }

    /// true if values of this type can be narrowed further
    pub fn is_polymorphic(&self, name: &str) -> bool {
        self.downcast.contains_key(name)
    }

    /// every type reachable by narrowing, excluding `name` itself
    pub fn all_downcast_types(&self, name: &str) -> BTreeSet<String> {
        let mut output = BTreeSet::new();
        collect_reachable(&self.downcast, name, &mut output);
        output
    }

    /// every type reachable by widening, excluding `name` itself
    pub fn all_upcast_types(&self, name: &str) -> BTreeSet<String> {
        let mut output = BTreeSet::new();
        collect_reachable(&self.upcast, name, &mut output);
        output
    }
}

fn add_edge(map: &mut TypeMap, from: &str, to: &str) {
    map.entry(from.to_string())
        .or_default()
        .insert(to.to_string());
}

fn edge_count(map: &TypeMap) -> usize {
    map.values().map(BTreeSet::len).sum()
}

fn collect_reachable(map: &TypeMap, name: &str, output: &mut BTreeSet<String>) {
    if let Some(children) = map.get(name) {
        for child in children {
            if output.insert(child.clone()) {
                collect_reachable(map, child, output);
            }
        }
    }
}

/// drop every edge implied by a path through another direct edge
fn remove_superfluous(edges: &TypeMap) -> TypeMap {
    edges
        .iter()
        .map(|(ty, cast_types)| {
            let mut implied = BTreeSet::new();
            for cast_type in cast_types {
                collect_reachable(edges, cast_type, &mut implied);
            }
            let kept = cast_types.difference(&implied).cloned().collect();
            (ty.clone(), kept)
        })
        .collect()
}
