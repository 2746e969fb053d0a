//! per-run generation context
//!
//! built once at the start of a run and shared read-only by every emitter:
//! the schema, the configuration, the inheritance maps, detected
//! connection/edge types, and one validated [`FetchableType`] per object,
//! interface, or union.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::fetchable::{FetchableField, FetchableType, FieldCategory, FieldDecl, TypeCategory};
use crate::inheritance::InheritanceInfo;
use crate::schema::{Schema, SchemaField, SchemaType};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// a paginated connection type and the types behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub edge_type: String,
    pub node_type: String,
}

pub struct GeneratorContext<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
    inheritance: InheritanceInfo,
    connections: IndexMap<String, ConnectionInfo>,
    edge_types: IndexSet<String>,
    fetchable_types: IndexMap<String, Arc<FetchableType>>,
}

impl<'a> GeneratorContext<'a> {
    /// validate the config and build every fetchable type of the schema
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Result<Self> {
        config.validate()?;

        for root in schema.root_operation_types() {
            match schema.get(root) {
                Some(SchemaType::Object(_)) => {}
                Some(ty) => {
                    return Err(Error::invalid_type(
                        root,
                        format!("root operation type must be an object type, found {}", ty.kind()),
                    ));
                }
                None => {
                    return Err(Error::UnknownType {
                        type_name: root.to_string(),
                        context: "schema definition".to_string(),
                    });
                }
            }
        }

        let (connections, edge_types) = detect_connections(schema);
        let mut ctx = Self {
            schema,
            config,
            inheritance: InheritanceInfo::new(schema),
            connections,
            edge_types,
            fetchable_types: IndexMap::new(),
        };

        for name in schema.fetchable_type_names() {
            ctx.build_fetchable_type(name)?;
        }

        tracing::debug!(
            "built {} fetchable types ({} connections)",
            ctx.fetchable_types.len(),
            ctx.connections.len()
        );

        Ok(ctx)
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    pub fn inheritance(&self) -> &InheritanceInfo {
        &self.inheritance
    }

    pub fn connection(&self, name: &str) -> Option<&ConnectionInfo> {
        self.connections.get(name)
    }

    pub fn is_edge(&self, name: &str) -> bool {
        self.edge_types.contains(name)
    }

    pub fn fetchable_type(&self, name: &str) -> Result<&Arc<FetchableType>> {
        self.fetchable_types
            .get(name)
            .ok_or_else(|| Error::UnknownType {
                type_name: name.to_string(),
                context: "fetchable type lookup".to_string(),
            })
    }

    /// fetchable types in schema source order
    pub fn fetchable_types(&self) -> Vec<&Arc<FetchableType>> {
        self.schema
            .fetchable_type_names()
            .into_iter()
            .filter_map(|name| self.fetchable_types.get(name))
            .collect()
    }

    /// builder type name, e.g. `EmployeeFetcher`
    pub fn fetcher_type_name(&self, type_name: &str) -> String {
        format!("{type_name}{}", self.config.fetcher_suffix)
    }

    /// name of the empty builder constant, e.g. `employee$`
    pub fn instance_name(&self, type_name: &str) -> String {
        let mut chars = type_name.chars();
        match chars.next() {
            Some(first) => format!("{}{}$", first.to_lowercase(), chars.as_str()),
            None => "$".to_string(),
        }
    }

    /// type names a child builder of this field may be typed for
    ///
    /// a polymorphic target expands to itself plus every narrowing target.
    pub fn associated_type_names(&self, field: &FetchableField) -> Vec<String> {
        if let Some(connection) = field.connection_type_name() {
            return vec![connection.to_string()];
        }
        let Some(target) = field.target_type_name() else {
            return Vec::new();
        };
        let mut names = vec![target.to_string()];
        names.extend(self.inheritance.all_downcast_types(target));
        names
    }

    fn build_fetchable_type(&mut self, name: &str) -> Result<Arc<FetchableType>> {
        if let Some(existing) = self.fetchable_types.get(name) {
            return Ok(existing.clone());
        }

        if self.schema.get(name).is_none() {
            return Err(Error::UnknownType {
                type_name: name.to_string(),
                context: "fetchable type construction".to_string(),
            });
        }

        let category = if self.connections.contains_key(name) {
            TypeCategory::Connection
        } else if self.edge_types.contains(name) {
            TypeCategory::Edge
        } else {
            TypeCategory::Object
        };

        let mut super_types = Vec::new();
        if category == TypeCategory::Object {
            for super_name in self.super_type_names(name) {
                super_types.push(self.build_fetchable_type(&super_name)?);
            }
        }

        // a redeclaration that narrows the inherited shape stays declared
        let mut declared = Vec::new();
        for field in self.schema_fields(name) {
            let inherited = self.inherited_schema_field(&super_types, &field.name);
            if inherited.is_some_and(|inherited| inherited.same_shape(field)) {
                continue;
            }
            declared.push(FieldDecl::from(self.fetchable_field(name, field)?));
        }

        let fetchable = Arc::new(FetchableType::new(name, category, super_types, declared)?);
        self.fetchable_types
            .insert(name.to_string(), fetchable.clone());
        Ok(fetchable)
    }

    /// output fields of a type as listed in the schema
    ///
    /// a union lists the fields every member declares with the same shape,
    /// in the order of its first member.
    pub fn schema_fields(&self, name: &str) -> Vec<&'a SchemaField> {
        let schema = self.schema;
        match schema.get(name) {
            Some(SchemaType::Union(def)) => {
                let mut members = def
                    .members
                    .iter()
                    .map(|member| schema.get(member).map_or(&[][..], SchemaType::fields));
                let Some(first) = members.next() else {
                    return Vec::new();
                };
                let rest: Vec<&[SchemaField]> = members.collect();
                first
                    .iter()
                    .filter(|field| {
                        rest.iter().all(|fields| {
                            fields
                                .iter()
                                .any(|other| other.name == field.name && other.same_shape(field))
                        })
                    })
                    .collect()
            }
            Some(ty) => ty.fields().iter().collect(),
            None => Vec::new(),
        }
    }

    /// direct super-types: declared interfaces in `implements` order, then
    /// unions in schema order
    fn super_type_names(&self, name: &str) -> Vec<String> {
        let Some(upcast) = self.inheritance.upcast_types(name) else {
            return Vec::new();
        };
        let declared: &[String] = match self.schema.get(name) {
            Some(SchemaType::Object(def)) | Some(SchemaType::Interface(def)) => {
                def.interfaces.as_slice()
            }
            _ => &[],
        };

        let mut names: Vec<String> = Vec::with_capacity(upcast.len());
        let candidates = declared
            .iter()
            .map(String::as_str)
            .chain(self.schema.fetchable_type_names());
        for candidate in candidates {
            if upcast.contains(candidate) && !names.iter().any(|known| known == candidate) {
                names.push(candidate.to_string());
            }
        }
        names
    }

    /// first inherited schema field with this name, walking interfaces
    /// depth-first in declaration order
    ///
    /// fields shared through a union do not count: the member is where they
    /// come from.
    fn inherited_schema_field(
        &self,
        super_types: &[Arc<FetchableType>],
        field_name: &str,
    ) -> Option<&'a SchemaField> {
        let schema = self.schema;
        for super_type in super_types {
            let Some(schema_type) = schema.get(super_type.name()) else {
                continue;
            };
            if matches!(schema_type, SchemaType::Union(_)) {
                continue;
            }
            if super_type.declared_fields().contains_key(field_name) {
                return schema_type
                    .fields()
                    .iter()
                    .find(|field| field.name == field_name);
            }
            if let Some(field) = self.inherited_schema_field(super_type.super_types(), field_name) {
                return Some(field);
            }
        }
        None
    }

    fn fetchable_field(&self, owner: &str, field: &SchemaField) -> Result<FetchableField> {
        let base = field.ty.base_name();
        let target = self.schema.get(base).ok_or_else(|| Error::UnknownType {
            type_name: base.to_string(),
            context: format!("field {owner}.{}", field.name),
        })?;

        let mut fetchable = if let Some(connection) = self.connections.get(base) {
            FetchableField::new(&field.name, FieldCategory::Connection)
                .with_target_type(&connection.node_type)
                .with_connection(base, &connection.edge_type)
        } else if target.is_object_like() {
            let category = if field.ty.is_list() {
                FieldCategory::List
            } else {
                FieldCategory::Reference
            };
            FetchableField::new(&field.name, category).with_target_type(base)
        } else if field.name == self.config.id_field && !field.ty.is_list() {
            FetchableField::new(&field.name, FieldCategory::Id)
        } else {
            FetchableField::scalar(&field.name)
        };

        for arg in &field.arguments {
            let arg_base = arg.ty.base_name();
            if self.schema.get(arg_base).is_none() {
                return Err(Error::UnknownType {
                    type_name: arg_base.to_string(),
                    context: format!("argument {owner}.{}({})", field.name, arg.name),
                });
            }
            fetchable = fetchable.with_argument(&arg.name, arg.ty.to_sdl());
        }

        Ok(fetchable.with_undefinable(field.ty.is_nullable()))
    }
}

fn detect_connections(schema: &Schema) -> (IndexMap<String, ConnectionInfo>, IndexSet<String>) {
    let mut connections = IndexMap::new();
    let mut edge_types = IndexSet::new();

    for ty in schema.types() {
        let SchemaType::Object(def) = ty else {
            continue;
        };
        let Some(edges) = def.field("edges") else {
            continue;
        };
        if !edges.ty.is_list() {
            continue;
        }
        let edge_name = edges.ty.base_name();
        let Some(SchemaType::Object(edge)) = schema.get(edge_name) else {
            continue;
        };
        let (Some(node), Some(cursor)) = (edge.field("node"), edge.field("cursor")) else {
            continue;
        };
        if node.ty.is_list()
            || !schema.is_object_like(node.ty.base_name())
            || cursor.ty.is_list()
            || !matches!(schema.get(cursor.ty.base_name()), Some(SchemaType::Scalar(_)))
        {
            continue;
        }

        connections.insert(
            def.name.clone(),
            ConnectionInfo {
                edge_type: edge_name.to_string(),
                node_type: node.ty.base_name().to_string(),
            },
        );
        edge_types.insert(edge_name.to_string());
    }

    (connections, edge_types)
}
