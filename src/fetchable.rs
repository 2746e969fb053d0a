//! fetchable type model
//!
//! the semantic model generated builders are described with: one
//! [`FetchableType`] per object, interface, or union, each holding its
//! declared [`FetchableField`]s. structural rules are checked once, at
//! construction.

use crate::error::{Error, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

/// category of a fetchable type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Object,
    Connection,
    Edge,
}

impl TypeCategory {
    /// wire spelling used in generated code
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Object => "OBJECT",
            TypeCategory::Connection => "CONNECTION",
            TypeCategory::Edge => "EDGE",
        }
    }
}

/// category of a fetchable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    Id,
    Scalar,
    Reference,
    List,
    Connection,
}

impl FieldCategory {
    /// wire spelling used in generated code
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Id => "ID",
            FieldCategory::Scalar => "SCALAR",
            FieldCategory::Reference => "REFERENCE",
            FieldCategory::List => "LIST",
            FieldCategory::Connection => "CONNECTION",
        }
    }
}

/// one field of a fetchable type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchableField {
    name: String,
    category: FieldCategory,
    argument_types: IndexMap<String, String>,
    target_type_name: Option<String>,
    connection_type_name: Option<String>,
    edge_type_name: Option<String>,
    undefinable: bool,
}

impl FetchableField {
    pub fn new(name: impl Into<String>, category: FieldCategory) -> Self {
        Self {
            name: name.into(),
            category,
            argument_types: IndexMap::new(),
            target_type_name: None,
            connection_type_name: None,
            edge_type_name: None,
            undefinable: false,
        }
    }

    /// plain scalar field without arguments
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, FieldCategory::Scalar)
    }

    /// add an argument with its wire type, e.g. `("first", "Int")`
    pub fn with_argument(mut self, name: impl Into<String>, wire_type: impl Into<String>) -> Self {
        self.argument_types.insert(name.into(), wire_type.into());
        self
    }

    pub fn with_target_type(mut self, name: impl Into<String>) -> Self {
        self.target_type_name = Some(name.into());
        self
    }

    pub fn with_connection(
        mut self,
        connection_type: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        self.connection_type_name = Some(connection_type.into());
        self.edge_type_name = Some(edge_type.into());
        self
    }

    pub fn with_undefinable(mut self, undefinable: bool) -> Self {
        self.undefinable = undefinable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FieldCategory {
        self.category
    }

    pub fn argument_types(&self) -> &IndexMap<String, String> {
        &self.argument_types
    }

    pub fn target_type_name(&self) -> Option<&str> {
        self.target_type_name.as_deref()
    }

    pub fn connection_type_name(&self) -> Option<&str> {
        self.connection_type_name.as_deref()
    }

    pub fn edge_type_name(&self) -> Option<&str> {
        self.edge_type_name.as_deref()
    }

    /// value may be absent from a response
    pub fn is_undefinable(&self) -> bool {
        self.undefinable
    }

    pub fn is_plural(&self) -> bool {
        matches!(self.category, FieldCategory::List | FieldCategory::Connection)
    }

    pub fn is_association(&self) -> bool {
        self.category == FieldCategory::Reference || self.is_plural()
    }

    /// must be invoked with explicit inputs rather than read as a property
    pub fn is_function(&self) -> bool {
        !self.argument_types.is_empty() || self.is_association()
    }

    /// a scalar field that can be written as its bare name
    pub fn is_shorthand(&self) -> bool {
        self.category == FieldCategory::Scalar
            && self.argument_types.is_empty()
            && !self.undefinable
    }
}

/// declared field entry: a bare scalar name or a full descriptor
#[derive(Debug, Clone)]
pub enum FieldDecl {
    Scalar(String),
    Full(FetchableField),
}

impl From<&str> for FieldDecl {
    fn from(name: &str) -> Self {
        FieldDecl::Scalar(name.to_string())
    }
}

impl From<String> for FieldDecl {
    fn from(name: String) -> Self {
        FieldDecl::Scalar(name)
    }
}

impl From<FetchableField> for FieldDecl {
    fn from(field: FetchableField) -> Self {
        FieldDecl::Full(field)
    }
}

impl FieldDecl {
    fn into_field(self) -> FetchableField {
        match self {
            FieldDecl::Scalar(name) => FetchableField::scalar(name),
            FieldDecl::Full(field) => field,
        }
    }
}

/// generation-time model of one schema type
#[derive(Debug)]
pub struct FetchableType {
    name: String,
    category: TypeCategory,
    super_types: Vec<Arc<FetchableType>>,
    declared_fields: IndexMap<String, FetchableField>,
    fields: OnceCell<IndexMap<String, FetchableField>>,
}

impl FetchableType {
    /// build and validate a fetchable type
    ///
    /// fails when a connection lacks a list `edges` field, an edge lacks a
    /// reference `node` or scalar `cursor`, a non-object declares
    /// super-types, an association has no target, or a field name repeats.
    pub fn new<I, D>(
        name: impl Into<String>,
        category: TypeCategory,
        super_types: Vec<Arc<FetchableType>>,
        declared_fields: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<FieldDecl>,
    {
        let name = name.into();

        let mut fields = IndexMap::new();
        for decl in declared_fields {
            let field = decl.into().into_field();
            if field.is_association() && field.target_type_name.is_none() {
                return Err(Error::invalid_type(
                    &name,
                    format!("association field `{}` has no target type", field.name),
                ));
            }
            if field.category == FieldCategory::Connection
                && (field.connection_type_name.is_none() || field.edge_type_name.is_none())
            {
                return Err(Error::invalid_type(
                    &name,
                    format!(
                        "connection field `{}` needs connection and edge type names",
                        field.name
                    ),
                ));
            }
            match fields.entry(field.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(Error::invalid_type(
                        &name,
                        format!("field `{}` is declared twice", field.name),
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(field);
                }
            }
        }

        match category {
            TypeCategory::Object => {}
            TypeCategory::Connection => {
                require_field(&name, &fields, "edges", FieldCategory::List)?;
            }
            TypeCategory::Edge => {
                require_field(&name, &fields, "node", FieldCategory::Reference)?;
                require_field(&name, &fields, "cursor", FieldCategory::Scalar)?;
            }
        }

        if category != TypeCategory::Object && !super_types.is_empty() {
            return Err(Error::invalid_type(
                &name,
                format!(
                    "only OBJECT types may declare super types, found {}",
                    category.as_str()
                ),
            ));
        }

        Ok(Self {
            name,
            category,
            super_types,
            declared_fields: fields,
            fields: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    /// direct super-types in declaration order
    pub fn super_types(&self) -> &[Arc<FetchableType>] {
        &self.super_types
    }

    pub fn declared_fields(&self) -> &IndexMap<String, FetchableField> {
        &self.declared_fields
    }

    /// declared and inherited fields, computed once on first access
    ///
    /// declared fields come first; super-types are then visited depth-first
    /// in declaration order and only contribute names not yet seen.
    pub fn fields(&self) -> &IndexMap<String, FetchableField> {
        self.fields.get_or_init(|| collect_fields(self))
    }

    pub fn field(&self, name: &str) -> Option<&FetchableField> {
        self.fields().get(name)
    }
}

fn require_field(
    type_name: &str,
    fields: &IndexMap<String, FetchableField>,
    field_name: &str,
    category: FieldCategory,
) -> Result<()> {
    match fields.get(field_name) {
        Some(field) if field.category == category => Ok(()),
        Some(field) => Err(Error::invalid_type(
            type_name,
            format!(
                "field `{field_name}` must be {}, found {}",
                category.as_str(),
                field.category.as_str()
            ),
        )),
        None => Err(Error::invalid_type(
            type_name,
            format!("missing {} field `{field_name}`", category.as_str()),
        )),
    }
}

fn collect_fields(ty: &FetchableType) -> IndexMap<String, FetchableField> {
    let mut output = IndexMap::new();
    let mut origins = HashMap::new();
    visit_fields(ty, &mut Vec::new(), &mut output, &mut origins);
    output
}

/// a name first seen on a type that is still on `path` is an override of
/// the inherited field; anything else that differs is a diamond conflict
fn visit_fields<'t>(
    ty: &'t FetchableType,
    path: &mut Vec<&'t str>,
    output: &mut IndexMap<String, FetchableField>,
    origins: &mut HashMap<&'t str, &'t str>,
) {
    path.push(ty.name.as_str());
    for (name, field) in &ty.declared_fields {
        match output.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(field.clone());
                origins.insert(name.as_str(), ty.name.as_str());
            }
            Entry::Occupied(existing) => {
                let overridden = origins
                    .get(name.as_str())
                    .is_some_and(|origin| path.contains(origin));
                if existing.get() != field && !overridden {
                    tracing::warn!(
                        "field {} of {} conflicts with a field of the same name inherited \
                         from {}; keeping the first one visited",
                        name,
                        ty.name,
                        origins.get(name.as_str()).copied().unwrap_or_default()
                    );
                }
            }
        }
    }
    for super_type in &ty.super_types {
        visit_fields(super_type, path, output, origins);
    }
    path.pop();
}
