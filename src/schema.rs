//! schema model
//!
//! owned, typed view of a parsed graphql sdl document. every other module
//! reads the schema through this layer instead of the parser's ast.

use crate::error::{Error, Result};
use graphql_parser::schema::{
    parse_schema, Definition, Document, Field, InputValue, Type, TypeDefinition, TypeExtension,
};
use indexmap::IndexMap;

const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// reference to a type as written at a field or argument site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// innermost named type
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    /// true unless the outermost wrapper is non-null
    pub fn is_nullable(&self) -> bool {
        !matches!(self, TypeRef::NonNull(_))
    }

    /// true if the type is a list, ignoring a non-null wrapper
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
            TypeRef::Named(_) => false,
        }
    }

    /// sdl spelling, e.g. `[ID!]!`
    pub fn to_sdl(&self) -> String {
        match self {
            TypeRef::Named(name) => name.clone(),
            TypeRef::List(inner) => format!("[{}]", inner.to_sdl()),
            TypeRef::NonNull(inner) => format!("{}!", inner.to_sdl()),
        }
    }

    fn from_ast(ty: &Type<'_, String>) -> Self {
        match ty {
            Type::NamedType(name) => TypeRef::Named(name.clone()),
            Type::ListType(inner) => TypeRef::List(Box::new(TypeRef::from_ast(inner))),
            Type::NonNullType(inner) => TypeRef::NonNull(Box::new(TypeRef::from_ast(inner))),
        }
    }
}

/// field or input-field argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaArgument {
    pub name: String,
    pub ty: TypeRef,
}

impl SchemaArgument {
    fn from_ast(value: &InputValue<'_, String>) -> Self {
        Self {
            name: value.name.clone(),
            ty: TypeRef::from_ast(&value.value_type),
        }
    }
}

/// output field of an object or interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<SchemaArgument>,
}

impl SchemaField {
    fn from_ast(field: &Field<'_, String>) -> Self {
        Self {
            name: field.name.clone(),
            ty: TypeRef::from_ast(&field.field_type),
            arguments: field.arguments.iter().map(SchemaArgument::from_ast).collect(),
        }
    }

    /// true if two fields have the same type and argument list
    pub fn same_shape(&self, other: &SchemaField) -> bool {
        self.ty == other.ty && self.arguments == other.arguments
    }
}

/// object or interface body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDef {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<SchemaField>,
}

impl ObjectDef {
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDef {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectDef {
    pub name: String,
    pub fields: Vec<SchemaArgument>,
}

/// one named schema type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Object(ObjectDef),
    Interface(ObjectDef),
    Union(UnionDef),
    Enum(EnumDef),
    InputObject(InputObjectDef),
    Scalar(String),
}

impl SchemaType {
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Object(def) | SchemaType::Interface(def) => &def.name,
            SchemaType::Union(def) => &def.name,
            SchemaType::Enum(def) => &def.name,
            SchemaType::InputObject(def) => &def.name,
            SchemaType::Scalar(name) => name,
        }
    }

    /// sdl keyword of the type kind
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaType::Object(_) => "type",
            SchemaType::Interface(_) => "interface",
            SchemaType::Union(_) => "union",
            SchemaType::Enum(_) => "enum",
            SchemaType::InputObject(_) => "input",
            SchemaType::Scalar(_) => "scalar",
        }
    }

    /// object, interface, or union
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            SchemaType::Object(_) | SchemaType::Interface(_) | SchemaType::Union(_)
        )
    }

    /// declared output fields; unions have none
    pub fn fields(&self) -> &[SchemaField] {
        match self {
            SchemaType::Object(def) | SchemaType::Interface(def) => &def.fields,
            _ => &[],
        }
    }
}

/// parsed schema
#[derive(Debug, Clone)]
pub struct Schema {
    types: IndexMap<String, SchemaType>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl Schema {
    /// parse sdl text into a schema
    pub fn parse(sdl: &str) -> Result<Self> {
        let document = parse_schema::<String>(sdl)?;
        Self::from_document(&document)
    }

    /// wrap an already parsed document
    ///
    /// type extensions are merged into the type they extend; extending an
    /// unknown type or a type of another kind fails.
    pub fn from_document(doc: &Document<'_, String>) -> Result<Self> {
        let mut types = IndexMap::new();
        let mut query_type = None;
        let mut mutation_type = None;
        let mut subscription_type = None;

        for def in &doc.definitions {
            match def {
                Definition::TypeDefinition(ty) => {
                    let ty = match ty {
                        TypeDefinition::Scalar(scalar) => SchemaType::Scalar(scalar.name.clone()),
                        TypeDefinition::Object(obj) => SchemaType::Object(ObjectDef {
                            name: obj.name.clone(),
                            interfaces: obj.implements_interfaces.clone(),
                            fields: obj.fields.iter().map(SchemaField::from_ast).collect(),
                        }),
                        TypeDefinition::Interface(iface) => SchemaType::Interface(ObjectDef {
                            name: iface.name.clone(),
                            interfaces: iface.implements_interfaces.clone(),
                            fields: iface.fields.iter().map(SchemaField::from_ast).collect(),
                        }),
                        TypeDefinition::Union(union_ty) => SchemaType::Union(UnionDef {
                            name: union_ty.name.clone(),
                            members: union_ty.types.clone(),
                        }),
                        TypeDefinition::Enum(enum_ty) => SchemaType::Enum(EnumDef {
                            name: enum_ty.name.clone(),
                            values: enum_ty.values.iter().map(|v| v.name.clone()).collect(),
                        }),
                        TypeDefinition::InputObject(input) => {
                            SchemaType::InputObject(InputObjectDef {
                                name: input.name.clone(),
                                fields: input.fields.iter().map(SchemaArgument::from_ast).collect(),
                            })
                        }
                    };
                    types.insert(ty.name().to_string(), ty);
                }
                Definition::SchemaDefinition(schema) => {
                    query_type = schema.query.clone();
                    mutation_type = schema.mutation.clone();
                    subscription_type = schema.subscription.clone();
                }
                _ => {}
            }
        }

        for scalar in BUILTIN_SCALARS {
            types
                .entry(scalar.to_string())
                .or_insert_with(|| SchemaType::Scalar(scalar.to_string()));
        }

        for def in &doc.definitions {
            if let Definition::TypeExtension(ext) = def {
                merge_extension(&mut types, ext)?;
            }
        }

        for (root, default) in [
            (&mut query_type, "Query"),
            (&mut mutation_type, "Mutation"),
            (&mut subscription_type, "Subscription"),
        ] {
            if root.is_none() && types.contains_key(default) {
                *root = Some(default.to_string());
            }
        }

        Ok(Self {
            types,
            query_type,
            mutation_type,
            subscription_type,
        })
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    /// every type in declaration order, builtin scalars last
    pub fn types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.values()
    }

    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// query, mutation, and subscription root names that are set
    pub fn root_operation_types(&self) -> impl Iterator<Item = &str> {
        [&self.query_type, &self.mutation_type, &self.subscription_type]
            .into_iter()
            .filter_map(|root| root.as_deref())
    }

    pub fn is_object_like(&self, name: &str) -> bool {
        self.get(name).is_some_and(SchemaType::is_object_like)
    }

    /// names of every object, interface, and union, in source order
    pub fn fetchable_type_names(&self) -> Vec<&str> {
        self.types
            .values()
            .filter(|ty| ty.is_object_like())
            .map(SchemaType::name)
            .collect()
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.types.values().filter_map(|ty| match ty {
            SchemaType::Enum(def) => Some(def),
            _ => None,
        })
    }

    pub fn input_objects(&self) -> impl Iterator<Item = &InputObjectDef> {
        self.types.values().filter_map(|ty| match ty {
            SchemaType::InputObject(def) => Some(def),
            _ => None,
        })
    }
}

fn merge_extension(
    types: &mut IndexMap<String, SchemaType>,
    ext: &TypeExtension<'_, String>,
) -> Result<()> {
    let name = match ext {
        TypeExtension::Scalar(ext) => &ext.name,
        TypeExtension::Object(ext) => &ext.name,
        TypeExtension::Interface(ext) => &ext.name,
        TypeExtension::Union(ext) => &ext.name,
        TypeExtension::Enum(ext) => &ext.name,
        TypeExtension::InputObject(ext) => &ext.name,
    };
    let Some(ty) = types.get_mut(name) else {
        return Err(Error::UnknownType {
            type_name: name.clone(),
            context: "type extension".to_string(),
        });
    };

    match (ty, ext) {
        (SchemaType::Object(def), TypeExtension::Object(ext)) => {
            def.interfaces.extend(ext.implements_interfaces.iter().cloned());
            def.fields.extend(ext.fields.iter().map(SchemaField::from_ast));
        }
        (SchemaType::Interface(def), TypeExtension::Interface(ext)) => {
            def.interfaces.extend(ext.implements_interfaces.iter().cloned());
            def.fields.extend(ext.fields.iter().map(SchemaField::from_ast));
        }
        (SchemaType::Union(def), TypeExtension::Union(ext)) => {
            def.members.extend(ext.types.iter().cloned());
        }
        (SchemaType::Enum(def), TypeExtension::Enum(ext)) => {
            def.values.extend(ext.values.iter().map(|v| v.name.clone()));
        }
        (SchemaType::InputObject(def), TypeExtension::InputObject(ext)) => {
            def.fields.extend(ext.fields.iter().map(SchemaArgument::from_ast));
        }
        // scalar extensions only carry directives
        (SchemaType::Scalar(_), TypeExtension::Scalar(_)) => {}
        (ty, _) => {
            return Err(Error::InvalidExtension {
                type_name: name.clone(),
                reason: format!("{} cannot be extended by this extension kind", ty.kind()),
            });
        }
    }
    Ok(())
}
