//! fetcher builder generation
//!
//! for every object, interface, or union this emits an immutable builder
//! interface whose first type parameter `T` is the accumulated selection.
//! each field gets a select accessor (property or method) that returns a
//! builder over `T & {field}`, and an unselect accessor `"~field"` that
//! returns a builder over `Omit<T, 'field'>`. association methods take a child
//! builder and embed its selection `X` as the field's value type. polymorphic
//! types additionally get `on`, which narrows by `__typename`.

use crate::context::GeneratorContext;
use crate::error::{Error, Result};
use crate::fetchable::{FetchableField, FetchableType};
use crate::schema::SchemaField;
use crate::writer::{Artifact, ArtifactDir, ArtifactLocation, CodeWriter, ScopeType};

const RUNTIME_IMPORT: &str =
    "import { ObjectFetcher, createFetcher, createFetchableType } from 'graphql-ts-client-api'";

const COMMON_TYPES_IMPORT: &str =
    "import type { WithTypeName, ImplementationType } from '../CommonTypes'";

const IMMUTABLE_COMMENT: &str = "/*
 * Any instance of this interface is immutable,
 * all the properties and functions can only be used to create new instances,
 * they cannot modify the current instance.
 *
 * So any instance of this interface is reusable.
 */
";

/// builder artifact for one fetchable type
pub struct FetcherWriter<'c, 'a> {
    ctx: &'c GeneratorContext<'a>,
    ty: &'c FetchableType,
    fields: Vec<(&'c FetchableField, &'a SchemaField)>,
}

impl<'c, 'a> FetcherWriter<'c, 'a> {
    pub fn new(ctx: &'c GeneratorContext<'a>, type_name: &str) -> Result<Self> {
        let ty: &'c FetchableType = ctx.fetchable_type(type_name)?;
        let schema_fields = ctx.schema_fields(type_name);

        let mut fields = Vec::new();
        for field in ty.fields().values() {
            if ctx.config().is_excluded(type_name, field.name()) {
                continue;
            }
            let schema_field = schema_fields
                .iter()
                .copied()
                .find(|candidate| candidate.name == field.name())
                .ok_or_else(|| {
                    Error::invalid_type(
                        type_name,
                        format!("inherited field `{}` is not redeclared", field.name()),
                    )
                })?;
            fields.push((field, schema_field));
        }

        Ok(Self { ctx, ty, fields })
    }

    fn name(&self) -> &str {
        self.ty.name()
    }

    fn fetcher_name(&self) -> String {
        self.ctx.fetcher_type_name(self.name())
    }

    fn args_name(&self) -> String {
        format!("{}Args", self.name())
    }

    /// fields selected by the default builder constant
    fn default_field_names(&self) -> Vec<&'c str> {
        self.fields
            .iter()
            .map(|(field, _)| *field)
            .filter(|field| !field.is_function())
            .filter(|field| {
                !self
                    .ctx
                    .config()
                    .is_default_excluded(self.name(), field.name())
            })
            .map(FetchableField::name)
            .collect()
    }

    fn fields_with_args(&self) -> Vec<&'a SchemaField> {
        self.fields
            .iter()
            .map(|(_, schema_field)| *schema_field)
            .filter(|schema_field| !schema_field.arguments.is_empty())
            .collect()
    }

    /// type names exported by this artifact
    pub(crate) fn exported_types(&self) -> Vec<String> {
        let mut names = vec![self.fetcher_name()];
        if !self.fields_with_args().is_empty() {
            names.push(self.args_name());
        }
        names
    }

    /// value names exported by this artifact
    pub(crate) fn exported_values(&self) -> Vec<String> {
        let instance = self.ctx.instance_name(self.name());
        let mut names = vec![instance.clone()];
        if !self.default_field_names().is_empty() {
            names.push(format!("{instance}$"));
        }
        names
    }

    fn is_polymorphic(&self) -> bool {
        self.ctx.inheritance().is_polymorphic(self.name())
    }

    fn write_on(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        let name = self.name();
        w.text("\n");
        w.text(&format!(
            "on<XName extends ImplementationType<'{name}'>, X extends object, XVariables extends object>"
        ));
        w.scope(ScopeType::Parameters, true, |w| {
            w.separator(None);
            w.text("child: ObjectFetcher<XName, X, XVariables>");
            w.separator(None);
            w.text("fragmentName?: string");
            Ok(())
        })?;
        w.text(&format!(": {}", self.fetcher_name()));
        w.scope(ScopeType::Generic, true, |w| {
            w.text(&format!(
                "XName extends '{name}' ?\nT & X :\nWithTypeName<T, ImplementationType<'{name}'>> & "
            ));
            w.scope(ScopeType::Parameters, true, |w| {
                w.text("WithTypeName<X, ImplementationType<XName>>");
                w.separator(Some(" | "));
                w.text(&format!(
                    "{{__typename: Exclude<ImplementationType<'{name}'>, ImplementationType<XName>>}}"
                ));
                Ok(())
            })?;
            w.separator(None);
            w.text("TVariables & XVariables");
            Ok(())
        })?;
        w.text(";\n");
        Ok(())
    }

    fn write_typename(&self, w: &mut CodeWriter<'_>) {
        let typename = if self.is_polymorphic() {
            format!("ImplementationType<'{}'>", self.name())
        } else {
            format!("'{}'", self.name())
        };
        w.text("\n");
        w.text(&format!(
            "readonly __typename: {}<T & {{__typename: {typename}}}, TVariables>;\n",
            self.fetcher_name()
        ));
    }

    fn write_field(
        &self,
        w: &mut CodeWriter<'_>,
        field: &FetchableField,
        schema_field: &SchemaField,
    ) -> Result<()> {
        let fetcher = self.fetcher_name();
        let name = field.name();
        w.text("\n");

        if field.is_function() {
            let overloads: &[bool] = if schema_field.arguments.is_empty() {
                &[false]
            } else if schema_field.arguments.iter().all(|arg| arg.ty.is_nullable()) {
                &[false, true]
            } else {
                &[true]
            };
            for &with_args in overloads {
                self.write_method(w, field, schema_field, with_args)?;
            }
        } else {
            w.text(&format!("readonly {name}: {fetcher}<T & "));
            self.write_value_object(w, field, schema_field)?;
            w.text(", TVariables>;\n");
        }

        w.text(&format!(
            "readonly \"~{name}\": {fetcher}<Omit<T, '{name}'>, TVariables>;\n"
        ));
        Ok(())
    }

    fn write_method(
        &self,
        w: &mut CodeWriter<'_>,
        field: &FetchableField,
        schema_field: &SchemaField,
        with_args: bool,
    ) -> Result<()> {
        let association = field.is_association();
        let mut generics = Vec::new();
        if with_args {
            generics.push(format!(
                "XArgs extends {}['{}']",
                self.args_name(),
                field.name()
            ));
        }
        if association {
            generics.push("X extends object".to_string());
            generics.push("XVariables extends object".to_string());
        }

        w.text(field.name());
        if !generics.is_empty() {
            w.scope(ScopeType::Generic, false, |w| {
                for generic in &generics {
                    w.separator(None);
                    w.text(generic);
                }
                Ok(())
            })?;
        }

        let parameter_count = usize::from(with_args) + usize::from(association);
        w.scope(ScopeType::Parameters, parameter_count > 1, |w| {
            if with_args {
                w.separator(None);
                w.text("args: XArgs");
            }
            if association {
                w.separator(None);
                w.text("child: ");
                self.write_child_fetcher(w, field)?;
            }
            Ok(())
        })?;

        w.text(&format!(": {}<T & ", self.fetcher_name()));
        self.write_value_object(w, field, schema_field)?;
        w.text(if association {
            ", TVariables & XVariables>;\n"
        } else {
            ", TVariables>;\n"
        });
        Ok(())
    }

    fn write_child_fetcher(&self, w: &mut CodeWriter<'_>, field: &FetchableField) -> Result<()> {
        let associated = self.ctx.associated_type_names(field);
        w.text("ObjectFetcher");
        w.scope(ScopeType::Generic, false, |w| {
            w.separator(None);
            w.scope(ScopeType::Blank, false, |w| {
                for type_name in &associated {
                    w.separator(Some(" | "));
                    w.str_literal(type_name);
                }
                Ok(())
            })?;
            w.separator(None);
            w.text("X");
            w.separator(None);
            w.text("XVariables");
            Ok(())
        })
    }

    /// `{readonly "name"?: type}`, with `X` standing in for associations
    fn write_value_object(
        &self,
        w: &mut CodeWriter<'_>,
        field: &FetchableField,
        schema_field: &SchemaField,
    ) -> Result<()> {
        w.text("{");
        w.text(w.readonly_prefix());
        w.text(&format!("\"{}\"", field.name()));
        if schema_field.ty.is_nullable() {
            w.text("?");
        }
        w.text(": ");
        let render = field.is_association().then_some("X");
        w.type_ref(&schema_field.ty, render)?;
        w.text("}");
        Ok(())
    }

    fn write_instances(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        let instance = self.ctx.instance_name(self.name());
        w.text("\n");
        w.text(&format!(
            "export const {instance}: {}<{{}}, {{}}> =",
            self.fetcher_name()
        ));
        w.scope(ScopeType::Blank, true, |w| {
            w.text("createFetcher");
            w.scope(ScopeType::Parameters, true, |w| {
                w.separator(None);
                w.text("createFetchableType");
                w.scope(ScopeType::Parameters, true, |w| {
                    w.separator(None);
                    w.text(&format!("\"{}\"", self.name()));
                    w.separator(None);
                    w.text(&format!("\"{}\"", self.ty.category().as_str()));
                    w.separator(None);
                    w.scope(ScopeType::Array, false, |w| {
                        for super_type in self.ty.super_types() {
                            w.separator(None);
                            w.text(&format!(
                                "{}.fetchableType",
                                self.ctx.instance_name(super_type.name())
                            ));
                        }
                        Ok(())
                    })?;
                    w.separator(None);
                    let declared: Vec<&FetchableField> = self
                        .ty
                        .declared_fields()
                        .values()
                        .filter(|field| !self.ctx.config().is_excluded(self.name(), field.name()))
                        .collect();
                    w.scope(ScopeType::Array, !declared.is_empty(), |w| {
                        for field in declared {
                            w.separator(None);
                            write_field_descriptor(w, field);
                        }
                        Ok(())
                    })
                })
            })
        })?;
        w.text(";\n");

        let defaults = self.default_field_names();
        if !defaults.is_empty() {
            w.text("\n");
            w.text(&format!("export const {instance}$ = {instance}"));
            for name in defaults {
                w.text(&format!(".{name}"));
            }
            w.text(";\n");
        }
        Ok(())
    }

    fn write_args_interface(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        let with_args = self.fields_with_args();
        if with_args.is_empty() {
            return Ok(());
        }

        w.text("\n");
        w.text(&format!("export interface {} ", self.args_name()));
        w.scope(ScopeType::Block, true, |w| {
            for schema_field in with_args {
                w.separator(Some(","));
                w.text(&format!("{}{}: ", w.readonly_prefix(), schema_field.name));
                w.scope(ScopeType::Block, true, |w| {
                    for arg in &schema_field.arguments {
                        w.separator(Some(","));
                        w.property_decl(&arg.name, &arg.ty, None)?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        w.text("\n");
        Ok(())
    }
}

fn write_field_descriptor(w: &mut CodeWriter<'_>, field: &FetchableField) {
    if field.is_shorthand() {
        w.text(&format!("\"{}\"", field.name()));
        return;
    }

    w.enter(ScopeType::Block, true);
    w.separator(Some(","));
    w.text(&format!("category: \"{}\"", field.category().as_str()));
    w.separator(Some(","));
    w.text(&format!("name: \"{}\"", field.name()));
    if !field.argument_types().is_empty() {
        w.separator(Some(","));
        w.text("argGraphQLTypeMap: ");
        w.enter(ScopeType::Block, false);
        for (arg, wire_type) in field.argument_types() {
            w.separator(Some(", "));
            w.text(&format!("{arg}: '{wire_type}'"));
        }
        w.leave();
    }
    if let Some(connection) = field.connection_type_name() {
        w.separator(Some(","));
        w.text(&format!("connectionTypeName: \"{connection}\""));
    }
    if let Some(edge) = field.edge_type_name() {
        w.separator(Some(","));
        w.text(&format!("edgeTypeName: \"{edge}\""));
    }
    if let Some(target) = field.target_type_name() {
        w.separator(Some(","));
        w.text(&format!("targetTypeName: \"{target}\""));
    }
    if field.is_undefinable() {
        w.separator(Some(","));
        w.text("undefinable: true");
    }
    w.leave();
}

impl Artifact for FetcherWriter<'_, '_> {
    fn location(&self) -> ArtifactLocation {
        ArtifactLocation::new(ArtifactDir::Fetchers, self.fetcher_name()).defining(self.name())
    }

    fn prepare_imports(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        w.import_statement(RUNTIME_IMPORT)?;
        if self.is_polymorphic() {
            w.import_statement(COMMON_TYPES_IMPORT)?;
        }
        for super_type in self.ty.super_types() {
            w.import_statement(&format!(
                "import {{ {} }} from './{}'",
                self.ctx.instance_name(super_type.name()),
                self.ctx.fetcher_type_name(super_type.name())
            ))?;
        }
        for (_, schema_field) in &self.fields {
            w.import_field_types(schema_field)?;
        }
        Ok(())
    }

    fn write_code(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        let name = self.name();
        let fetcher = self.fetcher_name();
        w.text(IMMUTABLE_COMMENT);
        w.text(&format!(
            "export interface {fetcher}<T extends object, TVariables extends object> \
             extends ObjectFetcher<'{name}', T, TVariables> "
        ));
        w.scope(ScopeType::Block, true, |w| {
            if self.is_polymorphic() {
                self.write_on(w)?;
            }
            self.write_typename(w);
            for (field, schema_field) in &self.fields {
                self.write_field(w, field, schema_field)?;
            }
            Ok(())
        })?;
        w.text("\n");
        self.write_instances(w)?;
        self.write_args_interface(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::schema::Schema;

    const SDL: &str = r#"
        interface Node { id: ID! }

        type Department implements Node {
            id: ID!
            name: String!
            employees(first: Int, after: String): EmployeeConnection!
        }

        enum Gender { MALE FEMALE }

        type Employee implements Node {
            id: ID!
            firstName: String!
            gender: Gender!
            salary: Float
            department: Department
            avatar(size: Int!): String!
            subordinates(gender: Gender, first: Int): [Employee!]!
        }

        type EmployeeConnection {
            edges: [EmployeeEdge!]!
            pageInfo: PageInfo!
        }

        type EmployeeEdge {
            node: Employee!
            cursor: String!
        }

        type PageInfo { hasNextPage: Boolean! endCursor: String }

        union SearchResult = Department | Employee

        type Query {
            node(id: ID!): Node
            search(text: String!): [SearchResult!]!
        }
    "#;

    fn render(type_name: &str, config: &GeneratorConfig) -> String {
        let schema = Schema::parse(SDL).unwrap();
        let ctx = GeneratorContext::new(&schema, config).unwrap();
        let writer = FetcherWriter::new(&ctx, type_name).unwrap();
        CodeWriter::render(&writer, &schema, config).unwrap()
    }

    #[test]
    fn test_simple_type_full_output() {
        let output = render("PageInfo", &GeneratorConfig::new());
        let expected = "\
import { ObjectFetcher, createFetcher, createFetchableType } from 'graphql-ts-client-api';

/*
 * Any instance of this interface is immutable,
 * all the properties and functions can only be used to create new instances,
 * they cannot modify the current instance.
 *
 * So any instance of this interface is reusable.
 */
export interface PageInfoFetcher<T extends object, TVariables extends object> extends ObjectFetcher<'PageInfo', T, TVariables> {

\treadonly __typename: PageInfoFetcher<T & {__typename: 'PageInfo'}, TVariables>;

\treadonly hasNextPage: PageInfoFetcher<T & {readonly \"hasNextPage\": boolean}, TVariables>;
\treadonly \"~hasNextPage\": PageInfoFetcher<Omit<T, 'hasNextPage'>, TVariables>;

\treadonly endCursor: PageInfoFetcher<T & {readonly \"endCursor\"?: string}, TVariables>;
\treadonly \"~endCursor\": PageInfoFetcher<Omit<T, 'endCursor'>, TVariables>;
}

export const pageInfo$: PageInfoFetcher<{}, {}> =
\tcreateFetcher(
\t\tcreateFetchableType(
\t\t\t\"PageInfo\",
\t\t\t\"OBJECT\",
\t\t\t[],
\t\t\t[
\t\t\t\t\"hasNextPage\",
\t\t\t\t{
\t\t\t\t\tcategory: \"SCALAR\",
\t\t\t\t\tname: \"endCursor\",
\t\t\t\t\tundefinable: true
\t\t\t\t}
\t\t\t]
\t\t)
\t)
;

export const pageInfo$$ = pageInfo$.hasNextPage.endCursor;
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_bare_accessor_is_single_line() {
        let output = render("Employee", &GeneratorConfig::new());
        assert!(output.contains(
            "\treadonly firstName: EmployeeFetcher<T & {readonly \"firstName\": string}, TVariables>;\n"
        ));
        assert!(output.contains(
            "\treadonly \"~firstName\": EmployeeFetcher<Omit<T, 'firstName'>, TVariables>;\n"
        ));
    }

    #[test]
    fn test_args_and_child_force_multi_line() {
        let output = render("Employee", &GeneratorConfig::new());
        assert!(output.contains(
            "\tsubordinates<XArgs extends EmployeeArgs['subordinates'], X extends object, XVariables extends object>(\n\
             \t\targs: XArgs,\n\
             \t\tchild: ObjectFetcher<'Employee', X, XVariables>\n\
             \t): EmployeeFetcher<T & {readonly \"subordinates\": ReadonlyArray<X>}, TVariables & XVariables>;\n"
        ));
        // all arguments optional: an overload without args comes first
        assert!(output.contains(
            "\tsubordinates<X extends object, XVariables extends object>(child: ObjectFetcher<'Employee', X, XVariables>): \
             EmployeeFetcher<T & {readonly \"subordinates\": ReadonlyArray<X>}, TVariables & XVariables>;\n"
        ));
    }

    #[test]
    fn test_required_args_without_association() {
        let output = render("Employee", &GeneratorConfig::new());
        assert!(output.contains(
            "\tavatar<XArgs extends EmployeeArgs['avatar']>(args: XArgs): \
             EmployeeFetcher<T & {readonly \"avatar\": string}, TVariables>;\n"
        ));
        assert!(!output.contains("\tavatar(): "));
        assert!(output.contains(
            "export interface EmployeeArgs {\n\
             \treadonly avatar: {\n\
             \t\treadonly size: number\n\
             \t},\n\
             \treadonly subordinates: {\n\
             \t\treadonly gender?: Gender,\n\
             \t\treadonly first?: number\n\
             \t}\n\
             }\n"
        ));
        assert!(output.contains("import type { Gender } from '../enums';\n"));
    }

    #[test]
    fn test_reference_association() {
        let output = render("Employee", &GeneratorConfig::new());
        assert!(output.contains(
            "\tdepartment<X extends object, XVariables extends object>(child: ObjectFetcher<'Department', X, XVariables>): \
             EmployeeFetcher<T & {readonly \"department\"?: X}, TVariables & XVariables>;\n"
        ));
    }

    #[test]
    fn test_inherited_fields_and_super_types() {
        let output = render("Employee", &GeneratorConfig::new());
        assert!(output.contains("import { node$ } from './NodeFetcher';\n"));
        assert!(output.contains("import { searchResult$ } from './SearchResultFetcher';\n"));
        assert!(output.contains("\t\t\t[node$.fetchableType, searchResult$.fetchableType],\n"));
        // id is inherited: selectable, but not re-declared
        assert!(output.contains("\treadonly id: EmployeeFetcher<T & {readonly \"id\": string}, TVariables>;\n"));
        assert!(!output.contains("category: \"ID\""));
        assert!(output.contains(
            "export const employee$$ = employee$.firstName.gender.salary.id;\n"
        ));
        assert!(!output.contains("\ton<"));
        assert!(output.contains("__typename: 'Employee'"));
    }

    #[test]
    fn test_polymorphic_type_gets_downcast() {
        let output = render("Node", &GeneratorConfig::new());
        assert!(output.contains(COMMON_TYPES_IMPORT));
        assert!(output.contains(
            "\ton<XName extends ImplementationType<'Node'>, X extends object, XVariables extends object>(\n\
             \t\tchild: ObjectFetcher<XName, X, XVariables>,\n\
             \t\tfragmentName?: string\n\
             \t): NodeFetcher<\n\
             \t\tXName extends 'Node' ?\n\
             \t\tT & X :\n\
             \t\tWithTypeName<T, ImplementationType<'Node'>> & (\n\
             \t\t\tWithTypeName<X, ImplementationType<XName>> |\n\
             \t\t\t{__typename: Exclude<ImplementationType<'Node'>, ImplementationType<XName>>}\n\
             \t\t),\n\
             \t\tTVariables & XVariables\n\
             \t>;\n"
        ));
        assert!(output.contains("__typename: ImplementationType<'Node'>"));
        assert!(output.contains("{\n\t\t\t\t\tcategory: \"ID\",\n\t\t\t\t\tname: \"id\"\n\t\t\t\t}"));
    }

    #[test]
    fn test_union_exposes_fields_shared_by_members() {
        let output = render("SearchResult", &GeneratorConfig::new());
        assert!(output.contains("\ton<XName extends ImplementationType<'SearchResult'>"));
        assert!(output.contains(
            "\treadonly id: SearchResultFetcher<T & {readonly \"id\": string}, TVariables>;\n"
        ));
        assert!(output.contains("\treadonly \"~id\": "));
        // `name` only exists on Department
        assert!(!output.contains("readonly name"));
        assert!(output.contains("export const searchResult$$ = searchResult$.id;\n"));
        assert!(output.contains("\t\t\t[],\n\t\t\t[\n\t\t\t\t{\n\t\t\t\t\tcategory: \"ID\""));
    }

    #[test]
    fn test_union_without_shared_fields() {
        let schema = Schema::parse(
            "type A { a: Int } type B { b: Int! } union AB = A | B type Query { ab: AB }",
        )
        .unwrap();
        let config = GeneratorConfig::new();
        let ctx = GeneratorContext::new(&schema, &config).unwrap();
        let output =
            CodeWriter::render(&FetcherWriter::new(&ctx, "AB").unwrap(), &schema, &config).unwrap();
        assert!(!output.contains("~"));
        assert!(!output.contains("aB$$"));
        assert!(output.contains("\t\t\t[],\n\t\t\t[]\n"));
    }

    #[test]
    fn test_narrowed_redeclaration_types_the_child() {
        let schema = Schema::parse(
            r#"
            interface Node { id: ID! friend: Node name: String }
            type Department implements Node { id: ID! friend: Node name: String }
            type Employee implements Node { id: ID! friend: Employee name: String! }
            type Query { node: Node }
            "#,
        )
        .unwrap();
        let config = GeneratorConfig::new();
        let ctx = GeneratorContext::new(&schema, &config).unwrap();
        let output = CodeWriter::render(
            &FetcherWriter::new(&ctx, "Employee").unwrap(),
            &schema,
            &config,
        )
        .unwrap();
        assert!(output.contains(
            "\tfriend<X extends object, XVariables extends object>(child: ObjectFetcher<'Employee', X, XVariables>): \
             EmployeeFetcher<T & {readonly \"friend\"?: X}, TVariables & XVariables>;\n"
        ));
        assert!(output.contains("targetTypeName: \"Employee\""));
        assert!(output.contains("{readonly \"name\": string}"));
        assert!(output.contains("\t\t\t\t\"name\"\n"));

        let department = CodeWriter::render(
            &FetcherWriter::new(&ctx, "Department").unwrap(),
            &schema,
            &config,
        )
        .unwrap();
        assert!(department.contains("\t\t\t[node$.fetchableType],\n\t\t\t[]\n"));
    }

    #[test]
    fn test_polymorphic_association_target() {
        let output = render("Query", &GeneratorConfig::new());
        assert!(output.contains(
            "child: ObjectFetcher<'Node' | 'Department' | 'Employee', X, XVariables>"
        ));
        assert!(output.contains(
            "child: ObjectFetcher<'SearchResult' | 'Department' | 'Employee', X, XVariables>"
        ));
        assert!(output.contains("argGraphQLTypeMap: {id: 'ID!'}"));
        assert!(!output.contains("query$$"));
    }

    #[test]
    fn test_connection_field() {
        let output = render("Department", &GeneratorConfig::new());
        assert!(output.contains("child: ObjectFetcher<'EmployeeConnection', X, XVariables>"));
        assert!(output.contains("{readonly \"employees\": X}"));
        assert!(output.contains(
            "\t\t\t\t{\n\
             \t\t\t\t\tcategory: \"CONNECTION\",\n\
             \t\t\t\t\tname: \"employees\",\n\
             \t\t\t\t\targGraphQLTypeMap: {first: 'Int', after: 'String'},\n\
             \t\t\t\t\tconnectionTypeName: \"EmployeeConnection\",\n\
             \t\t\t\t\tedgeTypeName: \"EmployeeEdge\",\n\
             \t\t\t\t\ttargetTypeName: \"Employee\"\n\
             \t\t\t\t}"
        ));

        let output = render("EmployeeConnection", &GeneratorConfig::new());
        assert!(output.contains("\t\t\t\"CONNECTION\",\n"));
        let output = render("EmployeeEdge", &GeneratorConfig::new());
        assert!(output.contains("\t\t\t\"EDGE\",\n"));
        assert!(output.contains("export const employeeEdge$$ = employeeEdge$.cursor;\n"));
    }

    #[test]
    fn test_config_surface() {
        let config = GeneratorConfig::new()
            .with_indent("  ")
            .with_object_editable(true)
            .with_fetcher_suffix("Selection")
            .with_excluded_property("Employee", "salary")
            .with_default_fetcher_excluded("Employee", "gender");
        let output = render("Employee", &config);
        assert!(output.contains("export interface EmployeeSelection<T extends object"));
        assert!(output.contains(
            "  readonly firstName: EmployeeSelection<T & {\"firstName\": string}, TVariables>;\n"
        ));
        assert!(!output.contains("salary"));
        assert!(output.contains("export const employee$$ = employee$.firstName.id;\n"));
        assert!(output.contains("  avatar: {\n    size: number\n  }"));
    }

    #[test]
    fn test_unknown_type_fails() {
        let schema = Schema::parse(SDL).unwrap();
        let config = GeneratorConfig::new();
        let ctx = GeneratorContext::new(&schema, &config).unwrap();
        assert!(matches!(
            FetcherWriter::new(&ctx, "Gender"),
            Err(Error::UnknownType { .. })
        ));
    }
}
