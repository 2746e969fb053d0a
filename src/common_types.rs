//! shared type helpers
//!
//! `CommonTypes.ts` carries the pieces every polymorphic builder depends on:
//! `WithTypeName`, the recursive `ImplementationType` mapping derived from the
//! reduced downcast map, and runtime `upcastTypes`/`downcastTypes` lookups.

use crate::error::Result;
use crate::inheritance::{InheritanceInfo, TypeMap};
use crate::writer::{Artifact, ArtifactDir, ArtifactLocation, CodeWriter, ScopeType};

pub struct CommonTypesWriter<'c> {
    inheritance: &'c InheritanceInfo,
}

impl<'c> CommonTypesWriter<'c> {
    pub fn new(inheritance: &'c InheritanceInfo) -> Self {
        Self { inheritance }
    }

    fn write_with_type_name(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        w.text("export type WithTypeName<T, TypeName extends string> =");
        w.scope(ScopeType::Blank, true, |w| {
            w.text("T extends {readonly __typename: string} ?\nT :\nT & {readonly __typename: TypeName}");
            Ok(())
        })?;
        w.text(";\n");
        Ok(())
    }

    fn write_implementation_type(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        w.text("export type ImplementationType<T> =");
        w.scope(ScopeType::Blank, true, |w| {
            for (ty, cast_types) in self.inheritance.downcast_map() {
                w.text(&format!("T extends '{ty}' ? "));
                w.scope(ScopeType::Parameters, true, |w| {
                    w.str_literal(ty);
                    for cast_type in cast_types {
                        w.separator(Some(" | "));
                        w.text(&format!("ImplementationType<'{cast_type}'>"));
                    }
                    Ok(())
                })?;
                w.text(" :\n");
            }
            w.text("T");
            Ok(())
        })?;
        w.text(";\n");
        Ok(())
    }

    fn write_cast_function(
        &self,
        w: &mut CodeWriter<'_>,
        prefix: &str,
        map: &TypeMap,
    ) -> Result<()> {
        w.text(&format!(
            "export function {prefix}Types(typeName: string): string[] "
        ));
        w.scope(ScopeType::Block, true, |w| {
            w.text("const typeNames: string[] = [];\n");
            w.text(&format!("{prefix}Types0(typeName, typeNames);\n"));
            w.text("return typeNames;\n");
            Ok(())
        })?;
        w.text("\n\n");

        w.text(&format!(
            "function {prefix}Types0(typeName: string, output: string[]) "
        ));
        w.scope(ScopeType::Block, true, |w| {
            w.text("output.push(typeName);\n");
            w.text("switch (typeName) ");
            w.scope(ScopeType::Block, true, |w| {
                for (ty, cast_types) in map {
                    w.text(&format!("case '{ty}':\n"));
                    w.scope(ScopeType::Blank, false, |w| {
                        for cast_type in cast_types {
                            w.text(&format!("{prefix}Types0('{cast_type}', output);\n"));
                        }
                        w.text("break;\n");
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
            w.text("\n");
            Ok(())
        })?;
        w.text("\n");
        Ok(())
    }
}

impl Artifact for CommonTypesWriter<'_> {
    fn location(&self) -> ArtifactLocation {
        ArtifactLocation::new(ArtifactDir::Root, "CommonTypes")
    }

    fn write_code(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        self.write_with_type_name(w)?;
        w.text("\n");
        self.write_implementation_type(w)?;
        w.text("\n");
        self.write_cast_function(w, "upcast", self.inheritance.upcast_map())?;
        w.text("\n");
        self.write_cast_function(w, "downcast", self.inheritance.downcast_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::schema::Schema;

    fn render(sdl: &str) -> String {
        let schema = Schema::parse(sdl).unwrap();
        let config = GeneratorConfig::new();
        let info = InheritanceInfo::new(&schema);
        CodeWriter::render(&CommonTypesWriter::new(&info), &schema, &config).unwrap()
    }

    #[test]
    fn test_implementation_type_is_recursive() {
        let output = render(
            r#"
            interface Entity { id: ID! }
            interface Node implements Entity { id: ID! }
            type Employee implements Node & Entity { id: ID! }
            "#,
        );
        assert!(output.contains(
            "export type ImplementationType<T> =\n\
             \tT extends 'Entity' ? (\n\
             \t\t'Entity' |\n\
             \t\tImplementationType<'Node'>\n\
             \t) :\n\
             \tT extends 'Node' ? (\n\
             \t\t'Node' |\n\
             \t\tImplementationType<'Employee'>\n\
             \t) :\n\
             \tT\n\
             ;\n"
        ));
    }

    #[test]
    fn test_cast_functions() {
        let output = render(
            r#"
            interface Node { id: ID! }
            type Employee implements Node { id: ID! }
            union SearchResult = Employee
            "#,
        );
        assert!(output.contains(
            "function upcastTypes0(typeName: string, output: string[]) {\n\
             \toutput.push(typeName);\n\
             \tswitch (typeName) {\n\
             \t\tcase 'Employee':\n\
             \t\t\tupcastTypes0('Node', output);\n\
             \t\t\tupcastTypes0('SearchResult', output);\n\
             \t\t\tbreak;\n\
             \t}\n\
             }\n"
        ));
        assert!(output.contains("export function downcastTypes(typeName: string): string[] {\n"));
        assert!(output.contains("\t\tcase 'Node':\n\t\t\tdowncastTypes0('Employee', output);\n"));
    }

    #[test]
    fn test_with_type_name_follows_indent() {
        let schema = Schema::parse("type Query { ok: Boolean }").unwrap();
        let config = GeneratorConfig::new().with_indent("  ");
        let info = InheritanceInfo::new(&schema);
        let output =
            CodeWriter::render(&CommonTypesWriter::new(&info), &schema, &config).unwrap();
        assert!(output.starts_with(
            "export type WithTypeName<T, TypeName extends string> =\n\
             \x20 T extends {readonly __typename: string} ?\n\
             \x20 T :\n\
             \x20 T & {readonly __typename: TypeName}\n\
             ;\n"
        ));
    }

    #[test]
    fn test_without_polymorphism() {
        let output = render("type Query { ok: Boolean }");
        assert!(output.contains("export type ImplementationType<T> =\n\tT\n;\n"));
        assert!(output.contains("\tswitch (typeName) {\n\t}\n"));
    }
}
