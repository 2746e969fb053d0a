//! generation driver
//!
//! [`Generator`] owns the per-run context and turns it into artifacts. every
//! artifact is rendered by its own [`CodeWriter`] and flushed before the next
//! one starts, so a failure never leaves a half-written file behind another.

use crate::common_types::CommonTypesWriter;
use crate::config::GeneratorConfig;
use crate::context::GeneratorContext;
use crate::enums::EnumWriter;
use crate::error::{Error, Result};
use crate::fetcher::FetcherWriter;
use crate::index::{IndexWriter, ModuleExports};
use crate::inputs::InputWriter;
use crate::schema::{Schema, SchemaType};
use crate::writer::{Artifact, ArtifactDir, CodeWriter};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// generates builder sources for one schema
pub struct Generator<'a> {
    ctx: GeneratorContext<'a>,
}

impl<'a> Generator<'a> {
    /// build the generation context; fails on invalid config or schema
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Result<Self> {
        Ok(Self {
            ctx: GeneratorContext::new(schema, config)?,
        })
    }

    pub fn context(&self) -> &GeneratorContext<'a> {
        &self.ctx
    }

    /// every artifact of the run, in write order
    pub fn artifacts(&self) -> Result<Vec<Box<dyn Artifact + '_>>> {
        let schema = self.ctx.schema();
        let mut artifacts: Vec<Box<dyn Artifact + '_>> = Vec::new();

        artifacts.push(Box::new(CommonTypesWriter::new(self.ctx.inheritance())));

        let mut fetcher_exports = Vec::new();
        for fetchable in self.ctx.fetchable_types() {
            let writer = FetcherWriter::new(&self.ctx, fetchable.name())?;
            fetcher_exports.push(
                ModuleExports::new(self.ctx.fetcher_type_name(fetchable.name()))
                    .with_types(writer.exported_types())
                    .with_values(writer.exported_values()),
            );
            artifacts.push(Box::new(writer));
        }
        artifacts.push(Box::new(IndexWriter::new(
            ArtifactDir::Fetchers,
            fetcher_exports,
        )));

        let mut enum_exports = Vec::new();
        for def in schema.enums() {
            enum_exports.push(ModuleExports::new(&def.name).with_types([def.name.clone()]));
            artifacts.push(Box::new(EnumWriter::new(def)));
        }

        let mut input_exports = Vec::new();
        for def in schema.input_objects() {
            input_exports.push(ModuleExports::new(&def.name).with_types([def.name.clone()]));
            artifacts.push(Box::new(InputWriter::new(def)));
        }

        let mut root_exports = vec![ModuleExports::new("CommonTypes")
            .with_types(["WithTypeName".to_string(), "ImplementationType".to_string()])
            .with_values(["upcastTypes".to_string(), "downcastTypes".to_string()])];
        root_exports.push(ModuleExports::new("fetchers").all());
        if !enum_exports.is_empty() {
            artifacts.push(Box::new(IndexWriter::new(ArtifactDir::Enums, enum_exports)));
            root_exports.push(ModuleExports::new("enums").all());
        }
        if !input_exports.is_empty() {
            artifacts.push(Box::new(IndexWriter::new(ArtifactDir::Inputs, input_exports)));
            root_exports.push(ModuleExports::new("inputs").all());
        }
        artifacts.push(Box::new(IndexWriter::new(ArtifactDir::Root, root_exports)));

        Ok(artifacts)
    }

    /// recreate the output tree under `out_dir` and write every artifact
    ///
    /// only the generated subdirectories are removed; other files in
    /// `out_dir` are left alone. returns the written paths.
    pub fn generate(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let artifacts = self.artifacts()?;

        for dir in [ArtifactDir::Fetchers, ArtifactDir::Enums, ArtifactDir::Inputs] {
            let Some(name) = dir.dir_name() else {
                continue;
            };
            let path = out_dir.join(name);
            if path.exists() {
                tracing::debug!("removing {}", path.display());
                fs::remove_dir_all(&path).map_err(|err| io_failure(&path, err))?;
            }
        }
        fs::create_dir_all(out_dir).map_err(|err| io_failure(out_dir, err))?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let path = out_dir.join(artifact.location().relative_path());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| io_failure(parent, err))?;
            }
            let file = File::create(&path).map_err(|err| io_failure(&path, err))?;
            let mut sink = BufWriter::new(file);
            CodeWriter::emit(artifact.as_ref(), self.ctx.schema(), self.ctx.config(), &mut sink)
                .map_err(|err| match err {
                    Error::Io(err) => io_failure(&path, err),
                    other => other,
                })?;
            tracing::info!("wrote {}", path.display());
            written.push(path);
        }

        tracing::debug!(
            "generated {} files into {}",
            written.len(),
            out_dir.display()
        );
        Ok(written)
    }

    /// render the builder artifact of one type
    pub fn render_fetcher(&self, type_name: &str) -> Result<String> {
        let writer = FetcherWriter::new(&self.ctx, type_name)?;
        self.render(&writer)
    }

    /// render `CommonTypes.ts`
    pub fn render_common_types(&self) -> Result<String> {
        self.render(&CommonTypesWriter::new(self.ctx.inheritance()))
    }

    /// render the artifact of one enum
    pub fn render_enum(&self, name: &str) -> Result<String> {
        match self.ctx.schema().get(name) {
            Some(SchemaType::Enum(def)) => self.render(&EnumWriter::new(def)),
            _ => Err(unknown(name, "enum rendering")),
        }
    }

    /// render the artifact of one input object
    pub fn render_input(&self, name: &str) -> Result<String> {
        match self.ctx.schema().get(name) {
            Some(SchemaType::InputObject(def)) => self.render(&InputWriter::new(def)),
            _ => Err(unknown(name, "input rendering")),
        }
    }

    fn render<A: Artifact + ?Sized>(&self, artifact: &A) -> Result<String> {
        CodeWriter::render(artifact, self.ctx.schema(), self.ctx.config())
    }
}

fn unknown(name: &str, context: &str) -> Error {
    Error::UnknownType {
        type_name: name.to_string(),
        context: context.to_string(),
    }
}

fn io_failure(path: &Path, err: std::io::Error) -> Error {
    tracing::error!("io failure at {}: {err}", path.display());
    Error::Io(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
        interface Node { id: ID! }
        enum Gender { MALE FEMALE }
        input EmployeeInput { name: String! gender: Gender }
        type Employee implements Node {
            id: ID!
            name: String!
            gender: Gender
        }
        type Query {
            node(id: ID!): Node
        }
        type Mutation {
            createEmployee(input: EmployeeInput!): Employee!
        }
    "#;

    #[test]
    fn test_artifact_paths() {
        let schema = Schema::parse(SDL).unwrap();
        let config = GeneratorConfig::new();
        let generator = Generator::new(&schema, &config).unwrap();
        let paths: Vec<String> = generator
            .artifacts()
            .unwrap()
            .iter()
            .map(|artifact| {
                artifact
                    .location()
                    .relative_path()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                "CommonTypes.ts",
                "fetchers/NodeFetcher.ts",
                "fetchers/EmployeeFetcher.ts",
                "fetchers/QueryFetcher.ts",
                "fetchers/MutationFetcher.ts",
                "fetchers/index.ts",
                "enums/Gender.ts",
                "inputs/EmployeeInput.ts",
                "enums/index.ts",
                "inputs/index.ts",
                "index.ts",
            ]
        );
    }

    #[test]
    fn test_render_helpers() {
        let schema = Schema::parse(SDL).unwrap();
        let config = GeneratorConfig::new();
        let generator = Generator::new(&schema, &config).unwrap();

        let fetcher = generator.render_fetcher("Mutation").unwrap();
        assert!(fetcher.contains("import type { EmployeeInput } from '../inputs';\n"));
        assert!(fetcher.contains("export interface MutationArgs {\n"));

        assert_eq!(
            generator.render_enum("Gender").unwrap(),
            "export type Gender = 'MALE' | 'FEMALE';\n"
        );
        assert!(generator
            .render_input("EmployeeInput")
            .unwrap()
            .contains("export type EmployeeInput = {\n"));
        assert!(generator
            .render_common_types()
            .unwrap()
            .contains("T extends 'Node' ? (\n"));

        assert!(matches!(
            generator.render_enum("Employee"),
            Err(Error::UnknownType { .. })
        ));
        assert!(matches!(
            generator.render_fetcher("Missing"),
            Err(Error::UnknownType { .. })
        ));
    }

    #[test]
    fn test_root_index() {
        let schema = Schema::parse("type Query { ok: Boolean }").unwrap();
        let config = GeneratorConfig::new();
        let generator = Generator::new(&schema, &config).unwrap();
        let artifacts = generator.artifacts().unwrap();
        let Some(root) = artifacts.last() else {
            panic!("no artifacts");
        };
        assert_eq!(
            CodeWriter::render(root.as_ref(), &schema, &config).unwrap(),
            "export type { WithTypeName, ImplementationType } from './CommonTypes';\n\
             export { upcastTypes, downcastTypes } from './CommonTypes';\n\
             export * from './fetchers';\n"
        );
    }
}
