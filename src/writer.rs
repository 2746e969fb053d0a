//! scoped text emission
//!
//! [`CodeWriter`] renders nested, indented typescript. it keeps a stack of
//! open scopes; only the innermost one is updated by writes. an artifact first
//! declares its imports, then the import phase is closed and the body is
//! written. declaring imports afterwards is an emitter bug and fails with
//! [`Error::ImportsFinalized`].

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::schema::{Schema, SchemaField, SchemaType, TypeRef};
use indexmap::{IndexMap, IndexSet};
use std::io::Write;
use std::path::PathBuf;

const SCALAR_MAP: [(&str, &str); 16] = [
    ("Boolean", "boolean"),
    ("Byte", "number"),
    ("Short", "number"),
    ("Int", "number"),
    ("Long", "number"),
    ("Float", "number"),
    ("Double", "number"),
    ("BigInteger", "number"),
    ("BigDecimal", "number"),
    ("String", "string"),
    ("Date", "string"),
    ("DateTime", "string"),
    ("LocalDate", "string"),
    ("LocalDateTime", "string"),
    ("ID", "string"),
    ("UUID", "string"),
];

fn builtin_scalar(name: &str) -> Option<&'static str> {
    SCALAR_MAP
        .iter()
        .find(|(scalar, _)| *scalar == name)
        .map(|(_, ts_type)| *ts_type)
}

/// kind of lexical region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeType {
    /// `{ ... }`
    Block,
    /// `( ... )`
    Parameters,
    /// `[ ... ]`
    Array,
    /// `< ... >`
    Generic,
    /// no delimiters, only separator bookkeeping
    Blank,
}

impl ScopeType {
    fn open(self) -> &'static str {
        match self {
            ScopeType::Block => "{",
            ScopeType::Parameters => "(",
            ScopeType::Array => "[",
            ScopeType::Generic => "<",
            ScopeType::Blank => "",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ScopeType::Block => "}",
            ScopeType::Parameters => ")",
            ScopeType::Array => "]",
            ScopeType::Generic => ">",
            ScopeType::Blank => "",
        }
    }

    fn default_separator(self) -> &'static str {
        match self {
            ScopeType::Parameters | ScopeType::Array | ScopeType::Generic => ",",
            ScopeType::Block | ScopeType::Blank => "",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    ty: ScopeType,
    multi_lines: bool,
    dirty: bool,
}

/// output directory of a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactDir {
    Root,
    Fetchers,
    Enums,
    Inputs,
}

impl ArtifactDir {
    pub fn dir_name(self) -> Option<&'static str> {
        match self {
            ArtifactDir::Root => None,
            ArtifactDir::Fetchers => Some("fetchers"),
            ArtifactDir::Enums => Some("enums"),
            ArtifactDir::Inputs => Some("inputs"),
        }
    }
}

/// where an artifact lands and which type it defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub dir: ArtifactDir,
    pub file_stem: String,
    pub self_type: Option<String>,
}

impl ArtifactLocation {
    pub fn new(dir: ArtifactDir, file_stem: impl Into<String>) -> Self {
        Self {
            dir,
            file_stem: file_stem.into(),
            self_type: None,
        }
    }

    pub fn defining(mut self, type_name: impl Into<String>) -> Self {
        self.self_type = Some(type_name.into());
        self
    }

    /// path relative to the output root
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(dir) = self.dir.dir_name() {
            path.push(dir);
        }
        path.push(format!("{}.ts", self.file_stem));
        path
    }
}

/// one generated source file
pub trait Artifact {
    fn location(&self) -> ArtifactLocation;

    /// declare imports; runs before the import phase is closed
    fn prepare_imports(&self, _writer: &mut CodeWriter<'_>) -> Result<()> {
        Ok(())
    }

    fn write_code(&self, writer: &mut CodeWriter<'_>) -> Result<()>;
}

/// single-owner, indentation-aware text writer for one artifact
pub struct CodeWriter<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
    location: ArtifactLocation,
    scopes: Vec<Scope>,
    need_indent: bool,
    body: String,
    import_statements: IndexSet<String>,
    imported_types: IndexSet<String>,
    imports_finalized: bool,
}

impl<'a> CodeWriter<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig, location: ArtifactLocation) -> Self {
        Self {
            schema,
            config,
            location,
            scopes: Vec::new(),
            need_indent: false,
            body: String::new(),
            import_statements: IndexSet::new(),
            imported_types: IndexSet::new(),
            imports_finalized: false,
        }
    }

    /// render an artifact into a sink and flush it
    pub fn emit<A, W>(
        artifact: &A,
        schema: &Schema,
        config: &GeneratorConfig,
        sink: &mut W,
    ) -> Result<()>
    where
        A: Artifact + ?Sized,
        W: Write,
    {
        let writer = Self::run(artifact, schema, config)?;
        writer.finish(sink)
    }

    /// render an artifact into a string
    pub fn render<A>(artifact: &A, schema: &Schema, config: &GeneratorConfig) -> Result<String>
    where
        A: Artifact + ?Sized,
    {
        Ok(Self::run(artifact, schema, config)?.into_text())
    }

    fn run<'s, A>(
        artifact: &A,
        schema: &'s Schema,
        config: &'s GeneratorConfig,
    ) -> Result<CodeWriter<'s>>
    where
        A: Artifact + ?Sized,
    {
        let mut writer = CodeWriter::new(schema, config, artifact.location());
        artifact.prepare_imports(&mut writer)?;
        writer.finalize_imports();
        artifact.write_code(&mut writer)?;
        Ok(writer)
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// add a verbatim import line
    pub fn import_statement(&mut self, statement: &str) -> Result<()> {
        if self.imports_finalized {
            return Err(Error::ImportsFinalized);
        }
        let mut statement = statement.trim_end().to_string();
        if !statement.ends_with(';') {
            statement.push(';');
        }
        self.import_statements.insert(statement);
        Ok(())
    }

    /// import the enum or input type behind a type reference, if any
    pub fn import_type(&mut self, ty: &TypeRef) -> Result<()> {
        if self.imports_finalized {
            return Err(Error::ImportsFinalized);
        }
        let name = ty.base_name();
        if matches!(
            self.schema.get(name),
            Some(SchemaType::Enum(_) | SchemaType::InputObject(_))
        ) && self.location.self_type.as_deref() != Some(name)
        {
            self.imported_types.insert(name.to_string());
        }
        Ok(())
    }

    /// import a field's type and every argument type
    pub fn import_field_types(&mut self, field: &SchemaField) -> Result<()> {
        self.import_type(&field.ty)?;
        for arg in &field.arguments {
            self.import_type(&arg.ty)?;
        }
        Ok(())
    }

    pub fn finalize_imports(&mut self) {
        self.imports_finalized = true;
    }

    /// open a scope, writing its opening token
    pub fn enter(&mut self, ty: ScopeType, multi_lines: bool) {
        self.text(ty.open());
        if multi_lines {
            self.text("\n");
        }
        self.scopes.push(Scope {
            ty,
            multi_lines,
            dirty: false,
        });
    }

    pub fn leave(&mut self) {
        self.leave_with("");
    }

    /// close the innermost scope, then write `suffix`
    pub fn leave_with(&mut self, suffix: &str) {
        let Some(scope) = self.scopes.pop() else {
            tracing::warn!("leave called without an open scope");
            return;
        };
        if scope.dirty {
            if let Some(parent) = self.scopes.last_mut() {
                parent.dirty = true;
            }
        }
        if scope.multi_lines && !self.need_indent {
            self.text("\n");
        }
        self.text(scope.ty.close());
        self.text(suffix);
    }

    /// run `action` inside a scope
    pub fn scope<F>(&mut self, ty: ScopeType, multi_lines: bool, action: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.enter(ty, multi_lines);
        let result = action(self);
        self.leave();
        result
    }

    /// write a separator if the current scope already has content
    pub fn separator(&mut self, value: Option<&str>) {
        let Some(scope) = self.scopes.last().copied() else {
            return;
        };
        if !scope.dirty {
            return;
        }
        let value = value.unwrap_or_else(|| scope.ty.default_separator());
        if scope.multi_lines {
            self.text(value.trim_end());
            self.text("\n");
        } else {
            self.text(value);
            if matches!(
                scope.ty,
                ScopeType::Parameters | ScopeType::Array | ScopeType::Generic
            ) && !value.ends_with(' ')
            {
                self.text(" ");
            }
        }
    }

    /// write text, indenting every line that starts after a line break
    pub fn text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.dirty = true;
        }
        for (index, line) in value.split('\n').enumerate() {
            if index != 0 {
                self.body.push('\n');
                self.need_indent = true;
            }
            if !line.is_empty() {
                if self.need_indent {
                    for _ in 0..self.scopes.len() {
                        self.body.push_str(&self.config.indent);
                    }
                    self.need_indent = false;
                }
                self.body.push_str(line);
            }
        }
    }

    /// single-quoted string literal
    pub fn str_literal(&mut self, value: &str) {
        self.text(&format!("'{value}'"));
    }

    /// `readonly ` unless objects are editable
    pub fn readonly_prefix(&self) -> &'static str {
        if self.config.object_editable {
            ""
        } else {
            "readonly "
        }
    }

    /// `[readonly ]name[?]: type`
    pub fn property_decl(
        &mut self,
        name: &str,
        ty: &TypeRef,
        object_render: Option<&str>,
    ) -> Result<()> {
        self.text(self.readonly_prefix());
        self.text(name);
        if ty.is_nullable() {
            self.text("?");
        }
        self.text(": ");
        self.type_ref(ty, object_render)
    }

    /// render a type reference
    ///
    /// scalars go through the configured map and then the builtin table;
    /// object-like types are replaced by `object_render` when given, and a
    /// union without an override is written as the alternation of its members.
    pub fn type_ref(&mut self, ty: &TypeRef, object_render: Option<&str>) -> Result<()> {
        match ty {
            TypeRef::NonNull(inner) => self.type_ref(inner, object_render),
            TypeRef::List(inner) => {
                self.text(if self.config.array_editable {
                    "Array"
                } else {
                    "ReadonlyArray"
                });
                self.enter(ScopeType::Generic, false);
                self.type_ref(inner, object_render)?;
                if inner.is_nullable() {
                    self.text(" | undefined");
                }
                self.leave();
                Ok(())
            }
            TypeRef::Named(name) => {
                let schema = self.schema;
                let config = self.config;
                match schema.get(name) {
                    Some(SchemaType::Scalar(_)) => {
                        let mapped = config
                            .scalar_type_map
                            .get(name)
                            .map(String::as_str)
                            .or_else(|| builtin_scalar(name))
                            .ok_or_else(|| Error::UnknownScalar(name.clone()))?;
                        self.text(mapped);
                    }
                    Some(SchemaType::Object(_) | SchemaType::Interface(_)) => {
                        self.text(object_render.unwrap_or(name));
                    }
                    Some(SchemaType::Union(def)) => match object_render {
                        Some(render) => self.text(render),
                        None => {
                            self.enter(ScopeType::Blank, false);
                            for member in &def.members {
                                self.separator(Some(" | "));
                                self.text(member);
                            }
                            self.leave();
                        }
                    },
                    Some(SchemaType::Enum(_) | SchemaType::InputObject(_)) => self.text(name),
                    None => {
                        return Err(Error::UnknownType {
                            type_name: name.clone(),
                            context: format!("{}", self.location.relative_path().display()),
                        })
                    }
                }
                Ok(())
            }
        }
    }

    fn render_imports(&self) -> String {
        let mut out = String::new();
        for statement in &self.import_statements {
            out.push_str(statement);
            out.push('\n');
        }

        let mut by_path: IndexMap<String, Vec<&str>> = IndexMap::new();
        for name in &self.imported_types {
            let Some(path) = self.import_path(name) else {
                continue;
            };
            by_path.entry(path).or_default().push(name);
        }
        for (path, names) in by_path {
            out.push_str(&format!(
                "import type {{ {} }} from '{}';\n",
                names.join(", "),
                path
            ));
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn import_path(&self, name: &str) -> Option<String> {
        let target = match self.schema.get(name)? {
            SchemaType::Enum(_) => ArtifactDir::Enums,
            SchemaType::InputObject(_) => ArtifactDir::Inputs,
            _ => return None,
        };
        let target_dir = target.dir_name()?;
        Some(if self.location.dir == target {
            format!("./{name}")
        } else if self.location.dir == ArtifactDir::Root {
            format!("./{target_dir}")
        } else {
            format!("../{target_dir}")
        })
    }

    /// imports followed by the body
    pub fn into_text(self) -> String {
        let mut out = self.render_imports();
        out.push_str(&self.body);
        out
    }

    /// write imports and body to the sink, then flush it
    pub fn finish<W: Write>(self, sink: &mut W) -> Result<()> {
        sink.write_all(self.render_imports().as_bytes())?;
        sink.write_all(self.body.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}
