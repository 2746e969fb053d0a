//! barrel files

use crate::error::Result;
use crate::writer::{Artifact, ArtifactDir, ArtifactLocation, CodeWriter};

/// one `export ... from './module'` group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleExports {
    pub module: String,
    pub types: Vec<String>,
    pub values: Vec<String>,
    pub star: bool,
}

impl ModuleExports {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = String>) -> Self {
        self.types.extend(types);
        self
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.values.extend(values);
        self
    }

    /// `export * from './module'`
    pub fn all(mut self) -> Self {
        self.star = true;
        self
    }
}

/// `index.ts` of an output directory
pub struct IndexWriter {
    dir: ArtifactDir,
    exports: Vec<ModuleExports>,
}

impl IndexWriter {
    pub fn new(dir: ArtifactDir, exports: Vec<ModuleExports>) -> Self {
        Self { dir, exports }
    }
}

fn write_names(w: &mut CodeWriter<'_>, keyword: &str, names: &[String], module: &str) {
    w.text(&format!(
        "{keyword} {{ {} }} from './{module}';\n",
        names.join(", ")
    ));
}

impl Artifact for IndexWriter {
    fn location(&self) -> ArtifactLocation {
        ArtifactLocation::new(self.dir, "index")
    }

    fn write_code(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        for export in &self.exports {
            if export.star {
                w.text(&format!("export * from './{}';\n", export.module));
            }
            if !export.types.is_empty() {
                write_names(w, "export type", &export.types, &export.module);
            }
            if !export.values.is_empty() {
                write_names(w, "export", &export.values, &export.module);
            }
        }
        Ok(())
    }
}
