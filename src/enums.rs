//! enum artifacts

use crate::error::Result;
use crate::schema::EnumDef;
use crate::writer::{Artifact, ArtifactDir, ArtifactLocation, CodeWriter, ScopeType};

/// `enums/<Name>.ts`: a string-literal union of the enum values
pub struct EnumWriter<'a> {
    def: &'a EnumDef,
}

impl<'a> EnumWriter<'a> {
    pub fn new(def: &'a EnumDef) -> Self {
        Self { def }
    }
}

impl Artifact for EnumWriter<'_> {
    fn location(&self) -> ArtifactLocation {
        ArtifactLocation::new(ArtifactDir::Enums, &self.def.name).defining(&self.def.name)
    }

    fn write_code(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        w.text(&format!("export type {} = ", self.def.name));
        if self.def.values.is_empty() {
            w.text("never");
        } else {
            w.scope(ScopeType::Blank, false, |w| {
                for value in &self.def.values {
                    w.separator(Some(" | "));
                    w.str_literal(value);
                }
                Ok(())
            })?;
        }
        w.text(";\n");
        Ok(())
    }
}
