//! input object artifacts

use crate::error::Result;
use crate::schema::InputObjectDef;
use crate::writer::{Artifact, ArtifactDir, ArtifactLocation, CodeWriter, ScopeType};

/// `inputs/<Name>.ts`: an object type with one property per input field
pub struct InputWriter<'a> {
    def: &'a InputObjectDef,
}

impl<'a> InputWriter<'a> {
    pub fn new(def: &'a InputObjectDef) -> Self {
        Self { def }
    }
}

impl Artifact for InputWriter<'_> {
    fn location(&self) -> ArtifactLocation {
        ArtifactLocation::new(ArtifactDir::Inputs, &self.def.name).defining(&self.def.name)
    }

    fn prepare_imports(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        for field in &self.def.fields {
            w.import_type(&field.ty)?;
        }
        Ok(())
    }

    fn write_code(&self, w: &mut CodeWriter<'_>) -> Result<()> {
        w.text(&format!("export type {} = ", self.def.name));
        w.scope(ScopeType::Block, !self.def.fields.is_empty(), |w| {
            for field in &self.def.fields {
                w.separator(Some(","));
                w.property_decl(&field.name, &field.ty, None)?;
            }
            Ok(())
        })?;
        w.text(";\n");
        Ok(())
    }
}
