//! generator configuration
//!
//! build a [`GeneratorConfig`] with the `with_*` helpers, or load one from a
//! json file, then hand it to [`crate::Generator::new`]. the generator never
//! mutates it.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// configuration shared by every emitter of a generation run
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// indentation unit written once per open scope
    pub(crate) indent: String,

    /// when false, generated property members are marked `readonly`
    pub(crate) object_editable: bool,

    /// when false, list values render as readonly arrays
    pub(crate) array_editable: bool,

    /// suffix appended to generated builder type names
    pub(crate) fetcher_suffix: String,

    /// per-type fields the builder generator skips entirely
    pub(crate) excluded_properties: BTreeMap<String, BTreeSet<String>>,

    /// per-type fields left out of the default builder constant
    pub(crate) default_fetcher_excluded: BTreeMap<String, BTreeSet<String>>,

    /// wire scalar name -> typescript type, consulted before the builtin table
    pub(crate) scalar_type_map: BTreeMap<String, String>,

    /// field name that gets the ID category
    pub(crate) id_field: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            object_editable: false,
            array_editable: false,
            fetcher_suffix: "Fetcher".to_string(),
            excluded_properties: BTreeMap::new(),
            default_fetcher_excluded: BTreeMap::new(),
            scalar_type_map: BTreeMap::new(),
            id_field: "id".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// create a configuration with default settings
    ///
    /// # example
    ///
    /// ```
    /// use fetchgen::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::new()
    ///     .with_indent("    ")
    ///     .with_fetcher_suffix("Selection");
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// parse a configuration from json (camelCase keys, all optional)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// set the indentation unit
    ///
    /// default: a single tab
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// allow consumers to mutate selected objects
    ///
    /// default: disabled (members are `readonly`)
    pub fn with_object_editable(mut self, editable: bool) -> Self {
        self.object_editable = editable;
        self
    }

    /// allow consumers to mutate selected arrays
    ///
    /// default: disabled
    pub fn with_array_editable(mut self, editable: bool) -> Self {
        self.array_editable = editable;
        self
    }

    /// set the builder type suffix
    ///
    /// default: `Fetcher`
    pub fn with_fetcher_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.fetcher_suffix = suffix.into();
        self
    }

    /// skip a field of a type in the generated builder
    pub fn with_excluded_property(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        self.excluded_properties
            .entry(type_name.into())
            .or_default()
            .insert(field_name.into());
        self
    }

    /// keep a field out of the default builder of a type
    pub fn with_default_fetcher_excluded(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        self.default_fetcher_excluded
            .entry(type_name.into())
            .or_default()
            .insert(field_name.into());
        self
    }

    /// map a wire scalar to a typescript type
    pub fn with_scalar_type(
        mut self,
        scalar: impl Into<String>,
        ts_type: impl Into<String>,
    ) -> Self {
        self.scalar_type_map.insert(scalar.into(), ts_type.into());
        self
    }

    /// set the name of the identity field
    ///
    /// default: `id`
    pub fn with_id_field(mut self, name: impl Into<String>) -> Self {
        self.id_field = name.into();
        self
    }

    /// the indentation unit
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// the builder type suffix
    pub fn fetcher_suffix(&self) -> &str {
        &self.fetcher_suffix
    }

    pub(crate) fn is_excluded(&self, type_name: &str, field_name: &str) -> bool {
        self.excluded_properties
            .get(type_name)
            .is_some_and(|fields| fields.contains(field_name))
    }

    pub(crate) fn is_default_excluded(&self, type_name: &str, field_name: &str) -> bool {
        self.default_fetcher_excluded
            .get(type_name)
            .is_some_and(|fields| fields.contains(field_name))
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.fetcher_suffix.is_empty() {
            return Err(Error::Config("fetcher suffix cannot be empty".to_string()));
        }

        if !self.indent.chars().all(char::is_whitespace) {
            return Err(Error::Config(format!(
                "indent must be whitespace only, got {:?}",
                self.indent
            )));
        }

        if self.id_field.is_empty() {
            return Err(Error::Config("id field name cannot be empty".to_string()));
        }

        if let Some((scalar, _)) = self
            .scalar_type_map
            .iter()
            .find(|(_, ts_type)| ts_type.trim().is_empty())
        {
            return Err(Error::Config(format!(
                "scalar type map entry for {scalar} has an empty target type"
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("indent", &self.indent)
            .field("object_editable", &self.object_editable)
            .field("array_editable", &self.array_editable)
            .field("fetcher_suffix", &self.fetcher_suffix)
            .field("excluded_properties", &self.excluded_properties.len())
            .field(
                "default_fetcher_excluded",
                &self.default_fetcher_excluded.len(),
            )
            .field("scalar_type_map", &self.scalar_type_map)
            .field("id_field", &self.id_field)
            .finish()
    }
}
