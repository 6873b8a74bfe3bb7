//! Template catalog for looking up card template records

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::CardLayout;

/// Errors that can occur while loading a template catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Duplicate template id
    #[error("duplicate template id: {id}")]
    Duplicate { id: String },

    /// Template id is empty
    #[error("template id must not be empty")]
    EmptyId,

    /// Error reading catalog file
    #[error("error reading template catalog {}: {message}", path.display())]
    FileReadError { path: PathBuf, message: String },

    /// Catalog content is not valid TOML
    #[error("failed to parse template catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A template record as defined by the product's template set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateRecord {
    /// Template id referenced by `Profile::template`
    pub id: String,
    /// Human readable name
    pub name: String,
    /// Card arrangement used when this template is selected
    #[serde(default)]
    pub layout: CardLayout,
    /// Full-card background image
    #[serde(default, alias = "fullImage")]
    pub full_image: Option<String>,
    /// Accent colour suggested by the template
    #[serde(default)]
    pub accent: Option<String>,
}

impl TemplateRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, layout: CardLayout) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layout,
            full_image: None,
            accent: None,
        }
    }

    pub fn with_full_image(mut self, url: impl Into<String>) -> Self {
        self.full_image = Some(url.into());
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Full image, ignoring blank values
    pub fn full_image(&self) -> Option<&str> {
        crate::profile::non_blank(&self.full_image)
    }
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default, rename = "template")]
    templates: Vec<TemplateRecord>,
}

/// Built-in template set
const DEFAULT_CATALOG: &str = r##"
[[template]]
id = "classic"
name = "Classic"
layout = "classic"
full_image = "/templates/classic/full.jpg"

[[template]]
id = "modern"
name = "Modern"
layout = "modern"
full_image = "/templates/modern/full.jpg"

[[template]]
id = "minimal"
name = "Minimal"
layout = "minimal"

[[template]]
id = "corporate"
name = "Corporate"
layout = "corporate"
full_image = "/templates/corporate/full.jpg"
accent = "#1e3a5f"

[[template]]
id = "creative"
name = "Creative"
layout = "creative"
full_image = "/templates/creative/full.jpg"

[[template]]
id = "elegant"
name = "Elegant"
layout = "elegant"
full_image = "/templates/elegant/full.jpg"
accent = "#b08d57"
"##;

/// Lookup table from template id to record
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, TemplateRecord>,
}

impl TemplateCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The template set shipped with the crate
    pub fn builtin() -> Self {
        Self::from_str(DEFAULT_CATALOG).expect("Built-in catalog should be valid TOML")
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::FileReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_str(&content)
    }

    /// Load a catalog from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;
        let mut catalog = Self::new();
        for record in parsed.templates {
            catalog.register(record)?;
        }
        Ok(catalog)
    }

    /// Register a template record
    pub fn register(&mut self, record: TemplateRecord) -> Result<(), CatalogError> {
        let id = record.id.trim().to_string();
        if id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if self.templates.contains_key(&id) {
            return Err(CatalogError::Duplicate { id });
        }
        self.templates.insert(id, record);
        Ok(())
    }

    /// Get a template by id
    pub fn get(&self, id: &str) -> Option<&TemplateRecord> {
        self.templates.get(id.trim())
    }

    /// Check if a template exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All template ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
