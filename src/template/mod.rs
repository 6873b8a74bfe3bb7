//! Card templates and background resolution
//!
//! A template is a named visual preset. The catalog maps template ids to
//! records, and the style resolver turns a profile plus the catalog into the
//! background that a layout paints.
//!
//! # Example
//!
//! ```rust
//! use card_studio::profile::{DesignMode, Profile};
//! use card_studio::template::{resolve_style, StyleSource, TemplateCatalog};
//!
//! let profile = Profile {
//!     design_mode: DesignMode::Manual,
//!     color: Some("#0f766e".to_string()),
//!     ..Profile::default()
//! };
//! let style = resolve_style(&profile, &TemplateCatalog::builtin());
//! assert_eq!(style.source, StyleSource::ManualColor);
//! ```

mod catalog;
mod style;

pub use catalog::{CatalogError, TemplateCatalog, TemplateRecord};
pub use style::{
    resolve_style, Background, BackgroundCss, LinearGradient, Overlay, StyleDescriptor,
    StyleSource, TextTone, DEFAULT_GRADIENT,
};
