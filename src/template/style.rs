//! Card background resolution
//!
//! A profile can carry several competing background sources at once (an
//! uploaded design, an AI background, a template, a manual colour). Exactly
//! one of them is rendered, chosen by a fixed priority order:
//!
//! 1. uploaded custom design
//! 2. AI background, when the design mode is `ai`
//! 3. template full image, when the design mode is `template`
//! 4. manual colour, when the design mode is `manual`
//! 5. the default gradient
//!
//! Resolution never fails. A missing field, an unknown template id or a
//! template without an image simply moves on to the next rule.

use tracing::debug;

use crate::profile::{DesignMode, Profile};

use super::TemplateCatalog;

/// Gradient used when nothing else applies
pub const DEFAULT_GRADIENT: LinearGradient = LinearGradient {
    angle: 135,
    from: "#667eea",
    to: "#764ba2",
};

/// Which rule produced a style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSource {
    CustomDesign,
    AiBackground,
    Template,
    ManualColor,
    Default,
}

/// A two-stop linear gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearGradient {
    /// CSS angle in degrees
    pub angle: u16,
    pub from: &'static str,
    pub to: &'static str,
}

impl LinearGradient {
    pub fn css(&self) -> String {
        format!(
            "linear-gradient({}deg, {} 0%, {} 100%)",
            self.angle, self.from, self.to
        )
    }
}

/// The painted card background
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Image(String),
    Solid(String),
    Gradient(LinearGradient),
}

/// CSS-shaped view of a background: an image, a colour, or both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundCss {
    pub image: Option<String>,
    pub color: Option<String>,
}

impl Background {
    pub fn css(&self) -> BackgroundCss {
        match self {
            Background::Image(url) => BackgroundCss {
                image: Some(format!("url({url})")),
                color: None,
            },
            Background::Solid(color) => BackgroundCss {
                image: None,
                color: Some(color.clone()),
            },
            Background::Gradient(gradient) => BackgroundCss {
                image: Some(gradient.css()),
                color: None,
            },
        }
    }

    /// Image URL when the background is an image
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Background::Image(url) => Some(url),
            _ => None,
        }
    }
}

/// Foreground tone drawn over the background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    pub fn fill(self) -> &'static str {
        match self {
            TextTone::Light => "#ffffff",
            TextTone::Dark => "#1a1a1a",
        }
    }

    pub fn muted_fill(self) -> &'static str {
        match self {
            TextTone::Light => "#e8e8f0",
            TextTone::Dark => "#555555",
        }
    }
}

/// Top-to-bottom darkening overlay that keeps text legible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub top_alpha: f64,
    pub bottom_alpha: f64,
}

impl Overlay {
    /// For arbitrary uploaded photos
    pub const MEDIUM: Overlay = Overlay::new(0.3, 0.6);
    /// For generated backgrounds
    pub const LIGHT: Overlay = Overlay::new(0.2, 0.5);
    /// For curated template art
    pub const MINIMAL: Overlay = Overlay::new(0.1, 0.3);
    /// For flat colours and gradients
    pub const FAINT: Overlay = Overlay::new(0.0, 0.15);

    pub const fn new(top_alpha: f64, bottom_alpha: f64) -> Self {
        Self {
            top_alpha,
            bottom_alpha,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "linear-gradient(to bottom, rgba(0, 0, 0, {}), rgba(0, 0, 0, {}))",
            self.top_alpha, self.bottom_alpha
        )
    }
}

/// Fully resolved presentation style for a card
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    pub background: Background,
    pub text_color: TextTone,
    pub overlay: Overlay,
    pub source: StyleSource,
}

impl StyleDescriptor {
    pub fn background_css(&self) -> BackgroundCss {
        self.background.css()
    }

    pub fn overlay_gradient(&self) -> String {
        self.overlay.css()
    }

    /// The style used when a profile declares no usable design
    pub fn default_gradient() -> Self {
        Self {
            background: Background::Gradient(DEFAULT_GRADIENT),
            text_color: TextTone::Light,
            overlay: Overlay::FAINT,
            source: StyleSource::Default,
        }
    }
}

/// Resolve the effective background style of a profile
pub fn resolve_style(profile: &Profile, catalog: &TemplateCatalog) -> StyleDescriptor {
    if let Some(url) = profile.custom_design_url() {
        return image_style(url, Overlay::MEDIUM, StyleSource::CustomDesign);
    }

    match profile.design_mode {
        DesignMode::Ai => {
            if let Some(url) = profile.ai_background() {
                return image_style(url, Overlay::LIGHT, StyleSource::AiBackground);
            }
        }
        DesignMode::Template => {
            if let Some(id) = profile.template_id() {
                match catalog.get(id).and_then(|record| record.full_image()) {
                    Some(url) => return image_style(url, Overlay::MINIMAL, StyleSource::Template),
                    None => debug!(template = id, "template has no full image, falling through"),
                }
            }
        }
        DesignMode::Manual => {
            if let Some(color) = profile.color() {
                return StyleDescriptor {
                    background: Background::Solid(color.to_string()),
                    text_color: TextTone::Light,
                    overlay: Overlay::FAINT,
                    source: StyleSource::ManualColor,
                };
            }
        }
    }

    StyleDescriptor::default_gradient()
}

fn image_style(url: &str, overlay: Overlay, source: StyleSource) -> StyleDescriptor {
    StyleDescriptor {
        background: Background::Image(url.to_string()),
        text_color: TextTone::Light,
        overlay,
        source,
    }
}
