//! Card Studio - client library for digital business cards
//!
//! This library renders profile cards from templates, exports contact
//! cards, views digital menus, runs checkout totals and talks to the
//! product's REST backend.
//!
//! # Example
//!
//! ```rust
//! use card_studio::{render_card, Profile, RenderConfig};
//!
//! let profile = Profile {
//!     name: Some("Lina Haddad".to_string()),
//!     ..Profile::default()
//! };
//! let card = render_card(&profile, &RenderConfig::default());
//! assert!(card.svg.contains("<svg"));
//! assert!(card.svg.contains("Lina Haddad"));
//! ```

pub mod actions;
pub mod api;
pub mod checkout;
pub mod color;
pub mod config;
pub mod contacts;
pub mod menu;
pub mod profile;
pub mod renderer;
pub mod template;
pub mod vcard;

pub use actions::{CardAction, CardActions, Hotspot};
pub use color::adjust_brightness;
pub use contacts::ContactSlots;
pub use profile::{DesignMode, Profile, ProfileType, SocialLink};
pub use renderer::{CardLayout, SvgConfig};
pub use template::{resolve_style, StyleDescriptor, TemplateCatalog};

use actions::ActionContext;
use renderer::{CardProps, SvgBuilder};

/// Configuration for the complete card render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Template records used for layout and background lookup
    pub catalog: TemplateCatalog,
    /// Accent colour; the template's or layout's default is used when unset
    pub accent: Option<String>,
    /// Force a layout instead of the profile template's layout
    pub layout: Option<CardLayout>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            svg: SvgConfig::default(),
            catalog: TemplateCatalog::builtin(),
            accent: None,
            layout: None,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with the built-in catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the template catalog
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the accent colour
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Force a specific layout
    pub fn with_layout(mut self, layout: CardLayout) -> Self {
        self.layout = Some(layout);
        self
    }
}

/// A painted card and its interactive regions
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub layout: CardLayout,
    pub style: StyleDescriptor,
    pub slots: ContactSlots,
    pub svg: String,
    pub hotspots: Vec<Hotspot>,
}

impl RenderedCard {
    /// Hotspot with the given SVG element id
    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    /// Forward a click on a hotspot to the host's callbacks.
    ///
    /// Returns `false` when no hotspot has that id.
    pub fn trigger(
        &self,
        id: &str,
        profile: &Profile,
        share_url: Option<&str>,
        handlers: &mut dyn CardActions,
    ) -> bool {
        let Some(hotspot) = self.hotspot(id) else {
            return false;
        };
        let context = ActionContext {
            profile,
            slots: &self.slots,
            share_url,
        };
        actions::dispatch(&hotspot.action, &context, handlers);
        true
    }
}

/// Render a profile to an SVG card
///
/// The layout comes from the profile's template record (or the config
/// override); an unknown template id renders the classic layout.
pub fn render_card(profile: &Profile, config: &RenderConfig) -> RenderedCard {
    let record = profile.template_id().and_then(|id| config.catalog.get(id));
    let layout = config
        .layout
        .or(record.map(|r| r.layout))
        .unwrap_or_default();
    let accent = config
        .accent
        .as_deref()
        .or(record.and_then(|r| r.accent.as_deref()));

    let style = resolve_style(profile, &config.catalog);
    let slots = ContactSlots::from_profile(profile);
    tracing::debug!(
        layout = layout.as_str(),
        source = ?style.source,
        contacts = slots.dedicated().count(),
        socials = slots.others.len(),
        "rendering card"
    );

    let mut builder = SvgBuilder::new(config.svg.clone());
    let props = CardProps {
        profile,
        slots: &slots,
        style: &style,
        accent,
    };
    let hotspots = renderer::paint(layout, &props, &mut builder);

    RenderedCard {
        layout,
        style,
        slots,
        svg: builder.build(),
        hotspots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_template_layout() {
        let profile = Profile {
            template: Some("modern".to_string()),
            ..Profile::default()
        };
        let card = render_card(&profile, &RenderConfig::new());
        assert_eq!(card.layout, CardLayout::Modern);
        assert!(card.svg.contains(r#"id="header-band""#));
    }

    #[test]
    fn test_unknown_template_renders_classic() {
        let profile = Profile {
            template: Some("retired-template".to_string()),
            ..Profile::default()
        };
        let card = render_card(&profile, &RenderConfig::new());
        assert_eq!(card.layout, CardLayout::Classic);
    }

    #[test]
    fn test_layout_override() {
        let profile = Profile {
            template: Some("modern".to_string()),
            ..Profile::default()
        };
        let card = render_card(&profile, &RenderConfig::new().with_layout(CardLayout::Elegant));
        assert_eq!(card.layout, CardLayout::Elegant);
    }

    #[test]
    fn test_template_accent_is_used() {
        let profile = Profile {
            template: Some("elegant".to_string()),
            ..Profile::default()
        };
        let card = render_card(&profile, &RenderConfig::new());
        assert!(card.svg.contains("--accent: #b08d57;"));
    }

    #[test]
    fn test_trigger_unknown_hotspot() {
        struct Nothing;
        impl CardActions for Nothing {
            fn on_call(&mut self, _: &str) {}
            fn on_email(&mut self, _: &str) {}
            fn on_whatsapp(&mut self, _: &str) {}
            fn on_social(&mut self, _: &str, _: &str) {}
            fn on_download_contact(&mut self, _: &str) {}
            fn on_share(&mut self, _: &vcard::SharePayload) {}
        }
        let profile = Profile::default();
        let card = render_card(&profile, &RenderConfig::new());
        assert!(!card.trigger("contact-phone", &profile, None, &mut Nothing));
        assert!(card.trigger("action-share", &profile, None, &mut Nothing));
    }
}
