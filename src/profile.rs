//! Profile records as served by the backend
//!
//! The client only ever holds a copy of a profile for the duration of a
//! render pass. Every optional text field treats a blank string the same as
//! an absent value, see [`non_blank`].

use serde::{Deserialize, Deserializer, Serialize};

/// Whether a profile represents a person or a business
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Business,
    /// Also used for any type this client does not know
    #[default]
    #[serde(other)]
    Personal,
}

/// Declared source of the card background
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignMode {
    Manual,
    Ai,
    /// Also used for any mode this client does not know
    #[default]
    #[serde(other)]
    Template,
}

/// A single entry of a profile's link list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(default = "SocialLink::default_visible")]
    pub is_visible: bool,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
            is_visible: true,
        }
    }

    /// Mark the link as hidden
    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    /// Lowercased, trimmed platform key
    pub fn platform_key(&self) -> String {
        self.platform.trim().to_ascii_lowercase()
    }

    const fn default_visible() -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_type: ProfileType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub custom_design_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub design_mode: DesignMode,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub ai_background: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_links: Vec<SocialLink>,
}

impl Profile {
    /// Parse a profile from the backend's JSON representation
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(&self.title)
    }

    pub fn company(&self) -> Option<&str> {
        non_blank(&self.company)
    }

    pub fn bio(&self) -> Option<&str> {
        non_blank(&self.bio)
    }

    pub fn avatar_url(&self) -> Option<&str> {
        non_blank(&self.avatar_url)
    }

    pub fn custom_design_url(&self) -> Option<&str> {
        non_blank(&self.custom_design_url)
    }

    pub fn template_id(&self) -> Option<&str> {
        non_blank(&self.template)
    }

    pub fn ai_background(&self) -> Option<&str> {
        non_blank(&self.ai_background)
    }

    pub fn color(&self) -> Option<&str> {
        non_blank(&self.color)
    }

    /// Name shown on the card, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("Your Name")
    }

    /// Initials for the avatar placeholder
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect();
        initials.to_uppercase()
    }
}

/// Read an explicit `null` as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat `None`, empty and whitespace-only strings alike
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
