//! Public digital menu viewer
//!
//! A menu document is fetched by slug and turned into a [`MenuView`]: only
//! available items, no empty categories, and theme colours with defaults.

use serde::{Deserialize, Serialize};

use crate::checkout::{format_price, DEFAULT_CURRENCY};
use crate::color::{adjust_brightness, HexColor};
use crate::profile::non_blank;

const DEFAULT_PRIMARY: &str = "#c2410c";
const DEFAULT_BACKGROUND: &str = "#fffaf5";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTheme {
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Menu as served by `GET /api/menu/:slug`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "restaurantName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub theme: MenuTheme,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

/// Resolved colours for the menu page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuColors {
    pub primary: String,
    /// Header and pressed-state shade of the primary colour
    pub primary_dark: String,
    pub background: String,
    pub text: String,
}

impl MenuColors {
    pub fn from_theme(theme: &MenuTheme) -> Self {
        let primary = valid_color(&theme.primary_color).unwrap_or(DEFAULT_PRIMARY).to_string();
        let background = valid_color(&theme.background_color)
            .unwrap_or(DEFAULT_BACKGROUND)
            .to_string();
        let text = valid_color(&theme.text_color)
            .map(str::to_string)
            .unwrap_or_else(|| readable_text_on(&background).to_string());
        Self {
            primary_dark: adjust_brightness(&primary, -15.0),
            primary,
            background,
            text,
        }
    }
}

/// Menu ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
    pub currency: String,
    pub colors: MenuColors,
    pub categories: Vec<MenuCategory>,
}

impl MenuView {
    pub fn from_document(document: &MenuDocument) -> Self {
        let categories = document
            .categories
            .iter()
            .filter_map(|category| {
                let items: Vec<MenuItem> = category
                    .items
                    .iter()
                    .filter(|item| item.is_available)
                    .cloned()
                    .collect();
                (!items.is_empty()).then(|| MenuCategory {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    items,
                })
            })
            .collect();

        Self {
            name: document.name.trim().to_string(),
            description: non_blank(&document.description).map(str::to_string),
            logo_url: non_blank(&document.logo_url).map(str::to_string),
            cover_url: non_blank(&document.cover_url).map(str::to_string),
            currency: non_blank(&document.currency)
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
            colors: MenuColors::from_theme(&document.theme),
            categories,
        }
    }

    /// True when nothing can be ordered; shown as an empty state
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Items whose name or description contains `query`, case-insensitively
    pub fn search(&self, query: &str) -> Vec<(&MenuCategory, &MenuItem)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.categories
            .iter()
            .flat_map(|category| category.items.iter().map(move |item| (category, item)))
            .filter(|(_, item)| {
                item.name.to_lowercase().contains(&needle)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn price_label(&self, item: &MenuItem) -> String {
        format_price(item.price, &self.currency)
    }
}

fn valid_color(value: &Option<String>) -> Option<&str> {
    non_blank(value).filter(|c| c.parse::<HexColor>().is_ok())
}

fn readable_text_on(background: &str) -> &'static str {
    match background.parse::<HexColor>() {
        Ok(color) if color.luminance() < 0.5 => "#ffffff",
        _ => "#1f2937",
    }
}

const fn default_available() -> bool {
    true
}
