//! Dashboard listing of everything a user owns
//!
//! Profiles, purchased products and menus come from three endpoints and are
//! merged into one list, newest first.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::{MenuSummary, ProfileSummary, UserProduct};

/// Kind of owned asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Profile,
    UserProduct,
    Menu,
}

impl AssetKind {
    /// Collection segment under `/api`
    pub fn resource_path(self) -> &'static str {
        match self {
            AssetKind::Profile => "profiles",
            AssetKind::UserProduct => "user-products",
            AssetKind::Menu => "menus",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Profile => "Profile",
            AssetKind::UserProduct => "Product",
            AssetKind::Menu => "Menu",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_path())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profile" | "profiles" => Ok(AssetKind::Profile),
            "product" | "user-product" | "user-products" => Ok(AssetKind::UserProduct),
            "menu" | "menus" => Ok(AssetKind::Menu),
            other => Err(format!("unknown asset kind: {other}")),
        }
    }
}

/// One row of the unified listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub kind: AssetKind,
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ProfileSummary> for ListingEntry {
    fn from(profile: ProfileSummary) -> Self {
        Self {
            kind: AssetKind::Profile,
            title: title_or(profile.name.as_deref(), "Untitled profile"),
            created_at: parse_timestamp(profile.created_at.as_deref()),
            id: profile.id,
            slug: profile.slug,
            active: profile.is_active,
        }
    }
}

impl From<UserProduct> for ListingEntry {
    fn from(product: UserProduct) -> Self {
        Self {
            kind: AssetKind::UserProduct,
            title: title_or(product.product_name.as_deref(), "Product"),
            created_at: parse_timestamp(product.created_at.as_deref()),
            id: product.id,
            slug: product.slug,
            active: product.is_active,
        }
    }
}

impl From<MenuSummary> for ListingEntry {
    fn from(menu: MenuSummary) -> Self {
        Self {
            kind: AssetKind::Menu,
            title: title_or(menu.name.as_deref(), "Untitled menu"),
            created_at: parse_timestamp(menu.created_at.as_deref()),
            id: menu.id,
            slug: menu.slug,
            active: menu.is_active,
        }
    }
}

/// Merge the three collections, newest first; undated entries go last
pub fn merge_listing(
    profiles: Vec<ProfileSummary>,
    products: Vec<UserProduct>,
    menus: Vec<MenuSummary>,
) -> Vec<ListingEntry> {
    let mut entries: Vec<ListingEntry> = profiles
        .into_iter()
        .map(ListingEntry::from)
        .chain(products.into_iter().map(ListingEntry::from))
        .chain(menus.into_iter().map(ListingEntry::from))
        .collect();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            tracing::warn!(value = raw, "unparseable createdAt: {err}");
            None
        }
    }
}

fn title_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
