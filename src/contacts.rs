//! Contact slot selection shared by every card layout
//!
//! Phone, email and WhatsApp links get dedicated slots on a card. Everything
//! else is a generic social icon. The split is computed once per render so
//! every layout sees the same presence/absence decisions.

use crate::profile::{Profile, SocialLink};

pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";
pub const WHATSAPP: &str = "whatsapp";

/// Which dedicated slot a contact fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    WhatsApp,
}

impl ContactKind {
    pub fn platform(self) -> &'static str {
        match self {
            ContactKind::Phone => PHONE,
            ContactKind::Email => EMAIL,
            ContactKind::WhatsApp => WHATSAPP,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactKind::Phone => "Call",
            ContactKind::Email => "Email",
            ContactKind::WhatsApp => "WhatsApp",
        }
    }
}

/// A dedicated contact slot with its raw value and action target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    pub kind: ContactKind,
    /// Value as entered by the user
    pub value: String,
    /// `tel:`, `mailto:` or `wa.me` target
    pub href: String,
}

impl ContactLink {
    fn from_social(kind: ContactKind, link: &SocialLink) -> Option<Self> {
        let value = link.url.trim();
        if value.is_empty() {
            return None;
        }
        let href = match kind {
            ContactKind::Phone => {
                let number = value.strip_prefix("tel:").unwrap_or(value);
                format!("tel:{}", compact_phone(number))
            }
            ContactKind::Email => {
                let address = value.strip_prefix("mailto:").unwrap_or(value);
                format!("mailto:{address}")
            }
            ContactKind::WhatsApp => {
                if value.starts_with("http://") || value.starts_with("https://") {
                    value.to_string()
                } else {
                    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
                    format!("https://wa.me/{digits}")
                }
            }
        };
        Some(Self {
            kind,
            value: value.to_string(),
            href,
        })
    }
}

/// Contact links split into dedicated slots and generic social links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSlots {
    pub phone: Option<ContactLink>,
    pub email: Option<ContactLink>,
    pub whatsapp: Option<ContactLink>,
    /// Visible links that are not phone, email or WhatsApp, in profile order
    pub others: Vec<SocialLink>,
}

impl ContactSlots {
    pub fn from_profile(profile: &Profile) -> Self {
        Self::from_links(&profile.social_links)
    }

    pub fn from_links(links: &[SocialLink]) -> Self {
        let mut slots = Self::default();
        for link in links.iter().filter(|l| l.is_visible) {
            let kind = match link.platform_key().as_str() {
                PHONE => ContactKind::Phone,
                EMAIL => ContactKind::Email,
                WHATSAPP => ContactKind::WhatsApp,
                _ => {
                    if !link.url.trim().is_empty() {
                        slots.others.push(link.clone());
                    }
                    continue;
                }
            };
            let slot = match kind {
                ContactKind::Phone => &mut slots.phone,
                ContactKind::Email => &mut slots.email,
                ContactKind::WhatsApp => &mut slots.whatsapp,
            };
            if slot.is_none() {
                *slot = ContactLink::from_social(kind, link);
            }
        }
        slots
    }

    /// Dedicated slots that are present, in display order
    pub fn dedicated(&self) -> impl Iterator<Item = &ContactLink> {
        [&self.phone, &self.email, &self.whatsapp]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// The first `cap` generic social links; the rest are not shown
    pub fn others_capped(&self, cap: usize) -> &[SocialLink] {
        &self.others[..self.others.len().min(cap)]
    }

    pub fn has_any_contact(&self) -> bool {
        self.dedicated().next().is_some()
    }
}

/// Social links suitable for the generic icon row
pub fn display_social_links(links: &[SocialLink]) -> Vec<SocialLink> {
    ContactSlots::from_links(links).others
}

fn compact_phone(number: &str) -> String {
    number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}
