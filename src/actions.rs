//! Interactive card actions
//!
//! Layouts never navigate on their own. Each interactive element of a
//! rendered card is a [`Hotspot`] tagged with a [`CardAction`]; the host
//! application decides what happens by implementing [`CardActions`].

use crate::contacts::{ContactKind, ContactSlots};
use crate::profile::Profile;
use crate::vcard::{self, SharePayload};

/// Something a viewer can do from a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Call { href: String },
    Email { href: String },
    WhatsApp { href: String },
    Social { platform: String, url: String },
    DownloadContact,
    Share,
}

impl CardAction {
    /// Stable name written into the SVG `data-action` attribute
    pub fn name(&self) -> &'static str {
        match self {
            CardAction::Call { .. } => "call",
            CardAction::Email { .. } => "email",
            CardAction::WhatsApp { .. } => "whatsapp",
            CardAction::Social { .. } => "social",
            CardAction::DownloadContact => "download-contact",
            CardAction::Share => "share",
        }
    }

    pub fn for_contact(kind: ContactKind, href: &str) -> Self {
        let href = href.to_string();
        match kind {
            ContactKind::Phone => CardAction::Call { href },
            ContactKind::Email => CardAction::Email { href },
            ContactKind::WhatsApp => CardAction::WhatsApp { href },
        }
    }
}

/// Callbacks invoked for card interactions
pub trait CardActions {
    fn on_call(&mut self, href: &str);
    fn on_email(&mut self, href: &str);
    fn on_whatsapp(&mut self, href: &str);
    fn on_social(&mut self, platform: &str, url: &str);
    /// Receives the vCard document for the profile
    fn on_download_contact(&mut self, vcard: &str);
    fn on_share(&mut self, payload: &SharePayload);
}

/// An interactive region of a rendered card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotspot {
    /// Element id in the SVG output
    pub id: String,
    pub action: CardAction,
}

/// Everything a callback may need besides the action itself
pub struct ActionContext<'a> {
    pub profile: &'a Profile,
    pub slots: &'a ContactSlots,
    pub share_url: Option<&'a str>,
}

/// Route an action to the matching callback
pub fn dispatch(action: &CardAction, context: &ActionContext<'_>, handlers: &mut dyn CardActions) {
    tracing::debug!(action = action.name(), "dispatching card action");
    match action {
        CardAction::Call { href } => handlers.on_call(href),
        CardAction::Email { href } => handlers.on_email(href),
        CardAction::WhatsApp { href } => handlers.on_whatsapp(href),
        CardAction::Social { platform, url } => handlers.on_social(platform, url),
        CardAction::DownloadContact => {
            let card = vcard::build_vcard(context.profile, context.slots);
            handlers.on_download_contact(&card);
        }
        CardAction::Share => {
            let payload = SharePayload::for_profile(context.profile, context.share_url);
            handlers.on_share(&payload);
        }
    }
}
