//! Contact card export and share payloads

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::contacts::ContactSlots;
use crate::profile::{Profile, ProfileType};

/// Build a vCard 3.0 document for a profile
pub fn build_vcard(profile: &Profile, slots: &ContactSlots) -> String {
    let name = escape_value(profile.display_name());
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{name}"),
    ];

    match profile.profile_type {
        ProfileType::Personal => lines.push(format!("N:{};;;;", name)),
        ProfileType::Business => {
            lines.push("N:;;;;".to_string());
            lines.push("X-ABShowAs:COMPANY".to_string());
        }
    }
    if let Some(org) = profile.company().or(match profile.profile_type {
        ProfileType::Business => profile.name(),
        ProfileType::Personal => None,
    }) {
        lines.push(format!("ORG:{}", escape_value(org)));
    }
    if let Some(title) = profile.title() {
        lines.push(format!("TITLE:{}", escape_value(title)));
    }
    if let Some(phone) = &slots.phone {
        lines.push(format!("TEL;TYPE=CELL:{}", escape_value(&phone.value)));
    }
    if let Some(email) = &slots.email {
        let address = email.href.trim_start_matches("mailto:");
        lines.push(format!("EMAIL;TYPE=INTERNET:{}", escape_value(address)));
    }
    if let Some(whatsapp) = &slots.whatsapp {
        lines.push(format!("URL;TYPE=WhatsApp:{}", whatsapp.href));
    }
    for link in &slots.others {
        lines.push(format!(
            "URL;TYPE={}:{}",
            escape_value(&link.platform_key()),
            link.url.trim()
        ));
    }
    if let Some(bio) = profile.bio() {
        lines.push(format!("NOTE:{}", escape_value(bio)));
    }
    if let Some(avatar) = profile.avatar_url() {
        lines.push(format!("PHOTO;VALUE=URI:{avatar}"));
    }
    lines.push("END:VCARD".to_string());

    // vCard requires CRLF line endings
    let mut card = lines.join("\r\n");
    card.push_str("\r\n");
    card
}

/// `data:` URI for offering the vCard as a download
pub fn vcard_data_uri(vcard: &str) -> String {
    format!(
        "data:text/vcard;charset=utf-8;base64,{}",
        BASE64_STANDARD.encode(vcard.as_bytes())
    )
}

/// Suggested download file name for a profile's vCard
pub fn vcard_file_name(profile: &Profile) -> String {
    let stem: String = profile
        .display_name()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.vcf", stem.trim_matches('_'))
}

/// Content handed to the platform share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

impl SharePayload {
    pub fn for_profile(profile: &Profile, url: Option<&str>) -> Self {
        let title = profile.display_name().to_string();
        let text = match profile.title() {
            Some(role) => format!("{title} - {role}"),
            None => format!("Contact card for {title}"),
        };
        Self {
            title,
            text,
            url: url.map(str::to_string),
        }
    }
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}
