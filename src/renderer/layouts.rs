//! The six card layouts
//!
//! Every layout paints the same inputs: the profile, its contact slots, the
//! resolved background style and an accent colour. Layouts differ only in
//! arrangement. Presence decisions come from [`ContactSlots`], so a layout
//! never draws an empty contact slot, and each layout draws at most
//! [`CardLayout::social_cap`] generic social links.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::actions::{CardAction, Hotspot};
use crate::color::{adjust_brightness, HexColor};
use crate::contacts::{ContactLink, ContactSlots};
use crate::profile::Profile;
use crate::template::{Background, StyleDescriptor};

use super::svg::{escape_xml, fill, SvgBuilder, TextAnchor};

/// Visual arrangement of a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    #[default]
    Classic,
    Modern,
    Minimal,
    Corporate,
    Creative,
    Elegant,
}

impl CardLayout {
    pub const ALL: [CardLayout; 6] = [
        CardLayout::Classic,
        CardLayout::Modern,
        CardLayout::Minimal,
        CardLayout::Corporate,
        CardLayout::Creative,
        CardLayout::Elegant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardLayout::Classic => "classic",
            CardLayout::Modern => "modern",
            CardLayout::Minimal => "minimal",
            CardLayout::Corporate => "corporate",
            CardLayout::Creative => "creative",
            CardLayout::Elegant => "elegant",
        }
    }

    /// Maximum number of generic social links drawn
    pub fn social_cap(self) -> usize {
        match self {
            CardLayout::Modern | CardLayout::Creative => 8,
            _ => 6,
        }
    }

    /// Accent used when the caller supplies none
    pub fn default_accent(self) -> &'static str {
        match self {
            CardLayout::Classic => "#667eea",
            CardLayout::Modern => "#0ea5e9",
            CardLayout::Minimal => "#111827",
            CardLayout::Corporate => "#1e3a5f",
            CardLayout::Creative => "#f97316",
            CardLayout::Elegant => "#b08d57",
        }
    }

    fn font_family(self) -> &'static str {
        match self {
            CardLayout::Elegant => "Georgia, 'Times New Roman', serif",
            CardLayout::Minimal => "'Helvetica Neue', Arial, sans-serif",
            _ => "Inter, 'Segoe UI', Roboto, sans-serif",
        }
    }
}

impl fmt::Display for CardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        CardLayout::ALL
            .into_iter()
            .find(|layout| layout.as_str() == normalized)
            .ok_or_else(|| format!("unknown card layout: {s}"))
    }
}

/// Inputs shared by every layout
pub struct CardProps<'a> {
    pub profile: &'a Profile,
    pub slots: &'a ContactSlots,
    pub style: &'a StyleDescriptor,
    /// Caller-supplied accent; anything but a hex colour uses the layout default
    pub accent: Option<&'a str>,
}

/// Paint a card with the given layout and return its hotspots
pub fn paint(layout: CardLayout, props: &CardProps<'_>, builder: &mut SvgBuilder) -> Vec<Hotspot> {
    let accent = props
        .accent
        .map(str::trim)
        .filter(|a| a.parse::<HexColor>().is_ok())
        .unwrap_or(layout.default_accent())
        .to_string();

    let mut painter = Painter {
        builder,
        props,
        layout,
        accent,
        hotspots: Vec::new(),
    };
    painter.theme_variables();
    painter.background();

    match layout {
        CardLayout::Classic => painter.classic(),
        CardLayout::Modern => painter.modern(),
        CardLayout::Minimal => painter.minimal(),
        CardLayout::Corporate => painter.corporate(),
        CardLayout::Creative => painter.creative(),
        CardLayout::Elegant => painter.elegant(),
    }

    painter.hotspots
}

/// How dedicated contact slots are drawn
#[derive(Clone, Copy)]
enum ContactStyle {
    /// Full-width labelled buttons stacked vertically
    Rows,
    /// Round icon buttons in a centred row
    Icons,
    /// Plain text lines, left aligned
    TextLines,
}

struct Painter<'b, 'p> {
    builder: &'b mut SvgBuilder,
    props: &'p CardProps<'p>,
    layout: CardLayout,
    accent: String,
    hotspots: Vec<Hotspot>,
}

impl Painter<'_, '_> {
    fn width(&self) -> f64 {
        self.builder.width()
    }

    fn height(&self) -> f64 {
        self.builder.height()
    }

    fn text_fill(&self) -> &'static str {
        self.props.style.text_color.fill()
    }

    fn muted_fill(&self) -> &'static str {
        self.props.style.text_color.muted_fill()
    }

    fn theme_variables(&mut self) {
        let variables = [
            ("accent", self.accent.clone()),
            ("accent-dark", adjust_brightness(&self.accent, -20.0)),
            ("accent-light", adjust_brightness(&self.accent, 20.0)),
            ("font-family", self.layout.font_family().to_string()),
        ];
        self.builder.add_css_variables(&variables);
    }

    fn background(&mut self) {
        let (w, h) = (self.width(), self.height());
        let style = self.props.style;
        match &style.background {
            Background::Image(url) => {
                self.builder.add_rect(None, 0.0, 0.0, w, h, &["background"], &fill("#1f2937"));
                self.builder.add_image(Some("background"), url, 0.0, 0.0, w, h, None);
            }
            Background::Solid(color) => {
                self.builder
                    .add_rect(Some("background"), 0.0, 0.0, w, h, &["background"], &fill(color));
            }
            Background::Gradient(gradient) => {
                self.builder.add_linear_gradient(
                    "background-gradient",
                    f64::from(gradient.angle),
                    &[(0.0, gradient.from, 1.0), (1.0, gradient.to, 1.0)],
                );
                self.builder.add_rect(
                    Some("background"),
                    0.0,
                    0.0,
                    w,
                    h,
                    &["background"],
                    r#" fill="url(#background-gradient)""#,
                );
            }
        }

        let overlay = style.overlay;
        self.builder.add_linear_gradient(
            "overlay-gradient",
            180.0,
            &[
                (0.0, "#000000", overlay.top_alpha),
                (1.0, "#000000", overlay.bottom_alpha),
            ],
        );
        self.builder.add_rect(
            Some("overlay"),
            0.0,
            0.0,
            w,
            h,
            &["overlay"],
            r#" fill="url(#overlay-gradient)""#,
        );
    }

    fn avatar(&mut self, cx: f64, cy: f64, r: f64, ring: bool) {
        let profile = self.props.profile;
        if ring {
            self.builder
                .add_circle(None, cx, cy, r + 4.0, &["avatar-ring"], &fill(&self.accent));
        }
        match profile.avatar_url() {
            Some(url) => {
                self.builder.add_circle_clip("avatar-clip", cx, cy, r);
                self.builder.add_image(
                    Some("avatar"),
                    url,
                    cx - r,
                    cy - r,
                    r * 2.0,
                    r * 2.0,
                    Some("avatar-clip"),
                );
            }
            None => {
                let dark = adjust_brightness(&self.accent, -20.0);
                self.builder
                    .add_circle(Some("avatar"), cx, cy, r, &["avatar"], &fill(&dark));
                let size = format!(r##" fill="#ffffff" font-size="{}""##, (r * 0.8).round());
                self.builder.add_text(
                    None,
                    &profile.initials(),
                    cx,
                    cy,
                    TextAnchor::Middle,
                    &["initials"],
                    &size,
                );
            }
        }
    }

    /// Name, title and bio; returns the y just below the last line
    fn identity(&mut self, x: f64, y: f64, anchor: TextAnchor, name_size: f64, bio_chars: usize) -> f64 {
        let profile = self.props.profile;
        let text_fill = self.text_fill();
        let muted = self.muted_fill();
        let mut y = y;

        self.builder.add_text(
            Some("name"),
            profile.display_name(),
            x,
            y,
            anchor,
            &["name"],
            &format!(r#" fill="{}" font-size="{}" font-weight="700""#, text_fill, name_size),
        );
        y += name_size * 0.9 + 6.0;

        if let Some(title) = profile.title() {
            let line = match profile.company() {
                Some(company) => format!("{title} · {company}"),
                None => title.to_string(),
            };
            self.builder.add_text(
                Some("title"),
                &line,
                x,
                y,
                anchor,
                &["title"],
                &format!(r#" fill="{}" font-size="15""#, muted),
            );
            y += 24.0;
        }

        if let Some(bio) = profile.bio() {
            for (i, line) in wrap_text(bio, bio_chars, 3).iter().enumerate() {
                let id = format!("bio-{i}");
                self.builder.add_text(
                    Some(&id),
                    line,
                    x,
                    y,
                    anchor,
                    &["bio"],
                    &format!(r#" fill="{}" font-size="13""#, muted),
                );
                y += 18.0;
            }
        }
        y
    }

    fn push_hotspot(&mut self, id: &str, action: CardAction) {
        self.hotspots.push(Hotspot {
            id: id.to_string(),
            action,
        });
    }

    /// Dedicated contact slots; absent slots are skipped entirely
    fn contacts(&mut self, style: ContactStyle, x: f64, y: f64, span: f64) -> f64 {
        let links: Vec<ContactLink> = self.props.slots.dedicated().cloned().collect();
        if links.is_empty() {
            return y;
        }
        let accent = self.accent.clone();
        let text_fill = self.text_fill();

        match style {
            ContactStyle::Rows => {
                let mut y = y;
                for link in &links {
                    let id = format!("contact-{}", link.kind.platform());
                    let action = CardAction::for_contact(link.kind, &link.href);
                    self.builder.start_hotspot(&id, action.name(), link.kind.label());
                    self.builder.add_rect(
                        None,
                        x,
                        y,
                        span,
                        40.0,
                        &["contact-row"],
                        &format!(r#" rx="10"{}"#, fill(&accent)),
                    );
                    self.builder.add_text(
                        None,
                        &format!("{}  {}", link.kind.label(), link.value),
                        x + 16.0,
                        y + 20.0,
                        TextAnchor::Start,
                        &["contact-label"],
                        &format!(r#" fill="{}" font-size="14""#, text_fill),
                    );
                    self.builder.end_group();
                    self.push_hotspot(&id, action);
                    y += 48.0;
                }
                y
            }
            ContactStyle::Icons => {
                let gap = 64.0;
                let start = x + span / 2.0 - gap * (links.len() as f64 - 1.0) / 2.0;
                for (i, link) in links.iter().enumerate() {
                    let id = format!("contact-{}", link.kind.platform());
                    let action = CardAction::for_contact(link.kind, &link.href);
                    let cx = start + gap * i as f64;
                    self.builder.start_hotspot(&id, action.name(), link.kind.label());
                    self.builder
                        .add_circle(None, cx, y + 22.0, 22.0, &["contact-icon"], &fill(&accent));
                    self.builder.add_text(
                        None,
                        &glyph(link.kind.platform()),
                        cx,
                        y + 22.0,
                        TextAnchor::Middle,
                        &["contact-glyph"],
                        &format!(r#" fill="{}" font-size="14" font-weight="700""#, text_fill),
                    );
                    self.builder.end_group();
                    self.push_hotspot(&id, action);
                }
                y + 56.0
            }
            ContactStyle::TextLines => {
                let mut y = y;
                for link in &links {
                    let id = format!("contact-{}", link.kind.platform());
                    let action = CardAction::for_contact(link.kind, &link.href);
                    self.builder.start_hotspot(&id, action.name(), link.kind.label());
                    self.builder.add_text(
                        None,
                        &link.value,
                        x,
                        y,
                        TextAnchor::Start,
                        &["contact-line"],
                        &format!(r#" fill="{}" font-size="14""#, text_fill),
                    );
                    self.builder.end_group();
                    self.push_hotspot(&id, action);
                    y += 24.0;
                }
                y
            }
        }
    }

    /// Generic social icons, capped per layout, laid out in a grid
    fn socials(&mut self, y: f64, per_row: usize, radius: f64) -> f64 {
        let links = self.props.slots.others_capped(self.layout.social_cap()).to_vec();
        if links.is_empty() {
            return y;
        }
        let gap = radius * 2.0 + 16.0;
        let text_fill = self.text_fill();
        let ring = adjust_brightness(&self.accent, 20.0);
        let mut bottom = y;

        for (row_index, row) in links.chunks(per_row.max(1)).enumerate() {
            let cy = y + radius + row_index as f64 * gap;
            let start = self.width() / 2.0 - gap * (row.len() as f64 - 1.0) / 2.0;
            for (col, link) in row.iter().enumerate() {
                let index = row_index * per_row + col;
                let id = format!("social-{index}");
                let action = CardAction::Social {
                    platform: link.platform.clone(),
                    url: link.url.trim().to_string(),
                };
                let cx = start + gap * col as f64;
                self.builder.start_hotspot(&id, action.name(), &link.platform);
                self.builder.add_circle(
                    None,
                    cx,
                    cy,
                    radius,
                    &["social-icon"],
                    &format!(
                        r#"{} fill-opacity="0.25" stroke="{}""#,
                        fill("#ffffff"),
                        escape_xml(&ring)
                    ),
                );
                self.builder.add_text(
                    None,
                    &glyph(&link.platform),
                    cx,
                    cy,
                    TextAnchor::Middle,
                    &["social-glyph"],
                    &format!(r#" fill="{}" font-size="{}""#, text_fill, (radius * 0.7).round()),
                );
                self.builder.end_group();
                self.push_hotspot(&id, action);
            }
            bottom = cy + radius + 12.0;
        }
        bottom
    }

    /// Save-contact and share buttons pinned to the bottom edge
    fn footer_actions(&mut self, filled: bool) {
        let (w, h) = (self.width(), self.height());
        let button_w = (w - 24.0 * 3.0) / 2.0;
        let y = h - 64.0;
        let accent = self.accent.clone();
        let text_fill = self.text_fill();
        let buttons = [
            ("action-download", CardAction::DownloadContact, "Save Contact", 24.0),
            ("action-share", CardAction::Share, "Share", 48.0 + button_w),
        ];
        for (id, action, label, x) in buttons {
            let styles = if filled {
                format!(r#" rx="20"{}"#, fill(&accent))
            } else {
                format!(r#" rx="20" fill="none" stroke="{}""#, escape_xml(text_fill))
            };
            self.builder.start_hotspot(id, action.name(), label);
            self.builder.add_rect(None, x, y, button_w, 40.0, &["action-button"], &styles);
            self.builder.add_text(
                None,
                label,
                x + button_w / 2.0,
                y + 20.0,
                TextAnchor::Middle,
                &["action-label"],
                &format!(r#" fill="{}" font-size="14" font-weight="600""#, text_fill),
            );
            self.builder.end_group();
            self.push_hotspot(id, action);
        }
    }

    fn classic(&mut self) {
        let w = self.width();
        self.avatar(w / 2.0, 110.0, 56.0, true);
        let y = self.identity(w / 2.0, 200.0, TextAnchor::Middle, 26.0, 42);
        let y = self.contacts(ContactStyle::Rows, 32.0, y + 12.0, w - 64.0);
        self.socials(y + 8.0, 6, 18.0);
        self.footer_actions(true);
    }

    fn modern(&mut self) {
        let w = self.width();
        let accent = self.accent.clone();
        self.builder.add_rect(
            Some("header-band"),
            0.0,
            0.0,
            w,
            150.0,
            &["band"],
            &format!(r#"{} fill-opacity="0.85""#, fill(&accent)),
        );
        self.avatar(84.0, 150.0, 48.0, false);
        let y = self.identity(148.0, 190.0, TextAnchor::Start, 24.0, 30);
        let y = self.contacts(ContactStyle::Icons, 24.0, y.max(230.0) + 16.0, w - 48.0);
        self.socials(y + 8.0, 4, 20.0);
        self.footer_actions(true);
    }

    fn minimal(&mut self) {
        let w = self.width();
        let y = self.identity(32.0, 72.0, TextAnchor::Start, 28.0, 44);
        let accent = self.accent.clone();
        self.builder
            .add_rect(Some("divider"), 32.0, y + 4.0, 48.0, 2.0, &["divider"], &fill(&accent));
        let y = self.contacts(ContactStyle::TextLines, 32.0, y + 32.0, w - 64.0);
        self.socials(y + 8.0, 6, 16.0);
        self.footer_actions(false);
    }

    fn corporate(&mut self) {
        let w = self.width();
        let accent = self.accent.clone();
        let dark = adjust_brightness(&accent, -20.0);
        self.builder
            .add_rect(Some("header-bar"), 0.0, 0.0, w, 96.0, &["band"], &fill(&dark));
        self.builder
            .add_rect(Some("header-rule"), 0.0, 96.0, w, 4.0, &["rule"], &fill(&accent));
        self.avatar(w / 2.0, 100.0, 44.0, true);
        let y = self.identity(w / 2.0, 176.0, TextAnchor::Middle, 22.0, 44);
        let y = self.contacts(ContactStyle::Rows, 24.0, y + 12.0, w - 48.0);
        self.socials(y + 8.0, 6, 16.0);
        self.footer_actions(true);
    }

    fn creative(&mut self) {
        let w = self.width();
        let accent = self.accent.clone();
        self.builder.add_rect(
            Some("accent-slab"),
            -w * 0.25,
            -80.0,
            w * 1.5,
            220.0,
            &["slab"],
            &format!(r#"{} fill-opacity="0.8" transform="rotate(-8 {} 60)""#, fill(&accent), w / 2.0),
        );
        self.avatar(w - 90.0, 120.0, 52.0, true);
        let y = self.identity(28.0, 220.0, TextAnchor::Start, 30.0, 36);
        let y = self.contacts(ContactStyle::Icons, 24.0, y + 16.0, w - 48.0);
        self.socials(y + 8.0, 4, 20.0);
        self.footer_actions(true);
    }

    fn elegant(&mut self) {
        let (w, h) = (self.width(), self.height());
        let accent = self.accent.clone();
        self.builder.add_rect(
            Some("frame"),
            14.0,
            14.0,
            w - 28.0,
            h - 28.0,
            &["frame"],
            &format!(r#" fill="none" stroke="{}" stroke-width="1.5""#, escape_xml(&accent)),
        );
        self.avatar(w / 2.0, 120.0, 50.0, false);
        let y = self.identity(w / 2.0, 204.0, TextAnchor::Middle, 26.0, 40);
        self.builder
            .add_rect(Some("divider"), w / 2.0 - 30.0, y + 2.0, 60.0, 1.0, &["divider"], &fill(&accent));
        let y = self.contacts(ContactStyle::Icons, 24.0, y + 20.0, w - 48.0);
        self.socials(y + 8.0, 6, 16.0);
        self.footer_actions(false);
    }
}

/// One- or two-letter mark drawn inside an icon
fn glyph(platform: &str) -> String {
    match platform.trim().to_ascii_lowercase().as_str() {
        "phone" => "☎".to_string(),
        "email" => "@".to_string(),
        "whatsapp" => "WA".to_string(),
        "linkedin" => "in".to_string(),
        "facebook" => "f".to_string(),
        "twitter" | "x" => "X".to_string(),
        "youtube" => "▶".to_string(),
        other => other
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "•".to_string()),
    }
}

/// Greedy word wrap; the last line gets an ellipsis if text remains
fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed <= max_chars || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        lines.push(std::mem::take(&mut current));
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        current.push_str(word);
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}
