//! Integration tests for card layouts and their interactive regions

use card_studio::actions::CardAction;
use card_studio::profile::{ProfileType, SocialLink};
use card_studio::vcard::SharePayload;
use card_studio::{render_card, CardActions, CardLayout, Profile, RenderConfig};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    vcard: Option<String>,
    shared: Option<SharePayload>,
}

impl CardActions for Recorder {
    fn on_call(&mut self, href: &str) {
        self.events.push(format!("call {href}"));
    }
    fn on_email(&mut self, href: &str) {
        self.events.push(format!("email {href}"));
    }
    fn on_whatsapp(&mut self, href: &str) {
        self.events.push(format!("whatsapp {href}"));
    }
    fn on_social(&mut self, platform: &str, url: &str) {
        self.events.push(format!("social {platform} {url}"));
    }
    fn on_download_contact(&mut self, vcard: &str) {
        self.events.push("download".to_string());
        self.vcard = Some(vcard.to_string());
    }
    fn on_share(&mut self, payload: &SharePayload) {
        self.events.push("share".to_string());
        self.shared = Some(payload.clone());
    }
}

fn full_profile() -> Profile {
    Profile {
        name: Some("Lina Haddad".to_string()),
        title: Some("Product Designer".to_string()),
        company: Some("Northwind".to_string()),
        bio: Some("Designing calm interfaces for busy people.".to_string()),
        social_links: vec![
            SocialLink::new("phone", "+962 79 123 4567"),
            SocialLink::new("Email", "lina@example.com"),
            SocialLink::new("whatsapp", "+962791234567"),
            SocialLink::new("linkedin", "https://linkedin.com/in/lina"),
            SocialLink::new("instagram", "https://instagram.com/lina"),
        ],
        ..Profile::default()
    }
}

fn many_socials(count: usize) -> Profile {
    Profile {
        name: Some("Sami".to_string()),
        social_links: (0..count)
            .map(|i| SocialLink::new(format!("site{i}"), format!("https://example.com/{i}")))
            .collect(),
        ..Profile::default()
    }
}

#[test]
fn test_every_layout_renders() {
    let profile = full_profile();
    for layout in CardLayout::ALL {
        let card = render_card(&profile, &RenderConfig::new().with_layout(layout));
        assert_eq!(card.layout, layout);
        assert!(card.svg.contains("<svg xmlns"), "{layout} should produce svg");
        assert!(card.svg.contains("Lina Haddad"), "{layout} should show the name");
        assert!(card.hotspot("contact-phone").is_some(), "{layout} phone");
        assert!(card.hotspot("action-download").is_some(), "{layout} download");
        assert!(card.hotspot("action-share").is_some(), "{layout} share");
    }
}

#[test]
fn test_missing_contacts_are_omitted() {
    let profile = Profile {
        name: Some("Lina Haddad".to_string()),
        social_links: vec![SocialLink::new("email", "lina@example.com")],
        ..Profile::default()
    };
    for layout in CardLayout::ALL {
        let card = render_card(&profile, &RenderConfig::new().with_layout(layout));
        assert!(card.hotspot("contact-email").is_some());
        assert!(card.hotspot("contact-phone").is_none());
        assert!(card.hotspot("contact-whatsapp").is_none());
        assert!(!card.svg.contains(r#"id="contact-phone""#));
    }
}

#[test]
fn test_hidden_links_are_not_rendered() {
    let profile = Profile {
        social_links: vec![
            SocialLink::new("phone", "+1 555 0100").hidden(),
            SocialLink::new("github", "https://github.com/x").hidden(),
        ],
        ..Profile::default()
    };
    let card = render_card(&profile, &RenderConfig::new());
    assert!(card.hotspot("contact-phone").is_none());
    assert!(card.hotspot("social-0").is_none());
}

#[test]
fn test_social_cap_per_layout() {
    let profile = many_socials(10);
    for layout in CardLayout::ALL {
        let card = render_card(&profile, &RenderConfig::new().with_layout(layout));
        let socials = card
            .hotspots
            .iter()
            .filter(|h| h.id.starts_with("social-"))
            .count();
        assert_eq!(socials, layout.social_cap(), "{layout}");
    }
    assert_eq!(CardLayout::Classic.social_cap(), 6);
    assert_eq!(CardLayout::Modern.social_cap(), 8);
}

#[test]
fn test_fewer_socials_than_cap() {
    let card = render_card(&many_socials(2), &RenderConfig::new());
    let ids: Vec<&str> = card.hotspots.iter().map(|h| h.id.as_str()).collect();
    assert!(ids.contains(&"social-0"));
    assert!(ids.contains(&"social-1"));
    assert!(!ids.contains(&"social-2"));
}

#[test]
fn test_contact_hotspots_dispatch_through_callbacks() {
    let profile = full_profile();
    let card = render_card(&profile, &RenderConfig::new());
    let mut recorder = Recorder::default();

    for id in ["contact-phone", "contact-email", "contact-whatsapp", "social-0"] {
        assert!(card.trigger(id, &profile, None, &mut recorder), "{id}");
    }

    assert_eq!(
        recorder.events,
        vec![
            "call tel:+962791234567".to_string(),
            "email mailto:lina@example.com".to_string(),
            "whatsapp https://wa.me/962791234567".to_string(),
            "social linkedin https://linkedin.com/in/lina".to_string(),
        ]
    );
}

#[test]
fn test_download_and_share_actions() {
    let profile = Profile {
        profile_type: ProfileType::Business,
        ..full_profile()
    };
    let card = render_card(&profile, &RenderConfig::new());
    let mut recorder = Recorder::default();

    card.trigger("action-download", &profile, None, &mut recorder);
    card.trigger(
        "action-share",
        &profile,
        Some("https://cards.example.com/p/lina"),
        &mut recorder,
    );

    let vcard = recorder.vcard.expect("download should receive a vCard");
    assert!(vcard.starts_with("BEGIN:VCARD\r\n"));
    assert!(vcard.contains("FN:Lina Haddad\r\n"));
    assert!(vcard.contains("ORG:Northwind\r\n"));
    assert!(vcard.ends_with("END:VCARD\r\n"));

    let shared = recorder.shared.expect("share should receive a payload");
    assert_eq!(shared.title, "Lina Haddad");
    assert_eq!(shared.text, "Lina Haddad - Product Designer");
    assert_eq!(shared.url.as_deref(), Some("https://cards.example.com/p/lina"));
}

#[test]
fn test_hotspots_carry_no_links() {
    let card = render_card(&full_profile(), &RenderConfig::new());
    assert!(!card.svg.contains("href=\"tel:"));
    assert!(!card.svg.contains("href=\"mailto:"));
    assert!(card.svg.contains(r#"data-action="call""#));
    assert_eq!(
        card.hotspot("contact-whatsapp").map(|h| &h.action),
        Some(&CardAction::WhatsApp {
            href: "https://wa.me/962791234567".to_string()
        })
    );
}

#[test]
fn test_name_placeholder_for_empty_profile() {
    let card = render_card(&Profile::default(), &RenderConfig::new());
    assert!(card.svg.contains("Your Name"));
    assert!(card.svg.contains(r##"fill="#ffffff" font-size="45">YN</text>"##));
}

#[test]
fn test_accent_override() {
    let card = render_card(
        &full_profile(),
        &RenderConfig::new()
            .with_layout(CardLayout::Creative)
            .with_accent("#0f766e"),
    );
    assert!(card.svg.contains("--accent: #0f766e;"));
}

#[test]
fn test_malformed_accent_never_reaches_markup() {
    for layout in CardLayout::ALL {
        for accent in [r#"red" onload="alert(1)"#, "</style><script>x()</script>"] {
            let card = render_card(
                &full_profile(),
                &RenderConfig::new().with_layout(layout).with_accent(accent),
            );
            assert!(!card.svg.contains("onload"), "{layout}");
            assert!(!card.svg.contains("<script>"), "{layout}");
            assert!(
                card.svg
                    .contains(&format!("--accent: {};", layout.default_accent())),
                "{layout}"
            );
        }
    }
}

#[test]
fn test_layout_from_str() {
    assert_eq!("Corporate".parse::<CardLayout>(), Ok(CardLayout::Corporate));
    assert!("brutalist".parse::<CardLayout>().is_err());
}
