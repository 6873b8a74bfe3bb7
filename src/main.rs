//! Card Studio CLI
//!
//! Usage:
//!   card-studio [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render   Render a profile JSON file to an SVG card
//!   vcard    Export a profile as a vCard
//!   cart     Print the totals of a cart JSON file
//!   listing  List everything the signed-in user owns
//!   menu     Show a public digital menu
//!   upload   Upload a profile image or logo
//!   toggle   Flip an asset's active status
//!   delete   Delete an asset
//!   me       Show the signed-in user
//!
//! Backend commands read the session token from `CARD_STUDIO_TOKEN`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use card_studio::api::{ApiClient, AssetKind, Session, UploadFile};
use card_studio::checkout::{format_price, Cart};
use card_studio::config::ClientConfig;
use card_studio::contacts::ContactSlots;
use card_studio::menu::MenuView;
use card_studio::vcard::{build_vcard, vcard_file_name};
use card_studio::{render_card, CardLayout, Profile, RenderConfig, SvgConfig, TemplateCatalog};

/// Environment variable holding the backend session token
const TOKEN_ENV: &str = "CARD_STUDIO_TOKEN";

#[derive(Parser)]
#[command(name = "card-studio")]
#[command(about = "Digital business cards, menus and orders")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a profile JSON file to an SVG card
    Render {
        /// Profile JSON file
        #[arg(short, long)]
        profile: PathBuf,
        /// Template id overriding the profile's
        #[arg(short, long)]
        template: Option<String>,
        /// Layout overriding the template's
        #[arg(short, long)]
        layout: Option<CardLayout>,
        /// Template catalog file (TOML format)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Accent colour, e.g. #0f766e
        #[arg(long)]
        accent: Option<String>,
        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a profile as a vCard
    Vcard {
        /// Profile JSON file
        #[arg(short, long)]
        profile: PathBuf,
        /// Write to the suggested file name instead of stdout
        #[arg(short, long)]
        save: bool,
    },
    /// Print the totals of a cart JSON file
    Cart {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// List profiles, products and menus, newest first
    Listing,
    /// Show a public digital menu
    Menu {
        slug: String,
        /// Only show items matching this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Upload a PNG or JPG image
    Upload {
        file: PathBuf,
        /// Upload as a business logo instead of a profile image
        #[arg(long)]
        logo: bool,
    },
    /// Flip an asset's active status
    Toggle { kind: AssetKind, id: String },
    /// Delete an asset
    Delete { kind: AssetKind, id: String },
    /// Show the signed-in user
    Me,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match ClientConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(format!("Error loading config: {}", e)),
    };

    match cli.command {
        Command::Render {
            profile,
            template,
            layout,
            catalog,
            accent,
            output,
        } => {
            let mut profile = read_profile(&profile);
            if template.is_some() {
                profile.template = template;
            }
            let catalog_path = catalog.or_else(|| config.render.catalog.clone());
            let catalog = match catalog_path {
                Some(path) => match TemplateCatalog::from_file(&path) {
                    Ok(catalog) => catalog,
                    Err(e) => fail(format!("Error loading catalog '{}': {}", path.display(), e)),
                },
                None => TemplateCatalog::builtin(),
            };
            if let Some(id) = profile.template_id() {
                if !catalog.contains(id) {
                    tracing::warn!(
                        template = id,
                        known = %catalog.ids().join(", "),
                        "unknown template, using the classic layout"
                    );
                }
            }

            let mut render_config = RenderConfig::new()
                .with_catalog(catalog)
                .with_svg(SvgConfig::new().with_pretty_print(config.render.pretty_print));
            if let Some(accent) = accent {
                render_config = render_config.with_accent(accent);
            }
            if let Some(layout) = layout {
                render_config = render_config.with_layout(layout);
            }

            let card = render_card(&profile, &render_config);
            tracing::info!(
                layout = card.layout.as_str(),
                hotspots = card.hotspots.len(),
                "card rendered"
            );
            write_output(output.as_deref(), &card.svg);
        }
        Command::Vcard { profile, save } => {
            let profile = read_profile(&profile);
            let vcard = build_vcard(&profile, &ContactSlots::from_profile(&profile));
            if save {
                let name = vcard_file_name(&profile);
                write_output(Some(Path::new(&name)), &vcard);
                println!("Saved {}", name);
            } else {
                print!("{}", vcard);
            }
        }
        Command::Cart { file } => {
            let cart: Cart = match serde_json::from_str(&read_file(&file)) {
                Ok(cart) => cart,
                Err(e) => fail(format!("Error parsing cart '{}': {}", file.display(), e)),
            };
            if let Err(e) = cart.validate() {
                fail(format!("Error: {}", e));
            }
            let currency = &config.checkout.currency;
            for item in &cart.items {
                println!(
                    "{:>3} x {:<30} {:>14}",
                    item.quantity,
                    item.name,
                    format_price(item.line_total(), currency)
                );
            }
            println!("Total: {}", cart.formatted_total(currency));
        }
        Command::Listing => {
            let client = client(&config);
            match client.unified_listing().await {
                Ok(entries) if entries.is_empty() => println!("Nothing here yet."),
                Ok(entries) => {
                    for entry in entries {
                        let created = entry
                            .created_at
                            .map(|at| at.format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "{:<8} {:<10} {:<8} {} ({})",
                            entry.kind.label(),
                            created,
                            if entry.active { "active" } else { "inactive" },
                            entry.title,
                            entry.id
                        );
                    }
                }
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Command::Menu { slug, search } => {
            let client = client(&config);
            let document = match client.fetch_menu(&slug).await {
                Ok(Some(document)) => document,
                Ok(None) => fail(format!("Menu '{}' not found", slug)),
                Err(e) => fail(format!("Error: {}", e)),
            };
            let view = MenuView::from_document(&document);
            println!("{}", view.name);
            if let Some(description) = &view.description {
                println!("{}", description);
            }
            if view.is_empty() {
                println!("No items available right now.");
                return;
            }
            match search {
                Some(query) => {
                    for (category, item) in view.search(&query) {
                        println!("  [{}] {}  {}", category.name, item.name, view.price_label(item));
                    }
                }
                None => {
                    for category in &view.categories {
                        println!("\n{}", category.name);
                        for item in &category.items {
                            println!("  {}  {}", item.name, view.price_label(item));
                        }
                    }
                }
            }
        }
        Command::Upload { file, logo } => {
            let upload = match UploadFile::from_path(&file) {
                Ok(upload) => upload,
                Err(e) => fail(format!("Error: {}", e)),
            };
            let client = client(&config);
            let result = if logo {
                client.upload_logo(&upload).await
            } else {
                client.upload_profile_image(&upload).await
            };
            match result {
                Ok(uploaded) => println!("{}", uploaded.url),
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Command::Toggle { kind, id } => {
            let client = client(&config);
            match client.toggle_status(kind, &id).await {
                Ok(Some(true)) => println!("{} {} is now active", kind.label(), id),
                Ok(Some(false)) => println!("{} {} is now inactive", kind.label(), id),
                Ok(None) => println!("{} {} toggled", kind.label(), id),
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Command::Delete { kind, id } => {
            let client = client(&config);
            match client.delete_asset(kind, &id).await {
                Ok(()) => println!("Deleted {} {}", kind.label().to_lowercase(), id),
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Command::Me => {
            let client = client(&config);
            match client.me().await {
                Ok(me) => match serde_json::to_string_pretty(&me) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(format!("Error: {}", e)),
                },
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn client(config: &ClientConfig) -> ApiClient {
    let session = std::env::var(TOKEN_ENV)
        .map(Session::with_token)
        .unwrap_or_default();
    match ApiClient::from_config(config, session) {
        Ok(client) => client,
        Err(e) => fail(format!("Error: {}", e)),
    }
}

fn read_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(format!("Error reading file '{}': {}", path.display(), e)),
    }
}

fn read_profile(path: &Path) -> Profile {
    match Profile::from_json(&read_file(path)) {
        Ok(profile) => profile,
        Err(e) => fail(format!("Error parsing profile '{}': {}", path.display(), e)),
    }
}

fn write_output(path: Option<&Path>, content: &str) {
    match path {
        Some(path) => {
            if let Err(e) = fs::write(path, content) {
                fail(format!("Error writing '{}': {}", path.display(), e));
            }
        }
        None => println!("{}", content),
    }
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
