//! SVG renderer for profile cards
//!
//! This module paints a profile into one of the six card layouts and
//! produces an SVG string with CSS classes and `data-action` hotspots.

pub mod config;
pub mod layouts;
pub mod svg;

pub use config::SvgConfig;
pub use layouts::{paint, CardLayout, CardProps};
pub use svg::SvgBuilder;
