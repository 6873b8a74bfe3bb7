//! SVG generation for cards

use super::SvgConfig;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    pub fn width(&self) -> f64 {
        self.config.width
    }

    pub fn height(&self) -> f64 {
        self.config.height
    }

    /// Add CSS custom properties, written in the given order
    pub fn add_css_variables(&mut self, variables: &[(&str, String)]) {
        let mut css = String::from(":root {\n");
        for (token, value) in variables {
            css.push_str(&format!("    --{}: {};\n", token, escape_xml(value)));
        }
        css.push_str("  }");
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class_list(&self, base: &str, classes: &[&str]) -> String {
        let prefix = self.prefix();
        std::iter::once(format!("{}{}", prefix, base))
            .chain(classes.iter().map(|c| format!("{}{}", prefix, c)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a vertical or angled two-stop gradient definition
    pub fn add_linear_gradient(&mut self, id: &str, angle_deg: f64, stops: &[(f64, &str, f64)]) {
        // CSS angles run clockwise from "to top"; convert to SVG vector endpoints
        let radians = angle_deg.to_radians();
        let (dx, dy) = (radians.sin() / 2.0, -radians.cos() / 2.0);
        let stops_str = stops
            .iter()
            .map(|(offset, color, opacity)| {
                format!(
                    r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                    offset,
                    escape_xml(color),
                    opacity
                )
            })
            .collect::<Vec<_>>()
            .join("");
        self.defs.push(format!(
            r#"<linearGradient id="{}" x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}">{}</linearGradient>"#,
            id,
            0.5 - dx,
            0.5 - dy,
            0.5 + dx,
            0.5 + dy,
            stops_str
        ));
    }

    /// Add a circular clip path definition
    pub fn add_circle_clip(&mut self, id: &str, cx: f64, cy: f64, r: f64) {
        self.defs.push(format!(
            r#"<clipPath id="{}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
            id, cx, cy, r
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(
        &mut self,
        id: Option<&str>,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        classes: &[&str],
        styles: &str,
    ) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = self.class_list("rect", classes);
        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            x,
            y,
            w,
            h,
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, id: Option<&str>, cx: f64, cy: f64, r: f64, classes: &[&str], styles: &str) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = self.class_list("circle", classes);
        self.elements.push(format!(
            r#"{}<circle{} class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            cx,
            cy,
            r,
            styles
        ));
    }

    /// Add an image element stretched to cover its box
    pub fn add_image(
        &mut self,
        id: Option<&str>,
        href: &str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        clip: Option<&str>,
    ) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let clip_attr = clip
            .map(|c| format!(r#" clip-path="url(#{})""#, c))
            .unwrap_or_default();
        let class_list = self.class_list("image", &[]);
        self.elements.push(format!(
            r#"{}<image{} class="{}" href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice"{}/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            escape_xml(href),
            x,
            y,
            w,
            h,
            clip_attr
        ));
    }

    /// Add a text element
    #[allow(clippy::too_many_arguments)]
    pub fn add_text(
        &mut self,
        id: Option<&str>,
        text: &str,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        classes: &[&str],
        styles: &str,
    ) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = self.class_list("text", classes);
        self.elements.push(format!(
            r#"{}<text{} class="{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle"{}>{}</text>"#,
            self.indent_str(),
            id_attr,
            class_list,
            x,
            y,
            anchor.as_str(),
            styles,
            escape_xml(text)
        ));
    }

    /// Open an interactive group tagged with an action name
    pub fn start_hotspot(&mut self, id: &str, action: &str, label: &str) {
        let class_list = self.class_list("hotspot", &[]);
        self.elements.push(format!(
            r#"{}<g id="{}" class="{}" data-action="{}" role="button" tabindex="0" aria-label="{}">"#,
            self.indent_str(),
            id,
            class_list,
            action,
            escape_xml(label)
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.config.width, self.config.height, self.config.width, self.config.height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("  ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Format fill/stroke attributes
pub fn fill(color: &str) -> String {
    format!(r#" fill="{}""#, escape_xml(color))
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_css_variables_are_escaped() {
        let mut builder = SvgBuilder::new(SvgConfig::default());
        builder.add_css_variables(&[("accent", "</style><script>".to_string())]);
        let svg = builder.build();
        assert!(svg.contains("--accent: &lt;/style&gt;&lt;script&gt;;"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_build_empty_card() {
        let builder = SvgBuilder::new(SvgConfig {
            width: 100.0,
            height: 200.0,
            ..SvgConfig::default()
        });
        let svg = builder.build();
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"viewBox="0 0 100 200""#));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_hotspot_group() {
        let mut builder = SvgBuilder::new(SvgConfig::default().with_pretty_print(false));
        builder.start_hotspot("slot-call", "call", "Call +1 555");
        builder.add_circle(None, 10.0, 10.0, 5.0, &["icon"], &fill("#fff"));
        builder.end_group();
        let svg = builder.build();
        assert!(svg.contains(
            r#"<g id="slot-call" class="card-hotspot" data-action="call" role="button" tabindex="0" aria-label="Call +1 555">"#
        ));
        assert!(svg.contains(r##"<circle class="card-circle card-icon" cx="10" cy="10" r="5" fill="#fff"/>"##));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut builder = SvgBuilder::new(SvgConfig {
            class_prefix: None,
            ..SvgConfig::default()
        });
        builder.add_text(Some("name"), "Tom & Jerry", 0.0, 0.0, TextAnchor::Middle, &["name"], "");
        let svg = builder.build();
        assert!(svg.contains(r#"<text id="name" class="text name""#));
        assert!(svg.contains(">Tom &amp; Jerry</text>"));
    }

    #[test]
    fn test_vertical_gradient_endpoints() {
        let mut builder = SvgBuilder::new(SvgConfig::default());
        builder.add_linear_gradient("g", 180.0, &[(0.0, "#000", 0.1), (1.0, "#000", 0.3)]);
        let svg = builder.build();
        assert!(svg.contains(r#"x1="0.500" y1="0.000" x2="0.500" y2="1.000""#));
    }
}
