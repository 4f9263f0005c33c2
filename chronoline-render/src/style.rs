//! CSS rules and stylesheets consumed by the exporter.

use thiserror::Error;

/// A stylesheet refused to expose its rules (the cross-origin analog). The
/// exporter skips such sheets instead of aborting.
#[derive(Error, Debug)]
#[error("stylesheet rules are not accessible")]
pub struct InaccessibleStylesheet;

/// One CSS rule: a selector and its declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    selector: String,
    declarations: String,
}

impl CssRule {
    pub fn new(selector: impl Into<String>, declarations: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: declarations.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The full rule text, selector and block.
    pub fn css_text(&self) -> String {
        format!("{} {{ {} }}", self.selector, self.declarations)
    }
}

/// An ordered list of rules. Rule access can fail wholesale, which models a
/// sheet the document may reference but not inspect.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    rules: Vec<CssRule>,
    accessible: bool,
}

impl Stylesheet {
    pub fn from_rules(rules: impl IntoIterator<Item = CssRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            accessible: true,
        }
    }

    /// A sheet whose rule list cannot be inspected.
    pub fn inaccessible() -> Self {
        Self {
            rules: Vec::new(),
            accessible: false,
        }
    }

    pub fn rules(&self) -> Result<&[CssRule], InaccessibleStylesheet> {
        if self.accessible {
            Ok(&self.rules)
        } else {
            Err(InaccessibleStylesheet)
        }
    }
}

/// The built-in chart theme. Selector-per-class rules so the exporter can
/// inline exactly what the rendered tree references.
pub fn base_theme() -> Stylesheet {
    Stylesheet::from_rules([
        CssRule::new(
            ".timeline-chart",
            "font-family: sans-serif; font-size: 12px; background: #ffffff;",
        ),
        CssRule::new(".axis-line", "stroke: #222222; stroke-width: 1; fill: none;"),
        CssRule::new(".tick", "stroke: #222222; stroke-width: 1;"),
        CssRule::new(
            ".tick-label",
            "fill: #444444; font-size: 10px; font-family: sans-serif;",
        ),
        CssRule::new(".timeline-dot", "stroke: none;"),
        CssRule::new(".timeline-link", "stroke-width: 1; fill: none;"),
        CssRule::new(".timeline-label", "stroke: none;"),
        CssRule::new(
            ".timeline-label-text",
            "fill: #ffffff; dominant-baseline: middle;",
        ),
    ])
}
