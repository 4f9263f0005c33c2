//! Chronoline rendering
//!
//! Builds the timeline chart as an owned SVG element tree and exports it as
//! a self-contained SVG document with inlined styles.

pub mod chart;
pub mod dom;
pub mod export;
pub mod style;

pub use chart::{TimelineChart, TimelineOptions};
pub use dom::{SvgElement, SVG_NS, XLINK_NS};
pub use export::export_svg;
pub use style::{base_theme, CssRule, Stylesheet};
