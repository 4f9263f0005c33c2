//! Self-contained SVG export with inlined styles.

use regex::Regex;

use crate::dom::{SvgElement, XLINK_NS};
use crate::style::Stylesheet;

/// Serialize a rendered subtree as a standalone SVG document string.
///
/// Applicable CSS rules are inlined into a style element inserted as the
/// root's first child; stylesheets whose rules cannot be inspected are
/// skipped. Two serialization quirks are rewritten afterwards: a root-level
/// `xlink` attribute missing its namespace prefix, and `NS<digits>:href`
/// attribute names.
pub fn export_svg(root: &SvgElement, stylesheets: &[Stylesheet]) -> String {
    let mut root = root.clone();
    root.set_attr("xlink", XLINK_NS);

    let css_text = collect_css(&root, stylesheets);
    let style = SvgElement::new("style")
        .attr("type", "text/css")
        .text(css_text);
    root.insert_child(0, style);

    let fixed = fix_namespaces(&root.to_svg_string());
    log::debug!("exported svg: {fixed}");
    fixed
}

/// Candidate selectors of the subtree: the root's id and classes, then every
/// descendant's, each at most once in first-encounter order.
fn collect_selectors(root: &SvgElement) -> Vec<String> {
    let mut selectors = Vec::new();
    // the root id is added unconditionally, present or not
    selectors.push(format!("#{}", root.id().unwrap_or_default()));
    for class in root.classes() {
        push_unique(&mut selectors, format!(".{class}"));
    }
    for el in root.descendants() {
        push_unique(&mut selectors, format!("#{}", el.id().unwrap_or_default()));
        for class in el.classes() {
            push_unique(&mut selectors, format!(".{class}"));
        }
    }
    selectors
}

fn push_unique(selectors: &mut Vec<String>, candidate: String) {
    if !selectors.contains(&candidate) {
        selectors.push(candidate);
    }
}

/// Concatenate the text of every rule whose selector exactly matches a
/// candidate, in stylesheet and rule encounter order.
fn collect_css(root: &SvgElement, stylesheets: &[Stylesheet]) -> String {
    let selectors = collect_selectors(root);
    let mut out = String::new();
    for sheet in stylesheets {
        let rules = match sheet.rules() {
            Ok(rules) => rules,
            // the cross-origin analog: skip the sheet, keep exporting
            Err(_) => continue,
        };
        for rule in rules {
            if selectors.iter().any(|s| s == rule.selector()) {
                out.push_str(&rule.css_text());
            }
        }
    }
    out
}

fn fix_namespaces(serialized: &str) -> String {
    let xlink_fix = Regex::new(r"(\w+)?:?xlink=").expect("hard-coded pattern");
    let href_fix = Regex::new(r"NS\d+:href").expect("hard-coded pattern");
    let pass = xlink_fix.replace_all(serialized, "xmlns:xlink=");
    href_fix.replace_all(&pass, "xlink:href").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::CssRule;

    fn tree() -> SvgElement {
        SvgElement::new("svg")
            .attr("id", "chart")
            .attr("class", "node")
            .child(
                SvgElement::new("g")
                    .attr("class", "labels node")
                    .child(SvgElement::new("text").attr("id", "title")),
            )
    }

    #[test]
    fn test_selector_collection_order_and_dedup() {
        let selectors = collect_selectors(&tree());
        assert_eq!(selectors, ["#chart", ".node", "#", ".labels", "#title"]);
    }

    #[test]
    fn test_xlink_rewrites() {
        let fixed = fix_namespaces(r##"<svg xlink="http://www.w3.org/1999/xlink"><use NS1:href="#a"/></svg>"##);
        assert!(fixed.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert!(fixed.contains(r##"xlink:href="#a""##));
        assert!(!fixed.contains("NS1:href"));
    }

    #[test]
    fn test_rewrites_are_idempotent() {
        let once = fix_namespaces(r#"<svg xlink="x"/>"#);
        assert_eq!(fix_namespaces(&once), once);
    }

    #[test]
    fn test_style_is_first_child() {
        let out = export_svg(&tree(), &[]);
        assert!(out.starts_with("<svg"));
        let style_at = out.find("<style").unwrap();
        let g_at = out.find("<g").unwrap();
        assert!(style_at < g_at);
    }

    #[test]
    fn test_matching_rules_inlined_unrelated_excluded() {
        let sheet = Stylesheet::from_rules([
            CssRule::new("#chart", "background: white;"),
            CssRule::new(".node", "fill: blue;"),
            CssRule::new(".unrelated", "fill: red;"),
        ]);
        let out = export_svg(&tree(), &[sheet]);
        assert!(out.contains("#chart { background: white; }"));
        assert!(out.contains(".node { fill: blue; }"));
        assert!(!out.contains(".unrelated"));
    }

    #[test]
    fn test_inaccessible_sheet_is_skipped() {
        let sheets = [
            Stylesheet::inaccessible(),
            Stylesheet::from_rules([CssRule::new("#chart", "background: white;")]),
        ];
        let out = export_svg(&tree(), &sheets);
        assert!(out.contains("#chart { background: white; }"));
    }
}
