use chrono::NaiveDate;
use regex::Regex;

use chronoline_core::{Direction, Event, Timestamp};
use chronoline_render::{
    base_theme, export_svg, CssRule, Stylesheet, TimelineChart, TimelineOptions,
};

fn at(h: u32, m: u32, s: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 3, 14)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn demo_events() -> Vec<Event> {
    vec![
        Event::new(at(9, 0, 12), "standup"),
        Event::new(at(9, 41, 0), "code review"),
        Event::new(at(11, 15, 33), "deploy"),
        Event::new(at(11, 15, 33), "rollback"),
    ]
}

fn rendered() -> String {
    let mut chart = TimelineChart::new(TimelineOptions::default());
    let svg = chart.render(&demo_events());
    export_svg(&svg, &[base_theme()])
}

#[test]
fn svg_export_is_deterministic() {
    let a = rendered();
    let b = rendered();
    assert_eq!(a, b, "SVG bytes differ between identical renders");
}

#[test]
fn exported_document_is_namespaced() {
    let out = rendered();
    assert!(out.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));

    // no bare xlink attribute and no serializer-numbered href names
    assert!(!Regex::new(r"[^:]xlink=").unwrap().is_match(&out));
    assert!(!Regex::new(r"NS\d+:href").unwrap().is_match(&out));
}

#[test]
fn theme_rules_are_inlined_for_rendered_classes() {
    let out = rendered();
    assert!(out.contains("<style type=\"text/css\">"));
    assert!(out.contains(".timeline-chart {"));
    assert!(out.contains(".timeline-dot {"));
    assert!(out.contains(".timeline-label {"));
}

#[test]
fn unrelated_and_inaccessible_sheets_do_not_leak() {
    let mut chart = TimelineChart::new(TimelineOptions::default());
    let svg = chart.render(&demo_events());
    let sheets = [
        Stylesheet::inaccessible(),
        Stylesheet::from_rules([
            CssRule::new("#chart", "background: #fafafa;"),
            CssRule::new(".sidebar", "display: none;"),
        ]),
    ];
    let out = export_svg(&svg, &sheets);
    assert!(out.contains("#chart { background: #fafafa; }"));
    assert!(!out.contains(".sidebar"));
}

#[test]
fn every_direction_renders_and_exports() {
    for direction in [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ] {
        let mut chart = TimelineChart::new(TimelineOptions {
            direction,
            ..TimelineOptions::default()
        });
        let svg = chart.render(&demo_events());
        let out = export_svg(&svg, &[base_theme()]);
        assert!(out.starts_with("<svg"), "direction {direction:?}");
        assert!(out.matches("timeline-dot").count() >= 4);
    }
}

#[test]
fn label_growth_expands_the_canvas() {
    let mut chart = TimelineChart::new(TimelineOptions {
        initial_width: 64.0,
        initial_height: 64.0,
        ..TimelineOptions::default()
    });
    chart.render(&[Event::new(at(9, 0, 1), "a very long event label indeed")]);
    let dims = chart.dimensions();
    assert!(dims.width > 64.0);
}
