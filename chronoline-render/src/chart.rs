//! The timeline chart: configuration surface and render pipeline.
//!
//! The chart binds an event snapshot to a layout engine, auto-fits the
//! canvas to the placed nodes, and builds the SVG element tree. Placement
//! itself is owned by the engine; this module only supplies its inputs and
//! consumes its outputs.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Timelike;

use chronoline_core::{
    fit_to_nodes, Dimensions, Direction, Event, ForceLayout, LabelInput, LayoutEngine, Margin,
    Node, OrdinalScale, TimeScale, Timestamp,
};

use crate::dom::{SvgElement, SVG_NS};

// Estimated glyph advance for label sizing; no font rasterizer in scope.
const CHAR_WIDTH: f32 = 7.2;
const LABEL_HEIGHT: f32 = 14.0;
const LABEL_PAD_X: f32 = 4.0;
const DOT_RADIUS: f32 = 3.0;
const TICK_SIZE: f32 = 6.0;
const TICK_COUNT: usize = 6;

pub type TextFn = Box<dyn Fn(&Event) -> String>;
pub type TimeFn = Box<dyn Fn(&Event) -> Timestamp>;
pub type ColorFn = Box<dyn FnMut(&Event) -> String>;
pub type AxisFormatFn = Box<dyn Fn(&Timestamp) -> String>;

/// Configuration surface of the chart. Defaults reproduce the stock
/// behavior: `HH:MM:SS -> name` labels, `HH:MM` ticks, and one shared
/// seconds-keyed ordinal scale behind all three color functions.
pub struct TimelineOptions {
    pub direction: Direction,
    pub initial_width: f32,
    pub initial_height: f32,
    pub margin: Margin,
    /// Gap between the axis line and each label box.
    pub label_offset: f32,
    pub text_fn: TextFn,
    pub time_fn: TimeFn,
    pub dot_color: ColorFn,
    pub label_bg_color: ColorFn,
    pub link_color: ColorFn,
    pub format_axis: AxisFormatFn,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        let scale = Rc::new(RefCell::new(OrdinalScale::category10()));
        Self {
            direction: Direction::Right,
            initial_width: 640.0,
            initial_height: 640.0,
            margin: Margin::default(),
            label_offset: 16.0,
            text_fn: Box::new(|e| format!("{} -> {}", e.time.format("%H:%M:%S"), e.name)),
            time_fn: Box::new(|e| e.time),
            dot_color: seconds_color(Rc::clone(&scale)),
            label_bg_color: seconds_color(Rc::clone(&scale)),
            link_color: seconds_color(scale),
            format_axis: Box::new(|t| t.format("%H:%M").to_string()),
        }
    }
}

/// Color an event by the seconds component of its time. Zero seconds falls
/// back to the empty-string key, which the ordinal scale treats as an
/// ordinary key.
fn seconds_color(scale: Rc<RefCell<OrdinalScale>>) -> ColorFn {
    Box::new(move |event: &Event| {
        let seconds = event.time.second();
        let key = if seconds == 0 {
            String::new()
        } else {
            seconds.to_string()
        };
        scale.borrow_mut().scale(&key)
    })
}

/// The rendered timeline: options, a layout engine, and the current canvas
/// size (floored at the initial size captured on construction).
pub struct TimelineChart {
    options: TimelineOptions,
    layout: Box<dyn LayoutEngine>,
    initial: Dimensions,
    width: f32,
    height: f32,
}

impl TimelineChart {
    pub fn new(options: TimelineOptions) -> Self {
        let layout = ForceLayout::new(
            options.direction,
            options.margin,
            options.initial_width,
            options.initial_height,
            options.label_offset,
        );
        Self::with_layout(options, Box::new(layout))
    }

    /// Substitute a different layout engine.
    pub fn with_layout(options: TimelineOptions, layout: Box<dyn LayoutEngine>) -> Self {
        let initial = Dimensions::new(options.initial_width, options.initial_height);
        Self {
            width: initial.width,
            height: initial.height,
            options,
            layout,
            initial,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Bind an event snapshot to the layout engine.
    pub fn data(&mut self, events: &[Event]) -> &mut Self {
        let labels: Vec<LabelInput> = events
            .iter()
            .map(|e| {
                let text = (self.options.text_fn)(e);
                LabelInput {
                    time: (self.options.time_fn)(e),
                    width: label_width(&text),
                    height: LABEL_HEIGHT,
                }
            })
            .collect();
        self.layout.bind(&labels);
        self
    }

    /// Auto-fit the canvas to the placed nodes, never below the initial
    /// size, and hand the new dimensions back to the engine.
    pub fn expand_or_shrink_to_initial(&mut self) -> &mut Self {
        let fitted = fit_to_nodes(
            self.layout.nodes(),
            self.options.direction,
            &self.options.margin,
            self.initial,
        );
        self.width = fitted.width;
        self.height = fitted.height;
        self.layout.set_dimensions(fitted.width, fitted.height);
        self
    }

    /// Full pipeline: bind, auto-fit, build the SVG tree.
    pub fn render(&mut self, events: &[Event]) -> SvgElement {
        self.data(events).expand_or_shrink_to_initial();
        self.build_svg(events)
    }

    fn build_svg(&mut self, events: &[Event]) -> SvgElement {
        let direction = self.options.direction;
        let margin = self.options.margin;
        let nodes: Vec<Node> = self.layout.nodes().to_vec();

        // the axis origin inside the canvas; labels grow away from it
        let (origin_x, origin_y) = match direction {
            Direction::Right | Direction::Down => (margin.left, margin.top),
            Direction::Left => (self.width - margin.right, margin.top),
            Direction::Up => (margin.left, self.height - margin.bottom),
        };

        let axis_len = if direction.is_horizontal() {
            (self.width - margin.left - margin.right).max(1.0)
        } else {
            (self.height - margin.top - margin.bottom).max(1.0)
        };

        let mut plot = SvgElement::new("g").attr("class", "chart-root").attr(
            "transform",
            format!("translate({},{})", coord(origin_x), coord(origin_y)),
        );
        plot.push_child(self.build_axis(events, direction, axis_len));
        plot.push_child(self.build_links(events, &nodes, direction));
        plot.push_child(self.build_dots(events, &nodes, direction));
        plot.push_child(self.build_labels(events, &nodes));

        SvgElement::new("svg")
            .attr("id", "chart")
            .attr("class", "timeline-chart")
            .attr("xmlns", SVG_NS)
            .attr("width", coord(self.width))
            .attr("height", coord(self.height))
            .child(plot)
    }

    fn build_axis(&self, events: &[Event], direction: Direction, axis_len: f32) -> SvgElement {
        let mut axis = SvgElement::new("g").attr("class", "axis");

        let line = if direction.is_horizontal() {
            ("0", coord(axis_len), "0", "0".to_string())
        } else {
            ("0", "0".to_string(), "0", coord(axis_len))
        };
        axis.push_child(
            SvgElement::new("line")
                .attr("class", "axis-line")
                .attr("x1", line.0)
                .attr("x2", line.1)
                .attr("y1", line.2)
                .attr("y2", line.3),
        );

        if events.is_empty() {
            return axis;
        }

        let times: Vec<Timestamp> = events.iter().map(|e| (self.options.time_fn)(e)).collect();
        let lo = times.iter().min().copied().unwrap_or(times[0]);
        let hi = times.iter().max().copied().unwrap_or(times[0]);
        let scale = TimeScale::new((lo, hi), (0.0, axis_len));

        // tick marks point away from the labels
        for tick in scale.ticks(TICK_COUNT) {
            let pos = scale.map(tick);
            let text = (self.options.format_axis)(&tick);
            let mut mark = SvgElement::new("line").attr("class", "tick");
            let mut label = SvgElement::new("text").attr("class", "tick-label").text(text);
            match direction {
                Direction::Right => {
                    mark = mark
                        .attr("x1", coord(-TICK_SIZE))
                        .attr("x2", "0")
                        .attr("y1", coord(pos))
                        .attr("y2", coord(pos));
                    label = label
                        .attr("x", coord(-TICK_SIZE - 2.0))
                        .attr("y", coord(pos))
                        .attr("text-anchor", "end");
                }
                Direction::Left => {
                    mark = mark
                        .attr("x1", "0")
                        .attr("x2", coord(TICK_SIZE))
                        .attr("y1", coord(pos))
                        .attr("y2", coord(pos));
                    label = label
                        .attr("x", coord(TICK_SIZE + 2.0))
                        .attr("y", coord(pos))
                        .attr("text-anchor", "start");
                }
                Direction::Down => {
                    mark = mark
                        .attr("x1", coord(pos))
                        .attr("x2", coord(pos))
                        .attr("y1", coord(-TICK_SIZE))
                        .attr("y2", "0");
                    label = label
                        .attr("x", coord(pos))
                        .attr("y", coord(-TICK_SIZE - 2.0))
                        .attr("text-anchor", "middle");
                }
                Direction::Up => {
                    mark = mark
                        .attr("x1", coord(pos))
                        .attr("x2", coord(pos))
                        .attr("y1", "0")
                        .attr("y2", coord(TICK_SIZE));
                    label = label
                        .attr("x", coord(pos))
                        .attr("y", coord(TICK_SIZE + 10.0))
                        .attr("text-anchor", "middle");
                }
            }
            axis.push_child(mark);
            axis.push_child(label);
        }

        axis
    }

    fn build_links(
        &mut self,
        events: &[Event],
        nodes: &[Node],
        direction: Direction,
    ) -> SvgElement {
        let mut links = SvgElement::new("g").attr("class", "links");
        for (event, node) in events.iter().zip(nodes) {
            let color = (self.options.link_color)(event);
            let (x1, y1, x2, y2) = match direction {
                Direction::Right => (0.0, node.ideal, node.x, node.y + node.dy / 2.0),
                Direction::Left => (0.0, node.ideal, node.x + node.dx, node.y + node.dy / 2.0),
                Direction::Down => (node.ideal, 0.0, node.x + node.dx / 2.0, node.y),
                Direction::Up => (node.ideal, 0.0, node.x + node.dx / 2.0, node.y + node.dy),
            };
            links.push_child(
                SvgElement::new("line")
                    .attr("class", "timeline-link")
                    .attr("x1", coord(x1))
                    .attr("y1", coord(y1))
                    .attr("x2", coord(x2))
                    .attr("y2", coord(y2))
                    .attr("stroke", color),
            );
        }
        links
    }

    fn build_dots(&mut self, events: &[Event], nodes: &[Node], direction: Direction) -> SvgElement {
        let mut dots = SvgElement::new("g").attr("class", "dots");
        for (event, node) in events.iter().zip(nodes) {
            let color = (self.options.dot_color)(event);
            let (cx, cy) = if direction.is_horizontal() {
                (node.ideal, 0.0)
            } else {
                (0.0, node.ideal)
            };
            dots.push_child(
                SvgElement::new("circle")
                    .attr("class", "timeline-dot")
                    .attr("cx", coord(cx))
                    .attr("cy", coord(cy))
                    .attr("r", coord(DOT_RADIUS))
                    .attr("fill", color),
            );
        }
        dots
    }

    fn build_labels(&mut self, events: &[Event], nodes: &[Node]) -> SvgElement {
        let mut labels = SvgElement::new("g").attr("class", "labels");
        for (event, node) in events.iter().zip(nodes) {
            let background = (self.options.label_bg_color)(event);
            let text = (self.options.text_fn)(event);
            labels.push_child(
                SvgElement::new("g")
                    .attr("class", "timeline-label")
                    .child(
                        SvgElement::new("rect")
                            .attr("x", coord(node.x))
                            .attr("y", coord(node.y))
                            .attr("width", coord(node.dx))
                            .attr("height", coord(node.dy))
                            .attr("fill", background),
                    )
                    .child(
                        SvgElement::new("text")
                            .attr("class", "timeline-label-text")
                            .attr("x", coord(node.x + LABEL_PAD_X))
                            .attr("y", coord(node.y + node.dy / 2.0))
                            .text(text),
                    ),
            );
        }
        labels
    }
}

fn label_width(text: &str) -> f32 {
    text.chars().count() as f32 * CHAR_WIDTH + 2.0 * LABEL_PAD_X
}

fn coord(v: f32) -> String {
    format!("{v}")
}
