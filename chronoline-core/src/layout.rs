//! Label placement along the time axis.
//!
//! The chart consumes layout through the [`LayoutEngine`] capability; any
//! implementation may be substituted. [`ForceLayout`] is the default: ideal
//! positions come from the time scale, then overlapping labels are pushed
//! apart along the axis in a single forward pass.

use serde::{Deserialize, Serialize};

use crate::event::Timestamp;
use crate::geometry::Margin;
use crate::scale::TimeScale;

/// Axis orientation: the direction the timeline grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether time runs along the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// One label to place: its instant and measured extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelInput {
    pub time: Timestamp,
    pub width: f32,
    pub height: f32,
}

/// A placed node. Position `(x, y)` and extent `(dx, dy)` are relative to
/// the margin-inset origin on the axis line; for `up` and `left` the label
/// box extends into negative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    /// Position along the axis where the event's instant falls; the dot and
    /// the link anchor here even when the label was displaced.
    pub ideal: f32,
}

/// The layout collaborator consumed by the chart.
pub trait LayoutEngine {
    /// Bind a new label set and recompute placement.
    fn bind(&mut self, labels: &[LabelInput]);

    /// Resize the canvas and recompute placement for the bound labels.
    fn set_dimensions(&mut self, width: f32, height: f32);

    /// Placed nodes, in bind order.
    fn nodes(&self) -> &[Node];
}

// Separation kept between neighboring labels along the axis.
const LABEL_SEPARATION: f32 = 2.0;

/// Default label placer: ideal positions, then a forward relaxation pass so
/// no two labels overlap along the axis.
#[derive(Debug)]
pub struct ForceLayout {
    direction: Direction,
    margin: Margin,
    width: f32,
    height: f32,
    label_offset: f32,
    labels: Vec<LabelInput>,
    nodes: Vec<Node>,
}

impl ForceLayout {
    pub fn new(
        direction: Direction,
        margin: Margin,
        width: f32,
        height: f32,
        label_offset: f32,
    ) -> Self {
        Self {
            direction,
            margin,
            width,
            height,
            label_offset,
            labels: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Length of the time axis inside the margins.
    pub fn axis_length(&self) -> f32 {
        let len = if self.direction.is_horizontal() {
            self.width - self.margin.left - self.margin.right
        } else {
            self.height - self.margin.top - self.margin.bottom
        };
        len.max(1.0)
    }

    fn relayout(&mut self) {
        self.nodes.clear();
        if self.labels.is_empty() {
            return;
        }

        let first = self.labels[0].time;
        let lo = self.labels.iter().map(|l| l.time).min().unwrap_or(first);
        let hi = self.labels.iter().map(|l| l.time).max().unwrap_or(first);
        let scale = TimeScale::new((lo, hi), (0.0, self.axis_length()));

        let ideals: Vec<f32> = self.labels.iter().map(|l| scale.map(l.time)).collect();
        let extents: Vec<f32> = self
            .labels
            .iter()
            .map(|l| {
                if self.direction.is_horizontal() {
                    l.width
                } else {
                    l.height
                }
            })
            .collect();

        // push overlapping labels forward, front to back in axis order
        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        order.sort_by(|&a, &b| ideals[a].total_cmp(&ideals[b]));
        let mut centers = ideals.clone();
        let mut cursor = f32::NEG_INFINITY;
        for &i in &order {
            let half = extents[i] / 2.0;
            if centers[i] - half < cursor {
                centers[i] = cursor + half;
            }
            cursor = centers[i] + half + LABEL_SEPARATION;
        }

        self.nodes = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let along = centers[i] - extents[i] / 2.0;
                let mut node = Node {
                    dx: label.width,
                    dy: label.height,
                    ideal: ideals[i],
                    ..Default::default()
                };
                match self.direction {
                    Direction::Right => {
                        node.x = self.label_offset;
                        node.y = along;
                    }
                    Direction::Left => {
                        node.x = -(self.label_offset + label.width);
                        node.y = along;
                    }
                    Direction::Down => {
                        node.x = along;
                        node.y = self.label_offset;
                    }
                    Direction::Up => {
                        node.x = along;
                        node.y = -(self.label_offset + label.height);
                    }
                }
                node
            })
            .collect();
    }
}

impl LayoutEngine for ForceLayout {
    fn bind(&mut self, labels: &[LabelInput]) {
        self.labels = labels.to_vec();
        self.relayout();
    }

    fn set_dimensions(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn label(time: Timestamp) -> LabelInput {
        LabelInput {
            time,
            width: 60.0,
            height: 14.0,
        }
    }

    fn layout(direction: Direction) -> ForceLayout {
        ForceLayout::new(direction, Margin::default(), 640.0, 640.0, 16.0)
    }

    #[test]
    fn test_empty_bind_yields_no_nodes() {
        let mut engine = layout(Direction::Right);
        engine.bind(&[]);
        assert!(engine.nodes().is_empty());
    }

    #[test]
    fn test_right_direction_node_shape() {
        let mut engine = layout(Direction::Right);
        engine.bind(&[label(t(9, 0, 0)), label(t(10, 0, 0))]);
        let nodes = engine.nodes();
        assert_eq!(nodes.len(), 2);

        // labels sit to the right of the axis, first at the range start
        for node in nodes {
            assert_eq!(node.x, 16.0);
            assert_eq!(node.dx, 60.0);
            assert_eq!(node.dy, 14.0);
        }
        assert!(nodes[0].y < nodes[1].y);
        assert_eq!(nodes[1].ideal, engine.axis_length());
    }

    #[test]
    fn test_up_direction_extends_negative() {
        let mut engine = layout(Direction::Up);
        engine.bind(&[label(t(9, 0, 0))]);
        let node = engine.nodes()[0];
        assert_eq!(node.y, -(16.0 + 14.0));
    }

    #[test]
    fn test_left_direction_extends_negative() {
        let mut engine = layout(Direction::Left);
        engine.bind(&[label(t(9, 0, 0))]);
        let node = engine.nodes()[0];
        assert_eq!(node.x, -(16.0 + 60.0));
    }

    #[test]
    fn test_coincident_labels_do_not_overlap() {
        let mut engine = layout(Direction::Right);
        engine.bind(&[label(t(9, 0, 0)), label(t(9, 0, 0)), label(t(9, 0, 0))]);
        let mut ys: Vec<f32> = engine.nodes().iter().map(|n| n.y).collect();
        ys.sort_by(f32::total_cmp);
        for pair in ys.windows(2) {
            assert!(pair[1] >= pair[0] + 14.0, "labels overlap: {pair:?}");
        }
    }

    #[test]
    fn test_set_dimensions_relayouts() {
        let mut engine = layout(Direction::Right);
        engine.bind(&[label(t(9, 0, 0)), label(t(10, 0, 0))]);
        let before = engine.nodes()[1].ideal;
        engine.set_dimensions(640.0, 1240.0);
        let after = engine.nodes()[1].ideal;
        assert!(after > before);
    }
}
