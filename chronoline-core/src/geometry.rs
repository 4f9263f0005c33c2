//! Chart geometry: margins, dimensions, and the auto-fit policy.

use crate::layout::{Direction, Node};

/// Whitespace kept around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            bottom: 20.0,
            left: 40.0,
            right: 20.0,
        }
    }
}

/// Canvas size. Derived on every render, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Resize the chart to exactly fit the placed nodes, never shrinking below
/// the initial dimensions.
///
/// The time axis reads each node's trailing edge, except for `up` and `left`
/// where labels extend into negative coordinates and the leading value
/// already is the far edge; the cross axis always reads the trailing edge.
/// An empty node set contributes 0 per candidate before margins.
pub fn fit_to_nodes(
    nodes: &[Node],
    direction: Direction,
    margin: &Margin,
    initial: Dimensions,
) -> Dimensions {
    let h_margin = margin.left + margin.right;
    let v_margin = margin.top + margin.bottom;

    let (width, height) = match direction {
        Direction::Up => (
            max_abs(nodes, |n| n.x + n.dx) + h_margin,
            max_abs(nodes, |n| n.y) + v_margin,
        ),
        Direction::Down => (
            max_abs(nodes, |n| n.x + n.dx) + h_margin,
            max_abs(nodes, |n| n.y + n.dy) + v_margin,
        ),
        Direction::Left => (
            max_abs(nodes, |n| n.x) + h_margin,
            max_abs(nodes, |n| n.y + n.dy) + v_margin,
        ),
        Direction::Right => (
            max_abs(nodes, |n| n.x + n.dx) + h_margin,
            max_abs(nodes, |n| n.y + n.dy) + v_margin,
        ),
    };

    Dimensions {
        width: width.max(initial.width),
        height: height.max(initial.height),
    }
}

fn max_abs(nodes: &[Node], f: impl Fn(&Node) -> f32) -> f32 {
    nodes.iter().map(|n| f(n).abs()).fold(0.0, f32::max)
}
