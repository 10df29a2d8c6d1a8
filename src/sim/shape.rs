//! Shape classifier and triangle geometry
//!
//! Classification compares gems by identity, never by coordinates.
//! Containment uses edge signs with a tolerance instead of comparing
//! floating-point area sums for equality.

use glam::Vec2;

use super::board::Board;
use super::connector::Segment;
use super::state::{Marker, MarkerId};
use crate::cross2;

/// Edge tolerance, in board units
pub const EDGE_EPSILON: f32 = 1e-3;

/// A recognized path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One segment between two same-kind gems
    Pair([MarkerId; 2]),
    /// Three segments closing a cycle through three same-kind gems
    Triangle([MarkerId; 3]),
}

/// Both ends of a segment as live gems
fn endpoints<'a>(segment: &Segment, board: &'a Board) -> Option<(&'a Marker, &'a Marker)> {
    let from = board.get(segment.from.marker?)?;
    let to = board.get(segment.to.marker?)?;
    Some((from, to))
}

/// Classify a released path. Any other segment count or a malformed chain
/// is `None`.
pub fn classify(segments: &[Segment], board: &Board) -> Option<Shape> {
    match segments {
        [segment] => {
            let (a, b) = endpoints(segment, board)?;
            (a.id != b.id && a.kind == b.kind).then_some(Shape::Pair([a.id, b.id]))
        }
        [s0, s1, s2] => {
            let (a, b) = endpoints(s0, board)?;
            let (b2, c) = endpoints(s1, board)?;
            let (c2, a2) = endpoints(s2, board)?;

            let closed = b.id == b2.id && c.id == c2.id && a.id == a2.id;
            let distinct = a.id != b.id && b.id != c.id && c.id != a.id;
            let same_kind = a.kind == b.kind && b.kind == c.kind;
            (closed && distinct && same_kind).then_some(Shape::Triangle([a.id, b.id, c.id]))
        }
        _ => None,
    }
}

pub fn is_pair(segments: &[Segment], board: &Board) -> bool {
    matches!(classify(segments, board), Some(Shape::Pair(_)))
}

pub fn is_triangle(segments: &[Segment], board: &Board) -> bool {
    matches!(classify(segments, board), Some(Shape::Triangle(_)))
}

/// A triangle in board space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    pub fn area(&self) -> f32 {
        cross2(self.a, self.b, self.c).abs() / 2.0
    }

    fn longest_edge(&self) -> f32 {
        self.a
            .distance(self.b)
            .max(self.b.distance(self.c))
            .max(self.c.distance(self.a))
    }

    /// Collinear (or coincident) vertices enclose nothing
    pub fn is_degenerate(&self) -> bool {
        let longest = self.longest_edge();
        // Height over the longest edge below tolerance
        longest <= EDGE_EPSILON || 2.0 * self.area() / longest <= EDGE_EPSILON
    }

    /// Check whether `p` lies inside or on the triangle
    pub fn contains(&self, p: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        // Orient so that inside means every edge sign is non-negative
        let orientation = cross2(self.a, self.b, self.c).signum();
        let tolerance = EDGE_EPSILON * self.longest_edge();
        [
            cross2(self.a, self.b, p),
            cross2(self.b, self.c, p),
            cross2(self.c, self.a, p),
        ]
        .iter()
        .all(|d| d * orientation >= -tolerance)
    }
}
