//! Pointer/box geometry and edge hit testing

use serde::{Deserialize, Serialize};

/// Distance in pixels within which a pointer counts as "on" an edge
pub const EDGE_MARGIN: f64 = 6.0;

/// A pointer position in the host's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in the host's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies inside the box (edges inclusive)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Which edges of a box a pointer is within [`EDGE_MARGIN`] of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }
}

/// Test a pointer against a cell box's edges
pub fn hit_edges(point: Point, rect: Rect) -> EdgeHits {
    if !rect.contains(point) {
        return EdgeHits::default();
    }
    EdgeHits {
        left: (point.x - rect.x).abs() <= EDGE_MARGIN,
        right: (rect.right() - point.x).abs() <= EDGE_MARGIN,
        top: (point.y - rect.y).abs() <= EDGE_MARGIN,
        bottom: (rect.bottom() - point.y).abs() <= EDGE_MARGIN,
    }
}

/// The cursor the host should show while hovering a resize-sensitive edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeCursor {
    Column,
    Row,
    Corner,
}

impl ResizeCursor {
    /// CSS cursor keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            ResizeCursor::Column => "col-resize",
            ResizeCursor::Row => "row-resize",
            ResizeCursor::Corner => "nwse-resize",
        }
    }

    /// Classify edge hits into a cursor, if any edge is active
    pub fn from_hits(hits: EdgeHits) -> Option<Self> {
        match (hits.horizontal(), hits.vertical()) {
            (true, true) => Some(ResizeCursor::Corner),
            (true, false) => Some(ResizeCursor::Column),
            (false, true) => Some(ResizeCursor::Row),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_edges_right() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hits = hit_edges(Point::new(96.0, 25.0), rect);
        assert!(hits.right);
        assert!(!hits.left && !hits.top && !hits.bottom);
    }

    #[test]
    fn test_hit_edges_corner() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hits = hit_edges(Point::new(98.0, 47.0), rect);
        assert!(hits.right && hits.bottom);
        assert_eq!(ResizeCursor::from_hits(hits), Some(ResizeCursor::Corner));
    }

    #[test]
    fn test_hit_outside_rect_is_nothing() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hits = hit_edges(Point::new(103.0, 25.0), rect);
        assert!(!hits.any());
    }

    #[test]
    fn test_interior_point_no_cursor() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hits = hit_edges(Point::new(50.0, 25.0), rect);
        assert_eq!(ResizeCursor::from_hits(hits), None);
    }
}
