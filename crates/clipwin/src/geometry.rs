//! Core geometry types for clipwin.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! Every type here is a small value: `#[derive(Clone, Copy)]` means it is
//! copied on assignment instead of moved, so the clipping functions can take
//! their inputs by value without the caller losing anything.

use crate::error::ClipError;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment from `p1` to `p2`.
///
/// The direction matters for the parametrization `P(u) = p1 + u * (p2 - p1)`,
/// not for whether a clipped result is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

/// Axis-aligned clip window.
///
/// Well formed when `xmin <= xmax` and `ymin <= ymax`. `Rect::new` does not
/// check this; use `Rect::try_new` or `Rect::from_corners` at input
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// One directed boundary edge of a convex clip region.
///
/// The inside of the edge is the half-plane strictly to its left, so a
/// region built from these edges must wind counter-clockwise (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipEdge {
    pub p1: Point,
    pub p2: Point,
}

/// Orientation of a closed vertex loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    /// Zero signed area: fewer than 3 vertices or all collinear.
    Degenerate,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Z component of the cross product of `self` and `other` taken as vectors.
    #[inline]
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Segment {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    /// Point at parameter `u` along the segment.
    ///
    /// Evaluated as `x1 + u * (x2 - x1)` so that results are reproducible
    /// bit for bit against the same formula written by hand.
    #[inline]
    pub fn point_at(&self, u: f64) -> Point {
        Point::new(self.p1.x + u * self.dx(), self.p1.y + u * self.dy())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p1.is_finite() && self.p2.is_finite()
    }
}

impl Rect {
    /// Create a window without checking the bounds.
    #[inline]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    /// Create a window, rejecting inverted or non-finite bounds.
    pub fn try_new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, ClipError> {
        let rect = Self::new(xmin, ymin, xmax, ymax);
        if rect.is_well_formed() {
            Ok(rect)
        } else {
            Err(ClipError::InvalidWindow { xmin, ymin, xmax, ymax })
        }
    }

    /// Build a window from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Finite bounds with `xmin <= xmax` and `ymin <= ymax`.
    pub fn is_well_formed(&self) -> bool {
        [self.xmin, self.ymin, self.xmax, self.ymax]
            .iter()
            .all(|v| v.is_finite())
            && self.xmin <= self.xmax
            && self.ymin <= self.ymax
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Corners in counter-clockwise order starting at (xmin, ymin).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.xmin, self.ymin),
            Point::new(self.xmax, self.ymin),
            Point::new(self.xmax, self.ymax),
            Point::new(self.xmin, self.ymax),
        ]
    }

    /// The window as a counter-clockwise clip region.
    ///
    /// Edge order is bottom, right, top, left.
    pub fn clip_edges(&self) -> [ClipEdge; 4] {
        let [bl, br, tr, tl] = self.corners();
        [
            ClipEdge::new(bl, br),
            ClipEdge::new(br, tr),
            ClipEdge::new(tr, tl),
            ClipEdge::new(tl, bl),
        ]
    }
}

impl ClipEdge {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    /// Direction vector as a point.
    #[inline]
    pub fn direction(&self) -> Point {
        Point::new(self.dx(), self.dy())
    }

    /// Zero-length edge. Such an edge has no inside half-plane.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

// ============================================================================
// VERTEX LOOP HELPERS
// ============================================================================

/// Close a vertex loop into directed clip edges (last vertex back to first).
///
/// ## Rust Lesson #14: Iterators & zip
///
/// `points.iter().zip(points.iter().cycle().skip(1))` pairs every vertex with
/// its successor, wrapping the last one around to the first.
pub fn region_from_vertices(points: &[Point]) -> Vec<ClipEdge> {
    if points.len() < 2 {
        return Vec::new();
    }

    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| ClipEdge::new(*a, *b))
        .collect()
}

/// Signed area using the shoelace formula.
///
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// Unsigned polygon area.
#[inline]
pub fn area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Orientation of a closed vertex loop.
pub fn winding(points: &[Point]) -> Winding {
    let a = signed_area(points);
    if a > 0.0 {
        Winding::CounterClockwise
    } else if a < 0.0 {
        Winding::Clockwise
    } else {
        Winding::Degenerate
    }
}

/// Bounding box of a vertex list, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some(Rect::new(min_x, min_y, max_x, max_y))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn segment_point_at_endpoints() {
        let seg = Segment::from_coords(1.0, 2.0, 8.0, 4.0);
        assert_eq!(seg.point_at(0.0), seg.p1);
        assert_eq!(seg.point_at(1.0), seg.p2);
        assert_eq!(seg.length(), (53.0f64).sqrt());
    }

    #[test]
    fn rect_try_new_rejects_inverted_bounds() {
        assert!(Rect::try_new(2.0, 2.0, 7.0, 6.0).is_ok());
        assert!(matches!(
            Rect::try_new(7.0, 2.0, 2.0, 6.0),
            Err(ClipError::InvalidWindow { .. })
        ));
        assert!(Rect::try_new(0.0, f64::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn rect_from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(7.0, 6.0), Point::new(2.0, 2.0));
        assert_eq!(r, Rect::new(2.0, 2.0, 7.0, 6.0));
        assert_eq!(r.width(), 5.0);
        assert_eq!(r.height(), 4.0);
    }

    #[test]
    fn rect_clip_edges_are_bottom_right_top_left() {
        let edges = Rect::new(2.0, 2.0, 7.0, 6.0).clip_edges();
        assert_eq!(edges[0], ClipEdge::from_coords(2.0, 2.0, 7.0, 2.0));
        assert_eq!(edges[1], ClipEdge::from_coords(7.0, 2.0, 7.0, 6.0));
        assert_eq!(edges[2], ClipEdge::from_coords(7.0, 6.0, 2.0, 6.0));
        assert_eq!(edges[3], ClipEdge::from_coords(2.0, 6.0, 2.0, 2.0));
    }

    #[test]
    fn rect_contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(r.contains(Point::new(0.0, 1.0)));
        assert!(!r.contains(Point::new(1.0001, 0.5)));
    }

    #[test]
    fn region_from_vertices_wraps() {
        let edges = region_from_vertices(&square());
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].p1, Point::new(0.0, 10.0));
        assert_eq!(edges[3].p2, Point::new(0.0, 0.0));
        assert!(region_from_vertices(&[Point::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn signed_area_and_winding() {
        let ccw = square();
        assert_eq!(signed_area(&ccw), 100.0);
        assert_eq!(winding(&ccw), Winding::CounterClockwise);

        let cw: Vec<Point> = ccw.iter().rev().copied().collect();
        assert_eq!(signed_area(&cw), -100.0);
        assert_eq!(winding(&cw), Winding::Clockwise);
        assert_eq!(area(&cw), 100.0);

        let line = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(winding(&line), Winding::Degenerate);
    }

    #[test]
    fn bounding_box_of_points() {
        assert_eq!(bounding_box(&square()), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(bounding_box(&[]), None);
    }
}
