//! Sutherland-Hodgman polygon clipping against a convex region.
//!
//! The region is a list of directed `ClipEdge`s. The polygon is clipped by
//! each edge in turn: every pass walks the current vertex list as pairs
//! (previous `s`, current `p`) and keeps the part on the inside of the edge.
//!
//! ## Boundary convention
//!
//! A point is inside an edge only when it is STRICTLY to the left of it.
//! Vertices lying exactly on a clip edge are treated as outside and come
//! back as intersection points instead of being copied through.

use std::f64::consts::TAU;

use crate::error::ClipError;
use crate::geometry::{ClipEdge, Point, Rect};
use crate::options::{ClipOptions, ParallelPolicy, ZeroTest};

/// Slack allowed when checking that a region turns exactly once.
const TURN_TOLERANCE: f64 = 1e-9;

/// Strict inside test: `point` lies to the left of the directed `edge`.
#[inline]
pub fn inside(point: Point, edge: &ClipEdge) -> bool {
    let (x1, y1) = (edge.p1.x, edge.p1.y);
    let (x2, y2) = (edge.p2.x, edge.p2.y);
    (x2 - x1) * (point.y - y1) > (y2 - y1) * (point.x - x1)
}

/// Where segment `s -> p` crosses the infinite line through `edge`.
///
/// Returns `None` when the denominator is zero under `zero` (the segment is
/// parallel to the edge).
#[inline]
pub fn edge_intersection(s: Point, p: Point, edge: &ClipEdge, zero: ZeroTest) -> Option<Point> {
    let dx = p.x - s.x;
    let dy = p.y - s.y;
    let edge_dx = edge.dx();
    let edge_dy = edge.dy();

    let denom = dx * edge_dy - dy * edge_dx;
    if zero.is_zero(denom) {
        return None;
    }

    let t = ((edge.p1.x - s.x) * edge_dy - (edge.p1.y - s.y) * edge_dx) / denom;
    Some(Point::new(s.x + t * dx, s.y + t * dy))
}

/// Output of one clipping pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePass {
    pub points: Vec<Point>,
    /// Crossings dropped because their denominator was zero.
    pub skipped: usize,
}

/// Clip a vertex list against a single edge.
pub fn clip_to_edge(input: &[Point], edge: &ClipEdge, zero: ZeroTest) -> EdgePass {
    let Some(&last) = input.last() else {
        return EdgePass::default();
    };

    // At most one extra vertex per pass.
    let mut points = Vec::with_capacity(input.len() + 1);
    let mut skipped = 0;

    let mut s = last;
    let mut s_inside = inside(s, edge);

    for &p in input {
        let p_inside = inside(p, edge);

        if p_inside != s_inside {
            match edge_intersection(s, p, edge, zero) {
                Some(ix) => points.push(ix),
                None => skipped += 1,
            }
        }
        if p_inside {
            points.push(p);
        }

        s = p;
        s_inside = p_inside;
    }

    EdgePass { points, skipped }
}

/// Clip `polygon` to the convex `region`.
///
/// Exact zero tests, no validation. The caller must pass at least 3
/// vertices and a convex region whose edges wind counter-clockwise; anything
/// else gives unspecified (but never panicking) output. Zero denominators
/// are skipped. The result can be empty or degenerate (fewer than 3 points),
/// and keeps the winding of `polygon`.
pub fn clip_polygon(polygon: &[Point], region: &[ClipEdge]) -> Vec<Point> {
    let mut output = polygon.to_vec();

    for edge in region {
        if output.is_empty() {
            break;
        }
        output = clip_to_edge(&output, edge, ZeroTest::Exact).points;
    }

    output
}

/// Clip `polygon` to the convex `region` using `options`.
pub fn clip_polygon_with(
    polygon: &[Point],
    region: &[ClipEdge],
    options: &ClipOptions,
) -> Result<Vec<Point>, ClipError> {
    if options.validate {
        validate_polygon(polygon)?;
        validate_region(region)?;
    }

    let mut output = polygon.to_vec();

    for (index, edge) in region.iter().enumerate() {
        if output.is_empty() {
            break;
        }

        let pass = clip_to_edge(&output, edge, options.zero_test);
        if pass.skipped > 0 && options.on_parallel == ParallelPolicy::Reject {
            return Err(ClipError::ParallelIntersection { edge: index });
        }
        output = pass.points;
    }

    Ok(output)
}

/// Clip `polygon` to an axis-aligned window.
#[inline]
pub fn clip_polygon_to_rect(polygon: &[Point], window: Rect) -> Vec<Point> {
    clip_polygon(polygon, &window.clip_edges())
}

/// Check a subject polygon: at least 3 finite vertices.
pub fn validate_polygon(polygon: &[Point]) -> Result<(), ClipError> {
    if polygon.len() < 3 {
        return Err(ClipError::TooFewVertices(polygon.len()));
    }
    if !polygon.iter().all(Point::is_finite) {
        return Err(ClipError::NonFiniteCoordinate);
    }
    Ok(())
}

/// Check a clip region: at least 3 finite, non-zero-length edges that turn
/// left (or go straight) at every step, enclose some area and wind exactly
/// once.
///
/// The turning sum catches self-overlapping loops such as a pentagram, which
/// turn left everywhere but wrap around twice.
pub fn validate_region(region: &[ClipEdge]) -> Result<(), ClipError> {
    let n = region.len();
    if n < 3 {
        return Err(ClipError::TooFewEdges(n));
    }
    if !region.iter().all(|e| e.p1.is_finite() && e.p2.is_finite()) {
        return Err(ClipError::NonFiniteCoordinate);
    }
    if let Some(index) = region.iter().position(ClipEdge::is_degenerate) {
        return Err(ClipError::ZeroLengthEdge(index));
    }

    let mut total_turn = 0.0;
    let mut first_right_turn: Option<usize> = None;
    let mut any_left_turn = false;

    for i in 0..n {
        let next = (i + 1) % n;
        let a = region[i].direction();
        let b = region[next].direction();

        let cross = a.cross(b);
        let dot = a.x * b.x + a.y * b.y;
        total_turn += cross.atan2(dot);

        if cross > 0.0 {
            any_left_turn = true;
        } else if cross < 0.0 && first_right_turn.is_none() {
            first_right_turn = Some(next);
        }
    }

    match first_right_turn {
        Some(_) if !any_left_turn => return Err(ClipError::ClockwiseRegion),
        Some(index) => return Err(ClipError::NonConvexRegion(index)),
        // Straight or doubling back everywhere: no area.
        None if !any_left_turn => return Err(ClipError::DegenerateRegion),
        None => {}
    }

    if (total_turn - TAU).abs() > TURN_TOLERANCE {
        return Err(ClipError::NonConvexRegion(0));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
