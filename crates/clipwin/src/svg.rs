//! SVG input - read subject polygons and clip regions drawn as SVG.
//!
//! Two entry points:
//! - `parse_path_data` takes a bare `d="..."` string (svgtypes)
//! - `extract_outlines` takes a whole SVG document (usvg resolves shapes,
//!   CSS and units, then we walk the tree)
//!
//! ## Curve Flattening
//!
//! Paths may contain Bézier curves. The clippers only understand straight
//! edges, so curves are flattened into line segments with lyon_geom.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};

use crate::error::ClipError;
use crate::geometry::Point;

/// Tolerance for curve flattening.
/// Lower = more points, smoother curves.
const CURVE_TOLERANCE: f64 = 0.1;

/// Consecutive points closer than this are merged.
const DUPLICATE_EPSILON: f64 = 1e-6;

/// Accumulates the first sub-path of a path as a vertex loop.
#[derive(Default)]
struct OutlineBuilder {
    points: Vec<Point>,
    current: Option<Point>,
}

impl OutlineBuilder {
    /// Start a sub-path. Returns `false` if one was already started, in
    /// which case the caller should stop: only the first sub-path is used.
    fn move_to(&mut self, to: Point) -> bool {
        if !self.points.is_empty() {
            return false;
        }
        self.points.push(to);
        self.current = Some(to);
        true
    }

    fn line_to(&mut self, to: Point) {
        self.points.push(to);
        self.current = Some(to);
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        let Some(from) = self.current else {
            self.line_to(to);
            return;
        };

        let curve = QuadraticBezierSegment {
            from: point(from.x, from.y),
            ctrl: point(ctrl.x, ctrl.y),
            to: point(to.x, to.y),
        };
        // Callback receives each flattened LineSegment; keep its endpoint.
        curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
            self.points.push(Point::new(segment.to.x, segment.to.y));
        });
        self.current = Some(to);
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let Some(from) = self.current else {
            self.line_to(to);
            return;
        };

        let curve = CubicBezierSegment {
            from: point(from.x, from.y),
            ctrl1: point(ctrl1.x, ctrl1.y),
            ctrl2: point(ctrl2.x, ctrl2.y),
            to: point(to.x, to.y),
        };
        curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
            self.points.push(Point::new(segment.to.x, segment.to.y));
        });
        self.current = Some(to);
    }

    /// Finished vertex loop without consecutive duplicates or a repeated
    /// closing vertex.
    fn finish(self) -> Vec<Point> {
        let mut points = self.points;

        points.dedup_by(|a, b| {
            (a.x - b.x).abs() < DUPLICATE_EPSILON && (a.y - b.y).abs() < DUPLICATE_EPSILON
        });

        if points.len() >= 2 {
            let first = points[0];
            let last = points[points.len() - 1];
            if first.distance(last) < DUPLICATE_EPSILON {
                points.pop();
            }
        }

        points
    }
}

/// Parse SVG path data (`d` attribute) into a vertex loop.
///
/// Relative commands, H/V and smooth curves are resolved by svgtypes. Only
/// the first sub-path is used.
pub fn parse_path_data(d: &str) -> Result<Vec<Point>, ClipError> {
    use svgtypes::SimplePathSegment;

    let mut builder = OutlineBuilder::default();

    for segment in svgtypes::SimplifyingPathParser::from(d) {
        let segment = segment.map_err(|e| ClipError::PathData(e.to_string()))?;

        match segment {
            SimplePathSegment::MoveTo { x, y } => {
                if !builder.move_to(Point::new(x, y)) {
                    break;
                }
            }
            SimplePathSegment::LineTo { x, y } => builder.line_to(Point::new(x, y)),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quad_to(Point::new(x1, y1), Point::new(x, y));
            }
            SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                builder.cubic_to(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y));
            }
            SimplePathSegment::ClosePath => {}
        }
    }

    let points = builder.finish();
    if points.len() < 3 {
        return Err(ClipError::TooFewVertices(points.len()));
    }
    Ok(points)
}

/// Extract one vertex loop per path element from an SVG document.
///
/// Shapes (`rect`, `circle`, `polygon`, ...) arrive as paths after usvg
/// resolves them. Paths that flatten to fewer than 3 points are skipped.
pub fn extract_outlines(svg_content: &str) -> Result<Vec<Vec<Point>>, ClipError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| ClipError::SvgParse(e.to_string()))?;

    let mut outlines = Vec::new();
    collect_from_group(tree.root(), &mut outlines);

    if outlines.is_empty() {
        Err(ClipError::NoOutlines)
    } else {
        Ok(outlines)
    }
}

fn collect_from_group(group: &usvg::Group, outlines: &mut Vec<Vec<Point>>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => collect_from_group(group, outlines),
            usvg::Node::Path(path) => {
                let points = path_outline(path);
                if points.len() >= 3 {
                    outlines.push(points);
                }
            }
            // Text, images: nothing to clip.
            _ => {}
        }
    }
}

fn path_outline(path: &usvg::Path) -> Vec<Point> {
    use usvg::tiny_skia_path::PathSegment;

    let to_point = |p: usvg::tiny_skia_path::Point| Point::new(p.x as f64, p.y as f64);
    let mut builder = OutlineBuilder::default();

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if !builder.move_to(to_point(p)) {
                    break;
                }
            }
            PathSegment::LineTo(p) => builder.line_to(to_point(p)),
            PathSegment::QuadTo(ctrl, p) => builder.quad_to(to_point(ctrl), to_point(p)),
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                builder.cubic_to(to_point(ctrl1), to_point(ctrl2), to_point(p));
            }
            PathSegment::Close => {}
        }
    }

    builder.finish()
}

// ============================================================================
// TESTS
// ============================================================================
