//! Error type for clipwin.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Geometric absence (a segment outside the window) is NOT an error, it is an
//! `Option::None` or an empty `Vec`. `ClipError` only covers inputs that break
//! a precondition, and numeric degeneracies when the caller asked to be told
//! about them.

/// Error type for validated clipping and input parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipError {
    /// Window bounds are inverted or not finite.
    InvalidWindow { xmin: f64, ymin: f64, xmax: f64, ymax: f64 },
    /// An input coordinate is NaN or infinite.
    NonFiniteCoordinate,
    /// A polygon needs at least 3 vertices.
    TooFewVertices(usize),
    /// A clip region needs at least 3 edges.
    TooFewEdges(usize),
    /// Clip edge at this index has zero length.
    ZeroLengthEdge(usize),
    /// Clip region winds clockwise; edges must keep the inside on their left.
    ClockwiseRegion,
    /// Clip region encloses no area (all vertices on one line).
    DegenerateRegion,
    /// Clip region turns the wrong way at this edge, or winds more than once.
    NonConvexRegion(usize),
    /// Zero denominator while intersecting with the clip edge at this index.
    ParallelIntersection { edge: usize },
    /// Malformed SVG path data.
    PathData(String),
    /// SVG document could not be parsed.
    SvgParse(String),
    /// No usable outline (3+ points) in the input.
    NoOutlines,
}

impl std::fmt::Display for ClipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipError::InvalidWindow { xmin, ymin, xmax, ymax } => write!(
                f,
                "invalid clip window ({}, {})-({}, {}): need xmin <= xmax and ymin <= ymax",
                xmin, ymin, xmax, ymax
            ),
            ClipError::NonFiniteCoordinate => write!(f, "coordinate is NaN or infinite"),
            ClipError::TooFewVertices(n) => {
                write!(f, "polygon has {} vertices, need at least 3", n)
            }
            ClipError::TooFewEdges(n) => {
                write!(f, "clip region has {} edges, need at least 3", n)
            }
            ClipError::ZeroLengthEdge(i) => write!(f, "clip edge {} has zero length", i),
            ClipError::ClockwiseRegion => {
                write!(f, "clip region is clockwise, expected counter-clockwise edges")
            }
            ClipError::DegenerateRegion => {
                write!(f, "clip region is degenerate: all vertices are collinear")
            }
            ClipError::NonConvexRegion(i) => write!(f, "clip region is not convex at edge {}", i),
            ClipError::ParallelIntersection { edge } => write!(
                f,
                "segment is parallel to clip edge {} but crosses it (zero denominator)",
                edge
            ),
            ClipError::PathData(msg) => write!(f, "path data error: {}", msg),
            ClipError::SvgParse(msg) => write!(f, "SVG parse error: {}", msg),
            ClipError::NoOutlines => write!(f, "no outlines with at least 3 points found"),
        }
    }
}

impl std::error::Error for ClipError {}
