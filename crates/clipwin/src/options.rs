//! Clipping options.
//!
//! The plain `clip_line` / `clip_polygon` functions behave exactly like the
//! textbook algorithms: exact `== 0.0` parallel tests, no input validation.
//! The `*_with` variants take a `ClipOptions` so callers can opt into an
//! epsilon-tolerant zero test, entry validation, or a hard error on
//! degenerate intersections.

/// How "is this coefficient zero?" is decided.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ZeroTest {
    /// Literal `v == 0.0`. Fragile under rounding noise but reproducible.
    #[default]
    Exact,
    /// `|v| <= eps`.
    Tolerance(f64),
}

impl ZeroTest {
    #[inline]
    pub fn is_zero(self, v: f64) -> bool {
        match self {
            ZeroTest::Exact => v == 0.0,
            ZeroTest::Tolerance(eps) => v.abs() <= eps,
        }
    }
}

/// What to do when a polygon edge crossing has a zero denominator.
///
/// This only happens when the pair (s, p) was classified on opposite sides
/// of a clip edge while being parallel to it, i.e. through rounding or a
/// tolerance-mode zero test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelPolicy {
    /// Treat as "no intersection" and emit no vertex for it.
    #[default]
    Skip,
    /// Fail the call with `ClipError::ParallelIntersection`.
    Reject,
}

/// Options for `clip_line_with` and `clip_polygon_with`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipOptions {
    pub zero_test: ZeroTest,
    /// Check preconditions (window bounds, vertex count, region convexity)
    /// before clipping.
    pub validate: bool,
    pub on_parallel: ParallelPolicy,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            zero_test: ZeroTest::Exact,
            validate: true,
            on_parallel: ParallelPolicy::Skip,
        }
    }
}

impl ClipOptions {
    /// The behaviour of the plain `clip_line` / `clip_polygon` functions.
    pub fn reference() -> Self {
        Self {
            validate: false,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, eps: f64) -> Self {
        self.zero_test = ZeroTest::Tolerance(eps);
        self
    }

    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    pub fn rejecting_parallel(mut self) -> Self {
        self.on_parallel = ParallelPolicy::Reject;
        self
    }
}
