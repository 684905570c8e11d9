//! Liang-Barsky parametric line clipping against an axis-aligned window.
//!
//! The segment is written as `P(u) = P1 + u * (P2 - P1)` for `u` in `[0, 1]`.
//! Each window side gives one constraint `u * p_i <= q_i`; the visible part
//! is whatever interval of `u` survives all four.

use crate::error::ClipError;
use crate::geometry::{Rect, Segment};
use crate::options::{ClipOptions, ZeroTest};

/// Parameter interval `(u1, u2)` of the part of `segment` inside `window`.
///
/// Returns `None` when nothing is visible. Constraint order is left, right,
/// bottom, top.
pub fn liang_barsky_params(segment: Segment, window: Rect, zero: ZeroTest) -> Option<(f64, f64)> {
    let dx = segment.dx();
    let dy = segment.dy();
    let (x1, y1) = (segment.p1.x, segment.p1.y);

    let p = [-dx, dx, -dy, dy];
    let q = [
        x1 - window.xmin,
        window.xmax - x1,
        y1 - window.ymin,
        window.ymax - y1,
    ];

    let mut u1 = 0.0_f64;
    let mut u2 = 1.0_f64;

    for (&p_i, &q_i) in p.iter().zip(q.iter()) {
        if zero.is_zero(p_i) {
            // Parallel to this side: either fully outside it, or the side
            // does not constrain u at all.
            if q_i < 0.0 {
                return None;
            }
        } else {
            let t = q_i / p_i;
            if p_i < 0.0 {
                u1 = u1.max(t);
            } else {
                u2 = u2.min(t);
            }
        }
    }

    if u1 > u2 {
        None
    } else {
        Some((u1, u2))
    }
}

/// Clip a segment to the window.
///
/// Uses exact zero tests and performs no validation: `window` must satisfy
/// `xmin <= xmax` and `ymin <= ymax`, otherwise the result is unspecified.
/// A zero-length segment is kept iff its point lies in the window
/// (boundary included).
#[inline]
pub fn clip_line(segment: Segment, window: Rect) -> Option<Segment> {
    liang_barsky_params(segment, window, ZeroTest::Exact)
        .map(|(u1, u2)| Segment::new(segment.point_at(u1), segment.point_at(u2)))
}

/// Clip a segment to the window using `options`.
///
/// With `options.validate` the window bounds and segment coordinates are
/// checked first and a violation is returned as an error instead of an
/// unspecified result.
pub fn clip_line_with(
    segment: Segment,
    window: Rect,
    options: &ClipOptions,
) -> Result<Option<Segment>, ClipError> {
    if options.validate {
        if !window.is_well_formed() {
            return Err(ClipError::InvalidWindow {
                xmin: window.xmin,
                ymin: window.ymin,
                xmax: window.xmax,
                ymax: window.ymax,
            });
        }
        if !segment.is_finite() {
            return Err(ClipError::NonFiniteCoordinate);
        }
    }

    Ok(liang_barsky_params(segment, window, options.zero_test)
        .map(|(u1, u2)| Segment::new(segment.point_at(u1), segment.point_at(u2))))
}

/// Clip many segments to one window, keeping the visible parts in input order.
pub fn clip_lines(segments: &[Segment], window: Rect) -> Vec<Segment> {
    // filter_map drops the `None`s (fully clipped segments) for free.
    segments
        .iter()
        .filter_map(|seg| clip_line(*seg, window))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
