//! # clipwin
//!
//! Line and polygon clipping against a window.
//!
//! - `clip_line`: Liang-Barsky parametric clipping of a segment to an
//!   axis-aligned rectangle
//! - `clip_polygon`: Sutherland-Hodgman clipping of a polygon to a convex
//!   region given as counter-clockwise directed edges
//!
//! Both are pure functions over small `Copy` values and are safe to call from
//! any number of threads. The `*_with` variants take `ClipOptions` for input
//! validation and an epsilon-tolerant zero test.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod error;
pub mod geometry;
pub mod line_clip;
pub mod options;
pub mod polygon_clip;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use error::ClipError;
pub use geometry::{
    area, bounding_box, region_from_vertices, signed_area, winding, ClipEdge, Point, Rect, Segment,
    Winding,
};
pub use line_clip::{clip_line, clip_line_with, clip_lines};
pub use options::{ClipOptions, ParallelPolicy, ZeroTest};
pub use polygon_clip::{
    clip_polygon, clip_polygon_to_rect, clip_polygon_with, validate_polygon, validate_region,
};
pub use svg::{extract_outlines, parse_path_data};
