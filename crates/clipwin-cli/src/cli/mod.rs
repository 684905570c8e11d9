//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `line` - Clip segments to a window
//! - `polygon` - Clip polygons to a window or convex region
//! - `scene` - Clip a batch described in a YAML/JSON file
//! - `demo` - Run the built-in example scene

pub mod common;
pub mod demo;
pub mod line;
pub mod polygon;
pub mod scene;

pub use demo::cmd_demo;
pub use line::cmd_line;
pub use polygon::cmd_polygon;
pub use scene::cmd_scene;
