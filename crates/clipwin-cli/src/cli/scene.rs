//! Scene files: a window, segments and polygons to clip, as YAML or JSON.
//!
//! ```yaml
//! name: example
//! window: [2, 2, 7, 6]
//! segments:
//!   - [1, 2, 8, 4]
//! polygons:
//!   - name: quad
//!     points: [[3, 3], [5, 8], [8, 5], [6, 2]]
//! options:
//!   epsilon: 1e-9
//! ```
//!
//! Polygons are clipped against `region` when given, otherwise against the
//! window.

use std::path::Path;

use serde::{Deserialize, Serialize};

use clipwin::{
    area, clip_line_with, clip_polygon_with, parse_path_data, region_from_vertices, ClipEdge,
    ClipOptions, Point, Rect, Segment,
};

use super::common::{
    emit_report, read_input, to_points, OutputSettings, PolygonResult, Report, SegmentResult,
};

/// A complete clipping job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: Option<String>,

    /// `[xmin, ymin, xmax, ymax]`
    #[serde(default)]
    pub window: Option<[f64; 4]>,

    /// Convex clip region vertices, counter-clockwise.
    #[serde(default)]
    pub region: Option<Vec<[f64; 2]>>,

    /// `[x1, y1, x2, y2]` each.
    #[serde(default)]
    pub segments: Vec<[f64; 4]>,

    #[serde(default)]
    pub polygons: Vec<ScenePolygon>,

    #[serde(default)]
    pub options: SceneOptions,
}

/// A subject polygon, as vertices or SVG path data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenePolygon {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub points: Vec<[f64; 2]>,

    /// SVG `d` string, used when `points` is empty.
    #[serde(default)]
    pub path: Option<String>,
}

/// Kernel options as written in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneOptions {
    #[serde(default)]
    pub epsilon: Option<f64>,

    #[serde(default = "default_validate")]
    pub validate: bool,

    #[serde(default)]
    pub reject_parallel: bool,
}

fn default_validate() -> bool {
    true
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            epsilon: None,
            validate: true,
            reject_parallel: false,
        }
    }
}

impl SceneOptions {
    pub fn to_clip_options(&self) -> ClipOptions {
        let mut options = ClipOptions::default();
        if let Some(eps) = self.epsilon {
            options = options.with_tolerance(eps);
        }
        if self.reject_parallel {
            options = options.rejecting_parallel();
        }
        if !self.validate {
            options = options.without_validation();
        }
        options
    }

    /// Command-line flags win over the file.
    pub fn merge_flags(&mut self, settings: &OutputSettings) {
        if settings.epsilon.is_some() {
            self.epsilon = settings.epsilon;
        }
        self.reject_parallel |= settings.reject_parallel;
        self.validate &= settings.validate;
    }
}

impl Scene {
    /// Load a scene from a file ("-" reads stdin).
    ///
    /// `.json` files are read as JSON, everything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = read_input(&path.to_string_lossy())?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self::parse(&content, is_json)
    }

    pub fn parse(content: &str, is_json: bool) -> Result<Self, String> {
        if is_json {
            serde_json::from_str(content).map_err(|e| format!("Failed to parse scene JSON: {}", e))
        } else {
            serde_yaml::from_str(content).map_err(|e| format!("Failed to parse scene YAML: {}", e))
        }
    }

    /// Segments (1,2)-(8,4), (2,3)-(5,7), (3,1)-(6,9) and the quadrilateral
    /// (3,3) (5,8) (8,5) (6,2), all against the window (2,2)-(7,6).
    pub fn demo() -> Self {
        Scene {
            name: Some("demo".to_string()),
            window: Some([2.0, 2.0, 7.0, 6.0]),
            region: None,
            segments: vec![[1.0, 2.0, 8.0, 4.0], [2.0, 3.0, 5.0, 7.0], [3.0, 1.0, 6.0, 9.0]],
            polygons: vec![ScenePolygon {
                name: Some("quad".to_string()),
                points: vec![[3.0, 3.0], [5.0, 8.0], [8.0, 5.0], [6.0, 2.0]],
                path: None,
            }],
            options: SceneOptions::default(),
        }
    }

    fn window_rect(&self, options: &ClipOptions) -> Result<Option<Rect>, String> {
        let Some([xmin, ymin, xmax, ymax]) = self.window else {
            return Ok(None);
        };

        if options.validate {
            Rect::try_new(xmin, ymin, xmax, ymax)
                .map(Some)
                .map_err(|e| e.to_string())
        } else {
            Ok(Some(Rect::new(xmin, ymin, xmax, ymax)))
        }
    }

    fn polygon_points(polygon: &ScenePolygon) -> Result<Vec<Point>, String> {
        if !polygon.points.is_empty() {
            return Ok(to_points(&polygon.points));
        }

        match &polygon.path {
            Some(d) => parse_path_data(d).map_err(|e| e.to_string()),
            None => Ok(Vec::new()),
        }
    }

    /// Clip everything in the scene.
    pub fn run(&self) -> Result<Report, String> {
        let options = self.options.to_clip_options();
        let window = self.window_rect(&options)?;

        let region_points: Vec<Point> = match &self.region {
            Some(vertices) => to_points(vertices),
            None => window.map(|w| w.corners().to_vec()).unwrap_or_default(),
        };
        let region: Vec<ClipEdge> = match (&self.region, window) {
            (Some(_), _) => region_from_vertices(&region_points),
            (None, Some(w)) => w.clip_edges().to_vec(),
            (None, None) => Vec::new(),
        };

        let mut segments = Vec::with_capacity(self.segments.len());
        if !self.segments.is_empty() {
            let window = window.ok_or("Segments need a window")?;
            for &[x1, y1, x2, y2] in &self.segments {
                let segment = Segment::from_coords(x1, y1, x2, y2);
                let clipped = clip_line_with(segment, window, &options).map_err(|e| e.to_string())?;
                segments.push(SegmentResult {
                    input: segment.into(),
                    visible: clipped.is_some(),
                    clipped: clipped.map(Into::into),
                });
            }
        }

        let mut polygons = Vec::with_capacity(self.polygons.len());
        if !self.polygons.is_empty() {
            match &self.region {
                Some(vertices) if vertices.len() < 3 => {
                    return Err(format!(
                        "Region has {} vertices, need at least 3",
                        vertices.len()
                    ));
                }
                None if window.is_none() => {
                    return Err("Polygons need a window or a region".to_string());
                }
                _ => {}
            }
            for (index, polygon) in self.polygons.iter().enumerate() {
                let label = polygon.name.clone().unwrap_or_else(|| format!("#{}", index));
                let points = Self::polygon_points(polygon)
                    .map_err(|e| format!("Polygon {}: {}", label, e))?;
                let clipped = clip_polygon_with(&points, &region, &options)
                    .map_err(|e| format!("Polygon {}: {}", label, e))?;

                polygons.push(PolygonResult {
                    name: polygon.name.clone(),
                    input_area: area(&points),
                    clipped_area: area(&clipped),
                    input: points.into_iter().map(Into::into).collect(),
                    clipped: clipped.into_iter().map(Into::into).collect(),
                });
            }
        }

        Ok(Report {
            name: self.name.clone(),
            window: window.map(Into::into),
            region: if self.region.is_some() {
                region_points.into_iter().map(Into::into).collect()
            } else {
                Vec::new()
            },
            segments,
            polygons,
        })
    }
}

/// Run the scene command.
pub fn cmd_scene(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<String> = None;
    let mut settings = OutputSettings::default();

    let mut i = 0;
    while i < args.len() {
        if settings.parse_flag(args, &mut i)? {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            arg if !arg.starts_with('-') || arg == "-" => {
                if scene_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                scene_path = Some(arg.to_string());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let scene_path = scene_path.ok_or("Usage: clipwin scene <file.yaml|file.json|->")?;
    let mut scene = Scene::load(&scene_path)?;
    scene.options.merge_flags(&settings);

    let report = scene.run()?;
    eprintln!(
        "Scene {}: {}/{} segments visible, {}/{} polygons visible",
        scene.name.as_deref().unwrap_or(&scene_path),
        report.visible_segments(),
        report.segments.len(),
        report.visible_polygons(),
        report.polygons.len()
    );

    emit_report(&report, &settings)
}

// ============================================================================
// TESTS
// ============================================================================
