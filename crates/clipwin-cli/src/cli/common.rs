//! Common utilities shared across CLI commands.

use std::fs;

use image::{DynamicImage, RgbaImage};
use resvg::usvg;
use serde::Serialize;
use tiny_skia::Pixmap;

use clipwin::{Point, Rect, Segment};

/// Output format for clip results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    Svg,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// Flags every clipping command accepts.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub png_path: Option<String>,
    pub epsilon: Option<f64>,
    pub reject_parallel: bool,
    pub validate: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            output_path: None,
            png_path: None,
            epsilon: None,
            reject_parallel: false,
            validate: true,
        }
    }
}

impl OutputSettings {
    /// Try to consume a shared flag at `args[*i]`.
    ///
    /// Returns `Ok(true)` if the flag was recognized (advancing `i` past its
    /// value), `Ok(false)` if it belongs to the caller.
    pub fn parse_flag(&mut self, args: &[String], i: &mut usize) -> Result<bool, String> {
        match args[*i].as_str() {
            "-f" | "--format" => {
                let value = take_value(args, i)?;
                self.format = OutputFormat::from_name(value).ok_or_else(|| {
                    format!("Unknown format: {}. Use 'text', 'json' or 'svg'.", value)
                })?;
            }
            "--json" => self.format = OutputFormat::Json,
            "--svg" => self.format = OutputFormat::Svg,
            "-o" | "--output" => self.output_path = Some(take_value(args, i)?.to_string()),
            "--png" => self.png_path = Some(take_value(args, i)?.to_string()),
            "--epsilon" => {
                let value = take_value(args, i)?;
                let eps: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid epsilon: {}", value))?;
                if !(eps >= 0.0 && eps.is_finite()) {
                    return Err(format!("Epsilon must be a finite non-negative number, got {}", value));
                }
                self.epsilon = Some(eps);
            }
            "--reject-parallel" => self.reject_parallel = true,
            "--no-validate" => self.validate = false,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Advance past a flag and return its value.
pub fn take_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("Missing value for {}", flag))
}

// ============================================================================
// ARGUMENT PARSING
// ============================================================================

/// Parse a comma/space separated list of exactly `N` numbers.
fn parse_numbers<const N: usize>(text: &str, what: &str) -> Result<[f64; N], String> {
    let values: Vec<f64> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| format!("Invalid number '{}' in {}", s, what)))
        .collect::<Result<_, _>>()?;

    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("Expected {} numbers for {}, got {}", N, what, v.len()))
}

/// `xmin,ymin,xmax,ymax`
pub fn parse_window(text: &str) -> Result<[f64; 4], String> {
    parse_numbers::<4>(text, "window")
}

/// `x1,y1,x2,y2`
pub fn parse_segment(text: &str) -> Result<[f64; 4], String> {
    parse_numbers::<4>(text, "segment")
}

/// `"x,y x,y x,y ..."` (pairs separated by whitespace or `;`).
pub fn parse_point_list(text: &str) -> Result<Vec<[f64; 2]>, String> {
    text.split(|c: char| c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|pair| parse_numbers::<2>(pair, "point"))
        .collect()
}

/// Read a file, or stdin when `path` is "-".
pub fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
    }
}

pub fn to_points(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

// ============================================================================
// REPORT
// ============================================================================

/// A point in JSON output format.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JsonPoint {
    pub x: f64,
    pub y: f64,
}

/// A segment in JSON output format.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JsonSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Window bounds in JSON output format.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JsonRect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl From<Point> for JsonPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Segment> for JsonSegment {
    fn from(s: Segment) -> Self {
        Self { x1: s.p1.x, y1: s.p1.y, x2: s.p2.x, y2: s.p2.y }
    }
}

impl From<Rect> for JsonRect {
    fn from(r: Rect) -> Self {
        Self { xmin: r.xmin, ymin: r.ymin, xmax: r.xmax, ymax: r.ymax }
    }
}

/// Clip result for one segment.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub input: JsonSegment,
    pub visible: bool,
    pub clipped: Option<JsonSegment>,
}

/// Clip result for one polygon.
#[derive(Debug, Clone, Serialize)]
pub struct PolygonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub input: Vec<JsonPoint>,
    pub clipped: Vec<JsonPoint>,
    pub input_area: f64,
    pub clipped_area: f64,
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<JsonRect>,
    /// Clip region vertices used for polygons.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub region: Vec<JsonPoint>,
    pub segments: Vec<SegmentResult>,
    pub polygons: Vec<PolygonResult>,
}

impl Report {
    pub fn visible_segments(&self) -> usize {
        self.segments.iter().filter(|s| s.visible).count()
    }

    pub fn visible_polygons(&self) -> usize {
        self.polygons.iter().filter(|p| !p.clipped.is_empty()).count()
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn fmt_point(p: &JsonPoint) -> String {
    format!("({:.4}, {:.4})", p.x, p.y)
}

fn fmt_segment(s: &JsonSegment) -> String {
    format!("({:.4}, {:.4})-({:.4}, {:.4})", s.x1, s.y1, s.x2, s.y2)
}

/// Human readable, one line per primitive.
pub fn report_to_text(report: &Report) -> String {
    let mut out = String::new();

    for seg in &report.segments {
        let result = match &seg.clipped {
            Some(clipped) => fmt_segment(clipped),
            None => "outside".to_string(),
        };
        out.push_str(&format!("segment {}: {}\n", fmt_segment(&seg.input), result));
    }

    for (index, poly) in report.polygons.iter().enumerate() {
        let label = poly.name.clone().unwrap_or_else(|| format!("#{}", index));
        if poly.clipped.is_empty() {
            out.push_str(&format!("polygon {}: outside\n", label));
        } else {
            let points: Vec<String> = poly.clipped.iter().map(fmt_point).collect();
            out.push_str(&format!(
                "polygon {}: {} -> {} vertices: {}\n",
                label,
                poly.input.len(),
                poly.clipped.len(),
                points.join(" ")
            ));
        }
    }

    out
}

/// Report as pretty-printed JSON.
pub fn report_to_json(report: &Report) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("Failed to serialize JSON: {}", e))
}

/// Pixel size of the longer side of the SVG drawing.
const SVG_SIZE: f64 = 800.0;
const SVG_PADDING: f64 = 20.0;

/// Maps geometry (y up) to SVG pixels (y down).
struct Viewport {
    min_x: f64,
    max_y: f64,
    scale: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    fn fit(points: &[JsonPoint]) -> Self {
        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        if !min_x.is_finite() || !max_y.is_finite() {
            return Self { min_x: 0.0, max_y: 0.0, scale: 1.0, width: SVG_SIZE, height: SVG_SIZE };
        }

        let span = (max_x - min_x).max(max_y - min_y).max(1e-9);
        let scale = (SVG_SIZE - 2.0 * SVG_PADDING) / span;

        Self {
            min_x,
            max_y,
            scale,
            width: (max_x - min_x) * scale + 2.0 * SVG_PADDING,
            height: (max_y - min_y) * scale + 2.0 * SVG_PADDING,
        }
    }

    fn map(&self, p: &JsonPoint) -> (f64, f64) {
        (
            (p.x - self.min_x) * self.scale + SVG_PADDING,
            (self.max_y - p.y) * self.scale + SVG_PADDING,
        )
    }

    fn points_attr(&self, points: &[JsonPoint]) -> String {
        points
            .iter()
            .map(|p| {
                let (x, y) = self.map(p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn line(&self, s: &JsonSegment, attrs: &str) -> String {
        let (x1, y1) = self.map(&JsonPoint { x: s.x1, y: s.y1 });
        let (x2, y2) = self.map(&JsonPoint { x: s.x2, y: s.y2 });
        format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>\n",
            x1, y1, x2, y2, attrs
        )
    }
}

/// Every point the drawing has to show.
fn report_points(report: &Report) -> Vec<JsonPoint> {
    let mut points = Vec::new();
    if let Some(w) = report.window {
        points.push(JsonPoint { x: w.xmin, y: w.ymin });
        points.push(JsonPoint { x: w.xmax, y: w.ymax });
    }
    points.extend(report.region.iter().copied());
    for seg in &report.segments {
        points.push(JsonPoint { x: seg.input.x1, y: seg.input.y1 });
        points.push(JsonPoint { x: seg.input.x2, y: seg.input.y2 });
    }
    for poly in &report.polygons {
        points.extend(poly.input.iter().copied());
    }
    points
}

/// Draw the report: clip window/region in red, inputs dashed green, clipped
/// results in blue.
pub fn report_to_svg(report: &Report) -> String {
    let view = Viewport::fit(&report_points(report));

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}">
<rect width="100%" height="100%" fill="white"/>
"#,
        w = view.width.ceil(),
        h = view.height.ceil()
    ));

    svg.push_str("<g id=\"window\" stroke=\"red\" stroke-width=\"2\" fill=\"none\">\n");
    if !report.region.is_empty() {
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", view.points_attr(&report.region)));
    } else if let Some(w) = report.window {
        let corners = [
            JsonPoint { x: w.xmin, y: w.ymin },
            JsonPoint { x: w.xmax, y: w.ymin },
            JsonPoint { x: w.xmax, y: w.ymax },
            JsonPoint { x: w.xmin, y: w.ymax },
        ];
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", view.points_attr(&corners)));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g id=\"input\" stroke=\"green\" stroke-width=\"1.5\" stroke-dasharray=\"6 4\" fill=\"none\">\n");
    for seg in &report.segments {
        svg.push_str(&view.line(&seg.input, ""));
    }
    for poly in &report.polygons {
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", view.points_attr(&poly.input)));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g id=\"clipped\" stroke=\"blue\" stroke-width=\"2.5\" stroke-linecap=\"round\" fill=\"none\">\n");
    for clipped in report.segments.iter().filter_map(|s| s.clipped.as_ref()) {
        svg.push_str(&view.line(clipped, ""));
    }
    for poly in report.polygons.iter().filter(|p| !p.clipped.is_empty()) {
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", view.points_attr(&poly.clipped)));
    }
    svg.push_str("</g>\n</svg>\n");

    svg
}

/// Rasterize SVG content to a PNG file using resvg.
pub fn render_png(svg_content: &str, png_path: &str) -> Result<(), String> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| format!("Failed to parse generated SVG: {}", e))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| format!("Failed to create {}x{} pixmap", width, height))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| "Failed to create image".to_string())?;

    DynamicImage::ImageRgba8(rgba)
        .save(png_path)
        .map_err(|e| format!("Failed to write {}: {}", png_path, e))
}

/// Render the report in the selected format and write it out, plus the PNG
/// if one was requested.
pub fn emit_report(report: &Report, settings: &OutputSettings) -> Result<(), String> {
    let content = match settings.format {
        OutputFormat::Text => report_to_text(report),
        OutputFormat::Json => report_to_json(report)? + "\n",
        OutputFormat::Svg => report_to_svg(report),
    };

    match &settings.output_path {
        Some(path) if path != "-" => {
            fs::write(path, &content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            eprintln!("Wrote: {}", path);
        }
        _ => print!("{}", content),
    }

    if let Some(png_path) = &settings.png_path {
        let svg = match settings.format {
            OutputFormat::Svg => content,
            _ => report_to_svg(report),
        };
        render_png(&svg, png_path)?;
        eprintln!("Wrote: {}", png_path);
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
