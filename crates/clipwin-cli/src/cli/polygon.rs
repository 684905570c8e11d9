//! `clipwin polygon` - Sutherland-Hodgman clipping of polygons to a convex
//! region.
//!
//! The region is either an axis-aligned window or a convex polygon, given as
//! points, SVG path data, or the first shape of an SVG file. Subjects come
//! the same ways; an SVG file contributes every shape it contains.

use clipwin::{extract_outlines, parse_path_data, Point};

use super::common::{emit_report, parse_point_list, parse_window, read_input, OutputSettings};
use super::scene::{Scene, ScenePolygon};

fn to_coords(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

fn load_svg_outlines(path: &str) -> Result<Vec<Vec<Point>>, String> {
    let content = read_input(path)?;
    extract_outlines(&content).map_err(|e| format!("{}: {}", path, e))
}

/// Run the polygon command.
///
/// ```text
/// clipwin polygon --window 2,2,7,6 --subject "3,3 5,8 8,5 6,2"
/// clipwin polygon --region-svg hull.svg --subject-svg shapes.svg --svg -o out.svg
/// ```
pub fn cmd_polygon(args: &[String]) -> Result<(), String> {
    let mut scene = Scene::default();
    let mut settings = OutputSettings::default();

    let mut i = 0;
    while i < args.len() {
        if settings.parse_flag(args, &mut i)? {
            i += 1;
            continue;
        }

        let flag = args[i].as_str();
        i += 1;
        let value = args
            .get(i)
            .map(|s| s.as_str())
            .ok_or_else(|| format!("Missing value for {}", flag));

        match flag {
            "-w" | "--window" => scene.window = Some(parse_window(value?)?),
            "-r" | "--region" => scene.region = Some(parse_point_list(value?)?),
            "--region-path" => {
                let points = parse_path_data(value?).map_err(|e| e.to_string())?;
                scene.region = Some(to_coords(&points));
            }
            "--region-svg" => {
                let path = value?;
                let outlines = load_svg_outlines(path)?;
                if outlines.len() > 1 {
                    eprintln!("{}: {} shapes, using the first as region", path, outlines.len());
                }
                scene.region = outlines.first().map(|o| to_coords(o));
            }
            "-s" | "--subject" => scene.polygons.push(ScenePolygon {
                points: parse_point_list(value?)?,
                ..Default::default()
            }),
            "--subject-path" => scene.polygons.push(ScenePolygon {
                path: Some(value?.to_string()),
                ..Default::default()
            }),
            "--subject-svg" => {
                let path = value?;
                let outlines = load_svg_outlines(path)?;
                eprintln!("Loaded {} shapes from {}", outlines.len(), path);
                for (index, outline) in outlines.iter().enumerate() {
                    scene.polygons.push(ScenePolygon {
                        name: Some(format!("shape {}", index)),
                        points: to_coords(outline),
                        path: None,
                    });
                }
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    if scene.window.is_none() && scene.region.is_none() {
        return Err("Missing clip region: use --window, --region, --region-path or --region-svg".to_string());
    }
    if scene.polygons.is_empty() {
        return Err("Missing subject: use --subject, --subject-path or --subject-svg".to_string());
    }

    scene.options.merge_flags(&settings);
    let report = scene.run()?;

    eprintln!(
        "{}/{} polygons visible",
        report.visible_polygons(),
        report.polygons.len()
    );

    emit_report(&report, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_region_is_an_error() {
        let err = cmd_polygon(&args(&["--subject", "0,0 1,0 1,1"])).unwrap_err();
        assert!(err.contains("Missing clip region"));
    }

    #[test]
    fn missing_subject_is_an_error() {
        let err = cmd_polygon(&args(&["--window", "0,0,1,1"])).unwrap_err();
        assert!(err.contains("Missing subject"));
    }

    #[test]
    fn flag_without_value_is_an_error() {
        let err = cmd_polygon(&args(&["--window"])).unwrap_err();
        assert_eq!(err, "Missing value for --window");
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = cmd_polygon(&args(&["--bogus", "1"])).unwrap_err();
        assert!(err.contains("--bogus"));
    }
}
