//! `clipwin line` - Liang-Barsky clipping of segments to a window.

use super::common::{emit_report, parse_segment, parse_window, OutputSettings};
use super::scene::Scene;

/// Run the line command.
///
/// ```text
/// clipwin line --window 2,2,7,6 --segment 1,2,8,4 --segment 3,1,6,9
/// ```
pub fn cmd_line(args: &[String]) -> Result<(), String> {
    let mut scene = Scene::default();
    let mut settings = OutputSettings::default();

    let mut i = 0;
    while i < args.len() {
        if settings.parse_flag(args, &mut i)? {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "-w" | "--window" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --window")?;
                scene.window = Some(parse_window(value)?);
            }
            "-s" | "--segment" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --segment")?;
                scene.segments.push(parse_segment(value)?);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    if scene.window.is_none() {
        return Err("Missing --window xmin,ymin,xmax,ymax".to_string());
    }
    if scene.segments.is_empty() {
        return Err("Missing --segment x1,y1,x2,y2 (repeatable)".to_string());
    }

    scene.options.merge_flags(&settings);
    let report = scene.run()?;

    eprintln!(
        "{}/{} segments visible",
        report.visible_segments(),
        report.segments.len()
    );

    emit_report(&report, &settings)
}
