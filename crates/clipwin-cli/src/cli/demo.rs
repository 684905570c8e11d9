//! `clipwin demo` - the built-in example scene.

use super::common::{emit_report, OutputSettings};
use super::scene::Scene;

pub fn cmd_demo(args: &[String]) -> Result<(), String> {
    let mut settings = OutputSettings::default();

    let mut i = 0;
    while i < args.len() {
        if !settings.parse_flag(args, &mut i)? {
            return Err(format!("Unknown option: {}", args[i]));
        }
        i += 1;
    }

    let mut scene = Scene::demo();
    scene.options.merge_flags(&settings);
    let report = scene.run()?;

    emit_report(&report, &settings)
}
