//! clipwin - clip segments and polygons to a window
//!
//! Usage:
//!   clipwin line --window <r> --segment <s>...    Liang-Barsky segment clipping
//!   clipwin polygon --window <r> --subject <pts>  Sutherland-Hodgman polygon clipping
//!   clipwin scene <file>                          Clip a YAML/JSON scene
//!   clipwin demo                                  Built-in example

use std::env;
use std::process;

mod cli;

use cli::{cmd_demo, cmd_line, cmd_polygon, cmd_scene};

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(|s| s.as_str()).unwrap_or("clipwin");

    if args.len() < 2 {
        print_usage(prog);
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "line" => cmd_line(&args[2..]),
        "polygon" | "poly" => cmd_polygon(&args[2..]),
        "scene" => cmd_scene(&args[2..]),
        "demo" => cmd_demo(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(prog);
            return;
        }
        other => Err(format!("Unknown command: {}. Run '{} help' for usage.", other, prog)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("clipwin - Liang-Barsky line and Sutherland-Hodgman polygon clipping");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} line --window xmin,ymin,xmax,ymax --segment x1,y1,x2,y2 [--segment ...]", prog);
    eprintln!("  {} polygon <region> <subject> [options]", prog);
    eprintln!("  {} scene <file.yaml|file.json|-> [options]", prog);
    eprintln!("  {} demo [options]", prog);
    eprintln!("  {} help", prog);
    eprintln!();
    eprintln!("Polygon region (one of):");
    eprintln!("  -w, --window <r>        Axis-aligned window xmin,ymin,xmax,ymax");
    eprintln!("  -r, --region <pts>      Convex CCW polygon \"x,y x,y x,y ...\"");
    eprintln!("  --region-path <d>       Convex region as SVG path data");
    eprintln!("  --region-svg <file>     First shape of an SVG file");
    eprintln!();
    eprintln!("Polygon subject (repeatable):");
    eprintln!("  -s, --subject <pts>     Polygon \"x,y x,y x,y ...\"");
    eprintln!("  --subject-path <d>      Polygon as SVG path data");
    eprintln!("  --subject-svg <file>    Every shape of an SVG file");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --format <fmt>      Output format: text, json, svg (default: text)");
    eprintln!("  --json / --svg          Shorthand for --format");
    eprintln!("  -o, --output <file>     Output file (- for stdout, default: stdout)");
    eprintln!("  --png <file>            Also render the SVG drawing to PNG");
    eprintln!("  --epsilon <e>           Treat |v| <= e as zero (default: exact zero test)");
    eprintln!("  --reject-parallel       Fail on degenerate edge intersections instead of skipping");
    eprintln!("  --no-validate           Skip window/region checks (reference behaviour)");
    eprintln!();
    eprintln!("Stdin support:");
    eprintln!("  Use '-' as scene file to read YAML/JSON from stdin:");
    eprintln!("  cat scene.yaml | {} scene - --json", prog);
}
