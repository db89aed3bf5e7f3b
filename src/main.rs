use kintree::graph::FamilyGraph;
use kintree::input::parse_members;
use kintree::layout::{LayoutEngine, RenderContext};
use kintree::relate_by_id;
use kintree::svg::SvgRenderer;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq)]
enum Format {
    Svg,
    Json,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <members.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>             Output file (default: stdout)");
    eprintln!("  -f, --format <svg|json>         Layout output format (default: svg)");
    eprintln!("      --dark                      Dark color scheme");
    eprintln!("  -r, --relate <viewer> <target>  Print the relationship between two members");
    eprintln!("      --lang <en|ko>              Kinship vocabulary (default: en)");
    eprintln!("      --check                     Report malformed references and exit");
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut format = Format::Svg;
    let mut dark_mode = false;
    let mut relate: Option<(String, String)> = None;
    let mut lang: Option<String> = None;
    let mut check = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-f" | "--format" => {
                i += 1;
                format = match args.get(i).map(String::as_str) {
                    Some("svg") => Format::Svg,
                    Some("json") => Format::Json,
                    other => {
                        eprintln!("Invalid format: {}", other.unwrap_or(""));
                        process::exit(1);
                    }
                };
            }
            "--dark" => dark_mode = true,
            "-r" | "--relate" => {
                if i + 2 >= args.len() {
                    usage(&args[0]);
                }
                relate = Some((args[i + 1].clone(), args[i + 2].clone()));
                i += 2;
            }
            "--lang" => {
                i += 1;
                match args.get(i).map(String::as_str) {
                    Some(l @ ("en" | "ko")) => lang = Some(l.to_string()),
                    other => {
                        eprintln!("Invalid language: {}", other.unwrap_or(""));
                        process::exit(1);
                    }
                }
            }
            "--check" => check = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let members = match parse_members(&input) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if check {
        let anomalies = FamilyGraph::new(&members).anomalies();
        for anomaly in &anomalies {
            println!("{}", anomaly);
        }
        process::exit(if anomalies.is_empty() { 0 } else { 2 });
    }

    let output = if let Some((viewer, target)) = relate {
        match relate_by_id(&members, &viewer, &target, lang.as_deref()) {
            Ok(result) if result.description.is_empty() => format!("{}\n", result.label),
            Ok(result) => format!("{}\n{}\n", result.label, result.description),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    } else {
        let ctx: RenderContext = RenderContext {
            dark_mode,
            on_select: None,
        };
        let layout = LayoutEngine::default().layout_with(&members, &ctx);
        match format {
            Format::Svg => SvgRenderer::default().render(&layout),
            Format::Json => match serde_json::to_string_pretty(&layout) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Failed to serialize layout: {}", e);
                    process::exit(1);
                }
            },
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
