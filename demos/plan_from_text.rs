//! Generate a layout from the `name, width, height[, position]` text format.
//!
//! Usage: `cargo run --example plan_from_text -- [rooms.txt] [WxH]`
//!
//! Without a file the built-in sample request is used. Set `FLOORPLAN_LOG`
//! to a path to capture placement events as JSON lines. The layout JSON goes
//! to stdout, followed by a few scripted moves to show rejected and applied
//! edits.

use std::env;
use std::fs;

use floorplan::logging::FileSink;
use floorplan::spec::{parse_plot, parse_room_lines};
use floorplan::{LayoutConfig, LayoutEngine, LayoutSession, LogLevel, Logger, MoveDirection};

const SAMPLE: &str = "\
Master Bedroom, 14, 12, top-left
Living, 20, 15, center
Kitchen, 12, 10, bottom-right
Bath, 8, 6, any
Pooja, 5, 5, bottom-of-master bedroom
Dining, 10, 8, left-of-kitchen
";

fn main() -> floorplan::Result<()> {
    let mut args = env::args().skip(1);
    let text = match args.next() {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let plot = parse_plot(args.next().as_deref().unwrap_or("40x30"))?;

    let mut config = LayoutConfig::default();
    if let Ok(path) = env::var("FLOORPLAN_LOG") {
        match FileSink::new(&path, 1 << 20) {
            Ok(sink) => config = config.with_logger(Logger::new(sink).with_min_level(LogLevel::Debug)),
            Err(err) => eprintln!("logging disabled: {err}"),
        }
    }
    config.enable_metrics();

    let engine = LayoutEngine::new(config.clone())?;
    let outcome = engine.generate(plot, &parse_room_lines(&text)?)?;
    println!("{}", outcome.to_json()?);

    if !outcome.is_complete() {
        eprintln!(
            "{} room(s) could not be placed: {}",
            outcome.unplaced_count,
            outcome.unplaced.join(", ")
        );
    }
    for warning in &outcome.warnings {
        eprintln!(
            "constraint `{}` for `{}` not understood ({:?})",
            warning.constraint, warning.key, warning.kind
        );
    }

    let mut session = LayoutSession::from_outcome(&outcome, config.clone())?;
    if let Some(first) = outcome.placements.keys().next().map(str::to_string) {
        for direction in MoveDirection::ALL {
            let result = session.nudge(&first, direction);
            eprintln!("move {first} {}: {result:?}", direction.as_str());
        }
        let slide = session.slide(&first, MoveDirection::Right);
        eprintln!("slide {first} right: {} step(s), stopped by {:?}", slide.steps, slide.stop);
    }

    if let Some(handle) = config.metrics_handle()
        && let Ok(metrics) = handle.lock()
    {
        eprintln!("{:?}", metrics.snapshot());
    }
    Ok(())
}
