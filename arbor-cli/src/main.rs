mod args;
mod error;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use arbor::{Diagram, Event, Extent, RenderPayload};
use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::Cli;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("arbor: {e}");
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(path) = &cli.log {
        WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)?;
    }

    let payload = RenderPayload::from_json(&read_input(&cli.input)?)?;

    // The clock is simulated: every step jumps past the transition so each
    // click starts from a settled diagram.
    let mut now = Instant::now();
    let mut diagram = Diagram::new(payload, Extent::new(cli.width, cli.height), now)?;
    diagram.set_reduced_motion(cli.reduced_motion);
    let step = diagram.options().duration() + Duration::from_millis(1);
    if cli.expand_all {
        diagram.expand_all(now)?;
    } else if cli.collapse_all {
        diagram.collapse_all(now)?;
    }
    now += step;
    diagram.tick(now);

    let mut stdout = io::stdout().lock();
    for label in &cli.clicks {
        let (x, y) = surface_point(&diagram, label)?;
        log::info!("[cli] clicking {label:?} at ({x}, {y})");
        for notification in diagram.handle_event(Event::Click { x, y }, now)? {
            let line = serde_json::to_string(&notification).map_err(io::Error::other)?;
            writeln!(stdout, "{line}")?;
        }
        now += step;
        diagram.tick(now);
    }

    let svg = diagram.to_svg();
    match &cli.output {
        Some(path) => std::fs::write(path, svg)?,
        None => stdout.write_all(svg.as_bytes())?,
    }
    Ok(())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
}

/// Surface coordinates of the node labelled `label`.
fn surface_point(diagram: &Diagram, label: &str) -> Result<(f32, f32), CliError> {
    let ix = diagram
        .tree()
        .find_by_label(label)
        .ok_or_else(|| CliError::UnknownLabel(label.to_string()))?;
    let handle = diagram
        .tree()
        .get(ix)
        .identity()
        .and_then(|id| diagram.scene().node(id))
        .ok_or_else(|| CliError::NotVisible(label.to_string()))?;
    Ok(diagram.to_surface(handle.visual.position))
}
