//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Render a collapsible tree diagram to SVG, optionally replaying clicks
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Render payload as JSON (`-` reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Where to write the SVG (default: stdout)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(long, default_value_t = 960.0)]
    pub width: f32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 500.0)]
    pub height: f32,

    /// Expand every node before replaying clicks
    #[arg(long, conflicts_with = "collapse_all")]
    pub expand_all: bool,

    /// Collapse everything below the root before replaying clicks
    #[arg(long)]
    pub collapse_all: bool,

    /// Click the node with this label; repeat to click several in order
    #[arg(short, long = "click", value_name = "LABEL")]
    pub clicks: Vec<String>,

    /// Skip transitions and jump straight to each final layout
    #[arg(long)]
    pub reduced_motion: bool,

    /// Write debug logs to this file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log: Option<PathBuf>,
}
