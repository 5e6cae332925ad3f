//! Command-line argument definitions for the floornav CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input documents, the output
//! directory and formats, the floor tag, configuration file and logging
//! verbosity.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which documents to write for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Node, edge and room lists (`navigation_graph_with_rooms.json`)
    Navigation,
    /// Routing maps (`graph.json` and `names.json`)
    Floor,
    /// Both of the above
    All,
}

impl OutputFormat {
    /// Whether the navigation document is written.
    pub fn navigation(self) -> bool {
        matches!(self, Self::Navigation | Self::All)
    }

    /// Whether the routing documents are written.
    pub fn floor(self) -> bool {
        matches!(self, Self::Floor | Self::All)
    }
}

/// Command-line arguments for the floornav tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Floor-plan files, or directories whose `.svg` files are all processed
    #[arg(required = true, help = "Input files or directories")]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one sub-directory of output per input
    #[arg(short, long, default_value = "out")]
    pub output_dir: PathBuf,

    /// Documents to write
    #[arg(short, long, value_enum, default_value_t = OutputFormat::All)]
    pub format: OutputFormat,

    /// Floor number, instead of the one in the file name
    #[arg(long, requires = "building")]
    pub floor: Option<String>,

    /// Building name, instead of the one in the file name
    #[arg(long, requires = "floor")]
    pub building: Option<String>,

    /// Maximum distance between a room label and its door stub
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
