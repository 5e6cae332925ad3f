//! CLI logic for the floornav tool.
//!
//! Every input document is processed in isolation: a failing floor plan is
//! reported and the batch moves on to the next one.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use floornav::{
    FloorPlanBuilder, FloornavError, LinkedFloor,
    config::{AppConfig, LinkingConfig},
    export::{
        Exporter,
        floor::{FloorExporter, FloorTag},
        navigation::NavigationExporter,
    },
};

const NAVIGATION_FILE: &str = "navigation_graph_with_rooms.json";
const GRAPH_FILE: &str = "graph.json";
const NAMES_FILE: &str = "names.json";

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    processed: Vec<PathBuf>,
    failures: Vec<FloornavError>,
}

impl BatchOutcome {
    /// Documents that were exported.
    pub fn processed(&self) -> &[PathBuf] {
        &self.processed
    }

    /// Errors of the documents that failed, each naming its document.
    pub fn failures(&self) -> &[FloornavError] {
        &self.failures
    }

    /// Whether every document was exported.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the floornav CLI application
///
/// Builds the navigation graph of every input document and writes the
/// selected documents to `<output_dir>/<file stem>/`.
///
/// # Errors
///
/// Returns `FloornavError` for failures affecting the whole batch:
/// - Configuration loading errors
/// - Unreadable input directories
/// - An output directory that cannot be created
///
/// Per-document failures are collected in the returned [`BatchOutcome`].
pub fn run(args: &Args) -> Result<BatchOutcome, FloornavError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(threshold) = args.threshold {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(FloornavError::Config(format!(
                "threshold must be a positive number, got {threshold}"
            )));
        }
        app_config = AppConfig::new(app_config.markup().clone(), LinkingConfig::new(threshold));
    }

    let documents = collect_documents(&args.inputs)?;
    info!(
        documents = documents.len(),
        output_dir:? = args.output_dir;
        "Processing floor plans"
    );

    fs::create_dir_all(&args.output_dir)?;

    let builder = FloorPlanBuilder::new(app_config);
    let mut outcome = BatchOutcome::default();

    for document in documents {
        match process_document(&builder, args, &document) {
            Ok(()) => outcome.processed.push(document),
            Err(err) => {
                warn!(path:? = document; "Floor plan failed, continuing with the next one");
                outcome.failures.push(err);
            }
        }
    }

    info!(
        processed = outcome.processed.len(),
        failed = outcome.failures.len();
        "Batch finished"
    );

    Ok(outcome)
}

/// Expand directories into their `.svg` files, sorted by name.
fn collect_documents(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, FloornavError> {
    let mut documents = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("svg")
                })
                .collect();
            found.sort();
            debug!(dir:? = input, count = found.len(); "Collected floor plans");
            documents.extend(found);
        } else {
            documents.push(input.clone());
        }
    }

    Ok(documents)
}

fn process_document(
    builder: &FloorPlanBuilder,
    args: &Args,
    path: &Path,
) -> Result<(), FloornavError> {
    let floor = builder.build_file(path)?;

    for warning in floor.warnings() {
        warn!(path:? = path; "{}", warning.message());
    }

    let summary = floor.summary();
    info!(
        path:? = path,
        linked = summary.linked(),
        unlinked = summary.unlinked(),
        skipped = summary.skipped();
        "Rooms linked"
    );

    write_outputs(args, path, &floor).map_err(|err| err.in_document(path))
}

fn write_outputs(args: &Args, path: &Path, floor: &LinkedFloor) -> Result<(), FloornavError> {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "floor".to_string());
    let dir = args.output_dir.join(&stem);
    fs::create_dir_all(&dir)?;

    if args.format.navigation() {
        let mut writer = BufWriter::new(File::create(dir.join(NAVIGATION_FILE))?);
        NavigationExporter::new(&mut writer).export(floor.graph(), floor.rooms())?;
        writer.flush()?;
        debug!(dir:? = dir; "Navigation document written");
    }

    if args.format.floor() {
        let tag = match (&args.floor, &args.building) {
            (Some(floor), Some(building)) => Some(FloorTag::new(floor, building)),
            _ => FloorTag::from_file_stem(&stem),
        };

        match tag {
            Some(tag) => {
                info!(tag:% = tag; "Writing routing documents");
                let mut graph_writer = BufWriter::new(File::create(dir.join(GRAPH_FILE))?);
                let mut names_writer = BufWriter::new(File::create(dir.join(NAMES_FILE))?);
                FloorExporter::new(tag, &mut graph_writer, &mut names_writer)
                    .export(floor.graph(), floor.rooms())?;
                graph_writer.flush()?;
                names_writer.flush()?;
            }
            None => warn!(
                stem = stem.as_str();
                "No floor tag in file name and none given, skipping routing documents"
            ),
        }
    }

    Ok(())
}
