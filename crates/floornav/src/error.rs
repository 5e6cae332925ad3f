//! Error types for floornav operations.
//!
//! This module provides the main error type [`FloornavError`] which wraps
//! the error conditions that can occur while turning a floor plan into a
//! navigation graph.

use std::{io, path::PathBuf};

use thiserror::Error;

use floornav_core::graph::GraphError;
use floornav_parser::error::ParseError;

/// The main error type for floornav operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source
/// spans, together with the markup it points into, so that callers can
/// render rich reports.
#[derive(Debug, Error)]
pub enum FloornavError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),

    #[error("{}: {source}", path.display())]
    Batch {
        path: PathBuf,
        #[source]
        source: Box<FloornavError>,
    },
}

impl FloornavError {
    /// Create a new `Parse` error with the associated source markup.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Attach the path of the document that failed.
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        Self::Batch {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
