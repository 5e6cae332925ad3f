//! Error and diagnostic system for the floornav parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing at the offending markup lines
//! - Severity levels
//! - Diagnostic collector for accumulating warnings
//!
//! # Overview
//!
//! Parsing a floor plan is fail-fast: the first fatal [`Diagnostic`] aborts
//! the document and is returned wrapped in a [`ParseError`]. Recoverable
//! findings, such as path commands outside the supported subset, are
//! reported as warnings and handed back alongside the parsed floor.
//!
//! # Example
//!
//! ```
//! # use floornav_parser::error::{Diagnostic, ErrorCode};
//! # use floornav_parser::Span;
//!
//! let line = Span::new(120..164);
//! let group = Span::new(80..110);
//!
//! let diag = Diagnostic::error("room `101` has no recognizable coordinate")
//!     .with_code(ErrorCode::E003)
//!     .with_label(line, "annotation without coordinate")
//!     .with_secondary_label(group, "room group opened here")
//!     .with_help("give the element a `transform`, `x`/`y` attributes or path data");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
