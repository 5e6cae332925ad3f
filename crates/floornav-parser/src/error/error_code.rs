//! Error codes for the floornav diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Markup errors (fatal)
//! - `W1xx` - Path data warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Markup Errors (E0xx)
    // =========================================================================
    /// Malformed component marker.
    ///
    /// An id containing the component marker must consist of exactly three
    /// whitespace-separated tokens: a name and two offsets.
    E001,

    /// Invalid component offset.
    ///
    /// One of the two offsets of a component marker is not a number.
    E002,

    /// Missing room coordinate.
    ///
    /// A room or staircase annotation matched none of the coordinate
    /// conventions (translate, matrix, path move, explicit x/y).
    E003,

    /// Invalid room coordinate.
    ///
    /// A coordinate convention matched but its captures are not numbers.
    E004,

    /// Missing path data.
    ///
    /// A path element marked as graph geometry has no `d` attribute.
    E005,

    // =========================================================================
    // Path Data Warnings (W1xx)
    // =========================================================================
    /// Unsupported path command.
    ///
    /// Only `M`, `L`, `H`, `V` and `Z` are interpreted; other commands and
    /// their arguments are ignored.
    W100,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::W100 => "W100",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed component marker",
            ErrorCode::E002 => "invalid component offset",
            ErrorCode::E003 => "missing room coordinate",
            ErrorCode::E004 => "invalid room coordinate",
            ErrorCode::E005 => "missing path data",
            ErrorCode::W100 => "unsupported path command",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
