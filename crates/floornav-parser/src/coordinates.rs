//! Coordinate conventions for room annotations.
//!
//! Drawing tools place text labels in several ways. Each convention is a
//! [`CoordinateSource`] with its own pattern; they are tried in a fixed
//! order against the raw markup line and the first match wins. The patterns
//! only accept unsigned numbers for the captured position.

use std::{fmt, sync::OnceLock};

use regex::Regex;

use floornav_core::geometry::Point;

/// A convention for writing an annotation's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSource {
    /// `translate(X Y)`
    Translate,
    /// `matrix(a b c d X Y)`, only the translation part is used.
    Matrix,
    /// A path whose data starts with `M X Y`.
    PathMove,
    /// Explicit `x="X" y="Y"` attributes.
    Attributes,
}

impl CoordinateSource {
    /// All conventions, in the order they are tried.
    pub const ORDER: [CoordinateSource; 4] = [
        CoordinateSource::Translate,
        CoordinateSource::Matrix,
        CoordinateSource::PathMove,
        CoordinateSource::Attributes,
    ];

    /// Tries this convention against a markup line.
    pub fn capture(self, line: &str) -> Option<CoordinateMatch<'_>> {
        let captures = self.pattern().captures(line)?;
        let x = captures.get(1)?.as_str();
        let y = captures.get(2)?.as_str();
        Some(CoordinateMatch {
            source: self,
            x,
            y,
        })
    }

    fn pattern(self) -> &'static Regex {
        static TRANSLATE: OnceLock<Regex> = OnceLock::new();
        static MATRIX: OnceLock<Regex> = OnceLock::new();
        static PATH_MOVE: OnceLock<Regex> = OnceLock::new();
        static ATTRIBUTES: OnceLock<Regex> = OnceLock::new();

        let (cell, pattern) = match self {
            Self::Translate => (&TRANSLATE, r"translate\(([\d.]+) ([\d.]+)\)"),
            Self::Matrix => (
                &MATRIX,
                r"matrix\([-\d.]+ [-\d.]+ [-\d.]+ [-\d.]+ ([\d.]+) ([\d.]+)\)",
            ),
            Self::PathMove => (&PATH_MOVE, r#"d="M([\d.]+) ([\d.]+)"#),
            Self::Attributes => (&ATTRIBUTES, r#"x="([\d.]+)" y="([\d.]+)""#),
        };
        cell.get_or_init(|| Regex::new(pattern).expect("coordinate pattern must compile"))
    }
}

impl fmt::Display for CoordinateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Translate => "translate transform",
            Self::Matrix => "matrix transform",
            Self::PathMove => "path move",
            Self::Attributes => "x/y attributes",
        };
        f.write_str(name)
    }
}

/// The raw captures of a matched convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMatch<'a> {
    source: CoordinateSource,
    x: &'a str,
    y: &'a str,
}

impl<'a> CoordinateMatch<'a> {
    /// The convention that matched.
    pub fn source(&self) -> CoordinateSource {
        self.source
    }

    /// The captured text, before number parsing.
    pub fn raw(&self) -> (&'a str, &'a str) {
        (self.x, self.y)
    }

    /// The captured position, or `None` if a capture is not a number
    /// (e.g. `1.2.3`).
    pub fn point(&self) -> Option<Point> {
        let x = self.x.parse().ok()?;
        let y = self.y.parse().ok()?;
        Some(Point::new(x, y))
    }
}

/// Finds the first convention that matches `line`.
pub fn find_coordinate(line: &str) -> Option<CoordinateMatch<'_>> {
    CoordinateSource::ORDER
        .iter()
        .find_map(|source| source.capture(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        let line = r#"<text id="101" transform="translate(12.5 30)">101</text>"#;
        let found = find_coordinate(line).unwrap();

        assert_eq!(found.source(), CoordinateSource::Translate);
        assert_eq!(found.point(), Some(Point::new(12.5, 30.0)));
    }

    #[test]
    fn test_matrix_uses_translation_only() {
        let line = r#"<text id="102" transform="matrix(0 -1 1 0 215.5 88)">102</text>"#;
        let found = find_coordinate(line).unwrap();

        assert_eq!(found.source(), CoordinateSource::Matrix);
        assert_eq!(found.point(), Some(Point::new(215.5, 88.0)));
    }

    #[test]
    fn test_path_move() {
        let line = r#"<path id="staircase 1" d="M40 60L50 60"/>"#;
        let found = find_coordinate(line).unwrap();

        assert_eq!(found.source(), CoordinateSource::PathMove);
        assert_eq!(found.point(), Some(Point::new(40.0, 60.0)));
    }

    #[test]
    fn test_explicit_attributes() {
        let line = r#"<text id="103" x="7" y="9.25">103</text>"#;
        let found = find_coordinate(line).unwrap();

        assert_eq!(found.source(), CoordinateSource::Attributes);
        assert_eq!(found.point(), Some(Point::new(7.0, 9.25)));
    }

    #[test]
    fn test_first_convention_wins() {
        let line = r#"<text id="104" x="1" y="2" transform="translate(3 4)">104</text>"#;

        assert_eq!(
            find_coordinate(line).map(|found| found.source()),
            Some(CoordinateSource::Translate)
        );
    }

    #[test]
    fn test_negative_translate_falls_through() {
        let line = r#"<text id="105" transform="translate(-3 4)" x="5" y="6">105</text>"#;
        let found = find_coordinate(line).unwrap();

        assert_eq!(found.source(), CoordinateSource::Attributes);
    }

    #[test]
    fn test_unparsable_capture() {
        let line = r#"<text id="106" x="1.2.3" y="4">106</text>"#;
        let found = find_coordinate(line).unwrap();

        assert_eq!(found.raw(), ("1.2.3", "4"));
        assert_eq!(found.point(), None);
    }

    #[test]
    fn test_no_convention() {
        assert!(find_coordinate(r#"<text id="107">107</text>"#).is_none());
    }
}
