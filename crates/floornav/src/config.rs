//! Configuration types for floor-plan processing.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources. Every field is optional and falls back to the
//! conventions used by the drawings floornav was built for.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining markup and linking settings.
//! - [`MarkupSection`] - The id markers that give markup elements their roles.
//! - [`LinkingConfig`] - How rooms are attached to the corridor graph.
//!
//! # Example
//!
//! ```
//! # use floornav::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.linking().room_link_threshold(), 40.0);
//! ```

use serde::Deserialize;

use floornav_parser::MarkupConfig;

/// Default maximum distance between a room label and the vertex it binds to.
pub const DEFAULT_ROOM_LINK_THRESHOLD: f64 = 40.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Markup conventions section.
    #[serde(default)]
    markup: MarkupSection,

    /// Room linking section.
    #[serde(default)]
    linking: LinkingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(markup: MarkupSection, linking: LinkingConfig) -> Self {
        Self { markup, linking }
    }

    /// Returns the markup section.
    pub fn markup(&self) -> &MarkupSection {
        &self.markup
    }

    /// Returns the linking section.
    pub fn linking(&self) -> &LinkingConfig {
        &self.linking
    }
}

/// Id markers recognised in floor-plan markup.
///
/// Unset fields keep the parser defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkupSection {
    #[serde(default)]
    component_marker: Option<String>,
    #[serde(default)]
    graph_marker: Option<String>,
    #[serde(default)]
    skip_marker: Option<String>,
    #[serde(default)]
    staircase_marker: Option<String>,
    #[serde(default)]
    room_groups: Option<Vec<String>>,
}

impl MarkupSection {
    /// Resolves the section into parser markers, keeping the parser
    /// defaults for unset fields.
    pub fn to_markup_config(&self) -> MarkupConfig {
        let defaults = MarkupConfig::default();
        let pick = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };

        MarkupConfig::new(
            pick(&self.component_marker, defaults.component_marker()),
            pick(&self.graph_marker, defaults.graph_marker()),
            pick(&self.skip_marker, defaults.skip_marker()),
            pick(&self.staircase_marker, defaults.staircase_marker()),
            self.room_groups
                .clone()
                .unwrap_or_else(|| defaults.room_groups().to_vec()),
        )
    }
}

/// Room linking configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkingConfig {
    /// Rooms bind only to vertices strictly closer than this.
    #[serde(default = "default_room_link_threshold")]
    room_link_threshold: f64,
}

impl LinkingConfig {
    /// Creates a linking configuration with the given threshold.
    pub fn new(room_link_threshold: f64) -> Self {
        Self {
            room_link_threshold,
        }
    }

    /// Returns the link threshold.
    pub fn room_link_threshold(&self) -> f64 {
        self.room_link_threshold
    }
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_LINK_THRESHOLD)
    }
}

fn default_room_link_threshold() -> f64 {
    DEFAULT_ROOM_LINK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markup_matches_parser_defaults() {
        let config = AppConfig::default();

        assert_eq!(
            config.markup().to_markup_config(),
            MarkupConfig::default()
        );
    }

    #[test]
    fn test_partial_markup_override() {
        let section = MarkupSection {
            graph_marker: Some("corridor".to_string()),
            ..MarkupSection::default()
        };
        let markers = section.to_markup_config();

        assert!(markers.is_graph("corridor_2"));
        assert!(!markers.is_graph("graph"));
        assert!(markers.is_component("Component 0 0"));
    }
}
