//! Naming conventions the parser relies on.

/// Markers identifying the roles of elements in a floor-plan document.
///
/// Markers are matched as substrings of element ids, except for the room
/// group names which must equal the innermost open group's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupConfig {
    component_marker: String,
    graph_marker: String,
    skip_marker: String,
    staircase_marker: String,
    room_groups: Vec<String>,
}

impl MarkupConfig {
    /// Creates a configuration from explicit markers.
    ///
    /// # Arguments
    ///
    /// * `component_marker` - Ids declaring a component offset (`<marker> <x> <y>`).
    /// * `graph_marker` - Ids of paths that make up the corridor graph.
    /// * `skip_marker` - Ids of groups whose content is ignored.
    /// * `staircase_marker` - Ids of staircase groups and their landings.
    /// * `room_groups` - Ids of the groups holding room number labels.
    pub fn new(
        component_marker: impl Into<String>,
        graph_marker: impl Into<String>,
        skip_marker: impl Into<String>,
        staircase_marker: impl Into<String>,
        room_groups: Vec<String>,
    ) -> Self {
        Self {
            component_marker: component_marker.into(),
            graph_marker: graph_marker.into(),
            skip_marker: skip_marker.into(),
            staircase_marker: staircase_marker.into(),
            room_groups,
        }
    }

    /// Marker of component offset ids.
    pub fn component_marker(&self) -> &str {
        &self.component_marker
    }

    /// Marker of graph path ids.
    pub fn graph_marker(&self) -> &str {
        &self.graph_marker
    }

    /// Marker of skipped group ids.
    pub fn skip_marker(&self) -> &str {
        &self.skip_marker
    }

    /// Marker of staircase ids.
    pub fn staircase_marker(&self) -> &str {
        &self.staircase_marker
    }

    /// Names of room label groups.
    pub fn room_groups(&self) -> &[String] {
        &self.room_groups
    }

    /// Whether `id` declares a component offset.
    pub fn is_component(&self, id: &str) -> bool {
        id.contains(&self.component_marker)
    }

    /// Whether `id` marks graph geometry.
    pub fn is_graph(&self, id: &str) -> bool {
        id.contains(&self.graph_marker)
    }

    /// Whether `id` marks a group to skip.
    pub fn is_skipped(&self, id: &str) -> bool {
        id.contains(&self.skip_marker)
    }

    /// Whether `id` refers to a staircase.
    pub fn is_staircase(&self, id: &str) -> bool {
        id.contains(&self.staircase_marker)
    }

    /// Whether `id` names a room label group.
    pub fn is_room_group(&self, id: &str) -> bool {
        self.room_groups.iter().any(|group| group == id)
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self::new(
            "Component",
            "graph",
            "no_use",
            "staircase",
            vec!["rooms_numbers".to_string(), "room_ids".to_string()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let config = MarkupConfig::default();

        assert!(config.is_component("Component 10 20"));
        assert!(config.is_graph("main_graph_2"));
        assert!(config.is_skipped("old_no_use"));
        assert!(config.is_staircase("staircase 2"));
        assert!(config.is_room_group("room_ids"));
        assert!(!config.is_room_group("room_ids_old"));
    }
}
