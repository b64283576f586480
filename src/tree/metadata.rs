use serde::{Deserialize, Serialize};

/// Descriptive fields extracted from a unit page
///
/// Each field is either present with non-empty text or absent. Absent fields
/// are left out of the serialized record entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_unit_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_details: Option<String>,
}

impl UnitMetadata {
    /// Builds metadata, treating blank values as absent
    pub fn new(
        full_unit_name: Option<String>,
        location_name: Option<String>,
        location_details: Option<String>,
    ) -> Self {
        Self {
            full_unit_name: present(full_unit_name),
            location_name: present(location_name),
            location_details: present(location_details),
        }
    }

    /// Returns true if either location field is present
    pub fn has_location(&self) -> bool {
        self.location_name.is_some() || self.location_details.is_some()
    }

    pub fn has_full_name(&self) -> bool {
        self.full_unit_name.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_location() && !self.has_full_name()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
