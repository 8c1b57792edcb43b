//! Location domain entity

/// A parking location, e.g. a mall or campus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Externally assigned, unique
    pub location_id: String,
    pub name: String,
    pub district: String,
    pub state: String,
}

impl Location {
    pub fn new(
        location_id: impl Into<String>,
        name: impl Into<String>,
        district: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            name: name.into(),
            district: district.into(),
            state: state.into(),
        }
    }
}
