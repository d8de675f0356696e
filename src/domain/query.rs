use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the dormitory room a sensor reports on.
///
/// All fields are passed to the upstream verbatim; nothing here checks that
/// the building or room actually exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomQuery {
    pub campus: String,
    pub building_id: String,
    pub room_id: String,
}

impl RoomQuery {
    pub fn new(
        campus: impl Into<String>,
        building_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            campus: campus.into(),
            building_id: building_id.into(),
            room_id: room_id.into(),
        }
    }
}

impl fmt::Display for RoomQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.campus, self.building_id, self.room_id)
    }
}
