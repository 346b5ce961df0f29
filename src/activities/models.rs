use indexmap::IndexSet;
use serde::Deserialize;

/// Raw entry from `GET /api/activities`.
#[derive(Debug, Deserialize)]
pub struct RawActivity {
    pub title: String,
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Catalog entry as the planner consumes it.
///
/// Ids are assigned by position at normalization time and are not stable
/// across reloads. `weather_tags` keeps the source order of the tag list
/// while deduplicating repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: u32,
    pub title: String,
    pub icon: String,
    pub weather_tags: IndexSet<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}
