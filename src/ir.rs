use serde::{Deserialize, Serialize};

/// One row of flat input. `id` encodes the full ancestry path; the segment
/// after the last delimiter is the node's display label, and the prefix up
/// to that delimiter names the parent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: String,
    #[serde(default)]
    pub value: f64,
}

impl FlatRecord {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}
