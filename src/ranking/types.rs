use serde::{Deserialize, Serialize};

/// A record reduced to what the ranking view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub identifier: String,
    pub score: f64,
}

/// Ranked entries, highest score first, never longer than the requested K.
pub type Dataset = Vec<RankedEntry>;
