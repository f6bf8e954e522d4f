use serde::{Deserialize, Serialize};

/// Ceiling applied by `find_closest_forms` when the caller does not tune it.
pub const DEFAULT_MAX_DISTANCE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Candidates farther than this from the target are never returned.
    pub max_distance: usize,
    /// Compare canonically decomposed (NFD) text.
    pub normalize: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            normalize: true,
        }
    }
}
