//! Approximate string matching for lexicon lookups.
//!
//! Provides a bounded Damerau-Levenshtein distance and the closest-form
//! selection built on top of it.
//!
//! # Design
//!
//! - `edit_distance` gives up as soon as the distance provably exceeds the
//!   caller's maximum and reports that with `None`.
//! - Suffix-forgiving mode makes the unmatched tail of the second argument
//!   free, so a target matches every longer form it is a prefix of.
//! - `find_closest_forms_by` keeps the best distance tier and, on request, the
//!   next-closest tier. Candidates keep their input order within a tier.
//!
//! Everything here is pure and synchronous; the crate knows nothing about the
//! repository it is used from.

mod config;
mod distance;
mod engine;
mod query;
mod results;

pub use config::{DEFAULT_MAX_DISTANCE, MatcherConfig};
pub use distance::edit_distance;
pub use engine::{find_closest_forms, find_closest_forms_by};
pub use query::MatchOptions;
