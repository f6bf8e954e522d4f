//! In-memory lexicon repository.
//!
//! [`repository::Repository`] is a generic arena of mutable items with dirty
//! tracking, a strictly increasing modification clock and an optional
//! [`store::Store`]. [`dictionary::LexEntryRepository`] layers sorted and
//! filtered lexicon views on top of it.

pub mod dictionary;
pub mod error;
pub mod model;
pub mod query;
pub mod repository;
pub mod store;
pub mod types;

pub use dictionary::{EntryEvent, LexEntryRepository};
pub use error::{RepositoryError, Result};
pub use lexicon_search::{MatchOptions, MatcherConfig};
