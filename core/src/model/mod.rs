//! Lexicon entries as stored in the repository.

mod entry;
mod multitext;

pub use entry::{LexEntry, LexSense, SEMANTIC_DOMAIN_DDP4};
pub use multitext::{LanguageForm, MultiText};
