use crate::error::{RepositoryError, Result};
use crate::types::collation::{Collator, InvariantCollator};
use nutype::nutype;
use std::sync::Arc;

pub const MAX_WRITING_SYSTEM_ID_LENGTH: usize = 64;

/// Tag naming a writing system, e.g. `en` or `qaa-x-kal`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_WRITING_SYSTEM_ID_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct WritingSystemId(String);

/// A writing system together with the collation used to sort its text.
#[derive(Debug, Clone)]
pub struct WritingSystem {
    id: WritingSystemId,
    collator: Arc<dyn Collator>,
}

impl WritingSystem {
    /// Uses [`InvariantCollator`].
    pub fn new(id: WritingSystemId) -> Self {
        Self::with_collator(id, Arc::new(InvariantCollator))
    }

    pub fn with_collator(id: WritingSystemId, collator: Arc<dyn Collator>) -> Self {
        Self { id, collator }
    }

    /// Builds a writing system from a raw tag, rejecting blank tags.
    pub fn parse(tag: &str) -> Result<Self> {
        let id = WritingSystemId::try_from(tag)
            .map_err(|e| RepositoryError::invalid_argument("writing_system", e.to_string()))?;
        Ok(Self::new(id))
    }

    pub fn id(&self) -> &WritingSystemId {
        &self.id
    }

    pub fn collator(&self) -> Arc<dyn Collator> {
        Arc::clone(&self.collator)
    }

    pub fn compare(&self, a: &str, b: &str) -> std::cmp::Ordering {
        self.collator.compare(a, b)
    }
}
