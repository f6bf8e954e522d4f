//! Persistence seam for repositories.
//!
//! A [`crate::repository::Repository`] owns its items in memory. When a store
//! is attached, every mutating operation is reported to the store before it is
//! applied, so a failing store leaves the repository unchanged.

use crate::types::RepositoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod db;
mod error;
mod record;

pub use db::RedbStore;
pub use error::StoreError;

/// Repository bookkeeping that must survive a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub last_modified: DateTime<Utc>,
    /// Next identity to hand out. Identities are never reused.
    pub next_id: u64,
}

/// Everything a store hands back when a repository is opened.
#[derive(Debug)]
pub struct Snapshot<T> {
    /// Items in identity order.
    pub items: Vec<(RepositoryId, T)>,
    /// `None` for a store that has never been written.
    pub watermark: Option<Watermark>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            watermark: None,
        }
    }
}

/// Durable backing for a repository.
///
/// Each call carries the watermark the repository will have once the
/// operation is applied.
pub trait Store<T> {
    fn load(&mut self) -> Result<Snapshot<T>, StoreError>;

    fn item_created(
        &mut self,
        id: RepositoryId,
        item: &T,
        watermark: Watermark,
    ) -> Result<(), StoreError>;

    /// Called with the dirty subset of a save; may be empty.
    fn items_saved(
        &mut self,
        items: &[(RepositoryId, &T)],
        watermark: Watermark,
    ) -> Result<(), StoreError>;

    fn item_deleted(&mut self, id: RepositoryId, watermark: Watermark) -> Result<(), StoreError>;

    fn all_items_deleted(&mut self, watermark: Watermark) -> Result<(), StoreError>;
}
