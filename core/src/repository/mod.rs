//! Generic in-memory repository of mutable items.
//!
//! Items live in an arena keyed by [`RepositoryId`]. Callers reach items
//! through identities, and mutation goes through [`Repository::get_item_mut`]
//! so the repository knows which items are dirty.

use crate::error::{RepositoryError, Result};
use crate::query::{Query, RecordToken, ResultSet};
use crate::store::{Store, Watermark};
use crate::types::{Clock, RepositoryId, SystemClock};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What a repository instance can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_query: bool,
    /// True exactly when a store is attached.
    pub can_persist: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            can_query: true,
            can_persist: false,
        }
    }
}

struct Slot<T> {
    item: T,
    dirty: bool,
}

pub struct Repository<T> {
    items: BTreeMap<RepositoryId, Slot<T>>,
    next_id: u64,
    last_modified: DateTime<Utc>,
    capabilities: Capabilities,
    store: Option<Box<dyn Store<T>>>,
    clock: Arc<dyn Clock>,
}

impl<T: Default> Repository<T> {
    /// Creates an empty, memory-only repository.
    pub fn new(can_query: bool) -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
            last_modified: DateTime::<Utc>::MIN_UTC,
            capabilities: Capabilities {
                can_query,
                can_persist: false,
            },
            store: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Opens a repository backed by `store`, loading everything it holds.
    pub fn open(can_query: bool, mut store: Box<dyn Store<T>>) -> Result<Self> {
        let snapshot = store.load()?;

        let highest = snapshot
            .items
            .iter()
            .map(|(id, _)| id.into_raw())
            .max()
            .unwrap_or(0);
        let (next_id, last_modified) = match snapshot.watermark {
            Some(w) => (w.next_id.max(highest + 1), w.last_modified),
            None => (highest + 1, DateTime::<Utc>::MIN_UTC),
        };

        let items = snapshot
            .items
            .into_iter()
            .map(|(id, item)| (id, Slot { item, dirty: false }))
            .collect::<BTreeMap<_, _>>();

        tracing::debug!(items = items.len(), next_id, %last_modified, "repository opened");

        Ok(Self {
            items,
            next_id,
            last_modified,
            capabilities: Capabilities {
                can_query,
                can_persist: true,
            },
            store: Some(store),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Create operations.
impl<T: Default> Repository<T> {
    /// Adds a default-initialized item and returns its identity.
    pub fn create_item(&mut self) -> Result<RepositoryId> {
        let id = RepositoryId::from_raw(self.next_id);
        let item = T::default();
        let watermark = Watermark {
            last_modified: self.next_timestamp(),
            next_id: self.next_id + 1,
        };

        if let Some(store) = self.store.as_mut() {
            store.item_created(id, &item, watermark)?;
        }

        self.items.insert(id, Slot { item, dirty: true });
        self.apply(watermark);
        tracing::debug!(%id, "item created");
        Ok(id)
    }
}

/// Read operations.
impl<T> Repository<T> {
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Time of the last successful mutation; `MIN_UTC` before the first one.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn contains(&self, id: RepositoryId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get_item(&self, id: RepositoryId) -> Result<&T> {
        self.items
            .get(&id)
            .map(|slot| &slot.item)
            .ok_or_else(|| missing(id))
    }

    /// Returns the identity of an item held by this repository.
    ///
    /// Matches by address, not by value: an equal copy is not the same item.
    pub fn get_id(&self, item: &T) -> Result<RepositoryId> {
        self.items
            .iter()
            .find(|(_, slot)| std::ptr::eq(&slot.item, item))
            .map(|(id, _)| *id)
            .ok_or_else(|| RepositoryError::OutOfRange("item".to_string()))
    }

    pub fn is_dirty(&self, id: RepositoryId) -> Result<bool> {
        self.items
            .get(&id)
            .map(|slot| slot.dirty)
            .ok_or_else(|| missing(id))
    }

    pub fn count_all_items(&self) -> usize {
        self.items.len()
    }

    /// Identities of all live items, in insertion order.
    pub fn get_all_items(&self) -> Vec<RepositoryId> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RepositoryId, &T)> {
        self.items.iter().map(|(id, slot)| (*id, &slot.item))
    }

    /// Runs `query` over every item and collects one token per emitted row.
    ///
    /// Tokens come out in insertion order, rows of one item in emission order.
    pub fn get_items_matching(&self, query: &dyn Query<T>) -> Result<ResultSet> {
        if !self.capabilities.can_query {
            return Err(RepositoryError::NotSupported);
        }

        let tokens = self.items.iter().flat_map(|(id, slot)| {
            query
                .results(&slot.item)
                .into_iter()
                .map(move |fields| RecordToken::new(*id, fields))
        });
        Ok(ResultSet::new(tokens))
    }
}

/// Update operations.
impl<T> Repository<T> {
    /// Mutable access to an item. Marks it dirty.
    pub fn get_item_mut(&mut self, id: RepositoryId) -> Result<&mut T> {
        let slot = self.items.get_mut(&id).ok_or_else(|| missing(id))?;
        slot.dirty = true;
        Ok(&mut slot.item)
    }

    pub fn save_item(&mut self, id: RepositoryId) -> Result<()> {
        self.save_items(std::slice::from_ref(&id))
    }

    /// Commits the listed items.
    ///
    /// Only dirty items reach the store, but any non-empty call advances
    /// `last_modified`. An empty slice is a no-op.
    pub fn save_items(&mut self, ids: &[RepositoryId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut dirty = Vec::new();
        for id in ids {
            let slot = self.items.get(id).ok_or_else(|| missing(*id))?;
            if slot.dirty && !dirty.contains(id) {
                dirty.push(*id);
            }
        }

        let watermark = self.watermark(self.next_timestamp());

        if let Some(store) = self.store.as_mut() {
            let batch = dirty
                .iter()
                .filter_map(|id| self.items.get(id).map(|slot| (*id, &slot.item)))
                .collect::<Vec<_>>();
            store.items_saved(&batch, watermark)?;
        }

        for id in &dirty {
            if let Some(slot) = self.items.get_mut(id) {
                slot.dirty = false;
            }
        }
        self.apply(watermark);
        tracing::debug!(requested = ids.len(), written = dirty.len(), "items saved");
        Ok(())
    }
}

/// Delete operations.
impl<T> Repository<T> {
    pub fn delete_item(&mut self, id: RepositoryId) -> Result<()> {
        if !self.items.contains_key(&id) {
            return Err(missing(id));
        }

        let watermark = self.watermark(self.next_timestamp());
        if let Some(store) = self.store.as_mut() {
            store.item_deleted(id, watermark)?;
        }

        self.items.remove(&id);
        self.apply(watermark);
        tracing::debug!(%id, "item deleted");
        Ok(())
    }

    /// Removes every item. On an empty repository nothing changes.
    pub fn delete_all_items(&mut self) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }

        let watermark = self.watermark(self.next_timestamp());
        if let Some(store) = self.store.as_mut() {
            store.all_items_deleted(watermark)?;
        }

        let count = self.items.len();
        self.items.clear();
        self.apply(watermark);
        tracing::debug!(count, "all items deleted");
        Ok(())
    }
}

/// Internal helpers.
impl<T> Repository<T> {
    /// Current time, nudged forward so `last_modified` strictly increases.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > self.last_modified {
            now
        } else {
            self.last_modified + TimeDelta::nanoseconds(1)
        }
    }

    fn watermark(&self, last_modified: DateTime<Utc>) -> Watermark {
        Watermark {
            last_modified,
            next_id: self.next_id,
        }
    }

    fn apply(&mut self, watermark: Watermark) {
        self.last_modified = watermark.last_modified;
        self.next_id = watermark.next_id;
    }
}

fn missing(id: RepositoryId) -> RepositoryError {
    RepositoryError::OutOfRange(format!("item {id}"))
}

#[cfg(test)]
mod tests;
