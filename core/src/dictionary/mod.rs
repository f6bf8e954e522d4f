//! Lexicon-specific repository: entry lifecycle plus the sorted and filtered
//! views dictionary tools browse by.

mod events;
pub mod fields;
mod views;

pub use events::{EntryEvent, EntryListener};

use crate::dictionary::events::Listeners;
use crate::error::Result;
use crate::model::LexEntry;
use crate::repository::{Capabilities, Repository};
use crate::store::{RedbStore, Store};
use crate::types::{Clock, Config, RepositoryConfig, RepositoryId};
use lexicon_search::MatcherConfig;
use std::sync::Arc;

pub struct LexEntryRepository {
    entries: Repository<LexEntry>,
    matcher: MatcherConfig,
    listeners: Listeners,
}

impl LexEntryRepository {
    /// Creates an empty, memory-only repository.
    pub fn new(config: &RepositoryConfig) -> Self {
        Self::from_parts(Repository::new(config.repository.can_query), config)
    }

    /// Opens a repository backed by `store`.
    pub fn open(config: &RepositoryConfig, store: Box<dyn Store<LexEntry>>) -> Result<Self> {
        let entries = Repository::open(config.repository.can_query, store)?;
        Ok(Self::from_parts(entries, config))
    }

    /// Opens (or creates) the redb file located by `paths`.
    pub fn open_redb(paths: &Config, config: &RepositoryConfig) -> Result<Self> {
        let store = RedbStore::<LexEntry>::open(&paths.db_path())?;
        Self::open(config, Box::new(store))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.entries = self.entries.with_clock(clock);
        self
    }

    fn from_parts(entries: Repository<LexEntry>, config: &RepositoryConfig) -> Self {
        Self {
            entries,
            matcher: config.matcher.clone(),
            listeners: Listeners::default(),
        }
    }

    /// Subscribes to entry modifications and deletions.
    pub fn on_entry_event(&mut self, listener: EntryListener) {
        self.listeners.push(listener);
    }

    pub fn repository(&self) -> &Repository<LexEntry> {
        &self.entries
    }
}

/// Entry lifecycle.
impl LexEntryRepository {
    /// Creates an entry stamped with the repository clock.
    pub fn create_item(&mut self) -> Result<RepositoryId> {
        let id = self.entries.create_item()?;
        let now = self.entries.clock().now();
        self.entries.get_item_mut(id)?.stamp_created(now);
        Ok(id)
    }

    pub fn get_item(&self, id: RepositoryId) -> Result<&LexEntry> {
        self.entries.get_item(id)
    }

    /// Mutable access; refreshes the entry's modification time.
    pub fn get_item_mut(&mut self, id: RepositoryId) -> Result<&mut LexEntry> {
        let now = self.entries.clock().now();
        let entry = self.entries.get_item_mut(id)?;
        entry.touch(now);
        Ok(entry)
    }

    pub fn get_id(&self, entry: &LexEntry) -> Result<RepositoryId> {
        self.entries.get_id(entry)
    }

    pub fn is_dirty(&self, id: RepositoryId) -> Result<bool> {
        self.entries.is_dirty(id)
    }

    pub fn save_item(&mut self, id: RepositoryId) -> Result<()> {
        self.save_items(std::slice::from_ref(&id))
    }

    /// Saves `ids`, then reports each entry that had pending changes.
    pub fn save_items(&mut self, ids: &[RepositoryId]) -> Result<()> {
        let mut dirty = Vec::new();
        for id in ids {
            if self.entries.is_dirty(*id)? && !dirty.contains(id) {
                dirty.push(*id);
            }
        }
        let modified = dirty
            .iter()
            .map(|id| self.entries.get_item(*id).map(LexEntry::label))
            .collect::<Result<Vec<_>>>()?;

        self.entries.save_items(ids)?;

        for label in modified {
            self.listeners.emit(&EntryEvent::Modified { label });
        }
        Ok(())
    }

    pub fn delete_item(&mut self, id: RepositoryId) -> Result<()> {
        let label = self.entries.get_item(id)?.label();
        self.entries.delete_item(id)?;
        self.listeners.emit(&EntryEvent::Deleted { label });
        Ok(())
    }

    pub fn delete_all_items(&mut self) -> Result<()> {
        let labels = self
            .entries
            .iter()
            .map(|(_, entry)| entry.label())
            .collect::<Vec<_>>();
        self.entries.delete_all_items()?;
        for label in labels {
            self.listeners.emit(&EntryEvent::Deleted { label });
        }
        Ok(())
    }

    pub fn count_all_items(&self) -> usize {
        self.entries.count_all_items()
    }

    pub fn get_all_items(&self) -> Vec<RepositoryId> {
        self.entries.get_all_items()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.entries.capabilities()
    }

    pub fn last_modified(&self) -> chrono::DateTime<chrono::Utc> {
        self.entries.last_modified()
    }
}
