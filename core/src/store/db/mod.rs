//! redb-backed store.
//!
//! Layout:
//! - Items table (RepositoryId → versioned postcard record)
//! - Metadata table (JSON strings), holding the repository watermark

use crate::store::record::{decode, encode};
use crate::store::{Snapshot, Store, StoreError, Watermark};
use crate::types::RepositoryId;
use redb::{ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::Path;

/// Items table: RepositoryId → record bytes
const ITEMS_TABLE: TableDefinition<RepositoryId, &[u8]> = TableDefinition::new("items");

/// Metadata table: &str → JSON string
const METADATA_TABLE: TableDefinition<&str, &str> = TableDefinition::new("metadata");

const METADATA_KEY_WATERMARK: &str = "watermark";

/// Persists repository items in a single redb file, one transaction per
/// repository operation.
pub struct RedbStore<T> {
    db: redb::Database,
    _items: PhantomData<fn() -> T>,
}

impl<T> RedbStore<T> {
    /// Creates or opens the database file at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = redb::Database::create(path)?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ITEMS_TABLE)?;
            let _ = write_txn.open_table(METADATA_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db,
            _items: PhantomData,
        })
    }
}

/// Internal helpers.
impl<T> RedbStore<T> {
    fn write_watermark(
        write_txn: &WriteTransaction,
        watermark: Watermark,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(&watermark)?;
        let mut table = write_txn.open_table(METADATA_TABLE)?;
        table.insert(METADATA_KEY_WATERMARK, json.as_str())?;
        Ok(())
    }

    fn read_watermark(&self) -> Result<Option<Watermark>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(METADATA_TABLE)?;
        match table.get(METADATA_KEY_WATERMARK)? {
            Some(guard) => Ok(Some(serde_json::from_str(guard.value())?)),
            None => Ok(None),
        }
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for RedbStore<T> {
    fn load(&mut self) -> Result<Snapshot<T>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;

        let mut items = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let id = key.value();
            items.push((id, decode(id, value.value())?));
        }

        let watermark = self.read_watermark()?;
        tracing::debug!(items = items.len(), ?watermark, "loaded snapshot");

        Ok(Snapshot { items, watermark })
    }

    fn item_created(
        &mut self,
        id: RepositoryId,
        item: &T,
        watermark: Watermark,
    ) -> Result<(), StoreError> {
        let record = encode(item)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ITEMS_TABLE)?;
            table.insert(id, record.as_slice())?;
        }
        Self::write_watermark(&write_txn, watermark)?;
        write_txn.commit()?;
        Ok(())
    }

    fn items_saved(
        &mut self,
        items: &[(RepositoryId, &T)],
        watermark: Watermark,
    ) -> Result<(), StoreError> {
        let records = items
            .iter()
            .map(|(id, item)| encode(*item).map(|record| (*id, record)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ITEMS_TABLE)?;
            for (id, record) in &records {
                table.insert(*id, record.as_slice())?;
            }
        }
        Self::write_watermark(&write_txn, watermark)?;
        write_txn.commit()?;
        Ok(())
    }

    fn item_deleted(&mut self, id: RepositoryId, watermark: Watermark) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ITEMS_TABLE)?;
            table.remove(id)?;
        }
        Self::write_watermark(&write_txn, watermark)?;
        write_txn.commit()?;
        Ok(())
    }

    fn all_items_deleted(&mut self, watermark: Watermark) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ITEMS_TABLE)?;
            let ids = table
                .iter()?
                .map(|entry| entry.map(|(key, _)| key.value()))
                .collect::<Result<Vec<_>, _>>()?;
            for id in ids {
                table.remove(id)?;
            }
        }
        Self::write_watermark(&write_txn, watermark)?;
        write_txn.commit()?;
        Ok(())
    }
}
