mod common {
    use crate::store::{Snapshot, Store, StoreError, Watermark};
    use crate::types::{Clock, RepositoryId};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    pub(super) fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    /// Clock that only moves when told to.
    #[derive(Default)]
    pub(super) struct ManualClock {
        now: Mutex<i64>,
    }

    impl ManualClock {
        pub(super) fn starting_at(secs: i64) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(secs),
            })
        }

        pub(super) fn advance(&self, secs: i64) {
            *self.now.lock().unwrap() += secs;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            at(*self.now.lock().unwrap())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(super) enum Call {
        Created(RepositoryId),
        Saved(Vec<RepositoryId>),
        Deleted(RepositoryId),
        DeletedAll,
    }

    /// In-memory store recording every call; shared state lets tests inspect
    /// it after the store moved into a repository.
    #[derive(Clone, Default)]
    pub(super) struct RecordingStore {
        pub(super) calls: Arc<Mutex<Vec<Call>>>,
        pub(super) items: Arc<Mutex<Vec<(RepositoryId, String)>>>,
        pub(super) watermark: Arc<Mutex<Option<Watermark>>>,
        pub(super) fail: Arc<Mutex<bool>>,
    }

    impl RecordingStore {
        pub(super) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub(super) fn set_failing(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn record(&self, call: Call, watermark: Watermark) -> Result<(), StoreError> {
            if *self.fail.lock().unwrap() {
                return Err(StoreError::Rejected("store is failing".to_string()));
            }
            self.calls.lock().unwrap().push(call);
            *self.watermark.lock().unwrap() = Some(watermark);
            Ok(())
        }

        fn upsert(&self, id: RepositoryId, item: &str) {
            let mut items = self.items.lock().unwrap();
            match items.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, value)) => *value = item.to_string(),
                None => items.push((id, item.to_string())),
            }
        }
    }

    impl Store<String> for RecordingStore {
        fn load(&mut self) -> Result<Snapshot<String>, StoreError> {
            Ok(Snapshot {
                items: self.items.lock().unwrap().clone(),
                watermark: *self.watermark.lock().unwrap(),
            })
        }

        fn item_created(
            &mut self,
            id: RepositoryId,
            item: &String,
            watermark: Watermark,
        ) -> Result<(), StoreError> {
            self.record(Call::Created(id), watermark)?;
            self.upsert(id, item);
            Ok(())
        }

        fn items_saved(
            &mut self,
            items: &[(RepositoryId, &String)],
            watermark: Watermark,
        ) -> Result<(), StoreError> {
            self.record(
                Call::Saved(items.iter().map(|(id, _)| *id).collect()),
                watermark,
            )?;
            for (id, item) in items {
                self.upsert(*id, item);
            }
            Ok(())
        }

        fn item_deleted(
            &mut self,
            id: RepositoryId,
            watermark: Watermark,
        ) -> Result<(), StoreError> {
            self.record(Call::Deleted(id), watermark)?;
            self.items.lock().unwrap().retain(|(existing, _)| *existing != id);
            Ok(())
        }

        fn all_items_deleted(&mut self, watermark: Watermark) -> Result<(), StoreError> {
            self.record(Call::DeletedAll, watermark)?;
            self.items.lock().unwrap().clear();
            Ok(())
        }
    }
}

mod lifecycle {
    use crate::error::RepositoryError;
    use crate::repository::Repository;
    use crate::types::RepositoryId;

    #[test]
    fn test_create_item_is_default_and_counted() {
        let mut repo = Repository::<String>::new(true);

        let id = repo.create_item().unwrap();

        assert_eq!(repo.get_item(id).unwrap(), "");
        assert_eq!(repo.count_all_items(), 1);
        assert!(repo.contains(id));
    }

    #[test]
    fn test_identities_are_unique_and_never_reused() {
        let mut repo = Repository::<String>::new(true);

        let a = repo.create_item().unwrap();
        let b = repo.create_item().unwrap();
        repo.delete_item(b).unwrap();
        repo.delete_all_items().unwrap();
        let c = repo.create_item().unwrap();

        assert_ne!(a, b);
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn test_get_all_items_in_insertion_order() {
        let mut repo = Repository::<String>::new(true);
        let ids: Vec<_> = (0..5).map(|_| repo.create_item().unwrap()).collect();

        repo.delete_item(ids[2]).unwrap();

        assert_eq!(repo.get_all_items(), vec![ids[0], ids[1], ids[3], ids[4]]);
        assert_eq!(repo.count_all_items(), 4);
    }

    #[test]
    fn test_get_id_by_reference() {
        let mut repo = Repository::<String>::new(true);
        let first = repo.create_item().unwrap();
        let second = repo.create_item().unwrap();

        let item = repo.get_item(second).unwrap();
        assert_eq!(repo.get_id(item).unwrap(), second);
        assert_ne!(repo.get_id(repo.get_item(first).unwrap()).unwrap(), second);
    }

    #[test]
    fn test_get_id_of_foreign_equal_value_is_out_of_range() {
        let mut repo = Repository::<String>::new(true);
        repo.create_item().unwrap();

        let foreign = String::new();
        assert!(matches!(
            repo.get_id(&foreign),
            Err(RepositoryError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_deleted_identity_is_out_of_range() {
        let mut repo = Repository::<String>::new(true);
        let id = repo.create_item().unwrap();
        repo.delete_item(id).unwrap();

        assert!(matches!(
            repo.get_item(id),
            Err(RepositoryError::OutOfRange(_))
        ));
        assert!(matches!(
            repo.delete_item(id),
            Err(RepositoryError::OutOfRange(_))
        ));
        assert!(matches!(
            repo.save_item(id),
            Err(RepositoryError::OutOfRange(_))
        ));
        assert!(repo.get_item_mut(id).is_err());
    }

    #[test]
    fn test_unknown_identity_is_out_of_range() {
        let repo = Repository::<String>::new(true);
        assert!(repo.get_item(RepositoryId::from_raw(77)).is_err());
        assert!(repo.is_dirty(RepositoryId::from_raw(77)).is_err());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut repo = Repository::<String>::new(true);
        let id = repo.create_item().unwrap();
        assert!(repo.is_dirty(id).unwrap());

        repo.save_item(id).unwrap();
        assert!(!repo.is_dirty(id).unwrap());

        repo.get_item_mut(id).unwrap().push_str("x");
        assert!(repo.is_dirty(id).unwrap());
    }

    #[test]
    fn test_capabilities_in_memory() {
        let repo = Repository::<String>::new(false);
        let caps = repo.capabilities();

        assert!(!caps.can_query);
        assert!(!caps.can_persist);
    }
}

mod last_modified {
    use super::common::{ManualClock, at};
    use crate::repository::Repository;
    use chrono::{DateTime, Utc};

    fn repo_with_clock() -> (Repository<String>, std::sync::Arc<ManualClock>) {
        let clock = ManualClock::starting_at(1_000);
        let repo = Repository::<String>::new(true).with_clock(clock.clone());
        (repo, clock)
    }

    #[test]
    fn test_initially_minimum() {
        let repo = Repository::<String>::new(true);
        assert_eq!(repo.last_modified(), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_create_sets_clock_time() {
        let (mut repo, _clock) = repo_with_clock();
        repo.create_item().unwrap();
        assert_eq!(repo.last_modified(), at(1_000));
    }

    #[test]
    fn test_strictly_increases_with_frozen_clock() {
        let (mut repo, _clock) = repo_with_clock();
        let id = repo.create_item().unwrap();
        let after_create = repo.last_modified();

        repo.save_item(id).unwrap();
        let after_save = repo.last_modified();
        repo.delete_item(id).unwrap();

        assert!(after_save > after_create);
        assert!(repo.last_modified() > after_save);
    }

    #[test]
    fn test_follows_clock_forward() {
        let (mut repo, clock) = repo_with_clock();
        repo.create_item().unwrap();

        clock.advance(60);
        repo.create_item().unwrap();

        assert_eq!(repo.last_modified(), at(1_060));
    }

    #[test]
    fn test_save_of_clean_item_still_advances() {
        let (mut repo, _clock) = repo_with_clock();
        let id = repo.create_item().unwrap();
        repo.save_item(id).unwrap();
        let before = repo.last_modified();

        repo.save_items(&[id]).unwrap();

        assert!(repo.last_modified() > before);
    }

    #[test]
    fn test_empty_save_leaves_unchanged() {
        let (mut repo, _clock) = repo_with_clock();
        repo.create_item().unwrap();
        let before = repo.last_modified();

        repo.save_items(&[]).unwrap();

        assert_eq!(repo.last_modified(), before);
    }

    #[test]
    fn test_delete_all_on_empty_leaves_unchanged() {
        let (mut repo, _clock) = repo_with_clock();

        repo.delete_all_items().unwrap();

        assert_eq!(repo.last_modified(), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_reads_do_not_advance() {
        let (mut repo, _clock) = repo_with_clock();
        let id = repo.create_item().unwrap();
        let before = repo.last_modified();

        let _ = repo.get_item(id).unwrap();
        let _ = repo.get_all_items();
        let _ = repo.count_all_items();

        assert_eq!(repo.last_modified(), before);
    }
}

mod querying {
    use crate::error::RepositoryError;
    use crate::query::DelegateQuery;
    use crate::repository::Repository;
    use crate::types::{FieldValue, Fields};

    #[allow(clippy::ptr_arg)]
    fn words(item: &String) -> Vec<Fields> {
        item.split_whitespace()
            .map(|word| Fields::from([("Word".to_string(), FieldValue::from(word))]))
            .collect()
    }

    #[test]
    fn test_rows_in_insertion_then_emission_order() {
        let mut repo = Repository::<String>::new(true);
        let a = repo.create_item().unwrap();
        let b = repo.create_item().unwrap();
        let c = repo.create_item().unwrap();
        *repo.get_item_mut(a).unwrap() = "one two".to_string();
        *repo.get_item_mut(c).unwrap() = "three".to_string();

        let results = repo.get_items_matching(&DelegateQuery::new(words)).unwrap();

        assert_eq!(results.ids(), vec![a, a, c]);
        let texts: Vec<_> = results.iter().map(|t| t.get_str("Word")).collect();
        assert_eq!(texts, vec![Some("one"), Some("two"), Some("three")]);
        assert!(results.find_first(b).is_none());
    }

    #[test]
    fn test_query_on_empty_repository() {
        let repo = Repository::<String>::new(true);
        let results = repo.get_items_matching(&DelegateQuery::new(words)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_unsupported() {
        let mut repo = Repository::<String>::new(false);
        repo.create_item().unwrap();

        assert!(matches!(
            repo.get_items_matching(&DelegateQuery::new(words)),
            Err(RepositoryError::NotSupported)
        ));
    }
}

mod persistence {
    use super::common::{Call, ManualClock, RecordingStore, at};
    use crate::error::RepositoryError;
    use crate::repository::Repository;

    fn open(store: &RecordingStore) -> Repository<String> {
        Repository::open(true, Box::new(store.clone()))
            .unwrap()
            .with_clock(ManualClock::starting_at(500))
    }

    #[test]
    fn test_capabilities_with_store() {
        let store = RecordingStore::default();
        let repo = open(&store);

        assert!(repo.capabilities().can_persist);
        assert!(repo.capabilities().can_query);
    }

    #[test]
    fn test_only_dirty_items_are_written() {
        let store = RecordingStore::default();
        let mut repo = open(&store);
        let a = repo.create_item().unwrap();
        let b = repo.create_item().unwrap();
        repo.save_items(&[a, b]).unwrap();

        *repo.get_item_mut(b).unwrap() = "changed".to_string();
        repo.save_items(&[a, b]).unwrap();

        assert_eq!(
            store.calls(),
            vec![
                Call::Created(a),
                Call::Created(b),
                Call::Saved(vec![a, b]),
                Call::Saved(vec![b]),
            ]
        );
    }

    #[test]
    fn test_delete_notifications() {
        let store = RecordingStore::default();
        let mut repo = open(&store);
        let a = repo.create_item().unwrap();
        repo.create_item().unwrap();

        repo.delete_item(a).unwrap();
        repo.delete_all_items().unwrap();
        repo.delete_all_items().unwrap();

        let calls = store.calls();
        assert_eq!(calls[2], Call::Deleted(a));
        assert_eq!(calls[3], Call::DeletedAll);
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn test_reopen_restores_items_and_watermark() {
        let store = RecordingStore::default();
        let (a, b, last_modified) = {
            let mut repo = open(&store);
            let a = repo.create_item().unwrap();
            let b = repo.create_item().unwrap();
            *repo.get_item_mut(a).unwrap() = "kept".to_string();
            repo.save_item(a).unwrap();
            repo.delete_item(b).unwrap();
            (a, b, repo.last_modified())
        };

        let mut repo = open(&store);

        assert_eq!(repo.get_all_items(), vec![a]);
        assert_eq!(repo.get_item(a).unwrap(), "kept");
        assert!(!repo.is_dirty(a).unwrap());
        assert_eq!(repo.last_modified(), last_modified);

        let c = repo.create_item().unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn test_failing_store_leaves_repository_unchanged() {
        let store = RecordingStore::default();
        let mut repo = open(&store);
        let a = repo.create_item().unwrap();
        *repo.get_item_mut(a).unwrap() = "pending".to_string();
        let before = repo.last_modified();

        store.set_failing(true);

        assert!(matches!(repo.create_item(), Err(RepositoryError::Store(_))));
        assert!(repo.save_item(a).is_err());
        assert!(repo.delete_item(a).is_err());
        assert!(repo.delete_all_items().is_err());

        assert_eq!(repo.count_all_items(), 1);
        assert!(repo.is_dirty(a).unwrap());
        assert_eq!(repo.last_modified(), before);

        store.set_failing(false);
        let b = repo.create_item().unwrap();
        assert_ne!(b, a);
        assert!(repo.last_modified() > at(0));
    }
}
