//! Keyed in-memory record store.
//!
//! [`Store`] is a plain owned map from record id to record. There is no
//! global instance: whoever builds the store owns it and passes it to the
//! code that needs it, which keeps tests isolated from one another.
//!
//! The store is generic over any [`Record`]; the crate's own record type is
//! [`Entity`], giving the [`EntityStore`] alias.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::config::PersistenceConfig;
use crate::entity::Entity;
use crate::error::{ExpError, Result};
use crate::formula::Formula;
use crate::types::EntityId;

/// A value that can live in a [`Store`].
pub trait Record {
    /// Key type. Must render as a string for error messages and JSON keys.
    type Id: Eq + Hash + Clone + fmt::Display;

    /// The key this record is stored under.
    fn key(&self) -> &Self::Id;
}

/// Store of [`Entity`] records.
pub type EntityStore = Store<Entity>;

/// Map of records keyed by their id.
#[derive(Debug, Clone)]
pub struct Store<R: Record> {
    pub(crate) records: HashMap<R::Id, R>,
    pub(crate) config: PersistenceConfig,
}

impl<R: Record> Store<R> {
    /// Create an empty store using the default persistence settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&PersistenceConfig::default())
    }

    /// Create an empty store bound to `config` for `save()` / `load()`.
    #[must_use]
    pub fn with_config(config: &PersistenceConfig) -> Self {
        Self {
            records: HashMap::new(),
            config: config.clone(),
        }
    }

    /// Register a record under its key.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::DuplicateKey`] if the id is already present.
    pub fn add(&mut self, record: R) -> Result<()> {
        let id = record.key().clone();
        if self.records.contains_key(&id) {
            warn!(id = %id, "Rejected record with duplicate id");
            return Err(ExpError::DuplicateKey(id.to_string()));
        }
        debug!(id = %id, total = self.records.len() + 1, "Record added");
        self.records.insert(id, record);
        Ok(())
    }

    /// Look up a record.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] if no record has this id.
    pub fn find(&self, id: &R::Id) -> Result<&R> {
        self.records
            .get(id)
            .ok_or_else(|| ExpError::NotFound(id.to_string()))
    }

    /// Look up a record for modification.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] if no record has this id.
    pub fn find_mut(&mut self, id: &R::Id) -> Result<&mut R> {
        self.records
            .get_mut(id)
            .ok_or_else(|| ExpError::NotFound(id.to_string()))
    }

    /// Remove a record and hand it back.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] if no record has this id.
    pub fn delete(&mut self, id: &R::Id) -> Result<R> {
        let record = self
            .records
            .remove(id)
            .ok_or_else(|| ExpError::NotFound(id.to_string()))?;
        debug!(id = %id, total = self.records.len(), "Record deleted");
        Ok(record)
    }

    /// All records, in no particular order.
    #[must_use]
    pub fn list_all(&self) -> Vec<&R> {
        self.records.values().collect()
    }

    /// Iterate over all records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    /// Ids of all records, in no particular order.
    #[must_use]
    pub fn ids(&self) -> Vec<R::Id> {
        self.records.keys().cloned().collect()
    }

    /// Whether a record with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &R::Id) -> bool {
        self.records.contains_key(id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        debug!(removed = self.records.len(), "Store cleared");
        self.records.clear();
    }

    /// Persistence settings used by `save()` / `load()`.
    #[must_use]
    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }
}

impl<R: Record> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl Store<Entity> {
    /// Create an entity at `level` and register it, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::DuplicateKey`] only if a freshly generated id
    /// collides with an existing one.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        level: i64,
        formula: Formula,
    ) -> Result<EntityId> {
        let entity = Entity::with_level(name, level, formula);
        let id = entity.id();
        self.add(entity)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_heroes(store: &mut EntityStore) -> [EntityId; 3] {
        let formula = Formula::Linear;
        [
            store.spawn("Mark", 1, formula).expect("spawn"),
            store.spawn("Edward", 1, formula).expect("spawn"),
            store.spawn("Gabriel", 1, formula).expect("spawn"),
        ]
    }

    #[test]
    fn add_three_then_list() {
        let mut store = EntityStore::new();
        three_heroes(&mut store);
        assert_eq!(store.list_all().len(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut store = EntityStore::new();
        let entity = Entity::new("Mark", Formula::Linear);
        store.add(entity.clone()).expect("first add");
        let err = store.add(entity).expect_err("second add");
        assert!(matches!(err, ExpError::DuplicateKey(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_returns_registered_record() {
        let mut store = EntityStore::new();
        let [mark, ..] = three_heroes(&mut store);
        assert_eq!(store.find(&mark).expect("find").name(), "Mark");
    }

    #[test]
    fn find_unknown_is_not_found() {
        let store = EntityStore::new();
        let id = EntityId::new();
        let err = store.find(&id).expect_err("should fail");
        assert!(matches!(err, ExpError::NotFound(ref s) if *s == id.to_string()));
    }

    #[test]
    fn find_mut_writes_through() {
        let mut store = EntityStore::new();
        let [mark, ..] = three_heroes(&mut store);
        store.find_mut(&mark).expect("find").set_name("Marcus");
        assert_eq!(store.find(&mark).expect("find").name(), "Marcus");
    }

    #[test]
    fn delete_removes_and_returns() {
        let mut store = EntityStore::new();
        let [_, edward, _] = three_heroes(&mut store);
        let removed = store.delete(&edward).expect("delete");
        assert_eq!(removed.name(), "Edward");
        assert!(!store.contains(&edward));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut store = EntityStore::new();
        three_heroes(&mut store);
        let err = store.delete(&EntityId::new()).expect_err("should fail");
        assert!(matches!(err, ExpError::NotFound(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn clear_empties() {
        let mut store = EntityStore::new();
        three_heroes(&mut store);
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn ids_match_records() {
        let mut store = EntityStore::new();
        let mut expected = three_heroes(&mut store).to_vec();
        let mut ids = store.ids();
        expected.sort_by_key(ToString::to_string);
        ids.sort_by_key(ToString::to_string);
        assert_eq!(ids, expected);
    }

    #[test]
    fn stores_are_independent() {
        let mut a = EntityStore::new();
        let b = EntityStore::new();
        three_heroes(&mut a);
        assert_eq!(a.len(), 3);
        assert!(b.is_empty());
    }

    #[derive(Debug)]
    struct Tag {
        key: u32,
    }

    impl Record for Tag {
        type Id = u32;

        fn key(&self) -> &u32 {
            &self.key
        }
    }

    #[test]
    fn works_for_other_record_types() {
        let mut store: Store<Tag> = Store::new();
        store.add(Tag { key: 7 }).expect("add");
        assert!(matches!(store.add(Tag { key: 7 }), Err(ExpError::DuplicateKey(ref s)) if s == "7"));
        assert_eq!(store.find(&7).expect("find").key, 7);
    }
}
