//! Entity identifiers and the save-time identity registry.
//!
//! Two kinds of integer ids exist:
//!
//! - [`EntityId`] is the permanent id of a model entity inside one document.
//!   On load, the id declared in the file becomes the entity's permanent id.
//! - [`IdRegistry`] hands out transient ids during a single save pass. They
//!   are what gets written to the file.

use std::{collections::HashMap, fmt, hash::Hash};

/// Permanent identifier of a model entity within its document.
///
/// # Examples
///
/// ```
/// use pyut_core::identifier::EntityId;
///
/// let id = EntityId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assigns stable integer ids to entity references for one save pass.
///
/// The first call to [`IdRegistry::id_for`] with a given key allocates the
/// next integer, starting at 1. Later calls with the same key return the
/// same integer. The counter belongs to the instance, so a fresh registry
/// must be created for every save.
///
/// The key type is whatever uniquely names an entity slot for the caller;
/// the serializer uses `(document index, EntityId)`.
///
/// # Examples
///
/// ```
/// use pyut_core::identifier::IdRegistry;
///
/// let mut registry = IdRegistry::new();
/// assert_eq!(registry.id_for("animal"), 1);
/// assert_eq!(registry.id_for("dog"), 2);
/// assert_eq!(registry.id_for("animal"), 1);
/// ```
#[derive(Debug)]
pub struct IdRegistry<K> {
    ids: HashMap<K, u32>,
    next_id: u32,
}

impl<K> Default for IdRegistry<K> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<K> IdRegistry<K>
where
    K: Hash + Eq,
{
    /// Creates an empty registry whose first allocation will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `key`, allocating the next one on first use.
    pub fn id_for(&mut self, key: K) -> u32 {
        let next_id = &mut self.next_id;
        *self.ids.entry(key).or_insert_with(|| {
            let id = *next_id;
            *next_id += 1;
            id
        })
    }

    /// Returns the id already allocated for `key` without allocating.
    pub fn get(&self, key: &K) -> Option<u32> {
        self.ids.get(key).copied()
    }

    /// Number of ids allocated so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_registry_starts_at_one() {
        let mut registry = IdRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.id_for((0usize, EntityId::new(42))), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_same_key_same_id() {
        let mut registry = IdRegistry::new();
        let first = registry.id_for((0usize, EntityId::new(3)));
        let _ = registry.id_for((0usize, EntityId::new(4)));
        assert_eq!(registry.id_for((0usize, EntityId::new(3))), first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_same_entity_id_in_different_documents() {
        let mut registry = IdRegistry::new();
        let a = registry.id_for((0usize, EntityId::new(1)));
        let b = registry.id_for((1usize, EntityId::new(1)));
        assert_ne!(a, b);
    }

    #[test]
    fn test_registry_instances_are_independent() {
        let mut first = IdRegistry::new();
        first.id_for("a");
        first.id_for("b");

        let mut second = IdRegistry::new();
        assert_eq!(second.id_for("c"), 1);
    }

    #[test]
    fn test_registry_get_does_not_allocate() {
        let mut registry = IdRegistry::new();
        assert_eq!(registry.get(&"missing"), None);
        registry.id_for("present");
        assert_eq!(registry.get(&"present"), Some(1));
        assert_eq!(registry.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_registry_ids_unique_and_stable(keys in proptest::collection::vec(0u32..64, 0..200)) {
            let mut registry = IdRegistry::new();
            let mut assigned: HashMap<u32, u32> = HashMap::new();

            for key in keys {
                let id = registry.id_for(key);
                if let Some(previous) = assigned.insert(key, id) {
                    prop_assert_eq!(previous, id);
                }
            }

            let distinct: HashSet<u32> = assigned.values().copied().collect();
            prop_assert_eq!(distinct.len(), assigned.len());
            prop_assert!(assigned.values().all(|id| *id >= 1 && *id as usize <= assigned.len()));
        }
    }
}
