//! Indexed entity storage.
//!
//! A registry keeps entities in insertion order and indexes them by
//! identifier, so iteration is stable and lookup is O(1).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::domain::{Driver, DriverId, Passenger, PassengerId, Trip, TripId};

use super::DispatchError;

/// An entity with a unique identifier.
pub trait Keyed {
    type Key: Copy + Eq + Hash + fmt::Debug + Into<u32>;

    /// Entity kind name used in error messages.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;
}

impl Keyed for Passenger {
    type Key = PassengerId;
    const KIND: &'static str = PassengerId::KIND;

    fn key(&self) -> PassengerId {
        self.id()
    }
}

impl Keyed for Driver {
    type Key = DriverId;
    const KIND: &'static str = DriverId::KIND;

    fn key(&self) -> DriverId {
        self.id()
    }
}

impl Keyed for Trip {
    type Key = TripId;
    const KIND: &'static str = TripId::KIND;

    fn key(&self) -> TripId {
        self.id()
    }
}

/// Insertion-ordered storage indexed by key.
#[derive(Debug, Clone)]
pub struct Registry<V: Keyed> {
    items: Vec<V>,
    index: HashMap<V::Key, usize>,
}

impl<V: Keyed> Default for Registry<V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Keyed> Registry<V> {
    /// Build a registry, rejecting duplicate identifiers.
    pub fn from_vec(items: Vec<V>) -> Result<Self, DispatchError> {
        let mut registry = Self::default();
        for item in items {
            registry.insert(item)?;
        }
        Ok(registry)
    }

    /// Append an entity. Fails without modifying anything if the key is taken.
    pub fn insert(&mut self, item: V) -> Result<usize, DispatchError> {
        let key = item.key();
        if self.index.contains_key(&key) {
            return Err(self.duplicate(key));
        }
        let idx = self.items.len();
        self.index.insert(key, idx);
        self.items.push(item);
        Ok(idx)
    }

    pub fn get(&self, key: V::Key) -> Option<&V> {
        self.index.get(&key).map(|&idx| &self.items[idx])
    }

    /// Position of an entity in insertion order.
    pub fn position(&self, key: V::Key) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Like [`Registry::get`], but returns a `NotFound` error.
    pub fn require(&self, key: V::Key) -> Result<&V, DispatchError> {
        self.get(key).ok_or_else(|| self.not_found(key))
    }

    /// Like [`Registry::position`], but returns a `NotFound` error.
    pub fn require_position(&self, key: V::Key) -> Result<usize, DispatchError> {
        self.position(key).ok_or_else(|| self.not_found(key))
    }

    /// Mutable access by position. Positions come from this registry, so
    /// they are always in bounds.
    pub fn at_mut(&mut self, idx: usize) -> &mut V {
        &mut self.items[idx]
    }

    pub fn as_slice(&self) -> &[V] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn not_found(&self, key: V::Key) -> DispatchError {
        DispatchError::NotFound {
            kind: V::KIND,
            id: key.into(),
        }
    }

    fn duplicate(&self, key: V::Key) -> DispatchError {
        DispatchError::DuplicateId {
            kind: V::KIND,
            id: key.into(),
        }
    }
}
