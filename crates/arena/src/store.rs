//! In-memory match store with optimistic concurrency.
//!
//! Persistence belongs to the caller; this store is the reference
//! collaborator the CLI and tests run against. Every save must name the
//! version it read, so two writers racing on one match cannot both win.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{MatchError, MatchSnapshot, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored value and the version it was written at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Storage for match snapshots.
pub trait MatchStore: Send + Sync {
    /// Store a new match at version 0.
    fn create(&self, snapshot: MatchSnapshot) -> MatchId;

    fn load(&self, id: MatchId) -> Result<Versioned<MatchSnapshot>>;

    /// Replace the snapshot if the stored version is still `expected_version`.
    ///
    /// Returns the new version.
    fn save(&self, id: MatchId, expected_version: u64, snapshot: MatchSnapshot) -> Result<u64>;
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    matches: HashMap<MatchId, Versioned<MatchSnapshot>>,
}

/// A [`MatchStore`] kept in process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MatchStore for MemoryStore {
    fn create(&self, snapshot: MatchSnapshot) -> MatchId {
        let mut inner = self.inner.lock();
        let id = MatchId(inner.next_id);
        inner.next_id += 1;
        inner.matches.insert(
            id,
            Versioned {
                version: 0,
                value: snapshot,
            },
        );
        id
    }

    fn load(&self, id: MatchId) -> Result<Versioned<MatchSnapshot>> {
        self.inner
            .lock()
            .matches
            .get(&id)
            .cloned()
            .ok_or(MatchError::MatchNotFound(id))
    }

    fn save(&self, id: MatchId, expected_version: u64, snapshot: MatchSnapshot) -> Result<u64> {
        let mut inner = self.inner.lock();
        let entry = inner
            .matches
            .get_mut(&id)
            .ok_or(MatchError::MatchNotFound(id))?;
        if entry.version != expected_version {
            return Err(MatchError::StaleSnapshot {
                expected: expected_version,
                found: entry.version,
            });
        }
        entry.version += 1;
        entry.value = snapshot;
        Ok(entry.version)
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore").field("matches", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardState, GameType};
    use arena_core::Side;

    fn snapshot() -> MatchSnapshot {
        MatchSnapshot::new(BoardState::starting(GameType::TicTacToe), Side::First)
    }

    #[test]
    fn test_create_and_load() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        let a = store.create(snapshot());
        let b = store.create(snapshot());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        let loaded = store.load(a).unwrap();
        assert_eq!(loaded.version, 0);
        assert_eq!(loaded.value, snapshot());
    }

    #[test]
    fn test_missing_match() {
        let store = MemoryStore::new();
        assert_eq!(store.load(MatchId(3)).unwrap_err(), MatchError::MatchNotFound(MatchId(3)));
        assert!(store.save(MatchId(3), 0, snapshot()).is_err());
    }

    #[test]
    fn test_save_bumps_version() {
        let store = MemoryStore::new();
        let id = store.create(snapshot());
        assert_eq!(store.save(id, 0, snapshot()).unwrap(), 1);
        assert_eq!(store.save(id, 1, snapshot()).unwrap(), 2);
        assert_eq!(store.load(id).unwrap().version, 2);
    }

    #[test]
    fn test_stale_save_rejected() {
        let store = MemoryStore::new();
        let id = store.create(snapshot());
        store.save(id, 0, snapshot()).unwrap();

        let err = store.save(id, 0, snapshot()).unwrap_err();
        assert_eq!(err, MatchError::StaleSnapshot { expected: 0, found: 1 });
        assert_eq!(store.load(id).unwrap().version, 1);
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryStore>();
        let store: Box<dyn MatchStore> = Box::new(MemoryStore::new());
        store.create(snapshot());
    }
}
