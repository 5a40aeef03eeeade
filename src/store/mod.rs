mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend, StoreError};

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::{Collection, MovieId, MovieRecord};

/// The three personal movie collections, persisted as JSON blobs.
///
/// Each collection serializes independently under its own storage key; there
/// is no cross-collection transaction, and a movie may legally sit in all
/// three at once. Reads degrade to empty on any storage failure. Mutations
/// are read-modify-write cycles serialized by an internal lock and report
/// persistence failures to the caller; the default consumers log and move on
/// rather than surfacing them.
pub struct ListStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl ListStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens a file-backed store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(dir)))
    }

    /// Reads a collection in insertion order (oldest first).
    ///
    /// An absent key, a malformed blob, or a storage failure all read as an
    /// empty collection; the failure is logged, never raised.
    pub fn load(&self, list: Collection) -> Vec<MovieRecord> {
        match self.backend.get(list.key()) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(records) => records,
                Err(error) => {
                    tracing::warn!(list = %list, %error, "malformed list blob, reading as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(list = %list, %error, "list read failed, reading as empty");
                Vec::new()
            }
        }
    }

    /// Reads a collection in display order (most recently added first)
    pub fn load_recent_first(&self, list: Collection) -> Vec<MovieRecord> {
        let mut records = self.load(list);
        records.reverse();
        records
    }

    /// True iff a record with this identifier is in the collection
    pub fn contains(&self, list: Collection, id: MovieId) -> bool {
        self.load(list).iter().any(|m| m.id == id)
    }

    /// Appends `movie` to the collection.
    ///
    /// Idempotent: a record whose identifier is already present is left
    /// untouched and `Ok(false)` is returned.
    pub fn add(&self, list: Collection, movie: MovieRecord) -> Result<bool, StoreError> {
        let _guard = self.guard();
        let mut records = self.load(list);
        if records.iter().any(|m| m.id == movie.id) {
            return Ok(false);
        }
        records.push(movie);
        self.persist(list, &records)?;
        Ok(true)
    }

    /// Removes the record with this identifier, if present.
    ///
    /// Returns `Ok(false)` without writing when the identifier is absent.
    pub fn remove(&self, list: Collection, id: MovieId) -> Result<bool, StoreError> {
        let _guard = self.guard();
        let mut records = self.load(list);
        let before = records.len();
        records.retain(|m| m.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(list, &records)?;
        Ok(true)
    }

    /// Flips membership for `movie`, returning whether it is now present
    pub fn toggle(&self, list: Collection, movie: MovieRecord) -> Result<bool, StoreError> {
        let _guard = self.guard();
        let mut records = self.load(list);
        match records.iter().position(|m| m.id == movie.id) {
            Some(index) => {
                records.remove(index);
                self.persist(list, &records)?;
                Ok(false)
            }
            None => {
                records.push(movie);
                self.persist(list, &records)?;
                Ok(true)
            }
        }
    }

    /// Deletes the collection's persisted key. Irreversible; any confirmation
    /// step belongs to the caller.
    pub fn clear(&self, list: Collection) -> Result<(), StoreError> {
        let _guard = self.guard();
        self.backend.remove(list.key())
    }

    fn persist(&self, list: Collection, records: &[MovieRecord]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(records)?;
        self.backend.set(list.key(), &blob)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
