use dashmap::DashMap;

use crate::store::{Error, PersistentStore};

/// An in-memory store implementation.
///
/// Values live only as long as the store itself. It backs tests and
/// non-interactive contexts that still want cart and session state to behave
/// like the real thing within one run.
///
/// ### Note
///
/// Nothing written here survives a restart. Use [`FileStore`](crate::store::file::FileStore)
/// when state must outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Returns the number of keys currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.data.get(key).map(|value| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.data.remove(key);
        Ok(())
    }
}
