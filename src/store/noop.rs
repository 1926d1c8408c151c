use crate::store::{Error, PersistentStore};

/// A store for contexts with no storage host at all.
///
/// Reads always come back empty and writes are accepted and dropped, so cart
/// and session code running outside an interactive host degrades to an
/// empty, unauthenticated state instead of failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStore;

impl NoopStore {
    pub fn new() -> Self {
        Self
    }
}

impl PersistentStore for NoopStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        tracing::trace!(key, "no storage host, nothing to read");
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), Error> {
        tracing::trace!(key, "no storage host, dropping write");
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Ok(())
    }
}
