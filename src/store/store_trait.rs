use serde::{Serialize, de::DeserializeOwned};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Encoding failed with: {0}")]
    Encode(String),

    #[error("Decoding failed with: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Backend(String),
}

/// Durable, origin-scoped key-value storage.
///
/// Every value is a string. Structured state is encoded with
/// [`serialize_value`] before it is handed to the store, so a backend never has
/// to know what it holds.
///
/// Implementations are synchronous: a `set` or `remove` that returns `Ok` must
/// already be visible to the next `get`, and durable if the backend is.
pub trait PersistentStore: Send + Sync + 'static {
    /// Gets the `value` stored at `key`.
    ///
    /// Returns `None` if the `key` does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Sets `key` to `value`, fully overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Removes `key` along with its value.
    ///
    /// Removing a `key` that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

pub(crate) fn serialize_value<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::Encode(e.to_string()))
}

pub(crate) fn deserialize_value<T: DeserializeOwned>(value: &str) -> Result<T, Error> {
    serde_json::from_str(value).map_err(|e| Error::Decode(e.to_string()))
}

/// Reads and decodes the value at `key`.
///
/// A missing key yields `T::default()`. So does a value that fails to decode:
/// corrupt data is logged and treated as absent, never surfaced to the caller.
/// Only backend failures are returned as errors.
pub(crate) fn read_or_default<S, T>(store: &S, key: &str) -> Result<T, Error>
where
    S: PersistentStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        tracing::debug!(key, "no persisted value");
        return Ok(T::default());
    };

    match deserialize_value(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(key, err = %err, "discarding unreadable persisted value");
            Ok(T::default())
        }
    }
}

/// Encodes `value` and writes it at `key`.
pub(crate) fn write_value<S, T>(store: &S, key: &str, value: &T) -> Result<(), Error>
where
    S: PersistentStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serialize_value(value)?;
    store.set(key, &encoded).map_err(|err| {
        tracing::error!(key, err = %err, "failed to persist value");
        err
    })
}
