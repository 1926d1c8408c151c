use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::store::{Error, PersistentStore, deserialize_value, serialize_value};

/// A durable store backed by a single JSON file.
///
/// The whole key space is kept in memory and the file is rewritten on every
/// `set` and `remove`. Writes go to a sibling temporary file first and are
/// renamed over the original, so a crash mid-write leaves either the old or the
/// new contents on disk, never a torn file.
///
/// One file corresponds to one storage origin. Two applications sharing a file
/// should namespace their keys with [`StorageKeys::prefix`](crate::StorageKeys::prefix).
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use dairy_session::CartStore;
/// use dairy_session::store::file::FileStore;
///
/// let store = Arc::new(FileStore::open("/var/lib/dairy/storage.json").unwrap());
/// let cart = CartStore::restore(store).unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading whatever it already holds.
    ///
    /// A missing file is an empty store; it is created on the first write.
    /// A file that cannot be parsed is treated as empty and will be overwritten
    /// by the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let data = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match deserialize_value(&contents) {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!(path = %path.display(), err = %err, "discarding unreadable store file");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file does not exist yet");
                BTreeMap::new()
            }
            Err(err) => {
                tracing::error!(path = %path.display(), err = %err, "failed to read store file");
                return Err(err.into());
            }
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, data: &BTreeMap<String, String>) -> Result<(), Error> {
        let encoded = serialize_value(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        let written = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(encoded.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        });

        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        Ok(())
    }

    /// `<path>.tmp`, next to the store file and never equal to it.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut data = self.data.lock();
        let previous = data.insert(key.to_string(), value.to_string());

        // memory must not run ahead of the file
        if let Err(err) = self.flush(&data) {
            match previous {
                Some(previous) => data.insert(key.to_string(), previous),
                None => data.remove(key),
            };
            tracing::error!(path = %self.path.display(), err = %err, "failed to write store file");
            return Err(err);
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut data = self.data.lock();
        let Some(previous) = data.remove(key) else {
            return Ok(());
        };

        if let Err(err) = self.flush(&data) {
            data.insert(key.to_string(), previous);
            tracing::error!(path = %self.path.display(), err = %err, "failed to write store file");
            return Err(err);
        }

        Ok(())
    }
}
