use crate::error::{ContactorError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// String-keyed get/set/remove storage.
///
/// `read_item` tells "nothing stored" (`Ok(None)`) apart from "could not
/// read" (`Err`). `get_item` is the best-effort view of it: failures are
/// logged and reported as no data. Removes are best effort too. Writes
/// propagate their errors.
pub trait KeyValueStorage: Send + Sync {
    fn read_item(&self, key: &str) -> Result<Option<String>>;

    fn get_item(&self, key: &str) -> Option<String> {
        self.read_item(key).unwrap_or_else(|e| {
            tracing::error!(key, "error reading storage item: {}", e);
            None
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str);
}

/// A single file holding one serialized blob. Every key addresses the same
/// file; the key only shows up in logs.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ContactorError::Io)?;
            }
        }

        let tmp = self.path.with_file_name(format!(".blob-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, value).map_err(ContactorError::Io)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(ContactorError::Io(e));
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn read_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!(key, path = %self.path.display(), "error reading storage file: {}", e);
                Err(ContactorError::Io(e))
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write(value).inspect_err(|e| {
            tracing::error!(key, path = %self.path.display(), "error writing storage file: {}", e);
        })
    }

    fn remove_item(&self, key: &str) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!(key, path = %self.path.display(), "error removing storage file: {}", e);
            }
        }
    }
}

/// In-memory key/value storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.lock().remove(key);
    }
}
