use crate::error::{ContactorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CONTACTS_DIR: &str = "contacts";
const DEFAULT_BLOB_FILE: &str = "contacts.json";

/// Keys accepted by `get`/`set`, in display order.
pub const KEYS: [&str; 3] = ["storage", "contacts-dir", "blob-file"];

/// Which persistence strategy backs the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// One JSON file per contact
    #[default]
    Files,
    /// All contacts in a single JSON document
    Blob,
}

impl FromStr for StorageKind {
    type Err = ContactorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "files" => Ok(StorageKind::Files),
            "blob" => Ok(StorageKind::Blob),
            other => Err(ContactorError::Api(format!(
                "Unknown storage kind: {} (expected files or blob)",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Files => write!(f, "files"),
            StorageKind::Blob => write!(f, "blob"),
        }
    }
}

/// Configuration for contactor, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactorConfig {
    #[serde(default)]
    pub storage: StorageKind,

    /// Directory (relative to the data dir) holding one file per contact
    #[serde(default = "default_contacts_dir")]
    pub contacts_dir: String,

    /// File (relative to the data dir) holding the single-blob document
    #[serde(default = "default_blob_file")]
    pub blob_file: String,
}

fn default_contacts_dir() -> String {
    DEFAULT_CONTACTS_DIR.to_string()
}

fn default_blob_file() -> String {
    DEFAULT_BLOB_FILE.to_string()
}

impl Default for ContactorConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            contacts_dir: default_contacts_dir(),
            blob_file: default_blob_file(),
        }
    }
}

impl ContactorConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ContactorError::Io)?;
        let config: ContactorConfig =
            serde_json::from_str(&content).map_err(ContactorError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ContactorError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ContactorError::Serialization)?;
        fs::write(config_path, content).map_err(ContactorError::Io)?;
        Ok(())
    }

    pub fn contacts_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.contacts_dir)
    }

    pub fn blob_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.blob_file)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "storage" => Ok(self.storage.to_string()),
            "contacts-dir" => Ok(self.contacts_dir.clone()),
            "blob-file" => Ok(self.blob_file.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage" => self.storage = value.parse()?,
            "contacts-dir" => self.contacts_dir = relative_name(key, value)?,
            "blob-file" => self.blob_file = relative_name(key, value)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ContactorError {
    ContactorError::Api(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        KEYS.join(", ")
    ))
}

fn relative_name(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || Path::new(value).is_absolute() || value.contains("..") {
        return Err(ContactorError::Api(format!(
            "{} must be a relative name inside the data directory",
            key
        )));
    }
    Ok(value.to_string())
}
