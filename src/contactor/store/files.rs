use super::backend::StorageBackend;
use crate::error::{ContactorError, Result};
use crate::model::Contact;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 50;
const FALLBACK_NAME: &str = "Unknown";

/// Reduce a contact name to something safe for a filename.
///
/// Keeps ASCII letters, digits, whitespace and `-`, turns each whitespace run
/// into a single `_`, and caps the result at 50 characters.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '-' {
            out.push(c);
            in_space = false;
        }
    }

    let truncated: String = out.chars().take(MAX_NAME_LEN).collect();
    if truncated.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        truncated
    }
}

/// `<SanitizedName>-<id>.json`
pub fn contact_filename(name: &str, id: &Uuid) -> String {
    format!("{}-{}.json", sanitize_name(name), id)
}

/// One JSON file per contact, all in a single directory.
///
/// ```text
/// contacts/
/// ├── Ada_Lovelace-5f0c8a4e-….json
/// └── Grace_Hopper-0b7d1c9a-….json
/// ```
///
/// A corrupt file only costs the one contact it holds.
pub struct ContactFiles {
    dir: PathBuf,
}

impl ContactFiles {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_file(path: &Path) -> Result<Contact> {
        let content = fs::read_to_string(path).map_err(ContactorError::Io)?;
        let contact = serde_json::from_str(&content).map_err(ContactorError::Serialization)?;
        Ok(contact)
    }
}

impl StorageBackend for ContactFiles {
    fn ensure_directory(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(ContactorError::Io)?;
        }
        Ok(())
    }

    fn write_one(&self, contact: &Contact) -> Result<()> {
        self.ensure_directory()?;

        let target = self.record_path(&contact.name, &contact.id);
        let content = serde_json::to_string(contact).map_err(ContactorError::Serialization)?;

        // Atomic write; the temp name does not end in .json so read_all skips it
        let tmp = self.dir.join(format!(".contact-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(ContactorError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(ContactorError::Io(e));
        }

        tracing::debug!(path = %target.display(), "wrote contact file");
        Ok(())
    }

    fn delete_one(&self, name: &str, id: &Uuid) -> Result<()> {
        let path = self.record_path(name, id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "deleted contact file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ContactorError::Io(e)),
        }
    }

    fn read_all(&self) -> Result<Vec<Contact>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(ContactorError::Io)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    tracing::error!(dir = %self.dir.display(), "skipping unreadable directory entry: {}", err);
                    continue;
                }
            };
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        let contacts = paths
            .par_iter()
            .filter_map(|path| match Self::read_file(path) {
                Ok(contact) => Some(contact),
                Err(err) => {
                    tracing::error!(path = %path.display(), "skipping unreadable contact file: {}", err);
                    None
                }
            })
            .collect();

        Ok(contacts)
    }

    fn record_path(&self, name: &str, id: &Uuid) -> PathBuf {
        self.dir.join(contact_filename(name, id))
    }
}
