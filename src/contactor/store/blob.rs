use super::backend::StorageBackend;
use super::file_storage::{FileStorage, KeyValueStorage};
use crate::error::{ContactorError, Result};
use crate::model::Contact;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub const BLOB_KEY: &str = "contacts";

/// The whole collection as one JSON document.
///
/// Two layouts are understood:
///
/// ```text
/// {"state": {"contacts": [...]}, "version": 0}   # persist envelope (written by default)
/// {"contacts": [...]}                            # bare
/// ```
///
/// Anything else in the document is carried through untouched, including
/// contact entries that fail to parse.
pub struct BlobBackend<S: KeyValueStorage = FileStorage> {
    storage: S,
    location: PathBuf,
    // Serializes read-modify-write cycles on the document
    lock: Mutex<()>,
}

struct Document {
    root: Map<String, Value>,
    contacts: Vec<Value>,
    nested: bool,
}

impl Document {
    fn empty() -> Self {
        let mut root = Map::new();
        root.insert("state".to_string(), Value::Object(Map::new()));
        root.insert("version".to_string(), Value::from(0));
        Self {
            root,
            contacts: Vec::new(),
            nested: true,
        }
    }

    fn parse(text: &str) -> Result<Self> {
        let root = match serde_json::from_str(text).map_err(ContactorError::Serialization)? {
            Value::Object(root) => root,
            _ => {
                return Err(ContactorError::Store(
                    "contacts document is not a JSON object".to_string(),
                ))
            }
        };

        let nested =
            root.get("state").is_some_and(Value::is_object) || !root.contains_key("contacts");
        if nested && root.get("state").is_some_and(|s| !s.is_object()) {
            return Err(ContactorError::Store(
                "contacts document has a \"state\" that is not an object".to_string(),
            ));
        }
        let list = if nested {
            root.get("state").and_then(|s| s.get("contacts"))
        } else {
            root.get("contacts")
        };
        // Saving over a list we cannot read would drop it
        let contacts = match list {
            Some(Value::Array(items)) => items.clone(),
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(ContactorError::Store(
                    "contacts list in document is not an array".to_string(),
                ))
            }
        };

        Ok(Self {
            root,
            contacts,
            nested,
        })
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        let id = id.to_string();
        self.contacts
            .iter()
            .position(|c| c.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }

    fn into_string(self) -> Result<String> {
        let Document {
            mut root,
            contacts,
            nested,
        } = self;

        if nested {
            let state = root
                .entry("state")
                .or_insert_with(|| Value::Object(Map::new()));
            if !state.is_object() {
                *state = Value::Object(Map::new());
            }
            if let Value::Object(state) = state {
                state.insert("contacts".to_string(), Value::Array(contacts));
            }
        } else {
            root.insert("contacts".to_string(), Value::Array(contacts));
        }

        serde_json::to_string(&root).map_err(ContactorError::Serialization)
    }
}

impl BlobBackend<FileStorage> {
    pub fn open(path: PathBuf) -> Self {
        Self::new(FileStorage::new(path.clone()), path)
    }
}

impl<S: KeyValueStorage> BlobBackend<S> {
    pub fn new(storage: S, location: PathBuf) -> Self {
        Self {
            storage,
            location,
            lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load(&self) -> Result<Document> {
        match self.storage.read_item(BLOB_KEY)? {
            Some(text) => Document::parse(&text),
            None => Ok(Document::empty()),
        }
    }

    fn save(&self, doc: Document) -> Result<()> {
        let text = doc.into_string()?;
        self.storage.set_item(BLOB_KEY, &text)
    }
}

impl<S: KeyValueStorage> StorageBackend for BlobBackend<S> {
    fn ensure_directory(&self) -> Result<()> {
        if let Some(parent) = self.location.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ContactorError::Io)?;
            }
        }
        Ok(())
    }

    fn write_one(&self, contact: &Contact) -> Result<()> {
        let _guard = self.lock.lock();
        let mut doc = self.load()?;
        let value = serde_json::to_value(contact).map_err(ContactorError::Serialization)?;

        match doc.position(&contact.id) {
            Some(i) => doc.contacts[i] = value,
            None => doc.contacts.push(value),
        }
        self.save(doc)
    }

    fn delete_one(&self, _name: &str, id: &Uuid) -> Result<()> {
        let _guard = self.lock.lock();
        let mut doc = self.load()?;

        match doc.position(id) {
            Some(i) => {
                doc.contacts.remove(i);
                self.save(doc)
            }
            None => Ok(()),
        }
    }

    fn read_all(&self) -> Result<Vec<Contact>> {
        let _guard = self.lock.lock();
        let doc = self.load()?;

        let contacts = doc
            .contacts
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Contact>(value) {
                Ok(contact) => Some(contact),
                Err(err) => {
                    tracing::warn!("skipping unreadable contact entry: {}", err);
                    None
                }
            })
            .collect();
        Ok(contacts)
    }

    fn record_path(&self, _name: &str, _id: &Uuid) -> PathBuf {
        self.location.clone()
    }
}
