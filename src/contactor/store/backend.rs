use crate::error::Result;
use crate::model::Contact;
use std::path::PathBuf;
use uuid::Uuid;

/// Abstract interface for raw record persistence.
/// This trait handles the "how" of storage (one file per contact, one blob, memory),
/// while ContactStore handles the "what" (in-memory state, ordering of writes).
///
/// Implementations must be `Send + Sync`: batch operations call `write_one`
/// and `delete_one` from several threads at once.
pub trait StorageBackend: Send + Sync {
    /// Create the storage location if it does not exist. Safe to call repeatedly.
    fn ensure_directory(&self) -> Result<()>;

    /// Write (create or overwrite) the durable representation of a contact,
    /// located by its current name and id.
    fn write_one(&self, contact: &Contact) -> Result<()>;

    /// Delete the durable representation located by `name` and `id`.
    /// Missing records are not an error.
    fn delete_one(&self, name: &str, id: &Uuid) -> Result<()>;

    /// Load every readable record. Unreadable individual records are logged
    /// and skipped; Err only when the storage as a whole cannot be read.
    fn read_all(&self) -> Result<Vec<Contact>>;

    /// Where the record for `name`/`id` lives. Two records with the same path
    /// share a durable location.
    fn record_path(&self, name: &str, id: &Uuid) -> PathBuf;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn ensure_directory(&self) -> Result<()> {
        (**self).ensure_directory()
    }

    fn write_one(&self, contact: &Contact) -> Result<()> {
        (**self).write_one(contact)
    }

    fn delete_one(&self, name: &str, id: &Uuid) -> Result<()> {
        (**self).delete_one(name, id)
    }

    fn read_all(&self) -> Result<Vec<Contact>> {
        (**self).read_all()
    }

    fn record_path(&self, name: &str, id: &Uuid) -> PathBuf {
        (**self).record_path(name, id)
    }
}
