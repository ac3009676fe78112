use super::backend::StorageBackend;
use super::files::contact_filename;
use crate::error::{ContactorError, Result};
use crate::model::Contact;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory storage backend for testing.
///
/// Records are keyed by the same filename `ContactFiles` would use, so
/// rename behaviour (old file left behind, new file written) can be
/// observed without touching the filesystem.
#[derive(Default)]
pub struct MemBackend {
    files: Mutex<BTreeMap<String, String>>,
    simulate_write_error: Mutex<bool>,
    simulate_delete_error: Mutex<bool>,
    simulate_read_error: Mutex<bool>,
    failing_ids: Mutex<HashSet<Uuid>>,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.lock() = simulate;
    }

    pub fn set_simulate_delete_error(&self, simulate: bool) {
        *self.simulate_delete_error.lock() = simulate;
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.lock() = simulate;
    }

    /// Make writes and deletes of one particular contact fail.
    pub fn fail_for(&self, id: Uuid) {
        self.failing_ids.lock().insert(id);
    }

    /// Test helper to drop arbitrary content in, e.g. a corrupt record.
    pub fn insert_raw(&self, filename: &str, content: &str) {
        self.files
            .lock()
            .insert(filename.to_string(), content.to_string());
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.lock().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str, id: &Uuid) -> bool {
        self.files.lock().contains_key(&contact_filename(name, id))
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn fails(&self, id: &Uuid) -> bool {
        self.failing_ids.lock().contains(id)
    }
}

impl StorageBackend for MemBackend {
    fn ensure_directory(&self) -> Result<()> {
        Ok(())
    }

    fn write_one(&self, contact: &Contact) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if *self.simulate_write_error.lock() || self.fails(&contact.id) {
            return Err(ContactorError::Store("Simulated write error".to_string()));
        }

        let content = serde_json::to_string(contact).map_err(ContactorError::Serialization)?;
        self.files
            .lock()
            .insert(contact_filename(&contact.name, &contact.id), content);
        Ok(())
    }

    fn delete_one(&self, name: &str, id: &Uuid) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if *self.simulate_delete_error.lock() || self.fails(id) {
            return Err(ContactorError::Store("Simulated delete error".to_string()));
        }

        self.files.lock().remove(&contact_filename(name, id));
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Contact>> {
        if *self.simulate_read_error.lock() {
            return Err(ContactorError::Store("Simulated read error".to_string()));
        }

        let files = self.files.lock();
        Ok(files
            .iter()
            .filter_map(|(name, content)| match serde_json::from_str(content) {
                Ok(contact) => Some(contact),
                Err(err) => {
                    tracing::error!(file = %name, "skipping unreadable contact record: {}", err);
                    None
                }
            })
            .collect())
    }

    fn record_path(&self, name: &str, id: &Uuid) -> PathBuf {
        PathBuf::from(format!("memory://{}", contact_filename(name, id)))
    }
}
