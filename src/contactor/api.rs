//! # API Facade
//!
//! The single entry point for contact operations, whatever the client. It
//! dispatches to the command layer and normalizes inputs: selector strings
//! ("3", a UUID) become [`Selector`]s, and an import file becomes device
//! contacts.
//!
//! It never prints or formats. Everything comes back as `Result<CmdResult>`.
//!
//! `ContactsApi<B: StorageBackend>` is generic over the backend, so the
//! dispatch tests below run on `MemBackend` while the CLI uses a boxed
//! runtime-chosen backend.

use crate::commands;
use crate::error::Result;
use crate::index::{parse_selectors, Selector};
use crate::model::{DeviceContact, NewContact};
use crate::store::{ContactStore, StorageBackend};
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, ContactEdit, ImportReport, MessageLevel};

pub struct ContactsApi<B: StorageBackend> {
    store: ContactStore<B>,
    data_dir: PathBuf,
}

impl<B: StorageBackend> ContactsApi<B> {
    /// Wrap a backend and load its contacts.
    pub fn open(backend: B, data_dir: PathBuf) -> Self {
        let mut store = ContactStore::with_backend(backend);
        store.initialize();
        Self { store, data_dir }
    }

    pub fn store(&self) -> &ContactStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn list_contacts(&self) -> Result<CmdResult> {
        commands::list::run(&self.store, None)
    }

    pub fn search_contacts(&self, term: &str) -> Result<CmdResult> {
        commands::list::run(&self.store, Some(term))
    }

    pub fn view_contacts<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn create_contact(&mut self, input: NewContact) -> Result<CmdResult> {
        commands::create::run(&mut self.store, input)
    }

    pub fn update_contact(&mut self, selector: &str, edit: ContactEdit) -> Result<CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::update::run(&mut self.store, selector, edit)
    }

    pub fn delete_contacts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn import_contacts(&mut self, devices: Vec<DeviceContact>) -> Result<CmdResult> {
        commands::import::run(&mut self.store, devices)
    }

    /// Import a device export file (a JSON array of device contacts).
    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        let devices = commands::import::read_device_export(path)?;
        self.import_contacts(devices)
    }

    pub fn reset_contacts(&mut self) -> Result<CmdResult> {
        commands::reset::run(&mut self.store)
    }

    pub fn contact_paths<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::paths::run(&self.store, &selectors)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    /// Drop in-memory state. Durable records are untouched.
    pub fn close(mut self) -> ContactStore<B> {
        self.store.close();
        self.store
    }
}
