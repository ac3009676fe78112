//! # Storage Layer
//!
//! Contacts are held in memory by [`ContactStore`](contact_store::ContactStore)
//! and persisted through a [`StorageBackend`](backend::StorageBackend).
//!
//! ## Write Ordering
//!
//! The store always persists before it touches memory:
//! - **add**: write the record, then append.
//! - **update**: write the new record, delete the old one if its location
//!   moved (a rename in the per-contact layout), then replace in memory.
//!   An interruption between the two leaves a duplicate, never a loss;
//!   the next `initialize` keeps the newest copy and removes the stale file.
//! - **delete**: delete the record, then remove from memory.
//! - **import / reset**: fan out over the rayon pool, wait for every record,
//!   and only then apply one state change. Durable state may be partially
//!   changed on failure; memory is not.
//!
//! ## Implementations
//!
//! - [`files::ContactFiles`]: one JSON file per contact (default).
//! - [`blob::BlobBackend`]: the whole collection in one JSON document, stored
//!   through a [`file_storage::KeyValueStorage`] such as [`file_storage::FileStorage`].
//! - [`mem_backend::MemBackend`]: in memory, with failure injection for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json
//! ├── contacts/                        # per-contact layout
//! │   └── <SanitizedName>-<uuid>.json
//! └── contacts.json                    # single-blob layout
//! ```

pub mod backend;
pub mod blob;
pub mod contact_store;
pub mod file_storage;
pub mod files;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use contact_store::ContactStore;
