use crate::api::ContactsApi;
use crate::config::{ContactorConfig, StorageKind};
use crate::error::{ContactorError, Result};
use crate::store::blob::BlobBackend;
use crate::store::files::ContactFiles;
use crate::store::StorageBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the data directory, mostly for tests and portable installs.
pub const HOME_ENV: &str = "CONTACTOR_HOME";

pub type DynBackend = Box<dyn StorageBackend>;

pub struct ContactorContext {
    pub api: ContactsApi<DynBackend>,
    pub config: ContactorConfig,
    pub data_dir: PathBuf,
}

/// `$CONTACTOR_HOME` if set and non-empty, else the platform data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "contactor", "contactor")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ContactorError::Store("Could not determine data directory".to_string()))
}

pub fn build_backend(config: &ContactorConfig, data_dir: &Path) -> DynBackend {
    match config.storage {
        StorageKind::Files => Box::new(ContactFiles::new(config.contacts_path(data_dir))),
        StorageKind::Blob => Box::new(BlobBackend::open(config.blob_path(data_dir))),
    }
}

/// Load configuration and open the store in `data_dir`.
///
/// An unreadable config file falls back to defaults with a warning rather
/// than locking the user out of their contacts.
pub fn initialize_at(data_dir: PathBuf) -> ContactorContext {
    let config = ContactorConfig::load(&data_dir).unwrap_or_else(|err| {
        tracing::warn!(dir = %data_dir.display(), "ignoring unreadable config: {}", err);
        ContactorConfig::default()
    });
    tracing::debug!(dir = %data_dir.display(), storage = %config.storage, "opening contacts");

    let backend = build_backend(&config, &data_dir);
    let api = ContactsApi::open(backend, data_dir.clone());

    ContactorContext {
        api,
        config,
        data_dir,
    }
}

pub fn initialize() -> Result<ContactorContext> {
    Ok(initialize_at(resolve_data_dir()?))
}
