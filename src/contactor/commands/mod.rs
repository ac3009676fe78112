//! # Command Layer
//!
//! Each user action lives in its own submodule as a plain function over a
//! [`ContactStore`](crate::store::ContactStore). Commands validate input,
//! resolve selectors, call the store and return a [`CmdResult`]; they never
//! print, prompt or exit. The client decides how to present the result.
//!
//! Command tests run against `MemBackend`, so no filesystem is involved.
//!
//! - [`create`]: validate a form and add a contact
//! - [`list`]: alphabetical listing and search
//! - [`view`]: fetch selected contacts
//! - [`update`]: edit one contact
//! - [`delete`]: remove contacts
//! - [`import`]: import from a device address book export
//! - [`reset`]: remove everything
//! - [`paths`]: where contacts live on disk
//! - [`config`]: read and change configuration
//! - [`helpers`]: selector resolution

use crate::config::ContactorConfig;
use crate::index::DisplayContact;
use crate::model::Contact;
use serde::Serialize;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod import;
pub mod list;
pub mod paths;
pub mod reset;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Counts from a device import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    /// Phone number (digits only) already known
    pub skipped: usize,
    /// Missing a name or a phone number
    pub invalid: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_contacts: Vec<Contact>,
    pub listed_contacts: Vec<DisplayContact>,
    pub contact_paths: Vec<PathBuf>,
    pub import: Option<ImportReport>,
    pub config: Option<ContactorConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<DisplayContact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_contact_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.contact_paths = paths;
        self
    }

    pub fn with_config(mut self, config: ContactorConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Fields to change on an existing contact. `None` leaves a field alone;
/// `photo: Some(None)` removes the photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEdit {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub photo: Option<Option<String>>,
}

impl ContactEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none() && self.photo.is_none()
    }
}
