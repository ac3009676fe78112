//! # Display Indexing
//!
//! Contacts are stored in insertion order but shown alphabetically. Clients
//! refer to a contact either by its 1-based position in the alphabetical list
//! or by its UUID.
//!
//! Indexes are always computed over the full list, so filtering a list does
//! not renumber it: if "Grace" is `2` in `contactor list`, she is still `2` in
//! `contactor search gra`.

use crate::error::{ContactorError, Result};
use crate::model::Contact;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayContact {
    pub index: usize,
    pub contact: Contact,
}

fn alphabetical_order(a: &Contact, b: &Contact) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.phone_number.cmp(&b.phone_number))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts by name (case-insensitive) and assigns 1-based display indexes.
pub fn index_contacts(contacts: &[Contact]) -> Vec<DisplayContact> {
    let mut sorted: Vec<&Contact> = contacts.iter().collect();
    sorted.sort_by(|a, b| alphabetical_order(a, b));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, contact)| DisplayContact {
            index: i + 1,
            contact: contact.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Id(Uuid),
}

impl FromStr for Selector {
    type Err = ContactorError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err(ContactorError::Api("Index must be 1 or greater".to_string()));
            }
            return Ok(Selector::Index(n));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(Selector::Id(id));
        }
        Err(ContactorError::Api(format!("Invalid contact selector: {}", s)))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(n) => write!(f, "{}", n),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Parse selectors, dropping repeats while preserving order.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<Selector>> {
    let mut selectors: Vec<Selector> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let selector: Selector = input.as_ref().parse()?;
        if !selectors.contains(&selector) {
            selectors.push(selector);
        }
    }
    Ok(selectors)
}
