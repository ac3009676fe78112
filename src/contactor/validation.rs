//! Form validation for contact input.
//!
//! Validation happens before the store is called: a rejected form never
//! reaches persistence. Errors are reported per field so a client can show
//! them next to the offending input.

use crate::model::{ContactUpdate, NewContact};
use serde::Serialize;
use std::fmt;

pub const NAME_REQUIRED: &str = "Name is required";
pub const PHONE_REQUIRED: &str = "Phone number is required";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.name.as_deref(), self.phone_number.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join(", "))
    }
}

fn normalize_photo(photo: Option<&str>) -> Option<String> {
    photo
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// Checks a create form and returns it with name and phone trimmed.
pub fn validate_new(input: &NewContact) -> Result<NewContact, FormErrors> {
    let name = input.name.trim();
    let phone = input.phone_number.trim();

    let mut errors = FormErrors::default();
    if name.is_empty() {
        errors.name = Some(NAME_REQUIRED.to_string());
    }
    if phone.is_empty() {
        errors.phone_number = Some(PHONE_REQUIRED.to_string());
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewContact {
        name: name.to_string(),
        phone_number: phone.to_string(),
        photo: normalize_photo(input.photo.as_deref()),
    })
}

/// Checks only the fields an edit actually sets.
pub fn validate_update(update: &ContactUpdate) -> Result<ContactUpdate, FormErrors> {
    let mut errors = FormErrors::default();
    let mut clean = ContactUpdate::new(update.id);

    if let Some(name) = &update.name {
        let name = name.trim();
        if name.is_empty() {
            errors.name = Some(NAME_REQUIRED.to_string());
        }
        clean.name = Some(name.to_string());
    }
    if let Some(phone) = &update.phone_number {
        let phone = phone.trim();
        if phone.is_empty() {
            errors.phone_number = Some(PHONE_REQUIRED.to_string());
        }
        clean.phone_number = Some(phone.to_string());
    }
    if let Some(photo) = &update.photo {
        clean.photo = Some(normalize_photo(photo.as_deref()));
    }

    if errors.is_empty() {
        Ok(clean)
    } else {
        Err(errors)
    }
}
