use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single contact record, as stored on disk and held by the store.
///
/// Field names on disk are camelCase. Older records that call the photo
/// `image`, or that lack timestamps, are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    /// File URI, remote URL or inline-encoded image. Never interpreted here.
    #[serde(default, alias = "image")]
    pub photo: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(input: NewContact) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            phone_number: input.phone_number,
            photo: input.photo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with the update's fields merged in and a fresh `updated_at`.
    /// The id and `created_at` never change.
    pub fn apply(&self, update: &ContactUpdate) -> Self {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(phone) = &update.phone_number {
            next.phone_number = phone.clone();
        }
        if let Some(photo) = &update.photo {
            next.photo = photo.clone();
        }
        next.updated_at = next_timestamp(self.updated_at);
        next
    }

    pub fn phone_digits(&self) -> String {
        phone_digits(&self.phone_number)
    }
}

/// Current time, nudged forward if the clock has not moved past `previous`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Strips everything but ASCII digits, so "+1 (555) 010-2000" == "15550102000".
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Input for creating a contact. Id and timestamps are generated by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub phone_number: String,
    #[serde(default, alias = "image")]
    pub photo: Option<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

/// Partial update of an existing contact. `None` fields are left as they are;
/// `photo: Some(None)` clears the photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
    pub id: Uuid,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub photo: Option<Option<String>>,
}

impl ContactUpdate {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            phone_number: None,
            photo: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    pub fn photo(mut self, photo: Option<String>) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// A record as exported by a device address book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceContact {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<DevicePhoneNumber>,
    #[serde(default)]
    pub image: Option<DeviceImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePhoneNumber {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceImage {
    #[serde(default)]
    pub uri: Option<String>,
}

impl DeviceContact {
    pub fn first_number(&self) -> Option<&str> {
        self.phone_numbers
            .first()
            .and_then(|p| p.number.as_deref())
    }
}
