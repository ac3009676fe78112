use crate::commands::{CmdMessage, CmdResult, ImportReport};
use crate::error::{ContactorError, Result};
use crate::model::{phone_digits, Contact, DeviceContact, NewContact};
use crate::store::{ContactStore, StorageBackend};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Read a device address book export: a JSON array of device contacts.
pub fn read_device_export(path: &Path) -> Result<Vec<DeviceContact>> {
    let raw = fs::read_to_string(path).map_err(ContactorError::Io)?;
    let devices = serde_json::from_str(&raw).map_err(ContactorError::Serialization)?;
    Ok(devices)
}

fn usable(device: &DeviceContact) -> Option<(&str, &str)> {
    let name = device.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
    let phone = device.first_number().map(str::trim).filter(|p| !p.is_empty())?;
    Some((name, phone))
}

/// Decide which device contacts become new contacts.
///
/// Phones are compared as digits only, against the existing contacts and
/// against earlier entries of the same batch.
fn plan(existing: &[Contact], devices: &[DeviceContact]) -> (Vec<Contact>, ImportReport) {
    let mut known: HashSet<String> = existing.iter().map(Contact::phone_digits).collect();
    let mut report = ImportReport::default();
    let mut batch = Vec::new();

    for device in devices {
        let Some((name, phone)) = usable(device) else {
            report.invalid += 1;
            continue;
        };
        if !known.insert(phone_digits(phone)) {
            report.skipped += 1;
            continue;
        }

        let mut input = NewContact::new(name, phone);
        input.photo = device
            .image
            .as_ref()
            .and_then(|image| image.uri.clone())
            .filter(|uri| !uri.is_empty());
        batch.push(Contact::new(input));
    }

    report.imported = batch.len();
    (batch, report)
}

pub fn run<B: StorageBackend>(
    store: &mut ContactStore<B>,
    devices: Vec<DeviceContact>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if devices.is_empty() {
        result.add_message(CmdMessage::warning("No contacts found to import."));
        result.import = Some(ImportReport::default());
        return Ok(result);
    }

    let (batch, report) = plan(store.contacts(), &devices);
    if report.imported == 0 && report.skipped == 0 {
        result.add_message(CmdMessage::warning(
            "No contacts with name and phone number found.",
        ));
        result.import = Some(report);
        return Ok(result);
    }

    tracing::debug!(
        imported = report.imported,
        skipped = report.skipped,
        invalid = report.invalid,
        "import planned"
    );
    store.import_many(batch.clone())?;

    let summary = if report.skipped > 0 {
        format!(
            "Imported {} contacts. Skipped {} duplicates.",
            report.imported, report.skipped
        )
    } else {
        format!("Successfully imported {} contacts.", report.imported)
    };
    result.add_message(CmdMessage::success(summary));
    if report.invalid > 0 {
        result.add_message(CmdMessage::info(format!(
            "Ignored {} entries without a name or phone number.",
            report.invalid
        )));
    }

    result.import = Some(report);
    Ok(result.with_affected_contacts(batch))
}
