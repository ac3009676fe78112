use crate::commands::{CmdMessage, CmdResult, ContactEdit};
use crate::error::{ContactorError, Result};
use crate::index::Selector;
use crate::model::ContactUpdate;
use crate::store::{ContactStore, StorageBackend};
use crate::validation::validate_update;

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(
    store: &mut ContactStore<B>,
    selector: Selector,
    edit: ContactEdit,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, &[selector])?;
    let Some(target) = resolved.into_iter().next() else {
        return Err(ContactorError::ContactNotFound(selector.to_string()));
    };

    let mut result = CmdResult::default();
    if edit.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing to change for {}",
            target.contact.name
        )));
        return Ok(result);
    }

    let update = ContactUpdate {
        id: target.contact.id,
        name: edit.name,
        phone_number: edit.phone_number,
        photo: edit.photo,
    };
    let update = validate_update(&update).map_err(ContactorError::Validation)?;

    // The contact was resolved from this store a moment ago
    let updated = store
        .update(update)?
        .ok_or_else(|| ContactorError::ContactNotFound(selector.to_string()))?;

    result.add_message(CmdMessage::success(format!(
        "Contact updated ({}): {}",
        target.index, updated.name
    )));
    result.affected_contacts.push(updated);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;
    use crate::store::mem_backend::MemBackend;

    fn store_with_ada() -> ContactStore<MemBackend> {
        let mut store = ContactStore::with_backend(MemBackend::new());
        store
            .add(NewContact::new("Ada", "555-0100").with_photo("file:///ada.jpg"))
            .unwrap();
        store
    }

    #[test]
    fn renames_by_index() {
        let mut store = store_with_ada();
        let edit = ContactEdit {
            name: Some(" Ada Lovelace ".into()),
            ..Default::default()
        };
        let result = run(&mut store, Selector::Index(1), edit).unwrap();

        let updated = &result.affected_contacts[0];
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.phone_number, "555-0100");
        assert_eq!(store.contacts()[0].name, "Ada Lovelace");
    }

    #[test]
    fn clears_photo() {
        let mut store = store_with_ada();
        let id = store.contacts()[0].id;
        let edit = ContactEdit {
            photo: Some(None),
            ..Default::default()
        };
        run(&mut store, Selector::Id(id), edit).unwrap();
        assert_eq!(store.get_by_id(&id).unwrap().photo, None);
    }

    #[test]
    fn empty_edit_changes_nothing() {
        let mut store = store_with_ada();
        let before = store.revision();
        let result = run(&mut store, Selector::Index(1), ContactEdit::default()).unwrap();

        assert!(result.affected_contacts.is_empty());
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn blank_phone_is_rejected() {
        let mut store = store_with_ada();
        let edit = ContactEdit {
            phone_number: Some("   ".into()),
            ..Default::default()
        };
        let err = run(&mut store, Selector::Index(1), edit).unwrap_err();

        assert!(matches!(err, ContactorError::Validation(ref e) if e.phone_number.is_some()));
        assert_eq!(store.contacts()[0].phone_number, "555-0100");
    }

    #[test]
    fn unknown_selector_is_not_found() {
        let mut store = store_with_ada();
        let edit = ContactEdit {
            name: Some("Ghost".into()),
            ..Default::default()
        };
        let err = run(&mut store, Selector::Index(9), edit).unwrap_err();
        assert!(matches!(err, ContactorError::ContactNotFound(_)));
    }
}
