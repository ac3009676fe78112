use crate::error::{ContactorError, Result};
use crate::index::{index_contacts, DisplayContact, Selector};
use crate::store::{ContactStore, StorageBackend};

/// Resolve selectors against the current alphabetical list.
///
/// All selectors are resolved before anything is changed, so indexes in one
/// call refer to the same listing even if the command then deletes.
pub fn resolve_selectors<B: StorageBackend>(
    store: &ContactStore<B>,
    selectors: &[Selector],
) -> Result<Vec<DisplayContact>> {
    let indexed = index_contacts(store.contacts());

    selectors
        .iter()
        .map(|selector| {
            let found = match selector {
                Selector::Index(n) => n.checked_sub(1).and_then(|i| indexed.get(i)),
                Selector::Id(id) => indexed.iter().find(|d| d.contact.id == *id),
            };
            found
                .cloned()
                .ok_or_else(|| ContactorError::ContactNotFound(selector.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_resolves_index_and_id() {
        let mut store = ContactStore::with_backend(MemBackend::new());
        let zed = store.add(NewContact::new("Zed", "1")).unwrap();
        let amy = store.add(NewContact::new("Amy", "2")).unwrap();

        let resolved =
            resolve_selectors(&store, &[Selector::Index(1), Selector::Id(zed.id)]).unwrap();
        assert_eq!(resolved[0].contact.id, amy.id);
        assert_eq!(resolved[1].index, 2);
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let store = ContactStore::with_backend(MemBackend::new());
        let err = resolve_selectors(&store, &[Selector::Index(1)]).unwrap_err();
        assert!(matches!(err, ContactorError::ContactNotFound(s) if s == "1"));
    }
}
