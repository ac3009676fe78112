use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_contacts, DisplayContact};
use crate::store::{ContactStore, StorageBackend};

/// A contact matches when its name contains the query (ignoring case) or its
/// phone number contains it as typed.
fn matches(display: &DisplayContact, query: &str) -> bool {
    display.contact.name.to_lowercase().contains(&query.to_lowercase())
        || display.contact.phone_number.contains(query)
}

pub fn run<B: StorageBackend>(store: &ContactStore<B>, query: Option<&str>) -> Result<CmdResult> {
    let indexed = index_contacts(store.contacts());

    let listed = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => indexed.into_iter().filter(|d| matches(d, query)).collect(),
        None => indexed,
    };

    Ok(CmdResult::default().with_listed_contacts(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;
    use crate::store::mem_backend::MemBackend;

    fn store_with(contacts: &[(&str, &str)]) -> ContactStore<MemBackend> {
        let mut store = ContactStore::with_backend(MemBackend::new());
        for (name, phone) in contacts {
            store.add(NewContact::new(*name, *phone)).unwrap();
        }
        store
    }

    fn names(result: &CmdResult) -> Vec<(usize, String)> {
        result
            .listed_contacts
            .iter()
            .map(|d| (d.index, d.contact.name.clone()))
            .collect()
    }

    #[test]
    fn lists_alphabetically() {
        let store = store_with(&[("Grace", "2"), ("ada", "1"), ("Linus", "3")]);
        let result = run(&store, None).unwrap();
        assert_eq!(
            names(&result),
            vec![
                (1, "ada".to_string()),
                (2, "Grace".to_string()),
                (3, "Linus".to_string())
            ]
        );
    }

    #[test]
    fn search_by_name_keeps_indexes() {
        let store = store_with(&[("Grace", "2"), ("Ada", "1"), ("Linus", "3")]);
        let result = run(&store, Some("LIN")).unwrap();
        assert_eq!(names(&result), vec![(3, "Linus".to_string())]);
    }

    #[test]
    fn search_by_phone() {
        let store = store_with(&[("Grace", "555-0199"), ("Ada", "555-0100")]);
        let result = run(&store, Some("0199")).unwrap();
        assert_eq!(names(&result), vec![(2, "Grace".to_string())]);
    }

    #[test]
    fn blank_query_lists_everything() {
        let store = store_with(&[("Grace", "2"), ("Ada", "1")]);
        assert_eq!(run(&store, Some("  ")).unwrap().listed_contacts.len(), 2);
    }

    #[test]
    fn no_matches_is_empty() {
        let store = store_with(&[("Grace", "2")]);
        assert!(run(&store, Some("zzz")).unwrap().listed_contacts.is_empty());
    }
}
