use super::backend::StorageBackend;
use crate::error::{ContactorError, Result};
use crate::model::{Contact, ContactUpdate, NewContact};
use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The authoritative in-memory contact collection and the only writer to
/// durable storage.
///
/// Every mutation persists first and touches memory only once persistence has
/// succeeded, so memory never holds a contact that was not written.
pub struct ContactStore<B: StorageBackend> {
    backend: B,
    contacts: Vec<Contact>,
    ready: bool,
    revision: u64,
    // Old names of records a rename could not remove yet
    stale: HashMap<Uuid, Vec<String>>,
}

impl<B: StorageBackend> ContactStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            contacts: Vec::new(),
            ready: false,
            revision: 0,
            stale: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Load persisted contacts into memory and mark the store ready.
    ///
    /// Replaces the in-memory collection, so calling it again never duplicates
    /// records. A storage read failure is logged and leaves memory as it was;
    /// the store is marked ready either way.
    pub fn initialize(&mut self) {
        if let Err(err) = self.backend.ensure_directory() {
            tracing::warn!("could not prepare contact storage: {}", err);
        }

        match self.backend.read_all() {
            Ok(loaded) => {
                self.contacts = self.reconcile(loaded);
                self.revision += 1;
                tracing::debug!(count = self.contacts.len(), "loaded contacts");
            }
            Err(err) => {
                tracing::error!("error loading contacts: {}", err);
            }
        }

        self.ready = true;
    }

    /// Keep one record per id in creation order.
    ///
    /// Duplicates appear when a rename was interrupted between writing the new
    /// record and deleting the old one. The most recently updated copy wins;
    /// equal timestamps fall back to the larger record path, then name, so
    /// the outcome does not depend on read order. The stale copy is removed
    /// best effort.
    fn reconcile(&mut self, loaded: Vec<Contact>) -> Vec<Contact> {
        let backend = &self.backend;
        let rank = |c: &Contact| {
            (
                c.updated_at,
                backend.record_path(&c.name, &c.id),
                c.name.clone(),
            )
        };
        let mut by_id: HashMap<Uuid, Contact> = HashMap::with_capacity(loaded.len());
        let mut stale = Vec::new();

        for contact in loaded {
            match by_id.entry(contact.id) {
                Entry::Vacant(slot) => {
                    slot.insert(contact);
                }
                Entry::Occupied(mut slot) => {
                    if rank(&contact) > rank(slot.get()) {
                        stale.push(slot.insert(contact));
                    } else {
                        stale.push(contact);
                    }
                }
            }
        }

        for old in stale {
            let Some(kept) = by_id.get(&old.id) else {
                continue;
            };
            let old_path = self.backend.record_path(&old.name, &old.id);
            if old_path == self.backend.record_path(&kept.name, &kept.id) {
                continue;
            }
            match self.backend.delete_one(&old.name, &old.id) {
                Ok(()) => tracing::info!(path = %old_path.display(), "removed stale contact record"),
                Err(err) => {
                    tracing::warn!(path = %old_path.display(), "could not remove stale contact record: {}", err);
                    self.stale.entry(old.id).or_default().push(old.name);
                }
            }
        }

        let mut contacts: Vec<Contact> = by_id.into_values().collect();
        contacts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        contacts
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Increments once per in-memory state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == *id)
    }

    pub fn record_path(&self, contact: &Contact) -> PathBuf {
        self.backend.record_path(&contact.name, &contact.id)
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == *id)
    }

    /// Retry deleting the records renames of `id` left behind.
    ///
    /// A name whose record is `current` is dropped without deleting it. Names
    /// that still fail stay pending; the first failure is returned.
    fn remove_stale(&mut self, id: &Uuid, current: &Path) -> Result<()> {
        let Some(names) = self.stale.remove(id) else {
            return Ok(());
        };

        let mut pending: Vec<String> = Vec::new();
        let mut first_err = None;
        for name in names {
            let path = self.backend.record_path(&name, id);
            if path == current || pending.contains(&name) {
                continue;
            }
            match self.backend.delete_one(&name, id) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed stale contact record"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "could not remove stale contact record: {}", err);
                    pending.push(name);
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }

        if !pending.is_empty() {
            self.stale.insert(*id, pending);
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn add(&mut self, input: NewContact) -> Result<Contact> {
        let contact = Contact::new(input);
        self.backend.write_one(&contact)?;

        self.contacts.push(contact.clone());
        self.revision += 1;
        tracing::debug!(id = %contact.id, "added contact");
        Ok(contact)
    }

    /// Apply a partial update. Returns `Ok(None)` when the id is unknown.
    ///
    /// The new record is written before the old one is deleted, so an
    /// interruption in between leaves a duplicate, never a loss. Once the new
    /// record is written the update has happened: if the old record cannot be
    /// deleted it is remembered and removed on the next change or delete of
    /// this contact.
    pub fn update(&mut self, update: ContactUpdate) -> Result<Option<Contact>> {
        let Some(pos) = self.position(&update.id) else {
            tracing::debug!(id = %update.id, "update of unknown contact ignored");
            return Ok(None);
        };

        let old = &self.contacts[pos];
        let next = old.apply(&update);
        let old_name = old.name.clone();
        let old_path = self.backend.record_path(&old.name, &old.id);
        self.backend.write_one(&next)?;

        self.contacts[pos] = next.clone();
        self.revision += 1;
        tracing::debug!(id = %next.id, "updated contact");

        // Only a moved record leaves a stale copy; deleting an unmoved one
        // would remove the write above.
        let new_path = self.backend.record_path(&next.name, &next.id);
        if old_path != new_path {
            self.stale.entry(next.id).or_default().push(old_name);
        }
        // Failures are logged and kept for the next attempt
        let _ = self.remove_stale(&next.id, &new_path);

        Ok(Some(next))
    }

    /// Remove a contact. Returns `Ok(None)` when the id is unknown.
    pub fn delete(&mut self, id: &Uuid) -> Result<Option<Contact>> {
        let Some(pos) = self.position(id) else {
            tracing::debug!(id = %id, "delete of unknown contact ignored");
            return Ok(None);
        };

        let contact = &self.contacts[pos];
        let (name, id) = (contact.name.clone(), contact.id);
        let current = self.backend.record_path(&name, &id);
        self.remove_stale(&id, &current)?;
        self.backend.delete_one(&name, &id)?;

        let removed = self.contacts.remove(pos);
        self.revision += 1;
        tracing::debug!(id = %removed.id, "deleted contact");
        Ok(Some(removed))
    }

    /// Persist a batch concurrently, then append it in a single state change.
    ///
    /// Not atomic on disk: if any write fails, the records that were written
    /// stay written, but memory receives none of the batch.
    pub fn import_many(&mut self, batch: Vec<Contact>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut seen: HashSet<Uuid> = self.contacts.iter().map(|c| c.id).collect();
        for contact in &batch {
            if !seen.insert(contact.id) {
                return Err(ContactorError::DuplicateId(contact.id));
            }
        }

        let backend = &self.backend;
        let failures: Vec<ContactorError> = batch
            .par_iter()
            .filter_map(|contact| backend.write_one(contact).err())
            .collect();
        settle(failures, batch.len())?;

        tracing::debug!(count = batch.len(), "imported contacts");
        self.contacts.extend(batch);
        self.revision += 1;
        Ok(())
    }

    /// Delete every durable record concurrently, then clear memory.
    ///
    /// Records left behind by renames are deleted along with the rest.
    pub fn reset_all(&mut self) -> Result<()> {
        let targets: Vec<(&str, &Uuid)> = self
            .contacts
            .iter()
            .map(|c| (c.name.as_str(), &c.id))
            .chain(
                self.stale
                    .iter()
                    .flat_map(|(id, names)| names.iter().map(move |n| (n.as_str(), id))),
            )
            .collect();

        let backend = &self.backend;
        let failures: Vec<ContactorError> = targets
            .par_iter()
            .filter_map(|(name, id)| backend.delete_one(name, id).err())
            .collect();
        settle(failures, targets.len())?;

        tracing::debug!(count = self.contacts.len(), "reset contacts");
        self.contacts.clear();
        self.stale.clear();
        self.revision += 1;
        Ok(())
    }

    /// Drop the in-memory state. Durable storage is left as it is.
    pub fn close(&mut self) {
        self.contacts.clear();
        self.stale.clear();
        self.ready = false;
        self.revision += 1;
    }
}

fn settle(failures: Vec<ContactorError>, total: usize) -> Result<()> {
    let failed = failures.len();
    match failures.into_iter().next() {
        None => Ok(()),
        Some(first) => Err(ContactorError::BatchFailed {
            failed,
            total,
            source: Box::new(first),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::files::contact_filename;
    use crate::store::mem_backend::MemBackend;
    use chrono::TimeDelta;

    fn make_store() -> ContactStore<MemBackend> {
        let mut store = ContactStore::with_backend(MemBackend::new());
        store.initialize();
        store
    }

    fn reload(store: ContactStore<MemBackend>) -> ContactStore<MemBackend> {
        let mut reloaded = ContactStore::with_backend(store.into_backend());
        reloaded.initialize();
        reloaded
    }

    fn imported(name: &str, phone: &str) -> Contact {
        Contact::new(NewContact::new(name, phone))
    }

    // --- Lifecycle ---

    #[test]
    fn test_initialize_marks_ready() {
        let mut store = ContactStore::with_backend(MemBackend::new());
        assert!(!store.is_ready());
        store.initialize();
        assert!(store.is_ready());
        assert!(store.is_empty());
    }

    #[test]
    fn test_initialize_twice_does_not_duplicate() {
        let mut store = make_store();
        store.add(NewContact::new("Ada", "1")).unwrap();
        store.add(NewContact::new("Grace", "2")).unwrap();

        store.initialize();
        store.initialize();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_initialize_read_failure_is_not_fatal() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let mut store = ContactStore::with_backend(backend);

        store.initialize();
        assert!(store.is_ready());
        assert!(store.is_empty());
    }

    #[test]
    fn test_initialize_skips_corrupt_records() {
        let backend = MemBackend::new();
        backend.insert_raw("Broken-123.json", "{ not json");
        let good = imported("Ada", "1");
        backend.write_one(&good).unwrap();

        let mut store = ContactStore::with_backend(backend);
        store.initialize();
        assert_eq!(store.contacts(), &[good]);
    }

    #[test]
    fn test_roundtrip_through_storage() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        let grace = store
            .add(NewContact::new("Grace", "2").with_photo("file:///grace.jpg"))
            .unwrap();

        let reloaded = reload(store);
        assert_eq!(reloaded.get_by_id(&ada.id), Some(&ada));
        assert_eq!(reloaded.get_by_id(&grace.id), Some(&grace));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_initialize_orders_by_creation() {
        let mut store = make_store();
        let names = ["Zed", "Amy", "Moe"];
        for name in names {
            store.add(NewContact::new(name, "1")).unwrap();
        }

        let reloaded = reload(store);
        let loaded: Vec<&str> = reloaded.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(loaded, names);
    }

    #[test]
    fn test_initialize_keeps_newest_duplicate_and_removes_stale_file() {
        let backend = MemBackend::new();
        let old = imported("Old Name", "1");
        let mut new = old.clone();
        new.name = "New Name".to_string();
        new.updated_at = old.updated_at + TimeDelta::seconds(5);
        // Interrupted rename: both files present
        backend.write_one(&old).unwrap();
        backend.write_one(&new).unwrap();

        let mut store = ContactStore::with_backend(backend);
        store.initialize();

        assert_eq!(store.contacts(), &[new.clone()]);
        assert!(!store.backend().contains("Old Name", &old.id));
        assert!(store.backend().contains("New Name", &new.id));
    }

    #[test]
    fn test_initialize_duplicate_tie_keeps_same_copy() {
        let backend = MemBackend::new();
        let alpha = imported("Alpha", "1");
        let mut beta = alpha.clone();
        beta.name = "Beta".to_string();
        backend.write_one(&alpha).unwrap();
        backend.write_one(&beta).unwrap();

        let mut store = ContactStore::with_backend(backend);
        store.initialize();

        assert_eq!(store.contacts(), &[beta.clone()]);
        assert!(!store.backend().contains("Alpha", &alpha.id));
        assert!(store.backend().contains("Beta", &beta.id));
    }

    #[test]
    fn test_reconcile_tie_does_not_depend_on_read_order() {
        let alpha = imported("Alpha", "1");
        let mut beta = alpha.clone();
        beta.name = "Beta".to_string();
        let mut store = make_store();

        let forward = store.reconcile(vec![alpha.clone(), beta.clone()]);
        let backward = store.reconcile(vec![beta.clone(), alpha.clone()]);
        assert_eq!(forward, backward);
        assert_eq!(forward, vec![beta]);
    }

    #[test]
    fn test_close_drops_memory_only() {
        let mut store = make_store();
        store.add(NewContact::new("Ada", "1")).unwrap();
        store.close();
        assert!(!store.is_ready());
        assert!(store.is_empty());

        store.initialize();
        assert_eq!(store.len(), 1);
    }

    // --- Add ---

    #[test]
    fn test_add_then_get_by_id() {
        let mut store = make_store();
        let input = NewContact::new("Ada Lovelace", "555-0100").with_photo("file:///ada.jpg");
        let created = store.add(input.clone()).unwrap();

        let found = store.get_by_id(&created.id).unwrap();
        assert_eq!(found.name, input.name);
        assert_eq!(found.phone_number, input.phone_number);
        assert_eq!(found.photo, input.photo);
        assert_eq!(found.created_at, found.updated_at);
        assert!(store.backend().contains("Ada Lovelace", &created.id));
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut store = make_store();
        let a = store.add(NewContact::new("Same", "1")).unwrap();
        let b = store.add(NewContact::new("Same", "1")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_failure_leaves_memory_untouched() {
        let mut store = make_store();
        store.backend().set_simulate_write_error(true);
        let before = store.revision();

        assert!(store.add(NewContact::new("Ada", "1")).is_err());
        assert!(store.is_empty());
        assert_eq!(store.revision(), before);
    }

    // --- Update ---

    #[test]
    fn test_rename_moves_record() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        let (writes, deletes) = (store.backend().write_count(), store.backend().delete_count());

        let updated = store
            .update(ContactUpdate::new(ada.id).name("Ada Lovelace"))
            .unwrap()
            .unwrap();

        let found = store.get_by_id(&ada.id).unwrap();
        assert_eq!(found.name, "Ada Lovelace");
        assert!(found.updated_at > ada.updated_at);
        assert_eq!(found.created_at, ada.created_at);
        assert_eq!(&updated, found);

        assert!(!store.backend().contains("Ada", &ada.id));
        assert!(store.backend().contains("Ada Lovelace", &ada.id));
        assert_eq!(store.backend().write_count(), writes + 1);
        assert_eq!(store.backend().delete_count(), deletes + 1);
    }

    #[test]
    fn test_update_without_rename_writes_once() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        let deletes = store.backend().delete_count();

        store
            .update(ContactUpdate::new(ada.id).phone_number("2").photo(Some("p".into())))
            .unwrap();

        assert_eq!(store.backend().delete_count(), deletes);
        let found = store.get_by_id(&ada.id).unwrap();
        assert_eq!(found.phone_number, "2");
        assert_eq!(found.photo.as_deref(), Some("p"));
    }

    #[test]
    fn test_rename_to_same_filename_keeps_record() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();

        store
            .update(ContactUpdate::new(ada.id).name("Ada!"))
            .unwrap();

        assert_eq!(store.backend().file_names(), vec![contact_filename("Ada", &ada.id)]);
        let reloaded = reload(store);
        assert_eq!(reloaded.get_by_id(&ada.id).unwrap().name, "Ada!");
    }

    #[test]
    fn test_rename_succeeds_when_old_record_cannot_be_deleted() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        let before = store.revision();
        store.backend().set_simulate_delete_error(true);

        let updated = store
            .update(ContactUpdate::new(ada.id).name("Ada Lovelace"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(store.get_by_id(&ada.id), Some(&updated));
        assert_eq!(store.revision(), before + 1);
        assert!(store.backend().contains("Ada", &ada.id));

        // Deleting the contact also removes the record the rename left behind
        store.backend().set_simulate_delete_error(false);
        store.delete(&ada.id).unwrap();
        assert!(store.backend().file_names().is_empty());
        assert_eq!(reload(store).get_by_id(&ada.id), None);
    }

    #[test]
    fn test_delete_keeps_contact_while_left_behind_record_remains() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        store.backend().set_simulate_delete_error(true);
        store
            .update(ContactUpdate::new(ada.id).name("Ada Lovelace"))
            .unwrap();

        assert!(store.delete(&ada.id).is_err());
        assert_eq!(store.get_by_id(&ada.id).unwrap().name, "Ada Lovelace");
        assert!(store.backend().contains("Ada Lovelace", &ada.id));
    }

    #[test]
    fn test_rename_back_after_failed_delete_leaves_one_record() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        store.backend().set_simulate_delete_error(true);
        store
            .update(ContactUpdate::new(ada.id).name("Ada Lovelace"))
            .unwrap();
        store.backend().set_simulate_delete_error(false);

        store.update(ContactUpdate::new(ada.id).name("Ada")).unwrap();

        assert_eq!(store.backend().file_names(), vec![contact_filename("Ada", &ada.id)]);
        let reloaded = reload(store);
        assert_eq!(reloaded.get_by_id(&ada.id).unwrap().name, "Ada");
    }

    #[test]
    fn test_later_update_retries_left_behind_record() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        store.backend().set_simulate_delete_error(true);
        store
            .update(ContactUpdate::new(ada.id).name("Ada Lovelace"))
            .unwrap();
        store.backend().set_simulate_delete_error(false);

        store
            .update(ContactUpdate::new(ada.id).phone_number("2"))
            .unwrap();

        assert_eq!(
            store.backend().file_names(),
            vec![contact_filename("Ada Lovelace", &ada.id)]
        );
    }

    #[test]
    fn test_reset_all_removes_left_behind_records() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        store.backend().set_simulate_delete_error(true);
        store
            .update(ContactUpdate::new(ada.id).name("Ada Lovelace"))
            .unwrap();
        store.backend().set_simulate_delete_error(false);

        store.reset_all().unwrap();
        assert!(store.backend().file_names().is_empty());
        assert!(reload(store).is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_silent_noop() {
        let mut store = make_store();
        store.add(NewContact::new("Ada", "1")).unwrap();
        let before = store.revision();

        let result = store.update(ContactUpdate::new(Uuid::new_v4()).name("Ghost"));
        assert!(matches!(result, Ok(None)));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_update_write_failure_keeps_old_state() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(store.update(ContactUpdate::new(ada.id).name("Other")).is_err());
        assert_eq!(store.get_by_id(&ada.id), Some(&ada));
        assert!(store.backend().contains("Ada", &ada.id));
    }

    #[test]
    fn test_successive_updates_strictly_increase_timestamp() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        let mut last = ada.updated_at;
        for i in 0..5 {
            let next = store
                .update(ContactUpdate::new(ada.id).phone_number(i.to_string()))
                .unwrap()
                .unwrap();
            assert!(next.updated_at > last);
            last = next.updated_at;
        }
    }

    // --- Delete ---

    #[test]
    fn test_delete_removes_memory_and_storage() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();

        let removed = store.delete(&ada.id).unwrap();
        assert_eq!(removed, Some(ada.clone()));
        assert_eq!(store.get_by_id(&ada.id), None);
        assert!(store.backend().file_names().is_empty());

        let reloaded = reload(store);
        assert_eq!(reloaded.get_by_id(&ada.id), None);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = make_store();
        assert!(matches!(store.delete(&Uuid::new_v4()), Ok(None)));
    }

    #[test]
    fn test_delete_failure_keeps_contact() {
        let mut store = make_store();
        let ada = store.add(NewContact::new("Ada", "1")).unwrap();
        store.backend().set_simulate_delete_error(true);

        assert!(store.delete(&ada.id).is_err());
        assert_eq!(store.get_by_id(&ada.id), Some(&ada));
    }

    // --- Batch ---

    #[test]
    fn test_import_many_is_one_state_change() {
        let mut store = make_store();
        store.add(NewContact::new("Existing", "0")).unwrap();
        let before = store.revision();

        let batch: Vec<Contact> = (1..=20)
            .map(|i| imported(&format!("Person {}", i), &i.to_string()))
            .collect();
        store.import_many(batch.clone()).unwrap();

        assert_eq!(store.revision(), before + 1);
        assert_eq!(store.len(), 21);
        assert_eq!(&store.contacts()[1..], batch.as_slice());
        assert_eq!(store.backend().file_names().len(), 21);
    }

    #[test]
    fn test_import_many_partial_failure_leaves_memory_without_batch() {
        let mut store = make_store();
        store.add(NewContact::new("Existing", "0")).unwrap();
        let before = store.revision();

        let batch: Vec<Contact> = (1..=5)
            .map(|i| imported(&format!("Person {}", i), &i.to_string()))
            .collect();
        store.backend().fail_for(batch[2].id);

        let err = store.import_many(batch.clone()).unwrap_err();
        assert!(matches!(
            err,
            ContactorError::BatchFailed {
                failed: 1,
                total: 5,
                ..
            }
        ));

        // None of the batch in memory
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), before);
        for contact in &batch {
            assert_eq!(store.get_by_id(&contact.id), None);
        }

        // The other writes settled and stay on disk
        assert!(store.backend().contains(&batch[0].name, &batch[0].id));
        assert!(!store.backend().contains(&batch[2].name, &batch[2].id));
        assert_eq!(store.backend().file_names().len(), 5);
    }

    #[test]
    fn test_import_many_rejects_duplicate_ids_before_writing() {
        let mut store = make_store();
        let existing = store.add(NewContact::new("Ada", "1")).unwrap();
        let writes = store.backend().write_count();

        let mut clash = imported("Clash", "2");
        clash.id = existing.id;
        let err = store
            .import_many(vec![imported("Fine", "3"), clash])
            .unwrap_err();

        assert!(matches!(err, ContactorError::DuplicateId(id) if id == existing.id));
        assert_eq!(store.backend().write_count(), writes);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_many_empty_is_noop() {
        let mut store = make_store();
        let before = store.revision();
        store.import_many(Vec::new()).unwrap();
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut store = make_store();
        for i in 0..4 {
            store.add(NewContact::new(format!("P{}", i), "1")).unwrap();
        }

        store.reset_all().unwrap();
        assert!(store.is_empty());
        assert!(store.backend().file_names().is_empty());
        assert!(reload(store).is_empty());
    }

    #[test]
    fn test_reset_all_failure_keeps_memory() {
        let mut store = make_store();
        let a = store.add(NewContact::new("A", "1")).unwrap();
        store.add(NewContact::new("B", "2")).unwrap();
        store.backend().fail_for(a.id);

        assert!(matches!(
            store.reset_all(),
            Err(ContactorError::BatchFailed { failed: 1, total: 2, .. })
        ));
        assert_eq!(store.len(), 2);
        // B was deleted on disk anyway
        assert_eq!(store.backend().file_names(), vec![contact_filename("A", &a.id)]);
    }
}
