use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ContactorError, Result};
use crate::model::NewContact;
use crate::store::{ContactStore, StorageBackend};
use crate::validation::validate_new;

pub fn run<B: StorageBackend>(store: &mut ContactStore<B>, input: NewContact) -> Result<CmdResult> {
    let input = validate_new(&input).map_err(ContactorError::Validation)?;
    let contact = store.add(input)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact created: {}",
        contact.name
    )));
    result.affected_contacts.push(contact);
    Ok(result)
}
