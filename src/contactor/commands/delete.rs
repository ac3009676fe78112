use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::Selector;
use crate::store::{ContactStore, StorageBackend};

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(
    store: &mut ContactStore<B>,
    selectors: &[Selector],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for display in resolved {
        // A selector repeated as both index and id resolves twice
        let Some(removed) = store.delete(&display.contact.id)? else {
            continue;
        };
        result.add_message(CmdMessage::success(format!(
            "Contact deleted ({}): {}",
            display.index, removed.name
        )));
        result.affected_contacts.push(removed);
    }

    Ok(result)
}
