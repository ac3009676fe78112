use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::Selector;
use crate::store::{ContactStore, StorageBackend};

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(store: &ContactStore<B>, selectors: &[Selector]) -> Result<CmdResult> {
    let paths = resolve_selectors(store, selectors)?
        .iter()
        .map(|display| store.record_path(&display.contact))
        .collect();

    Ok(CmdResult::default().with_contact_paths(paths))
}
