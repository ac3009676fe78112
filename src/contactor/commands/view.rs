use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::Selector;
use crate::store::{ContactStore, StorageBackend};

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(store: &ContactStore<B>, selectors: &[Selector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_contacts(resolved))
}
