use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut ContactStore<B>) -> Result<CmdResult> {
    let count = store.len();
    store.reset_all()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Removed {} contacts", count)));
    Ok(result)
}
