//! Clear command implementation - drop the log and remove the slot

use chronoline_core::{EventLog, FileStore};

use crate::config::Config;
use crate::error::CliResult;

pub fn execute(config: &Config) -> CliResult<()> {
    let store = FileStore::open(&config.storage.data_dir)?;
    let mut events = EventLog::load(store);

    let dropped = events.len();
    events.clear()?;

    log::info!("Cleared {} event(s); slot removed", dropped);
    Ok(())
}
