//! List command implementation - print the recorded events

use chronoline_core::{EventLog, FileStore, STORED_TIME_FORMAT};

use crate::config::Config;
use crate::error::CliResult;

pub fn execute(config: &Config) -> CliResult<()> {
    let store = FileStore::open(&config.storage.data_dir)?;
    let events = EventLog::load(store);

    if events.is_empty() {
        println!("no events recorded");
        return Ok(());
    }

    for event in events.events() {
        println!("{}  {}", event.time.format(STORED_TIME_FORMAT), event.name);
    }
    Ok(())
}
