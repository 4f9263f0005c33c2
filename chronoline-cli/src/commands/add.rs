//! Add command implementation - record an event at the current instant

use chrono::Local;

use chronoline_core::{EventLog, FileStore, STORED_TIME_FORMAT};

use crate::config::Config;
use crate::error::CliResult;

pub fn execute(config: &Config, name: String) -> CliResult<()> {
    let store = FileStore::open(&config.storage.data_dir)?;
    let mut events = EventLog::load(store);

    let time = Local::now().naive_local();
    events.append(name.clone(), time)?;

    log::info!(
        "Recorded \"{}\" at {}; {} event(s) total",
        name,
        time.format(STORED_TIME_FORMAT),
        events.len()
    );
    Ok(())
}
