//! JSON import/export of the progress map.
//! Files use the same layout as the stored `pairProgress` record.

use crate::database::{AttemptLog, KeyValueStore};
use crate::error::Result;
use crate::models::ProgressMap;
use log::info;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Writes the progress map to a pretty-printed JSON file.
pub fn export_json_to_path(progress: &ProgressMap, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(progress)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    info!("Exported {} pairs to {:?}", progress.len(), path);
    Ok(())
}

/// Reads a progress map from a JSON file.
pub fn import_json(path: &Path) -> Result<ProgressMap> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let progress: ProgressMap = serde_json::from_str(&contents)?;
    info!("Imported {} pairs from {:?}", progress.len(), path);
    Ok(progress)
}

/// Replaces the stored log with the contents of a file, keeping only the
/// newest attempts per pair when the log is capped.
/// Unlike attempt recording, failures here are returned to the caller.
pub fn restore_from_path<S: KeyValueStore>(log: &AttemptLog<S>, path: &Path) -> Result<usize> {
    log.replace_all(import_json(path)?)
}
