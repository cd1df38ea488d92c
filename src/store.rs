//! Snapshot persistence for the dataset and contacts files.
//!
//! Both files are read fully at startup and rewritten in full after every
//! crawl unit. A missing or corrupt file never blocks a run: `load_*`
//! returns an empty, well-formed default and the run rebuilds from the
//! source. Writes go to a temp file and are renamed into place, so a crash
//! mid-write leaves the previous snapshot intact. Failure to write is the
//! one error in this system that must reach the operator, since it defeats
//! the checkpoint guarantee.

use crate::models::{ContactBook, Dataset};
use chrono::Utc;
use std::fs;
use std::io;
use tracing::{info, warn};

/// Load the voting dataset, or an empty one if the file is absent/corrupt.
pub fn load_dataset(path: &str) -> Dataset {
    match read_snapshot(path) {
        Some(raw) => match serde_json::from_str::<Dataset>(&raw) {
            Ok(mut dataset) => {
                dataset.rebuild_index();
                info!(
                    path,
                    mps = dataset.mps.len(),
                    bills = dataset.bills.len(),
                    "Loaded existing dataset"
                );
                dataset
            }
            Err(e) => {
                warn!(path, error = %e, "Dataset file corrupt; starting from empty");
                Dataset::default()
            }
        },
        None => Dataset::default(),
    }
}

/// Persist the dataset, stamping `last_updated` with the current UTC time.
pub fn persist_dataset(dataset: &mut Dataset, path: &str) -> io::Result<()> {
    dataset.last_updated = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let json = serde_json::to_string_pretty(dataset)?;
    write_atomic(path, &json)
}

/// Load the contacts file, or an empty book if the file is absent/corrupt.
pub fn load_contacts(path: &str) -> ContactBook {
    match read_snapshot(path) {
        Some(raw) => match serde_json::from_str::<ContactBook>(&raw) {
            Ok(mut book) => {
                book.rebuild_index();
                info!(path, entries = book.len(), "Loaded existing contacts");
                book
            }
            Err(e) => {
                warn!(path, error = %e, "Contacts file corrupt; starting from empty");
                ContactBook::default()
            }
        },
        None => ContactBook::default(),
    }
}

pub fn persist_contacts(book: &ContactBook, path: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    write_atomic(path, &json)
}

fn read_snapshot(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path, "No existing snapshot; starting fresh");
            None
        }
        Err(e) => {
            warn!(path, error = %e, "Snapshot unreadable; starting from empty");
            None
        }
    }
}

/// Write-then-rename full-file replace.
fn write_atomic(path: &str, contents: &str) -> io::Result<()> {
    let tmp = format!("{path}.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    info!(path, bytes = contents.len(), "Persisted snapshot");
    Ok(())
}
