use std::io::Read;

use csv::ReaderBuilder;
use tracing::debug;

use super::{DirectoryEntry, DirectoryError};

/// Column labels treated as the entry title rather than as a field value.
const TITLE_LABELS: &[&str] = &["titel", "name"];

/// Reads directory entries from a CSV export whose header row carries the
/// organisation's field labels.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<DirectoryEntry>, DirectoryError> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| DirectoryError::Read(err.to_string()))?
        .clone();

    let mut entries = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(|err| DirectoryError::Read(err.to_string()))?;
        let mut entry = DirectoryEntry::default();

        for (label, value) in headers.iter().zip(record.iter()) {
            if TITLE_LABELS.contains(&label.to_lowercase().as_str()) {
                entry.title = value.to_string();
            } else {
                entry.values.insert(label.to_string(), value.to_string());
            }
        }

        entries.push(entry);
    }

    debug!(entries = entries.len(), "read directory export");

    Ok(entries)
}
