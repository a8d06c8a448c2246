//! Output records and the CSV sink.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// One row of output, produced for every placemark in the document.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacemarkRecord {
    pub name: String,
    pub description: String,
    pub longitude: String,
    pub latitude: String,
    pub layer: String,
    pub icon: String,
    pub color: String,
    pub style_url: String,
    pub fruit_type: String,
    pub legitimacy: String,
}

/// Column header, in output order
pub const HEADER: [&str; 10] = [
    "name",
    "description",
    "longitude",
    "latitude",
    "layer",
    "icon",
    "color",
    "style_url",
    "fruit_type",
    "legitimacy",
];

/// Write `records` as CSV to `path`.
///
/// Rows go to a temporary file beside `path` that is renamed into place
/// once everything is flushed, so `path` never holds a partial file.
pub fn write_csv(path: &Path, records: &[PlacemarkRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;

    {
        // Header written by hand so an empty record list still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut tmp);
        writer.write_record(HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }

    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(rows = records.len(), path = %path.display(), "wrote CSV");
    Ok(())
}

/// Read records back from a CSV produced by [`write_csv`]
pub fn read_csv(path: &Path) -> Result<Vec<PlacemarkRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
