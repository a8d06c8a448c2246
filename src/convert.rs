//! The KMZ to CSV pipeline: archive, document, extraction, sink.

use std::path::Path;
use tracing::info;

use crate::classify::Classification;
use crate::error::Result;
use crate::kml::{self, KmlSource};
use crate::record::{self, PlacemarkRecord};
use crate::zip::KmzArchive;

/// Read the KML document out of the archive at `path`
pub fn load_document(path: &Path) -> Result<KmlSource> {
    let archive = KmzArchive::open(path)?;
    KmlSource::from_archive(&archive)
}

/// Extract every placemark from the archive at `path`
pub fn extract_file(path: &Path, table: &Classification) -> Result<Vec<PlacemarkRecord>> {
    let source = load_document(path)?;
    let doc = source.parse()?;
    Ok(kml::extract(&doc, table))
}

/// Convert the archive at `input` to CSV at `output`.
///
/// Returns the number of rows written. Nothing is written to `output`
/// unless the whole conversion succeeds.
pub fn convert(input: &Path, output: &Path, table: &Classification) -> Result<usize> {
    let records = extract_file(input, table)?;
    record::write_csv(output, &records)?;
    info!(
        "Successfully converted {} placemarks to {}",
        records.len(),
        output.display()
    );
    Ok(records.len())
}
