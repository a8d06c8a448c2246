//! # kmz2csv
//!
//! Extract placemarks from a KMZ (zipped KML) archive into CSV.
//!
//! Each placemark becomes one row carrying its name, description,
//! coordinates, enclosing Folder ("layer"), resolved style appearance, and a
//! fruit type / legitimacy classification looked up from a style table.
//!
//! ## Features
//!
//! - Reads KMZ archives with STORED or DEFLATE entries, verifying CRC-32
//! - Namespace-agnostic KML tag matching
//! - `Style`/`StyleMap` resolution for icon and color
//! - Classification table loaded from TOML, with the survey table built in
//! - Atomic CSV output and a per-style summary report
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use kmz2csv::{Classification, convert};
//!
//! fn main() -> kmz2csv::Result<()> {
//!     let table = Classification::builtin()?;
//!     let rows = convert(Path::new("trees.kmz"), Path::new("trees.csv"), &table)?;
//!     println!("{rows} placemarks");
//!     Ok(())
//! }
//! ```

pub mod analyze;
pub mod classify;
pub mod cli;
pub mod convert;
pub mod error;
pub mod io;
pub mod kml;
pub mod logging;
pub mod record;
pub mod zip;

pub use classify::{Classification, Legitimacy, StyleClass};
pub use cli::Cli;
pub use convert::{convert, extract_file, load_document};
pub use error::{Error, Result};
pub use io::{LocalFileReader, ReadAt};
pub use kml::{KmlSource, extract};
pub use record::PlacemarkRecord;
pub use zip::{KmzArchive, ZipFileEntry};
