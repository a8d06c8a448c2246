//! ZIP archive parsing for KMZ files.
//!
//! - `structures`: the on-disk records (EOCD, file headers)
//! - `parser`: low-level parsing of those records from a [`ReadAt`](crate::io::ReadAt)
//! - `archive`: the [`KmzArchive`] API used by the rest of the crate
//!
//! A ZIP file consists of local file headers and data for each file, then a
//! Central Directory with metadata for all files, then the End of Central
//! Directory record. Reading starts from the end.
//!
//! Only STORED and DEFLATE entries on single-disk, non-ZIP64 archives are
//! accepted. Encrypted entries are rejected.

mod archive;
mod parser;
mod structures;

pub use archive::KmzArchive;
pub use parser::ZipParser;
pub use structures::*;
