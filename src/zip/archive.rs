use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// A KMZ (zipped KML) archive with its central directory already read
pub struct KmzArchive<R: ReadAt> {
    parser: ZipParser<R>,
    entries: Vec<ZipFileEntry>,
}

impl KmzArchive<LocalFileReader> {
    /// Open an archive on the local filesystem
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(LocalFileReader::open(path)?)
    }
}

impl<R: ReadAt> KmzArchive<R> {
    pub fn new(reader: R) -> Result<Self> {
        let parser = ZipParser::new(reader);
        let entries = parser.list_files()?;
        debug!(entries = entries.len(), "read central directory");
        Ok(Self { parser, entries })
    }

    /// All entries in central directory order
    pub fn entries(&self) -> &[ZipFileEntry] {
        &self.entries
    }

    /// The first entry whose name ends with `.kml`
    pub fn find_document(&self) -> Result<&ZipFileEntry> {
        self.entries
            .iter()
            .find(|e| e.is_kml())
            .ok_or(Error::NoDocumentEntry)
    }

    /// Decompress an entry into memory, verifying its size and CRC-32
    pub fn read(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            return Err(Error::invalid_archive(format!(
                "{} is encrypted",
                entry.file_name
            )));
        }

        let raw = self.parser.read_raw(entry)?;
        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size as usize);
                DeflateDecoder::new(raw.as_slice())
                    .read_to_end(&mut out)
                    .map_err(|e| {
                        Error::invalid_archive(format!(
                            "cannot inflate {}: {e}",
                            entry.file_name
                        ))
                    })?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(Error::invalid_archive(format!(
                    "{} uses unsupported compression method {method}",
                    entry.file_name
                )));
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(Error::invalid_archive(format!(
                "{} inflated to {} bytes, expected {}",
                entry.file_name,
                data.len(),
                entry.uncompressed_size
            )));
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(Error::invalid_archive(format!(
                "CRC mismatch in {}",
                entry.file_name
            )));
        }

        Ok(data)
    }
}
