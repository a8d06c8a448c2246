//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. Read the Central Directory to get metadata for all files
//! 3. For extraction, read each file's Local File Header and data

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Cursor, Read};

use crate::error::{Error, Result};
use crate::io::ReadAt;

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Low-level ZIP file parser.
///
/// Typically used through [`KmzArchive`](super::KmzArchive) rather than
/// directly.
pub struct ZipParser<R: ReadAt> {
    reader: R,
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: R) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Read exactly `buf.len()` bytes at `offset`, treating a short source
    /// as a truncated archive.
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.reader
            .read_exact_at(offset, buf)
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::invalid_archive("archive is truncated"),
                _ => Error::Io(e),
            })
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Handles both the simple case (no comment) and archives with
    /// comments by searching backwards for the signature.
    ///
    /// # Returns
    ///
    /// A tuple of (EOCD record, offset of EOCD in file).
    pub fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64)> {
        let eocd_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < eocd_size {
            return Err(Error::invalid_archive("not a zip file"));
        }

        // Common case: no archive comment.
        let offset = self.size - eocd_size;
        let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
        self.read_exact_at(offset, &mut buf)?;
        if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && buf[20..22] == [0, 0] {
            return Ok((EndOfCentralDirectory::from_bytes(&buf)?, offset));
        }

        let search_size = (MAX_COMMENT_SIZE + eocd_size).min(self.size);
        let search_start = self.size - search_size;

        let mut buf = vec![0u8; search_size as usize];
        self.read_exact_at(search_start, &mut buf)?;

        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            if &buf[i..i + 4] != EndOfCentralDirectory::SIGNATURE {
                continue;
            }
            // The comment length must account for every trailing byte.
            let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;
            if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                let eocd =
                    EndOfCentralDirectory::from_bytes(&buf[i..i + EndOfCentralDirectory::SIZE])?;
                return Ok((eocd, search_start + i as u64));
            }
        }

        Err(Error::invalid_archive("not a zip file"))
    }

    /// List all entries in the archive, in central directory order.
    pub fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        let (eocd, eocd_offset) = self.find_eocd()?;
        eocd.validate()?;

        let cd_offset = eocd.cd_offset as u64;
        let cd_size = eocd.cd_size as u64;
        if cd_offset + cd_size > eocd_offset {
            return Err(Error::invalid_archive(
                "central directory extends past its end record",
            ));
        }

        let mut cd_data = vec![0u8; cd_size as usize];
        self.read_exact_at(cd_offset, &mut cd_data)?;

        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        let mut cursor = Cursor::new(cd_data.as_slice());

        for _ in 0..eocd.total_entries {
            let entry = parse_cdfh(&mut cursor).map_err(|e| match e {
                Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    Error::invalid_archive("central directory is truncated")
                }
                other => other,
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Get the actual data offset for a file entry.
    ///
    /// The Local File Header has variable-length fields that may differ
    /// from the Central Directory entry, so it is read to find where the
    /// compressed data begins.
    pub fn get_data_offset(&self, entry: &ZipFileEntry) -> Result<u64> {
        let mut lfh_buf = [0u8; LFH_SIZE];
        self.read_exact_at(entry.lfh_offset, &mut lfh_buf)?;

        if &lfh_buf[0..4] != LFH_SIGNATURE {
            return Err(Error::invalid_archive(format!(
                "bad local file header for {}",
                entry.file_name
            )));
        }

        // Filename and extra field lengths sit at fixed positions 26 and 28.
        let file_name_length = u16::from_le_bytes([lfh_buf[26], lfh_buf[27]]) as u64;
        let extra_field_length = u16::from_le_bytes([lfh_buf[28], lfh_buf[29]]) as u64;

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    /// Read the raw (possibly compressed) bytes of an entry.
    pub fn read_raw(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let data_offset = self.get_data_offset(entry)?;
        let mut buf = vec![0u8; entry.compressed_size as usize];
        self.read_exact_at(data_offset, &mut buf)?;
        Ok(buf)
    }
}

/// Parse one Central Directory File Header.
fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ZipFileEntry> {
    let remaining = cursor.get_ref().len() as u64 - cursor.position();
    if remaining < CDFH_MIN_SIZE as u64 {
        return Err(Error::invalid_archive("central directory is truncated"));
    }

    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        return Err(Error::invalid_archive(
            "bad central directory file header",
        ));
    }

    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let flags = cursor.read_u16::<LittleEndian>()?;
    let compression_method = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

    let mut file_name_bytes = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut file_name_bytes)?;
    // Names in the wild are not always UTF-8; a lossy name is still matchable.
    let file_name = String::from_utf8_lossy(&file_name_bytes).into_owned();
    let is_directory = file_name.ends_with('/');

    // Extra field and comment carry nothing we use.
    let skip = extra_field_length as u64 + file_comment_length as u64;
    if cursor.position() + skip > cursor.get_ref().len() as u64 {
        return Err(Error::invalid_archive("central directory is truncated"));
    }
    cursor.set_position(cursor.position() + skip);

    Ok(ZipFileEntry {
        file_name,
        compression_method: CompressionMethod::from_u16(compression_method),
        compressed_size,
        uncompressed_size,
        crc32,
        lfh_offset,
        flags,
        is_directory,
    })
}
