use super::ReadAt;
use crate::error::{Error, Result};
use std::fs::File;
use std::io;
use std::path::Path;

/// Local file reader with random access support
pub struct LocalFileReader {
    file: File,
    size: u64,
}

impl LocalFileReader {
    /// Open `path` for random access.
    ///
    /// Missing paths and anything that is not a regular file are reported as
    /// [`Error::ArchiveNotFound`].
    pub fn open(path: &Path) -> Result<Self> {
        let not_found = || Error::ArchiveNotFound {
            path: path.to_path_buf(),
        };

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => not_found(),
            _ => Error::Io(e),
        })?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        Ok(Self {
            file,
            size: metadata.len(),
        })
    }
}

impl ReadAt for LocalFileReader {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_at(buf, offset)
        }

        #[cfg(windows)]
        {
            use std::os::windows::fs::FileExt;
            self.file.seek_read(buf, offset)
        }

        #[cfg(not(any(unix, windows)))]
        {
            use std::io::{Read, Seek, SeekFrom};
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;
            file.read(buf)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
