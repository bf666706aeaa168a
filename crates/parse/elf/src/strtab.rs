//! String table lookups.
//!
//! A string table is a section of concatenated NUL-terminated strings,
//! referenced by byte offset from section headers (`sh_name`) and symbols
//! (`st_name`). Lookups read straight from the byte source, bounded by the
//! section's declared size.

use std::io::{Read, Seek};

use crate::error::ElfError;
use crate::section::SectionHeader;
use crate::source::ByteSource;

/// Location of a string table section within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringTable {
    offset: u64,
    size: u64,
}

impl StringTable {
    /// A string table spanning `size` bytes at file offset `offset`.
    #[must_use]
    pub const fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// The string table backing a section header.
    #[must_use]
    pub const fn from_section(shdr: &SectionHeader) -> Self {
        Self::new(shdr.sh_offset, shdr.sh_size)
    }

    /// File offset of the table.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Declared size of the table.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Raw bytes of the string at relative offset `index`, without the terminator.
    ///
    /// Offset 0 is always the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::InvalidStringOffset`] if `index` lies outside the
    /// table and [`ElfError::TruncatedString`] if no NUL byte is found before
    /// the end of the table or the file.
    pub fn get_bytes<R: Read + Seek>(
        &self,
        src: &mut ByteSource<R>,
        index: u32,
    ) -> Result<Vec<u8>, ElfError> {
        if index == 0 {
            return Ok(Vec::new());
        }
        let rel = u64::from(index);
        if rel >= self.size {
            return Err(ElfError::InvalidStringOffset {
                offset: rel,
                size: self.size,
            });
        }
        let end = self.offset.saturating_add(self.size);
        src.read_cstr_at(self.offset + rel, end)
    }

    /// The string at relative offset `index`, decoded as UTF-8 with
    /// replacement characters for invalid sequences.
    ///
    /// # Errors
    ///
    /// Same as [`get_bytes`](Self::get_bytes).
    pub fn get<R: Read + Seek>(
        &self,
        src: &mut ByteSource<R>,
        index: u32,
    ) -> Result<String, ElfError> {
        let bytes = self.get_bytes(src, index)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
