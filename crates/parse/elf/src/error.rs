//! Errors produced while decoding ELF structures.

use core::fmt;
use std::io;

/// Errors that can occur when decoding an ELF file.
///
/// Every variant carries enough context (file offsets, sizes, section names)
/// to diagnose a malformed input without re-reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElfError {
    /// The identification block does not start with `\x7fELF`.
    MagicMismatch {
        /// The four bytes actually found at offset 0.
        found: [u8; 4],
    },
    /// `EI_CLASS` is neither `ELFCLASS32` nor `ELFCLASS64`.
    UnsupportedClass(u8),
    /// `EI_DATA` is neither `ELFDATA2LSB` nor `ELFDATA2MSB`.
    UnsupportedEncoding(u8),
    /// A fixed-size read would run past the end of the file.
    TruncatedRead {
        /// File offset the read started at.
        offset: u64,
        /// Number of bytes requested.
        expected: u64,
        /// Number of bytes left in the file at `offset`.
        available: u64,
    },
    /// A string lookup reached its bound without finding a NUL terminator.
    TruncatedString {
        /// File offset the string started at.
        offset: u64,
        /// Text read before the bound was hit (lossily decoded).
        partial: String,
    },
    /// A string table offset lies outside the table.
    InvalidStringOffset {
        /// The relative offset that was requested.
        offset: u64,
        /// Declared size of the string table.
        size: u64,
    },
    /// A symbol table has no paired string table section.
    MissingStringTable {
        /// Name of the symbol table section.
        section: String,
        /// Name of the string table section that was looked for.
        expected: &'static str,
    },
    /// A table's size is not a whole number of entries.
    NonIntegralEntryCount {
        /// Name of the offending section.
        section: String,
        /// Declared size in bytes.
        size: u64,
        /// Declared entry size in bytes.
        entry_size: u64,
    },
    /// A table declares an entry size of zero or one smaller than the record layout.
    InvalidEntrySize {
        /// The table being decoded (a section name or header table).
        table: String,
        /// Declared entry size.
        entry_size: u64,
        /// Size of one record under the file's word class.
        minimum: u64,
    },
    /// The underlying reader failed.
    Io {
        /// File offset of the failed operation.
        offset: u64,
        /// Kind of the I/O error.
        kind: io::ErrorKind,
    },
}

impl ElfError {
    pub(crate) fn io(offset: u64, err: &io::Error) -> Self {
        Self::Io {
            offset,
            kind: err.kind(),
        }
    }

    /// Text recovered by a failed string lookup: the partial string of
    /// [`ElfError::TruncatedString`], empty for every other error.
    #[must_use]
    pub fn recovered_text(&self) -> &str {
        match self {
            Self::TruncatedString { partial, .. } => partial,
            _ => "",
        }
    }
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MagicMismatch { found } => write!(
                f,
                "not an ELF file: wrong magic bytes {:02x} {:02x} {:02x} {:02x}",
                found[0], found[1], found[2], found[3]
            ),
            Self::UnsupportedClass(class) => {
                write!(f, "unsupported ELF class {class} (expected 1 or 2)")
            }
            Self::UnsupportedEncoding(data) => {
                write!(f, "unsupported data encoding {data} (expected 1 or 2)")
            }
            Self::TruncatedRead {
                offset,
                expected,
                available,
            } => write!(
                f,
                "truncated read at offset {offset:#x}: needed {expected} bytes, {available} available"
            ),
            Self::TruncatedString { offset, partial } => write!(
                f,
                "unterminated string at offset {offset:#x} (read {:?} before the end)",
                partial
            ),
            Self::InvalidStringOffset { offset, size } => write!(
                f,
                "string offset {offset:#x} is outside a string table of {size} bytes"
            ),
            Self::MissingStringTable { section, expected } => {
                write!(f, "symbol table '{section}' has no '{expected}' section")
            }
            Self::NonIntegralEntryCount {
                section,
                size,
                entry_size,
            } => write!(
                f,
                "section '{section}' size {size} is not a multiple of its entry size {entry_size}"
            ),
            Self::InvalidEntrySize {
                table,
                entry_size,
                minimum,
            } => write!(
                f,
                "{table} has entry size {entry_size}, expected at least {minimum}"
            ),
            Self::Io { offset, kind } => write!(f, "I/O error at offset {offset:#x}: {kind}"),
        }
    }
}

impl std::error::Error for ElfError {}
