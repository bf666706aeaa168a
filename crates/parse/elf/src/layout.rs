//! Word class and byte order.
//!
//! ELF fixes one word class and one byte order for the whole file. Every
//! multi-byte field in every structure is decoded through [`Endian::read_uint`],
//! and every class-dependent width comes from [`Class`].

use crate::error::ElfError;

/// `EI_CLASS` value for 32-bit objects.
pub const ELFCLASS32: u8 = 1;

/// `EI_CLASS` value for 64-bit objects.
pub const ELFCLASS64: u8 = 2;

/// `EI_DATA` value for two's complement little-endian.
pub const ELFDATA2LSB: u8 = 1;

/// `EI_DATA` value for two's complement big-endian.
pub const ELFDATA2MSB: u8 = 2;

/// ELF word class: the width of addresses and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// `ELFCLASS32`: 4-byte addresses and offsets.
    Elf32,
    /// `ELFCLASS64`: 8-byte addresses and offsets.
    Elf64,
}

impl Class {
    /// Decode the `EI_CLASS` identification byte.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::UnsupportedClass`] for any value other than 1 or 2.
    pub fn from_ident(byte: u8) -> Result<Self, ElfError> {
        match byte {
            ELFCLASS32 => Ok(Self::Elf32),
            ELFCLASS64 => Ok(Self::Elf64),
            other => Err(ElfError::UnsupportedClass(other)),
        }
    }

    /// Width in bytes of an address/offset field.
    #[must_use]
    pub const fn word_size(self) -> usize {
        match self {
            Self::Elf32 => 4,
            Self::Elf64 => 8,
        }
    }

    /// Size of the file header.
    #[must_use]
    pub const fn ehdr_size(self) -> usize {
        match self {
            Self::Elf32 => 52,
            Self::Elf64 => 64,
        }
    }

    /// Size of one program header record.
    #[must_use]
    pub const fn phdr_size(self) -> usize {
        match self {
            Self::Elf32 => 32,
            Self::Elf64 => 56,
        }
    }

    /// Size of one section header record.
    #[must_use]
    pub const fn shdr_size(self) -> usize {
        match self {
            Self::Elf32 => 40,
            Self::Elf64 => 64,
        }
    }

    /// Size of one symbol record.
    #[must_use]
    pub const fn sym_size(self) -> usize {
        match self {
            Self::Elf32 => 16,
            Self::Elf64 => 24,
        }
    }
}

/// Byte order of every multi-byte integer in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// `ELFDATA2LSB`.
    Little,
    /// `ELFDATA2MSB`.
    Big,
}

impl Endian {
    /// Decode the `EI_DATA` identification byte.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::UnsupportedEncoding`] for any value other than 1 or 2.
    pub fn from_ident(byte: u8) -> Result<Self, ElfError> {
        match byte {
            ELFDATA2LSB => Ok(Self::Little),
            ELFDATA2MSB => Ok(Self::Big),
            other => Err(ElfError::UnsupportedEncoding(other)),
        }
    }

    /// Interpret `bytes` (at most 8 of them) as an unsigned integer in this byte order.
    #[must_use]
    pub fn read_uint(self, bytes: &[u8]) -> u64 {
        debug_assert!(bytes.len() <= 8, "read_uint takes at most 8 bytes");
        let fold = |acc: u64, &b: &u8| (acc << 8) | u64::from(b);
        match self {
            Self::Little => bytes.iter().rev().fold(0, fold),
            Self::Big => bytes.iter().fold(0, fold),
        }
    }

    /// Encode the low `width` bytes of `value` in this byte order.
    #[must_use]
    pub fn write_uint(self, value: u64, width: usize) -> Vec<u8> {
        let le = value.to_le_bytes();
        let mut out = le[..width].to_vec();
        if self == Self::Big {
            out.reverse();
        }
        out
    }
}

/// Sequential field reader over one fixed-size record.
///
/// The record buffer is read in full before decoding starts, so the field
/// reads themselves cannot fail.
///
/// # Panics
///
/// Reading past the end of the record panics. Callers size the buffer from
/// [`Class`] before constructing the reader.
pub(crate) struct Fields<'a> {
    data: &'a [u8],
    pos: usize,
    class: Class,
    endian: Endian,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "at most N bytes are combined for a uN field"
)]
impl<'a> Fields<'a> {
    pub(crate) fn new(data: &'a [u8], class: Class, endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            class,
            endian,
        }
    }

    fn take(&mut self, n: usize) -> u64 {
        let v = self.endian.read_uint(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        v
    }

    pub(crate) fn u8(&mut self) -> u8 {
        self.take(1) as u8
    }

    pub(crate) fn u16(&mut self) -> u16 {
        self.take(2) as u16
    }

    pub(crate) fn u32(&mut self) -> u32 {
        self.take(4) as u32
    }

    /// An address/offset-sized field: 4 bytes for ELF32, 8 for ELF64.
    pub(crate) fn word(&mut self) -> u64 {
        self.take(self.class.word_size())
    }
}
