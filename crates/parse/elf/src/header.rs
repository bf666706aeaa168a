//! ELF identification block and file header decoding.
//!
//! The identification block fixes the word class and byte order; both are
//! stored on [`FileHeader`] and every other decoder takes them from there.

use std::io::{Read, Seek};

use crate::error::ElfError;
use crate::layout::{Class, Endian, Fields};
use crate::source::ByteSource;

/// ELF magic bytes: `\x7fELF`.
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Size of the identification block.
pub const EI_NIDENT: usize = 16;

/// ELF type: no file type.
pub const ET_NONE: u16 = 0;

/// ELF type: relocatable file.
pub const ET_REL: u16 = 1;

/// ELF type: executable.
pub const ET_EXEC: u16 = 2;

/// ELF type: shared object (also PIE executables).
pub const ET_DYN: u16 = 3;

/// ELF type: core file.
pub const ET_CORE: u16 = 4;

/// `e_shstrndx` escape: the real index lives in section 0's `sh_link`.
pub const SHN_XINDEX: u16 = 0xffff;

/// `e_phnum` escape: the real count lives in section 0's `sh_info`.
pub const PN_XNUM: u16 = 0xffff;

/// The 16-byte `e_ident` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident {
    raw: [u8; EI_NIDENT],
}

impl Ident {
    /// Wrap the raw identification bytes.
    #[must_use]
    pub const fn from_bytes(raw: [u8; EI_NIDENT]) -> Self {
        Self { raw }
    }

    /// All 16 bytes, including padding.
    #[must_use]
    pub const fn raw(&self) -> &[u8; EI_NIDENT] {
        &self.raw
    }

    /// Bytes 0..4.
    #[must_use]
    pub fn magic(&self) -> [u8; 4] {
        [self.raw[0], self.raw[1], self.raw[2], self.raw[3]]
    }

    /// Whether bytes 0..4 are `\x7fELF`.
    #[must_use]
    pub fn has_valid_magic(&self) -> bool {
        self.magic() == ELF_MAGIC
    }

    /// `EI_CLASS`.
    #[must_use]
    pub const fn class(&self) -> u8 {
        self.raw[4]
    }

    /// `EI_DATA`.
    #[must_use]
    pub const fn data(&self) -> u8 {
        self.raw[5]
    }

    /// `EI_VERSION`.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.raw[6]
    }

    /// `EI_OSABI`.
    #[must_use]
    pub const fn os_abi(&self) -> u8 {
        self.raw[7]
    }

    /// `EI_ABIVERSION`.
    #[must_use]
    pub const fn abi_version(&self) -> u8 {
        self.raw[8]
    }
}

/// Decoded ELF file header, common to ELF32 and ELF64.
///
/// Address and offset fields are widened to `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// The identification block.
    pub ident: Ident,
    /// Word class decoded from `EI_CLASS`.
    pub class: Class,
    /// Byte order decoded from `EI_DATA`.
    pub endian: Endian,
    /// Object file type.
    pub e_type: u16,
    /// Target machine architecture.
    pub e_machine: u16,
    /// Object file version.
    pub e_version: u32,
    /// Virtual address of the entry point.
    pub e_entry: u64,
    /// File offset of the program header table.
    pub e_phoff: u64,
    /// File offset of the section header table.
    pub e_shoff: u64,
    /// Processor-specific flags.
    pub e_flags: u32,
    /// Size of this header.
    pub e_ehsize: u16,
    /// Size of one program header entry.
    pub e_phentsize: u16,
    /// Number of program header entries (or [`PN_XNUM`]).
    pub e_phnum: u16,
    /// Size of one section header entry.
    pub e_shentsize: u16,
    /// Number of section header entries (0 when the count overflows).
    pub e_shnum: u16,
    /// Index of the section-name string table (or [`SHN_XINDEX`]).
    pub e_shstrndx: u16,
}

impl FileHeader {
    /// Decode the file header from the start of `src`.
    ///
    /// A magic mismatch is only a diagnostic: it is logged and decoding goes
    /// on so the remaining fields can still be shown. Use
    /// [`check_magic`](Self::check_magic) to treat it as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::UnsupportedClass`] or
    /// [`ElfError::UnsupportedEncoding`] when field widths or byte order are
    /// undefined, and [`ElfError::TruncatedRead`] when the file is shorter
    /// than the header.
    pub fn decode<R: Read + Seek>(src: &mut ByteSource<R>) -> Result<Self, ElfError> {
        let mut raw = [0u8; EI_NIDENT];
        src.read_exact_at(0, &mut raw)?;
        let ident = Ident::from_bytes(raw);
        if !ident.has_valid_magic() {
            log::warn!(
                "wrong magic bytes {:02x?}, continuing for diagnostics",
                ident.magic()
            );
        }

        let class = Class::from_ident(ident.class())?;
        let endian = Endian::from_ident(ident.data())?;
        log::debug!("decoding {class:?} {endian:?}-endian header");

        let rest = src.read_vec_at(EI_NIDENT as u64, (class.ehdr_size() - EI_NIDENT) as u64)?;
        let mut f = Fields::new(&rest, class, endian);

        Ok(Self {
            ident,
            class,
            endian,
            e_type: f.u16(),
            e_machine: f.u16(),
            e_version: f.u32(),
            e_entry: f.word(),
            e_phoff: f.word(),
            e_shoff: f.word(),
            e_flags: f.u32(),
            e_ehsize: f.u16(),
            e_phentsize: f.u16(),
            e_phnum: f.u16(),
            e_shentsize: f.u16(),
            e_shnum: f.u16(),
            e_shstrndx: f.u16(),
        })
    }

    /// Whether the identification block carries the ELF magic.
    #[must_use]
    pub fn has_valid_magic(&self) -> bool {
        self.ident.has_valid_magic()
    }

    /// Fail if the magic bytes are wrong.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::MagicMismatch`] with the bytes that were found.
    pub fn check_magic(&self) -> Result<(), ElfError> {
        if self.has_valid_magic() {
            Ok(())
        } else {
            Err(ElfError::MagicMismatch {
                found: self.ident.magic(),
            })
        }
    }
}
