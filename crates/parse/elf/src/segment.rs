//! Program header (segment) decoding.

use std::io::{Read, Seek};

use crate::error::ElfError;
use crate::header::FileHeader;
use crate::layout::{Class, Endian, Fields};
use crate::section::SectionHeader;
use crate::source::ByteSource;

/// Segment type: unused entry.
pub const PT_NULL: u32 = 0;

/// Segment type: loadable segment.
pub const PT_LOAD: u32 = 1;

/// Segment type: dynamic linking information.
pub const PT_DYNAMIC: u32 = 2;

/// Segment type: interpreter path.
pub const PT_INTERP: u32 = 3;

/// Segment type: auxiliary information.
pub const PT_NOTE: u32 = 4;

/// Segment type: the program header table itself.
pub const PT_PHDR: u32 = 6;

/// Segment type: thread-local storage template.
pub const PT_TLS: u32 = 7;

/// GNU extension: stack executability.
pub const PT_GNU_STACK: u32 = 0x6474_e551;

/// GNU extension: read-only after relocation.
pub const PT_GNU_RELRO: u32 = 0x6474_e552;

bitflags::bitflags! {
    /// `p_flags` permission bits. Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SegmentFlags: u32 {
        /// Executable.
        const X = 0x1;
        /// Writable.
        const W = 0x2;
        /// Readable.
        const R = 0x4;
    }
}

/// One decoded program header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader {
    /// Segment type (`PT_*`).
    pub p_type: u32,
    /// Segment permission flags.
    pub p_flags: SegmentFlags,
    /// File offset of the segment.
    pub p_offset: u64,
    /// Virtual address in memory.
    pub p_vaddr: u64,
    /// Physical address (mostly unused).
    pub p_paddr: u64,
    /// Size in the file.
    pub p_filesz: u64,
    /// Size in memory (may exceed `p_filesz` for BSS).
    pub p_memsz: u64,
    /// Required alignment.
    pub p_align: u64,
}

impl ProgramHeader {
    /// Decode one record. The two classes order the fields differently.
    pub(crate) fn parse(record: &[u8], class: Class, endian: Endian) -> Self {
        let mut f = Fields::new(record, class, endian);
        let p_type = f.u32();
        match class {
            Class::Elf32 => {
                let p_offset = f.word();
                let p_vaddr = f.word();
                let p_paddr = f.word();
                let p_filesz = f.word();
                let p_memsz = f.word();
                let p_flags = SegmentFlags::from_bits_retain(f.u32());
                let p_align = f.word();
                Self {
                    p_type,
                    p_flags,
                    p_offset,
                    p_vaddr,
                    p_paddr,
                    p_filesz,
                    p_memsz,
                    p_align,
                }
            }
            Class::Elf64 => Self {
                p_type,
                p_flags: SegmentFlags::from_bits_retain(f.u32()),
                p_offset: f.word(),
                p_vaddr: f.word(),
                p_paddr: f.word(),
                p_filesz: f.word(),
                p_memsz: f.word(),
                p_align: f.word(),
            },
        }
    }

    /// Returns `true` if this is a `PT_INTERP` segment.
    #[must_use]
    pub const fn is_interp(&self) -> bool {
        self.p_type == PT_INTERP
    }

    /// Returns `true` if `addr` lies in `[p_vaddr, p_vaddr + p_memsz)`.
    #[must_use]
    pub const fn contains_address(&self, addr: u64) -> bool {
        addr >= self.p_vaddr && addr < self.p_vaddr.saturating_add(self.p_memsz)
    }

    /// Indices of the sections whose address falls inside this segment, in
    /// section-index order.
    #[must_use]
    pub fn section_indices(&self, sections: &[SectionHeader]) -> Vec<usize> {
        sections
            .iter()
            .enumerate()
            .filter(|(_, shdr)| self.contains_address(shdr.sh_addr))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Decode `count` program headers from the table described by `header`.
///
/// `count` is passed separately so the caller can resolve `PN_XNUM`.
///
/// # Errors
///
/// Returns [`ElfError::InvalidEntrySize`] if `e_phentsize` is smaller than a
/// program header record, or [`ElfError::TruncatedRead`] if the table runs
/// past the end of the file.
pub fn decode_program_headers<R: Read + Seek>(
    src: &mut ByteSource<R>,
    header: &FileHeader,
    count: usize,
) -> Result<Vec<ProgramHeader>, ElfError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let record = header.class.phdr_size() as u64;
    let stride = u64::from(header.e_phentsize);
    if stride < record {
        return Err(ElfError::InvalidEntrySize {
            table: "program header table".into(),
            entry_size: stride,
            minimum: record,
        });
    }

    let mut phdrs = Vec::new();
    for i in 0..count as u64 {
        let offset = header.e_phoff.saturating_add(i.saturating_mul(stride));
        let buf = src.read_vec_at(offset, record)?;
        phdrs.push(ProgramHeader::parse(&buf, header.class, header.endian));
    }
    log::debug!("decoded {} program headers", phdrs.len());
    Ok(phdrs)
}

/// Read the interpreter path named by a `PT_INTERP` segment.
///
/// The path is read up to the first NUL byte regardless of `p_filesz` and
/// decoded as UTF-8 with replacement characters.
///
/// # Errors
///
/// Returns [`ElfError::TruncatedString`] if the file ends before a NUL byte.
pub fn read_interpreter<R: Read + Seek>(
    src: &mut ByteSource<R>,
    phdr: &ProgramHeader,
) -> Result<String, ElfError> {
    let bytes = src.read_cstr_at(phdr.p_offset, u64::MAX)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
