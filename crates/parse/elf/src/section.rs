//! Section header table decoding and section name resolution.

use std::io::{Read, Seek};

use crate::error::ElfError;
use crate::header::{FileHeader, SHN_XINDEX};
use crate::layout::{Class, Endian, Fields};
use crate::source::ByteSource;
use crate::strtab::StringTable;

/// Section type: inactive.
pub const SHT_NULL: u32 = 0;

/// Section type: program-defined contents.
pub const SHT_PROGBITS: u32 = 1;

/// Section type: symbol table.
pub const SHT_SYMTAB: u32 = 2;

/// Section type: string table.
pub const SHT_STRTAB: u32 = 3;

/// Section type: relocation entries with addends.
pub const SHT_RELA: u32 = 4;

/// Section type: dynamic linking information.
pub const SHT_DYNAMIC: u32 = 6;

/// Section type: occupies no file space (`.bss`).
pub const SHT_NOBITS: u32 = 8;

/// Section type: relocation entries without addends.
pub const SHT_REL: u32 = 9;

/// Section type: dynamic symbol table.
pub const SHT_DYNSYM: u32 = 11;

bitflags::bitflags! {
    /// `sh_flags` bits. Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionFlags: u64 {
        /// Writable data.
        const WRITE = 0x1;
        /// Occupies memory during execution.
        const ALLOC = 0x2;
        /// Executable machine instructions.
        const EXECINSTR = 0x4;
        /// Might be merged.
        const MERGE = 0x10;
        /// Contains NUL-terminated strings.
        const STRINGS = 0x20;
        /// `sh_info` holds a section index.
        const INFO_LINK = 0x40;
        /// Preserve order after combining.
        const LINK_ORDER = 0x80;
        /// Non-standard OS-specific handling required.
        const OS_NONCONFORMING = 0x100;
        /// Member of a section group.
        const GROUP = 0x200;
        /// Holds thread-local data.
        const TLS = 0x400;
        /// Compressed contents.
        const COMPRESSED = 0x800;
        /// Excluded from executables and shared objects.
        const EXCLUDE = 0x8000_0000;
    }
}

/// One decoded section header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    /// Offset of this section's name in the section-name string table.
    pub sh_name: u32,
    /// Section type (`SHT_*`).
    pub sh_type: u32,
    /// Section flags.
    pub sh_flags: SectionFlags,
    /// Virtual address when loaded (0 for non-allocated sections).
    pub sh_addr: u64,
    /// File offset of the section contents.
    pub sh_offset: u64,
    /// Size of the section in bytes.
    pub sh_size: u64,
    /// Index of an associated section.
    pub sh_link: u32,
    /// Extra information, interpretation depends on `sh_type`.
    pub sh_info: u32,
    /// Required alignment.
    pub sh_addralign: u64,
    /// Size of each entry for tables of fixed-size records, else 0.
    pub sh_entsize: u64,
}

impl SectionHeader {
    /// Decode one record under the given class and byte order.
    ///
    /// `record` must hold at least [`Class::shdr_size`] bytes.
    pub(crate) fn parse(record: &[u8], class: Class, endian: Endian) -> Self {
        let mut f = Fields::new(record, class, endian);
        let sh_name = f.u32();
        let sh_type = f.u32();
        let sh_flags = SectionFlags::from_bits_retain(f.word());
        let sh_addr = f.word();
        let sh_offset = f.word();
        let sh_size = f.word();
        let sh_link = f.u32();
        let sh_info = f.u32();
        let sh_addralign = f.word();
        let sh_entsize = f.word();
        Self {
            sh_name,
            sh_type,
            sh_flags,
            sh_addr,
            sh_offset,
            sh_size,
            sh_link,
            sh_info,
            sh_addralign,
            sh_entsize,
        }
    }

    /// Read the section header at `index` of the table described by `header`.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::TruncatedRead`] if the record lies past the end of the file.
    pub fn read_at<R: Read + Seek>(
        src: &mut ByteSource<R>,
        header: &FileHeader,
        index: usize,
    ) -> Result<Self, ElfError> {
        let offset = header
            .e_shoff
            .saturating_add((index as u64).saturating_mul(u64::from(header.e_shentsize)));
        let record = src.read_vec_at(offset, header.class.shdr_size() as u64)?;
        Ok(Self::parse(&record, header.class, header.endian))
    }
}

/// A section index with its resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSection {
    /// Index into the section header table.
    pub index: usize,
    /// The resolved name. Partial or empty if the lookup failed.
    pub name: String,
    /// Why the name could not be resolved in full, if it couldn't.
    pub name_error: Option<ElfError>,
}

/// The decoded section header table plus the choice of section-name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTable {
    headers: Vec<SectionHeader>,
    names_index: Option<usize>,
    names_discrepancy: Option<(usize, usize)>,
}

impl SectionTable {
    /// Decode every section header described by `header`.
    ///
    /// Applies extended numbering: with `e_shnum == 0` the count is taken from
    /// section 0's `sh_size`, and with `e_shstrndx == SHN_XINDEX` the name
    /// table index is taken from section 0's `sh_link`.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::InvalidEntrySize`] if `e_shentsize` is smaller than
    /// a section header record, or [`ElfError::TruncatedRead`] if the table
    /// runs past the end of the file.
    pub fn decode<R: Read + Seek>(
        src: &mut ByteSource<R>,
        header: &FileHeader,
    ) -> Result<Self, ElfError> {
        if header.e_shoff == 0 && header.e_shnum == 0 {
            return Ok(Self {
                headers: Vec::new(),
                names_index: None,
                names_discrepancy: None,
            });
        }

        let minimum = header.class.shdr_size() as u64;
        if u64::from(header.e_shentsize) < minimum {
            return Err(ElfError::InvalidEntrySize {
                table: "section header table".into(),
                entry_size: u64::from(header.e_shentsize),
                minimum,
            });
        }

        let first = SectionHeader::read_at(src, header, 0)?;
        let count = if header.e_shnum == 0 {
            log::debug!("extended section numbering: {} sections", first.sh_size);
            usize::try_from(first.sh_size).unwrap_or(usize::MAX)
        } else {
            usize::from(header.e_shnum)
        };

        let mut headers = vec![first];
        for index in 1..count {
            headers.push(SectionHeader::read_at(src, header, index)?);
        }
        headers.truncate(count);

        let explicit = if header.e_shstrndx == SHN_XINDEX {
            first.sh_link as usize
        } else {
            usize::from(header.e_shstrndx)
        };
        let (names_index, names_discrepancy) = select_names_table(headers.len(), explicit);

        Ok(Self {
            headers,
            names_index,
            names_discrepancy,
        })
    }

    /// All section headers, in section-index order.
    #[must_use]
    pub fn headers(&self) -> &[SectionHeader] {
        &self.headers
    }

    /// Number of sections, including the null section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if the file has no section header table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// The section header at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SectionHeader> {
        self.headers.get(index)
    }

    /// Index of the section used to resolve section names.
    #[must_use]
    pub fn names_index(&self) -> Option<usize> {
        self.names_index
    }

    /// `(e_shstrndx, last section)` when both name a section but disagree.
    #[must_use]
    pub fn names_discrepancy(&self) -> Option<(usize, usize)> {
        self.names_discrepancy
    }

    /// The section-name string table, if one was selected.
    #[must_use]
    pub fn names_table(&self) -> Option<StringTable> {
        self.names_index
            .and_then(|i| self.headers.get(i))
            .map(StringTable::from_section)
    }

    /// Resolve the name of the section at `index`.
    ///
    /// The null section, indices outside the table, and every section of a
    /// file without a name table resolve to the empty string. Names are read
    /// afresh on every call.
    ///
    /// # Errors
    ///
    /// Propagates string table lookup errors.
    pub fn name<R: Read + Seek>(
        &self,
        src: &mut ByteSource<R>,
        index: usize,
    ) -> Result<String, ElfError> {
        if index == 0 {
            return Ok(String::new());
        }
        match (self.headers.get(index), self.names_table()) {
            (Some(shdr), Some(names)) => names.get(src, shdr.sh_name),
            _ => Ok(String::new()),
        }
    }

    /// Resolve the name of the section at `index`, keeping the text recovered
    /// by a failed lookup alongside its error.
    pub fn resolve<R: Read + Seek>(&self, src: &mut ByteSource<R>, index: usize) -> NamedSection {
        let (name, name_error) = match self.name(src, index) {
            Ok(name) => (name, None),
            Err(e) => {
                log::warn!("section {index} has a damaged name: {e}");
                (e.recovered_text().to_owned(), Some(e))
            }
        };
        NamedSection {
            index,
            name,
            name_error,
        }
    }

    /// Index of the first section named exactly `name`.
    ///
    /// Sections whose names cannot be resolved are skipped.
    pub fn find_by_name<R: Read + Seek>(
        &self,
        src: &mut ByteSource<R>,
        name: &str,
    ) -> Option<usize> {
        (1..self.headers.len()).find(|&index| match self.name(src, index) {
            Ok(n) => n == name,
            Err(e) => {
                log::debug!("skipping section {index}: {e}");
                false
            }
        })
    }
}

/// Pick the section-name table: the explicit index when it names a section,
/// else the last section header.
fn select_names_table(count: usize, explicit: usize) -> (Option<usize>, Option<(usize, usize)>) {
    let last = count.checked_sub(1).filter(|&i| i > 0);
    if explicit == 0 {
        // SHN_UNDEF: the file has no section names.
        return (None, None);
    }
    if explicit < count {
        let discrepancy = last.filter(|&l| l != explicit).map(|l| (explicit, l));
        if let Some((i, l)) = discrepancy {
            log::info!("section name table is section {i}, not the last section {l}");
        }
        return (Some(explicit), discrepancy);
    }
    if let Some(l) = last {
        log::warn!("e_shstrndx {explicit} is out of range, using last section {l} for names");
    }
    (last, None)
}
