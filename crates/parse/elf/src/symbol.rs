//! Symbol table decoding.
//!
//! Symbol-bearing sections are found by name (`.symtab`, `.dynsym`) and each
//! symbol name is resolved against the conventionally paired string table
//! (`.strtab`, `.dynstr`). Every table is decoded independently so a corrupt
//! `.symtab` never hides a good `.dynsym`.

use std::io::{Read, Seek};

use crate::error::ElfError;
use crate::header::FileHeader;
use crate::layout::{Class, Endian, Fields};
use crate::section::{SectionHeader, SectionTable};
use crate::source::ByteSource;
use crate::strtab::StringTable;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Symbol binding: local to the object.
pub const STB_LOCAL: u8 = 0;

/// Symbol binding: global.
pub const STB_GLOBAL: u8 = 1;

/// Symbol binding: weak.
pub const STB_WEAK: u8 = 2;

/// Symbol type: unspecified.
pub const STT_NOTYPE: u8 = 0;

/// Symbol type: data object.
pub const STT_OBJECT: u8 = 1;

/// Symbol type: function.
pub const STT_FUNC: u8 = 2;

/// Symbol type: section.
pub const STT_SECTION: u8 = 3;

/// Symbol type: source file name.
pub const STT_FILE: u8 = 4;

/// Symbol visibility: as specified by binding.
pub const STV_DEFAULT: u8 = 0;

/// Symbol visibility: not visible outside the component.
pub const STV_HIDDEN: u8 = 2;

/// Special section index: undefined.
pub const SHN_UNDEF: u16 = 0;

/// Special section index: absolute value.
pub const SHN_ABS: u16 = 0xfff1;

/// Special section index: common block.
pub const SHN_COMMON: u16 = 0xfff2;

/// Symbol table sections and the string table each one pairs with.
const SYMBOL_SECTIONS: &[(&str, &str)] = &[(".symtab", ".strtab"), (".dynsym", ".dynstr")];

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// Where a symbol is defined, decoded from `st_shndx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolSection {
    /// `SHN_UNDEF`: defined elsewhere.
    Undefined,
    /// `SHN_ABS`: the value is absolute.
    Absolute,
    /// `SHN_COMMON`: an unallocated common block.
    Common,
    /// An ordinary (or other reserved) section index.
    Index(u16),
}

impl From<u16> for SymbolSection {
    fn from(shndx: u16) -> Self {
        match shndx {
            SHN_UNDEF => Self::Undefined,
            SHN_ABS => Self::Absolute,
            SHN_COMMON => Self::Common,
            n => Self::Index(n),
        }
    }
}

impl SymbolSection {
    /// The raw `st_shndx` value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        match self {
            Self::Undefined => SHN_UNDEF,
            Self::Absolute => SHN_ABS,
            Self::Common => SHN_COMMON,
            Self::Index(n) => n,
        }
    }
}

/// One decoded symbol table entry.
///
/// `st_info` and `st_other` are kept packed; the type, binding and
/// visibility are accessors over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Offset of the name in the paired string table.
    pub st_name: u32,
    /// Symbol value (an address for defined symbols).
    pub st_value: u64,
    /// Size in bytes.
    pub st_size: u64,
    /// Type (low nibble) and binding (high nibble).
    pub st_info: u8,
    /// Visibility (low three bits).
    pub st_other: u8,
    /// Section index the symbol is defined in.
    pub st_shndx: u16,
}

impl Symbol {
    /// Decode one record; ELF64 moves `value` and `size` after `shndx`.
    pub(crate) fn parse(record: &[u8], class: Class, endian: Endian) -> Self {
        let mut f = Fields::new(record, class, endian);
        match class {
            Class::Elf32 => Self {
                st_name: f.u32(),
                st_value: f.word(),
                st_size: f.word(),
                st_info: f.u8(),
                st_other: f.u8(),
                st_shndx: f.u16(),
            },
            Class::Elf64 => {
                let st_name = f.u32();
                let st_info = f.u8();
                let st_other = f.u8();
                let st_shndx = f.u16();
                Self {
                    st_name,
                    st_value: f.word(),
                    st_size: f.word(),
                    st_info,
                    st_other,
                    st_shndx,
                }
            }
        }
    }

    /// Pack a binding and a type into an `st_info` byte.
    #[must_use]
    pub const fn info(bind: u8, sym_type: u8) -> u8 {
        (bind << 4) | (sym_type & 0xf)
    }

    /// Symbol type (lower 4 bits of `st_info`).
    #[must_use]
    pub const fn sym_type(&self) -> u8 {
        self.st_info & 0xf
    }

    /// Symbol binding (upper 4 bits of `st_info`).
    #[must_use]
    pub const fn sym_bind(&self) -> u8 {
        self.st_info >> 4
    }

    /// Symbol visibility (lower 3 bits of `st_other`).
    #[must_use]
    pub const fn sym_visibility(&self) -> u8 {
        self.st_other & 0x7
    }

    /// The defining section, with the reserved indices decoded.
    #[must_use]
    pub fn section_index(&self) -> SymbolSection {
        SymbolSection::from(self.st_shndx)
    }
}

// ---------------------------------------------------------------------------
// Symbol tables
// ---------------------------------------------------------------------------

/// A symbol with its resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSymbol {
    /// The decoded record.
    pub symbol: Symbol,
    /// The resolved name. Partial if the lookup hit the end of its table.
    pub name: String,
    /// Why the name could not be resolved in full, if it couldn't.
    pub name_error: Option<ElfError>,
}

/// The decoded contents of one symbol table section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    /// Name of the symbol table section (`.symtab` or `.dynsym`).
    pub section: String,
    /// Section index of the symbol table.
    pub section_index: usize,
    /// Name of the string table the names were resolved against.
    pub string_table: &'static str,
    /// Entries in table order.
    pub entries: Vec<NamedSymbol>,
}

impl SymbolTable {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The string table conventionally paired with a symbol table section.
#[must_use]
pub fn paired_string_table(section: &str) -> Option<&'static str> {
    SYMBOL_SECTIONS
        .iter()
        .find(|(sym, _)| *sym == section)
        .map(|(_, strtab)| *strtab)
}

/// Decode every `.symtab` and `.dynsym` section, in section-index order.
///
/// Each table is its own `Result`; an error in one does not stop the rest.
pub fn decode_symbol_tables<R: Read + Seek>(
    src: &mut ByteSource<R>,
    header: &FileHeader,
    sections: &SectionTable,
) -> Vec<Result<SymbolTable, ElfError>> {
    let mut tables = Vec::new();
    for index in 1..sections.len() {
        let name = match sections.name(src, index) {
            Ok(name) => name,
            Err(e) => {
                log::debug!("section {index} has no readable name: {e}");
                continue;
            }
        };
        let (Some(strtab), Some(shdr)) = (paired_string_table(&name), sections.get(index)) else {
            continue;
        };
        let table = decode_symbol_table(src, header, sections, shdr, index, name, strtab);
        if let Err(e) = &table {
            log::debug!("symbol table in section {index}: {e}");
        }
        tables.push(table);
    }
    tables
}

fn decode_symbol_table<R: Read + Seek>(
    src: &mut ByteSource<R>,
    header: &FileHeader,
    sections: &SectionTable,
    shdr: &SectionHeader,
    index: usize,
    section: String,
    string_table: &'static str,
) -> Result<SymbolTable, ElfError> {
    let record = header.class.sym_size() as u64;
    if shdr.sh_entsize < record {
        return Err(ElfError::InvalidEntrySize {
            table: section,
            entry_size: shdr.sh_entsize,
            minimum: record,
        });
    }
    if shdr.sh_size % shdr.sh_entsize != 0 {
        return Err(ElfError::NonIntegralEntryCount {
            section,
            size: shdr.sh_size,
            entry_size: shdr.sh_entsize,
        });
    }
    let count = shdr.sh_size / shdr.sh_entsize;

    let Some(strtab) = sections
        .find_by_name(src, string_table)
        .and_then(|i| sections.get(i))
        .map(StringTable::from_section)
    else {
        return Err(ElfError::MissingStringTable {
            section,
            expected: string_table,
        });
    };

    let mut entries = Vec::new();
    for i in 0..count {
        let offset = shdr.sh_offset.saturating_add(i * shdr.sh_entsize);
        let buf = src.read_vec_at(offset, record)?;
        let symbol = Symbol::parse(&buf, header.class, header.endian);
        let (name, name_error) = match strtab.get(src, symbol.st_name) {
            Ok(name) => (name, None),
            Err(e) => {
                log::debug!("{section}[{i}]: {e}");
                (e.recovered_text().to_owned(), Some(e))
            }
        };
        entries.push(NamedSymbol {
            symbol,
            name,
            name_error,
        });
    }
    log::debug!("{section}: {} symbols", entries.len());

    Ok(SymbolTable {
        section,
        section_index: index,
        string_table,
        entries,
    })
}
