//! ELF32/ELF64 structure decoder for elfscope.
//!
//! Decodes the file header, program headers, section headers and symbol
//! tables of little- and big-endian ELF files read through any
//! [`Read`](std::io::Read) + [`Seek`](std::io::Seek) source. Word class and
//! byte order are taken from the identification block once and applied to
//! every field that follows. Numeric codes are mapped to readable names by
//! the [`tables`] module.
//!
//! # Usage
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use elfscope_elf::ElfFile;
//!
//! fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut elf = ElfFile::new(BufReader::new(File::open(path)?))?;
//!     println!("entry point: {:#x}", elf.header().e_entry);
//!
//!     let sections = elf.section_table()?;
//!     for table in elf.symbol_tables(&sections) {
//!         let table = table?;
//!         for entry in &table.entries {
//!             println!("{} {:#x}", entry.name, entry.symbol.st_value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod file;
pub mod header;
pub mod layout;
pub mod section;
pub mod segment;
pub mod source;
pub mod strtab;
pub mod symbol;
pub mod tables;

#[cfg(test)]
mod testutil;

pub use error::ElfError;
pub use file::ElfFile;
pub use header::{ELF_MAGIC, FileHeader, Ident, PN_XNUM, SHN_XINDEX};
pub use layout::{Class, Endian};
pub use section::{NamedSection, SectionFlags, SectionHeader, SectionTable};
pub use segment::{ProgramHeader, SegmentFlags};
pub use source::ByteSource;
pub use strtab::StringTable;
pub use symbol::{NamedSymbol, Symbol, SymbolSection, SymbolTable};
