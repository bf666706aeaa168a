//! One decoding session over one ELF file.
//!
//! [`ElfFile`] owns the byte source and the file header decoded from it. The
//! header is decoded exactly once and handed by reference to every table
//! decoder, so word class and byte order stay fixed for the whole session.

use std::io::{Read, Seek};

use crate::error::ElfError;
use crate::header::{FileHeader, PN_XNUM};
use crate::section::{NamedSection, SectionHeader, SectionTable};
use crate::segment::{self, ProgramHeader};
use crate::source::ByteSource;
use crate::symbol::{self, SymbolTable};

/// An ELF file being inspected.
#[derive(Debug)]
pub struct ElfFile<R> {
    source: ByteSource<R>,
    header: FileHeader,
}

impl<R: Read + Seek> ElfFile<R> {
    /// Wrap a reader and decode its file header.
    ///
    /// # Errors
    ///
    /// Returns an [`ElfError`] if the header cannot be decoded. A wrong magic
    /// number is not an error here; see [`FileHeader::check_magic`].
    pub fn new(reader: R) -> Result<Self, ElfError> {
        let mut source = ByteSource::new(reader)?;
        let header = FileHeader::decode(&mut source)?;
        Ok(Self { source, header })
    }

    /// The decoded file header.
    #[must_use]
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// The underlying byte source, for string lookups.
    pub fn source_mut(&mut self) -> &mut ByteSource<R> {
        &mut self.source
    }

    /// Consume the session, returning the byte source.
    pub fn into_source(self) -> ByteSource<R> {
        self.source
    }

    /// Decode the section header table.
    ///
    /// # Errors
    ///
    /// See [`SectionTable::decode`].
    pub fn section_table(&mut self) -> Result<SectionTable, ElfError> {
        SectionTable::decode(&mut self.source, &self.header)
    }

    /// Number of program headers, resolving `PN_XNUM` through section 0.
    ///
    /// # Errors
    ///
    /// Returns an error if section 0 is needed but cannot be read.
    pub fn program_header_count(&mut self) -> Result<usize, ElfError> {
        if self.header.e_phnum != PN_XNUM || self.header.e_shoff == 0 {
            return Ok(usize::from(self.header.e_phnum));
        }
        let first = SectionHeader::read_at(&mut self.source, &self.header, 0)?;
        log::debug!("extended program header numbering: {}", first.sh_info);
        Ok(first.sh_info as usize)
    }

    /// Decode the program header table.
    ///
    /// # Errors
    ///
    /// See [`segment::decode_program_headers`].
    pub fn program_headers(&mut self) -> Result<Vec<ProgramHeader>, ElfError> {
        let count = self.program_header_count()?;
        segment::decode_program_headers(&mut self.source, &self.header, count)
    }

    /// The interpreter path from the first `PT_INTERP` segment, if any.
    ///
    /// # Errors
    ///
    /// See [`segment::read_interpreter`].
    pub fn interpreter(&mut self, phdrs: &[ProgramHeader]) -> Result<Option<String>, ElfError> {
        phdrs
            .iter()
            .find(|ph| ph.is_interp())
            .map(|ph| segment::read_interpreter(&mut self.source, ph))
            .transpose()
    }

    /// For each segment, the sections it contains.
    ///
    /// A section whose name cannot be resolved is kept with the error
    /// recorded in [`NamedSection::name_error`].
    pub fn segment_sections(
        &mut self,
        phdrs: &[ProgramHeader],
        sections: &SectionTable,
    ) -> Vec<Vec<NamedSection>> {
        let mut mapping = Vec::with_capacity(phdrs.len());
        for ph in phdrs {
            let mut named = Vec::new();
            for index in ph.section_indices(sections.headers()) {
                named.push(sections.resolve(&mut self.source, index));
            }
            mapping.push(named);
        }
        mapping
    }

    /// Resolve the name of section `index`.
    ///
    /// # Errors
    ///
    /// See [`SectionTable::name`].
    pub fn section_name(&mut self, sections: &SectionTable, index: usize) -> Result<String, ElfError> {
        sections.name(&mut self.source, index)
    }

    /// Decode every `.symtab` and `.dynsym` section.
    pub fn symbol_tables(&mut self, sections: &SectionTable) -> Vec<Result<SymbolTable, ElfError>> {
        symbol::decode_symbol_tables(&mut self.source, &self.header, sections)
    }
}
