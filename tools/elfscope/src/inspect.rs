//! Decoding of the structures each view needs.
//!
//! Decoded values are collected into plain view records so the text views
//! and the JSON export read from the same data.

use std::io::{Read, Seek};

use anyhow::{Context, Result};
use elfscope_elf::segment::read_interpreter;
use elfscope_elf::{
    ElfError, ElfFile, NamedSection, ProgramHeader, SectionHeader, SectionTable, SymbolTable,
};

use crate::logging::Timer;

/// A program header with its interpreter path and mapped sections.
#[derive(Debug, Clone)]
pub struct SegmentView {
    pub header: ProgramHeader,
    pub interpreter: Option<String>,
    /// `None` when the section header table could not be decoded.
    pub sections: Option<Vec<NamedSection>>,
}

/// A section header with its resolved name.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub section: NamedSection,
    pub header: SectionHeader,
}

/// Decode the section header table.
pub fn section_table<R: Read + Seek>(elf: &mut ElfFile<R>) -> Result<SectionTable> {
    let _t = Timer::start("section headers");
    let table = elf
        .section_table()
        .context("failed to decode section headers")?;
    if let Some((explicit, last)) = table.names_discrepancy() {
        log::debug!("section names come from section {explicit}; the last section is {last}");
    }
    Ok(table)
}

/// Resolve the name of every section. Damaged names are kept with their error.
pub fn sections<R: Read + Seek>(elf: &mut ElfFile<R>, table: &SectionTable) -> Vec<SectionView> {
    let _t = Timer::start("section names");
    table
        .headers()
        .iter()
        .enumerate()
        .map(|(index, header)| SectionView {
            section: table.resolve(elf.source_mut(), index),
            header: *header,
        })
        .collect()
}

/// Decode the program headers and their interpreter paths, plus the section
/// mapping when a section table is available.
pub fn segments<R: Read + Seek>(
    elf: &mut ElfFile<R>,
    table: Option<&SectionTable>,
) -> Result<Vec<SegmentView>> {
    let _t = Timer::start("program headers");
    let headers = elf
        .program_headers()
        .context("failed to decode program headers")?;
    let mapping: Vec<Option<Vec<NamedSection>>> = match table {
        Some(table) => elf.segment_sections(&headers, table).into_iter().map(Some).collect(),
        None => {
            log::warn!("section to segment mapping is unavailable without section headers");
            vec![None; headers.len()]
        }
    };
    let mut mapping = mapping.into_iter();

    let mut views = Vec::with_capacity(headers.len());
    for (index, header) in headers.into_iter().enumerate() {
        let interpreter = if header.is_interp() {
            let path = read_interpreter(elf.source_mut(), &header)
                .with_context(|| format!("failed to read the interpreter of segment {index}"))?;
            Some(path)
        } else {
            None
        };
        views.push(SegmentView {
            header,
            interpreter,
            sections: mapping.next().flatten(),
        });
    }
    Ok(views)
}

/// Decode every symbol table. Failed tables are kept as errors.
pub fn symbol_tables<R: Read + Seek>(
    elf: &mut ElfFile<R>,
    table: &SectionTable,
) -> Vec<Result<SymbolTable, ElfError>> {
    let _t = Timer::start("symbol tables");
    let tables = elf.symbol_tables(table);
    if tables.is_empty() {
        log::info!("no symbol tables");
    }
    tables
}
