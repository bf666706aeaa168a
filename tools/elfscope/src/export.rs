//! JSON export of the decoded structures.
//!
//! Enumerated fields are written as `[raw, "name"]` pairs so a reader gets
//! both the numeric value and its canonical name. The document deserializes
//! back into [`Export`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use elfscope_elf::{FileHeader, SymbolTable, tables};
use serde::{Deserialize, Serialize};

use crate::inspect::{SectionView, SegmentView};
use crate::output::{magic_string, section_index_name, section_name, symbol_name};

/// A raw value with its canonical name.
pub type Pair<T> = (T, String);

/// The whole export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    #[serde(rename = "ELF Header")]
    pub header: HeaderExport,
    #[serde(rename = "Program Header")]
    pub program_headers: Vec<SegmentExport>,
    #[serde(rename = "Section Header")]
    pub section_headers: Vec<SectionExport>,
    /// One single-key object per symbol table, keyed by section name.
    #[serde(rename = "Symbol Table")]
    pub symbol_tables: Vec<BTreeMap<String, Vec<SymbolExport>>>,
}

/// The file header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExport {
    #[serde(rename = "Magic")]
    pub magic: ([u8; 16], String),
    #[serde(rename = "Class")]
    pub class: Pair<u8>,
    #[serde(rename = "Data")]
    pub data: Pair<u8>,
    #[serde(rename = "Version")]
    pub version: Pair<u32>,
    #[serde(rename = "OS/ABI")]
    pub os_abi: Pair<u8>,
    #[serde(rename = "ABI Version")]
    pub abi_version: Pair<u8>,
    #[serde(rename = "Type")]
    pub file_type: Pair<u16>,
    #[serde(rename = "Machine")]
    pub machine: Pair<u16>,
    #[serde(rename = "Entry point address")]
    pub entry: Pair<u64>,
    #[serde(rename = "Start of program headers")]
    pub phoff: Pair<u64>,
    #[serde(rename = "Start of section headers")]
    pub shoff: Pair<u64>,
    #[serde(rename = "Flags")]
    pub flags: Pair<u32>,
    #[serde(rename = "Size of this header")]
    pub ehsize: Pair<u16>,
    #[serde(rename = "Size of program headers")]
    pub phentsize: Pair<u16>,
    #[serde(rename = "Number of program headers")]
    pub phnum: Pair<u16>,
    #[serde(rename = "Size of section headers")]
    pub shentsize: Pair<u16>,
    #[serde(rename = "Number of section headers")]
    pub shnum: Pair<u16>,
    #[serde(rename = "Section header string table index")]
    pub shstrndx: Pair<u16>,
}

/// One program header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SegmentExport {
    #[serde(rename = "Type")]
    pub kind: Pair<u32>,
    pub offset: u64,
    pub virt_addr: u64,
    pub phys_addr: u64,
    pub file_siz: u64,
    pub mem_siz: u64,
    pub flags: Pair<u32>,
    pub align: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
    /// Names of the sections inside the segment. Empty when the section
    /// headers could not be decoded.
    pub sections: Vec<String>,
}

/// One section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionExport {
    pub nr: usize,
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: Pair<u32>,
    pub address: u64,
    pub offset: u64,
    pub size: u64,
    pub ent_size: u64,
    pub flags: Pair<u64>,
    pub link: u32,
    pub info: u32,
    pub align: u64,
}

/// One symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymbolExport {
    pub num: usize,
    pub value: u64,
    pub size: u64,
    #[serde(rename = "Type")]
    pub kind: Pair<u8>,
    pub bind: Pair<u8>,
    pub vis: Pair<u8>,
    pub ndx: Pair<u16>,
    pub name: String,
}

fn pair<T: Copy>(raw: T, name: impl Into<String>) -> Pair<T> {
    (raw, name.into())
}

impl Export {
    /// Assemble the document from decoded views.
    pub fn new(
        header: &FileHeader,
        segments: &[SegmentView],
        sections: &[SectionView],
        symbols: &[SymbolTable],
    ) -> Self {
        Self {
            header: HeaderExport::new(header),
            program_headers: segments.iter().map(SegmentExport::new).collect(),
            section_headers: sections.iter().map(SectionExport::new).collect(),
            symbol_tables: symbols
                .iter()
                .map(|table| {
                    let entries = table
                        .entries
                        .iter()
                        .enumerate()
                        .map(|(num, entry)| {
                            let sym = &entry.symbol;
                            SymbolExport {
                                num,
                                value: sym.st_value,
                                size: sym.st_size,
                                kind: pair(sym.sym_type(), tables::symbol_type_name(sym.sym_type())),
                                bind: pair(sym.sym_bind(), tables::symbol_bind_name(sym.sym_bind())),
                                vis: pair(
                                    sym.sym_visibility(),
                                    tables::symbol_visibility_name(sym.sym_visibility()),
                                ),
                                ndx: pair(sym.st_shndx, section_index_name(sym.section_index())),
                                name: symbol_name(entry, false),
                            }
                        })
                        .collect();
                    BTreeMap::from([(table.section.clone(), entries)])
                })
                .collect(),
        }
    }

    /// Write the document to `path`.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        if pretty {
            serde_json::to_writer_pretty(&mut out, self)?;
        } else {
            serde_json::to_writer(&mut out, self)?;
        }
        writeln!(out)?;
        out.flush()
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("exported to {}", path.display());
        Ok(())
    }
}

impl HeaderExport {
    fn new(h: &FileHeader) -> Self {
        let ident = &h.ident;
        Self {
            magic: (*ident.raw(), magic_string(ident)),
            class: pair(ident.class(), tables::class_name(ident.class())),
            data: pair(ident.data(), tables::data_name(ident.data())),
            version: pair(h.e_version, tables::version_name(h.e_version)),
            os_abi: pair(ident.os_abi(), tables::os_abi_name(ident.os_abi(), h.e_machine)),
            abi_version: pair(ident.abi_version(), ident.abi_version().to_string()),
            file_type: pair(h.e_type, tables::file_type_name(h.e_type)),
            machine: pair(h.e_machine, tables::machine_name(h.e_machine)),
            entry: pair(h.e_entry, format!("{:#x}", h.e_entry)),
            phoff: pair(h.e_phoff, format!("{} (bytes into file)", h.e_phoff)),
            shoff: pair(h.e_shoff, format!("{} (bytes into file)", h.e_shoff)),
            flags: pair(h.e_flags, format!("{:#x}", h.e_flags)),
            ehsize: pair(h.e_ehsize, format!("{} (bytes)", h.e_ehsize)),
            phentsize: pair(h.e_phentsize, format!("{} (bytes)", h.e_phentsize)),
            phnum: pair(h.e_phnum, h.e_phnum.to_string()),
            shentsize: pair(h.e_shentsize, format!("{} (bytes)", h.e_shentsize)),
            shnum: pair(h.e_shnum, h.e_shnum.to_string()),
            shstrndx: pair(h.e_shstrndx, h.e_shstrndx.to_string()),
        }
    }
}

impl SegmentExport {
    fn new(seg: &SegmentView) -> Self {
        let ph = &seg.header;
        Self {
            kind: pair(ph.p_type, tables::segment_type_name(ph.p_type)),
            offset: ph.p_offset,
            virt_addr: ph.p_vaddr,
            phys_addr: ph.p_paddr,
            file_siz: ph.p_filesz,
            mem_siz: ph.p_memsz,
            flags: pair(ph.p_flags.bits(), tables::segment_flags_name(ph.p_flags.bits())),
            align: ph.p_align,
            interpreter: seg.interpreter.clone(),
            sections: seg
                .sections
                .iter()
                .flatten()
                .filter(|s| s.index != 0)
                .map(section_name)
                .collect(),
        }
    }
}

impl SectionExport {
    fn new(s: &SectionView) -> Self {
        let sh = &s.header;
        Self {
            nr: s.section.index,
            name: section_name(&s.section),
            kind: pair(sh.sh_type, tables::section_type_name(sh.sh_type)),
            address: sh.sh_addr,
            offset: sh.sh_offset,
            size: sh.sh_size,
            ent_size: sh.sh_entsize,
            flags: pair(sh.sh_flags.bits(), tables::section_flags_name(sh.sh_flags.bits())),
            link: sh.sh_link,
            info: sh.sh_info,
            align: sh.sh_addralign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elfscope_elf::symbol::{STB_GLOBAL, STT_FUNC};
    use elfscope_elf::{
        Class, ElfError, Endian, Ident, NamedSection, NamedSymbol, ProgramHeader, SectionFlags,
        SectionHeader, SegmentFlags, Symbol,
    };

    fn named_section(index: usize, name: &str) -> NamedSection {
        NamedSection {
            index,
            name: name.to_owned(),
            name_error: None,
        }
    }

    fn header() -> FileHeader {
        let mut raw = [0u8; 16];
        raw[..4].copy_from_slice(b"\x7fELF");
        raw[4] = 2;
        raw[5] = 1;
        raw[6] = 1;
        FileHeader {
            ident: Ident::from_bytes(raw),
            class: Class::Elf64,
            endian: Endian::Little,
            e_type: 2,
            e_machine: 62,
            e_version: 1,
            e_entry: 0x40_1000,
            e_phoff: 64,
            e_shoff: 4096,
            e_flags: 0,
            e_ehsize: 64,
            e_phentsize: 56,
            e_phnum: 1,
            e_shentsize: 64,
            e_shnum: 2,
            e_shstrndx: 1,
        }
    }

    fn text_header() -> SectionHeader {
        SectionHeader {
            sh_name: 1,
            sh_type: 1,
            sh_flags: SectionFlags::ALLOC | SectionFlags::EXECINSTR,
            sh_addr: 0x40_1000,
            sh_offset: 0x1000,
            sh_size: 0x20,
            sh_link: 0,
            sh_info: 0,
            sh_addralign: 16,
            sh_entsize: 0,
        }
    }

    fn sample() -> Export {
        let segment = SegmentView {
            header: ProgramHeader {
                p_type: 3,
                p_flags: SegmentFlags::R,
                p_offset: 0x318,
                p_vaddr: 0x318,
                p_paddr: 0x318,
                p_filesz: 28,
                p_memsz: 28,
                p_align: 1,
            },
            interpreter: Some("/lib64/ld-linux-x86-64.so.2".into()),
            sections: Some(vec![named_section(1, ".interp")]),
        };
        let section = SectionView {
            section: named_section(1, ".text"),
            header: text_header(),
        };
        let symbols = SymbolTable {
            section: ".dynsym".into(),
            section_index: 2,
            string_table: ".dynstr",
            entries: vec![NamedSymbol {
                symbol: Symbol {
                    st_name: 1,
                    st_value: 0x40_1000,
                    st_size: 16,
                    st_info: Symbol::info(STB_GLOBAL, STT_FUNC),
                    st_other: 0,
                    st_shndx: 1,
                },
                name: "foo".into(),
                name_error: None,
            }],
        };
        Export::new(&header(), &[segment], &[section], &[symbols])
    }

    #[test]
    fn json_round_trip() {
        let export = sample();
        let json = serde_json::to_string_pretty(&export).unwrap();
        let back: Export = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn keys_and_pairs() {
        let value = serde_json::to_value(sample()).unwrap();

        let header = &value["ELF Header"];
        assert_eq!(header["Machine"][0], 62);
        assert_eq!(header["Machine"][1], "AMD x86-64 architecture");
        assert_eq!(header["Class"][1], "64-bit objects");
        assert_eq!(header["Magic"][0][0], 0x7f);
        assert_eq!(header["Entry point address"][1], "0x401000");

        let segment = &value["Program Header"][0];
        assert_eq!(segment["Type"][1], "INTERP");
        assert_eq!(segment["Flags"][1], "R  ");
        assert_eq!(segment["VirtAddr"], 0x318);
        assert_eq!(segment["Interpreter"], "/lib64/ld-linux-x86-64.so.2");
        assert_eq!(segment["Sections"][0], ".interp");

        let section = &value["Section Header"][0];
        assert_eq!(section["Nr"], 1);
        assert_eq!(section["Name"], ".text");
        assert_eq!(section["Flags"][1], "AX");
        assert_eq!(section["EntSize"], 0);

        let symbol = &value["Symbol Table"][0][".dynsym"][0];
        assert_eq!(symbol["Name"], "foo");
        assert_eq!(symbol["Type"][1], "FUNC");
        assert_eq!(symbol["Bind"][1], "GLOBAL");
        assert_eq!(symbol["Vis"][1], "DEFAULT");
        assert_eq!(symbol["Ndx"], serde_json::json!([1, "1"]));
    }

    #[test]
    fn damaged_names_carry_markers() {
        let section = SectionView {
            section: NamedSection {
                index: 1,
                name: String::new(),
                name_error: Some(ElfError::InvalidStringOffset {
                    offset: 1000,
                    size: 41,
                }),
            },
            header: text_header(),
        };
        let table = SymbolTable {
            section: ".symtab".into(),
            section_index: 3,
            string_table: ".strtab",
            entries: vec![NamedSymbol {
                symbol: Symbol {
                    st_name: 1,
                    st_value: 0,
                    st_size: 0,
                    st_info: 0,
                    st_other: 0,
                    st_shndx: 0,
                },
                name: "fo".into(),
                name_error: Some(ElfError::TruncatedString {
                    offset: 1,
                    partial: "fo".into(),
                }),
            }],
        };
        let segment = SegmentView {
            header: ProgramHeader {
                p_type: 1,
                p_flags: SegmentFlags::R | SegmentFlags::X,
                p_offset: 0,
                p_vaddr: 0x40_0000,
                p_paddr: 0x40_0000,
                p_filesz: 0x2000,
                p_memsz: 0x2000,
                p_align: 0x1000,
            },
            interpreter: None,
            sections: Some(vec![section.section.clone(), named_section(2, ".data")]),
        };

        let export = Export::new(&header(), &[segment], &[section], &[table]);
        assert_eq!(export.section_headers[0].name, "<corrupt>");
        assert_eq!(export.program_headers[0].sections, ["<corrupt>", ".data"]);
        assert_eq!(export.symbol_tables[0][".symtab"][0].name, "fo[...]");
    }

    #[test]
    fn missing_mapping_exports_no_sections() {
        let mut segment_export = sample().program_headers[0].clone();
        segment_export.sections.clear();
        let segment = SegmentView {
            header: ProgramHeader {
                p_type: 3,
                p_flags: SegmentFlags::R,
                p_offset: 0x318,
                p_vaddr: 0x318,
                p_paddr: 0x318,
                p_filesz: 28,
                p_memsz: 28,
                p_align: 1,
            },
            interpreter: Some("/lib64/ld-linux-x86-64.so.2".into()),
            sections: None,
        };
        let export = Export::new(&header(), &[segment], &[], &[]);
        assert_eq!(export.program_headers, [segment_export]);
    }

    #[test]
    fn interpreter_is_omitted_when_absent() {
        let mut export = sample();
        export.program_headers[0].interpreter = None;
        let json = serde_json::to_string(&export).unwrap();
        assert!(!json.contains("Interpreter"));
        let back: Export = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn write_to_file() {
        let path = std::env::temp_dir().join(format!("elfscope-export-{}.json", std::process::id()));
        let export = sample();
        export.write(&path, false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(serde_json::from_str::<Export>(&text).unwrap(), export);
    }
}
