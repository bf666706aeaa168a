//! Terminal output formatting for the decoded structures.

use std::borrow::Cow;

use elfscope_elf::tables;
use elfscope_elf::{
    Class, ElfError, FileHeader, Ident, NamedSection, NamedSymbol, SymbolSection, SymbolTable,
};

use crate::inspect::{SectionView, SegmentView};

/// Presentation settings shared by the views.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Never truncate section names.
    pub wide: bool,
    /// Column width for section names.
    pub name_width: usize,
    /// Demangle symbol names.
    pub demangle: bool,
}

/// Hex digits needed for an address under `class`.
fn addr_width(class: Class) -> usize {
    class.word_size() * 2
}

/// The identification bytes as space-separated hex pairs.
pub fn magic_string(ident: &Ident) -> String {
    ident
        .raw()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `UND`, `ABS`, `COM` or the decimal section index.
pub fn section_index_name(section: SymbolSection) -> Cow<'static, str> {
    match section {
        SymbolSection::Undefined => "UND".into(),
        SymbolSection::Absolute => "ABS".into(),
        SymbolSection::Common => "COM".into(),
        SymbolSection::Index(n) => n.to_string().into(),
    }
}

/// Cut `name` to `width` characters, marking the cut with `[...]`.
fn fit(name: &str, width: usize, wide: bool) -> Cow<'_, str> {
    if wide || name.chars().count() <= width {
        return name.into();
    }
    if width < 5 {
        return name.chars().take(width).collect::<String>().into();
    }
    let mut out: String = name.chars().take(width - 5).collect();
    out.push_str("[...]");
    out.into()
}

/// Mark a name whose lookup failed: `name[...]` for partial text,
/// `<corrupt>` when nothing was recovered.
fn mark_damaged(name: String, error: Option<&ElfError>) -> String {
    match (error, name.is_empty()) {
        (None, _) => name,
        (Some(_), true) => "<corrupt>".to_owned(),
        (Some(_), false) => format!("{name}[...]"),
    }
}

/// A symbol's display name, demangled on request.
pub fn symbol_name(entry: &NamedSymbol, demangle: bool) -> String {
    let name = if demangle {
        format!("{:#}", rustc_demangle::demangle(&entry.name))
    } else {
        entry.name.clone()
    };
    mark_damaged(name, entry.name_error.as_ref())
}

/// A section's display name.
pub fn section_name(section: &NamedSection) -> String {
    mark_damaged(section.name.clone(), section.name_error.as_ref())
}

/// Print the ELF file header.
pub fn print_file_header(header: &FileHeader) {
    if !header.has_valid_magic() {
        eprintln!("Error: Not an ELF file - it has the wrong magic bytes at the start");
    }
    let ident = &header.ident;

    println!("ELF Header:");
    println!("  Magic:   {}", magic_string(ident));
    field("Class", tables::class_name(ident.class()));
    field("Data", tables::data_name(ident.data()));
    field("Version", tables::version_name(u32::from(ident.version())));
    field("OS/ABI", tables::os_abi_name(ident.os_abi(), header.e_machine));
    field("ABI Version", ident.abi_version());
    field("Type", tables::file_type_name(header.e_type));
    field("Machine", tables::machine_name(header.e_machine));
    field("Version", tables::version_name(header.e_version));
    field("Entry point address", format!("{:#x}", header.e_entry));
    field(
        "Start of program headers",
        format!("{} (bytes into file)", header.e_phoff),
    );
    field(
        "Start of section headers",
        format!("{} (bytes into file)", header.e_shoff),
    );
    field("Flags", format!("{:#x}", header.e_flags));
    field("Size of this header", format!("{} (bytes)", header.e_ehsize));
    field(
        "Size of program headers",
        format!("{} (bytes)", header.e_phentsize),
    );
    field("Number of program headers", header.e_phnum);
    field(
        "Size of section headers",
        format!("{} (bytes)", header.e_shentsize),
    );
    field("Number of section headers", header.e_shnum);
    field("Section header string table index", header.e_shstrndx);
    println!();
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<35}{value}", format!("{label}:"));
}

/// Print the program headers, interpreter paths and section mapping.
pub fn print_program_headers(header: &FileHeader, segments: &[SegmentView]) {
    if segments.is_empty() {
        println!();
        println!("There are no program headers in this file.");
        println!();
        return;
    }
    let w = addr_width(header.class);

    println!();
    println!(
        "Elf file type is {}",
        tables::file_type_name(header.e_type)
    );
    println!("Entry point {:#x}", header.e_entry);
    println!(
        "There are {} program headers, starting at offset {}",
        segments.len(),
        header.e_phoff
    );
    println!();
    println!("Program Headers:");
    println!(
        "  {:<14} {:<w2$} {:<w2$} {:<w2$} {:<w2$} {:<w2$} {:<5} Align",
        "Type",
        "Offset",
        "VirtAddr",
        "PhysAddr",
        "FileSiz",
        "MemSiz",
        "Flags",
        w2 = w + 2
    );
    for seg in segments {
        let ph = &seg.header;
        println!(
            "  {:<14} 0x{:0w$x} 0x{:0w$x} 0x{:0w$x} 0x{:0w$x} 0x{:0w$x} {:<5} {:#x}",
            tables::segment_type_name(ph.p_type),
            ph.p_offset,
            ph.p_vaddr,
            ph.p_paddr,
            ph.p_filesz,
            ph.p_memsz,
            tables::segment_flags_name(ph.p_flags.bits()),
            ph.p_align,
        );
        if let Some(interp) = &seg.interpreter {
            println!("      [Requesting program interpreter: {interp}]");
        }
    }

    println!();
    if segments.iter().any(|seg| seg.sections.is_none()) {
        return;
    }
    println!(" Section to Segment mapping:");
    println!("  Segment Sections...");
    for (i, seg) in segments.iter().enumerate() {
        let names: Vec<String> = seg
            .sections
            .iter()
            .flatten()
            .filter(|s| s.index != 0)
            .map(section_name)
            .collect();
        println!("   {i:02}     {} ", names.join(" "));
    }
    println!();
}

/// Print the section headers.
pub fn print_section_headers(header: &FileHeader, sections: &[SectionView], opts: &Options) {
    if sections.is_empty() {
        println!();
        println!("There are no sections in this file.");
        println!();
        return;
    }
    let w = addr_width(header.class);
    let names: Vec<String> = sections.iter().map(|s| section_name(&s.section)).collect();
    let nw = if opts.wide {
        names
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0)
            .max(opts.name_width)
    } else {
        opts.name_width
    };

    println!(
        "There are {} section headers, starting at offset {:#x}:",
        sections.len(),
        header.e_shoff
    );
    println!();
    println!("Section Headers:");
    println!(
        "  [Nr] {:<nw$} {:<16} {:<w$} {:<8} {:<w$} {:<w$} {:<5} Link  Info  Align",
        "Name", "Type", "Address", "Offset", "Size", "EntSize", "Flags",
    );
    for (s, name) in sections.iter().zip(&names) {
        let sh = &s.header;
        println!(
            "  [{:>2}] {:<nw$} {:<16} {:0w$x} {:08x} {:0w$x} {:0w$x} {:>5} {:>4}  {:>4}  {:>5}",
            s.section.index,
            fit(name, nw, opts.wide),
            tables::section_type_name(sh.sh_type),
            sh.sh_addr,
            sh.sh_offset,
            sh.sh_size,
            sh.sh_entsize,
            tables::section_flags_name(sh.sh_flags.bits()),
            sh.sh_link,
            sh.sh_info,
            sh.sh_addralign,
        );
    }
    println!("Key to Flags:");
    println!("  W (write), A (alloc), X (execute), M (merge), S (strings), I (info),");
    println!("  L (link order), O (extra OS processing required), G (group), T (TLS),");
    println!("  C (compressed), x (unknown), E (exclude)");
    println!();
}

/// Print one symbol table.
pub fn print_symbol_table(header: &FileHeader, table: &SymbolTable, opts: &Options) {
    let w = addr_width(header.class);
    println!();
    println!(
        "Symbol table '{}' contains {} entries:",
        table.section,
        table.len()
    );
    println!(
        "   Num: {:<w$} {:>5} Type    Bind   Vis      Ndx Name",
        "Value", "Size"
    );
    for (i, entry) in table.entries.iter().enumerate() {
        let sym = &entry.symbol;
        println!(
            "{:>6}: {:0w$x} {:>5} {:<7} {:<6} {:<8} {:>3} {}",
            i,
            sym.st_value,
            sym.st_size,
            tables::symbol_type_name(sym.sym_type()),
            tables::symbol_bind_name(sym.sym_bind()),
            tables::symbol_visibility_name(sym.sym_visibility()),
            section_index_name(sym.section_index()),
            symbol_name(entry, opts.demangle),
        );
    }
}
