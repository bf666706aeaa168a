//! elfscope: display the headers, segments, sections and symbols of an ELF file.
//!
//! Views run in a fixed order (`-h`, `-l`, `-S`, `-s`). A failing view is
//! reported and the remaining views still run; the exit status is non-zero
//! if any of them failed.

mod cli;
mod config;
mod export;
mod inspect;
mod logging;
mod output;

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result, bail};
use clap::Parser;
use elfscope_elf::{ElfFile, SymbolTable};

use crate::logging::Verbosity;
use crate::output::Options;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    let config = config::load(cli.config.as_deref())?;
    let opts = Options {
        wide: cli.wide,
        name_width: config.display.name_width,
        demangle: cli.demangle || config.display.demangle,
    };

    let file = File::open(&cli.file)
        .with_context(|| format!("failed to open {}", cli.file.display()))?;
    let mut elf = ElfFile::new(BufReader::new(file))
        .with_context(|| format!("failed to read the ELF header of {}", cli.file.display()))?;
    let header = *elf.header();
    let exporting = cli.export.is_some();
    let mut failures = 0usize;

    // ---------------------------------------------------------------
    // Decode
    // ---------------------------------------------------------------

    let wants_sections =
        cli.show_program_headers() || cli.show_section_headers() || cli.symbols || exporting;
    let table = if wants_sections {
        ok_or_report(inspect::section_table(&mut elf), &mut failures)
    } else {
        None
    };

    if cli.show_file_header() {
        output::print_file_header(&header);
    }

    // Program headers do not depend on the section table; only their
    // section mapping does.
    let mut segments = Vec::new();
    if cli.show_program_headers() || exporting {
        let decoded = inspect::segments(&mut elf, table.as_ref());
        if let Some(views) = ok_or_report(decoded, &mut failures) {
            if cli.show_program_headers() {
                output::print_program_headers(&header, &views);
            }
            segments = views;
        }
    }

    let mut sections = Vec::new();
    if cli.show_section_headers() || exporting {
        if let Some(table) = &table {
            sections = inspect::sections(&mut elf, table);
            if cli.show_section_headers() {
                output::print_section_headers(&header, &sections, &opts);
            }
        }
    }

    let mut symbols: Vec<SymbolTable> = Vec::new();
    if cli.symbols || exporting {
        if let Some(table) = &table {
            for result in inspect::symbol_tables(&mut elf, table) {
                let result = result.context("failed to decode symbol table");
                if let Some(decoded) = ok_or_report(result, &mut failures) {
                    symbols.push(decoded);
                }
            }
        }
        if cli.symbols {
            for decoded in &symbols {
                output::print_symbol_table(&header, decoded, &opts);
            }
        }
    }

    // ---------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------

    if let Some(path) = &cli.export {
        let document = export::Export::new(&header, &segments, &sections, &symbols);
        let written = document.write(path, config.export.pretty);
        ok_or_report(written, &mut failures);
    }

    if failures > 0 {
        bail!("{failures} view(s) of {} failed", cli.file.display());
    }
    Ok(())
}

/// Log `result`'s error, if any, and count it.
fn ok_or_report<T>(result: Result<T>, failures: &mut usize) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{e:#}");
            *failures += 1;
            None
        }
    }
}
