//! Command-line interface definitions for elfscope.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Display information about the contents of ELF files.
#[derive(Parser)]
#[command(name = "elfscope", version, about, disable_help_flag = true)]
#[command(arg(
    clap::Arg::new("help")
        .long("help")
        .action(clap::ArgAction::Help)
        .help("Print help")
))]
#[command(group(
    ArgGroup::new("view")
        .required(true)
        .multiple(true)
        .args(["file_header", "program_headers", "section_headers", "headers", "symbols", "export"])
))]
pub struct Cli {
    /// ELF file to inspect.
    pub file: PathBuf,

    /// Display the ELF file header.
    #[arg(short = 'h', long)]
    pub file_header: bool,

    /// Display the program headers and the section to segment mapping.
    #[arg(short = 'l', long, visible_alias = "segments")]
    pub program_headers: bool,

    /// Display the section headers.
    #[arg(short = 'S', long, visible_alias = "sections")]
    pub section_headers: bool,

    /// Equivalent to -h -l -S.
    #[arg(short = 'e', long)]
    pub headers: bool,

    /// Display the symbol tables.
    #[arg(short = 's', long, visible_alias = "syms")]
    pub symbols: bool,

    /// Demangle Rust symbol names.
    #[arg(short = 'C', long)]
    pub demangle: bool,

    /// Do not truncate section names to fit the column.
    #[arg(short = 'W', long)]
    pub wide: bool,

    /// Write every decoded structure to a JSON file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Read display and export settings from a TOML file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only report errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log decoder diagnostics and phase timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Whether the file header view was requested.
    pub fn show_file_header(&self) -> bool {
        self.file_header || self.headers
    }

    /// Whether the program header view was requested.
    pub fn show_program_headers(&self) -> bool {
        self.program_headers || self.headers
    }

    /// Whether the section header view was requested.
    pub fn show_section_headers(&self) -> bool {
        self.section_headers || self.headers
    }
}
