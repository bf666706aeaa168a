//! Static code-to-name tables.
//!
//! Every table is a sorted `static` slice searched with
//! [`slice::binary_search_by_key`]. Values missing from a table never fail:
//! the lookup functions fall back to a string that carries the raw number.

use std::borrow::Cow;

/// Look up `key` in a table sorted by code.
fn lookup<K: Ord + Copy>(table: &'static [(K, &'static str)], key: K) -> Option<&'static str> {
    table
        .binary_search_by_key(&key, |&(k, _)| k)
        .ok()
        .map(|i| table[i].1)
}

/// `e_machine` names, sorted by code.
static MACHINES: &[(u16, &str)] = &[
    (0, "None"),
    (1, "WE32100"),
    (2, "Sparc"),
    (3, "Intel 80386"),
    (4, "MC68000"),
    (5, "MC88000"),
    (6, "Intel MCU"),
    (7, "Intel 80860"),
    (8, "MIPS R3000"),
    (9, "IBM System/370"),
    (10, "MIPS R4000 big-endian"),
    (11, "Sparc v9 (old)"),
    (15, "HPPA"),
    (17, "Fujitsu VPP500"),
    (18, "Sparc v8+"),
    (19, "Intel 80960"),
    (20, "PowerPC"),
    (21, "PowerPC64"),
    (22, "IBM S/390"),
    (23, "SPU"),
    (36, "Renesas V850 (using RH850 ABI)"),
    (37, "Fujitsu FR20"),
    (38, "TRW RH32"),
    (39, "MCORE"),
    (40, "ARM"),
    (41, "Digital Alpha (old)"),
    (42, "Renesas / SuperH SH"),
    (43, "Sparc v9"),
    (44, "Siemens Tricore"),
    (45, "ARC"),
    (46, "Renesas H8/300"),
    (47, "Renesas H8/300H"),
    (48, "Renesas H8S"),
    (49, "Renesas H8/500"),
    (50, "Intel IA-64"),
    (51, "Stanford MIPS-X"),
    (52, "Motorola Coldfire"),
    (53, "Motorola M68HC12"),
    (54, "Fujitsu MMA Multimedia Accelerator"),
    (55, "Siemens PCP"),
    (56, "Sony nCPU embedded RISC processor"),
    (57, "Denso NDR1 microprocessor"),
    (58, "Motorola Star*Core processor"),
    (59, "Toyota ME16 processor"),
    (60, "STMicroelectronics ST100 processor"),
    (61, "Advanced Logic Corp. Tinyj emb.fam"),
    (62, "AMD x86-64 architecture"),
    (63, "Sony DSP Processor"),
    (64, "Digital Equipment Corp. PDP-10"),
    (65, "Digital Equipment Corp. PDP-11"),
    (66, "Siemens FX66 microcontroller"),
    (67, "STMicroelectronics ST9+ 8/16 mc"),
    (68, "STMicroelectronics ST7 8 bit mc"),
    (69, "Motorola MC68HC16 microcontroller"),
    (70, "Motorola MC68HC11 microcontroller"),
    (71, "Motorola MC68HC08 microcontroller"),
    (72, "Motorola MC68HC05 microcontroller"),
    (73, "Silicon Graphics SVx"),
    (74, "STMicroelectronics ST19 8 bit mc"),
    (75, "Digital VAX"),
    (76, "Axis Communications 32-bit embedded processor"),
    (77, "Infineon Technologies 32-bit embedded processor"),
    (78, "Element 14 64-bit DSP Processor"),
    (79, "LSI Logic 16-bit DSP Processor"),
    (80, "Donald Knuth's educational 64-bit processor"),
    (81, "Harvard University machine-independent object files"),
    (82, "SiTera Prism"),
    (83, "Atmel AVR 8-bit microcontroller"),
    (84, "Fujitsu FR30"),
    (85, "Mitsubishi D10V"),
    (86, "Mitsubishi D30V"),
    (87, "NEC v850"),
    (88, "Mitsubishi M32R"),
    (89, "Matsushita MN10300"),
    (90, "Matsushita MN10200"),
    (91, "picoJava"),
    (92, "OpenRISC 32-bit embedded processor"),
    (93, "ARC International ARCompact processor (old)"),
    (94, "Tensilica Xtensa Architecture"),
    (95, "Alphamosaic VideoCore processor"),
    (96, "Thompson Multimedia General Purpose Processor"),
    (97, "National Semiconductor 32000 series"),
    (98, "Tenor Network TPC processor"),
    (99, "Trebia SNP 1000 processor"),
    (100, "STMicroelectronics (www.st.com) ST200 microcontroller"),
    (101, "Ubicom IP2xxx microcontroller family"),
    (102, "MAX Processor"),
    (103, "National Semiconductor CompactRISC microprocessor"),
    (104, "Fujitsu F2MC16"),
    (105, "Texas Instruments embedded microcontroller msp430"),
    (106, "Analog Devices Blackfin (DSP) processor"),
    (107, "S1C33 Family of Seiko Epson processors"),
    (108, "Sharp embedded microprocessor"),
    (109, "Arca RISC Microprocessor"),
    (110, "Unicore"),
    (111, "eXcess: 16/32/64-bit configurable embedded CPU"),
    (112, "Icera Semiconductor Inc. Deep Execution Processor"),
    (113, "Altera Nios II"),
    (114, "National Semiconductor CRX microprocessor"),
    (115, "Motorola XGATE embedded processor"),
    (117, "Renesas M16C series microprocessors"),
    (118, "Microchip Technology dsPIC30F Digital Signal Controller"),
    (119, "Freescale Communication Engine RISC core"),
    (120, "Renesas M32c"),
    (131, "Altium TSK3000 core"),
    (132, "Freescale RS08 embedded processor"),
    (134, "Cyan Technology eCOG2 microprocessor"),
    (135, "Sunplus S+core"),
    (136, "New Japan Radio (NJR) 24-bit DSP Processor"),
    (137, "Broadcom VideoCore III processor"),
    (138, "Lattice Mico32"),
    (139, "Seiko Epson C17 family"),
    (140, "Texas Instruments TMS320C6000 DSP family"),
    (141, "Texas Instruments TMS320C2000 DSP family"),
    (142, "Texas Instruments TMS320C55x DSP family"),
    (144, "TI PRU I/O processor"),
    (160, "STMicroelectronics 64bit VLIW Data Signal Processor"),
    (161, "Cypress M8C microprocessor"),
    (162, "Renesas R32C series microprocessors"),
    (163, "NXP Semiconductors TriMedia architecture family"),
    (164, "QUALCOMM DSP6 Processor"),
    (165, "Intel 8051 and variants"),
    (166, "STMicroelectronics STxP7x family"),
    (167, "Andes Technology compact code size embedded RISC processor family"),
    (168, "Cyan Technology eCOG1X family"),
    (169, "Dallas Semiconductor MAXQ30 Core microcontrollers"),
    (170, "New Japan Radio (NJR) 16-bit DSP Processor"),
    (171, "M2000 Reconfigurable RISC Microprocessor"),
    (172, "Cray Inc. NV2 vector architecture"),
    (173, "Renesas RX"),
    (174, "Imagination Technologies Meta processor architecture"),
    (175, "MCST Elbrus general purpose hardware architecture"),
    (176, "Cyan Technology eCOG16 family"),
    (178, "Freescale Extended Time Processing Unit"),
    (179, "Infineon Technologies SLE9X core"),
    (180, "Intel L1OM"),
    (181, "Intel K1OM"),
    (182, "Intel (reserved)"),
    (183, "AArch64"),
    (184, "ARM (reserved)"),
    (185, "Atmel Corporation 32-bit microprocessor"),
    (186, "STMicroelectronics STM8 8-bit microcontroller"),
    (187, "Tilera TILE64 multicore architecture family"),
    (188, "Tilera TILEPro multicore architecture family"),
    (190, "NVIDIA CUDA architecture"),
    (191, "Tilera TILE-Gx multicore architecture family"),
    (192, "CloudShield architecture family"),
    (193, "KIPO-KAIST Core-A 1st generation processor family"),
    (194, "KIPO-KAIST Core-A 2nd generation processor family"),
    (195, "ARCv2"),
    (196, "Open8 8-bit RISC soft processor core"),
    (197, "Renesas RL78"),
    (198, "Broadcom VideoCore V processor"),
    (199, "Renesas 78K0R"),
    (200, "Freescale 56800EX Digital Signal Controller (DSC)"),
    (201, "Beyond BA1 CPU architecture"),
    (202, "Beyond BA2 CPU architecture"),
    (203, "XMOS xCORE processor family"),
    (204, "Microchip 8-bit PIC(r) family"),
    (205, "Intel Graphics Technology"),
    (210, "KM211 KM32 32-bit processor"),
    (211, "KM211 KMX32 32-bit processor"),
    (212, "KM211 KMX16 16-bit processor"),
    (213, "KM211 KMX8 8-bit processor"),
    (214, "KM211 KVARC processor"),
    (215, "Paneve CDP architecture family"),
    (216, "Cognitive Smart Memory Processor"),
    (217, "Bluechip Systems CoolEngine"),
    (218, "Nanoradio Optimized RISC"),
    (219, "CSR Kalimba architecture family"),
    (220, "Zilog Z80"),
    (221, "CDS VISIUMcore processor"),
    (222, "FTDI Chip FT32"),
    (223, "Moxie"),
    (224, "AMD GPU"),
    (243, "RISC-V"),
    (244, "Lanai 32-bit processor"),
    (245, "CEVA Processor Architecture Family"),
    (246, "CEVA X2 Processor Family"),
    (247, "Linux BPF"),
    (248, "Graphcore Intelligent Processing Unit"),
    (249, "Imagination Technologies"),
    (250, "Netronome Flow Processor"),
    (251, "NEC Vector Engine"),
    (252, "C-SKY"),
    (253, "Synopsys ARCv2.3 64-bit"),
    (254, "MOS Technology MCS 6502 processor"),
    (255, "Synopsys ARCv2.3 32-bit"),
    (256, "Kalray VLIW core of the MPPA processor family"),
    (257, "WDC 65816/65C816"),
    (258, "LoongArch"),
    (259, "ChipON KungFu32"),
    (4643, "Adapteva EPIPHANY"),
    (9520, "Morpho Technologies MT processor"),
    (16727, "Web Assembly"),
    (19951, "Freescale S12Z"),
    (21569, "Fujitsu FR-V"),
    (23205, "OpenDLX"),
    (36902, "Alpha"),
    (44357, "Sanyo XStormy16 CPU core"),
    (61453, "Toshiba MeP Media Engine"),
    (65210, "Vitesse IQ2000"),
    (65211, "Altera Nios"),
];

/// Generic `EI_OSABI` names, sorted by code.
static OS_ABIS: &[(u8, &str)] = &[
    (0, "UNIX - System V"),
    (1, "UNIX - HP-UX"),
    (2, "UNIX - NetBSD"),
    (3, "UNIX - Linux"),
    (6, "UNIX - Solaris"),
    (7, "UNIX - AIX"),
    (8, "UNIX - IRIX"),
    (9, "UNIX - FreeBSD"),
    (10, "UNIX - Tru64"),
    (11, "Novell - Modesto"),
    (12, "UNIX - OpenBSD"),
    (13, "VMS - OpenVMS"),
    (14, "HP - Non-Stop Kernel"),
    (15, "AROS"),
    (16, "Fenix OS"),
    (17, "Nuxi CloudABI"),
    (18, "Stratus Technologies OpenVOS"),
    (97, "ARM"),
    (255, "Standalone (embedded) application"),
];

/// `p_type` names, sorted by code.
static SEGMENT_TYPES: &[(u32, &str)] = &[
    (0, "NULL"),
    (1, "LOAD"),
    (2, "DYNAMIC"),
    (3, "INTERP"),
    (4, "NOTE"),
    (5, "SHLIB"),
    (6, "PHDR"),
    (7, "TLS"),
    (8, "NUM"),
    (0x6474_e550, "GNU_EH_FRAME"),
    (0x6474_e551, "GNU_STACK"),
    (0x6474_e552, "GNU_RELRO"),
    (0x6474_e553, "GNU_PROPERTY"),
    (0x6474_e554, "GNU_SFRAME"),
];

/// `sh_type` names, sorted by code.
static SECTION_TYPES: &[(u32, &str)] = &[
    (0x0, "NULL"),
    (0x1, "PROGBITS"),
    (0x2, "SYMTAB"),
    (0x3, "STRTAB"),
    (0x4, "RELA"),
    (0x5, "HASH"),
    (0x6, "DYNAMIC"),
    (0x7, "NOTE"),
    (0x8, "NOBITS"),
    (0x9, "REL"),
    (0xa, "SHLIB"),
    (0xb, "DYNSYM"),
    (0xe, "INIT_ARRAY"),
    (0xf, "FINI_ARRAY"),
    (0x10, "PREINIT_ARRAY"),
    (0x11, "GROUP"),
    (0x12, "SYMTAB_SHNDX"),
    (0x13, "RELR"),
    (0x6000_0000, "LOOS"),
    (0x6fff_fff5, "GNU_ATTRIBUTES"),
    (0x6fff_fff6, "GNU_HASH"),
    (0x6fff_fff7, "GNU_LIBLIST"),
    (0x6fff_fffd, "VERDEF"),
    (0x6fff_fffe, "VERNEED"),
    (0x6fff_ffff, "VERSYM"),
];

/// `sh_flags` key letters in display order.
static SECTION_FLAG_LETTERS: &[(u64, char)] = &[
    (0x1, 'W'),
    (0x2, 'A'),
    (0x4, 'X'),
    (0x10, 'M'),
    (0x20, 'S'),
    (0x40, 'I'),
    (0x80, 'L'),
    (0x100, 'O'),
    (0x200, 'G'),
    (0x400, 'T'),
    (0x800, 'C'),
    (0x8000_0000, 'E'),
];

/// `STT_*` names (low nibble of `st_info`), sorted by code.
static SYMBOL_TYPES: &[(u8, &str)] = &[
    (0, "NOTYPE"),
    (1, "OBJECT"),
    (2, "FUNC"),
    (3, "SECTION"),
    (4, "FILE"),
    (5, "COMMON"),
    (6, "TLS"),
    (7, "NUM"),
    (8, "RELC"),
    (9, "SRELC"),
    (10, "LOOS"),
    (12, "HIOS"),
    (13, "LOPROC"),
    (15, "HIPROC"),
];

/// `STB_*` names (high nibble of `st_info`), sorted by code.
static SYMBOL_BINDS: &[(u8, &str)] = &[
    (0, "LOCAL"),
    (1, "GLOBAL"),
    (2, "WEAK"),
    (10, "LOOS"),
    (12, "HIOS"),
    (13, "LOPROC"),
    (15, "HIPROC"),
];

/// `STV_*` names, sorted by code.
static SYMBOL_VISIBILITIES: &[(u8, &str)] = &[
    (0, "DEFAULT"),
    (1, "INTERNAL"),
    (2, "HIDDEN"),
    (3, "PROTECTED"),
    (4, "EXPORTED"),
    (5, "SINGLETON"),
    (6, "ELIMINATE"),
];

/// Name of an `e_machine` value.
#[must_use]
pub fn machine_name(machine: u16) -> Cow<'static, str> {
    lookup(MACHINES, machine).map_or_else(|| format!("<unknown>: {machine}").into(), Cow::from)
}

/// Name of an `EI_CLASS` value.
#[must_use]
pub fn class_name(class: u8) -> Cow<'static, str> {
    match class {
        1 => "32-bit objects".into(),
        2 => "64-bit objects".into(),
        other => format!("Unknown: {other}").into(),
    }
}

/// Name of an `EI_DATA` value.
#[must_use]
pub fn data_name(data: u8) -> Cow<'static, str> {
    match data {
        0 => "none".into(),
        1 => "2's complement, little endian".into(),
        2 => "2's complement, big endian".into(),
        other => format!("Unknown: {other}").into(),
    }
}

/// Name of an `EI_VERSION` / `e_version` value.
#[must_use]
pub fn version_name(version: u32) -> Cow<'static, str> {
    if version == 1 {
        "1 (current)".into()
    } else {
        format!("Unknown: {version}").into()
    }
}

/// Name of an `EI_OSABI` value.
///
/// Codes from 64 upwards are architecture-specific, so `machine` is consulted
/// before the generic table.
#[must_use]
pub fn os_abi_name(os_abi: u8, machine: u16) -> Cow<'static, str> {
    if os_abi >= 64 {
        let specific = match (machine, os_abi) {
            // EM_AMDGPU
            (224, 64) => Some("AMD HSA"),
            (224, 65) => Some("AMD PAL"),
            (224, 66) => Some("AMD Mesa3D"),
            // EM_ARM
            (40, 65) => Some("ARM FDPIC"),
            // EM_MSP430, EM_VISIUM
            (105 | 221, 255) => Some("Standalone App"),
            // EM_TI_C6000
            (140, 64) => Some("Bare-metal C6000"),
            (140, 65) => Some("Linux C6000"),
            _ => None,
        };
        if let Some(name) = specific {
            return name.into();
        }
    }
    lookup(OS_ABIS, os_abi).map_or_else(|| format!("<unknown: {os_abi:x}>").into(), Cow::from)
}

/// Name of an `e_type` value.
#[must_use]
pub fn file_type_name(e_type: u16) -> Cow<'static, str> {
    match e_type {
        0 => "NONE (None)".into(),
        1 => "REL (Relocatable file)".into(),
        2 => "EXEC (Executable file)".into(),
        3 => "DYN (Shared object file)".into(),
        4 => "CORE (Core file)".into(),
        0xfe00..=0xfeff => format!("OS Specific: ({e_type})").into(),
        0xff00..=0xffff => format!("Processor Specific: ({e_type})").into(),
        other => format!("Unknown: ({other})").into(),
    }
}

/// Name of a `p_type` value.
///
/// Unnamed values in the OS and processor ranges are shown relative to the
/// start of their range.
#[must_use]
pub fn segment_type_name(p_type: u32) -> Cow<'static, str> {
    if let Some(name) = lookup(SEGMENT_TYPES, p_type) {
        return name.into();
    }
    reserved_range(p_type).into()
}

/// `R`/`W`/`E` rendering of `p_flags`.
///
/// Bits outside the three permission bits are appended in hex.
#[must_use]
pub fn segment_flags_name(p_flags: u32) -> String {
    let mut s = String::with_capacity(3);
    s.push(if p_flags & 0x4 != 0 { 'R' } else { ' ' });
    s.push(if p_flags & 0x2 != 0 { 'W' } else { ' ' });
    s.push(if p_flags & 0x1 != 0 { 'E' } else { ' ' });
    let extra = p_flags & !0x7;
    if extra != 0 {
        s.push_str(&format!(" {extra:#x}"));
    }
    s
}

/// Name of an `sh_type` value.
#[must_use]
pub fn section_type_name(sh_type: u32) -> Cow<'static, str> {
    if let Some(name) = lookup(SECTION_TYPES, sh_type) {
        return name.into();
    }
    reserved_range(sh_type).into()
}

/// Key-letter rendering of `sh_flags` (`WAX`, `AMS`, ...).
///
/// Unknown bits are shown as a single `x`.
#[must_use]
pub fn section_flags_name(sh_flags: u64) -> String {
    let mut s = String::new();
    let mut known = 0u64;
    for &(bit, letter) in SECTION_FLAG_LETTERS {
        known |= bit;
        if sh_flags & bit != 0 {
            s.push(letter);
        }
    }
    if sh_flags & !known != 0 {
        s.push('x');
    }
    s
}

/// Name of a symbol type (`st_info & 0xf`).
#[must_use]
pub fn symbol_type_name(sym_type: u8) -> Cow<'static, str> {
    lookup(SYMBOL_TYPES, sym_type).map_or_else(|| format!("<unknown>: {sym_type}").into(), Cow::from)
}

/// Name of a symbol binding (`st_info >> 4`).
#[must_use]
pub fn symbol_bind_name(bind: u8) -> Cow<'static, str> {
    lookup(SYMBOL_BINDS, bind).map_or_else(|| format!("<unknown>: {bind}").into(), Cow::from)
}

/// Name of a symbol visibility (`st_other & 0x7`).
#[must_use]
pub fn symbol_visibility_name(visibility: u8) -> Cow<'static, str> {
    lookup(SYMBOL_VISIBILITIES, visibility)
        .map_or_else(|| format!("<unknown>: {visibility}").into(), Cow::from)
}

/// Shared fallback for `p_type`/`sh_type` values missing from their tables.
fn reserved_range(value: u32) -> String {
    match value {
        0x6000_0000..=0x6fff_ffff => format!("LOOS+0x{:x}", value - 0x6000_0000),
        0x7000_0000..=0x7fff_ffff => format!("LOPROC+0x{:x}", value - 0x7000_0000),
        0x8000_0000..=0xffff_ffff => format!("LOUSER+0x{:x}", value - 0x8000_0000),
        other => format!("<unknown>: 0x{other:x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted<K: Ord + Copy + core::fmt::Debug>(table: &[(K, &str)]) {
        for pair in table.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} before {:?}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn tables_are_sorted_for_binary_search() {
        assert_sorted(MACHINES);
        assert_sorted(OS_ABIS);
        assert_sorted(SEGMENT_TYPES);
        assert_sorted(SECTION_TYPES);
        assert_sorted(SYMBOL_TYPES);
        assert_sorted(SYMBOL_BINDS);
        assert_sorted(SYMBOL_VISIBILITIES);
    }

    #[test]
    fn machine_names() {
        assert_eq!(machine_name(62), "AMD x86-64 architecture");
        assert_eq!(machine_name(183), "AArch64");
        assert_eq!(machine_name(243), "RISC-V");
        assert_eq!(machine_name(65211), "Altera Nios");
        assert_eq!(machine_name(1000), "<unknown>: 1000");
    }

    #[test]
    fn os_abi_prefers_machine_specific_codes() {
        assert_eq!(os_abi_name(3, 62), "UNIX - Linux");
        assert_eq!(os_abi_name(64, 224), "AMD HSA");
        assert_eq!(os_abi_name(65, 40), "ARM FDPIC");
        assert_eq!(os_abi_name(97, 40), "ARM");
        assert_eq!(os_abi_name(255, 221), "Standalone App");
        assert_eq!(os_abi_name(255, 62), "Standalone (embedded) application");
        assert_eq!(os_abi_name(64, 62), "<unknown: 40>");
    }

    #[test]
    fn file_types() {
        assert_eq!(file_type_name(2), "EXEC (Executable file)");
        assert_eq!(file_type_name(3), "DYN (Shared object file)");
        assert_eq!(file_type_name(0xfe01), "OS Specific: (65025)");
        assert_eq!(file_type_name(0xff00), "Processor Specific: (65280)");
        assert_eq!(file_type_name(9), "Unknown: (9)");
    }

    #[test]
    fn ident_names() {
        assert_eq!(class_name(2), "64-bit objects");
        assert_eq!(class_name(7), "Unknown: 7");
        assert_eq!(data_name(2), "2's complement, big endian");
        assert_eq!(version_name(1), "1 (current)");
        assert_eq!(version_name(2), "Unknown: 2");
    }

    #[test]
    fn segment_types_and_ranges() {
        assert_eq!(segment_type_name(1), "LOAD");
        assert_eq!(segment_type_name(0x6474_e551), "GNU_STACK");
        assert_eq!(segment_type_name(0x6000_0010), "LOOS+0x10");
        assert_eq!(segment_type_name(0x7000_0001), "LOPROC+0x1");
        assert_eq!(segment_type_name(0x100), "<unknown>: 0x100");
    }

    #[test]
    fn segment_flags() {
        assert_eq!(segment_flags_name(0x5), "R E");
        assert_eq!(segment_flags_name(0x6), "RW ");
        assert_eq!(segment_flags_name(0x7), "RWE");
        assert_eq!(segment_flags_name(0x0), "   ");
        assert_eq!(segment_flags_name(0x10_0004), "R   0x100000");
    }

    #[test]
    fn section_types_and_ranges() {
        assert_eq!(section_type_name(2), "SYMTAB");
        assert_eq!(section_type_name(0x6fff_fff6), "GNU_HASH");
        assert_eq!(section_type_name(0x6000_0001), "LOOS+0x1");
        assert_eq!(section_type_name(0x7000_0003), "LOPROC+0x3");
        assert_eq!(section_type_name(0x8000_0002), "LOUSER+0x2");
        assert_eq!(section_type_name(0x20), "<unknown>: 0x20");
    }

    #[test]
    fn section_flags() {
        assert_eq!(section_flags_name(0x6), "AX");
        assert_eq!(section_flags_name(0x32), "AMS");
        assert_eq!(section_flags_name(0x3), "WA");
        assert_eq!(section_flags_name(0x8000_0000), "E");
        assert_eq!(section_flags_name(0x1000), "x");
        assert_eq!(section_flags_name(0), "");
    }

    #[test]
    fn symbol_names_fall_back_to_raw_value() {
        assert_eq!(symbol_type_name(2), "FUNC");
        assert_eq!(symbol_type_name(11), "<unknown>: 11");
        assert_eq!(symbol_bind_name(1), "GLOBAL");
        assert_eq!(symbol_bind_name(3), "<unknown>: 3");
        assert_eq!(symbol_visibility_name(2), "HIDDEN");
        assert_eq!(symbol_visibility_name(7), "<unknown>: 7");
    }
}
