//! In-memory ELF image builder for unit tests.
//!
//! Layout of a built image:
//!
//! ```text
//! [file header][data blobs][.shstrtab bytes][program headers][section headers]
//! ```
//!
//! Section 0 is always the null section. `.shstrtab` follows the regular
//! sections and precedes any trailing sections.

use crate::layout::{Class, Endian};

/// Program header fields for [`ElfBuilder::add_segment`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SegmentSpec {
    pub p_type: u32,
    pub flags: u32,
    pub offset: u64,
    pub vaddr: u64,
    pub paddr: u64,
    pub filesz: u64,
    pub memsz: u64,
    pub align: u64,
}

/// Section header fields for [`ElfBuilder::add_section`].
#[derive(Debug, Clone, Default)]
pub(crate) struct SectionSpec {
    pub name: String,
    pub sh_type: u32,
    pub flags: u64,
    pub addr: u64,
    pub offset: u64,
    pub size: u64,
    pub link: u32,
    pub info: u32,
    pub addralign: u64,
    pub entsize: u64,
}

impl SectionSpec {
    pub(crate) fn named(name: &str, sh_type: u32) -> Self {
        Self {
            name: name.to_owned(),
            sh_type,
            ..Self::default()
        }
    }
}

/// Builds a well-formed ELF image under any class and byte order.
pub(crate) struct ElfBuilder {
    class: Class,
    endian: Endian,
    e_type: u16,
    machine: u16,
    entry: u64,
    os_abi: u8,
    data: Vec<u8>,
    segments: Vec<SegmentSpec>,
    sections: Vec<SectionSpec>,
    trailing: Vec<SectionSpec>,
    shstrndx: Option<u16>,
    section_headers: bool,
}

impl ElfBuilder {
    pub(crate) fn new(class: Class, endian: Endian) -> Self {
        Self {
            class,
            endian,
            e_type: 2,
            machine: 62,
            entry: 0x40_1000,
            os_abi: 0,
            data: Vec::new(),
            segments: Vec::new(),
            sections: Vec::new(),
            trailing: Vec::new(),
            shstrndx: None,
            section_headers: true,
        }
    }

    pub(crate) fn entry(mut self, entry: u64) -> Self {
        self.entry = entry;
        self
    }

    pub(crate) fn machine(mut self, machine: u16) -> Self {
        self.machine = machine;
        self
    }

    pub(crate) fn os_abi(mut self, os_abi: u8) -> Self {
        self.os_abi = os_abi;
        self
    }

    pub(crate) fn file_type(mut self, e_type: u16) -> Self {
        self.e_type = e_type;
        self
    }

    /// Override `e_shstrndx` instead of pointing it at `.shstrtab`.
    pub(crate) fn shstrndx(mut self, index: u16) -> Self {
        self.shstrndx = Some(index);
        self
    }

    /// Emit no section header table at all (`e_shoff = e_shnum = 0`).
    pub(crate) fn without_sections(mut self) -> Self {
        self.section_headers = false;
        self
    }

    /// Append raw bytes to the data area, returning their file offset.
    pub(crate) fn add_data(&mut self, bytes: &[u8]) -> u64 {
        while self.data.len() % 8 != 0 {
            self.data.push(0);
        }
        let offset = (self.class.ehdr_size() + self.data.len()) as u64;
        self.data.extend_from_slice(bytes);
        offset
    }

    pub(crate) fn add_segment(&mut self, spec: SegmentSpec) -> usize {
        self.segments.push(spec);
        self.segments.len() - 1
    }

    /// Add a section before `.shstrtab`, returning its section index.
    pub(crate) fn add_section(&mut self, spec: SectionSpec) -> usize {
        self.sections.push(spec);
        self.sections.len()
    }

    /// Add a section after `.shstrtab`, returning its section index.
    ///
    /// Indices returned here assume no further [`add_section`](Self::add_section) calls.
    pub(crate) fn add_trailing_section(&mut self, spec: SectionSpec) -> usize {
        self.trailing.push(spec);
        self.sections.len() + 1 + self.trailing.len()
    }

    /// Index that `.shstrtab` will get.
    pub(crate) fn names_index(&self) -> usize {
        self.sections.len() + 1
    }

    /// Build a string table blob; returns the bytes and each string's offset.
    pub(crate) fn strtab(strings: &[&str]) -> (Vec<u8>, Vec<u32>) {
        let mut bytes = vec![0u8];
        let mut offsets = Vec::with_capacity(strings.len());
        for s in strings {
            offsets.push(bytes.len() as u32);
            bytes.extend_from_slice(s.as_bytes());
            bytes.push(0);
        }
        (bytes, offsets)
    }

    /// Encode one symbol record in this builder's class and byte order.
    pub(crate) fn symbol(
        &self,
        name: u32,
        value: u64,
        size: u64,
        info: u8,
        other: u8,
        shndx: u16,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        match self.class {
            Class::Elf32 => {
                self.put(&mut out, u64::from(name), 4);
                self.put(&mut out, value, 4);
                self.put(&mut out, size, 4);
                out.push(info);
                out.push(other);
                self.put(&mut out, u64::from(shndx), 2);
            }
            Class::Elf64 => {
                self.put(&mut out, u64::from(name), 4);
                out.push(info);
                out.push(other);
                self.put(&mut out, u64::from(shndx), 2);
                self.put(&mut out, value, 8);
                self.put(&mut out, size, 8);
            }
        }
        out
    }

    fn put(&self, out: &mut Vec<u8>, value: u64, width: usize) {
        out.extend_from_slice(&self.endian.write_uint(value, width));
    }

    fn word(&self, out: &mut Vec<u8>, value: u64) {
        self.put(out, value, self.class.word_size());
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let ehdr_size = self.class.ehdr_size();

        let mut all_sections = Vec::new();
        if self.section_headers {
            all_sections.push(SectionSpec::default());
            all_sections.extend(self.sections.iter().cloned());
            all_sections.push(SectionSpec::named(".shstrtab", 3));
            all_sections.extend(self.trailing.iter().cloned());
        }

        let mut body = self.data.clone();
        while body.len() % 8 != 0 {
            body.push(0);
        }

        // .shstrtab contents
        let mut name_offsets = Vec::with_capacity(all_sections.len());
        let mut shstrtab = vec![0u8];
        for spec in &all_sections {
            if spec.name.is_empty() {
                name_offsets.push(0u32);
            } else {
                name_offsets.push(shstrtab.len() as u32);
                shstrtab.extend_from_slice(spec.name.as_bytes());
                shstrtab.push(0);
            }
        }
        let shstrtab_off = (ehdr_size + body.len()) as u64;
        if self.section_headers {
            body.extend_from_slice(&shstrtab);
        }
        while body.len() % 8 != 0 {
            body.push(0);
        }

        let phoff = if self.segments.is_empty() {
            0
        } else {
            (ehdr_size + body.len()) as u64
        };
        for seg in &self.segments {
            self.put(&mut body, u64::from(seg.p_type), 4);
            match self.class {
                Class::Elf32 => {
                    self.word(&mut body, seg.offset);
                    self.word(&mut body, seg.vaddr);
                    self.word(&mut body, seg.paddr);
                    self.word(&mut body, seg.filesz);
                    self.word(&mut body, seg.memsz);
                    self.put(&mut body, u64::from(seg.flags), 4);
                    self.word(&mut body, seg.align);
                }
                Class::Elf64 => {
                    self.put(&mut body, u64::from(seg.flags), 4);
                    self.word(&mut body, seg.offset);
                    self.word(&mut body, seg.vaddr);
                    self.word(&mut body, seg.paddr);
                    self.word(&mut body, seg.filesz);
                    self.word(&mut body, seg.memsz);
                    self.word(&mut body, seg.align);
                }
            }
        }

        let shoff = if all_sections.is_empty() {
            0
        } else {
            (ehdr_size + body.len()) as u64
        };
        let names_index = self.sections.len() + 1;
        for (i, spec) in all_sections.iter().enumerate() {
            let (offset, size) = if self.section_headers && i == names_index {
                (shstrtab_off, shstrtab.len() as u64)
            } else {
                (spec.offset, spec.size)
            };
            self.put(&mut body, u64::from(name_offsets[i]), 4);
            self.put(&mut body, u64::from(spec.sh_type), 4);
            self.word(&mut body, spec.flags);
            self.word(&mut body, spec.addr);
            self.word(&mut body, offset);
            self.word(&mut body, size);
            self.put(&mut body, u64::from(spec.link), 4);
            self.put(&mut body, u64::from(spec.info), 4);
            self.word(&mut body, spec.addralign);
            self.word(&mut body, spec.entsize);
        }

        let shnum = all_sections.len() as u16;
        let shstrndx = if self.section_headers {
            self.shstrndx.unwrap_or(names_index as u16)
        } else {
            0
        };

        let mut out = Vec::with_capacity(ehdr_size + body.len());
        out.extend_from_slice(&[0x7f, b'E', b'L', b'F']);
        out.push(match self.class {
            Class::Elf32 => 1,
            Class::Elf64 => 2,
        });
        out.push(match self.endian {
            Endian::Little => 1,
            Endian::Big => 2,
        });
        out.push(1);
        out.push(self.os_abi);
        out.resize(16, 0);
        self.put(&mut out, u64::from(self.e_type), 2);
        self.put(&mut out, u64::from(self.machine), 2);
        self.put(&mut out, 1, 4);
        self.word(&mut out, self.entry);
        self.word(&mut out, phoff);
        self.word(&mut out, shoff);
        self.put(&mut out, 0, 4);
        self.put(&mut out, ehdr_size as u64, 2);
        self.put(&mut out, self.class.phdr_size() as u64, 2);
        self.put(&mut out, self.segments.len() as u64, 2);
        self.put(&mut out, self.class.shdr_size() as u64, 2);
        self.put(&mut out, u64::from(shnum), 2);
        self.put(&mut out, u64::from(shstrndx), 2);
        debug_assert_eq!(out.len(), ehdr_size);

        out.extend_from_slice(&body);
        out
    }
}

/// Overwrite a `width`-byte integer at `offset` in a built image.
pub(crate) fn patch(bytes: &mut [u8], endian: Endian, offset: usize, value: u64, width: usize) {
    bytes[offset..offset + width].copy_from_slice(&endian.write_uint(value, width));
}
