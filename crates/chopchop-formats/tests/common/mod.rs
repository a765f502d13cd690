//! Builders for minimal, well-formed ELF, PE and Mach-O images.
//!
//! Only the structures the export readers look at are emitted.

#![allow(dead_code)]

pub const STB_LOCAL: u8 = 0;
pub const STB_GLOBAL: u8 = 1;
pub const STB_WEAK: u8 = 2;
pub const STT_OBJECT: u8 = 1;
pub const STT_FUNC: u8 = 2;
pub const STV_HIDDEN: u8 = 2;

/// One ELF symbol table entry.
#[derive(Clone)]
pub struct ElfSym {
    pub name: &'static str,
    pub binding: u8,
    pub kind: u8,
    pub other: u8,
    pub shndx: u16,
}

impl ElfSym {
    pub fn func(name: &'static str) -> Self {
        Self {
            name,
            binding: STB_GLOBAL,
            kind: STT_FUNC,
            other: 0,
            shndx: 1,
        }
    }

    pub fn import(name: &'static str) -> Self {
        Self {
            shndx: 0,
            ..Self::func(name)
        }
    }
}

struct Writer {
    buf: Vec<u8>,
    big_endian: bool,
}

impl Writer {
    fn new(len: usize, big_endian: bool) -> Self {
        Self {
            buf: vec![0; len],
            big_endian,
        }
    }

    fn ensure(&mut self, end: usize) {
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
    }

    fn bytes(&mut self, offset: usize, bytes: &[u8]) {
        self.ensure(offset + bytes.len());
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn u8(&mut self, offset: usize, value: u8) {
        self.bytes(offset, &[value]);
    }

    fn u16(&mut self, offset: usize, value: u16) {
        let b = if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        self.bytes(offset, &b);
    }

    fn u32(&mut self, offset: usize, value: u32) {
        let b = if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        self.bytes(offset, &b);
    }

    fn u64(&mut self, offset: usize, value: u64) {
        let b = if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        self.bytes(offset, &b);
    }
}

/// Builds a string table, returning the table and each name's offset.
fn string_table<'a>(names: impl IntoIterator<Item = &'a str>) -> (Vec<u8>, Vec<u32>) {
    let mut table = vec![0u8];
    let mut offsets = Vec::new();
    for name in names {
        offsets.push(table.len() as u32);
        table.extend_from_slice(name.as_bytes());
        table.push(0);
    }
    (table, offsets)
}

/// Builds an ELF shared object with one symbol table.
///
/// `dynamic` selects `.dynsym` (true) or `.symtab` (false).
pub fn elf_image(is_64: bool, big_endian: bool, dynamic: bool, symbols: &[ElfSym]) -> Vec<u8> {
    let header_size = if is_64 { 64 } else { 52 };
    let sym_size = if is_64 { 24 } else { 16 };
    let shdr_size = if is_64 { 64 } else { 40 };

    let (strtab, name_offsets) = string_table(symbols.iter().map(|s| s.name));
    let strtab_off = header_size;
    let symtab_off = (strtab_off + strtab.len() + 7) & !7;
    // Leading null symbol
    let symtab_len = (symbols.len() + 1) * sym_size;
    let shoff = (symtab_off + symtab_len + 7) & !7;

    let mut w = Writer::new(shoff + 3 * shdr_size, big_endian);
    w.bytes(0, &[0x7f, b'E', b'L', b'F']);
    w.u8(4, if is_64 { 2 } else { 1 });
    w.u8(5, if big_endian { 2 } else { 1 });
    w.u8(6, 1);
    // ET_DYN
    w.u16(16, 3);
    if is_64 {
        w.u64(40, shoff as u64);
        w.u16(58, shdr_size as u16);
        w.u16(60, 3);
    } else {
        w.u32(32, shoff as u32);
        w.u16(46, shdr_size as u16);
        w.u16(48, 3);
    }

    w.bytes(strtab_off, &strtab);

    for (i, (sym, name)) in symbols.iter().zip(&name_offsets).enumerate() {
        let off = symtab_off + (i + 1) * sym_size;
        let info = (sym.binding << 4) | sym.kind;
        w.u32(off, *name);
        if is_64 {
            w.u8(off + 4, info);
            w.u8(off + 5, sym.other);
            w.u16(off + 6, sym.shndx);
            w.u64(off + 8, 0x1000 + i as u64 * 16);
        } else {
            w.u32(off + 4, 0x1000 + i as u32 * 16);
            w.u8(off + 12, info);
            w.u8(off + 13, sym.other);
            w.u16(off + 14, sym.shndx);
        }
    }

    // Section 1: symbol table linked to section 2: string table
    let section = |w: &mut Writer, index: usize, sh_type: u32, offset: usize, size: usize, link: u32, entsize: usize| {
        let base = shoff + index * shdr_size;
        w.u32(base + 4, sh_type);
        if is_64 {
            w.u64(base + 24, offset as u64);
            w.u64(base + 32, size as u64);
            w.u32(base + 40, link);
            w.u64(base + 56, entsize as u64);
        } else {
            w.u32(base + 16, offset as u32);
            w.u32(base + 20, size as u32);
            w.u32(base + 24, link);
            w.u32(base + 36, entsize as u32);
        }
    };
    let symtab_type = if dynamic { 11 } else { 2 };
    section(&mut w, 1, symtab_type, symtab_off, symtab_len, 2, sym_size);
    section(&mut w, 2, 3, strtab_off, strtab.len(), 0, 0);

    w.buf
}

/// One PE export.
#[derive(Clone)]
pub struct PeExport {
    pub name: &'static str,
    pub forwarder: Option<&'static str>,
}

impl PeExport {
    pub fn func(name: &'static str) -> Self {
        Self {
            name,
            forwarder: None,
        }
    }

    pub fn forward(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            forwarder: Some(target),
        }
    }
}

const PE_SECTION_RVA: u32 = 0x1000;
const PE_SECTION_FILE_OFFSET: usize = 0x200;

/// Builds a PE32+ DLL whose only section holds the export directory.
pub fn pe_image(dll_name: &str, exports: &[PeExport]) -> Vec<u8> {
    let n = exports.len();
    let funcs = 40;
    let names = funcs + 4 * n;
    let ords = names + 4 * n;
    let mut strings = ords + 2 * n;

    let mut edata = Writer::new(strings, false);
    let mut put_string = |edata: &mut Writer, s: &str| -> u32 {
        let at = strings;
        edata.bytes(at, s.as_bytes());
        edata.u8(at + s.len(), 0);
        strings += s.len() + 1;
        PE_SECTION_RVA + at as u32
    };

    let name_rva = put_string(&mut edata, dll_name);
    for (i, export) in exports.iter().enumerate() {
        let rva = put_string(&mut edata, export.name);
        edata.u32(names + 4 * i, rva);
        edata.u16(ords + 2 * i, i as u16);
    }
    for (i, export) in exports.iter().enumerate() {
        let func_rva = match export.forwarder {
            Some(target) => put_string(&mut edata, target),
            // Somewhere past the export data, as code would be
            None => 0x8000 + 0x10 * i as u32,
        };
        edata.u32(funcs + 4 * i, func_rva);
    }

    edata.u32(12, name_rva);
    edata.u32(16, 1);
    edata.u32(20, n as u32);
    edata.u32(24, n as u32);
    edata.u32(28, PE_SECTION_RVA + funcs as u32);
    edata.u32(32, PE_SECTION_RVA + names as u32);
    edata.u32(36, PE_SECTION_RVA + ords as u32);
    let edata = edata.buf;

    let mut w = Writer::new(PE_SECTION_FILE_OFFSET + edata.len(), false);
    w.bytes(0, b"MZ");
    w.u32(0x3c, 0x40);
    w.bytes(0x40, b"PE\0\0");
    // COFF header
    let coff = 0x44;
    w.u16(coff, 0x8664);
    w.u16(coff + 2, 1);
    w.u16(coff + 16, 240);
    w.u16(coff + 18, 0x2022);
    // Optional header (PE32+)
    let opt = coff + 20;
    w.u16(opt, 0x20b);
    w.u32(opt + 108, 16);
    w.u32(opt + 112, PE_SECTION_RVA);
    w.u32(opt + 116, edata.len() as u32);
    // Section table
    let sec = opt + 240;
    w.bytes(sec, b".edata\0\0");
    w.u32(sec + 8, 0x1000);
    w.u32(sec + 12, PE_SECTION_RVA);
    w.u32(sec + 16, edata.len() as u32);
    w.u32(sec + 20, PE_SECTION_FILE_OFFSET as u32);

    w.bytes(PE_SECTION_FILE_OFFSET, &edata);
    w.buf
}

pub const N_EXT: u8 = 0x01;
pub const N_SECT: u8 = 0x0e;
pub const N_PEXT: u8 = 0x10;

/// Builds a thin little-endian 64-bit Mach-O dylib with an `LC_SYMTAB`.
pub fn macho_image(symbols: &[(&'static str, u8)]) -> Vec<u8> {
    let (strtab, name_offsets) = string_table(symbols.iter().map(|s| s.0));
    let symoff = 32 + 24;
    let stroff = symoff + symbols.len() * 16;

    let mut w = Writer::new(stroff + strtab.len(), false);
    w.u32(0, 0xfeedfacf);
    w.u32(4, 0x0100000c);
    w.u32(12, 6);
    w.u32(16, 1);
    w.u32(20, 24);

    w.u32(32, 0x2);
    w.u32(36, 24);
    w.u32(40, symoff as u32);
    w.u32(44, symbols.len() as u32);
    w.u32(48, stroff as u32);
    w.u32(52, strtab.len() as u32);

    for (i, ((_, n_type), strx)) in symbols.iter().zip(&name_offsets).enumerate() {
        let off = symoff + i * 16;
        w.u32(off, *strx);
        w.u8(off + 4, *n_type);
        w.u8(off + 5, 1);
        w.u64(off + 8, 0x1000 + i as u64);
    }
    w.bytes(stroff, &strtab);
    w.buf
}

/// Wraps thin images into a big-endian universal binary.
pub fn fat_macho(slices: &[Vec<u8>]) -> Vec<u8> {
    let mut w = Writer::new(8 + 20 * slices.len(), true);
    w.u32(0, 0xcafebabe);
    w.u32(4, slices.len() as u32);
    let mut offset = 0x100;
    for (i, slice) in slices.iter().enumerate() {
        let arch = 8 + 20 * i;
        w.u32(arch, 0x0100000c + i as u32);
        w.u32(arch + 8, offset as u32);
        w.u32(arch + 12, slice.len() as u32);
        w.bytes(offset, slice);
        offset += (slice.len() + 0xff) & !0xff;
    }
    w.buf
}
