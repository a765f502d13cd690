//! Export extraction tests against synthetic images.

mod common;

use chopchop_formats::{detect_format, BinaryType, Elf, ExportTable, MachO, ParseError, Pe};
use common::*;

// =============================================================================
// ELF
// =============================================================================

fn libdemo_symbols() -> Vec<ElfSym> {
    vec![
        ElfSym::func("demo_open"),
        ElfSym::import("malloc"),
        ElfSym {
            binding: STB_LOCAL,
            ..ElfSym::func("static_helper")
        },
        ElfSym {
            kind: STT_OBJECT,
            ..ElfSym::func("demo_version")
        },
        ElfSym {
            other: STV_HIDDEN,
            ..ElfSym::func("hidden_impl")
        },
        ElfSym {
            binding: STB_WEAK,
            ..ElfSym::func("demo_close")
        },
    ]
}

#[test]
fn test_elf64_dynsym_exports() {
    let data = elf_image(true, false, true, &libdemo_symbols());
    assert_eq!(detect_format(&data), BinaryType::Elf);

    let elf = Elf::parse(&data).expect("ELF should parse");
    assert_eq!(elf.format_name(), "ELF");
    assert!(!elf.is_relocatable());
    // Null entry plus six symbols
    assert_eq!(elf.symbols().len(), 7);
    assert_eq!(elf.exported_functions(), vec!["demo_open", "demo_close"]);
}

#[test]
fn test_elf32_big_endian_exports() {
    let data = elf_image(false, true, true, &libdemo_symbols());
    let elf = Elf::parse(&data).expect("ELF32 BE should parse");
    assert_eq!(elf.exported_functions(), vec!["demo_open", "demo_close"]);
}

#[test]
fn test_elf_symtab_fallback() {
    let data = elf_image(true, false, false, &[ElfSym::func("main"), ElfSym::func("helper")]);
    let elf = Elf::parse(&data).expect("static ELF should parse");
    assert_eq!(elf.exported_functions(), vec!["main", "helper"]);
}

#[test]
fn test_elf_truncated_section_table() {
    let data = elf_image(true, false, true, &libdemo_symbols());
    let truncated = &data[..data.len() - 10];
    assert!(Elf::parse(truncated).is_err());
}

// =============================================================================
// PE
// =============================================================================

#[test]
fn test_pe_named_exports() {
    let data = pe_image(
        "KERNEL32.dll",
        &[
            PeExport::func("CreateFileA"),
            PeExport::forward("HeapAlloc", "NTDLL.RtlAllocateHeap"),
            PeExport::func("LoadLibraryA"),
        ],
    );
    assert_eq!(detect_format(&data), BinaryType::Pe);

    let pe = Pe::parse(&data).expect("PE should parse");
    assert_eq!(
        pe.exported_functions(),
        vec!["CreateFileA", "HeapAlloc", "LoadLibraryA"]
    );

    // forwarded exports are still listed by name
    assert_eq!(pe.exports[1].name, "HeapAlloc");
    assert_eq!(pe.exports[1].forwarder.as_deref(), Some("NTDLL.RtlAllocateHeap"));
    assert!(pe.exports[0].forwarder.is_none());
}

#[test]
fn test_pe_without_exports() {
    let data = pe_image("empty.dll", &[]);
    let pe = Pe::parse(&data).expect("PE should parse");
    assert!(pe.exported_functions().is_empty());
}

#[test]
fn test_pe_rejects_elf() {
    let data = elf_image(true, false, true, &[ElfSym::func("x")]);
    assert!(matches!(Pe::parse(&data), Err(ParseError::TooShort { .. }) | Err(ParseError::InvalidMagic { .. })));
}

// =============================================================================
// Mach-O
// =============================================================================

#[test]
fn test_macho_exports() {
    let data = macho_image(&[
        ("_objc_msgSend", N_SECT | N_EXT),
        ("_dlopen", N_EXT),
        ("_private_thing", N_SECT | N_EXT | N_PEXT),
        ("_local", N_SECT),
        ("_objc_release", N_SECT | N_EXT),
    ]);
    assert_eq!(detect_format(&data), BinaryType::MachO);

    let macho = MachO::parse(&data).expect("Mach-O should parse");
    assert!(!macho.is_universal());
    assert_eq!(macho.format_name(), "Mach-O");
    assert_eq!(
        macho.exported_functions(),
        vec!["_objc_msgSend", "_objc_release"]
    );
}

#[test]
fn test_fat_macho_deduplicates_slices() {
    let x86 = macho_image(&[("_shared", N_SECT | N_EXT), ("_x86_only", N_SECT | N_EXT)]);
    let arm = macho_image(&[("_shared", N_SECT | N_EXT), ("_arm_only", N_SECT | N_EXT)]);
    let data = fat_macho(&[x86, arm]);
    assert_eq!(detect_format(&data), BinaryType::MachO);

    let macho = MachO::parse(&data).expect("fat Mach-O should parse");
    assert!(macho.is_universal());
    assert_eq!(macho.images.len(), 2);
    assert_eq!(macho.images[1].offset % 0x100, 0);
    assert_eq!(
        macho.exported_functions(),
        vec!["_shared", "_x86_only", "_arm_only"]
    );
}

#[test]
fn test_macho_rejects_garbage() {
    assert!(MachO::parse(b"\0\0\0\0garbage").is_err());
}
