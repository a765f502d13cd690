#![no_main]

use chopchop_formats::{Elf, ExportTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parse errors are expected; panics are not
    if let Ok(elf) = Elf::parse(data) {
        let _ = elf.is_relocatable();
        for symbol in elf.symbols() {
            let _ = symbol.entry.is_exported_function();
        }
        for name in elf.exported_functions() {
            assert!(!name.is_empty());
        }
    }
});
