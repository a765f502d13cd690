#![no_main]

use std::collections::HashSet;

use chopchop_formats::{ExportTable, MachO};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(macho) = MachO::parse(data) {
        let names = macho.exported_functions();
        // Slices of a universal binary are merged without duplicates
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
});
