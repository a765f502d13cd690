#![no_main]

use chopchop_formats::{ExportTable, Pe};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(pe) = Pe::parse(data) {
        let names = pe.exported_functions();
        assert_eq!(names.len(), pe.exports.len());
    }
});
