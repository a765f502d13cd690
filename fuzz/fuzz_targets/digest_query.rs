#![no_main]

use chopchop_core::DigestQuery;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let is_hex = text.starts_with("0x");
    if let Ok(normalized) = DigestQuery::from(text).normalize() {
        if is_hex {
            assert!(normalized.len() == 8 || normalized.len() == 16);
        } else {
            assert_eq!(normalized, text);
        }
    }
});
