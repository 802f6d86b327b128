//! Fuzz target for the export parser.
//!
//! The parser must never panic on malformed delimited or JSON input.

#![no_main]

use labadm::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let _ = parser.parse_json(data);

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parser.parse_str(text);
    }
});
