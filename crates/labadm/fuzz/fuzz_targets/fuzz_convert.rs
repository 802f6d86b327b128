//! Fuzz target for end-to-end conversion.
//!
//! Arbitrary exports are parsed and mapped with every adapter under both
//! row policies. Skipping must never fail the batch.

#![no_main]

use labadm::{Instrument, MappingConfig, Parser, RowPolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = Parser::new().parse_str(text) else {
        return;
    };

    for instrument in Instrument::ALL {
        let strict = instrument.adapter(MappingConfig::default());
        let _ = strict.create_data(&table);

        let lenient = instrument
            .adapter(MappingConfig::default().with_row_policy(RowPolicy::SkipMalformed));
        let data = lenient
            .create_data(&table)
            .expect("skipping malformed rows never fails");
        assert!(data.measurement_groups.len() <= table.row_count());
    }
});
