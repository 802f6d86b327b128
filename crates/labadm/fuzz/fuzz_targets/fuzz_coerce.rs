//! Fuzz target for cell coercion.

#![no_main]

use labadm::RawValue;
use labadm::RoundingPolicy;
use labadm::mapping::{as_float, as_float_or_none, as_rounded_int_or_none, as_string_or_none};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let raw = RawValue::from_cell(data);

    let _ = as_float(&raw);
    let _ = as_float_or_none(&raw);
    let _ = as_string_or_none(&raw);

    let even = as_rounded_int_or_none(&raw, RoundingPolicy::HalfEven);
    let up = as_rounded_int_or_none(&raw, RoundingPolicy::HalfUp);

    // Both policies agree on whether a value is usable
    assert_eq!(even.is_ok(), up.is_ok());
});
