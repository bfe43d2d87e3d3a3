//! Fuzz target for instant-query response parsing.
//!
//! Response bodies come from the network; parsing must never panic,
//! only return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        let _ = lc_prom::parse_instant(body);
    }
});
