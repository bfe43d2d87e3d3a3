//! Fuzz target for series normalization.
//!
//! Arbitrary point lists (unsorted, duplicated, NaN timestamps) must
//! normalize without panicking or looping.

#![no_main]

use arbitrary::Arbitrary;
use lc_core::series::{normalize, CADENCE_SECS};
use lc_prom::Point;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct RawPoint {
    unix_secs: f64,
    value: f64,
}

fuzz_target!(|raw: Vec<RawPoint>| {
    // Keep timestamps in a sane range so the dense grid stays bounded.
    let points: Vec<Point> = raw
        .into_iter()
        .filter(|p| p.unix_secs.is_finite() && p.unix_secs.abs() < 1e6)
        .map(|p| Point {
            unix_secs: p.unix_secs,
            value: p.value,
        })
        .collect();
    let series = normalize(&points, CADENCE_SECS);
    assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
});
