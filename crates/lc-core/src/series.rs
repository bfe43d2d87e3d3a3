//! Series normalization: raw range-query points to a dense series.
//!
//! Prometheus range results can arrive unsorted (multiple result vectors
//! are flattened), may contain duplicate timestamps, and have gaps when
//! scrapes were missed. Downstream feature building assumes a dense
//! uniform cadence, so everything funnels through [`normalize`] first.

use chrono::{DateTime, TimeZone, Utc};
use lc_prom::Point;
use std::collections::BTreeMap;

/// Resampling cadence, seconds. Matches the fine-grained grid the
/// forecaster trains on; range queries arrive at 60s and get
/// forward-filled onto this grid.
pub const CADENCE_SECS: i64 = 5;

/// One normalized observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Normalize raw points onto a dense `cadence_secs` grid.
///
/// 1. Sort ascending by timestamp; exact-duplicate timestamps collapse
///    to the last value seen.
/// 2. Bucket onto the cadence grid, averaging within each bucket.
/// 3. Fill interior gaps by carrying the nearest earlier value forward;
///    leading gaps take the nearest later value.
///
/// Empty input yields an empty series; that is the caller's "no data"
/// signal, not a failure here. Already-dense, grid-aligned input comes
/// back unchanged.
pub fn normalize(points: &[Point], cadence_secs: i64) -> Vec<Sample> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.unix_secs
            .partial_cmp(&b.unix_secs)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Last write wins on duplicate timestamps (stable sort keeps input
    // order among equals).
    let mut deduped: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in sorted {
        match deduped.last_mut() {
            Some(last) if last.unix_secs == p.unix_secs => *last = p,
            _ => deduped.push(p),
        }
    }

    // Mean per cadence bucket.
    let mut buckets: BTreeMap<i64, (f64, u32)> = BTreeMap::new();
    for p in &deduped {
        let idx = (p.unix_secs.floor() as i64).div_euclid(cadence_secs);
        let entry = buckets.entry(idx).or_insert((0.0, 0));
        entry.0 += p.value;
        entry.1 += 1;
    }

    let first = *buckets.keys().next().unwrap_or(&0);
    let last = *buckets.keys().next_back().unwrap_or(&0);

    let mut slots: Vec<Option<f64>> = Vec::with_capacity((last - first + 1) as usize);
    for idx in first..=last {
        slots.push(buckets.get(&idx).map(|(sum, n)| sum / f64::from(*n)));
    }

    // Forward fill, then back fill whatever leads remain.
    let mut carry: Option<f64> = None;
    for slot in slots.iter_mut() {
        match slot {
            Some(v) => carry = Some(*v),
            None => *slot = carry,
        }
    }
    let mut carry: Option<f64> = None;
    for slot in slots.iter_mut().rev() {
        match slot {
            Some(v) => carry = Some(*v),
            None => *slot = carry,
        }
    }

    slots
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let secs = (first + i as i64) * cadence_secs;
            let timestamp = Utc.timestamp_opt(secs, 0).single()?;
            v.map(|value| Sample { timestamp, value })
        })
        .collect()
}

/// Values only, in series order.
pub fn values(series: &[Sample]) -> Vec<f64> {
    series.iter().map(|s| s.value).collect()
}
