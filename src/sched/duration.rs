// src/sched/duration.rs

//! Parsing of advisory duration estimates like `"2h"` or `"30m"`.

/// Convert a duration estimate to seconds.
///
/// - `"<n>h"` -> n * 3600
/// - `"<n>m"` -> n * 60
/// - anything else, including `None` or an unparsable number, falls back to
///   60 seconds.
pub fn parse_estimate(estimate: Option<&str>) -> u64 {
    const DEFAULT_SECS: u64 = 60;

    let Some(raw) = estimate else {
        return DEFAULT_SECS;
    };
    let raw = raw.trim();

    let (digits, factor) = match raw.char_indices().last() {
        Some((idx, 'h')) => (&raw[..idx], 3600),
        Some((idx, 'm')) => (&raw[..idx], 60),
        _ => return DEFAULT_SECS,
    };

    match digits.trim().parse::<u64>() {
        Ok(n) => n.saturating_mul(factor),
        Err(_) => DEFAULT_SECS,
    }
}
