//! Remaining-time arithmetic and formatting.

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Remaining time of the track, in nanoseconds.
///
/// Computes `(length - position * 1000) * 1000`. `length` is the
/// `mpris:length` value in microseconds; `position` is expected one unit
/// coarser (milliseconds). MPRIS players report `Position` in microseconds,
/// so with real players this overshoots and goes negative.
// TODO: confirm the Position unit against a live player before switching
// this to `(length - position) * 1000`.
pub fn remaining_time(length: i64, position: i64) -> i64 {
    length
        .saturating_sub(position.saturating_mul(1000))
        .saturating_mul(1000)
}

/// Render nanoseconds as `1h2m3s`, `3m12s`, `45s` or `0s`, truncated toward
/// zero to whole seconds.
pub fn format_duration(nanos: i64) -> String {
    let secs = nanos / NANOS_PER_SECOND;
    if secs == 0 {
        return "0s".to_string();
    }

    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if h > 0 {
        format!("{sign}{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{sign}{m}m{s}s")
    } else {
        format!("{sign}{s}s")
    }
}
