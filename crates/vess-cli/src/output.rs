//! Formatted output helpers for CLI commands.
//!
//! Human-readable byte sizes and ages for the image table.

use chrono::{DateTime, Utc};

/// Formats a byte count into a human-readable string (e.g., "128.0 MiB").
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Formats the time between `created` (Unix seconds) and `now` as a coarse
/// age such as "3 days ago".
#[must_use]
pub fn format_age(created: i64, now: DateTime<Utc>) -> String {
    let Some(created) = DateTime::from_timestamp(created, 0) else {
        return "unknown".to_owned();
    };
    let age = now.signed_duration_since(created);
    let (count, unit) = if age.num_days() > 0 {
        (age.num_days(), "day")
    } else if age.num_hours() > 0 {
        (age.num_hours(), "hour")
    } else if age.num_minutes() > 0 {
        (age.num_minutes(), "minute")
    } else {
        return "just now".to_owned();
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_displays_bytes() {
        assert_eq!(format_bytes(512), "512 B");
    }

    #[test]
    fn format_bytes_displays_kib() {
        assert_eq!(format_bytes(2048), "2.0 KiB");
    }

    #[test]
    fn format_bytes_displays_mib() {
        assert_eq!(format_bytes(134_217_728), "128.0 MiB");
    }

    #[test]
    fn format_bytes_displays_gib() {
        assert_eq!(format_bytes(2_147_483_648), "2.0 GiB");
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    #[test]
    fn format_age_picks_largest_unit() {
        assert_eq!(format_age(0, at(30)), "just now");
        assert_eq!(format_age(0, at(60)), "1 minute ago");
        assert_eq!(format_age(0, at(7_200)), "2 hours ago");
        assert_eq!(format_age(0, at(86_400 * 3 + 5)), "3 days ago");
    }

    #[test]
    fn format_age_clamps_future_timestamps() {
        assert_eq!(format_age(100, at(50)), "just now");
    }

    #[test]
    fn format_age_rejects_out_of_range_timestamps() {
        assert_eq!(format_age(i64::MAX, Utc::now()), "unknown");
    }
}
