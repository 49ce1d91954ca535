//! Display formatting for ids, ages and spot prices.

use chrono::{DateTime, Utc};

/// Shortens a hex id to `0xabcd...7890`; ids of 10 chars or fewer are kept.
pub fn shorten_hex(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 10 {
        return id.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Relative age of a timestamp, or an absolute date once it is a day old.
pub fn format_time_ago(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "N/A".to_string();
    };
    let elapsed = (now - timestamp).abs();
    if elapsed.num_hours() >= 24 {
        timestamp.format("%Y-%m-%d, %H:%M:%S").to_string()
    } else if elapsed.num_minutes() >= 60 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_seconds() >= 60 {
        plural(elapsed.num_minutes(), "minute")
    } else {
        plural(elapsed.num_seconds(), "second")
    }
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Formats a spot price, switching to scientific notation at the extremes.
pub fn format_spot_price(price: f64) -> String {
    if !price.is_finite() {
        return "-".to_string();
    }
    let magnitude = price.abs();
    if price != 0.0 && !(0.001..=1_000_000.0).contains(&magnitude) {
        let formatted = format!("{price:.2e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }
    if price < 1.0 {
        trim_zeros(format!("{price:.6}"))
    } else if price < 1000.0 {
        trim_zeros(format!("{price:.4}"))
    } else {
        format!("{price:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_shorten_hex() {
        assert_eq!(shorten_hex("0xabcdef1234567890"), "0xabcd...7890");
        assert_eq!(shorten_hex("0x12345678"), "0x12345678");
    }

    #[test]
    fn test_time_ago_units() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_time_ago(None, now), "N/A");
        assert_eq!(format_time_ago(Some(now - Duration::seconds(1)), now), "1 second ago");
        assert_eq!(format_time_ago(Some(now - Duration::seconds(5)), now), "5 seconds ago");
        assert_eq!(format_time_ago(Some(now - Duration::seconds(70)), now), "1 minute ago");
        assert_eq!(format_time_ago(Some(now - Duration::minutes(70)), now), "1 hour ago");
        assert_eq!(format_time_ago(Some(now - Duration::hours(3)), now), "3 hours ago");
    }

    #[test]
    fn test_time_ago_absolute_after_a_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 13, 0, 0).unwrap();
        let then = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 15).unwrap();
        assert_eq!(format_time_ago(Some(then), now), "2025-03-01, 12:30:15");
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(format_spot_price(0.0), "0");
        assert_eq!(format_spot_price(0.5), "0.5");
        assert_eq!(format_spot_price(12.345678), "12.3457");
        assert_eq!(format_spot_price(2500.0), "2500.00");
        assert_eq!(format_spot_price(0.00000000123), "1.23e-9");
        assert_eq!(format_spot_price(12_300_000.0), "1.23e+7");
        assert_eq!(format_spot_price(f64::NAN), "-");
    }
}
