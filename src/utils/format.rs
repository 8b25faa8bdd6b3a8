use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

/// Parse a record timestamp. Naive values are taken as UTC.
///
/// Accepts RFC 3339 (`2024-03-15T00:00:00Z`), Postgres-style offsets
/// (`2024-03-15 00:00:00+00`), naive date-times with `T` or a space, and
/// bare dates.
pub fn parse_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

/// `YYYY-MM` series label; unparseable input comes back unchanged.
pub fn month_label(raw: &str) -> String {
    match parse_time(raw) {
        Some(dt) => format!("{:04}-{:02}", dt.year(), dt.month()),
        None => raw.to_string(),
    }
}

/// `YYYY年MM月` table label; unparseable input comes back unchanged.
pub fn display_month(raw: &str) -> String {
    match parse_time(raw) {
        Some(dt) => format!("{:04}年{:02}月", dt.year(), dt.month()),
        None => raw.to_string(),
    }
}

/// Thousands-separated number with at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_for_series_and_table() {
        assert_eq!(month_label("2024-03-15T00:00:00Z"), "2024-03");
        assert_eq!(display_month("2024-03-15T00:00:00Z"), "2024年03月");
    }

    #[test]
    fn accepts_common_timestamp_shapes() {
        for raw in [
            "2024-11-01T08:30:00+08:00",
            "2024-11-01 00:00:00+00",
            "2024-11-01T00:00:00",
            "2024-11-01 00:00:00.123",
            "2024-11-01",
        ] {
            assert_eq!(month_label(raw), "2024-11", "{raw}");
        }
    }

    #[test]
    fn month_follows_the_timestamp_own_offset() {
        assert_eq!(month_label("2024-04-01T00:30:00+08:00"), "2024-04");
    }

    #[test]
    fn unparseable_time_is_shown_raw() {
        assert_eq!(month_label("sometime"), "sometime");
        assert_eq!(display_month("2024-13-01"), "2024-13-01");
        assert!(parse_time("").is_none());
    }

    #[test]
    fn numbers_are_grouped_by_thousands() {
        assert_eq!(format_number(84000.0), "84,000");
        assert_eq!(format_number(1234567.891), "1,234,567.891");
        assert_eq!(format_number(4364.5), "4,364.5");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-6000.0), "-6,000");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn fractions_round_to_three_digits() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(7000.33333), "7,000.333");
        assert_eq!(format_number(999.9996), "1,000");
    }

    #[test]
    fn non_finite_values_are_not_coerced() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }
}
