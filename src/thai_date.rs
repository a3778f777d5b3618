//! Thai calendar date handling.
//!
//! The SET history export writes dates as `"19 พ.ค. 2568"` or
//! `"19 พ.ค., 2568"`: day, Thai month abbreviation, Buddhist-era year.

use chrono::NaiveDate;

use crate::config::{BUDDHIST_ERA_OFFSET, MONTH_ABBREVIATIONS, MONTH_NAMES};

/// Convert a Thai date string into an ISO `YYYY-MM-DD` string.
///
/// Returns `None` when no known month abbreviation appears in the input, or
/// when the input does not split into day, month and year tokens. The result
/// is not checked against the calendar; see [`parse_thai_date`].
pub fn normalize(input: &str) -> Option<String> {
    if !MONTH_ABBREVIATIONS.iter().any(|(abbr, _)| input.contains(abbr)) {
        return None;
    }

    let cleaned = input.replace(',', "");
    let mut tokens = cleaned.split_whitespace();
    let (day, month_th, year_th) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(d), Some(m), Some(y), None) => (d, m, y),
        _ => return None,
    };

    let month = month_number(month_th)?;
    let day: u32 = day.parse().ok()?;
    let year = year_th.parse::<i32>().ok()? - BUDDHIST_ERA_OFFSET;

    Some(format!("{}-{}-{:02}", year, month, day))
}

/// Normalize and parse a Thai date string into a calendar date.
///
/// Returns `None` for anything [`normalize`] rejects and for impossible
/// dates such as `"31 ก.พ. 2568"`.
pub fn parse_thai_date(input: &str) -> Option<NaiveDate> {
    let iso = normalize(input)?;
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok()
}

/// Two-digit month number for an exact Thai abbreviation.
pub fn month_number(abbreviation: &str) -> Option<&'static str> {
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, num)| *num)
}

/// Full Thai month name for `month` in `1..=12`.
pub fn thai_month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// Heading for a calendar month, e.g. `"พฤษภาคม 2568"` for May 2025.
pub fn thai_month_label(year: i32, month: u32) -> Option<String> {
    let name = thai_month_name(month)?;
    Some(format!("{} {}", name, year + BUDDHIST_ERA_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn normalizes_every_month() {
        for (i, (abbr, num)) in MONTH_ABBREVIATIONS.iter().enumerate() {
            let input = format!("7 {}, 2568", abbr);
            assert_eq!(normalize(&input), Some(format!("2025-{}-07", num)));
            assert_eq!(num.parse::<usize>().unwrap(), i + 1);
        }
    }

    #[test]
    fn normalizes_without_comma() {
        assert_eq!(normalize("19 พ.ค. 2568").as_deref(), Some("2025-05-19"));
    }

    #[test]
    fn pads_single_digit_day() {
        assert_eq!(normalize("1 ม.ค., 2567").as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn no_month_is_no_match() {
        assert_eq!(normalize("ไม่มีเดือน"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("2025-05-19"), None);
    }

    #[test]
    fn malformed_tokens_are_no_match() {
        assert_eq!(normalize("พ.ค. 2568"), None);
        assert_eq!(normalize("x พ.ค. 2568"), None);
        assert_eq!(normalize("19 พ.ค. 2568 extra"), None);
        assert_eq!(normalize("19 xพ.ค. 2568"), None);
    }

    #[test]
    fn normalize_round_trips_through_iso_parse() {
        for (abbr, num) in MONTH_ABBREVIATIONS {
            for day in [1u32, 9, 10, 28] {
                let input = format!("{} {}, 2567", day, abbr);
                let iso = normalize(&input).unwrap();
                let parsed = NaiveDate::parse_from_str(&iso, "%Y-%m-%d").unwrap();
                assert_eq!(parsed.year(), 2024);
                assert_eq!(parsed.month(), num.parse::<u32>().unwrap());
                assert_eq!(parsed.day(), day);
                assert_eq!(parsed.format("%Y-%m-%d").to_string(), iso);
            }
        }
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert_eq!(parse_thai_date("31 ก.พ. 2568"), None);
        assert_eq!(
            parse_thai_date("29 ก.พ. 2567"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn month_labels_use_buddhist_era() {
        assert_eq!(thai_month_label(2025, 5).as_deref(), Some("พฤษภาคม 2568"));
        assert_eq!(thai_month_label(2024, 12).as_deref(), Some("ธันวาคม 2567"));
        assert_eq!(thai_month_label(2024, 0), None);
        assert_eq!(thai_month_label(2024, 13), None);
    }
}
