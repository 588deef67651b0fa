//! Day-first calendar dates (`dd/mm/yyyy`) as used throughout the bakery data.

use chrono::NaiveDate;

/// Display format for dates in records and forms.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a strict `dd/mm/yyyy` value: exactly two digits, two digits, four
/// digits, separated by slashes, naming a real calendar day.
///
/// Returns `None` for anything else, including `1/6/2022` or `31/02/2022`.
pub fn parse_day_month_year(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    // Reassemble year-first before building the date.
    let day: u32 = input[0..2].parse().ok()?;
    let month: u32 = input[3..5].parse().ok()?;
    let year: i32 = input[6..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_pattern() {
        assert_eq!(
            parse_day_month_year("20/06/2022"),
            NaiveDate::from_ymd_opt(2022, 6, 20)
        );
        assert_eq!(
            parse_day_month_year("01/01/1999"),
            NaiveDate::from_ymd_opt(1999, 1, 1)
        );
    }

    #[test]
    fn test_rejects_loose_or_invalid_dates() {
        assert_eq!(parse_day_month_year("1/6/2022"), None);
        assert_eq!(parse_day_month_year("2022/06/20"), None);
        assert_eq!(parse_day_month_year("20-06-2022"), None);
        assert_eq!(parse_day_month_year("31/02/2022"), None);
        assert_eq!(parse_day_month_year("20/06/2022 "), None);
        assert_eq!(parse_day_month_year(""), None);
    }

    #[test]
    fn test_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
        assert_eq!(format_day_month_year(date), "05/11/2023");
    }
}
