use chrono::{Datelike, NaiveDate};

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Format a signing date as "3rd June 2024".
pub fn format_signing_date(date: NaiveDate) -> String {
    let day = date.day();
    format!("{}{} {} {}", day, ordinal_suffix(day), date.format("%B"), date.year())
}

/// Parse the `YYYY-MM-DD` value held by a date field.
pub fn parse_field_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_format_signing_date() {
        assert_eq!(format_signing_date(june(1)), "1st June 2024");
        assert_eq!(format_signing_date(june(2)), "2nd June 2024");
        assert_eq!(format_signing_date(june(3)), "3rd June 2024");
        assert_eq!(format_signing_date(june(11)), "11th June 2024");
        assert_eq!(format_signing_date(june(21)), "21st June 2024");
    }

    #[test]
    fn test_teens_always_th() {
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(30), "th");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn test_full_month_name() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
        assert_eq!(format_signing_date(date), "24th December 2025");
    }

    #[test]
    fn test_parse_field_date() {
        assert_eq!(parse_field_date(" 2024-06-21 "), Some(june(21)));
        assert_eq!(parse_field_date(""), None);
        assert_eq!(parse_field_date("21/06/2024"), None);
    }
}
