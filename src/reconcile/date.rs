//! Tolerance window for listing dates

use chrono::NaiveDate;

/// Index pages lag release announcements; differences under this many
/// days are not drift.
const SIMILAR_DAYS: i64 = 7;

/// Whether two `YYYY-MM-DD` dates are within the tolerance window.
/// A 6-day gap passes, a 7-day gap fails; unparseable input never matches.
pub fn is_date_similar(left: &str, right: &str) -> bool {
    let (Ok(left), Ok(right)) = (
        NaiveDate::parse_from_str(left, "%Y-%m-%d"),
        NaiveDate::parse_from_str(right, "%Y-%m-%d"),
    ) else {
        return false;
    };

    (left - right).num_days().abs() < SIMILAR_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2020-01-01", "2020-01-01", true)]
    #[case("2020-01-01", "2020-01-06", true)] // 5-day gap
    #[case("2020-01-01", "2020-01-07", true)] // 6-day gap, still inside
    #[case("2020-01-01", "2020-01-08", false)] // 7-day gap, boundary excluded
    #[case("2020-01-08", "2020-01-01", false)] // order does not matter
    #[case("2020-01-06", "2020-01-01", true)]
    #[case("2020-01-01", "not-a-date", false)]
    #[case("Cannot parse", "2020-01-01", false)]
    fn tolerance_window_is_strictly_under_seven_days(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_date_similar(left, right), expected);
    }
}
