use anyhow::anyhow;
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Canonical `YYYY-MM-DD` key for a calendar day. Zero-padded, so string
/// order equals date order.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Current day of the local calendar as reported by the host clock.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date argument from the command line: an explicit `YYYY-MM-DD`
/// key or one of the `today`/`yesterday`/`tomorrow` aliases.
pub fn parse_date_arg(raw: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match raw.to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .pred_opt()
            .ok_or_else(|| anyhow!("date out of range: {raw}")),
        "tomorrow" => today
            .succ_opt()
            .ok_or_else(|| anyhow!("date out of range: {raw}")),
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            anyhow!("expected YYYY-MM-DD, today, yesterday or tomorrow, got: {raw}")
        }),
    }
}

/// Sunday on or before the given date. Weeks start on Sunday (index 0).
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday();
    date - Duration::days(i64::from(back))
}

/// The 7 consecutive days of the week containing `date`, Sunday first.
#[must_use]
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let start = start_of_week(date);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// First day of the date's month.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_key, month_start, parse_date_arg, start_of_week, week_dates};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key(day(2024, 5, 1)), "2024-05-01");
        assert_eq!(date_key(day(2024, 11, 23)), "2024-11-23");
    }

    #[test]
    fn date_key_order_matches_date_order() {
        let dates = [
            day(2024, 1, 9),
            day(2024, 1, 10),
            day(2024, 2, 1),
            day(2024, 10, 1),
            day(2024, 12, 31),
        ];
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(date_key(pair[0]) < date_key(pair[1]));
        }
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-05-01 is a Wednesday; its week starts 2024-04-28.
        assert_eq!(start_of_week(day(2024, 5, 1)), day(2024, 4, 28));
        // A Sunday is its own week start.
        assert_eq!(start_of_week(day(2024, 4, 28)), day(2024, 4, 28));
        // A Saturday still belongs to the preceding Sunday.
        assert_eq!(start_of_week(day(2024, 5, 4)), day(2024, 4, 28));
    }

    #[test]
    fn week_dates_are_seven_consecutive_days() {
        let week = week_dates(day(2024, 5, 1));
        assert_eq!(week[0], day(2024, 4, 28));
        assert_eq!(week[6], day(2024, 5, 4));
        for pair in week.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().expect("next day"));
        }
    }

    #[test]
    fn month_start_resets_the_day() {
        assert_eq!(month_start(day(2024, 5, 17)), day(2024, 5, 1));
        assert_eq!(month_start(day(2024, 5, 1)), day(2024, 5, 1));
    }

    #[test]
    fn date_args_accept_keys_and_aliases() {
        let today = day(2024, 5, 1);
        assert_eq!(parse_date_arg("2024-05-03", today).expect("key"), day(2024, 5, 3));
        assert_eq!(parse_date_arg("today", today).expect("alias"), today);
        assert_eq!(parse_date_arg("yesterday", today).expect("alias"), day(2024, 4, 30));
        assert_eq!(parse_date_arg("Tomorrow", today).expect("alias"), day(2024, 5, 2));
        assert!(parse_date_arg("05/01/2024", today).is_err());
    }
}
