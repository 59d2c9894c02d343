use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Earliest and latest years accepted from the query string.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Aggregation granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

/// A calendar month, always holding a month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether the year is one the query string accepts.
    pub fn in_range(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.year)
    }

    /// Plain rollover arithmetic; may step outside `MIN_YEAR..=MAX_YEAR`, see [`Self::in_range`].
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month is always in 1..=12")
    }

    pub fn days(&self) -> u32 {
        (self.next().first_day() - self.first_day()).num_days() as u32
    }

    /// `YYYY-MM-` prefix shared by every ISO date in this month.
    pub fn date_prefix(&self) -> String {
        format!("{:04}-{:02}-", self.year, self.month)
    }

    /// Weeks of the month starting on Monday; `None` marks days of the neighbouring months.
    pub fn grid(&self) -> Vec<[Option<u32>; 7]> {
        let mut weeks = Vec::with_capacity(6);
        let mut week = [None; 7];
        let mut slot = self.first_day().weekday().num_days_from_monday() as usize;

        for day in 1..=self.days() {
            week[slot] = Some(day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        weeks
    }
}

/// `YYYY-` prefix shared by every ISO date in `year`.
pub fn year_prefix(year: i32) -> String {
    format!("{:04}-", year)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday through Sunday of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// Strict `YYYY-MM-DD`; rejects unpadded or out-of-range components.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    (date.format("%Y-%m-%d").to_string() == raw).then_some(date)
}

/// Period selector as it arrives on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    pub period: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

impl CalendarQuery {
    /// Resolve to a period and reference date.
    ///
    /// Missing, unparsable or out-of-range parts fall back to `today`; an unknown
    /// period falls back to the month view.
    pub fn resolve(&self, today: NaiveDate) -> (Period, NaiveDate) {
        match self.period.as_deref().map(str::trim) {
            Some("today") | Some("day") => (Period::Day, today),
            Some("tomorrow") => (Period::Day, today + Duration::days(1)),
            Some("week") => (Period::Week, self.reference_date(today)),
            Some("year") => (Period::Year, self.reference_date(today)),
            Some("month") | None => (Period::Month, self.reference_date(today)),
            Some(other) => {
                tracing::debug!("Unknown calendar period {:?}, showing month", other);
                (Period::Month, self.reference_date(today))
            }
        }
    }

    fn reference_date(&self, today: NaiveDate) -> NaiveDate {
        let year = parse_part(&self.year)
            .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
            .unwrap_or(today.year());
        let month = parse_part(&self.month)
            .and_then(|month| u32::try_from(month).ok())
            .filter(|month| (1..=12).contains(month))
            .unwrap_or(today.month());
        let year_month = YearMonth::new(year, month).unwrap_or_else(|| YearMonth::of(today));

        let day = parse_part(&self.day)
            .and_then(|day| u32::try_from(day).ok())
            .filter(|day| (1..=year_month.days()).contains(day))
            .unwrap_or_else(|| today.day().min(year_month.days()));

        year_month
            .first_day()
            .with_day(day)
            .unwrap_or_else(|| year_month.first_day())
    }
}

fn parse_part(raw: &Option<String>) -> Option<i32> {
    raw.as_deref()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_iso_date(raw).unwrap()
    }

    #[test]
    fn month_rollover_at_year_boundaries() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.prev(), YearMonth::new(2023, 12).unwrap());

        let december = YearMonth::new(2024, 12).unwrap();
        assert_eq!(december.next(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn next_undoes_prev_for_every_month() {
        for year in [1999, 2000, 2023, 2024] {
            for month in 1..=12 {
                let ym = YearMonth::new(year, month).unwrap();
                assert_eq!(ym.prev().next(), ym);
                assert_eq!(ym.next().prev(), ym);
            }
        }
    }

    #[test]
    fn rollover_past_the_supported_years_is_out_of_range() {
        assert!(!YearMonth::new(MAX_YEAR, 12).unwrap().next().in_range());
        assert!(!YearMonth::new(MIN_YEAR, 1).unwrap().prev().in_range());
        assert!(YearMonth::new(MAX_YEAR, 11).unwrap().next().in_range());
    }

    #[test]
    fn rejects_invalid_year_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
        assert!(YearMonth::new(0, 5).is_none());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days(), 28);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days(), 31);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days(), 30);
    }

    #[test]
    fn grid_starts_on_monday() {
        // March 2024 starts on a Friday and ends on a Sunday.
        let grid = YearMonth::new(2024, 3).unwrap().grid();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], [None, None, None, None, Some(1), Some(2), Some(3)]);
        assert_eq!(grid[4], [Some(25), Some(26), Some(27), Some(28), Some(29), Some(30), Some(31)]);

        // April 2024 starts on a Monday and spills into a fifth week.
        let grid = YearMonth::new(2024, 4).unwrap().grid();
        assert_eq!(grid[0][0], Some(1));
        assert_eq!(grid[4], [Some(29), Some(30), None, None, None, None, None]);

        let days: Vec<u32> = grid.iter().flatten().flatten().copied().collect();
        assert_eq!(days, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn week_of_christmas_2024() {
        let week = week_dates(date("2024-12-25"));
        assert_eq!(week[0], date("2024-12-23"));
        assert_eq!(week[6], date("2024-12-29"));
    }

    #[test]
    fn week_start_of_monday_and_sunday() {
        assert_eq!(week_start(date("2024-12-23")), date("2024-12-23"));
        assert_eq!(week_start(date("2024-12-29")), date("2024-12-23"));
        assert_eq!(week_start(date("2025-01-01")), date("2024-12-30"));
    }

    #[test]
    fn parse_iso_date_is_strict() {
        assert!(parse_iso_date("2024-03-31").is_some());
        assert!(parse_iso_date("2024-3-31").is_none());
        assert!(parse_iso_date("2024-02-30").is_none());
        assert!(parse_iso_date("31.03.2024").is_none());
        assert!(parse_iso_date("").is_none());
    }

    #[test]
    fn query_falls_back_to_today() {
        let today = date("2024-06-15");
        let query = CalendarQuery {
            period: Some("month".into()),
            year: Some("abc".into()),
            month: Some("13".into()),
            day: None,
        };
        assert_eq!(query.resolve(today), (Period::Month, today));
    }

    #[test]
    fn query_clamps_day_to_month_length() {
        let today = date("2024-01-31");
        let query = CalendarQuery {
            period: Some("week".into()),
            year: Some("2024".into()),
            month: Some("2".into()),
            day: None,
        };
        assert_eq!(query.resolve(today), (Period::Week, date("2024-02-29")));
    }

    #[test]
    fn query_today_and_tomorrow_ignore_year_month() {
        let today = date("2024-12-31");
        let mut query = CalendarQuery {
            period: Some("tomorrow".into()),
            year: Some("1999".into()),
            month: Some("5".into()),
            day: None,
        };
        assert_eq!(query.resolve(today), (Period::Day, date("2025-01-01")));

        query.period = Some("today".into());
        assert_eq!(query.resolve(today), (Period::Day, today));
    }
}
