//! Load/play statistics and the date handling behind the by-date endpoint.

use chrono::{DateTime, Month, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, WistiaError};
use crate::hydrate::{assign, assign_opt, Hydrate};

/// Format used by the by-date endpoint for `start_date` / `end_date`.
const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Viewing statistics for an account, project or media.
///
/// Used as-is for all-time figures; [`DailyStats`] and [`MonthlyStats`]
/// wrap it for a single day or a calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Number of times a page with the media embedded was loaded.
    pub load_count: u64,
    /// Number of times the media was played.
    pub play_count: u64,
    /// Total hours of media watched.
    pub hours_watched: f64,
}

impl Stats {
    /// Build stats from a decoded API object.
    pub fn from_data(data: &serde_json::Map<String, Value>) -> Self {
        let mut stats = Self::default();
        stats.hydrate(data);
        stats
    }

    /// Plays divided by loads, or `None` when nothing was loaded.
    pub fn play_rate(&self) -> Option<f64> {
        if self.load_count == 0 {
            None
        } else {
            Some(self.play_count as f64 / self.load_count as f64)
        }
    }
}

impl Hydrate for Stats {
    fn apply_field(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "load_count" => assign(&mut self.load_count, key, value),
            "play_count" => assign(&mut self.play_count, key, value),
            "hours_watched" => assign(&mut self.hours_watched, key, value),
            _ => false,
        }
    }
}

/// Statistics for a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyStats {
    /// The day these figures cover, as reported by the API.
    pub date: Option<String>,
    #[serde(flatten)]
    pub stats: Stats,
}

impl DailyStats {
    /// Build daily stats from one element of the by-date array.
    pub fn from_data(data: &serde_json::Map<String, Value>) -> Self {
        let mut daily = Self::default();
        daily.hydrate(data);
        daily
    }
}

impl Hydrate for DailyStats {
    fn apply_field(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "date" => assign_opt(&mut self.date, key, value),
            _ => self.stats.apply_field(key, value),
        }
    }
}

/// Statistics summed over a calendar month.
///
/// The API only reports per-day or all-time figures, so monthly numbers are
/// built by folding the days of the month with [`MonthlyStats::add_day`].
/// `month` and `year` always come from the caller, never from the days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    month: u32,
    year: i32,
    #[serde(flatten)]
    pub stats: Stats,
}

impl MonthlyStats {
    /// Empty totals for `month` (1-12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`WistiaError::InvalidDate`] if the month is out of range.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        first_day_of_month(month, year)?;
        Ok(Self {
            month,
            year,
            stats: Stats::default(),
        })
    }

    /// Add one day's figures to the running totals.
    pub fn add_day(&mut self, day: &DailyStats) {
        self.stats.load_count += day.stats.load_count;
        self.stats.play_count += day.stats.play_count;
        self.stats.hours_watched += day.stats.hours_watched;
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// English month name, e.g. "February".
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name())
    }

    /// First calendar day covered.
    pub fn first_day(&self) -> NaiveDate {
        // month validated in `new`
        first_day_of_month(self.month, self.year).unwrap_or_default()
    }

    /// Last calendar day covered.
    pub fn last_day(&self) -> NaiveDate {
        last_day_of_month(self.month, self.year).unwrap_or_default()
    }

    /// Covered range as `MM/DD/YYYY-MM/DD/YYYY`.
    pub fn range_label(&self) -> String {
        format!(
            "{}-{}",
            self.first_day().format("%m/%d/%Y"),
            self.last_day().format("%m/%d/%Y")
        )
    }
}

/// A day given in any of the forms the stats calls accept.
///
/// Everything converts into a single calendar day via [`DateInput::to_day`]:
///
/// ```
/// use chrono::NaiveDate;
/// use wistia::DateInput;
///
/// let day = NaiveDate::from_ymd_opt(2012, 10, 12).unwrap();
/// assert_eq!(DateInput::from("2012-10-12").to_day().unwrap(), day);
/// assert_eq!(DateInput::from(1_350_000_000_i64).to_day().unwrap(), day);
/// assert_eq!(DateInput::from(day).to_day().unwrap(), day);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// An already-resolved calendar day.
    Day(NaiveDate),
    /// Text such as `2012-10-12`, `20121012`, `2012/10/12`,
    /// `2012-10-12 08:00:00`, an RFC 3339 timestamp, or a string of Unix
    /// seconds. Exactly eight digits always read as `YYYYMMDD`.
    Text(String),
    /// Unix timestamp in seconds, read as UTC.
    Timestamp(i64),
}

impl DateInput {
    /// Normalize to a calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`WistiaError::InvalidDate`] if the input is not a date.
    pub fn to_day(&self) -> Result<NaiveDate> {
        match self {
            DateInput::Day(day) => Ok(*day),
            DateInput::Timestamp(secs) => day_from_timestamp(*secs),
            DateInput::Text(text) => parse_day(text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(day: NaiveDate) -> Self {
        DateInput::Day(day)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::Day(dt.date())
    }
}

/// The day is taken in the value's own time zone.
impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::Day(dt.date_naive())
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<i64> for DateInput {
    fn from(secs: i64) -> Self {
        DateInput::Timestamp(secs)
    }
}

fn day_from_timestamp(secs: i64) -> Result<NaiveDate> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| WistiaError::InvalidDate(format!("timestamp {secs} out of range")))
}

fn parse_day(text: &str) -> Result<NaiveDate> {
    let text = text.trim();

    // Eight digits is a compact `YYYYMMDD` date, never Unix seconds
    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(text, "%Y%m%d")
            .map_err(|_| WistiaError::InvalidDate(text.to_string()));
    }
    if let Ok(secs) = text.parse::<i64>() {
        return day_from_timestamp(secs);
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, API_DATE_FORMAT) {
        return Ok(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt.date());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y/%m/%d") {
        return Ok(day);
    }

    Err(WistiaError::InvalidDate(text.to_string()))
}

fn first_day_of_month(month: u32, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| WistiaError::InvalidDate(format!("month {month} of year {year}")))
}

/// Last calendar day of `month` in `year`, leap years included.
pub fn last_day_of_month(month: u32, year: i32) -> Result<NaiveDate> {
    first_day_of_month(month, year)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_day_of_month(next_month, next_year)?
        .pred_opt()
        .ok_or_else(|| WistiaError::InvalidDate(format!("month {month} of year {year}")))
}

/// Number of days in `month` of `year`.
pub fn days_in_month(month: u32, year: i32) -> Result<u32> {
    use chrono::Datelike;
    Ok(last_day_of_month(month, year)?.day())
}

/// Query for `stats/account/by_date.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByDateQuery {
    pub start_date: String,
    pub end_date: String,
}

impl ByDateQuery {
    /// Inclusive range from `start` to `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: start.format(API_DATE_FORMAT).to_string(),
            end_date: end.format(API_DATE_FORMAT).to_string(),
        }
    }

    /// A single day: `start_date == end_date`.
    pub fn for_day(date: impl Into<DateInput>) -> Result<Self> {
        let day = date.into().to_day()?;
        Ok(Self::new(day, day))
    }

    /// Every day of `month` in `year`.
    pub fn for_month(month: u32, year: i32) -> Result<Self> {
        Ok(Self::new(
            first_day_of_month(month, year)?,
            last_day_of_month(month, year)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stats_hydrate_ignores_extra_fields() {
        let data = json!({
            "load_count": 10,
            "play_count": 4,
            "hours_watched": 1.5,
            "number_of_videos": 99
        });
        let stats = Stats::from_data(data.as_object().unwrap());
        assert_eq!(
            stats,
            Stats {
                load_count: 10,
                play_count: 4,
                hours_watched: 1.5
            }
        );
    }

    #[test]
    fn test_hours_watched_accepts_integer() {
        let stats = Stats::from_data(json!({ "hours_watched": 3 }).as_object().unwrap());
        assert_eq!(stats.hours_watched, 3.0);
    }

    #[test]
    fn test_daily_stats_reads_date_and_totals() {
        let data = json!({ "date": "2012-02-03", "load_count": 2, "play_count": 1, "hours_watched": 0.25 });
        let daily = DailyStats::from_data(data.as_object().unwrap());
        assert_eq!(daily.date.as_deref(), Some("2012-02-03"));
        assert_eq!(daily.stats.load_count, 2);
        assert_eq!(daily.stats.play_count, 1);
    }

    #[test]
    fn test_monthly_fold_sums_every_day() {
        let days = days_in_month(2, 2012).unwrap();
        let mut monthly = MonthlyStats::new(2, 2012).unwrap();
        for d in 1..=days {
            monthly.add_day(&DailyStats {
                date: Some(format!("1999-01-{d:02}")),
                stats: Stats {
                    load_count: 1,
                    play_count: 1,
                    hours_watched: 0.5,
                },
            });
        }
        assert_eq!(monthly.stats.load_count, 29);
        assert_eq!(monthly.stats.play_count, 29);
        assert_eq!(monthly.stats.hours_watched, 14.5);
        assert_eq!(monthly.month(), 2);
        assert_eq!(monthly.year(), 2012);
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2, 2012).unwrap(), 29);
        assert_eq!(days_in_month(2, 2013).unwrap(), 28);
        assert_eq!(days_in_month(2, 1900).unwrap(), 28);
        assert_eq!(days_in_month(2, 2000).unwrap(), 29);
        assert_eq!(days_in_month(12, 2012).unwrap(), 31);
        assert_eq!(days_in_month(4, 2012).unwrap(), 30);
        assert!(days_in_month(13, 2012).is_err());
        assert!(days_in_month(0, 2012).is_err());
    }

    #[test]
    fn test_month_name_and_range_label() {
        let monthly = MonthlyStats::new(1, 2012).unwrap();
        assert_eq!(monthly.month_name(), "January");
        assert_eq!(monthly.range_label(), "01/01/2012-01/31/2012");
        assert!(MonthlyStats::new(13, 2012).is_err());
    }

    #[test]
    fn test_date_forms_resolve_to_same_query() {
        let expected = ByDateQuery {
            start_date: "2012-10-12".to_string(),
            end_date: "2012-10-12".to_string(),
        };

        // 2012-10-12 00:00:00 UTC
        assert_eq!(ByDateQuery::for_day(1_350_000_000_i64).unwrap(), expected);
        assert_eq!(ByDateQuery::for_day("2012-10-12").unwrap(), expected);
        assert_eq!(ByDateQuery::for_day(day(2012, 10, 12)).unwrap(), expected);
        assert_eq!(
            ByDateQuery::for_day(Utc.with_ymd_and_hms(2012, 10, 12, 18, 30, 0).unwrap()).unwrap(),
            expected
        );
    }

    #[test]
    fn test_text_formats() {
        let expected = day(2012, 10, 12);
        for text in [
            "2012-10-12",
            " 2012-10-12 ",
            "2012/10/12",
            "2012-10-12 08:15:00",
            "2012-10-12T08:15:00",
            "2012-10-12T08:15:00+02:00",
            "1350043200",
            "20121012",
        ] {
            assert_eq!(DateInput::from(text).to_day().unwrap(), expected, "{text}");
        }
        assert!(DateInput::from("yesterday").to_day().is_err());
    }

    #[test]
    fn test_compact_digits_are_dates_not_seconds() {
        assert!(DateInput::from("20121399").to_day().is_err());
        // Shorter digit strings are still seconds
        assert_eq!(DateInput::from("86400").to_day().unwrap(), day(1970, 1, 2));
    }

    #[test]
    fn test_datetime_uses_its_own_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2012-10-12 20:00 UTC is already the 13th in UTC+9
        let dt = Utc
            .with_ymd_and_hms(2012, 10, 12, 20, 0, 0)
            .unwrap()
            .with_timezone(&offset);
        assert_eq!(DateInput::from(dt).to_day().unwrap(), day(2012, 10, 13));
    }

    #[test]
    fn test_month_query_covers_whole_month() {
        let query = ByDateQuery::for_month(2, 2012).unwrap();
        assert_eq!(query.start_date, "2012-02-01");
        assert_eq!(query.end_date, "2012-02-29");
    }

    #[test]
    fn test_play_rate() {
        assert_eq!(Stats::default().play_rate(), None);
        let stats = Stats {
            load_count: 4,
            play_count: 1,
            hours_watched: 0.0,
        };
        assert_eq!(stats.play_rate(), Some(0.25));
    }
}
