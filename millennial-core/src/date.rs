//! Calendar-day values and the date arithmetic the grid and selection need.
//!
//! Every date that enters the calendar goes through [`normalize`], which
//! accepts chrono values, structured `(year, month, day)` parts, or text
//! parsed against the configured strftime format. The result is a
//! [`CalendarDate`]: a plain calendar day with no time-of-day or offset, so
//! equality and ordering are by `(year, month, day)` only.

use std::fmt::{self, Write};

use chrono::{DateTime, Datelike, Days, Local, Month, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// A calendar day, normalized to the start of the day in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or(CalendarError::InvalidDate { year, month, day })
    }

    /// The current day in the local zone.
    pub fn today() -> Self {
        CalendarDate(Local::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Full English month name, e.g. "February".
    pub fn month_name(&self) -> &'static str {
        Month::try_from(self.0.month() as u8)
            .map(|m| m.name())
            .unwrap_or("")
    }

    pub fn first_of_month(&self) -> Self {
        CalendarDate(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn last_of_month(&self) -> Self {
        let next_month = match self.month() {
            12 => None,
            month => NaiveDate::from_ymd_opt(self.year(), month + 1, 1),
        };
        let last = match next_month.and_then(|first| first.pred_opt()) {
            Some(last) => last,
            None => self.0.with_day(31).unwrap_or(self.0),
        };
        CalendarDate(last)
    }

    /// Shift by whole days. `None` past the ends of the supported range.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted.map(CalendarDate)
    }

    /// Shift by whole months. A day that does not exist in the target month
    /// is clamped to that month's last day (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map(CalendarDate)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_between(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn same_month(&self, other: CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    /// Format with a strftime string. Falls back to ISO 8601 when the format
    /// asks for fields a calendar day does not have.
    pub fn format(&self, format: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.0.format(format)).is_err() {
            return self.0.to_string();
        }
        out
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

/// Anything that can be normalized into a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Local(DateTime<Local>),
    Parts { year: i32, month: u32, day: u32 },
    Text(String),
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        DateInput::Date(date.0)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        DateInput::DateTime(datetime)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(datetime: DateTime<Tz>) -> Self {
        DateInput::Local(datetime.with_timezone(&Local))
    }
}

impl From<(i32, u32, u32)> for DateInput {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        DateInput::Parts { year, month, day }
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

/// Truncate any supported input to its calendar day.
///
/// Text is parsed with `format`; a format that also carries time fields is
/// accepted and the time part discarded.
pub fn normalize(input: impl Into<DateInput>, format: &str) -> CalendarResult<CalendarDate> {
    match input.into() {
        DateInput::Date(date) => Ok(CalendarDate(date)),
        DateInput::DateTime(datetime) => Ok(CalendarDate(datetime.date())),
        DateInput::Local(datetime) => Ok(CalendarDate(datetime.date_naive())),
        DateInput::Parts { year, month, day } => CalendarDate::from_ymd(year, month, day),
        DateInput::Text(text) => parse(&text, format),
    }
}

fn parse(text: &str, format: &str) -> CalendarResult<CalendarDate> {
    let trimmed = text.trim();

    NaiveDate::parse_from_str(trimmed, format)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, format).map(|dt| dt.date()))
        .map(CalendarDate)
        .map_err(|_| CalendarError::Parse {
            input: text.to_string(),
            format: format.to_string(),
        })
}

/// Check that `format` can both print and read back a calendar day.
pub fn validate_format(format: &str) -> CalendarResult<()> {
    if format.trim().is_empty() {
        return Err(CalendarError::Config("date format must not be empty".into()));
    }

    let sample = CalendarDate(NaiveDate::from_ymd_opt(2021, 2, 3).unwrap_or_default());
    let mut printed = String::new();
    if write!(printed, "{}", sample.0.format(format)).is_err() {
        return Err(CalendarError::Config(format!(
            "date format '{format}' uses fields a calendar day does not have"
        )));
    }

    match parse(&printed, format) {
        Ok(parsed) if parsed == sample => Ok(()),
        _ => Err(CalendarError::Config(format!(
            "date format '{format}' does not identify a single calendar day"
        ))),
    }
}

/// Weekday from its ISO number (1 = Monday ... 7 = Sunday).
pub fn weekday_from_number(number: u8) -> Option<Weekday> {
    number
        .checked_sub(1)
        .and_then(|n| Weekday::try_from(n).ok())
}
