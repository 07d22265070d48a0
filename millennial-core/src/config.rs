//! Calendar options.
//!
//! Options deserialize from TOML with every field optional; missing fields
//! fall back to the defaults below. [`CalendarOptions::validate`] runs when a
//! controller is constructed, so a bad file surfaces as a configuration error
//! instead of a half-working calendar.

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date::{self, CalendarDate};
use crate::error::{CalendarError, CalendarResult};

pub const DEFAULT_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_FIRST_DAY_OF_WEEK: u8 = 7;
/// Upper bound on `months_to_display`: one year side by side.
pub const MAX_MONTHS_TO_DISPLAY: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    /// strftime format used to parse text input and format values.
    pub format: String,

    /// 1 = Monday ... 7 = Sunday
    pub first_day_of_week: u8,

    pub multiselect: bool,

    /// Whether user actions may leave the selection empty.
    pub allow_empty: bool,

    pub months_to_display: u32,

    /// Dates disabled at construction, written in `format`.
    pub disabled_dates: Vec<String>,

    /// Earliest selectable day, written in `format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,

    /// Latest selectable day, written in `format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    /// Allow selecting and previewing ranges from the last selected day.
    pub range_selection: bool,

    /// Select today when the calendar is created.
    pub select_today: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            format: DEFAULT_FORMAT.to_string(),
            first_day_of_week: DEFAULT_FIRST_DAY_OF_WEEK,
            multiselect: true,
            allow_empty: false,
            months_to_display: 1,
            disabled_dates: Vec::new(),
            min: None,
            max: None,
            range_selection: true,
            select_today: true,
        }
    }
}

impl CalendarOptions {
    pub fn from_toml(content: &str) -> CalendarResult<Self> {
        toml::from_str(content).map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// Load options from a TOML file, or defaults when it doesn't exist.
    pub fn load(path: &Path) -> CalendarResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> CalendarResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn validate(&self) -> CalendarResult<()> {
        date::validate_format(&self.format)?;

        if !(1..=MAX_MONTHS_TO_DISPLAY).contains(&self.months_to_display) {
            return Err(CalendarError::Config(format!(
                "months_to_display must be between 1 and {MAX_MONTHS_TO_DISPLAY}, got {}",
                self.months_to_display
            )));
        }

        if date::weekday_from_number(self.first_day_of_week).is_none() {
            return Err(CalendarError::Config(format!(
                "first_day_of_week must be between 1 (Monday) and 7 (Sunday), got {}",
                self.first_day_of_week
            )));
        }

        if let (Some(min), Some(max)) = self.bounds()? {
            if min > max {
                return Err(CalendarError::Config(format!(
                    "min ({min}) is after max ({max})"
                )));
            }
        }

        self.parsed_disabled_dates().map(|_| ())
    }

    pub fn first_weekday(&self) -> Weekday {
        date::weekday_from_number(self.first_day_of_week).unwrap_or(Weekday::Sun)
    }

    pub fn bounds(&self) -> CalendarResult<(Option<CalendarDate>, Option<CalendarDate>)> {
        let min = self.min.as_deref().map(|s| self.parse(s)).transpose()?;
        let max = self.max.as_deref().map(|s| self.parse(s)).transpose()?;
        Ok((min, max))
    }

    pub fn parsed_disabled_dates(&self) -> CalendarResult<Vec<CalendarDate>> {
        self.disabled_dates.iter().map(|s| self.parse(s)).collect()
    }

    fn parse(&self, text: &str) -> CalendarResult<CalendarDate> {
        date::normalize(text, &self.format)
    }
}
