pub mod config;
pub mod session;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use millennial_core::{CalendarController, CalendarOptions};

/// Calendar flags shared by every command that opens a calendar.
#[derive(Args, Debug, Default)]
pub struct CalendarArgs {
    /// Read options from this file instead of ~/.config/millennial/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Month to open on (in the configured format); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Number of months shown side by side (1-12)
    #[arg(short, long)]
    pub months: Option<u32>,

    /// First column of the grid, 1 = Monday ... 7 = Sunday
    #[arg(long)]
    pub first_day: Option<u8>,

    /// strftime format for typed dates and printed values
    #[arg(long)]
    pub format: Option<String>,

    /// Only one day may be selected at a time
    #[arg(long)]
    pub single: bool,

    /// Let the selection become empty
    #[arg(long)]
    pub allow_empty: bool,

    /// Don't select today on startup
    #[arg(long)]
    pub no_today: bool,

    /// Days to select after startup (repeatable)
    #[arg(long = "select")]
    pub selected: Vec<String>,

    /// Days to disable after startup (repeatable)
    #[arg(long = "disable")]
    pub disabled: Vec<String>,
}

impl CalendarArgs {
    /// Config file values with the flags given on the command line on top.
    pub fn options(&self) -> Result<CalendarOptions> {
        let mut options = crate::config::load_options(self.config.as_deref())?;

        if let Some(months) = self.months {
            options.months_to_display = months;
        }
        if let Some(first_day) = self.first_day {
            options.first_day_of_week = first_day;
        }
        if let Some(format) = &self.format {
            options.format = format.clone();
        }
        if self.single {
            options.multiselect = false;
        }
        if self.allow_empty {
            options.allow_empty = true;
        }
        if self.no_today {
            options.select_today = false;
        }

        Ok(options)
    }

    /// Build the controller and apply the startup date, disables and selections.
    pub fn open(&self) -> Result<CalendarController> {
        let mut calendar = CalendarController::new(self.options()?)?;
        self.apply(&mut calendar)?;
        Ok(calendar)
    }

    pub fn apply(&self, calendar: &mut CalendarController) -> Result<()> {
        for date in &self.disabled {
            calendar.disable(date.as_str())?;
        }
        for date in &self.selected {
            calendar.select(date.as_str())?;
        }
        if let Some(date) = &self.date {
            calendar.render(date.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use millennial_core::{CalendarDate, Values};

    fn missing_config() -> Option<PathBuf> {
        Some(std::env::temp_dir().join("millennial-no-such-config.toml"))
    }

    #[test]
    fn test_flags_override_file() {
        let args = CalendarArgs {
            config: missing_config(),
            months: Some(2),
            first_day: Some(1),
            single: true,
            no_today: true,
            ..Default::default()
        };

        let options = args.options().unwrap();
        assert_eq!(options.months_to_display, 2);
        assert_eq!(options.first_day_of_week, 1);
        assert!(!options.multiselect);
        assert!(!options.select_today);
    }

    #[test]
    fn test_apply_startup_state() {
        let args = CalendarArgs {
            config: missing_config(),
            date: Some("2030-05-17".into()),
            selected: vec!["2021-02-03".into(), "2021-02-04".into()],
            disabled: vec!["2021-02-04".into()],
            no_today: true,
            ..Default::default()
        };
        let today = CalendarDate::from_ymd(2021, 2, 10).unwrap();
        let mut calendar = CalendarController::with_today(args.options().unwrap(), today).unwrap();

        args.apply(&mut calendar).unwrap();

        assert_eq!(
            calendar.values(),
            Values::Multiple(vec![CalendarDate::from_ymd(2021, 2, 3).unwrap()])
        );
        assert_eq!(calendar.period().start, CalendarDate::from_ymd(2030, 5, 1).unwrap());
    }

    #[test]
    fn test_apply_rejects_bad_date() {
        let args = CalendarArgs {
            config: missing_config(),
            selected: vec!["tomorrow".into()],
            ..Default::default()
        };
        let mut calendar = CalendarController::new(args.options().unwrap()).unwrap();
        assert!(args.apply(&mut calendar).is_err());
    }
}
