//! Line-driven calendar session.
//!
//! Each stdin line is one interaction (a navigation click, a day click, a
//! hover, a picker choice). The calendar is redrawn after every line that
//! changes what is shown.

use std::io::BufRead;

use anyhow::{Result, bail};
use millennial_core::CalendarController;
use owo_colors::OwoColorize;

use super::CalendarArgs;
use crate::render::render_calendar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Prev,
    Home,
    Scroll(i32),
    Select(String),
    Range(String),
    Unselect(String),
    Click { date: String, shift: bool },
    Hover { date: String, shift: bool },
    Leave,
    Disable(String),
    Clear,
    Years,
    Months,
    Year(i32),
    Month(u32),
    Value,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines and `#` comments give `None`.
    ///
    /// Dates are everything after the command word, so formats with spaces
    /// ("%B %d %Y") work.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let date = || -> Result<String> {
            if rest.is_empty() {
                bail!("'{word}' needs a date");
            }
            Ok(rest.to_string())
        };

        let command = match word {
            "next" => SessionCommand::Next,
            "prev" => SessionCommand::Prev,
            "home" => SessionCommand::Home,
            "scroll" => SessionCommand::Scroll(rest.parse()?),
            "select" => SessionCommand::Select(date()?),
            "range" => SessionCommand::Range(date()?),
            "unselect" => SessionCommand::Unselect(date()?),
            "click" => SessionCommand::Click { date: date()?, shift: false },
            "shift-click" => SessionCommand::Click { date: date()?, shift: true },
            "hover" => SessionCommand::Hover { date: date()?, shift: false },
            "shift-hover" => SessionCommand::Hover { date: date()?, shift: true },
            "leave" => SessionCommand::Leave,
            "disable" => SessionCommand::Disable(date()?),
            "clear" => SessionCommand::Clear,
            "years" => SessionCommand::Years,
            "months" => SessionCommand::Months,
            "year" => SessionCommand::Year(rest.parse()?),
            "month" => SessionCommand::Month(rest.parse()?),
            "value" => SessionCommand::Value,
            "quit" | "exit" => SessionCommand::Quit,
            other => bail!("Unknown command '{other}'"),
        };

        Ok(Some(command))
    }

    /// Apply to the calendar. Returns false once the session should end.
    pub fn apply(&self, calendar: &mut CalendarController) -> Result<bool> {
        match self {
            SessionCommand::Next => calendar.next(),
            SessionCommand::Prev => calendar.prev(),
            SessionCommand::Home => calendar.home(),
            SessionCommand::Scroll(delta) => calendar.scroll(*delta),
            SessionCommand::Select(date) => calendar.select(date.as_str())?,
            SessionCommand::Range(date) => {
                let Some(pivot) = calendar.selection().last_selected() else {
                    bail!("Nothing selected to extend a range from");
                };
                calendar.select_range(pivot, date.as_str())?;
            }
            SessionCommand::Unselect(date) => calendar.unselect(date.as_str())?,
            SessionCommand::Click { date, shift } => calendar.activate(date.as_str(), *shift)?,
            SessionCommand::Hover { date, shift } => calendar.hover(date.as_str(), *shift)?,
            SessionCommand::Leave => calendar.leave(),
            SessionCommand::Disable(date) => calendar.disable(date.as_str())?,
            SessionCommand::Clear => calendar.clear_selection(),
            SessionCommand::Years => calendar.toggle_year_picker(),
            SessionCommand::Months => calendar.toggle_month_picker(),
            SessionCommand::Year(year) => calendar.select_year(*year)?,
            SessionCommand::Month(month) => calendar.select_month(*month)?,
            SessionCommand::Value => {
                println!("{}", serde_json::to_string(&calendar.formatted_values())?);
            }
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn redraws(&self) -> bool {
        !matches!(self, SessionCommand::Value | SessionCommand::Quit)
    }
}

pub fn run(args: CalendarArgs) -> Result<()> {
    let mut calendar = args.open()?;

    calendar.on_select(|dates| log::info!("selection changed: {} day(s)", dates.len()));
    calendar.on_period_change(|period| log::info!("showing {} .. {}", period.start, period.end));

    println!("{}", render_calendar(&calendar));

    for line in std::io::stdin().lock().lines() {
        let line = line?;

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        match command.apply(&mut calendar) {
            Ok(false) => break,
            Ok(true) if command.redraws() => println!("\n{}", render_calendar(&calendar)),
            Ok(true) => {}
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    Ok(())
}
