//! Terminal rendering for millennial-core types.
//!
//! Cell flags map to owo_colors styles here; the core never knows how a
//! selected or disabled day looks.

use chrono::Weekday;
use millennial_core::{CalendarController, GridCell, GridVisitor, Header, MonthGrid, PickerState};
use owo_colors::{OwoColorize, Style};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Header {
    fn render(&self) -> String {
        let start = format!("{} {}", self.start.month, self.start.year);
        match self.end {
            Some(end) => format!("{} - {} {}", start.bold(), end.month.bold(), end.year.bold()),
            None => start.bold().to_string(),
        }
    }
}

impl Render for GridCell {
    fn render(&self) -> String {
        let mut style = Style::new();
        if !self.in_displayed_month() {
            style = style.dimmed();
        }
        if self.is_disabled {
            style = style.dimmed().strikethrough();
        }
        if self.is_range_over {
            style = style.yellow();
        }
        if self.is_selected {
            style = style.green().reversed();
        }
        if self.is_today {
            style = style.bold().underline();
        }

        let (open, close) = markers(self);
        format!("{open}{}{close}", format!("{:>2}", self.date.day()).style(style))
    }
}

/// Brackets around selection runs, angles around the range preview.
fn markers(cell: &GridCell) -> (char, char) {
    let open = if cell.selection_edge.first {
        '['
    } else if cell.range_edge.first {
        '<'
    } else {
        ' '
    };
    let close = if cell.selection_edge.last {
        ']'
    } else if cell.range_edge.last {
        '>'
    } else {
        ' '
    };
    (open, close)
}

/// Two-letter weekday column titles.
fn weekday_titles(weekdays: &[Weekday; 7]) -> String {
    weekdays
        .iter()
        .map(|w| format!(" {} ", &w.to_string()[..2]))
        .collect()
}

/// Collects the lines of the month grid while the controller walks it.
pub struct TerminalGrid {
    weekdays: [Weekday; 7],
    titled: bool,
    lines: Vec<String>,
    row: String,
}

impl TerminalGrid {
    pub fn new(weekdays: [Weekday; 7], titled: bool) -> Self {
        TerminalGrid {
            weekdays,
            titled,
            lines: Vec::new(),
            row: String::new(),
        }
    }

    fn flush_row(&mut self) {
        if !self.row.is_empty() {
            self.lines.push(std::mem::take(&mut self.row));
        }
    }

    pub fn into_lines(mut self) -> Vec<String> {
        self.flush_row();
        self.lines
    }
}

impl GridVisitor for TerminalGrid {
    fn month(&mut self, month: &MonthGrid) {
        if self.titled {
            let title = format!("{} {}", month.month.month_name(), month.month.year());
            self.lines.push(title.bold().to_string());
        }
        self.lines.push(weekday_titles(&self.weekdays).dimmed().to_string());
    }

    fn week(&mut self, _week: &[GridCell]) {
        self.flush_row();
    }

    fn day(&mut self, cell: &GridCell) {
        self.row.push_str(&cell.render());
    }

    fn end_month(&mut self, _month: &MonthGrid) {
        self.flush_row();
        self.lines.push(String::new());
    }
}

/// Everything the calendar currently shows: header, then either the grid
/// or the open picker.
pub fn render_calendar(calendar: &CalendarController) -> String {
    let mut lines = vec![calendar.header().render(), String::new()];

    match calendar.state() {
        PickerState::Idle => {
            let mut grid = TerminalGrid::new(
                calendar.weekday_header(),
                calendar.options().months_to_display > 1,
            );
            calendar.visit(&mut grid);
            lines.extend(grid.into_lines());
        }
        PickerState::YearPicking => lines.extend(render_year_picker(calendar)),
        PickerState::MonthPicking => lines.extend(render_month_picker(calendar)),
    }

    lines.join("\n")
}

const PICKER_COLUMNS: usize = 4;

fn render_year_picker(calendar: &CalendarController) -> Vec<String> {
    let picker = calendar.year_picker();
    let years: Vec<String> = picker
        .range()
        .map(|year| {
            let label = format!(" {year:>5} ");
            if calendar.is_picked_year(year) {
                label.reversed().to_string()
            } else {
                label
            }
        })
        .collect();

    let mut lines = vec![picker.label().dimmed().to_string()];
    lines.extend(years.chunks(PICKER_COLUMNS).map(|row| row.concat()));
    lines
}

fn render_month_picker(calendar: &CalendarController) -> Vec<String> {
    let picked = calendar
        .month_picker()
        .month()
        .unwrap_or_else(|| calendar.period().start.month());

    let months: Vec<String> = millennial_core::picker::MonthPicker::months()
        .map(|(number, name)| {
            let label = format!(" {:<4}", &name[..3]);
            if number == picked {
                label.reversed().to_string()
            } else {
                label
            }
        })
        .collect();

    let mut lines = vec![calendar.year_picker().year().to_string().dimmed().to_string()];
    lines.extend(months.chunks(PICKER_COLUMNS).map(|row| row.concat()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use millennial_core::{CalendarDate, CalendarOptions};

    fn calendar(options: CalendarOptions) -> CalendarController {
        let today = CalendarDate::from_ymd(2021, 2, 10).unwrap();
        CalendarController::with_today(options, today).unwrap()
    }

    #[test]
    fn test_grid_has_header_and_one_line_per_week() {
        let cal = calendar(CalendarOptions {
            first_day_of_week: 1,
            ..Default::default()
        });
        let mut grid = TerminalGrid::new(cal.weekday_header(), false);
        cal.visit(&mut grid);
        let lines = grid.into_lines();

        // weekday titles + 4 weeks + trailing blank line
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Mo"));
        assert!(lines[1].contains(" 1"));
    }

    #[test]
    fn test_selected_run_is_bracketed() {
        let mut cal = calendar(CalendarOptions {
            select_today: false,
            ..Default::default()
        });
        cal.select_range("2021-02-08", "2021-02-09").unwrap();

        let first = cal.cells().find(|c| c.date.day() == 8 && c.in_displayed_month()).unwrap();
        let last = cal.cells().find(|c| c.date.day() == 9 && c.in_displayed_month()).unwrap();
        assert_eq!(markers(first), ('[', ' '));
        assert_eq!(markers(last), (' ', ']'));
    }

    #[test]
    fn test_year_picker_lists_window() {
        let mut cal = calendar(CalendarOptions::default());
        cal.open_year_picker();

        let text = render_calendar(&cal);
        assert!(text.contains("2013 - 2028"));
        assert!(text.contains("2028"));
    }

    #[test]
    fn test_multi_month_titles() {
        let cal = calendar(CalendarOptions {
            months_to_display: 2,
            ..Default::default()
        });
        let text = render_calendar(&cal);
        assert!(text.contains("March 2021"));
    }
}
