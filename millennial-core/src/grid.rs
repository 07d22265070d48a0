//! Month grid layout.
//!
//! [`build_month`] lays out one month as whole weeks: it backs up from the
//! first of the month to the most recent `first_day_of_week`, then walks
//! forward day by day until the month is done and the week is
//! complete. The output is therefore always a multiple of 7.
//!
//! Cells come out of the builder unclassified. The controller fills in the
//! today/disabled/selected/range flags from its own state, so those flags are
//! always derived and never stored anywhere else.

use chrono::Weekday;
use serde::Serialize;

use crate::date::CalendarDate;
use crate::error::{CalendarError, CalendarResult};

pub const DAYS_PER_WEEK: usize = 7;

/// Where a cell sits relative to the month being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthPosition {
    Previous,
    Current,
    Next,
}

/// First/last markers of a highlighted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Edge {
    pub first: bool,
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: CalendarDate,
    pub position: MonthPosition,
    pub is_today: bool,
    pub is_disabled: bool,
    pub is_selected: bool,
    pub selection_edge: Edge,
    pub is_range_over: bool,
    pub range_edge: Edge,
}

impl GridCell {
    fn new(date: CalendarDate, position: MonthPosition) -> Self {
        GridCell {
            date,
            position,
            is_today: false,
            is_disabled: false,
            is_selected: false,
            selection_edge: Edge::default(),
            is_range_over: false,
            range_edge: Edge::default(),
        }
    }

    pub fn in_displayed_month(&self) -> bool {
        self.position == MonthPosition::Current
    }
}

/// One rendered month: its first day and its cells, whole weeks only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: CalendarDate,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn leading_padding(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| c.position == MonthPosition::Previous)
            .count()
    }

    pub fn trailing_padding(&self) -> usize {
        self.cells
            .iter()
            .rev()
            .take_while(|c| c.position == MonthPosition::Next)
            .count()
    }
}

/// Number of days to back up from `first` to reach `first_day_of_week`.
pub fn leading_days(first: CalendarDate, first_day_of_week: Weekday) -> u32 {
    let from = first.weekday().num_days_from_monday();
    let to = first_day_of_week.num_days_from_monday();
    (from + 7 - to) % 7
}

/// Lay out the month containing `month` as whole weeks starting on
/// `first_day_of_week`.
///
/// Fails with [`CalendarError::OutOfRange`] when the padding weeks of the
/// month would need days before `NaiveDate::MIN` or after `NaiveDate::MAX`.
pub fn build_month(month: CalendarDate, first_day_of_week: Weekday) -> CalendarResult<MonthGrid> {
    let first = month.first_of_month();
    let last = month.last_of_month();
    let out_of_range = || CalendarError::OutOfRange {
        year: first.year(),
        month: first.month(),
    };

    let mut cursor = first
        .add_days(-i64::from(leading_days(first, first_day_of_week)))
        .ok_or_else(out_of_range)?;
    let mut cells = Vec::with_capacity(6 * DAYS_PER_WEEK);

    loop {
        cells.push(GridCell::new(cursor, position(cursor, first)));
        if cursor >= last && cursor.weekday().succ() == first_day_of_week {
            break;
        }
        cursor = cursor.add_days(1).ok_or_else(out_of_range)?;
    }

    Ok(MonthGrid { month: first, cells })
}

fn position(date: CalendarDate, month: CalendarDate) -> MonthPosition {
    match (date.year(), date.month()).cmp(&(month.year(), month.month())) {
        std::cmp::Ordering::Less => MonthPosition::Previous,
        std::cmp::Ordering::Equal => MonthPosition::Current,
        std::cmp::Ordering::Greater => MonthPosition::Next,
    }
}

/// The seven weekdays in display order.
pub fn weekday_header(first_day_of_week: Weekday) -> [Weekday; 7] {
    let mut days = [first_day_of_week; 7];
    for i in 1..7 {
        days[i] = days[i - 1].succ();
    }
    days
}

/// Mark the first and last cell of every contiguous run of members, in the
/// order the cells are given.
pub(crate) fn mark_runs<'a>(
    cells: impl Iterator<Item = &'a mut GridCell>,
    is_member: fn(&GridCell) -> bool,
    edge: fn(&mut GridCell) -> &mut Edge,
) {
    let mut cells: Vec<&mut GridCell> = cells.collect();

    for i in 0..cells.len() {
        let inside = is_member(&*cells[i]);
        let prev = i > 0 && is_member(&*cells[i - 1]);
        let next = i + 1 < cells.len() && is_member(&*cells[i + 1]);

        *edge(&mut *cells[i]) = Edge {
            first: inside && !prev,
            last: inside && !next,
        };
    }
}
