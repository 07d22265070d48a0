//! The calendar state machine.
//!
//! `CalendarController` owns the displayed period, the selection, the
//! disabled days and both quick pickers. Every mutation goes through it, and
//! every mutation that can change what a cell looks like re-derives the flags
//! of the whole rendered grid.

use chrono::Weekday;
use serde::Serialize;

use crate::config::CalendarOptions;
use crate::date::{self, CalendarDate, DateInput};
use crate::disabled::DisabledSet;
use crate::error::{CalendarError, CalendarResult};
use crate::grid::{self, Edge, GridCell, MonthGrid};
use crate::hooks::{self, GridVisitor, Listeners};
use crate::picker::{MonthPicker, PickerState, YearPicker};
use crate::range::{self, RangeHighlight};
use crate::selection::{SelectionSet, Values};

/// The span of days currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    /// First day of the first displayed month.
    pub start: CalendarDate,
    /// Last day of the last displayed month.
    pub end: CalendarDate,
}

impl Period {
    /// The months from `date`'s month on. Fails when the last of them lies
    /// past the supported date range.
    pub fn new(date: CalendarDate, months_to_display: u32) -> CalendarResult<Self> {
        let start = date.first_of_month();
        let span = i32::try_from(months_to_display.saturating_sub(1)).unwrap_or(i32::MAX);
        let end = start
            .add_months(span)
            .ok_or(CalendarError::OutOfRange {
                year: start.year(),
                month: start.month(),
            })?
            .last_of_month();
        Ok(Period { start, end })
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// First day of each displayed month.
    pub fn months(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        std::iter::successors(Some(self.start), |m| m.add_months(1))
            .take_while(|m| *m <= self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderLabel {
    pub month: &'static str,
    pub year: i32,
}

impl From<CalendarDate> for HeaderLabel {
    fn from(date: CalendarDate) -> Self {
        HeaderLabel {
            month: date.month_name(),
            year: date.year(),
        }
    }
}

/// Month/year shown above the grid. `end` is only set when more than one
/// month is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub start: HeaderLabel,
    pub end: Option<HeaderLabel>,
}

pub struct CalendarController {
    options: CalendarOptions,
    first_day: Weekday,
    today: CalendarDate,
    period: Period,
    months: Vec<MonthGrid>,
    selection: SelectionSet,
    disabled: DisabledSet,
    hover: Option<RangeHighlight>,
    state: PickerState,
    year_picker: YearPicker,
    month_picker: MonthPicker,
    listeners: Listeners,
}

impl CalendarController {
    pub fn new(options: CalendarOptions) -> CalendarResult<Self> {
        Self::with_today(options, CalendarDate::today())
    }

    /// Build a controller that treats `today` as the current day.
    ///
    /// Disables the configured days, selects today when asked to, and
    /// renders today's month.
    pub fn with_today(options: CalendarOptions, today: CalendarDate) -> CalendarResult<Self> {
        options.validate()?;

        let (min, max) = options.bounds()?;
        let initially_disabled = options.parsed_disabled_dates()?;
        let period = Period::new(today, options.months_to_display)?;

        let mut controller = CalendarController {
            first_day: options.first_weekday(),
            selection: SelectionSet::new(options.multiselect, options.allow_empty),
            disabled: DisabledSet::with_bounds(min, max),
            year_picker: YearPicker::new(options.months_to_display, period.start.year()),
            month_picker: MonthPicker::default(),
            state: PickerState::Idle,
            hover: None,
            months: Vec::new(),
            listeners: Listeners::default(),
            today,
            period,
            options,
        };

        for date in initially_disabled {
            controller.disabled.disable(date, &mut controller.selection);
        }
        if controller.options.select_today {
            controller.selection.select(today, &controller.disabled);
        }
        controller.months = build_months(&period, controller.first_day)?;
        controller.classify();

        log::debug!(
            "calendar ready: {} month(s) from {}, {} selected",
            controller.options.months_to_display,
            controller.period.start,
            controller.selection.len()
        );

        Ok(controller)
    }

    // ACCESSORS:

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn months(&self) -> &[MonthGrid] {
        &self.months
    }

    /// All rendered cells in display order, months concatenated.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.months.iter().flat_map(|m| m.cells.iter())
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn disabled(&self) -> &DisabledSet {
        &self.disabled
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn year_picker(&self) -> &YearPicker {
        &self.year_picker
    }

    pub fn month_picker(&self) -> &MonthPicker {
        &self.month_picker
    }

    pub fn range_highlight(&self) -> Option<RangeHighlight> {
        self.hover
    }

    pub fn header(&self) -> Header {
        Header {
            start: self.period.start.into(),
            end: (self.options.months_to_display > 1).then(|| self.period.end.into()),
        }
    }

    pub fn weekday_header(&self) -> [Weekday; 7] {
        grid::weekday_header(self.first_day)
    }

    pub fn normalize(&self, input: impl Into<DateInput>) -> CalendarResult<CalendarDate> {
        date::normalize(input, &self.options.format)
    }

    // NAVIGATION:

    /// Display the period starting at the month of `date`. Months whose
    /// weeks run past the supported date range are refused and the current
    /// period stays.
    pub fn render(&mut self, date: impl Into<DateInput>) -> CalendarResult<()> {
        let date = self.normalize(date)?;
        self.show(date)
    }

    /// Next month, or the next picker page. Stays put at the end of the
    /// supported range.
    pub fn next(&mut self) {
        match self.state {
            PickerState::Idle => self.step_months(1),
            PickerState::YearPicking => self.year_picker.next(),
            PickerState::MonthPicking => self.shift_picked_year(1),
        }
    }

    pub fn prev(&mut self) {
        match self.state {
            PickerState::Idle => self.step_months(-1),
            PickerState::YearPicking => self.year_picker.prev(),
            PickerState::MonthPicking => self.shift_picked_year(-1),
        }
    }

    /// Back to today's month, or re-center an open picker on the period.
    pub fn home(&mut self) {
        match self.state {
            PickerState::Idle => {
                if let Err(e) = self.show(self.today) {
                    log::warn!("cannot go home: {e}");
                }
            }
            PickerState::YearPicking | PickerState::MonthPicking => {
                self.year_picker.set_year(self.period.start.year())
            }
        }
    }

    /// Wheel navigation: scrolling up goes back, scrolling down goes forward.
    pub fn scroll(&mut self, delta: i32) {
        if delta > 0 {
            self.prev();
        } else {
            self.next();
        }
    }

    // SELECTION:

    pub fn select(&mut self, date: impl Into<DateInput>) -> CalendarResult<()> {
        let date = self.normalize(date)?;
        let changed = self.selection.select(date, &self.disabled);
        self.selection_changed(changed);
        Ok(())
    }

    pub fn select_range(
        &mut self,
        anchor: impl Into<DateInput>,
        date: impl Into<DateInput>,
    ) -> CalendarResult<()> {
        let anchor = self.normalize(anchor)?;
        let date = self.normalize(date)?;
        let changed = self.selection.select_range(anchor, date, &self.disabled);
        self.selection_changed(changed);
        Ok(())
    }

    pub fn unselect(&mut self, date: impl Into<DateInput>) -> CalendarResult<()> {
        let date = self.normalize(date)?;
        let changed = self.selection.unselect(date);
        self.selection_changed(changed);
        Ok(())
    }

    /// Flip `date`, or select the range from `anchor` when one is given and
    /// range selection is enabled.
    pub fn toggle(
        &mut self,
        date: impl Into<DateInput>,
        anchor: Option<CalendarDate>,
    ) -> CalendarResult<()> {
        let date = self.normalize(date)?;
        let anchor = anchor.filter(|_| self.options.range_selection);
        let changed = self.selection.toggle(date, anchor, &self.disabled);
        self.selection_changed(changed);
        Ok(())
    }

    /// A click on a day. With `extend` (shift held) the range from the last
    /// selected day is selected instead.
    pub fn activate(&mut self, date: impl Into<DateInput>, extend: bool) -> CalendarResult<()> {
        let anchor = if extend {
            self.selection.last_selected()
        } else {
            None
        };
        self.toggle(date, anchor)
    }

    pub fn clear_selection(&mut self) {
        let changed = self.selection.clear();
        self.selection_changed(changed);
    }

    pub fn disable(&mut self, date: impl Into<DateInput>) -> CalendarResult<()> {
        let date = self.normalize(date)?;
        let was_selected = self.selection.contains(date);

        self.disabled.disable(date, &mut self.selection);
        self.classify();

        if was_selected {
            self.notify_select();
        }
        Ok(())
    }

    pub fn is_selected(&self, date: impl Into<DateInput>) -> CalendarResult<bool> {
        Ok(self.selection.contains(self.normalize(date)?))
    }

    pub fn is_disabled(&self, date: impl Into<DateInput>) -> CalendarResult<bool> {
        Ok(self.disabled.is_disabled(self.normalize(date)?))
    }

    pub fn is_today(&self, date: impl Into<DateInput>) -> CalendarResult<bool> {
        Ok(self.normalize(date)? == self.today)
    }

    pub fn values(&self) -> Values<CalendarDate> {
        self.selection.values()
    }

    pub fn formatted_values(&self) -> Values<String> {
        self.selection.formatted_values(&self.options.format)
    }

    // RANGE PREVIEW:

    /// Pointer over `date`. With `extend` held and a pivot selected, preview
    /// the range from the pivot; otherwise drop any preview.
    pub fn hover(&mut self, date: impl Into<DateInput>, extend: bool) -> CalendarResult<()> {
        let date = self.normalize(date)?;

        self.hover = match self.selection.last_selected() {
            Some(pivot) if extend && self.options.range_selection => {
                Some(RangeHighlight::new(pivot, date))
            }
            _ => None,
        };
        self.refresh_hover();
        Ok(())
    }

    /// Pointer left the grid.
    pub fn leave(&mut self) {
        self.hover = None;
        self.refresh_hover();
    }

    // PICKERS:

    pub fn open_year_picker(&mut self) {
        self.year_picker.set_year(self.period.start.year());
        self.state = PickerState::YearPicking;
        log::debug!("year picker open: {}", self.year_picker.label());
    }

    pub fn open_month_picker(&mut self) {
        self.year_picker.set_year(self.period.start.year());
        self.state = PickerState::MonthPicking;
        log::debug!("month picker open for {}", self.year_picker.year());
    }

    pub fn close_picker(&mut self) {
        self.state = PickerState::Idle;
    }

    pub fn toggle_year_picker(&mut self) {
        if self.state == PickerState::YearPicking {
            self.close_picker();
        } else {
            self.open_year_picker();
        }
    }

    pub fn toggle_month_picker(&mut self) {
        if self.state == PickerState::MonthPicking {
            self.close_picker();
        } else {
            self.open_month_picker();
        }
    }

    /// Jump to `year` and continue with the month picker.
    pub fn select_year(&mut self, year: i32) -> CalendarResult<()> {
        let month = self.picked_month();
        let date = CalendarDate::from_ymd(year, month, 1)?;

        self.show(date)?;
        self.year_picker.set_year(year);
        self.state = PickerState::MonthPicking;
        Ok(())
    }

    /// Jump to `month` of the picked year and close the picker.
    pub fn select_month(&mut self, month: u32) -> CalendarResult<()> {
        let date = CalendarDate::from_ymd(self.year_picker.year(), month, 1)?;

        self.show(date)?;
        self.month_picker.set_month(month);
        self.state = PickerState::Idle;
        Ok(())
    }

    /// Whether `year` is the one the year picker highlights.
    pub fn is_picked_year(&self, year: i32) -> bool {
        year == self.period.start.year()
    }

    // HOOKS:

    pub fn visit(&self, visitor: &mut dyn GridVisitor) {
        hooks::visit(&self.months, visitor);
    }

    /// Called with the full selection after every change to it.
    pub fn on_select(&mut self, listener: impl FnMut(&[CalendarDate]) + 'static) {
        self.listeners.on_select.push(Box::new(listener));
    }

    /// Called with the new period after every render.
    pub fn on_period_change(&mut self, listener: impl FnMut(&Period) + 'static) {
        self.listeners.on_period_change.push(Box::new(listener));
    }

    // INTERNALS:

    fn picked_month(&self) -> u32 {
        self.month_picker
            .month()
            .unwrap_or_else(|| self.period.start.month())
    }

    fn step_months(&mut self, delta: i32) {
        let moved = self
            .period
            .start
            .add_months(delta)
            .ok_or(CalendarError::OutOfRange {
                year: self.period.start.year(),
                month: self.period.start.month(),
            })
            .and_then(|date| self.show(date));

        if let Err(e) = moved {
            log::warn!("cannot move calendar: {e}");
        }
    }

    fn shift_picked_year(&mut self, delta: i32) {
        let year = self.year_picker.year().saturating_add(delta);
        let moved =
            CalendarDate::from_ymd(year, self.picked_month(), 1).and_then(|date| self.show(date));

        match moved {
            Ok(()) => self.year_picker.set_year(year),
            Err(e) => log::warn!("cannot move month picker: {e}"),
        }
    }

    /// Switch to the period starting at `date`'s month. Nothing changes when
    /// any of its months cannot be laid out.
    fn show(&mut self, date: CalendarDate) -> CalendarResult<()> {
        let period = Period::new(date, self.options.months_to_display)?;
        let months = build_months(&period, self.first_day)?;

        log::debug!("render {} .. {}", period.start, period.end);
        self.period = period;
        self.months = months;
        self.classify();

        for listener in &mut self.listeners.on_period_change {
            listener(&period);
        }
        Ok(())
    }

    /// Re-derive every cell flag from the current sets.
    fn classify(&mut self) {
        let today = self.today;
        let selection = &self.selection;
        let disabled = &self.disabled;

        for cell in self.months.iter_mut().flat_map(|m| m.cells.iter_mut()) {
            cell.is_today = cell.date == today;
            cell.is_disabled = disabled.is_disabled(cell.date);
            cell.is_selected = selection.contains(cell.date);
        }

        grid::mark_runs(
            self.months.iter_mut().flat_map(|m| m.cells.iter_mut()),
            is_selected,
            selection_edge,
        );
        self.refresh_hover();
    }

    fn refresh_hover(&mut self) {
        let cells = self.months.iter_mut().flat_map(|m| m.cells.iter_mut());
        match self.hover {
            Some(highlight) => highlight.apply(cells),
            None => range::clear(cells),
        }
    }

    fn selection_changed(&mut self, changed: bool) {
        if changed {
            self.classify();
            self.notify_select();
        }
    }

    fn notify_select(&mut self) {
        let dates = self.selection.dates();
        for listener in &mut self.listeners.on_select {
            listener(dates);
        }
    }
}

fn build_months(period: &Period, first_day: Weekday) -> CalendarResult<Vec<MonthGrid>> {
    period
        .months()
        .map(|month| grid::build_month(month, first_day))
        .collect()
}

fn is_selected(cell: &GridCell) -> bool {
    cell.is_selected
}

fn selection_edge(cell: &mut GridCell) -> &mut Edge {
    &mut cell.selection_edge
}
