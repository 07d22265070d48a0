//! Year and month quick-navigation pickers.
//!
//! Both pickers only hold view state. The controller owns them, decides
//! which one is visible through [`PickerState`] and re-centers them on its
//! current period whenever one is reopened.

use std::ops::RangeInclusive;

use chrono::Month;
use serde::Serialize;

/// Years shown on each side of the pivot, per displayed month.
pub const YEARS_PER_MONTH_DISPLAYED: i32 = 8;

/// Which overlay, if any, covers the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerState {
    #[default]
    Idle,
    YearPicking,
    MonthPicking,
}

/// A page of years centered on the picked year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPicker {
    year: i32,
    start: i32,
    end: i32,
    offset: i32,
}

impl YearPicker {
    pub fn new(months_to_display: u32, year: i32) -> Self {
        let months = i32::try_from(months_to_display).unwrap_or(i32::MAX / YEARS_PER_MONTH_DISPLAYED);
        let mut picker = YearPicker {
            year,
            start: year,
            end: year,
            offset: YEARS_PER_MONTH_DISPLAYED.saturating_mul(months.max(1)),
        };
        picker.set_year(year);
        picker
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Years on each side of the pivot; one page is twice this.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
        self.start = year.saturating_sub(self.offset);
        self.end = year.saturating_add(self.offset).saturating_sub(1);
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Show the page right after the current one.
    pub fn next(&mut self) {
        self.set_year(self.end.saturating_add(self.offset).saturating_add(1));
    }

    /// Show the page right before the current one.
    pub fn prev(&mut self) {
        self.set_year(self.start.saturating_sub(self.offset));
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// The twelve fixed months and the one last picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthPicker {
    month: Option<u32>,
}

impl MonthPicker {
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn set_month(&mut self, month: u32) {
        self.month = Some(month);
    }

    /// `(number, name)` for January through December.
    pub fn months() -> impl Iterator<Item = (u32, &'static str)> {
        (1u8..=12).filter_map(|n| Month::try_from(n).ok().map(|m| (u32::from(n), m.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_window_size_scales_with_months() {
        let single = YearPicker::new(1, 2021);
        assert_eq!(single.range(), 2013..=2028);
        assert_eq!(single.range().count(), 16);

        let triple = YearPicker::new(3, 2021);
        assert_eq!(triple.offset(), 24);
        assert_eq!(triple.range().count(), 48);
    }

    #[test]
    fn test_year_pages_are_contiguous() {
        let mut picker = YearPicker::new(1, 2021);

        picker.next();
        assert_eq!(picker.range(), 2029..=2044);

        picker.prev();
        assert_eq!(picker.range(), 2013..=2028);

        picker.prev();
        assert_eq!(picker.range(), 1997..=2012);
        assert_eq!(picker.label(), "1997 - 2012");
    }

    #[test]
    fn test_month_names() {
        let months: Vec<_> = MonthPicker::months().collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], (1, "January"));
        assert_eq!(months[11], (12, "December"));
    }

    #[test]
    fn test_month_picker_remembers_choice() {
        let mut picker = MonthPicker::default();
        assert_eq!(picker.month(), None);
        picker.set_month(4);
        assert_eq!(picker.month(), Some(4));
    }
}
