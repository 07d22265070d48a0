//! Days that can never be selected.

use std::collections::BTreeSet;

use crate::date::CalendarDate;
use crate::selection::SelectionSet;

/// Explicitly disabled days plus optional inclusive `min`/`max` bounds.
#[derive(Debug, Clone, Default)]
pub struct DisabledSet {
    dates: BTreeSet<CalendarDate>,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

impl DisabledSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything before `min` or after `max` counts as disabled.
    pub fn with_bounds(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        DisabledSet {
            dates: BTreeSet::new(),
            min,
            max,
        }
    }

    /// Disable `date` and drop it from `selection`. A disabled day never
    /// stays selected, even when it is the only selection left.
    pub fn disable(&mut self, date: CalendarDate, selection: &mut SelectionSet) -> bool {
        let inserted = self.dates.insert(date);
        if inserted {
            log::trace!("disable {date}");
        }
        selection.force_remove(date);
        inserted
    }

    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        self.dates.contains(&date) || self.is_out_of_bounds(date)
    }

    pub fn is_out_of_bounds(&self, date: CalendarDate) -> bool {
        self.min.is_some_and(|min| date < min) || self.max.is_some_and(|max| date > max)
    }

    pub fn bounds(&self) -> (Option<CalendarDate>, Option<CalendarDate>) {
        (self.min, self.max)
    }

    /// Explicitly disabled days in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &CalendarDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
