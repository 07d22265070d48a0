//! Ordered set of selected days.

use std::collections::HashSet;

use serde::Serialize;

use crate::date::CalendarDate;
use crate::disabled::DisabledSet;

/// Selection as handed to callers: a single optional value when
/// multiselect is off, the whole ordered sequence otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Values<T> {
    Single(Option<T>),
    Multiple(Vec<T>),
}

impl<T> Values<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Values::Single(value) => value.into_iter().collect(),
            Values::Multiple(values) => values,
        }
    }
}

/// Selected days in selection order, without duplicates.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    dates: Vec<CalendarDate>,
    members: HashSet<CalendarDate>,
    last_selected: Option<CalendarDate>,
    multiselect: bool,
    allow_empty: bool,
}

impl SelectionSet {
    pub fn new(multiselect: bool, allow_empty: bool) -> Self {
        SelectionSet {
            dates: Vec::new(),
            members: HashSet::new(),
            last_selected: None,
            multiselect,
            allow_empty,
        }
    }

    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.members.contains(&date)
    }

    /// Pivot for range selection and hover previews. Always a selected day:
    /// when the pivot is removed it falls back to the newest remaining one.
    pub fn last_selected(&self) -> Option<CalendarDate> {
        self.last_selected
    }

    /// Returns true when the selection changed.
    pub fn select(&mut self, date: CalendarDate, disabled: &DisabledSet) -> bool {
        if disabled.is_disabled(date) || self.contains(date) {
            return false;
        }

        if !self.multiselect {
            self.dates.clear();
            self.members.clear();
        }

        log::trace!("select {date}");
        self.dates.push(date);
        self.members.insert(date);
        self.last_selected = Some(date);
        true
    }

    /// Select every day from `anchor` to `date` inclusive, walking towards
    /// `date`. Disabled days are stepped over, not selected.
    pub fn select_range(
        &mut self,
        anchor: CalendarDate,
        date: CalendarDate,
        disabled: &DisabledSet,
    ) -> bool {
        let step = if anchor <= date { 1 } else { -1 };
        let mut cursor = anchor;
        let mut changed = false;

        loop {
            changed |= self.select(cursor, disabled);
            if cursor == date {
                break;
            }
            match cursor.add_days(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        changed
    }

    /// Remove `date` unless it is the last selection and empty selections
    /// are not allowed.
    pub fn unselect(&mut self, date: CalendarDate) -> bool {
        if !self.allow_empty && self.dates.len() == 1 {
            return false;
        }
        self.remove(date)
    }

    /// Remove `date` regardless of the empty-selection guard.
    pub fn force_remove(&mut self, date: CalendarDate) -> bool {
        self.remove(date)
    }

    fn remove(&mut self, date: CalendarDate) -> bool {
        if !self.members.remove(&date) {
            return false;
        }

        log::trace!("unselect {date}");
        self.dates.retain(|d| *d != date);
        self.repair_pivot();
        true
    }

    /// Drop the oldest selections down to the minimum the policy allows.
    pub fn clear(&mut self) -> bool {
        let minimum = if self.allow_empty { 0 } else { 1 };
        let excess = self.dates.len().saturating_sub(minimum);
        if excess == 0 {
            return false;
        }

        for date in self.dates.drain(..excess) {
            self.members.remove(&date);
        }
        log::trace!("cleared {excess} selected day(s)");
        self.repair_pivot();
        true
    }

    fn repair_pivot(&mut self) {
        if self.last_selected.is_some_and(|pivot| !self.members.contains(&pivot)) {
            self.last_selected = self.dates.last().copied();
        }
    }

    /// Range-select from `anchor` when given, otherwise flip `date`.
    pub fn toggle(
        &mut self,
        date: CalendarDate,
        anchor: Option<CalendarDate>,
        disabled: &DisabledSet,
    ) -> bool {
        match anchor {
            Some(anchor) => self.select_range(anchor, date, disabled),
            None if self.contains(date) => self.unselect(date),
            None => self.select(date, disabled),
        }
    }

    pub fn values(&self) -> Values<CalendarDate> {
        self.shape(self.dates.clone())
    }

    pub fn formatted_values(&self, format: &str) -> Values<String> {
        self.shape(self.dates.iter().map(|d| d.format(format)).collect())
    }

    fn shape<T>(&self, mut values: Vec<T>) -> Values<T> {
        if self.multiselect {
            Values::Multiple(values)
        } else {
            Values::Single(values.pop())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_select_ignores_duplicates() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);

        assert!(selection.select(date(2021, 1, 5), &disabled));
        assert!(!selection.select(date(2021, 1, 5), &disabled));
        assert!(selection.select(date(2021, 1, 3), &disabled));

        assert_eq!(selection.dates(), &[date(2021, 1, 5), date(2021, 1, 3)]);
        assert_eq!(selection.last_selected(), Some(date(2021, 1, 3)));
    }

    #[test]
    fn test_single_select_replaces() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(false, false);

        selection.select(date(2021, 1, 5), &disabled);
        selection.select(date(2021, 1, 10), &disabled);

        assert_eq!(selection.values(), Values::Single(Some(date(2021, 1, 10))));
    }

    #[test]
    fn test_select_skips_disabled() {
        let mut disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, true);
        disabled.disable(date(2021, 1, 5), &mut selection);

        assert!(!selection.select(date(2021, 1, 5), &disabled));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_unselect_keeps_last_when_empty_not_allowed() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);
        selection.select(date(2021, 1, 1), &disabled);

        assert!(!selection.unselect(date(2021, 1, 1)));
        assert_eq!(selection.values(), Values::Multiple(vec![date(2021, 1, 1)]));
    }

    #[test]
    fn test_unselect_allows_empty_when_configured() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, true);
        selection.select(date(2021, 1, 1), &disabled);

        assert!(selection.unselect(date(2021, 1, 1)));
        assert!(selection.is_empty());
        assert_eq!(selection.last_selected(), None);
    }

    #[test]
    fn test_select_range_backwards_steps_over_disabled() {
        let mut disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);
        disabled.disable(date(2021, 1, 3), &mut selection);

        selection.select_range(date(2021, 1, 5), date(2021, 1, 1), &disabled);

        assert_eq!(
            selection.dates(),
            &[
                date(2021, 1, 5),
                date(2021, 1, 4),
                date(2021, 1, 2),
                date(2021, 1, 1)
            ]
        );
        assert!(!selection.contains(date(2021, 1, 3)));
        assert_eq!(selection.last_selected(), Some(date(2021, 1, 1)));
    }

    #[test]
    fn test_select_range_across_month_boundary() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);

        selection.select_range(date(2021, 1, 30), date(2021, 2, 2), &disabled);

        assert_eq!(selection.len(), 4);
        assert!(selection.contains(date(2021, 1, 31)));
        assert!(selection.contains(date(2021, 2, 1)));
    }

    #[test]
    fn test_select_range_single_mode_keeps_one() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(false, false);

        selection.select_range(date(2021, 1, 1), date(2021, 1, 4), &disabled);

        assert_eq!(selection.values(), Values::Single(Some(date(2021, 1, 4))));
    }

    #[test]
    fn test_clear_respects_minimum() {
        let disabled = DisabledSet::new();

        let mut strict = SelectionSet::new(true, false);
        strict.select_range(date(2021, 1, 1), date(2021, 1, 3), &disabled);
        assert!(strict.clear());
        assert_eq!(strict.dates(), &[date(2021, 1, 3)]);

        let mut lenient = SelectionSet::new(true, true);
        lenient.select_range(date(2021, 1, 1), date(2021, 1, 3), &disabled);
        assert!(lenient.clear());
        assert!(lenient.is_empty());
    }

    #[test]
    fn test_pivot_falls_back_to_newest_remaining() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, true);
        selection.select(date(2021, 1, 1), &disabled);
        selection.select(date(2021, 1, 9), &disabled);
        selection.select(date(2021, 1, 5), &disabled);

        selection.unselect(date(2021, 1, 5));
        assert_eq!(selection.last_selected(), Some(date(2021, 1, 9)));

        // Removing a day that is not the pivot leaves it alone.
        selection.unselect(date(2021, 1, 1));
        assert_eq!(selection.last_selected(), Some(date(2021, 1, 9)));

        selection.select(date(2021, 1, 2), &disabled);
        selection.force_remove(date(2021, 1, 2));
        assert_eq!(selection.last_selected(), Some(date(2021, 1, 9)));
    }

    #[test]
    fn test_clear_moves_pivot_to_kept_day() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);
        selection.select(date(2021, 1, 4), &disabled);
        selection.select(date(2021, 1, 2), &disabled);
        selection.unselect(date(2021, 1, 4));
        selection.select(date(2021, 1, 4), &disabled);
        selection.select(date(2021, 1, 1), &disabled);
        selection.unselect(date(2021, 1, 1));

        // Order is [2, 4]; the pivot fell back to 4 and survives the clear.
        assert!(selection.clear());
        assert_eq!(selection.dates(), &[date(2021, 1, 4)]);
        assert_eq!(selection.last_selected(), Some(date(2021, 1, 4)));
        assert!(!selection.clear());
    }

    #[test]
    fn test_select_range_over_decades() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);

        selection.select_range(date(1980, 1, 1), date(2029, 12, 31), &disabled);

        assert_eq!(selection.len(), 18_263);
        assert!(selection.contains(date(2000, 2, 29)));
        assert_eq!(selection.last_selected(), Some(date(2029, 12, 31)));
    }

    #[test]
    fn test_select_range_up_to_last_representable_day() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);
        let max = CalendarDate::from(chrono::NaiveDate::MAX);
        let start = max.add_days(-2).unwrap();

        selection.select_range(start, max, &disabled);

        assert_eq!(selection.len(), 3);
        assert_eq!(selection.last_selected(), Some(max));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, true);

        selection.toggle(date(2021, 1, 1), None, &disabled);
        assert!(selection.contains(date(2021, 1, 1)));

        selection.toggle(date(2021, 1, 1), None, &disabled);
        assert!(!selection.contains(date(2021, 1, 1)));
    }

    #[test]
    fn test_toggle_with_anchor_always_selects() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, true);
        selection.select(date(2021, 1, 3), &disabled);

        selection.toggle(date(2021, 1, 3), Some(date(2021, 1, 1)), &disabled);

        assert_eq!(selection.len(), 3);
        assert!(selection.contains(date(2021, 1, 3)));
    }

    #[test]
    fn test_formatted_values() {
        let disabled = DisabledSet::new();
        let mut selection = SelectionSet::new(true, false);
        selection.select(date(2021, 2, 3), &disabled);
        selection.select(date(2021, 2, 1), &disabled);

        assert_eq!(
            selection.formatted_values("%d/%m/%Y"),
            Values::Multiple(vec!["03/02/2021".to_string(), "01/02/2021".to_string()])
        );

        let empty = SelectionSet::new(false, true);
        assert_eq!(empty.formatted_values("%Y-%m-%d"), Values::Single(None));
    }

    #[test]
    fn test_random_operation_sequences_keep_invariants() {
        let disabled = DisabledSet::new();
        let days: Vec<CalendarDate> = (1..=6).map(|d| date(2021, 3, d)).collect();

        for multiselect in [true, false] {
            for allow_empty in [true, false] {
                let mut selection = SelectionSet::new(multiselect, allow_empty);
                let mut ever_selected = false;

                // Deterministic pseudo-random walk over select/unselect/clear/range.
                let mut seed: u32 = 17;
                for _ in 0..200 {
                    seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    let day = days[(seed >> 8) as usize % days.len()];
                    let other = days[(seed >> 16) as usize % days.len()];
                    match (seed >> 4) % 4 {
                        0 => ever_selected |= selection.select(day, &disabled),
                        1 => {
                            selection.unselect(day);
                        }
                        2 => {
                            selection.clear();
                        }
                        _ => ever_selected |= selection.select_range(other, day, &disabled),
                    }

                    let values = selection.values().into_vec();
                    let mut unique = values.clone();
                    unique.sort();
                    unique.dedup();
                    assert_eq!(unique.len(), values.len(), "duplicates in {values:?}");

                    if !multiselect {
                        assert!(values.len() <= 1);
                    }
                    match selection.last_selected() {
                        Some(pivot) => assert!(selection.contains(pivot)),
                        None => assert!(values.is_empty()),
                    }
                    if !allow_empty && ever_selected {
                        assert!(!values.is_empty());
                    }
                }
            }
        }
    }
}
