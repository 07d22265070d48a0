//! Hover preview of a range selection.

use crate::date::CalendarDate;
use crate::grid::{Edge, GridCell};

/// The span between the selection pivot and the hovered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeHighlight {
    pub pivot: CalendarDate,
    pub hovered: CalendarDate,
}

impl RangeHighlight {
    pub fn new(pivot: CalendarDate, hovered: CalendarDate) -> Self {
        RangeHighlight { pivot, hovered }
    }

    /// `(earliest, latest)` regardless of hover direction.
    pub fn bounds(&self) -> (CalendarDate, CalendarDate) {
        if self.pivot <= self.hovered {
            (self.pivot, self.hovered)
        } else {
            (self.hovered, self.pivot)
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        let (start, end) = self.bounds();
        start <= date && date <= end
    }

    /// Flag every enabled cell inside the span. The chronologically first
    /// and last flagged days get the edge markers.
    pub fn apply<'a>(&self, cells: impl Iterator<Item = &'a mut GridCell>) {
        let mut cells: Vec<&mut GridCell> = cells.collect();

        for cell in cells.iter_mut() {
            cell.is_range_over = !cell.is_disabled && self.contains(cell.date);
            cell.range_edge = Edge::default();
        }

        let over = cells.iter().filter(|c| c.is_range_over).map(|c| c.date);
        let (Some(first), Some(last)) = (over.clone().min(), over.max()) else {
            return;
        };

        for cell in cells.iter_mut().filter(|c| c.is_range_over) {
            cell.range_edge = Edge {
                first: cell.date == first,
                last: cell.date == last,
            };
        }
    }
}

/// Drop every hover-preview flag.
pub fn clear<'a>(cells: impl Iterator<Item = &'a mut GridCell>) {
    for cell in cells {
        cell.is_range_over = false;
        cell.range_edge = Edge::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_month;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds_ignore_direction() {
        let forward = RangeHighlight::new(date(2021, 1, 1), date(2021, 1, 5));
        let backward = RangeHighlight::new(date(2021, 1, 5), date(2021, 1, 1));
        assert_eq!(forward.bounds(), backward.bounds());
        assert!(backward.contains(date(2021, 1, 3)));
        assert!(!backward.contains(date(2021, 1, 6)));
    }

    #[test]
    fn test_apply_skips_disabled_and_marks_edges() {
        let mut grid = build_month(date(2021, 2, 1), Weekday::Mon).unwrap();
        // Feb 1 is the first cell; disable Feb 3 and Feb 5 (the far end).
        grid.cells[2].is_disabled = true;
        grid.cells[4].is_disabled = true;

        RangeHighlight::new(date(2021, 2, 5), date(2021, 2, 1)).apply(grid.cells.iter_mut());

        let over: Vec<u32> = grid
            .cells
            .iter()
            .filter(|c| c.is_range_over)
            .map(|c| c.date.day())
            .collect();
        assert_eq!(over, vec![1, 2, 4]);

        assert!(grid.cells[0].range_edge.first);
        assert!(!grid.cells[0].range_edge.last);
        assert!(grid.cells[3].range_edge.last);
        assert_eq!(grid.cells[1].range_edge, Edge::default());
    }

    #[test]
    fn test_clear_resets_flags() {
        let mut grid = build_month(date(2021, 2, 1), Weekday::Mon).unwrap();
        RangeHighlight::new(date(2021, 2, 1), date(2021, 2, 10)).apply(grid.cells.iter_mut());
        assert!(grid.cells.iter().any(|c| c.is_range_over));

        clear(grid.cells.iter_mut());
        assert!(grid.cells.iter().all(|c| !c.is_range_over));
        assert!(grid.cells.iter().all(|c| c.range_edge == Edge::default()));
    }
}
