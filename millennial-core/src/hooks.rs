//! Extension points for the rendering layer.

use crate::controller::Period;
use crate::date::CalendarDate;
use crate::grid::{GridCell, MonthGrid};

/// Walks the rendered grid in display order: each month, then each of its
/// weeks, then each day of that week. Hosts implement the methods they care
/// about to attach their own markup; visiting never changes calendar state.
pub trait GridVisitor {
    fn month(&mut self, _month: &MonthGrid) {}

    fn week(&mut self, _week: &[GridCell]) {}

    fn day(&mut self, _cell: &GridCell) {}

    fn end_month(&mut self, _month: &MonthGrid) {}
}

pub type SelectListener = Box<dyn FnMut(&[CalendarDate])>;
pub type PeriodListener = Box<dyn FnMut(&Period)>;

#[derive(Default)]
pub(crate) struct Listeners {
    pub on_select: Vec<SelectListener>,
    pub on_period_change: Vec<PeriodListener>,
}

pub(crate) fn visit(months: &[MonthGrid], visitor: &mut dyn GridVisitor) {
    for month in months {
        visitor.month(month);
        for week in month.weeks() {
            visitor.week(week);
            for cell in week {
                visitor.day(cell);
            }
        }
        visitor.end_month(month);
    }
}
