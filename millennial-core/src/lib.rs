//! Calendar core for date-picker widgets.
//!
//! This crate holds everything a date picker needs that is not drawing:
//! - `date`: calendar-day values, parsing and arithmetic
//! - `selection` / `disabled`: the selected and disabled day sets
//! - `grid`: month-grid layout with leading/trailing padding
//! - `range`: hover preview of a range selection
//! - `picker`: year and month quick navigation
//! - `controller`: the state machine tying it together
//!
//! A host renders by walking the controller's grid (see [`hooks::GridVisitor`])
//! and maps each cell's flags to whatever its surface uses for styling.

pub mod config;
pub mod controller;
pub mod date;
pub mod disabled;
pub mod error;
pub mod grid;
pub mod hooks;
pub mod picker;
pub mod range;
pub mod selection;

pub use config::CalendarOptions;
pub use controller::{CalendarController, Header, HeaderLabel, Period};
pub use date::{CalendarDate, DateInput};
pub use error::{CalendarError, CalendarResult};
pub use grid::{Edge, GridCell, MonthGrid, MonthPosition};
pub use hooks::GridVisitor;
pub use picker::PickerState;
pub use selection::Values;
