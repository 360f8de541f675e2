//! Schedule tables: one row per service date.
//!
//! Tables are loaded from CSV, JSON or spreadsheet files and are read-only
//! afterwards. The only lookup is by the verbatim text of the `Date` column.

pub mod loader;
pub mod locator;
pub mod table;

pub use loader::{ScheduleError, ScheduleFormat, load_schedule};
pub use locator::find_row;
pub use table::{DATE_COLUMN, Row, ScheduleTable};
