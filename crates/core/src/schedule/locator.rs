use tracing::debug;

use super::table::{Row, ScheduleTable};

/// Find the first row whose `Date` cell equals `target_date` exactly.
///
/// No date parsing happens here: `3/10/24` and `03/10/24` are different
/// keys. Later duplicates of a date are never returned.
pub fn find_row<'a>(table: &'a ScheduleTable, target_date: &str) -> Option<&'a Row> {
    let found = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.date() == Some(target_date));

    match found {
        Some((idx, row)) => {
            debug!(target_date, row = idx, "schedule row located");
            Some(row)
        }
        None => {
            debug!(target_date, rows = table.len(), "no schedule row for date");
            None
        }
    }
}
