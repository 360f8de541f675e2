use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::dates::{DateFormats, DateParseError, format_date, normalize};
use crate::fields::{ColumnMapping, MappedFields, map_fields};
use crate::schedule::{ScheduleTable, find_row};

/// Variable holding the long-form service date.
pub const DATE_KEY: &str = "DATE";

#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Date(#[from] DateParseError),

    #[error("Date {0} was not found in the schedule.")]
    RowNotFound(String),
}

/// Final template variables: `DATE` first, then the mapped fields in
/// mapping order. Keys are unique. Read-only once assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext(Vec<(String, String)>);

impl RenderContext {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set `key`, keeping its position if it is already present.
    fn set(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Self::default();
        for (k, v) in iter {
            ctx.set(k.into(), v.into());
        }
        ctx
    }
}

impl Serialize for RenderContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Merge the display date into the mapped fields. `DATE` always holds
/// `formatted_date`, even if a mapped field used the same name.
pub fn assemble(formatted_date: &str, mapped_fields: MappedFields) -> RenderContext {
    let mut vars = Vec::with_capacity(mapped_fields.len() + 1);
    vars.push((DATE_KEY.to_string(), formatted_date.to_string()));
    vars.extend(mapped_fields.into_iter().filter(|(k, _)| k != DATE_KEY));
    RenderContext(vars)
}

/// Run the whole lookup for `target_date` against `table`.
///
/// The date is validated before the table is searched, so a malformed date
/// is reported even when the schedule happens to contain the same text.
pub fn build_context(
    table: &ScheduleTable,
    target_date: &str,
    mapping: &ColumnMapping,
    formats: &DateFormats,
) -> Result<RenderContext, ContextError> {
    let formatted_date = normalize(target_date, formats)?;
    debug!(target_date, formatted_date = %formatted_date, "date normalized");

    lookup(table, target_date, &formatted_date, mapping)
}

/// Like [`build_context`] for a date that was computed rather than typed.
///
/// The row is looked up by the date spelled in `formats.schedule` and `DATE`
/// is formatted straight from `date`, so the input format plays no part.
pub fn build_context_for_date(
    table: &ScheduleTable,
    date: NaiveDate,
    mapping: &ColumnMapping,
    formats: &DateFormats,
) -> Result<RenderContext, ContextError> {
    let target_date = format_date(date, &formats.schedule)?;
    let formatted_date = format_date(date, &formats.display)?;
    debug!(target_date = %target_date, formatted_date = %formatted_date, "computed date");

    lookup(table, &target_date, &formatted_date, mapping)
}

fn lookup(
    table: &ScheduleTable,
    target_date: &str,
    formatted_date: &str,
    mapping: &ColumnMapping,
) -> Result<RenderContext, ContextError> {
    let row = find_row(table, target_date)
        .ok_or_else(|| ContextError::RowNotFound(target_date.to_string()))?;

    let fields = map_fields(row, mapping);
    Ok(assemble(formatted_date, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::COLUMN_MAPPING;
    use crate::schedule::Row;

    fn sample_table() -> ScheduleTable {
        ScheduleTable::new(
            vec!["Date".into(), "Scripture".into()],
            vec![Row::from_pairs([("Date", "3/10/24"), ("Scripture", "John 1:1")])],
        )
    }

    #[test]
    fn test_assemble_adds_date() {
        let fields = vec![("SCRIPTURE".to_string(), "John 1:1".to_string())];

        let ctx = assemble("March 10, 2024", fields);
        assert_eq!(ctx.get("DATE"), Some("March 10, 2024"));
        assert_eq!(ctx.get("SCRIPTURE"), Some("John 1:1"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_assemble_date_wins_over_mapped_field() {
        let fields = vec![("DATE".to_string(), "bogus".to_string())];

        let ctx = assemble("March 10, 2024", fields);
        assert_eq!(ctx.get("DATE"), Some("March 10, 2024"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_build_context_scenario() {
        let ctx =
            build_context(&sample_table(), "3/10/24", COLUMN_MAPPING, &DateFormats::default())
                .unwrap();
        let expected: RenderContext =
            [("DATE", "March 10, 2024"), ("SCRIPTURE", "John 1:1")].into_iter().collect();
        assert_eq!(ctx, expected);
    }

    #[test]
    fn test_build_context_row_not_found() {
        let err =
            build_context(&sample_table(), "3/11/24", COLUMN_MAPPING, &DateFormats::default())
                .unwrap_err();
        assert!(matches!(err, ContextError::RowNotFound(ref d) if d == "3/11/24"));
        assert_eq!(err.to_string(), "Date 3/11/24 was not found in the schedule.");
    }

    #[test]
    fn test_build_context_bad_date_before_lookup() {
        // The schedule contains the exact text, but the date itself is invalid.
        let table = ScheduleTable::new(
            vec!["Date".into()],
            vec![Row::from_pairs([("Date", "13/40/99")])],
        );
        let err = build_context(&table, "13/40/99", COLUMN_MAPPING, &DateFormats::default())
            .unwrap_err();
        assert!(matches!(err, ContextError::Date(DateParseError::Malformed { .. })));
    }

    #[test]
    fn test_computed_date_ignores_input_format() {
        let table = ScheduleTable::new(
            vec!["Date".into(), "Scripture".into()],
            vec![Row::from_pairs([("Date", "2024-03-10"), ("Scripture", "John 1:1")])],
        );
        let formats = DateFormats { schedule: "%Y-%m-%d".into(), ..DateFormats::default() };
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let ctx = build_context_for_date(&table, date, COLUMN_MAPPING, &formats).unwrap();
        assert_eq!(ctx.get("DATE"), Some("March 10, 2024"));
        assert_eq!(ctx.get("SCRIPTURE"), Some("John 1:1"));
    }

    #[test]
    fn test_computed_date_row_not_found() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let err =
            build_context_for_date(&sample_table(), date, COLUMN_MAPPING, &DateFormats::default())
                .unwrap_err();
        assert!(matches!(err, ContextError::RowNotFound(ref d) if d == "3/17/24"));
    }

    #[test]
    fn test_context_serializes_date_first_then_mapping_order() {
        let table = ScheduleTable::new(
            vec!["Date".into(), "Scripture".into(), "Hymn 2".into(), "Baptisms".into()],
            vec![Row::from_pairs([
                ("Date", "3/10/24"),
                ("Baptisms", "Ann"),
                ("Scripture", "John 1:1"),
                ("Hymn 2", "204"),
            ])],
        );
        let ctx = build_context(&table, "3/10/24", COLUMN_MAPPING, &DateFormats::default())
            .unwrap();
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(
            json,
            r#"{"DATE":"March 10, 2024","HYMN_2":"204","SCRIPTURE":"John 1:1","BAPTISMS":"Ann"}"#
        );
    }
}
