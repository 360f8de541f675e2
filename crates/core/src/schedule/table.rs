use std::collections::HashMap;

/// Name of the column every schedule must carry.
pub const DATE_COLUMN: &str = "Date";

/// A single schedule record, keyed by column name.
///
/// Cells that were empty in the source are stored as `None` so that callers
/// can tell "column exists but has no value" apart from a real value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, Option<String>>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs. Empty values become absent.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.insert(k, Some(v.into()));
        }
        row
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        self.cells.insert(column.into(), value);
    }

    /// The value at `column`, or `None` when the column is missing or empty.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| v.as_deref())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn date(&self) -> Option<&str> {
        self.get(DATE_COLUMN)
    }
}

/// An ordered, flat schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ScheduleTable {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
