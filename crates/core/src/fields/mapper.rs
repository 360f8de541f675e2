use tracing::{debug, trace};

use super::mapping::ColumnMapping;
use crate::schedule::Row;

/// Template variable name and cell text, in mapping order.
pub type MappedFields = Vec<(String, String)>;

/// Translate a schedule row into template variables.
///
/// Columns the row lacks, or holds no value for, produce no entry at all;
/// templates rely on the key being absent to hide optional sections.
pub fn map_fields(row: &Row, mapping: &ColumnMapping) -> MappedFields {
    let mut fields = MappedFields::new();

    for (column, variable) in mapping {
        match row.get(column) {
            Some(value) => {
                fields.push(((*variable).to_string(), value.to_string()));
            }
            None => trace!(column, variable, "column has no value, skipping"),
        }
    }

    debug!(mapped = fields.len(), supported = mapping.len(), "fields mapped");
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::COLUMN_MAPPING;

    fn value<'a>(fields: &'a MappedFields, variable: &str) -> Option<&'a str> {
        fields.iter().find(|(k, _)| k == variable).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_maps_present_columns() {
        let row = Row::from_pairs([("Date", "3/10/24"), ("Scripture", "John 1:1")]);
        let fields = map_fields(&row, COLUMN_MAPPING);

        assert_eq!(fields.len(), 1);
        assert_eq!(value(&fields, "SCRIPTURE"), Some("John 1:1"));
    }

    #[test]
    fn test_missing_and_empty_columns_are_skipped() {
        let mut row = Row::from_pairs([("Hymn 2", "Amazing Grace")]);
        row.insert("Hymn 1", Some(String::new()));
        row.insert("Baptisms", None);

        let fields = map_fields(&row, COLUMN_MAPPING);
        assert_eq!(value(&fields, "HYMN_1"), None);
        assert_eq!(value(&fields, "BAPTISMS"), None);
        assert_eq!(value(&fields, "HYMN_2"), Some("Amazing Grace"));
    }

    #[test]
    fn test_unmapped_columns_are_ignored() {
        let row = Row::from_pairs([("Date", "3/10/24"), ("Sermon Title", "Light")]);
        let fields = map_fields(&row, COLUMN_MAPPING);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_output_keys_come_from_mapping() {
        let row = Row::from_pairs(COLUMN_MAPPING.iter().map(|(c, _)| (*c, "x")));
        let fields = map_fields(&row, COLUMN_MAPPING);
        assert_eq!(fields.len(), COLUMN_MAPPING.len());
        for ((key, _), (_, variable)) in fields.iter().zip(COLUMN_MAPPING) {
            assert_eq!(key, variable);
        }
    }

    #[test]
    fn test_custom_mapping() {
        let mapping: &ColumnMapping = &[("Preacher", "PREACHER")];
        let row = Row::from_pairs([("Preacher", "Rev. Smith"), ("Scripture", "Ps 1")]);
        let fields = map_fields(&row, mapping);
        assert_eq!(fields.len(), 1);
        assert_eq!(value(&fields, "PREACHER"), Some("Rev. Smith"));
    }

    #[test]
    fn test_fields_follow_mapping_order() {
        let row = Row::from_pairs([("NT Reading", "Rom 8"), ("Hymn 7", "7"), ("Hymn 1", "1")]);
        let fields = map_fields(&row, COLUMN_MAPPING);
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["HYMN_1", "HYMN_7", "NT_READING"]);
    }

    #[test]
    fn test_deterministic() {
        let row = Row::from_pairs([("Hymn 1", "1"), ("Hymn 7", "7"), ("NT Reading", "Rom 8")]);
        assert_eq!(map_fields(&row, COLUMN_MAPPING), map_fields(&row, COLUMN_MAPPING));
    }
}
