/// Source column name and the template variable it feeds.
pub type ColumnMapping = [(&'static str, &'static str)];

/// Every schedule column a template can use, in output order.
///
/// Adding a field means adding a pair here; nothing else changes.
pub static COLUMN_MAPPING: &ColumnMapping = &[
    ("Hymn 1", "HYMN_1"),
    ("Hymn 2", "HYMN_2"),
    ("Hymn 3", "HYMN_3"),
    ("Hymn 4", "HYMN_4"),
    ("Hymn 5", "HYMN_5"),
    ("Hymn 6", "HYMN_6"),
    ("Hymn 7", "HYMN_7"),
    ("Scripture", "SCRIPTURE"),
    ("Prayer Verse", "PRAYER_VERSE"),
    ("Assurance Verse", "ASSURANCE_VERSE"),
    ("Catechism Question", "CATECHISM_QUESTION"),
    ("Catechism Answer", "CATECHISM_ANSWER"),
    ("Catechism Scripture References", "CATECHISM_SCRIPTURE"),
    ("Benediction", "BENEDICTION"),
    ("Benediction Scripture", "BENEDICTION_SCRIPTURE"),
    ("OT Reading", "OT_READING"),
    ("NT Reading", "NT_READING"),
    ("Baptisms", "BAPTISMS"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_keys_and_values_unique() {
        let sources: HashSet<_> = COLUMN_MAPPING.iter().map(|(s, _)| s).collect();
        let vars: HashSet<_> = COLUMN_MAPPING.iter().map(|(_, v)| v).collect();
        assert_eq!(sources.len(), COLUMN_MAPPING.len());
        assert_eq!(vars.len(), COLUMN_MAPPING.len());
    }

    #[test]
    fn test_mapping_never_claims_date() {
        assert!(COLUMN_MAPPING.iter().all(|(s, v)| *s != "Date" && *v != "DATE"));
    }
}
