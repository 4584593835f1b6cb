use super::slug::strip_numbering;

/// One parsed catalog entity: a title and its key/value fields.
///
/// Fields keep the order they appeared in the source document. Keys are
/// unique within a record; inserting an existing key overwrites the value
/// in place, so the first occurrence keeps its position and the last value
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create a new record with no fields yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Insert a field, overwriting the value if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Remove a field by key, if present.
    pub fn remove(&mut self, key: &str) {
        self.fields.retain(|(k, _)| k != key);
    }

    /// Look up a field value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate the fields in source order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no fields were extracted for this record.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The title with any leading `N. ` numbering removed, for display in
    /// the index. Filenames are always derived from the full title.
    pub fn display_title(&self) -> &str {
        strip_numbering(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut record = Record::new("Test");
        record.insert("Город", "Москва");
        record.insert("Сайт", "example.ru");
        record.insert("Email", "info@example.ru");

        let keys: Vec<&str> = record.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Город", "Сайт", "Email"]);
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let mut record = Record::new("Test");
        record.insert("Город", "Москва");
        record.insert("Сайт", "example.ru");
        record.insert("Город", "Санкт-Петербург");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Город"), Some("Санкт-Петербург"));
        // First occurrence keeps its position
        let keys: Vec<&str> = record.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Город", "Сайт"]);
    }

    #[test]
    fn test_display_title_strips_numbering() {
        let record = Record::new("1. Test Academy");
        assert_eq!(record.display_title(), "Test Academy");
        assert_eq!(record.title, "1. Test Academy");
    }

    #[test]
    fn test_display_title_without_numbering() {
        let record = Record::new("Test Academy");
        assert_eq!(record.display_title(), "Test Academy");
    }
}
