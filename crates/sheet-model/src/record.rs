//! Untyped records as read from a samplesheet.

/// One row of a samplesheet: field name to raw string value, in document order.
///
/// For CSV/TSV the order is the header order; for YAML it is the key order of
/// the mapping. Field names are unique within a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field, replacing the value if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Raw value for a field, `None` when the field is not part of the record.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Raw value for a field, empty when the field is absent.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// True when the field is absent or its value is empty.
    pub fn is_blank(&self, name: &str) -> bool {
        self.value(name).is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let record: RawRecord = [("sample", "S1"), ("fastq_1", "a.fq"), ("batch", "")]
            .into_iter()
            .collect();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["sample", "fastq_1", "batch"]);
    }

    #[test]
    fn absent_and_empty_are_blank() {
        let record: RawRecord = [("sample", "S1"), ("batch", "")].into_iter().collect();
        assert!(!record.is_blank("sample"));
        assert!(record.is_blank("batch"));
        assert!(record.is_blank("missing"));
        assert!(record.contains("batch"));
        assert!(!record.contains("missing"));
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut record = RawRecord::new();
        record.insert("sample", "S1");
        record.insert("sample", "S2");
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("sample"), Some("S2"));
    }
}
