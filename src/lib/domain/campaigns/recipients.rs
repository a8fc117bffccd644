//! Recipient records and where they come from

#[cfg(test)]
use mockall::mock;

use super::LoadError;

/// Field holding the destination address of a recipient
pub const ADDRESS_FIELD: &str = "Receiver_Mail";

/// One row of recipient data: field name to value, in source column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientRecord {
    fields: Vec<(String, String)>,
}

impl RecipientRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same name
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The destination address, if present
    pub fn address(&self) -> Option<&str> {
        self.get(ADDRESS_FIELD)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RecipientRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();

        for (key, value) in iter {
            record.insert(key, value);
        }

        record
    }
}

/// Source of the ordered recipient list for a batch
pub trait RecipientSource: Send + Sync {
    /// Load every recipient, in source order
    fn load_recipients(&self) -> Result<Vec<RecipientRecord>, LoadError>;
}

#[cfg(test)]
mock! {
    pub RecipientSource {}

    impl RecipientSource for RecipientSource {
        fn load_recipients(&self) -> Result<Vec<RecipientRecord>, LoadError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_insertion_order() {
        let record: RecipientRecord = [("Name", "Ann"), ("Receiver_Mail", "ann@example.com")]
            .into_iter()
            .collect();

        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["Name", "Receiver_Mail"]);
        assert_eq!(record.address(), Some("ann@example.com"));
    }

    #[test]
    fn test_duplicate_key_keeps_last_value_in_first_position() {
        let record: RecipientRecord = [("Name", "Ann"), ("City", "Oslo"), ("Name", "Bob")]
            .into_iter()
            .collect();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Name"), Some("Bob"));
        assert_eq!(record.iter().next(), Some(("Name", "Bob")));
    }

    #[test]
    fn test_missing_address() {
        let record: RecipientRecord = [("Name", "Ann")].into_iter().collect();

        assert_eq!(record.address(), None);
    }
}
