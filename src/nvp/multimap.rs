//! Ordered multimap of protocol fields.

/// Ordered collection of string keys to one or more string values.
///
/// Keys are case-sensitive. Entries keep the order in which each key first
/// appeared and values keep their insertion order under their key, so encoding
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMultimap {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldMultimap {
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `key`, keeping any existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replaces every value under `key` with a single value.
    ///
    /// An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Returns the first value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Returns the first value under `key`, or `""` when absent.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns every value under `key` in insertion order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        match self.position(key) {
            Some(idx) => &self.entries[idx].1,
            None => &[],
        }
    }

    /// Returns true if `key` has at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes `key` and returns its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys with all of their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterates over every `(key, value)` pair, repeating keys with several values.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FieldMultimap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMultimap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_values() {
        let mut fields = FieldMultimap::new();
        fields.add("L_BILLINGTYPE0", "RecurringPayments");
        fields.add("L_BILLINGTYPE0", "MerchantInitiatedBilling");

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("L_BILLINGTYPE0"), Some("RecurringPayments"));
        assert_eq!(
            fields.get_all("L_BILLINGTYPE0"),
            ["RecurringPayments".to_owned(), "MerchantInitiatedBilling".to_owned()]
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut fields = FieldMultimap::new();
        fields.add("USER", "caller");
        fields.add("AMT", "1.00");
        fields.add("USER", "second");
        fields.set("USER", "injected");

        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["USER", "AMT"]);
        assert_eq!(fields.get_all("USER"), ["injected".to_owned()]);
    }

    #[test]
    fn test_missing_key() {
        let fields = FieldMultimap::new();
        assert!(fields.is_empty());
        assert_eq!(fields.get("ACK"), None);
        assert_eq!(fields.get_or_empty("ACK"), "");
        assert!(fields.get_all("ACK").is_empty());
        assert!(!fields.contains_key("ACK"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut fields = FieldMultimap::new();
        fields.add("ACK", "Success");
        assert_eq!(fields.get("ack"), None);
        assert_eq!(fields.get("ACK"), Some("Success"));
    }

    #[test]
    fn test_remove() {
        let mut fields: FieldMultimap = [("A", "1"), ("B", "2"), ("A", "3")].into_iter().collect();
        assert_eq!(fields.remove("A"), Some(vec!["1".to_owned(), "3".to_owned()]));
        assert_eq!(fields.remove("A"), None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_pairs_flatten_in_order() {
        let fields: FieldMultimap =
            [("A", "1"), ("B", "2"), ("A", "3")].into_iter().collect();
        let pairs: Vec<(&str, &str)> = fields.pairs().collect();
        assert_eq!(pairs, [("A", "1"), ("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_empty_value_is_present() {
        let mut fields = FieldMultimap::new();
        fields.add("NOTE", "");
        assert!(fields.contains_key("NOTE"));
        assert_eq!(fields.get("NOTE"), Some(""));
    }
}
