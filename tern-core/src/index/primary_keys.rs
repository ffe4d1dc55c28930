//! Primary key table
//!
//! Positional mapping from internal doc id to the document's external string
//! key. Loaded once with the index, shared read-only across every engine
//! (`Arc<PrimaryKeys>`) for the lifetime of the index. Serde derives let an
//! index loader persist the table alongside the index files.

use crate::DocId;

/// Immutable doc id -> primary key table.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PrimaryKeys {
    keys: Vec<String>,
}

impl PrimaryKeys {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// The key for `doc_id`, or `None` past the end of the table.
    #[inline]
    pub fn get(&self, doc_id: DocId) -> Option<&str> {
        self.keys.get(doc_id as usize).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for PrimaryKeys {
    fn from(keys: Vec<String>) -> Self {
        Self::new(keys)
    }
}

impl FromIterator<String> for PrimaryKeys {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_lookup() {
        let keys: PrimaryKeys = (0..4).map(|i| format!("doc-{}", i)).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(keys.get(0), Some("doc-0"));
        assert_eq!(keys.get(3), Some("doc-3"));
        assert_eq!(keys.get(4), None);
    }

    #[test]
    fn test_empty_table() {
        let keys = PrimaryKeys::default();
        assert!(keys.is_empty());
        assert_eq!(keys.get(0), None);
    }

    #[test]
    fn test_iter_preserves_order() {
        let keys = PrimaryKeys::new(vec!["a".into(), "b".into(), "c".into()]);
        let collected: Vec<&str> = keys.iter().collect();
        assert_eq!(collected, vec!["a", "b", "c"]);
    }
}
