//! Matching document keys to declared fields.

use crate::config::NamingStrategy;
use indexmap::IndexMap;

/// Lookup from a document key, as written in the source, to the index of
/// the declared field it fills.
///
/// Built once per object being decoded, with the naming strategy applied to
/// each declared name up front.
///
/// # Example
///
/// ```
/// use yamlshape::config::NamingStrategy;
/// use yamlshape::de::FieldMatcher;
///
/// let matcher = FieldMatcher::new(&["name", "list_item"], Some(&NamingStrategy::KebabCase));
///
/// assert_eq!(matcher.lookup("list-item"), Some(1));
/// assert_eq!(matcher.lookup("list_item"), None);
/// ```
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    keys: IndexMap<String, usize>,
}

impl FieldMatcher {
    pub fn new(fields: &[&str], naming_strategy: Option<&NamingStrategy>) -> Self {
        let mut keys = IndexMap::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            let key = match naming_strategy {
                Some(strategy) => strategy.key_for(field),
                None => (*field).to_string(),
            };
            // A later field shadows an earlier one that maps to the same key.
            keys.insert(key, index);
        }

        Self { keys }
    }

    /// Returns the field index for `key`, or `None` if no field matches.
    pub fn lookup(&self, key: &str) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// The document keys this matcher recognises, in declaration order.
    pub fn known_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }
}
