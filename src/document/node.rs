//! YAML node representation with provenance tracking.
//!
//! A parsed document is a tree of [`YamlNode`]s. Each node pairs a
//! [`YamlValue`] with the [`YamlPath`] it was reached by, so any failure
//! while decoding the node can say exactly where it happened. Aliases have
//! already been replaced by copies of the anchored subtree (whose paths
//! record the alias hop) and merge keys have been folded into their maps.
//!
//! # Example
//!
//! ```
//! use yamlshape::document::node::{YamlEntry, YamlNode, YamlScalar, YamlValue};
//! use yamlshape::path::{Location, YamlPath};
//! use indexmap::IndexMap;
//!
//! let key_path = YamlPath::root().with_map_element_key("name", Location::new(1, 1));
//! let value_path = key_path.with_map_element_value(Location::new(1, 7));
//!
//! let mut entries = IndexMap::new();
//! entries.insert(
//!     "name".to_string(),
//!     YamlEntry {
//!         key: YamlNode::new(YamlValue::Scalar(YamlScalar::plain("name")), key_path),
//!         value: YamlNode::new(YamlValue::Scalar(YamlScalar::plain("Alice")), value_path),
//!     },
//! );
//! let map = YamlNode::new(YamlValue::Map(entries), YamlPath::root());
//!
//! assert!(map.value().is_map());
//! assert_eq!(map.type_name(), "a map");
//! ```

use crate::path::{Location, YamlPath};
use indexmap::IndexMap;

/// The quoting style a scalar was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// The raw text of a scalar. Interpreting it as a number, boolean and so on
/// is left to whoever decodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlScalar {
    pub content: String,
    pub style: ScalarStyle,
}

impl YamlScalar {
    pub fn new(content: impl Into<String>, style: ScalarStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, ScalarStyle::Plain)
    }

    /// Returns true if the scalar was written without quotes or block indicators.
    pub fn is_plain(&self) -> bool {
        self.style == ScalarStyle::Plain
    }
}

/// A key/value pair in a map. The key is always a scalar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlEntry {
    pub key: YamlNode,
    pub value: YamlNode,
}

impl YamlEntry {
    /// Returns the key's text.
    pub fn key_content(&self) -> &str {
        match self.key.value() {
            YamlValue::Scalar(scalar) => &scalar.content,
            _ => "",
        }
    }
}

/// A YAML value without its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YamlValue {
    /// An explicit or empty null
    Null,
    /// A scalar in any style
    Scalar(YamlScalar),
    /// An ordered sequence
    List(Vec<YamlNode>),
    /// Key/value pairs in document order, keyed by the key's text
    Map(IndexMap<String, YamlEntry>),
}

impl YamlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, YamlValue::Null)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, YamlValue::Scalar(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, YamlValue::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, YamlValue::Map(_))
    }
}

/// A YAML value together with the path it was reached by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) path: YamlPath,
}

impl YamlNode {
    pub fn new(value: YamlValue, path: YamlPath) -> Self {
        Self { value, path }
    }

    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    pub fn path(&self) -> &YamlPath {
        &self.path
    }

    /// The location of the token that defines this node.
    pub fn location(&self) -> Location {
        self.path.end_location()
    }

    /// A short description of this node's kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self.value {
            YamlValue::Null => "a null value",
            YamlValue::Scalar(_) => "a scalar value",
            YamlValue::List(_) => "a list",
            YamlValue::Map(_) => "a map",
        }
    }

    /// Looks up a map entry by key. Returns `None` for non-map nodes.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        match &self.value {
            YamlValue::Map(entries) => entries.get(key).map(|entry| &entry.value),
            _ => None,
        }
    }

    /// Returns a copy of this subtree with every path's `old_prefix` swapped
    /// for `new_prefix`.
    pub fn with_replaced_path_prefix(&self, old_prefix: &YamlPath, new_prefix: &YamlPath) -> Self {
        let value = match &self.value {
            YamlValue::Null => YamlValue::Null,
            YamlValue::Scalar(scalar) => YamlValue::Scalar(scalar.clone()),
            YamlValue::List(items) => YamlValue::List(
                items
                    .iter()
                    .map(|item| item.with_replaced_path_prefix(old_prefix, new_prefix))
                    .collect(),
            ),
            YamlValue::Map(entries) => YamlValue::Map(
                entries
                    .iter()
                    .map(|(name, entry)| {
                        (
                            name.clone(),
                            YamlEntry {
                                key: entry.key.with_replaced_path_prefix(old_prefix, new_prefix),
                                value: entry.value.with_replaced_path_prefix(old_prefix, new_prefix),
                            },
                        )
                    })
                    .collect(),
            ),
        };

        Self {
            value,
            path: self.path.with_replaced_prefix(old_prefix, new_prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(content: &str, path: YamlPath) -> YamlNode {
        YamlNode::new(YamlValue::Scalar(YamlScalar::plain(content)), path)
    }

    #[test]
    fn test_type_names() {
        let root = YamlPath::root();
        assert_eq!(YamlNode::new(YamlValue::Null, root.clone()).type_name(), "a null value");
        assert_eq!(scalar("x", root.clone()).type_name(), "a scalar value");
        assert_eq!(YamlNode::new(YamlValue::List(vec![]), root.clone()).type_name(), "a list");
        assert_eq!(YamlNode::new(YamlValue::Map(IndexMap::new()), root).type_name(), "a map");
    }

    #[test]
    fn test_replaced_path_prefix_rewrites_children() {
        let definition = YamlPath::root().with_map_element_key("base", Location::new(1, 1));
        let item_path = definition.with_list_entry(0, Location::new(2, 3));
        let list = YamlNode::new(
            YamlValue::List(vec![scalar("a", item_path)]),
            definition.clone(),
        );
        let reference = YamlPath::root()
            .with_alias_reference("base", Location::new(4, 5))
            .with_alias_definition("base", Location::new(1, 7));

        let copy = list.with_replaced_path_prefix(&definition, &reference);

        assert_eq!(copy.path().to_human_readable_string(), "->&base");
        match copy.value() {
            YamlValue::List(items) => {
                assert_eq!(items[0].path().to_human_readable_string(), "->&base[0]");
                assert_eq!(items[0].location(), Location::new(2, 3));
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_style() {
        assert!(YamlScalar::plain("x").is_plain());
        assert!(!YamlScalar::new("x", ScalarStyle::DoubleQuoted).is_plain());
    }
}
