//! Errors raised while parsing and decoding YAML documents.
//!
//! Every failure is a [`YamlError`]: a [`YamlErrorKind`] describing what went
//! wrong plus the [`YamlPath`] of the node it went wrong at. The rendered
//! message is a single sentence, for example:
//!
//! ```text
//! Unknown property 'colour'. Known properties are: name, size (at colour, line 2, column 1)
//! ```

use crate::path::{Location, YamlPath};
use std::fmt;
use thiserror::Error;

/// The kind of failure, without its position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YamlErrorKind {
    #[error("Unknown property '{property}'. Known properties are: {}", .known_properties.join(", "))]
    UnknownProperty {
        property: String,
        /// Sorted alphabetically.
        known_properties: Vec<String>,
    },

    #[error("Value for '{property}' is invalid: {reason}")]
    InvalidPropertyValue { property: String, reason: String },

    #[error("Expected {expected}, but got {actual}")]
    IncorrectType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Property '{property}' is required but it is missing.")]
    MissingRequiredProperty { property: String },

    #[error("Unexpected null or empty value for non-null field.")]
    UnexpectedNull,

    #[error("Value '{value}' is not a valid {expected} value.")]
    ScalarFormat {
        value: String,
        expected: &'static str,
    },

    #[error("Value '{value}' is not a valid option, permitted choices are: {}", .choices.join(", "))]
    InvalidEnumValue { value: String, choices: Vec<String> },

    #[error("Duplicate key '{key}'. It was previously given at {original}.")]
    DuplicateKey { key: String, original: Location },

    #[error("{0}")]
    MalformedYaml(String),

    #[error("The YAML document is empty.")]
    EmptyDocument,

    #[error("Parsing anchors and aliases is disabled.")]
    ForbiddenAnchorOrAlias,

    #[error("Maximum number of aliases ({limit}) has been reached.")]
    AliasLimitExceeded { limit: usize },

    #[error("Unknown anchor '{name}'.")]
    UnknownAnchor { name: String },

    #[error("{0}")]
    Message(String),
}

/// A parse or decode failure and the path at which it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlError {
    kind: YamlErrorKind,
    path: Option<YamlPath>,
}

/// Result type for parsing and decoding.
pub type Result<T> = std::result::Result<T, YamlError>;

impl YamlError {
    pub fn new(kind: YamlErrorKind, path: YamlPath) -> Self {
        Self {
            kind,
            path: Some(path),
        }
    }

    /// An error whose path is filled in later, by the first node it propagates out of.
    pub(crate) fn unplaced(kind: YamlErrorKind) -> Self {
        Self { kind, path: None }
    }

    pub fn unknown_property(
        property: impl Into<String>,
        known_properties: impl IntoIterator<Item = String>,
        path: YamlPath,
    ) -> Self {
        let mut known_properties: Vec<String> = known_properties.into_iter().collect();
        known_properties.sort();

        Self::new(
            YamlErrorKind::UnknownProperty {
                property: property.into(),
                known_properties,
            },
            path,
        )
    }

    /// Wraps a failure that happened while decoding the value of `property`.
    ///
    /// The wrapped error keeps the inner path, so the reported position is the
    /// deepest point of failure rather than the enclosing object.
    pub fn invalid_property_value(property: impl Into<String>, inner: YamlError) -> Self {
        Self {
            kind: YamlErrorKind::InvalidPropertyValue {
                property: property.into(),
                reason: inner.kind.to_string(),
            },
            path: inner.path,
        }
    }

    pub fn incorrect_type(expected: &'static str, actual: &'static str, path: YamlPath) -> Self {
        Self::new(YamlErrorKind::IncorrectType { expected, actual }, path)
    }

    pub fn scalar_format(value: impl Into<String>, expected: &'static str, path: YamlPath) -> Self {
        Self::new(
            YamlErrorKind::ScalarFormat {
                value: value.into(),
                expected,
            },
            path,
        )
    }

    pub fn malformed(message: impl Into<String>, path: YamlPath) -> Self {
        Self::new(YamlErrorKind::MalformedYaml(message.into()), path)
    }

    pub fn kind(&self) -> &YamlErrorKind {
        &self.kind
    }

    /// The path of the node the failure occurred at.
    pub fn path(&self) -> Option<&YamlPath> {
        self.path.as_ref()
    }

    /// The failure message without position information.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn location(&self) -> Option<Location> {
        self.path.as_ref().map(YamlPath::end_location)
    }

    /// Sets the path if the error does not have one yet.
    pub(crate) fn or_path(mut self, path: &YamlPath) -> Self {
        if self.path.is_none() {
            self.path = Some(path.clone());
        }
        self
    }

    /// Returns true for failures that describe a bad value, as opposed to a
    /// problem with the shape of the enclosing object.
    pub(crate) fn is_value_failure(&self) -> bool {
        matches!(
            self.kind,
            YamlErrorKind::IncorrectType { .. }
                | YamlErrorKind::ScalarFormat { .. }
                | YamlErrorKind::InvalidEnumValue { .. }
                | YamlErrorKind::UnexpectedNull
                | YamlErrorKind::InvalidPropertyValue { .. }
                | YamlErrorKind::Message(_)
        )
    }
}

impl fmt::Display for YamlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(path) = &self.path {
            write!(f, " (at {}, {})", path, path.end_location())?;
        }
        Ok(())
    }
}

impl std::error::Error for YamlError {}

impl serde::de::Error for YamlError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::unplaced(YamlErrorKind::Message(msg.to_string()))
    }

    fn missing_field(field: &'static str) -> Self {
        Self::unplaced(YamlErrorKind::MissingRequiredProperty {
            property: field.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn test_unknown_property_lists_known_names_sorted() {
        let path = YamlPath::root().with_map_element_key("colour", Location::new(2, 1));
        let err = YamlError::unknown_property(
            "colour",
            vec!["size".to_string(), "name".to_string()],
            path,
        );

        assert_eq!(
            err.to_string(),
            "Unknown property 'colour'. Known properties are: name, size (at colour, line 2, column 1)"
        );
    }

    #[test]
    fn test_invalid_property_value_keeps_inner_path() {
        let inner_path = YamlPath::root()
            .with_map_element_key("colour", Location::new(1, 1))
            .with_map_element_value(Location::new(1, 9));
        let inner = YamlError::incorrect_type("a map", "a scalar value", inner_path.clone());

        let err = YamlError::invalid_property_value("colour", inner);

        assert_eq!(err.path(), Some(&inner_path));
        assert_eq!(
            err.message(),
            "Value for 'colour' is invalid: Expected a map, but got a scalar value"
        );
    }

    #[test]
    fn test_custom_errors_take_the_first_path_offered() {
        let first = YamlPath::root().with_list_entry(0, Location::new(1, 3));
        let second = YamlPath::root();

        let err = YamlError::custom("bad").or_path(&first).or_path(&second);

        assert_eq!(err.path(), Some(&first));
        assert_eq!(err.to_string(), "bad (at [0], line 1, column 3)");
    }

    #[test]
    fn test_missing_field_maps_to_missing_required_property() {
        let err = YamlError::missing_field("name");
        assert_eq!(
            err.kind(),
            &YamlErrorKind::MissingRequiredProperty {
                property: "name".to_string()
            }
        );
        assert!(err.path().is_none());
    }
}
