//! Provenance trails for decoded values.
//!
//! Every node in a parsed document carries a [`YamlPath`] describing how it
//! was reached from the top of the document: through map keys, list entries,
//! alias references and merge keys. Paths are immutable; each `with_*`
//! method returns a new path with one segment appended, so a decoder that
//! descends into a child and then backs out simply keeps using the parent.
//!
//! # Example
//!
//! ```
//! use yamlshape::path::{Location, YamlPath};
//!
//! let path = YamlPath::root()
//!     .with_map_element_key("colour", Location::new(2, 3))
//!     .with_map_element_value(Location::new(2, 11))
//!     .with_map_element_key("brightness", Location::new(3, 5));
//!
//! assert_eq!(path.to_human_readable_string(), "colour.brightness");
//! assert_eq!(path.end_location(), Location::new(3, 5));
//! ```

pub mod error;
pub mod location;
pub mod segment;

pub use error::MalformedPathError;
pub use location::Location;
pub use segment::YamlPathSegment;

use std::fmt;

/// A non-empty, structurally valid sequence of [`YamlPathSegment`]s.
///
/// Invariants, checked by [`YamlPath::new`]:
///
/// * there is at least one segment;
/// * the first segment is `Root` or `AliasDefinition`;
/// * `Root` appears at most once, and only first.
///
/// None of the `with_*` methods can append `Root`, so the invariants hold for
/// every path derived from a valid one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YamlPath {
    segments: Vec<YamlPathSegment>,
}

impl YamlPath {
    /// Creates a path from a list of segments, validating its structure.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedPathError`] naming the first rule the sequence breaks.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlshape::path::{Location, MalformedPathError, YamlPath, YamlPathSegment};
    ///
    /// assert!(YamlPath::new(vec![YamlPathSegment::Root]).is_ok());
    /// assert_eq!(YamlPath::new(vec![]), Err(MalformedPathError::Empty));
    /// assert_eq!(
    ///     YamlPath::new(vec![YamlPathSegment::Error { location: Location::new(1, 2) }]),
    ///     Err(MalformedPathError::InvalidFirstSegment),
    /// );
    /// ```
    pub fn new(segments: Vec<YamlPathSegment>) -> Result<Self, MalformedPathError> {
        let first = segments.first().ok_or(MalformedPathError::Empty)?;

        if !matches!(
            first,
            YamlPathSegment::Root | YamlPathSegment::AliasDefinition { .. }
        ) {
            return Err(MalformedPathError::InvalidFirstSegment);
        }

        if segments.iter().skip(1).any(YamlPathSegment::is_root) {
            return Err(MalformedPathError::MisplacedRoot);
        }

        Ok(Self { segments })
    }

    /// The path of the top level of a document.
    pub fn root() -> Self {
        Self {
            segments: vec![YamlPathSegment::Root],
        }
    }

    /// Returns the segments of this path, root first.
    pub fn segments(&self) -> &[YamlPathSegment] {
        &self.segments
    }

    /// Returns the location of the last segment.
    pub fn end_location(&self) -> Location {
        self.segments
            .last()
            .map(YamlPathSegment::location)
            .unwrap_or(Location::START)
    }

    /// Appends a non-root segment. Never produces a malformed path, since the
    /// first segment is kept and `Root` is never appended.
    fn with(&self, segment: YamlPathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn with_map_element_key(&self, key: impl Into<String>, location: Location) -> Self {
        self.with(YamlPathSegment::MapElementKey {
            key: key.into(),
            location,
        })
    }

    pub fn with_map_element_value(&self, location: Location) -> Self {
        self.with(YamlPathSegment::MapElementValue { location })
    }

    pub fn with_list_entry(&self, index: usize, location: Location) -> Self {
        self.with(YamlPathSegment::ListEntry { index, location })
    }

    pub fn with_alias_reference(&self, name: impl Into<String>, location: Location) -> Self {
        self.with(YamlPathSegment::AliasReference {
            name: name.into(),
            location,
        })
    }

    pub fn with_alias_definition(&self, name: impl Into<String>, location: Location) -> Self {
        self.with(YamlPathSegment::AliasDefinition {
            name: name.into(),
            location,
        })
    }

    pub fn with_merge(&self, location: Location) -> Self {
        self.with(YamlPathSegment::Merge { location })
    }

    pub fn with_error(&self, location: Location) -> Self {
        self.with(YamlPathSegment::Error { location })
    }

    /// Returns true if `prefix`'s segments are the leading segments of this path.
    pub fn starts_with(&self, prefix: &YamlPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Re-roots this path: if it starts with `old_prefix`, that prefix is
    /// swapped for `new_prefix` and the remaining segments are kept.
    ///
    /// Used when an anchored subtree is copied to the place an alias refers
    /// to it from. Paths that do not start with `old_prefix` are returned
    /// unchanged.
    pub fn with_replaced_prefix(&self, old_prefix: &YamlPath, new_prefix: &YamlPath) -> Self {
        if !self.starts_with(old_prefix) {
            return self.clone();
        }

        let mut segments = new_prefix.segments.clone();
        segments.extend_from_slice(&self.segments[old_prefix.segments.len()..]);
        Self { segments }
    }

    /// Renders the path as a short string suitable for showing to a user.
    ///
    /// Keys are joined with dots, list entries are written as `[i]`, alias
    /// references as `->&name` and merges as `>>(merged ...)`. An `Error`
    /// segment stops rendering at its parent. A path that renders to nothing
    /// is shown as `<root>`.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlshape::path::{Location, YamlPath};
    ///
    /// let path = YamlPath::root()
    ///     .with_map_element_key("colour", Location::new(1, 3))
    ///     .with_merge(Location::new(4, 5))
    ///     .with_list_entry(1, Location::new(4, 10))
    ///     .with_alias_reference("green", Location::new(4, 10))
    ///     .with_alias_definition("green", Location::new(10, 3))
    ///     .with_map_element_key("saturation", Location::new(11, 5));
    ///
    /// assert_eq!(
    ///     path.to_human_readable_string(),
    ///     "colour>>(merged entry 1 &green).saturation"
    /// );
    /// ```
    pub fn to_human_readable_string(&self) -> String {
        let segments = &self.segments;
        let mut rendered = String::new();
        let mut i = 0;

        while i < segments.len() {
            match &segments[i] {
                YamlPathSegment::Root
                | YamlPathSegment::MapElementValue { .. }
                | YamlPathSegment::AliasDefinition { .. } => {}
                YamlPathSegment::Error { .. } => break,
                YamlPathSegment::MapElementKey { key, .. } => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(key);
                }
                YamlPathSegment::ListEntry { index, .. } => {
                    rendered.push_str(&format!("[{index}]"));
                }
                YamlPathSegment::AliasReference { name, .. } => {
                    rendered.push_str("->&");
                    rendered.push_str(name);
                    i += skip_matching_definition(segments, i + 1, name);
                }
                YamlPathSegment::Merge { .. } => {
                    rendered.push_str(">>(merged");

                    if let Some(YamlPathSegment::ListEntry { index, .. }) = segments.get(i + 1) {
                        rendered.push_str(&format!(" entry {index}"));
                        i += 1;
                    }

                    if let Some(YamlPathSegment::AliasReference { name, .. }) = segments.get(i + 1)
                    {
                        rendered.push_str(" &");
                        rendered.push_str(name);
                        i += 1;
                        i += skip_matching_definition(segments, i + 1, name);
                    }

                    rendered.push(')');
                }
            }

            i += 1;
        }

        if rendered.is_empty() {
            "<root>".to_string()
        } else {
            rendered
        }
    }
}

/// Returns 1 if the segment at `index` is the definition of the alias `name`.
fn skip_matching_definition(segments: &[YamlPathSegment], index: usize, name: &str) -> usize {
    match segments.get(index) {
        Some(YamlPathSegment::AliasDefinition { name: defined, .. }) if defined == name => 1,
        _ => 0,
    }
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_human_readable_string())
    }
}
