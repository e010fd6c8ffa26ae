//! The navigation steps a [`YamlPath`](super::YamlPath) is made of.

use super::Location;

/// A single step from the document root towards a node.
///
/// The set of variants is closed: rendering a path relies on every variant
/// being handled explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum YamlPathSegment {
    /// The top level of the document. Always located at the first character.
    Root,
    /// A map key.
    MapElementKey { key: String, location: Location },
    /// The value following a map key.
    MapElementValue { location: Location },
    /// An element of a sequence.
    ListEntry { index: usize, location: Location },
    /// A use of an anchor (`*name`).
    AliasReference { name: String, location: Location },
    /// The definition of an anchor (`&name`), reached after resolving a reference.
    AliasDefinition { name: String, location: Location },
    /// A map-merge operator (`<<`).
    Merge { location: Location },
    /// Marks where a failure occurred.
    Error { location: Location },
}

impl YamlPathSegment {
    /// Returns the source location of this segment.
    pub fn location(&self) -> Location {
        match self {
            YamlPathSegment::Root => Location::START,
            YamlPathSegment::MapElementKey { location, .. }
            | YamlPathSegment::MapElementValue { location }
            | YamlPathSegment::ListEntry { location, .. }
            | YamlPathSegment::AliasReference { location, .. }
            | YamlPathSegment::AliasDefinition { location, .. }
            | YamlPathSegment::Merge { location }
            | YamlPathSegment::Error { location } => *location,
        }
    }

    /// Returns true for the root segment.
    pub fn is_root(&self) -> bool {
        matches!(self, YamlPathSegment::Root)
    }
}
