//! Source positions attached to path segments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the source document.
///
/// Both `line` and `column` are 1-based, so the first character of a
/// document is at `Location::new(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
}

impl Location {
    /// The first character of a document.
    pub const START: Location = Location { line: 1, column: 1 };

    /// Creates a new location.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlshape::path::Location;
    ///
    /// let location = Location::new(3, 7);
    /// assert_eq!(location.to_string(), "line 3, column 7");
    /// ```
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_first_character() {
        assert_eq!(Location::START, Location::new(1, 1));
    }

    #[test]
    fn test_locations_order_by_line_then_column() {
        assert!(Location::new(1, 9) < Location::new(2, 1));
        assert!(Location::new(2, 1) < Location::new(2, 3));
    }
}
