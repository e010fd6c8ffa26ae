//! Errors raised when a path is assembled incorrectly.

use thiserror::Error;

/// A path was built from a segment sequence that breaks its structural rules.
///
/// This is a programming error in the code assembling the path, never a
/// problem with the document being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedPathError {
    #[error("Path must contain at least one segment.")]
    Empty,
    #[error("First element of path must be root segment or alias definition.")]
    InvalidFirstSegment,
    #[error("Root segment can only be first element of path.")]
    MisplacedRoot,
}
