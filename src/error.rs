//! Error types for domtext.

use std::fmt;

use crate::dom::NodeId;

/// Result type alias for domtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for domtext operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No style resolver was supplied when building the renderer.
    StyleResolutionUnavailable,
    /// Position offset out of range for the addressed node.
    InvalidPosition {
        node: NodeId,
        offset: usize,
        len: usize,
    },
    /// Node identifier does not belong to this document.
    UnknownNode(NodeId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StyleResolutionUnavailable => {
                write!(f, "no style resolution capability available")
            }
            Self::InvalidPosition { node, offset, len } => {
                write!(
                    f,
                    "offset {offset} out of range for node {node:?} of length {len}"
                )
            }
            Self::UnknownNode(node) => {
                write!(f, "node {node:?} does not belong to this document")
            }
        }
    }
}

impl std::error::Error for Error {}
