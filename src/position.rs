//! Atomic tree position value type.

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// An atomic, immutable boundary in the document tree.
///
/// For character-data nodes the offset ranges over `0..=len` (between
/// characters); for the root and elements it ranges over `0..=child_count`
/// (between children). Two positions are equal iff node identity and offset
/// are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    node: NodeId,
    offset: usize,
}

impl Position {
    /// Create a position, validating the node and offset against the
    /// document.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if the node is not part of the document,
    /// [`Error::InvalidPosition`] if the offset exceeds the node's length.
    pub fn new(doc: &Document, node: NodeId, offset: usize) -> Result<Self> {
        if !doc.contains(node) {
            return Err(Error::UnknownNode(node));
        }
        let len = doc.node_len(node);
        if offset > len {
            return Err(Error::InvalidPosition { node, offset, len });
        }
        Ok(Self { node, offset })
    }

    /// The position at the very start of the tree.
    #[must_use]
    pub fn tree_start(doc: &Document) -> Self {
        Self {
            node: doc.root(),
            offset: 0,
        }
    }

    /// The position at the very end of the tree.
    #[must_use]
    pub fn tree_end(doc: &Document) -> Self {
        Self {
            node: doc.root(),
            offset: doc.node_len(doc.root()),
        }
    }

    /// Boundary just before a node's content.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if the node is not part of the document.
    pub fn node_start(doc: &Document, node: NodeId) -> Result<Self> {
        Self::new(doc, node, 0)
    }

    /// Boundary just after a node's content.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if the node is not part of the document.
    pub fn node_end(doc: &Document, node: NodeId) -> Result<Self> {
        if !doc.contains(node) {
            return Err(Error::UnknownNode(node));
        }
        Ok(Self {
            node,
            offset: doc.node_len(node),
        })
    }

    pub(crate) const fn new_unchecked(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// The addressed node.
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.node
    }

    /// The offset within the node.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }
}
