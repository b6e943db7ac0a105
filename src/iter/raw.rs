//! Atomic stepping over every position in the tree.

use crate::classify::can_contain_positions;
use crate::dom::{Document, NodeKind};
use crate::error::{Error, Result};
use crate::iter::{Cursor, PositionIterator};
use crate::position::Position;

/// Advance one atomic unit in document order.
///
/// From the end of a node, climb to just after it in the parent. Inside
/// character data, step one character. At an element, descend into the
/// child at the offset when it can contain positions, else step over it.
pub(crate) fn step_forward(doc: &Document, pos: Position) -> Option<Position> {
    let node = pos.node();
    let offset = pos.offset();
    if offset < doc.node_len(node) {
        if doc.kind(node).is_character_data() {
            return Some(Position::new_unchecked(node, offset + 1));
        }
        let child = doc.children(node)[offset];
        if can_contain_positions(doc, child) {
            return Some(Position::new_unchecked(child, 0));
        }
        return Some(Position::new_unchecked(node, offset + 1));
    }
    let parent = doc.parent(node)?;
    let idx = doc.child_index(node)?;
    Some(Position::new_unchecked(parent, idx + 1))
}

/// Retreat one atomic unit; the exact mirror of [`step_forward`].
pub(crate) fn step_backward(doc: &Document, pos: Position) -> Option<Position> {
    let node = pos.node();
    let offset = pos.offset();
    if offset == 0 {
        let parent = doc.parent(node)?;
        let idx = doc.child_index(node)?;
        return Some(Position::new_unchecked(parent, idx));
    }
    if doc.kind(node).is_character_data() {
        return Some(Position::new_unchecked(node, offset - 1));
    }
    let child = doc.children(node)[offset - 1];
    if can_contain_positions(doc, child) {
        return Some(Position::new_unchecked(child, doc.node_len(child)));
    }
    Some(Position::new_unchecked(node, offset - 1))
}

/// Iterator over all positions, visible or not. Defines the position
/// address space the higher layers filter and annotate.
#[derive(Clone, Debug)]
pub struct RawPositionIterator<'a> {
    doc: &'a Document,
    cursor: Cursor,
}

impl<'a> RawPositionIterator<'a> {
    /// Create an iterator resting on `position`.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to `doc`.
    pub fn new(doc: &'a Document, position: Position) -> Result<Self> {
        validate(doc, position)?;
        Ok(Self {
            doc,
            cursor: Cursor::new(position),
        })
    }

    /// The document being iterated.
    #[must_use]
    pub fn doc(&self) -> &'a Document {
        self.doc
    }
}

pub(crate) fn validate(doc: &Document, position: Position) -> Result<()> {
    if !doc.contains(position.node()) {
        return Err(Error::UnknownNode(position.node()));
    }
    let len = doc.node_len(position.node());
    if position.offset() > len {
        return Err(Error::InvalidPosition {
            node: position.node(),
            offset: position.offset(),
            len,
        });
    }
    Ok(())
}

impl PositionIterator for RawPositionIterator<'_> {
    fn current(&self) -> Position {
        self.cursor.current()
    }

    fn set_current(&mut self, position: Position) -> Result<()> {
        validate(self.doc, position)?;
        self.cursor.set(position);
        Ok(())
    }

    fn next(&mut self) -> Option<Position> {
        self.cursor.advance(|p| step_forward(self.doc, p))
    }

    fn previous(&mut self) -> Option<Position> {
        self.cursor.retreat(|p| step_backward(self.doc, p))
    }

    fn peek_next(&mut self) -> Option<Position> {
        self.cursor.peek_next(|p| step_forward(self.doc, p))
    }

    fn peek_previous(&mut self) -> Option<Position> {
        self.cursor.peek_previous(|p| step_backward(self.doc, p))
    }
}
