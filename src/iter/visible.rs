//! Stepping that skips collapsed subtrees.

use crate::classify::StyleClassifier;
use crate::error::Result;
use crate::iter::raw::{self, validate};
use crate::iter::{Cursor, PositionIterator};
use crate::position::Position;

/// Advance to the next position outside any collapsed subtree.
///
/// After the raw step lands on a collapsed node, the cursor jumps past that
/// node and the check repeats, so no intermediate collapsed position is
/// ever observable.
pub(crate) fn step_forward(classifier: &StyleClassifier<'_>, from: Position) -> Option<Position> {
    let doc = classifier.doc();
    let mut pos = raw::step_forward(doc, from)?;
    loop {
        if !classifier.is_collapsed_node(pos.node()) {
            return Some(pos);
        }
        let parent = doc.parent(pos.node())?;
        let idx = doc.child_index(pos.node())?;
        pos = Position::new_unchecked(parent, idx + 1);
    }
}

/// Retreat to the previous position outside any collapsed subtree.
pub(crate) fn step_backward(classifier: &StyleClassifier<'_>, from: Position) -> Option<Position> {
    let doc = classifier.doc();
    let mut pos = raw::step_backward(doc, from)?;
    loop {
        if !classifier.is_collapsed_node(pos.node()) {
            return Some(pos);
        }
        let parent = doc.parent(pos.node())?;
        let idx = doc.child_index(pos.node())?;
        pos = Position::new_unchecked(parent, idx);
    }
}

/// Iterator over positions lying strictly outside any hidden or collapsed
/// subtree.
#[derive(Clone, Debug)]
pub struct VisiblePositionIterator<'a> {
    classifier: StyleClassifier<'a>,
    cursor: Cursor,
}

impl<'a> VisiblePositionIterator<'a> {
    /// Create an iterator resting on `position`.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to the classifier's document.
    pub fn new(classifier: StyleClassifier<'a>, position: Position) -> Result<Self> {
        validate(classifier.doc(), position)?;
        Ok(Self {
            classifier,
            cursor: Cursor::new(position),
        })
    }

    /// The classifier driving collapse decisions.
    #[must_use]
    pub fn classifier(&self) -> StyleClassifier<'a> {
        self.classifier
    }

    /// A detached copy of this iterator resting on `position`, used for
    /// lookahead scans that must not disturb the cursor.
    #[must_use]
    pub(crate) fn scout(&self, position: Position) -> Self {
        Self {
            classifier: self.classifier,
            cursor: Cursor::new(position),
        }
    }
}

impl PositionIterator for VisiblePositionIterator<'_> {
    fn current(&self) -> Position {
        self.cursor.current()
    }

    fn set_current(&mut self, position: Position) -> Result<()> {
        validate(self.classifier.doc(), position)?;
        self.cursor.set(position);
        Ok(())
    }

    fn next(&mut self) -> Option<Position> {
        self.cursor.advance(|p| step_forward(&self.classifier, p))
    }

    fn previous(&mut self) -> Option<Position> {
        self.cursor.retreat(|p| step_backward(&self.classifier, p))
    }

    fn peek_next(&mut self) -> Option<Position> {
        self.cursor.peek_next(|p| step_forward(&self.classifier, p))
    }

    fn peek_previous(&mut self) -> Option<Position> {
        self.cursor
            .peek_previous(|p| step_backward(&self.classifier, p))
    }
}
