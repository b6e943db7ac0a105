//! Position iterators over the document tree.
//!
//! Three layers share one contract, from the bottom up:
//!
//! - [`RawPositionIterator`]: every position, visible or not
//! - [`VisiblePositionIterator`]: skips collapsed subtrees
//! - [`TextPositionIterator`]: one rendered character (or none) per step
//!
//! Each concrete iterator owns a [`Cursor`] holding the current position and
//! lazily computed, cached neighbors, and supplies its own step functions.

mod raw;
mod text;
mod visible;

pub use raw::RawPositionIterator;
pub use text::{TextPosition, TextPositionIterator};
pub use visible::VisiblePositionIterator;

use crate::error::Result;
use crate::position::Position;

/// Bidirectional cursor contract shared by the position iterators.
///
/// `next`/`previous` move the cursor and return the new position, or `None`
/// at the tree's boundaries, leaving the cursor in place. The peek variants
/// are non-mutating and backed by a cache that `set_current` invalidates.
pub trait PositionIterator {
    /// The position the cursor currently rests on.
    fn current(&self) -> Position;

    /// Reassign the cursor, clearing cached neighbors. No range check is
    /// applied beyond offset bounds.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to the iterator's document.
    fn set_current(&mut self, position: Position) -> Result<()>;

    /// Advance by one unit, returning the new position.
    fn next(&mut self) -> Option<Position>;

    /// Retreat by one unit, returning the new position.
    fn previous(&mut self) -> Option<Position>;

    /// Look ahead without moving.
    fn peek_next(&mut self) -> Option<Position>;

    /// Look behind without moving.
    fn peek_previous(&mut self) -> Option<Position>;

    /// Whether a further position exists ahead.
    fn has_next(&mut self) -> bool {
        self.peek_next().is_some()
    }

    /// Whether a further position exists behind.
    fn has_previous(&mut self) -> bool {
        self.peek_previous().is_some()
    }
}

/// Cursor state shared by the iterator implementations: the current
/// position plus one cached neighbor per direction. Reassignment clears the
/// cache as an invariant, not a side effect.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor {
    current: Position,
    cached_next: Option<Option<Position>>,
    cached_previous: Option<Option<Position>>,
}

impl Cursor {
    pub(crate) const fn new(position: Position) -> Self {
        Self {
            current: position,
            cached_next: None,
            cached_previous: None,
        }
    }

    pub(crate) const fn current(&self) -> Position {
        self.current
    }

    pub(crate) const fn set(&mut self, position: Position) {
        self.current = position;
        self.cached_next = None;
        self.cached_previous = None;
    }

    /// Move forward using `step` (or the cache), shifting the cache so the
    /// old current becomes the new cached previous.
    pub(crate) fn advance(&mut self, step: impl FnOnce(Position) -> Option<Position>) -> Option<Position> {
        let target = self
            .cached_next
            .take()
            .unwrap_or_else(|| step(self.current));
        if let Some(p) = target {
            self.cached_previous = Some(Some(self.current));
            self.cached_next = None;
            self.current = p;
        }
        target
    }

    /// Move backward using `step` (or the cache), mirroring [`Self::advance`].
    pub(crate) fn retreat(&mut self, step: impl FnOnce(Position) -> Option<Position>) -> Option<Position> {
        let target = self
            .cached_previous
            .take()
            .unwrap_or_else(|| step(self.current));
        if let Some(p) = target {
            self.cached_next = Some(Some(self.current));
            self.cached_previous = None;
            self.current = p;
        }
        target
    }

    pub(crate) fn peek_next(
        &mut self,
        step: impl FnOnce(Position) -> Option<Position>,
    ) -> Option<Position> {
        if self.cached_next.is_none() {
            self.cached_next = Some(step(self.current));
        }
        self.cached_next.flatten()
    }

    pub(crate) fn peek_previous(
        &mut self,
        step: impl FnOnce(Position) -> Option<Position>,
    ) -> Option<Position> {
        if self.cached_previous.is_none() {
            self.cached_previous = Some(step(self.current));
        }
        self.cached_previous.flatten()
    }
}
