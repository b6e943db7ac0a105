//! Rendered-character derivation over visible position steps.
//!
//! [`TextPositionIterator`] consumes the visible stepper and attaches to
//! each step the single rendered character (or none) it represents. The
//! interesting work is deciding whether whitespace renders: collapsible runs
//! shrink to one space, spaces abutting forced line separators vanish, and
//! implicit block newlines and table-cell tabs only materialize when
//! concrete content follows. All lookahead and lookbehind is iterative and
//! bounded by the range or the tree itself.

use crate::classify::{StyleClassifier, is_line_break};
use crate::dom::NodeKind;
use crate::error::Result;
use crate::iter::visible::VisiblePositionIterator;
use crate::iter::PositionIterator;
use crate::position::Position;
use crate::trace::{NO_TRACE, TraceSink};

/// Where a character a step contributes came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharKind {
    /// Concrete character data, including preserved whitespace.
    Text,
    /// A line-break element; renders unconditionally.
    LineBreak,
    /// Collapsible whitespace normalized to a space; tentative.
    CollapsibleSpace,
    /// Implicit newline on entering a block; tentative.
    LeadingSeparator,
    /// Implicit newline on leaving a block; tentative.
    TrailingSeparator,
    /// Implicit tab on leaving a table cell; tentative.
    CellTab,
}

impl CharKind {
    const fn is_concrete(self) -> bool {
        matches!(self, Self::Text | Self::LineBreak)
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    ch: char,
    kind: CharKind,
}

/// The effective last rendered character at some point of the iteration.
#[derive(Clone, Copy, Debug)]
struct RenderedChar {
    ch: char,
    kind: CharKind,
}

/// How the collapsible run containing a character ends within its node.
enum RunEnd {
    /// The run reaches the end of the node's data.
    NodeEnd,
    /// The run abuts a preserved newline.
    Newline,
    /// Ordinary content follows the run.
    Content,
}

/// A visible position annotated with the rendered character that precedes
/// it, if any, and whether that character came from a collapsible
/// whitespace run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPosition {
    position: Position,
    ch: Option<char>,
    collapsible: bool,
}

impl TextPosition {
    /// The underlying visible position.
    #[must_use]
    pub const fn position(self) -> Position {
        self.position
    }

    /// The rendered character the arriving step produced, if any.
    #[must_use]
    pub const fn ch(self) -> Option<char> {
        self.ch
    }

    /// Whether the character came from a collapsible whitespace run.
    #[must_use]
    pub const fn is_collapsible(self) -> bool {
        self.collapsible
    }
}

/// Iterator producing one rendered character (or none) per visible step,
/// optionally bounded by a `(start, end)` range.
pub struct TextPositionIterator<'a> {
    visible: VisiblePositionIterator<'a>,
    start: Option<Position>,
    end: Option<Position>,
    /// Cached context at the cursor: the last character rendered so far.
    preceding: Option<Option<RenderedChar>>,
    trace: &'a dyn TraceSink,
}

impl<'a> TextPositionIterator<'a> {
    /// Create an iterator over the whole tree or a bounded range. Range
    /// boundaries are canonicalized with [`Self::adjust_position`].
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to the classifier's document.
    pub fn new(
        classifier: StyleClassifier<'a>,
        range: Option<(Position, Position)>,
    ) -> Result<Self> {
        Self::with_trace(classifier, range, None, &NO_TRACE)
    }

    /// Create an iterator with an explicit initial position and trace sink.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to the classifier's document.
    pub fn with_trace(
        classifier: StyleClassifier<'a>,
        range: Option<(Position, Position)>,
        initial: Option<Position>,
        trace: &'a dyn TraceSink,
    ) -> Result<Self> {
        let (start, end) = match range {
            Some((s, e)) => (
                Some(Self::adjust_position(&classifier, s)?),
                Some(Self::adjust_position(&classifier, e)?),
            ),
            None => (None, None),
        };
        let init = match initial {
            Some(p) => Self::adjust_position(&classifier, p)?,
            None => start.unwrap_or_else(|| Position::tree_start(classifier.doc())),
        };
        let visible = VisiblePositionIterator::new(classifier, init)?;
        Ok(Self {
            visible,
            start,
            end,
            preceding: None,
            trace,
        })
    }

    /// Normalize an arbitrary boundary onto the text-position grid by
    /// stepping backward to the nearest previous text position and forward
    /// again. Guarantees the inverse law holds for every position the
    /// iterator subsequently reports, even for boundaries inside collapsed
    /// subtrees or mid-run.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to the classifier's document.
    pub fn adjust_position(
        classifier: &StyleClassifier<'a>,
        position: Position,
    ) -> Result<Position> {
        let mut back = VisiblePositionIterator::new(*classifier, position)?;
        match back.previous() {
            Some(p) => {
                let mut fwd = VisiblePositionIterator::new(*classifier, p)?;
                Ok(fwd.next().unwrap_or(p))
            }
            None => {
                // Nothing renders before the boundary: snap forward.
                if classifier.is_in_collapsed_subtree(position.node()) {
                    let mut fwd = VisiblePositionIterator::new(*classifier, position)?;
                    Ok(fwd
                        .next()
                        .unwrap_or_else(|| Position::tree_start(classifier.doc())))
                } else {
                    Ok(position)
                }
            }
        }
    }

    fn classifier(&self) -> StyleClassifier<'a> {
        self.visible.classifier()
    }

    /// The position the cursor currently rests on.
    #[must_use]
    pub fn current(&self) -> Position {
        self.visible.current()
    }

    /// Reassign the cursor; the position is canonicalized first.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to the classifier's document.
    pub fn set_current(&mut self, position: Position) -> Result<()> {
        let adjusted = Self::adjust_position(&self.classifier(), position)?;
        self.visible.set_current(adjusted)?;
        self.preceding = None;
        Ok(())
    }

    /// Advance one visible step, deriving the character it renders.
    /// Returns `None` at the configured end boundary or tree exhaustion.
    pub fn next(&mut self) -> Option<TextPosition> {
        let a = self.visible.current();
        if Some(a) == self.end {
            return None;
        }
        let preceding = self.preceding_at(a);
        let b = self.visible.next()?;
        self.trace.position_reached(b);
        let cand = candidate(&self.classifier(), a, b);
        let ch = cand.and_then(|c| self.resolve(b, c, preceding));
        self.trace.character_derived(b, ch);
        let collapsible =
            ch.is_some() && cand.is_some_and(|c| c.kind == CharKind::CollapsibleSpace);
        self.preceding = Some(match (ch, cand) {
            (Some(rendered), Some(c)) => Some(RenderedChar {
                ch: rendered,
                kind: c.kind,
            }),
            _ => preceding,
        });
        Some(TextPosition {
            position: b,
            ch,
            collapsible,
        })
    }

    /// Retreat one visible step, re-deriving the character attached to the
    /// position reached. Returns `None` at the configured start boundary or
    /// tree exhaustion.
    pub fn previous(&mut self) -> Option<TextPosition> {
        let cur = self.visible.current();
        if Some(cur) == self.start {
            return None;
        }
        let p = self.visible.previous()?;
        self.trace.position_reached(p);
        let (ch, collapsible, context) = self.derive_at(p);
        self.trace.character_derived(p, ch);
        self.preceding = Some(context);
        Some(TextPosition {
            position: p,
            ch,
            collapsible,
        })
    }

    /// Look ahead without moving.
    #[must_use]
    pub fn peek_next(&mut self) -> Option<TextPosition> {
        let mut scout = self.quiet_clone();
        scout.next()
    }

    /// Look behind without moving.
    #[must_use]
    pub fn peek_previous(&mut self) -> Option<TextPosition> {
        let mut scout = self.quiet_clone();
        scout.previous()
    }

    /// Whether a further text position exists ahead.
    #[must_use]
    pub fn has_next(&mut self) -> bool {
        self.peek_next().is_some()
    }

    /// Whether a further text position exists behind.
    #[must_use]
    pub fn has_previous(&mut self) -> bool {
        self.peek_previous().is_some()
    }

    fn quiet_clone(&self) -> TextPositionIterator<'a> {
        TextPositionIterator {
            visible: self.visible.clone(),
            start: self.start,
            end: self.end,
            preceding: self.preceding,
            trace: &NO_TRACE,
        }
    }

    /// Character and context for the position the cursor just landed on,
    /// derived from scratch (used by backward iteration).
    fn derive_at(&self, p: Position) -> (Option<char>, bool, Option<RenderedChar>) {
        if Some(p) == self.start {
            return (None, false, None);
        }
        let mut scout = self.visible.scout(p);
        let Some(a) = scout.previous() else {
            return (None, false, None);
        };
        let preceding = self.reconstruct_preceding(a);
        match candidate(&self.classifier(), a, p) {
            None => (None, false, preceding),
            Some(c) => {
                let ch = self.resolve(p, c, preceding);
                let collapsible = ch.is_some() && c.kind == CharKind::CollapsibleSpace;
                let context = match ch {
                    Some(rendered) => Some(RenderedChar {
                        ch: rendered,
                        kind: c.kind,
                    }),
                    None => preceding,
                };
                (ch, collapsible, context)
            }
        }
    }

    fn preceding_at(&mut self, a: Position) -> Option<RenderedChar> {
        if let Some(context) = self.preceding {
            return context;
        }
        let context = self.reconstruct_preceding(a);
        self.preceding = Some(context);
        context
    }

    /// Reconstruct the effective last rendered character before `pos` by
    /// walking backward to the nearest concrete character (or the range
    /// start) and replaying the tentative steps in between.
    fn reconstruct_preceding(&self, pos: Position) -> Option<RenderedChar> {
        let classifier = self.classifier();
        let mut scout = self.visible.scout(pos);
        let mut steps: Vec<(Position, Candidate)> = Vec::new();
        let mut anchor: Option<RenderedChar> = None;
        let mut b = pos;
        loop {
            if Some(b) == self.start {
                break;
            }
            let Some(a) = scout.previous() else {
                break;
            };
            if let Some(c) = candidate(&classifier, a, b) {
                if c.kind.is_concrete() {
                    anchor = Some(RenderedChar {
                        ch: c.ch,
                        kind: c.kind,
                    });
                    break;
                }
                steps.push((b, c));
            }
            b = a;
        }
        let mut preceding = anchor;
        for &(step_b, c) in steps.iter().rev() {
            if let Some(ch) = self.resolve(step_b, c, preceding) {
                preceding = Some(RenderedChar { ch, kind: c.kind });
            }
        }
        preceding
    }

    /// Decide whether a candidate character actually renders, given the
    /// last rendered character before it.
    fn resolve(
        &self,
        b: Position,
        cand: Candidate,
        preceding: Option<RenderedChar>,
    ) -> Option<char> {
        match cand.kind {
            CharKind::Text => Some(cand.ch),
            CharKind::LineBreak => Some('\n'),
            CharKind::CollapsibleSpace => {
                let p = preceding?;
                // A space directly after a rendered space, separator tab,
                // or line start never renders.
                if p.ch == '\n' || matches!(p.kind, CharKind::CollapsibleSpace | CharKind::CellTab)
                {
                    return None;
                }
                match self.run_end(b) {
                    RunEnd::Content => Some(' '),
                    RunEnd::Newline => None,
                    RunEnd::NodeEnd => match self.next_candidate_after(b) {
                        Some(k)
                            if k.ch != '\n'
                                && !matches!(
                                    k.kind,
                                    CharKind::CellTab
                                        | CharKind::LeadingSeparator
                                        | CharKind::TrailingSeparator
                                ) =>
                        {
                            Some(' ')
                        }
                        _ => None,
                    },
                }
            }
            CharKind::LeadingSeparator | CharKind::TrailingSeparator => {
                let p = preceding?;
                if p.ch == '\n' {
                    return None;
                }
                if self.concrete_follows(b) {
                    Some('\n')
                } else {
                    None
                }
            }
            CharKind::CellTab => {
                preceding?;
                match self.next_candidate_after(b) {
                    Some(k) if k.ch != '\n' => {
                        if self.concrete_follows(b) {
                            Some('\t')
                        } else {
                            None
                        }
                    }
                    _ => None,
                }
            }
        }
    }

    /// How the collapsible run containing the character before `b` ends.
    fn run_end(&self, b: Position) -> RunEnd {
        let doc = self.classifier().doc();
        let data = doc.data(b.node());
        let rules = self.classifier().rules_for(b.node());
        for c in data.chars_at(b.offset() - 1) {
            if rules.collapses(c) {
                continue;
            }
            return if c == '\n' {
                RunEnd::Newline
            } else {
                RunEnd::Content
            };
        }
        RunEnd::NodeEnd
    }

    /// First character candidate of any kind after `from`, within range.
    fn next_candidate_after(&self, from: Position) -> Option<Candidate> {
        let classifier = self.classifier();
        let mut scout = self.visible.scout(from);
        let mut a = from;
        loop {
            if Some(a) == self.end {
                return None;
            }
            let b = scout.next()?;
            if let Some(c) = candidate(&classifier, a, b) {
                return Some(c);
            }
            a = b;
        }
    }

    /// Whether a concrete character follows `from` within range. Tentative
    /// separators do not count; a chain of them with nothing concrete
    /// behind it renders nothing.
    fn concrete_follows(&self, from: Position) -> bool {
        let classifier = self.classifier();
        let mut scout = self.visible.scout(from);
        let mut a = from;
        loop {
            if Some(a) == self.end {
                return false;
            }
            let Some(b) = scout.next() else {
                return false;
            };
            if let Some(c) = candidate(&classifier, a, b) {
                if c.kind.is_concrete() {
                    return true;
                }
            }
            a = b;
        }
    }
}

impl std::fmt::Debug for TextPositionIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPositionIterator")
            .field("current", &self.visible.current())
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

/// The character (if any) the visible step `a -> b` could contribute,
/// before any context-dependent rendering decision.
fn candidate(
    classifier: &StyleClassifier<'_>,
    a: Position,
    b: Position,
) -> Option<Candidate> {
    let doc = classifier.doc();
    match doc.kind(b.node()) {
        NodeKind::Text => {
            if b.offset() == 0 {
                return None;
            }
            let data = doc.data(b.node());
            let c = data.char_at(b.offset() - 1)?;
            let rules = classifier.rules_for(b.node());
            if rules.collapses(c) {
                // Mid-run whitespace already collapsed into its predecessor.
                if b.offset() >= 2
                    && data
                        .char_at(b.offset() - 2)
                        .is_some_and(|prev| rules.collapses(prev))
                {
                    return None;
                }
                Some(Candidate {
                    ch: ' ',
                    kind: CharKind::CollapsibleSpace,
                })
            } else {
                Some(Candidate {
                    ch: c,
                    kind: CharKind::Text,
                })
            }
        }
        NodeKind::Root | NodeKind::Element => {
            if b.offset() > 0 {
                let child = doc.children(b.node())[b.offset() - 1];
                if doc.kind(child) == NodeKind::Element && !classifier.is_collapsed_node(child) {
                    if is_line_break(doc, child) {
                        return Some(Candidate {
                            ch: '\n',
                            kind: CharKind::LineBreak,
                        });
                    }
                    if let Some(ch) = classifier.trailing_space(child) {
                        let kind = if ch == '\t' {
                            CharKind::CellTab
                        } else {
                            CharKind::TrailingSeparator
                        };
                        return Some(Candidate { ch, kind });
                    }
                }
                None
            } else if b.node() != a.node() && doc.kind(b.node()) == NodeKind::Element {
                classifier.leading_space(b.node()).map(|ch| Candidate {
                    ch,
                    kind: CharKind::LeadingSeparator,
                })
            } else {
                None
            }
        }
        _ => None,
    }
}
