//! Style-driven node classification.
//!
//! [`StyleClassifier`] bundles a document with a style resolver and answers
//! the questions the position iterators ask: which nodes start blocks, which
//! subtrees render nothing, which whitespace runs collapse away entirely,
//! and which implicit separator an element contributes at its edges.

use crate::dom::{Document, NodeId, NodeKind};
use crate::style::{ComputedStyle, Display, StyleResolver, Visibility, WhiteSpaceRules};

/// Elements that cannot contain positions.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose character content never renders, whatever the resolver
/// says about the element itself.
const NON_RENDERED_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// True for elements that cannot contain positions (line breaks and other
/// self-closing form/media elements).
#[must_use]
pub fn is_void_element(doc: &Document, node: NodeId) -> bool {
    doc.kind(node) == NodeKind::Element && VOID_TAGS.contains(&doc.tag(node))
}

/// True for line-break elements.
#[must_use]
pub fn is_line_break(doc: &Document, node: NodeId) -> bool {
    doc.kind(node) == NodeKind::Element && doc.tag(node) == "br"
}

/// True for image elements.
#[must_use]
pub fn is_image(doc: &Document, node: NodeId) -> bool {
    doc.kind(node) == NodeKind::Element && doc.tag(node) == "img"
}

/// Whether the raw iterator may descend into this node.
#[must_use]
pub fn can_contain_positions(doc: &Document, node: NodeId) -> bool {
    match doc.kind(node) {
        NodeKind::Element => !is_void_element(doc, node),
        NodeKind::Root => true,
        kind => kind.is_character_data(),
    }
}

/// Outcome of one probe of the whitespace boundary scan.
enum Probe {
    /// A block boundary or line break forces the whitespace invisible.
    Forces,
    /// Rendered content anchors the whitespace as visible.
    Anchors,
    /// Nothing decisive; keep scanning, optionally inside this node.
    Transparent { descend: bool },
}

/// Pure predicates over a node plus its resolved style.
#[derive(Clone, Copy)]
pub struct StyleClassifier<'a> {
    doc: &'a Document,
    styles: &'a dyn StyleResolver,
}

impl<'a> StyleClassifier<'a> {
    /// Create a classifier over a document and resolver.
    #[must_use]
    pub fn new(doc: &'a Document, styles: &'a dyn StyleResolver) -> Self {
        Self { doc, styles }
    }

    /// The underlying document.
    #[must_use]
    pub fn doc(&self) -> &'a Document {
        self.doc
    }

    fn style(&self, node: NodeId) -> ComputedStyle {
        self.styles.computed_style(self.doc, node)
    }

    /// Collapsing rules governing a character-data node, taken from its
    /// parent's resolved whitespace mode.
    #[must_use]
    pub fn rules_for(&self, node: NodeId) -> WhiteSpaceRules {
        let mode = match self.doc.parent(node) {
            Some(p) if self.doc.kind(p) == NodeKind::Element => self.style(p).white_space,
            _ => ComputedStyle::ROOT.white_space,
        };
        WhiteSpaceRules::for_mode(mode)
    }

    /// True if the node starts a new line: the root, or an element whose
    /// resolved display is not inline-level or none.
    #[must_use]
    pub fn is_block_node(&self, node: NodeId) -> bool {
        match self.doc.kind(node) {
            NodeKind::Root => true,
            NodeKind::Element => !matches!(
                self.style(node).display,
                Display::Inline | Display::InlineBlock | Display::InlineTable | Display::None
            ),
            _ => false,
        }
    }

    /// True for a text node that is empty or consists solely of whitespace
    /// that collapses under its parent's whitespace mode.
    #[must_use]
    pub fn is_whitespace_node(&self, node: NodeId) -> bool {
        if self.doc.kind(node) != NodeKind::Text {
            return false;
        }
        let data = self.doc.data(node);
        if data.is_empty() {
            return true;
        }
        let rules = self.rules_for(node);
        if !rules.any() {
            return false;
        }
        data.chars_at(0).all(|c| rules.collapses(c))
    }

    /// True if any ancestor-or-self element resolves display none.
    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.doc
            .ancestors_or_self(node)
            .filter(|&n| self.doc.kind(n) == NodeKind::Element)
            .any(|n| self.style(n).display == Display::None)
    }

    /// True for a whitespace text node that renders nothing at all: it is
    /// hidden, or a block boundary or line break adjoins the run on either
    /// side before any rendered content does.
    #[must_use]
    pub fn is_collapsed_whitespace_node(&self, node: NodeId) -> bool {
        if !self.is_whitespace_node(node) {
            return false;
        }
        if self.is_hidden(node) {
            return true;
        }
        if self.doc.data(node).is_empty() {
            return true;
        }
        self.scan_forces_invisible(node, false) || self.scan_forces_invisible(node, true)
    }

    /// True for nodes whose whole subtree contributes no rendered
    /// characters.
    #[must_use]
    pub fn is_collapsed_node(&self, node: NodeId) -> bool {
        match self.doc.kind(node) {
            NodeKind::Comment | NodeKind::ProcessingInstruction => true,
            NodeKind::Root => false,
            NodeKind::Element => {
                self.is_hidden(node) || NON_RENDERED_CONTENT_TAGS.contains(&self.doc.tag(node))
            }
            NodeKind::Text => {
                if self.is_hidden(node) {
                    return true;
                }
                match self.doc.parent(node) {
                    Some(p) if self.doc.kind(p) == NodeKind::Element => {
                        if NON_RENDERED_CONTENT_TAGS.contains(&self.doc.tag(p)) {
                            return true;
                        }
                        if self.style(p).visibility != Visibility::Visible {
                            return true;
                        }
                    }
                    _ => {}
                }
                self.is_collapsed_whitespace_node(node)
            }
        }
    }

    /// True if the position's node lies inside a collapsed subtree.
    #[must_use]
    pub fn is_in_collapsed_subtree(&self, node: NodeId) -> bool {
        self.doc
            .ancestors_or_self(node)
            .any(|n| self.is_collapsed_node(n))
    }

    /// Implicit separator an element contributes before its content.
    ///
    /// Inline elements delegate to their first non-collapsed child; table
    /// cells and the inline-level and columnar displays contribute nothing;
    /// every other display contributes a newline.
    #[must_use]
    pub fn leading_space(&self, node: NodeId) -> Option<char> {
        self.edge_space(node, true)
    }

    /// Implicit separator an element contributes after its content.
    ///
    /// Table cells contribute a tab; block-like displays contribute a
    /// newline only when the element has renderable inner content.
    #[must_use]
    pub fn trailing_space(&self, node: NodeId) -> Option<char> {
        self.edge_space(node, false)
    }

    fn edge_space(&self, node: NodeId, leading: bool) -> Option<char> {
        let mut cur = node;
        loop {
            if self.doc.kind(cur) != NodeKind::Element {
                return None;
            }
            match self.style(cur).display {
                Display::Inline => {
                    // Delegate to the edge-most child that still renders.
                    let children = self.doc.children(cur);
                    let pick = |&&c: &&NodeId| !self.is_collapsed_node(c);
                    let child = if leading {
                        children.iter().find(pick)
                    } else {
                        children.iter().rev().find(pick)
                    };
                    cur = *child?;
                }
                Display::InlineBlock
                | Display::InlineTable
                | Display::None
                | Display::TableColumn
                | Display::TableColumnGroup => return None,
                Display::TableCell => return if leading { None } else { Some('\t') },
                _ => {
                    return if leading || self.has_rendered_content(cur) {
                        Some('\n')
                    } else {
                        None
                    };
                }
            }
        }
    }

    /// Whether the element's subtree contains anything that renders: text
    /// outside collapsed runs, a line break, or an image.
    #[must_use]
    pub fn has_rendered_content(&self, node: NodeId) -> bool {
        let mut stack: Vec<NodeId> = self.doc.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            if self.is_collapsed_node(n) {
                continue;
            }
            match self.doc.kind(n) {
                NodeKind::Text => return true,
                NodeKind::Element => {
                    if is_line_break(self.doc, n) || is_image(self.doc, n) {
                        return true;
                    }
                    stack.extend(self.doc.children(n).iter().rev());
                }
                _ => {}
            }
        }
        false
    }

    /// One direction of the whitespace boundary scan: walk document order
    /// away from the node until something decides the run's fate.
    fn scan_forces_invisible(&self, start: NodeId, forward: bool) -> bool {
        let mut cur = start;
        let mut descend = false;
        loop {
            // Advance one node in (reverse) document order.
            let next = if descend {
                if forward {
                    self.doc.first_child(cur)
                } else {
                    self.doc.last_child(cur)
                }
            } else {
                None
            };
            cur = match next {
                Some(c) => c,
                None => loop {
                    let sibling = if forward {
                        self.doc.next_sibling(cur)
                    } else {
                        self.doc.prev_sibling(cur)
                    };
                    if let Some(s) = sibling {
                        break s;
                    }
                    match self.doc.parent(cur) {
                        // Ran off the tree without a boundary: treat as one.
                        None => return true,
                        Some(p) => {
                            if self.is_block_node(p) {
                                return true;
                            }
                            cur = p;
                        }
                    }
                },
            };
            match self.probe(cur) {
                Probe::Forces => return true,
                Probe::Anchors => return false,
                Probe::Transparent { descend: d } => descend = d,
            }
        }
    }

    fn probe(&self, node: NodeId) -> Probe {
        match self.doc.kind(node) {
            NodeKind::Comment | NodeKind::ProcessingInstruction => {
                Probe::Transparent { descend: false }
            }
            NodeKind::Text => {
                if self.is_whitespace_node(node) {
                    Probe::Transparent { descend: false }
                } else {
                    Probe::Anchors
                }
            }
            NodeKind::Element => {
                if self.is_hidden(node) {
                    return Probe::Transparent { descend: false };
                }
                if is_line_break(self.doc, node) {
                    return Probe::Forces;
                }
                if self.is_block_node(node) {
                    return Probe::Forces;
                }
                if is_image(self.doc, node) {
                    return Probe::Anchors;
                }
                Probe::Transparent { descend: true }
            }
            NodeKind::Root => Probe::Forces,
        }
    }
}

impl std::fmt::Debug for StyleClassifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleClassifier").finish_non_exhaustive()
    }
}
