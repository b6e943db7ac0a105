//! Resolved style model and the style-resolution seam.
//!
//! This module provides the layout-affecting style attributes the rest of
//! the crate consumes:
//!
//! - [`Display`], [`WhiteSpace`], [`Visibility`]: resolved attribute enums
//! - [`ComputedStyle`]: the resolved triple for one node
//! - [`WhiteSpaceRules`]: bitflags describing how a whitespace mode collapses
//! - [`StyleResolver`]: the capability trait a hosting environment supplies
//! - [`TagStyles`]: a default resolver with user-agent-like tag defaults
//!
//! # Examples
//!
//! ```
//! use domtext::{Display, StyleOverride, WhiteSpace, WhiteSpaceRules};
//!
//! let rules = WhiteSpaceRules::for_mode(WhiteSpace::PreLine);
//! assert!(rules.contains(WhiteSpaceRules::COLLAPSE_SPACES));
//! assert!(!rules.contains(WhiteSpaceRules::COLLAPSE_NEWLINES));
//!
//! let hidden = StyleOverride::display(Display::None);
//! assert_eq!(hidden.display, Some(Display::None));
//! ```

use bitflags::bitflags;

use crate::dom::{Document, NodeId, NodeKind};

/// Resolved display kind of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Inline,
    Block,
    InlineBlock,
    InlineTable,
    ListItem,
    Table,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableCell,
    TableColumn,
    TableColumnGroup,
    TableCaption,
    /// The element generates no boxes at all.
    None,
}

/// Resolved whitespace processing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
}

/// Resolved visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// Resolved style triple for one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: Display,
    pub white_space: WhiteSpace,
    pub visibility: Visibility,
}

impl ComputedStyle {
    /// Style the document root resolves to.
    pub const ROOT: Self = Self {
        display: Display::Block,
        white_space: WhiteSpace::Normal,
        visibility: Visibility::Visible,
    };
}

bitflags! {
    /// Collapsing behavior of a whitespace mode.
    ///
    /// Spaces, tabs, and form feeds fall under `COLLAPSE_SPACES`; newlines
    /// and carriage returns under `COLLAPSE_NEWLINES`. A mode with neither
    /// flag preserves every character verbatim.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct WhiteSpaceRules: u8 {
        const COLLAPSE_SPACES   = 0x01;
        const COLLAPSE_NEWLINES = 0x02;
    }
}

impl WhiteSpaceRules {
    /// Rules for a resolved whitespace mode.
    #[must_use]
    pub const fn for_mode(mode: WhiteSpace) -> Self {
        match mode {
            WhiteSpace::Normal | WhiteSpace::Nowrap => {
                Self::COLLAPSE_SPACES.union(Self::COLLAPSE_NEWLINES)
            }
            WhiteSpace::PreLine => Self::COLLAPSE_SPACES,
            WhiteSpace::Pre | WhiteSpace::PreWrap => Self::empty(),
        }
    }

    /// Whether the character collapses under these rules.
    #[must_use]
    pub fn collapses(self, c: char) -> bool {
        match c {
            ' ' | '\t' | '\x0c' => self.contains(Self::COLLAPSE_SPACES),
            '\n' | '\r' => self.contains(Self::COLLAPSE_NEWLINES),
            _ => false,
        }
    }

    /// Whether any collapsing is in effect.
    #[must_use]
    pub const fn any(self) -> bool {
        !self.is_empty()
    }
}

/// Per-element resolved-style override, the raw material a resolver merges
/// over its defaults. Unset fields fall back to tag defaults (display) or
/// inherit from the nearest ancestor (whitespace, visibility).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleOverride {
    pub display: Option<Display>,
    pub white_space: Option<WhiteSpace>,
    pub visibility: Option<Visibility>,
}

impl StyleOverride {
    /// Override only the display kind.
    #[must_use]
    pub const fn display(display: Display) -> Self {
        Self {
            display: Some(display),
            white_space: None,
            visibility: None,
        }
    }

    /// Override only the whitespace mode.
    #[must_use]
    pub const fn white_space(white_space: WhiteSpace) -> Self {
        Self {
            display: None,
            white_space: Some(white_space),
            visibility: None,
        }
    }

    /// Override only the visibility.
    #[must_use]
    pub const fn visibility(visibility: Visibility) -> Self {
        Self {
            display: None,
            white_space: None,
            visibility: Some(visibility),
        }
    }

    /// Return a copy with the display kind set.
    #[must_use]
    pub const fn with_display(self, display: Display) -> Self {
        Self {
            display: Some(display),
            ..self
        }
    }

    /// Return a copy with the whitespace mode set.
    #[must_use]
    pub const fn with_white_space(self, white_space: WhiteSpace) -> Self {
        Self {
            white_space: Some(white_space),
            ..self
        }
    }

    /// Return a copy with the visibility set.
    #[must_use]
    pub const fn with_visibility(self, visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
            ..self
        }
    }
}

/// Style-resolution capability.
///
/// Implementations must be pure with respect to the document at the moment
/// of the call. Resolution may be expensive; the core never caches results
/// across iterator instances.
pub trait StyleResolver {
    /// Resolved style for a node. Called for the root and for elements.
    fn computed_style(&self, doc: &Document, node: NodeId) -> ComputedStyle;
}

/// Default resolver: user-agent-like display defaults per tag name, merged
/// with each element's [`StyleOverride`]. Whitespace mode and visibility
/// inherit from the nearest ancestor that sets them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagStyles;

impl TagStyles {
    fn default_display(tag: &str) -> Display {
        match tag {
            "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "dl" | "dt"
            | "dd" | "blockquote" | "pre" | "address" | "article" | "aside" | "section"
            | "header" | "footer" | "nav" | "main" | "figure" | "figcaption" | "fieldset"
            | "form" | "hr" | "body" | "html" => Display::Block,
            "li" => Display::ListItem,
            "table" => Display::Table,
            "thead" => Display::TableHeaderGroup,
            "tbody" => Display::TableRowGroup,
            "tfoot" => Display::TableFooterGroup,
            "tr" => Display::TableRow,
            "td" | "th" => Display::TableCell,
            "col" => Display::TableColumn,
            "colgroup" => Display::TableColumnGroup,
            "caption" => Display::TableCaption,
            "head" | "meta" | "link" | "base" | "title" | "script" | "style" | "template" => {
                Display::None
            }
            _ => Display::Inline,
        }
    }

    fn default_white_space(tag: &str) -> Option<WhiteSpace> {
        match tag {
            "pre" | "textarea" => Some(WhiteSpace::Pre),
            _ => None,
        }
    }

    fn inherited_white_space(doc: &Document, node: NodeId) -> WhiteSpace {
        for n in doc.ancestors_or_self(node) {
            if doc.kind(n) != NodeKind::Element {
                continue;
            }
            if let Some(ws) = doc.style_override(n).white_space {
                return ws;
            }
            if let Some(ws) = Self::default_white_space(doc.tag(n)) {
                return ws;
            }
        }
        WhiteSpace::Normal
    }

    fn inherited_visibility(doc: &Document, node: NodeId) -> Visibility {
        for n in doc.ancestors_or_self(node) {
            if doc.kind(n) != NodeKind::Element {
                continue;
            }
            if let Some(v) = doc.style_override(n).visibility {
                return v;
            }
        }
        Visibility::Visible
    }
}

impl StyleResolver for TagStyles {
    fn computed_style(&self, doc: &Document, node: NodeId) -> ComputedStyle {
        if doc.kind(node) != NodeKind::Element {
            return ComputedStyle::ROOT;
        }
        let over = doc.style_override(node);
        ComputedStyle {
            display: over
                .display
                .unwrap_or_else(|| Self::default_display(doc.tag(node))),
            white_space: Self::inherited_white_space(doc, node),
            visibility: Self::inherited_visibility(doc, node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_space_rules() {
        let normal = WhiteSpaceRules::for_mode(WhiteSpace::Normal);
        assert!(normal.collapses(' '));
        assert!(normal.collapses('\n'));
        assert!(!normal.collapses('x'));

        let pre_line = WhiteSpaceRules::for_mode(WhiteSpace::PreLine);
        assert!(pre_line.collapses('\t'));
        assert!(!pre_line.collapses('\n'));

        let pre = WhiteSpaceRules::for_mode(WhiteSpace::Pre);
        assert!(!pre.any());
    }

    #[test]
    fn test_tag_defaults() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root(), "div");
        let span = doc.append_element(doc.root(), "span");
        let td = doc.append_element(doc.root(), "td");

        let resolver = TagStyles;
        assert_eq!(resolver.computed_style(&doc, div).display, Display::Block);
        assert_eq!(resolver.computed_style(&doc, span).display, Display::Inline);
        assert_eq!(
            resolver.computed_style(&doc, td).display,
            Display::TableCell
        );
    }

    #[test]
    fn test_override_beats_default() {
        let mut doc = Document::new();
        let span = doc.append_element(doc.root(), "span");
        doc.set_style_override(span, StyleOverride::display(Display::Block));

        let resolver = TagStyles;
        assert_eq!(resolver.computed_style(&doc, span).display, Display::Block);
    }

    #[test]
    fn test_white_space_inherits() {
        let mut doc = Document::new();
        let pre = doc.append_element(doc.root(), "pre");
        let span = doc.append_element(pre, "span");

        let resolver = TagStyles;
        assert_eq!(
            resolver.computed_style(&doc, span).white_space,
            WhiteSpace::Pre
        );
    }

    #[test]
    fn test_visibility_inherits() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root(), "div");
        doc.set_style_override(div, StyleOverride::visibility(Visibility::Hidden));
        let span = doc.append_element(div, "span");

        let resolver = TagStyles;
        assert_eq!(
            resolver.computed_style(&doc, span).visibility,
            Visibility::Hidden
        );
    }
}
