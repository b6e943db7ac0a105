//! Consumer-facing rendered-text extraction.
//!
//! [`TextRenderer`] bundles a document with the style-resolution capability
//! and exposes the two extraction queries plus direct iterator
//! construction. Building a renderer without a resolver is the one-time
//! capability failure; there is no load-time probe or global state.
//!
//! # Examples
//!
//! ```
//! use domtext::{Document, TagStyles, TextRenderer};
//!
//! let mut doc = Document::new();
//! let div = doc.append_element(doc.root(), "div");
//! doc.append_text(div, "hello  world ");
//!
//! let renderer = TextRenderer::builder(&doc).styles(&TagStyles).build().unwrap();
//! assert_eq!(renderer.inner_text(div).unwrap(), "hello world");
//! ```

use crate::classify::StyleClassifier;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::iter::TextPositionIterator;
use crate::position::Position;
use crate::style::StyleResolver;
use crate::trace::{NO_TRACE, TraceSink};

/// Rendered-text extraction over one document.
pub struct TextRenderer<'a> {
    doc: &'a Document,
    styles: &'a dyn StyleResolver,
    trace: &'a dyn TraceSink,
}

impl<'a> TextRenderer<'a> {
    /// Start building a renderer for a document.
    #[must_use]
    pub fn builder(doc: &'a Document) -> TextRendererBuilder<'a> {
        TextRendererBuilder {
            doc,
            styles: None,
            trace: None,
        }
    }

    /// The classifier this renderer derives from its configuration.
    #[must_use]
    pub fn classifier(&self) -> StyleClassifier<'a> {
        StyleClassifier::new(self.doc, self.styles)
    }

    /// Construct a text position iterator, optionally bounded.
    ///
    /// # Errors
    ///
    /// Rejects range positions that do not belong to this document.
    pub fn text_positions(
        &self,
        range: Option<(Position, Position)>,
    ) -> Result<TextPositionIterator<'a>> {
        TextPositionIterator::with_trace(self.classifier(), range, None, self.trace)
    }

    /// The linear rendered text between two boundaries: concatenates the
    /// character attached to each step until the end boundary is reached.
    /// `rendered_text(p, p)` is empty for any `p`.
    ///
    /// # Errors
    ///
    /// Rejects positions that do not belong to this document.
    pub fn rendered_text(&self, start: Position, end: Position) -> Result<String> {
        let mut it = self.text_positions(Some((start, end)))?;
        let mut out = String::new();
        while let Some(tp) = it.next() {
            if let Some(c) = tp.ch() {
                out.push(c);
            }
        }
        Ok(out)
    }

    /// The rendered text of a node's full subtree.
    ///
    /// # Errors
    ///
    /// Rejects nodes that do not belong to this document.
    pub fn inner_text(&self, node: NodeId) -> Result<String> {
        if !self.doc.contains(node) {
            return Err(Error::UnknownNode(node));
        }
        let start = Position::node_start(self.doc, node)?;
        let end = Position::node_end(self.doc, node)?;
        self.rendered_text(start, end)
    }
}

impl std::fmt::Debug for TextRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer").finish_non_exhaustive()
    }
}

/// Builder for [`TextRenderer`]. The style resolver is the required
/// capability; the trace sink defaults to a no-op.
pub struct TextRendererBuilder<'a> {
    doc: &'a Document,
    styles: Option<&'a dyn StyleResolver>,
    trace: Option<&'a dyn TraceSink>,
}

impl<'a> TextRendererBuilder<'a> {
    /// Supply the style-resolution capability.
    #[must_use]
    pub fn styles(mut self, styles: &'a dyn StyleResolver) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Supply a diagnostic trace sink.
    #[must_use]
    pub fn trace(mut self, trace: &'a dyn TraceSink) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Build the renderer.
    ///
    /// # Errors
    ///
    /// [`Error::StyleResolutionUnavailable`] if no resolver was supplied.
    pub fn build(self) -> Result<TextRenderer<'a>> {
        let styles = self.styles.ok_or(Error::StyleResolutionUnavailable)?;
        Ok(TextRenderer {
            doc: self.doc,
            styles,
            trace: self.trace.unwrap_or(&NO_TRACE),
        })
    }
}

impl std::fmt::Debug for TextRendererBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRendererBuilder")
            .field("has_styles", &self.styles.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TagStyles;

    #[test]
    fn test_missing_resolver_is_fatal() {
        let doc = Document::new();
        let err = TextRenderer::builder(&doc).build().unwrap_err();
        assert_eq!(err, Error::StyleResolutionUnavailable);
    }

    #[test]
    fn test_empty_range() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root(), "div");
        doc.append_text(div, "abc");

        let renderer = TextRenderer::builder(&doc).styles(&TagStyles).build().unwrap();
        let p = Position::new(&doc, div, 0).unwrap();
        assert_eq!(renderer.rendered_text(p, p).unwrap(), "");
    }

    #[test]
    fn test_inner_text_subrange() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root(), "div");
        let text = doc.append_text(div, "hello");

        let renderer = TextRenderer::builder(&doc).styles(&TagStyles).build().unwrap();
        let start = Position::new(&doc, text, 1).unwrap();
        let end = Position::new(&doc, text, 4).unwrap();
        assert_eq!(renderer.rendered_text(start, end).unwrap(), "ell");
    }

    #[test]
    fn test_inner_text_of_unknown_node() {
        let mut other = Document::new();
        let foreign = other.append_element(other.root(), "div");
        for _ in 0..10 {
            other.append_element(other.root(), "div");
        }

        let doc = Document::new();
        let renderer = TextRenderer::builder(&doc).styles(&TagStyles).build().unwrap();
        assert!(matches!(
            renderer.inner_text(foreign),
            Err(Error::UnknownNode(_)) | Err(Error::InvalidPosition { .. })
        ));
    }
}
