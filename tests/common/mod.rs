#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every helper is used by every test binary

use domtext::{Document, NodeId, Position, TagStyles, TextRenderer};

/// Append an element containing a single text child; returns the element.
pub fn block_with_text(doc: &mut Document, parent: NodeId, tag: &str, text: &str) -> NodeId {
    let el = doc.append_element(parent, tag);
    doc.append_text(el, text);
    el
}

/// Rendered text of a node's subtree under the default resolver.
pub fn inner_text(doc: &Document, node: NodeId) -> String {
    TextRenderer::builder(doc)
        .styles(&TagStyles)
        .build()
        .expect("resolver supplied")
        .inner_text(node)
        .expect("node belongs to doc")
}

/// Rendered text between two boundaries under the default resolver.
pub fn rendered(doc: &Document, start: Position, end: Position) -> String {
    TextRenderer::builder(doc)
        .styles(&TagStyles)
        .build()
        .expect("resolver supplied")
        .rendered_text(start, end)
        .expect("positions belong to doc")
}

/// Rendered text of the whole tree.
pub fn rendered_all(doc: &Document) -> String {
    rendered(doc, Position::tree_start(doc), Position::tree_end(doc))
}
