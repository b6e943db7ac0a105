//! Snapshot coverage over a representative fixture document.

mod common;

use common::{block_with_text, inner_text, rendered_all};
use domtext::{Display, Document, NodeId, StyleOverride};

/// A small article: heading, paragraph with inline runs, a table, hidden
/// matter, preformatted code, and an explicit line break.
fn fixture() -> (Document, NodeId) {
    let mut doc = Document::new();
    let article = doc.append_element(doc.root(), "div");

    block_with_text(&mut doc, article, "h1", "  Domtext  ");

    let p = doc.append_element(article, "p");
    doc.append_text(p, "Collapse   runs");
    block_with_text(&mut doc, p, "span", " of ");
    doc.append_text(p, "spaces ");

    doc.append_comment(article, "toc");

    let table = doc.append_element(article, "table");
    let r1 = doc.append_element(table, "tr");
    block_with_text(&mut doc, r1, "td", "Name");
    block_with_text(&mut doc, r1, "td", "Qty");
    let r2 = doc.append_element(table, "tr");
    block_with_text(&mut doc, r2, "td", "Bolt");
    block_with_text(&mut doc, r2, "td", "12");

    let hidden = doc.append_element(article, "div");
    doc.set_style_override(hidden, StyleOverride::display(Display::None));
    block_with_text(&mut doc, hidden, "p", "secret");

    block_with_text(&mut doc, article, "pre", "if x:\n    go()");

    let tail = doc.append_element(article, "p");
    doc.append_text(tail, "End");
    doc.append_element(tail, "br");
    doc.append_text(tail, "line");

    (doc, table)
}

#[test]
fn test_article_rendering() {
    let (doc, _) = fixture();
    insta::assert_debug_snapshot!(
        rendered_all(&doc),
        @r#""Domtext\nCollapse runs of spaces\nName\tQty\nBolt\t12\nif x:\n    go()\nEnd\nline""#
    );
}

#[test]
fn test_table_inner_text() {
    let (doc, table) = fixture();
    insta::assert_debug_snapshot!(
        inner_text(&doc, table),
        @r#""Name\tQty\nBolt\t12""#
    );
}
