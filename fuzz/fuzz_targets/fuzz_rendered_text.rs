//! Fuzz rendered-text extraction and the inverse law over arbitrary trees.

#![no_main]

use arbitrary::Arbitrary;
use domtext::{
    Document, NodeId, Position, StyleClassifier, TagStyles, TextPositionIterator, TextRenderer,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum NodeSpec {
    Element { tag: u8, children: Vec<NodeSpec> },
    Text(String),
    Comment(String),
}

const TAGS: &[&str] = &[
    "div", "span", "p", "b", "pre", "table", "tr", "td", "li", "br", "img", "script",
];

fn build(doc: &mut Document, parent: NodeId, spec: &NodeSpec, depth: usize) {
    if depth > 6 {
        return;
    }
    match spec {
        NodeSpec::Text(t) => {
            doc.append_text(parent, t);
        }
        NodeSpec::Comment(t) => {
            doc.append_comment(parent, t);
        }
        NodeSpec::Element { tag, children } => {
            let tag = TAGS[*tag as usize % TAGS.len()];
            let el = doc.append_element(parent, tag);
            if tag != "br" && tag != "img" {
                for child in children.iter().take(8) {
                    build(doc, el, child, depth + 1);
                }
            }
        }
    }
}

fuzz_target!(|specs: Vec<NodeSpec>| {
    let mut doc = Document::new();
    for spec in specs.iter().take(16) {
        build(&mut doc, doc.root(), spec, 0);
    }

    let renderer = TextRenderer::builder(&doc)
        .styles(&TagStyles)
        .build()
        .expect("resolver supplied");
    let _ = renderer
        .rendered_text(Position::tree_start(&doc), Position::tree_end(&doc))
        .expect("whole-tree range is valid");

    // Forward and backward iteration must agree on every boundary.
    let classifier = StyleClassifier::new(&doc, &TagStyles);
    let mut it = TextPositionIterator::new(classifier, None).expect("tree start is valid");
    let mut forward = Vec::new();
    while let Some(tp) = it.next() {
        forward.push(tp);
    }
    let mut backward = Vec::new();
    while let Some(tp) = it.previous() {
        backward.push(tp);
    }
    backward.reverse();
    assert_eq!(backward.len(), forward.len());
    if !forward.is_empty() {
        assert_eq!(&backward[1..], &forward[..forward.len() - 1]);
    }
});
