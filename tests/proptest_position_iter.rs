//! Property tests: the inverse law and extraction invariants over random
//! styled trees.

use domtext::{
    Document, NodeId, Position, PositionIterator, RawPositionIterator, StyleClassifier, TagStyles,
    TextPositionIterator, TextRenderer, VisiblePositionIterator,
};
use proptest::prelude::*;

const TAGS: &[&str] = &[
    "div", "span", "p", "b", "em", "pre", "table", "tr", "td", "li", "ul", "br", "img",
];

const VOID_TAGS: &[&str] = &["br", "img"];

#[derive(Clone, Debug)]
enum NodeSpec {
    Element {
        tag: &'static str,
        children: Vec<NodeSpec>,
    },
    Text(String),
    Comment(String),
}

fn tag_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(TAGS.to_vec())
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'b', 'c', ' ', ' ', '\n', '\t']),
        0..6,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn node_spec() -> impl Strategy<Value = NodeSpec> {
    let leaf = prop_oneof![
        4 => text_strategy().prop_map(NodeSpec::Text),
        1 => "[a-z]{0,4}".prop_map(NodeSpec::Comment),
        1 => tag_strategy().prop_map(|tag| NodeSpec::Element {
            tag,
            children: Vec::new(),
        }),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        (tag_strategy(), prop::collection::vec(inner, 0..4)).prop_map(|(tag, children)| {
            NodeSpec::Element { tag, children }
        })
    })
}

fn doc_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec(node_spec(), 0..5).prop_map(|specs| {
        let mut doc = Document::new();
        for spec in &specs {
            build(&mut doc, NodeId::ROOT, spec);
        }
        doc
    })
}

fn build(doc: &mut Document, parent: NodeId, spec: &NodeSpec) {
    match spec {
        NodeSpec::Text(t) => {
            doc.append_text(parent, t);
        }
        NodeSpec::Comment(t) => {
            doc.append_comment(parent, t);
        }
        NodeSpec::Element { tag, children } => {
            let el = doc.append_element(parent, tag);
            if !VOID_TAGS.contains(tag) {
                for child in children {
                    build(doc, el, child);
                }
            }
        }
    }
}

fn raw_trail(doc: &Document) -> Vec<Position> {
    let mut it = RawPositionIterator::new(doc, Position::tree_start(doc)).unwrap();
    let mut trail = vec![it.current()];
    while let Some(p) = it.next() {
        trail.push(p);
    }
    trail
}

proptest! {
    #[test]
    fn raw_iterator_is_invertible(doc in doc_strategy()) {
        let trail = raw_trail(&doc);
        let mut it = RawPositionIterator::new(&doc, *trail.last().unwrap()).unwrap();
        for expected in trail.iter().rev().skip(1) {
            prop_assert_eq!(it.previous(), Some(*expected));
        }
        prop_assert_eq!(it.previous(), None);
    }

    #[test]
    fn visible_iterator_is_invertible(doc in doc_strategy()) {
        let classifier = StyleClassifier::new(&doc, &TagStyles);
        let mut it =
            VisiblePositionIterator::new(classifier, Position::tree_start(&doc)).unwrap();
        let mut trail = vec![it.current()];
        while let Some(p) = it.next() {
            trail.push(p);
        }
        for expected in trail.iter().rev().skip(1) {
            prop_assert_eq!(it.previous(), Some(*expected));
        }
    }

    #[test]
    fn text_iterator_is_invertible(doc in doc_strategy()) {
        let classifier = StyleClassifier::new(&doc, &TagStyles);
        let mut it = TextPositionIterator::new(classifier, None).unwrap();
        let mut forward = Vec::new();
        while let Some(tp) = it.next() {
            forward.push(tp);
        }
        let mut backward = Vec::new();
        while let Some(tp) = it.previous() {
            backward.push(tp);
        }
        backward.reverse();
        prop_assert_eq!(backward.len(), forward.len());
        if !forward.is_empty() {
            prop_assert_eq!(&backward[1..], &forward[..forward.len() - 1]);
        }
    }

    #[test]
    fn extraction_matches_iterator_walk(doc in doc_strategy()) {
        let renderer = TextRenderer::builder(&doc).styles(&TagStyles).build().unwrap();
        let extracted = renderer
            .rendered_text(Position::tree_start(&doc), Position::tree_end(&doc))
            .unwrap();

        let classifier = StyleClassifier::new(&doc, &TagStyles);
        let mut it = TextPositionIterator::new(classifier, None).unwrap();
        let mut walked = String::new();
        while let Some(tp) = it.next() {
            if let Some(c) = tp.ch() {
                walked.push(c);
            }
        }
        prop_assert_eq!(extracted, walked);
    }

    #[test]
    fn empty_ranges_render_nothing(doc in doc_strategy()) {
        let renderer = TextRenderer::builder(&doc).styles(&TagStyles).build().unwrap();
        for p in raw_trail(&doc) {
            prop_assert_eq!(renderer.rendered_text(p, p).unwrap(), "");
        }
    }

    #[test]
    fn adjust_position_is_idempotent(doc in doc_strategy()) {
        let classifier = StyleClassifier::new(&doc, &TagStyles);
        for p in raw_trail(&doc) {
            let once = TextPositionIterator::adjust_position(&classifier, p).unwrap();
            let twice = TextPositionIterator::adjust_position(&classifier, once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn hidden_trees_render_nothing(doc in doc_strategy()) {
        // Re-rooting the whole tree under a display:none wrapper must
        // erase every character.
        let mut wrapped = Document::new();
        let wrapper = wrapped.append_element(wrapped.root(), "div");
        wrapped.set_style_override(
            wrapper,
            domtext::StyleOverride::display(domtext::Display::None),
        );
        copy_children(&doc, doc.root(), &mut wrapped, wrapper);

        let renderer = TextRenderer::builder(&wrapped)
            .styles(&TagStyles)
            .build()
            .unwrap();
        let text = renderer
            .rendered_text(Position::tree_start(&wrapped), Position::tree_end(&wrapped))
            .unwrap();
        prop_assert_eq!(text, "");
    }
}

fn copy_children(src: &Document, from: NodeId, dst: &mut Document, to: NodeId) {
    for &child in src.children(from) {
        match src.kind(child) {
            domtext::NodeKind::Element => {
                let el = dst.append_element(to, src.tag(child));
                dst.set_style_override(el, *src.style_override(child));
                copy_children(src, child, dst, el);
            }
            domtext::NodeKind::Text => {
                dst.append_text(to, &src.data(child).to_string());
            }
            domtext::NodeKind::Comment => {
                dst.append_comment(to, &src.data(child).to_string());
            }
            domtext::NodeKind::ProcessingInstruction => {
                dst.append_processing_instruction(
                    to,
                    src.tag(child),
                    &src.data(child).to_string(),
                );
            }
            domtext::NodeKind::Root => {}
        }
    }
}
