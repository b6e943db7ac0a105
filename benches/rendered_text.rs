//! Rendered-text extraction and position iteration benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use domtext::{
    Document, Position, PositionIterator, RawPositionIterator, StyleClassifier, TagStyles,
    TextRenderer,
};
use std::hint::black_box;

/// A flat page: `n` paragraphs of prose with an inline span each.
fn paragraphs(n: usize) -> Document {
    let mut doc = Document::new();
    for i in 0..n {
        let p = doc.append_element(doc.root(), "p");
        doc.append_text(p, "The quick brown fox  jumps ");
        let span = doc.append_element(p, "span");
        doc.append_text(span, "over the lazy dog");
        doc.append_text(p, if i % 2 == 0 { " again. " } else { "." });
    }
    doc
}

/// A table with `rows` rows of four cells.
fn table(rows: usize) -> Document {
    let mut doc = Document::new();
    let table = doc.append_element(doc.root(), "table");
    for _ in 0..rows {
        let tr = doc.append_element(table, "tr");
        for text in ["alpha", "beta", "gamma", "delta"] {
            let td = doc.append_element(tr, "td");
            doc.append_text(td, text);
        }
    }
    doc
}

fn raw_iteration(c: &mut Criterion) {
    let doc = paragraphs(50);
    c.bench_function("raw_walk_50_paragraphs", |b| {
        b.iter(|| {
            let mut it =
                RawPositionIterator::new(black_box(&doc), Position::tree_start(&doc)).unwrap();
            let mut count = 0usize;
            while it.next().is_some() {
                count += 1;
            }
            count
        });
    });
}

fn classification(c: &mut Criterion) {
    let doc = paragraphs(50);
    let classifier = StyleClassifier::new(&doc, &TagStyles);
    let first_p = doc.children(doc.root())[0];
    c.bench_function("classify_block_node", |b| {
        b.iter(|| classifier.is_block_node(black_box(first_p)));
    });
    c.bench_function("classify_has_rendered_content", |b| {
        b.iter(|| classifier.has_rendered_content(black_box(first_p)));
    });
}

fn extraction(c: &mut Criterion) {
    let prose = paragraphs(50);
    c.bench_function("rendered_text_50_paragraphs", |b| {
        let renderer = TextRenderer::builder(&prose)
            .styles(&TagStyles)
            .build()
            .unwrap();
        b.iter(|| {
            renderer
                .rendered_text(Position::tree_start(&prose), Position::tree_end(&prose))
                .unwrap()
        });
    });

    let grid = table(25);
    c.bench_function("rendered_text_table_25_rows", |b| {
        let renderer = TextRenderer::builder(&grid)
            .styles(&TagStyles)
            .build()
            .unwrap();
        b.iter(|| {
            renderer
                .rendered_text(Position::tree_start(&grid), Position::tree_end(&grid))
                .unwrap()
        });
    });
}

criterion_group!(benches, raw_iteration, classification, extraction);
criterion_main!(benches);
