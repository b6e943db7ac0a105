//! `domtext` - Rendered-text extraction over styled document trees
//!
//! Given a tree of elements, text, and comments annotated with
//! layout-affecting style attributes (display kind, whitespace mode,
//! visibility), this crate computes the linear text the document would
//! present to a reader - the same text a person would select on a rendered
//! page - and provides bidirectional, position-accurate iteration over it,
//! so arbitrary (node, offset) boundaries map to and from character
//! positions in the flattened string.
//!
//! The layers, leaves first: [`StyleClassifier`] answers pure style
//! questions; [`RawPositionIterator`] walks every tree position;
//! [`VisiblePositionIterator`] skips collapsed subtrees;
//! [`TextPositionIterator`] derives one rendered character (or none) per
//! step; [`TextRenderer`] exposes `rendered_text` and `inner_text`.

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // TextPositionIterator etc. read better qualified
#![allow(clippy::missing_const_for_fn)] // Many accessors could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::must_use_candidate)] // Reserved for accessors where it matters
#![allow(clippy::redundant_pub_crate)] // Explicit pub(crate) on internals is intentional
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::if_not_else)] // Guard-style branches read better as written
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional

pub mod classify;
pub mod dom;
pub mod error;
pub mod iter;
pub mod position;
pub mod render;
pub mod style;
pub mod trace;

// Re-export core types at crate root
pub use classify::StyleClassifier;
pub use dom::{CharData, Document, NodeId, NodeKind};
pub use error::{Error, Result};
pub use iter::{
    PositionIterator, RawPositionIterator, TextPosition, TextPositionIterator,
    VisiblePositionIterator,
};
pub use position::Position;
pub use render::{TextRenderer, TextRendererBuilder};
pub use style::{
    ComputedStyle, Display, StyleOverride, StyleResolver, TagStyles, Visibility, WhiteSpace,
    WhiteSpaceRules,
};
pub use trace::{NoTrace, TraceSink};

#[cfg(feature = "tracing")]
pub use trace::TracingSink;
