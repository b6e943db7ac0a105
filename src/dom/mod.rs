//! Arena-backed document tree.
//!
//! The tree is built once through the `append_*` methods and then treated as
//! read-only by the rest of the crate. Nodes are addressed by [`NodeId`], a
//! compact index into the arena; parents own their children as an ordered
//! list, and ancestor walks are computed on demand.

mod chardata;

pub use chardata::CharData;

use crate::style::StyleOverride;

/// Compact node identifier (index into the document arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The document root, present in every document.
    pub const ROOT: Self = Self(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of document node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root.
    Root,
    /// Element node.
    Element,
    /// Text content.
    Text,
    /// Comment.
    Comment,
    /// Processing instruction.
    ProcessingInstruction,
}

impl NodeKind {
    /// Whether this kind carries a character buffer.
    #[must_use]
    pub const fn is_character_data(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Comment | Self::ProcessingInstruction
        )
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Lowercase tag name (elements) or PI target; empty otherwise.
    tag: Box<str>,
    data: CharData,
    style: StyleOverride,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            tag: Box::from(""),
            data: CharData::new(),
            style: StyleOverride::default(),
        }
    }
}

/// Document tree holding all nodes.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only a root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None)],
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Append an element child. Tag names are stored lowercase.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let mut node = Node::new(NodeKind::Element, Some(parent));
        node.tag = tag.to_ascii_lowercase().into_boxed_str();
        self.push(parent, node)
    }

    /// Append a text child.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let mut node = Node::new(NodeKind::Text, Some(parent));
        node.data = CharData::from_str(text);
        self.push(parent, node)
    }

    /// Append a comment child.
    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        let mut node = Node::new(NodeKind::Comment, Some(parent));
        node.data = CharData::from_str(text);
        self.push(parent, node)
    }

    /// Append a processing instruction child.
    pub fn append_processing_instruction(
        &mut self,
        parent: NodeId,
        target: &str,
        data: &str,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::ProcessingInstruction, Some(parent));
        node.tag = target.to_ascii_lowercase().into_boxed_str();
        node.data = CharData::from_str(data);
        self.push(parent, node)
    }

    /// Attach a resolved-style override to an element.
    pub fn set_style_override(&mut self, node: NodeId, style: StyleOverride) {
        self.nodes[node.index()].style = style;
    }

    /// Whether the id belongs to this document.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.index()].kind
    }

    /// Parent node, if any.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Ordered children.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    /// Lowercase tag name; empty for non-elements.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].tag
    }

    /// Character buffer for character-data nodes; empty otherwise.
    #[must_use]
    pub fn data(&self, node: NodeId) -> &CharData {
        &self.nodes[node.index()].data
    }

    /// Style override attached to the node.
    #[must_use]
    pub fn style_override(&self, node: NodeId) -> &StyleOverride {
        &self.nodes[node.index()].style
    }

    /// Number of position offsets within the node: character count for
    /// character data, child count for the root and elements.
    #[must_use]
    pub fn node_len(&self, node: NodeId) -> usize {
        let n = &self.nodes[node.index()];
        if n.kind.is_character_data() {
            n.data.len_chars()
        } else {
            n.children.len()
        }
    }

    /// Index of the node within its parent's child list.
    #[must_use]
    pub fn child_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Previous sibling, if any.
    #[must_use]
    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let idx = self.child_index(node)?;
        if idx == 0 {
            None
        } else {
            Some(self.children(parent)[idx - 1])
        }
    }

    /// Next sibling, if any.
    #[must_use]
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let idx = self.child_index(node)?;
        self.children(parent).get(idx + 1).copied()
    }

    /// First child, if any.
    #[must_use]
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    /// Last child, if any.
    #[must_use]
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last().copied()
    }

    /// Walk from the node to the root, yielding the node itself first.
    pub fn ancestors_or_self(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = Some(node);
        std::iter::from_fn(move || {
            let n = cur?;
            cur = self.parent(n);
            Some(n)
        })
    }

    /// Total node count, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
