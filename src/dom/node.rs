/// Handle to a node in a [`Document`](super::Document) arena.
///
/// Slots are recycled once a node is destroyed; the generation keeps a stale
/// handle from resolving to whatever took its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Layout box supplied by the host, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        tag: String,
        /// Ordered as first set; `class` and `style` live here too
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub rect: Option<Rect>,
    /// Cleared once the node has been destroyed
    pub live: bool,
    /// Bumped every time the slot is released
    pub generation: u32,
}

impl Node {
    pub fn new(kind: NodeKind, generation: u32) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            rect: None,
            live: true,
            generation,
        }
    }

    pub fn attributes(&self) -> Option<&Vec<(String, String)>> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Vec<(String, String)>> {
        match &mut self.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            NodeKind::Text(_) => None,
        }
    }
}
