use super::markup::{MarkupNode, escape_attribute, escape_text, is_void, parse_fragment};
use super::node::{Node, NodeId, NodeKind, Rect};
use super::selector::Selector;
use crate::error::Result;

/// Arena-backed document with a fixed `html > body` skeleton
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Released slots, reused before the arena grows
    free: Vec<usize>,
    root: NodeId,
    body: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let placeholder = NodeId {
            index: 0,
            generation: 0,
        };
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: placeholder,
            body: placeholder,
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.append_child(root, body);
        doc.root = root;
        doc.body = body;
        doc
    }

    /// Build a document whose body holds the given markup
    pub fn from_body_markup(markup: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        doc.set_inner_markup(body, markup);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|n| n.live && n.generation == id.generation)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index)
            .filter(|n| n.live && n.generation == id.generation)
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// True when the node hangs off the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.ancestors(id).last() == Some(self.root)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        if let Some(index) = self.free.pop() {
            let generation = self.nodes[index].generation;
            self.nodes[index] = Node::new(kind, generation);
            return NodeId { index, generation };
        }
        let index = self.nodes.len();
        self.nodes.push(Node::new(kind, 0));
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Slots allocated so far, live or released
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn live_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The node itself followed by each ancestor up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.is_live(id).then_some(id), move |n| self.parent(*n))
    }

    /// Inclusive: a node contains itself
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n == ancestor)
    }

    /// Descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Move `child` under `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.is_live(parent) || !self.is_live(child) || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Remove `child` from `parent`; false when it was not a child
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
    }

    /// Detach a subtree and release it; its ids stop resolving
    pub fn destroy(&mut self, id: NodeId) {
        self.detach(id);
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for n in doomed {
            let Some(node) = self.node_mut(n) else {
                continue;
            };
            node.live = false;
            node.children.clear();
            node.parent = None;
            node.kind = NodeKind::Text(String::new());
            node.generation = node.generation.wrapping_add(1);
            self.free.push(n.index);
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?
            .attributes()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(attributes) = self.node_mut(id).and_then(Node::attributes_mut) else {
            return;
        };
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let attributes = self.node_mut(id).and_then(Node::attributes_mut)?;
        let index = attributes.iter().position(|(n, _)| n == name)?;
        Some(attributes.remove(index).1)
    }

    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.attribute(id, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    /// Additive: leaves existing classes untouched
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if class.is_empty() || self.has_class(id, class) {
            return;
        }
        let mut list: Vec<&str> = self.classes(id).collect();
        list.push(class);
        let joined = list.join(" ");
        self.set_attribute(id, "class", &joined);
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let joined = self
            .classes(id)
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", &joined);
    }

    /// Inline style declarations in source order
    pub fn styles(&self, id: NodeId) -> Vec<(String, String)> {
        self.attribute(id, "style")
            .unwrap_or_default()
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim();
                (!prop.is_empty()).then(|| (prop.to_ascii_lowercase(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.styles(id)
            .into_iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let mut styles = self.styles(id);
        match styles.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => styles.push((property.to_string(), value.to_string())),
        }
        let css = styles
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attribute(id, "style", &css);
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id)?.rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = Some(rect);
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Element { .. }) => self
                .descendants(id)
                .into_iter()
                .filter_map(|n| match self.kind(n) {
                    Some(NodeKind::Text(text)) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            None => String::new(),
        }
    }

    fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.destroy(child);
        }
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    /// Replace all children with the parsed markup
    pub fn set_inner_markup(&mut self, id: NodeId, markup: &str) {
        self.clear_children(id);
        let fragment = parse_fragment(markup);
        self.append_markup(id, &fragment);
    }

    /// Materialize detached markup nodes under `parent`
    pub fn append_markup(&mut self, parent: NodeId, fragment: &[MarkupNode]) {
        for markup in fragment {
            let node = match markup {
                MarkupNode::Text(text) => self.create_text(text),
                MarkupNode::Element {
                    tag,
                    attributes,
                    children,
                } => {
                    let el = self.create_element(tag);
                    for (name, value) in attributes {
                        self.set_attribute(el, name, value);
                    }
                    self.append_markup(el, children);
                    el
                }
            };
            self.append_child(parent, node);
        }
    }

    pub fn inner_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_markup(*child, &mut out);
        }
        out
    }

    pub fn outer_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => out.push_str(&escape_text(text)),
            Some(NodeKind::Element { tag, attributes }) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
                }
                out.push('>');
                if is_void(tag) {
                    return;
                }
                for child in self.children(id) {
                    self.write_markup(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
            None => {}
        }
    }

    /// Short human label such as `button#save.btn`
    pub fn describe(&self, id: NodeId) -> String {
        let Some(tag) = self.tag(id) else {
            return "#text".to_string();
        };
        let mut label = tag.to_string();
        if let Some(el_id) = self.attribute(id, "id") {
            label.push('#');
            label.push_str(el_id);
        }
        for class in self.classes(id) {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    /// First element in the document matching the selector
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.query_selector_in(self.root, selector)
    }

    /// First descendant of `scope` matching the selector
    pub fn query_selector_in(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|n| selector.matches(self, *n)))
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(self.root)
            .into_iter()
            .filter(|n| selector.matches(self, *n))
            .collect())
    }

    /// Nearest inclusive ancestor matching the selector
    pub fn closest(&self, id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.ancestors(id).find(|n| selector.matches(self, *n)))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
