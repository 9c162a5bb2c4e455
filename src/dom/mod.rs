pub mod parser;
pub mod page;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// Owned DOM node.
///
/// The header widget never holds live nodes: markup is parsed once into this
/// tree and everything afterwards works on plain records derived from it.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

impl DomNode {
    pub fn document(children: Vec<DomNode>) -> Self {
        Self {
            tag: "#document".into(),
            attributes: HashMap::new(),
            text: String::new(),
            children,
            node_type: NodeType::Document,
        }
    }

    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    /// Recursively count all nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Collect all text content recursively
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        if !self.text.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(self.text.trim());
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Depth-first, document-order search for the first matching node
    /// (including `self`).
    pub fn find<F>(&self, pred: F) -> Option<&DomNode>
    where
        F: Fn(&DomNode) -> bool + Copy,
    {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// All matching nodes in document order (including `self`).
    pub fn find_all<F>(&self, pred: F) -> Vec<&DomNode>
    where
        F: Fn(&DomNode) -> bool + Copy,
    {
        let mut out = Vec::new();
        self.find_all_inner(pred, &mut out);
        out
    }

    fn find_all_inner<'a, F>(&'a self, pred: F, out: &mut Vec<&'a DomNode>)
    where
        F: Fn(&DomNode) -> bool + Copy,
    {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.find_all_inner(pred, out);
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&DomNode> {
        self.find(|n| n.is_element() && n.attr("id") == Some(id))
    }

    pub fn find_by_class(&self, class: &str) -> Option<&DomNode> {
        self.find(|n| n.is_element() && n.has_class(class))
    }
}

/// Parsed DOM tree with metadata
#[derive(Debug, Clone)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}
