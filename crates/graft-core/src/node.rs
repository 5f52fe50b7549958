//! Node tree types for Graft documents.

use indexmap::IndexMap;

/// Ordered attribute map of an element or template node.
pub type AttrMap = IndexMap<String, String>;

/// A complete document: the host tree the engine operates on.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Top-level nodes
    pub roots: Vec<Node>,
}

impl Document {
    /// Create a document from its top-level nodes.
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    /// Find the first element (depth-first) matching a predicate.
    ///
    /// Template content is not searched: template nodes are inert wrappers
    /// and their content is not part of the live tree.
    pub fn find_element(&self, pred: impl Fn(&ElementNode) -> bool) -> Option<&ElementNode> {
        fn walk<'a>(
            nodes: &'a [Node],
            pred: &impl Fn(&ElementNode) -> bool,
        ) -> Option<&'a ElementNode> {
            for node in nodes {
                if let Node::Element(el) = node {
                    if pred(el) {
                        return Some(el);
                    }
                    if let Some(found) = walk(&el.children, pred) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.roots, &pred)
    }

    /// Mutable variant of [`Document::find_element`].
    pub fn find_element_mut(
        &mut self,
        pred: impl Fn(&ElementNode) -> bool,
    ) -> Option<&mut ElementNode> {
        fn walk<'a>(
            nodes: &'a mut [Node],
            pred: &impl Fn(&ElementNode) -> bool,
        ) -> Option<&'a mut ElementNode> {
            for node in nodes {
                if let Node::Element(el) = node {
                    if pred(el) {
                        return Some(el);
                    }
                    if let Some(found) = walk(&mut el.children, pred) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&mut self.roots, &pred)
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Element(ElementNode),
    Text(String),
    Template(TemplateNode),
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Shorthand for an element node with no attributes.
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(ElementNode::new(tag).with_children(children))
    }

    /// Shorthand for a template wrapper with no attributes.
    pub fn template(content: Vec<Node>) -> Self {
        Node::Template(TemplateNode::new().with_content(content))
    }

    /// Whether this node is a text node containing only whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(s) if s.trim().is_empty())
    }
}

/// A regular element: tag, attributes, children.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementNode {
    pub tag: String,
    pub attrs: AttrMap,
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: AttrMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        fn collect(nodes: &[Node], out: &mut String) {
            for node in nodes {
                match node {
                    Node::Text(s) => out.push_str(s),
                    Node::Element(el) => collect(&el.children, out),
                    Node::Template(_) => {}
                }
            }
        }
        let mut out = String::new();
        collect(&self.children, &mut out);
        out
    }
}

/// An inert template wrapper. Its content does not render until a directive
/// or the slot machinery unwraps it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateNode {
    pub attrs: AttrMap,
    pub content: Vec<Node>,
}

impl TemplateNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text() {
        assert!(Node::text("  \n\t ").is_blank_text());
        assert!(!Node::text(" x ").is_blank_text());
        assert!(!Node::element("div", vec![]).is_blank_text());
    }

    #[test]
    fn test_text_content() {
        let el = ElementNode::new("div").with_children(vec![
            Node::text("Hello "),
            Node::element("b", vec![Node::text("world")]),
            Node::Template(TemplateNode::new().with_content(vec![Node::text("hidden")])),
        ]);
        assert_eq!(el.text_content(), "Hello world");
    }

    #[test]
    fn test_find_element_skips_template_content() {
        let doc = Document::new(vec![
            Node::template(vec![Node::element("target", vec![])]),
            Node::element("div", vec![Node::element("target", vec![])]),
        ]);
        let found = doc.find_element(|el| el.tag == "target");
        assert!(found.is_some());

        let doc = Document::new(vec![Node::template(vec![Node::element("target", vec![])])]);
        assert!(doc.find_element(|el| el.tag == "target").is_none());
    }

    #[test]
    fn test_find_element_mut() {
        let mut doc = Document::new(vec![Node::element(
            "div",
            vec![Node::element("span", vec![])],
        )]);
        let span = doc.find_element_mut(|el| el.tag == "span").unwrap();
        span.set_attr("id", "x");
        assert_eq!(
            doc.find_element(|el| el.tag == "span").unwrap().attr("id"),
            Some("x")
        );
    }
}
