//! DOM node structure for HTML to document conversion.
//!
//! A node is either an element or a text node. Elements carry their inline
//! style already parsed into a [`StyleMap`], so style lookups during the
//! conversion walk are plain map reads.

use indexmap::IndexMap;

use crate::style::StyleMap;
use crate::utilities::is_skipped;

/// A DOM node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Lowercase tag name
    tag: String,
    /// Attributes in source order, names lowercased
    attributes: IndexMap<String, String>,
    /// Parsed `style` attribute
    style: StyleMap,
    children: Vec<Node>,
}

impl Node {
    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create a new element node without attributes or children
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element::new(tag_name))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    /// Create a new element
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag: tag_name.to_lowercase(),
            ..Default::default()
        }
    }

    /// Create a new element with attributes
    pub fn with_attrs(tag_name: &str, attrs: &[(&str, &str)]) -> Self {
        let mut element = Self::new(tag_name);
        for (name, value) in attrs {
            element.set_attr(name, value);
        }
        element
    }

    /// Create a new element with a `style` attribute
    pub fn styled(tag_name: &str, style: &str) -> Self {
        Self::with_attrs(tag_name, &[("style", style)])
    }

    /// Builder form of [`Element::add_child`]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.add_child(child.into());
        self
    }

    /// Builder shorthand for appending a text node
    pub fn text(self, content: &str) -> Self {
        self.child(Node::text(content))
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_lowercase();
        if name == "style" {
            self.style = StyleMap::parse(value);
        }
        self.attributes.insert(name, value.to_string());
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Whether any descendant element (not this element) satisfies the predicate
    pub fn has_descendant<F>(&self, pred: F) -> bool
    where
        F: Fn(&Element) -> bool + Copy,
    {
        self.element_children()
            .any(|child| pred(child) || child.has_descendant(pred))
    }

    /// Collect descendant elements satisfying `pred`, not descending into
    /// elements that satisfy `stop`
    pub fn find_descendants<'a, F, S>(&'a self, pred: F, stop: S) -> Vec<&'a Element>
    where
        F: Fn(&Element) -> bool + Copy,
        S: Fn(&Element) -> bool + Copy,
    {
        let mut found = Vec::new();
        self.collect_descendants(pred, stop, &mut found);
        found
    }

    fn collect_descendants<'a, F, S>(&'a self, pred: F, stop: S, found: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool + Copy,
        S: Fn(&Element) -> bool + Copy,
    {
        for child in self.element_children() {
            if pred(child) {
                found.push(child);
            }
            if !stop(child) {
                child.collect_descendants(pred, stop, found);
            }
        }
    }

    /// Get all text content from this element and descendants
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Text content excluding `script` and `style` subtrees
    pub fn visible_text(&self) -> String {
        let mut text = String::new();
        self.push_visible_text(&mut text);
        text
    }

    fn push_visible_text(&self, out: &mut String) {
        if is_skipped(&self.tag) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.push_visible_text(out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.as_element().unwrap().tag_name(), "div");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Element::with_attrs("td", &[("Style", "text-align: center"), ("colspan", "2")]);
        assert_eq!(node.attr("style"), Some("text-align: center"));
        assert_eq!(node.attr("COLSPAN"), Some("2"));
        assert_eq!(node.attr("class"), None);
        assert_eq!(node.style().get("text-align"), Some("center"));
    }

    #[test]
    fn test_children() {
        let parent = Element::new("div")
            .text("Hello")
            .child(Element::new("span"))
            .text("World");

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let div = Element::new("div")
            .text("Hello ")
            .child(Element::new("span").text("World"));

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_visible_text_skips_style() {
        let div = Element::new("div")
            .child(Element::new("style").text("p { color: red }"))
            .text("Nội dung");

        assert_eq!(div.visible_text(), "Nội dung");
        assert!(div.text_content().contains("color"));
    }

    #[test]
    fn test_has_descendant_excludes_self() {
        let p = Element::new("p").child(Element::new("b").child(Element::new("div")));
        assert!(p.has_descendant(|e| e.tag_name() == "div"));
        assert!(!p.has_descendant(|e| e.tag_name() == "p"));
    }

    #[test]
    fn test_find_descendants_stops() {
        let inner = Element::new("table").child(Element::new("tr"));
        let outer = Element::new("table").child(
            Element::new("tbody")
                .child(Element::new("tr").child(Element::new("td").child(inner))),
        );

        let rows = outer.find_descendants(|e| e.tag_name() == "tr", |e| e.tag_name() == "table");
        assert_eq!(rows.len(), 1);
    }
}
