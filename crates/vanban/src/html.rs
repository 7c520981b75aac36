//! HTML parsing support.
//!
//! This module parses HTML strings with scraper/html5ever and converts the
//! result to the [`Node`] structure used by the conversion walk.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{Element, Node};

/// Parse an HTML fragment into a Node tree.
///
/// The returned root is the `html` element the fragment parser wraps the
/// input in; its children are the input's top-level nodes. Parsing never
/// fails: malformed markup yields a best-effort tree.
///
/// # Example
///
/// ```rust
/// use vanban::parse_html;
///
/// let root = parse_html(r#"<div style="text-align:center"><b>QUYẾT ĐỊNH</b></div>"#);
/// let div = root.as_element().unwrap().element_children().next().unwrap();
/// assert_eq!(div.tag_name(), "div");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    Node::Element(scraper_to_element(document.root_element()))
}

/// Convert a scraper ElementRef to our Element structure
fn scraper_to_element(element: ElementRef) -> Element {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Element::with_attrs(element.value().name(), &attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(Node::Element(scraper_to_element(child_element)));
                }
            }
            // Comments, doctypes and processing instructions carry no content.
            _ => {}
        }
    }

    node
}
