//! Utility functions and constants for HTML processing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Elements converted into a paragraph when they hold no nested block
pub const BLOCK_CONTAINERS: &[&str] = &["div", "p", "h1", "h2", "h3"];

/// Descendants that turn a block container into a plain wrapper
pub const NESTED_BLOCKS: &[&str] = &["div", "p", "table"];

/// Elements skipped together with their subtree
pub const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Table cell elements
pub const CELL_ELEMENTS: &[&str] = &["td", "th"];

/// Phrasing elements whose content joins the surrounding line
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "br", "code", "em", "font", "i", "label", "mark", "s", "small", "span", "strong",
    "sub", "sup", "u",
];

pub const BOLD_ELEMENTS: &[&str] = &["b", "strong"];

pub const ITALIC_ELEMENTS: &[&str] = &["i", "em"];

/// Lines at least this long never count as headings
pub const HEADING_MAX_CHARS: usize = 100;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

pub fn is_block_container(tag: &str) -> bool {
    BLOCK_CONTAINERS.contains(&tag)
}

pub fn is_nested_block(tag: &str) -> bool {
    NESTED_BLOCKS.contains(&tag)
}

pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_ELEMENTS.contains(&tag)
}

pub fn is_cell(tag: &str) -> bool {
    CELL_ELEMENTS.contains(&tag)
}

pub fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag)
}

pub fn is_bold_element(tag: &str) -> bool {
    BOLD_ELEMENTS.contains(&tag)
}

pub fn is_italic_element(tag: &str) -> bool {
    ITALIC_ELEMENTS.contains(&tag)
}

/// Collapse runs of whitespace into a single space
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Replace every tag with a line break
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "\n").into_owned()
}

/// Heading heuristic for plain-text lines: fully uppercase and short
pub fn is_heading_line(line: &str) -> bool {
    line == line.to_uppercase() && line.chars().count() < HEADING_MAX_CHARS
}
