//! Markup fragment to [`ContentNode`] conversion.
//!
//! Only the immediate children of the fragment are classified:
//!
//! - text becomes [`ContentNode::Text`];
//! - a `span` element becomes [`ContentNode::InlineStyled`] with its `class`
//!   attribute as the style class and its text content flattened into one
//!   text child;
//! - anything else (other elements and comments) becomes
//!   [`ContentNode::Opaque`] holding its serialized markup.
use crate::INLINE_STYLE_TAG;
use crate::model::ContentNode;
use html::{Node, fragment_text, outer_html, parse_fragment, serialize_fragment};

pub fn convert(markup: &str) -> Vec<ContentNode> {
    let nodes = parse_fragment(markup);
    let mut out = Vec::with_capacity(nodes.len());
    for node in &nodes {
        out.push(classify(node));
    }
    log::trace!(target: "editor::convert", "converted {} top-level node(s)", out.len());
    out
}

fn classify(node: &Node) -> ContentNode {
    match node {
        Node::Text { text } => ContentNode::text(text.clone()),
        Node::Element { .. } if node.is_element_named(INLINE_STYLE_TAG) => ContentNode::inline(
            node.attr("class").unwrap_or(""),
            vec![ContentNode::text(node.text_content())],
        ),
        _ => ContentNode::opaque(outer_html(node)),
    }
}

pub fn serialize_nodes(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            ContentNode::Opaque { raw_markup } => out.push_str(raw_markup),
            _ => out.push_str(&serialize_fragment(&node.to_nodes())),
        }
    }
    out
}

/// Concatenated text, as `textContent` of the rendered nodes would read.
pub fn text_content(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            ContentNode::Text { content } => out.push_str(content),
            ContentNode::InlineStyled { children, .. } => out.push_str(&text_content(children)),
            ContentNode::Opaque { raw_markup } => {
                out.push_str(&fragment_text(&parse_fragment(raw_markup)))
            }
        }
    }
    out
}
