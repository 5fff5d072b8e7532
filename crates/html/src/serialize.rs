//! HTML fragment serialization, matching the browser's `outerHTML`/`innerHTML`
//! getters: attribute values are always double-quoted (valueless attributes
//! become `name=""`), void elements get no end tag, and raw-text element
//! contents are written verbatim.
use crate::dom_builder::is_void_element;
use crate::types::Node;

pub fn serialize_fragment(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, false, &mut out);
    }
    out
}

pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, false, &mut out);
    out
}

pub fn inner_html(node: &Node) -> String {
    let raw = node.name().is_some_and(is_raw_text_parent);
    let mut out = String::new();
    for child in node.children() {
        write_node(child, raw, &mut out);
    }
    out
}

fn is_raw_text_parent(name: &str) -> bool {
    matches!(
        name,
        "style" | "script" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

fn write_node(node: &Node, raw_parent: bool, out: &mut String) {
    match node {
        Node::Text { text } => {
            if raw_parent {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }
        Node::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Element {
            name,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                if let Some(value) = value {
                    escape_into(value, true, out);
                }
                out.push('"');
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let raw = is_raw_text_parent(name);
            for child in children {
                write_node(child, raw, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn escape_into(text: &str, in_attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fragment;

    #[test]
    fn serialize_escapes_text_and_attributes() {
        let node = Node::element("span")
            .with_attr("title", "a \"b\" <c> & d")
            .with_child(Node::text("1 < 2 & 3 > 0\u{00A0}"));
        assert_eq!(
            outer_html(&node),
            r#"<span title="a &quot;b&quot; <c> &amp; d">1 &lt; 2 &amp; 3 &gt; 0&nbsp;</span>"#
        );
    }

    #[test]
    fn serialize_valueless_attribute_and_void_element() {
        let nodes = parse_fragment("<input disabled><hr>");
        assert_eq!(serialize_fragment(&nodes), r#"<input disabled=""><hr>"#);
    }

    #[test]
    fn serialize_raw_text_verbatim() {
        let nodes = parse_fragment("<style>a > b { x: '&' }</style>");
        assert_eq!(
            serialize_fragment(&nodes),
            "<style>a > b { x: '&' }</style>"
        );
        assert_eq!(inner_html(&nodes[0]), "a > b { x: '&' }");
    }

    #[test]
    fn serialize_comment() {
        let nodes = parse_fragment("x<!-- note -->y");
        assert_eq!(serialize_fragment(&nodes), "x<!-- note -->y");
    }

    #[test]
    fn inner_html_of_paragraph() {
        let nodes = parse_fragment(r#"<p class="a">Hello <b>big</b> world</p>"#);
        assert_eq!(inner_html(&nodes[0]), "Hello <b>big</b> world");
    }
}
