//! Line-oriented fragment snapshots for tests and debug logging.
//!
//! One line per node, indented two spaces per depth:
//! `<span class="x">`, `"text"`, `<!-- comment -->`. Attributes are printed in
//! source order, valueless ones as `name=""`. Text is escaped so whitespace
//! stays visible.
use crate::types::Node;

pub fn snapshot_lines(nodes: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    for node in nodes {
        walk(node, 0, &mut out);
    }
    out
}

fn walk(node: &Node, depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Element {
            name,
            attributes,
            children,
        } => {
            let mut line = format!("{indent}<{name}");
            for (key, value) in attributes {
                let value = value.as_deref().unwrap_or("");
                line.push_str(&format!(r#" {key}="{}""#, escape(value)));
            }
            line.push('>');
            out.push(line);
            for child in children {
                walk(child, depth + 1, out);
            }
        }
        Node::Text { text } => out.push(format!("{indent}\"{}\"", escape(text))),
        Node::Comment { text } => out.push(format!("{indent}<!-- {} -->", escape(text))),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{00A0}' => out.push_str("\\u{A0}"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fragment;

    #[test]
    fn snapshot_nested_fragment() {
        let nodes = parse_fragment("a\n<b title=\"t\">x<br></b><!--c-->");
        assert_eq!(
            snapshot_lines(&nodes),
            vec![
                "\"a\\n\"".to_string(),
                "<b title=\"t\">".to_string(),
                "  \"x\"".to_string(),
                "  <br>".to_string(),
                "<!-- c -->".to_string(),
            ]
        );
    }
}
