#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

/// Live element tree node.
///
/// Fragments are plain `Vec<Node>`; there is no document node because the
/// editor only ever parses block contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl Node {
    pub fn element(name: impl Into<String>) -> Self {
        Node::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element_named(&self, target: &str) -> bool {
        self.name().is_some_and(|n| n.eq_ignore_ascii_case(target))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// First value of `key`; attribute names are stored lowercase.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let Node::Element { attributes, .. } = self else {
            return;
        };
        let value = value.into();
        match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, v)) => *v = Some(value),
            None => attributes.push((key.to_ascii_lowercase(), Some(value))),
        }
    }

    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    /// Concatenated descendant text, like DOM `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Length in bytes of the boundary offsets this node accepts as a range
    /// container: text length for text/comments, child count for elements.
    pub fn boundary_len(&self) -> usize {
        match self {
            Node::Element { children, .. } => children.len(),
            Node::Text { text } | Node::Comment { text } => text.len(),
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { text } => out.push_str(text),
        Node::Element { children, .. } => {
            for c in children {
                collect_text(c, out);
            }
        }
        Node::Comment { .. } => {}
    }
}
