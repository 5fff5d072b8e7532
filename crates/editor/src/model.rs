//! Typed content of editable blocks.
use crate::MARKER_CLASS;
use html::{Node, parse_fragment};

/// One immediate child of a normalized block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentNode {
    Text {
        content: String,
    },
    /// An inline styling element (`<span class=...>`). Never contains another
    /// `InlineStyled` node with the same `style_class`.
    InlineStyled {
        style_class: String,
        children: Vec<ContentNode>,
    },
    /// Any other markup, kept verbatim.
    Opaque {
        raw_markup: String,
    },
}

impl ContentNode {
    pub fn text(content: impl Into<String>) -> Self {
        ContentNode::Text {
            content: content.into(),
        }
    }

    pub fn inline(style_class: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::InlineStyled {
            style_class: style_class.into(),
            children,
        }
    }

    pub fn opaque(raw_markup: impl Into<String>) -> Self {
        ContentNode::Opaque {
            raw_markup: raw_markup.into(),
        }
    }

    /// Element-tree form used when a host materializes the node.
    ///
    /// Opaque markup is reparsed and may yield zero or more nodes.
    pub fn to_nodes(&self) -> Vec<Node> {
        match self {
            ContentNode::Text { content } => vec![Node::text(content.clone())],
            ContentNode::InlineStyled {
                style_class,
                children,
            } => {
                let mut span = Node::element(crate::INLINE_STYLE_TAG);
                if !style_class.is_empty() {
                    span.set_attr("class", style_class.clone());
                }
                for child in children {
                    for node in child.to_nodes() {
                        span = span.with_child(node);
                    }
                }
                vec![span]
            }
            ContentNode::Opaque { raw_markup } => parse_fragment(raw_markup),
        }
    }
}

/// Returns `true` if any inline node contains, at any depth, another inline
/// node with the same style class.
pub fn has_nested_same_class(nodes: &[ContentNode]) -> bool {
    fn walk<'a>(nodes: &'a [ContentNode], open: &mut Vec<&'a str>) -> bool {
        for node in nodes {
            if let ContentNode::InlineStyled {
                style_class,
                children,
            } = node
            {
                if open.contains(&style_class.as_str()) {
                    return true;
                }
                open.push(style_class);
                let nested = walk(children, open);
                open.pop();
                if nested {
                    return true;
                }
            }
        }
        false
    }
    walk(nodes, &mut Vec::new())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Generic,
    Text,
    /// A host-declared type the engine does not interpret.
    Other(String),
}

impl BlockKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "" | "default" | "generic" => BlockKind::Generic,
            "text" => BlockKind::Text,
            other => BlockKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BlockKind::Generic => "generic",
            BlockKind::Text => "text",
            BlockKind::Other(name) => name,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalizationState {
    #[default]
    Unconverted,
    Normalized,
}

/// A block-level container as the engine sees it.
///
/// `classes` never holds the marker class; that sentinel only exists on the
/// host side and is folded into `state` by [`EditableBlock::from_host`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditableBlock {
    pub kind: BlockKind,
    pub tag: String,
    pub classes: Vec<String>,
    pub children: Vec<ContentNode>,
    pub state: NormalizationState,
}

impl EditableBlock {
    pub fn from_host(
        kind: BlockKind,
        tag: impl Into<String>,
        host_classes: &[String],
        children: Vec<ContentNode>,
    ) -> Self {
        let marked = host_classes.iter().any(|c| c == MARKER_CLASS);
        let state = if marked || kind == BlockKind::Text {
            NormalizationState::Normalized
        } else {
            NormalizationState::Unconverted
        };
        let mut classes: Vec<String> = Vec::with_capacity(host_classes.len());
        for class in host_classes {
            if class != MARKER_CLASS && !classes.contains(class) {
                classes.push(class.clone());
            }
        }
        Self {
            kind,
            tag: tag.into(),
            classes,
            children,
            state,
        }
    }

    /// The canonical replacement for an unconverted block.
    pub fn normalized(tag: impl Into<String>, classes: Vec<String>, children: Vec<ContentNode>) -> Self {
        let mut block = Self::from_host(BlockKind::Text, tag, &classes, children);
        block.state = NormalizationState::Normalized;
        block
    }

    pub fn is_normalized(&self) -> bool {
        self.state == NormalizationState::Normalized
    }

    /// Class list as written to the host: own classes, then the marker when
    /// normalized.
    pub fn host_classes(&self) -> Vec<String> {
        let mut out = self.classes.clone();
        if self.is_normalized() {
            out.push(MARKER_CLASS.to_string());
        }
        out
    }

    /// Element tree for this block.
    pub fn to_element(&self) -> Node {
        let mut element = Node::element(self.tag.to_ascii_lowercase());
        let classes = self.host_classes();
        if !classes.is_empty() {
            element.set_attr("class", classes.join(" "));
        }
        for child in &self.children {
            for node in child.to_nodes() {
                element = element.with_child(node);
            }
        }
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::outer_html;

    #[test]
    fn nested_same_class_is_detected_at_depth() {
        let flat = vec![
            ContentNode::inline("a", vec![ContentNode::text("x")]),
            ContentNode::inline("a", vec![ContentNode::text("y")]),
        ];
        assert!(!has_nested_same_class(&flat));

        let other_class = vec![ContentNode::inline(
            "a",
            vec![ContentNode::inline("b", vec![ContentNode::text("x")])],
        )];
        assert!(!has_nested_same_class(&other_class));

        let deep = vec![ContentNode::inline(
            "a",
            vec![ContentNode::inline(
                "b",
                vec![ContentNode::inline("a", vec![])],
            )],
        )];
        assert!(has_nested_same_class(&deep));
    }

    #[test]
    fn from_host_folds_marker_into_state() {
        let classes = vec!["lead".to_string(), MARKER_CLASS.to_string(), "lead".to_string()];
        let block = EditableBlock::from_host(BlockKind::Generic, "p", &classes, vec![]);
        assert!(block.is_normalized());
        assert_eq!(block.classes, vec!["lead".to_string()]);
        assert_eq!(
            block.host_classes(),
            vec!["lead".to_string(), MARKER_CLASS.to_string()]
        );
    }

    #[test]
    fn text_kind_counts_as_normalized() {
        let block = EditableBlock::from_host(BlockKind::Text, "p", &[], vec![]);
        assert_eq!(block.state, NormalizationState::Normalized);
        let block = EditableBlock::from_host(BlockKind::Other("quote".into()), "p", &[], vec![]);
        assert_eq!(block.state, NormalizationState::Unconverted);
    }

    #[test]
    fn block_kind_names() {
        assert_eq!(BlockKind::from_name("default"), BlockKind::Generic);
        assert_eq!(BlockKind::from_name("text"), BlockKind::Text);
        assert_eq!(BlockKind::from_name("image").name(), "image");
    }

    #[test]
    fn to_element_renders_children_and_marker() {
        let block = EditableBlock::normalized(
            "p",
            vec![],
            vec![
                ContentNode::text("Hello "),
                ContentNode::inline("x", vec![ContentNode::text("world")]),
                ContentNode::opaque("<b>!</b>"),
            ],
        );
        assert_eq!(
            outer_html(&block.to_element()),
            format!(r#"<p class="{MARKER_CLASS}">Hello <span class="x">world</span><b>!</b></p>"#)
        );
    }

    #[test]
    fn inline_without_class_renders_bare_span() {
        let node = ContentNode::inline("", vec![ContentNode::text("t")]);
        assert_eq!(outer_html(&node.to_nodes()[0]), "<span>t</span>");
    }
}
