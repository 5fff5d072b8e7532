//! Live DOM ranges over one element tree.
//!
//! A boundary point is `(container, offset)` where `container` is a
//! [`NodePath`] from the tree root. For text containers `offset` is a byte
//! offset on a char boundary; for element containers it is a child index.
//! The operations mirror the DOM `Range` methods the editor relies on:
//! `toString`, `deleteContents`, `insertNode` and `selectNodeContents`.
use crate::types::Node;
use core_types::NodePath;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub container: NodePath,
    pub offset: usize,
}

impl Boundary {
    pub fn new(container: impl Into<NodePath>, offset: usize) -> Self {
        Self {
            container: container.into(),
            offset,
        }
    }
}

/// A (start, end) pair of boundary points; `start` must not come after `end`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DomRange {
    pub start: Boundary,
    pub end: Boundary,
}

impl DomRange {
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    pub fn collapsed_at(point: Boundary) -> Self {
        Self {
            start: point.clone(),
            end: point,
        }
    }

    /// Range covering the text between two byte offsets of one text node.
    pub fn within_text(container: impl Into<NodePath>, start: usize, end: usize) -> Self {
        let container = container.into();
        Self {
            start: Boundary::new(container.clone(), start.min(end)),
            end: Boundary::new(container, start.max(end)),
        }
    }

    /// Range spanning all children of the element at `path`.
    pub fn node_contents(root: &Node, path: &NodePath) -> Option<Self> {
        let node = node_at(root, path)?;
        Some(Self {
            start: Boundary::new(path.clone(), 0),
            end: Boundary::new(path.clone(), node.boundary_len()),
        })
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// `true` when both boundaries address existing nodes with in-bounds
    /// offsets.
    pub fn is_valid_in(&self, root: &Node) -> bool {
        [&self.start, &self.end].into_iter().all(|b| {
            node_at(root, &b.container).is_some_and(|node| match node {
                Node::Text { text } => b.offset <= text.len() && text.is_char_boundary(b.offset),
                _ => b.offset <= node.boundary_len(),
            })
        })
    }
}

pub fn node_at<'a>(root: &'a Node, path: &NodePath) -> Option<&'a Node> {
    let mut current = root;
    for &step in path.steps() {
        current = current.children().get(step)?;
    }
    Some(current)
}

pub fn node_at_mut<'a>(root: &'a mut Node, path: &NodePath) -> Option<&'a mut Node> {
    let mut current = root;
    for &step in path.steps() {
        current = current.children_mut()?.get_mut(step)?;
    }
    Some(current)
}

/// Nodes from the root down to (and including) `path`, root first.
pub fn ancestors<'a>(root: &'a Node, path: &NodePath) -> Vec<&'a Node> {
    let mut out = vec![root];
    let mut current = root;
    for &step in path.steps() {
        let Some(next) = current.children().get(step) else {
            break;
        };
        out.push(next);
        current = next;
    }
    out
}

/// Position key used for containment checks: the path of the first node at or
/// after the boundary in tree order.
fn boundary_key(root: &Node, point: &Boundary) -> (Vec<usize>, bool) {
    let is_text = matches!(
        node_at(root, &point.container),
        Some(Node::Text { .. } | Node::Comment { .. })
    );
    if is_text {
        (point.container.steps().to_vec(), true)
    } else {
        (point.container.child(point.offset).steps().to_vec(), false)
    }
}

struct Span {
    start_key: Vec<usize>,
    start_in_text: bool,
    end_key: Vec<usize>,
    start: Boundary,
    end: Boundary,
}

impl Span {
    fn new(root: &Node, range: &DomRange) -> Self {
        let (start_key, start_in_text) = boundary_key(root, &range.start);
        let (end_key, _) = boundary_key(root, &range.end);
        Self {
            start_key,
            start_in_text,
            end_key,
            start: range.start.clone(),
            end: range.end.clone(),
        }
    }

    fn after_start(&self, node: &[usize]) -> bool {
        if self.start_in_text {
            node > self.start_key.as_slice()
        } else {
            node >= self.start_key.as_slice()
        }
    }

    fn before_end(&self, node: &[usize]) -> bool {
        node < self.end_key.as_slice() && !self.end_key.starts_with(node)
    }

    fn fully_contains(&self, node: &[usize]) -> bool {
        self.after_start(node) && self.before_end(node)
    }

    fn touches(&self, node: &[usize]) -> bool {
        self.start_key.starts_with(node) || self.end_key.starts_with(node)
    }
}

/// DOM `Range.toString()`: the text data inside the range, in tree order.
pub fn range_to_string(root: &Node, range: &DomRange) -> String {
    let span = Span::new(root, range);
    let mut out = String::new();
    collect_range_text(root, &mut Vec::new(), &span, &mut out);
    out
}

fn collect_range_text(node: &Node, path: &mut Vec<usize>, span: &Span, out: &mut String) {
    for (i, child) in node.children().iter().enumerate() {
        path.push(i);
        if span.fully_contains(path) {
            out.push_str(&child.text_content());
        } else if let Node::Text { text } = child {
            if let Some((from, to)) = text_slice(path, text, span) {
                out.push_str(&text[from..to]);
            }
        } else if span.touches(path) {
            collect_range_text(child, path, span, out);
        }
        path.pop();
    }
}

/// Byte span of a boundary text node that lies inside the range.
fn text_slice(path: &[usize], text: &str, span: &Span) -> Option<(usize, usize)> {
    let is_start = span.start_in_text && span.start.container.steps() == path;
    let is_end = span.end.container.steps() == path;
    if !is_start && !is_end {
        return None;
    }
    let from = if is_start {
        span.start.offset.min(text.len())
    } else {
        0
    };
    let to = if is_end {
        span.end.offset.min(text.len())
    } else {
        text.len()
    };
    (from < to && text.is_char_boundary(from) && text.is_char_boundary(to)).then_some((from, to))
}

/// DOM `Range.deleteContents()`.
///
/// Fully contained nodes are removed, boundary text nodes are trimmed, and
/// partially contained elements stay in place with their remaining children.
/// Returns the collapsed insertion point, which is the original start.
pub fn delete_contents(root: &mut Node, range: &DomRange) -> Boundary {
    if range.is_collapsed() || !range.is_valid_in(root) {
        return range.start.clone();
    }
    let span = Span::new(root, range);
    delete_in(root, &mut Vec::new(), &span);
    range.start.clone()
}

fn delete_in(node: &mut Node, path: &mut Vec<usize>, span: &Span) {
    let Some(children) = node.children_mut() else {
        return;
    };
    // Back to front so removals never shift indices still to be visited.
    for i in (0..children.len()).rev() {
        path.push(i);
        if span.fully_contains(path) {
            children.remove(i);
        } else if let Node::Text { text } = &mut children[i] {
            if let Some((from, to)) = text_slice(path, text, span) {
                text.replace_range(from..to, "");
            }
        } else if span.touches(path) {
            delete_in(&mut children[i], path, span);
        }
        path.pop();
    }
}

/// DOM `Range.insertNode()` at a collapsed point. A text container is split at
/// the offset (without leaving empty text nodes behind). Returns the path of
/// the inserted node, or `None` when the point does not resolve.
pub fn insert_node(root: &mut Node, at: &Boundary, new_node: Node) -> Option<NodePath> {
    let in_text = match node_at(root, &at.container)? {
        Node::Text { text } => {
            if at.offset > text.len() || !text.is_char_boundary(at.offset) {
                return None;
            }
            true
        }
        Node::Comment { .. } => return None,
        Node::Element { .. } => false,
    };

    if !in_text {
        let children = node_at_mut(root, &at.container)?.children_mut()?;
        if at.offset > children.len() {
            return None;
        }
        children.insert(at.offset, new_node);
        return Some(at.container.child(at.offset));
    }

    let (parent_path, index) = at.container.parent()?;
    let parent = node_at_mut(root, &parent_path)?.children_mut()?;
    if at.offset == 0 {
        parent.insert(index, new_node);
        return Some(parent_path.child(index));
    }
    let Node::Text { text } = &mut parent[index] else {
        return None;
    };
    let tail = text.split_off(at.offset);
    parent.insert(index + 1, new_node);
    if !tail.is_empty() {
        parent.insert(index + 2, Node::Text { text: tail });
    }
    Some(parent_path.child(index + 1))
}

/// Replace the element at `path` with its children. Returns `false` (and
/// leaves the tree alone) when `path` is the root or does not resolve to an
/// element.
pub fn unwrap_element(root: &mut Node, path: &NodePath) -> bool {
    let Some((parent_path, index)) = path.parent() else {
        return false;
    };
    let Some(parent) = node_at_mut(root, &parent_path).and_then(Node::children_mut) else {
        return false;
    };
    if !matches!(parent.get(index), Some(Node::Element { .. })) {
        return false;
    }
    let removed = parent.remove(index);
    let Node::Element { children, .. } = removed else {
        return false;
    };
    for (offset, child) in children.into_iter().enumerate() {
        parent.insert(index + offset, child);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fragment;
    use crate::serialize::inner_html;

    fn block(markup: &str) -> Node {
        let mut nodes = parse_fragment(&format!("<p>{markup}</p>"));
        nodes.remove(0)
    }

    #[test]
    fn range_to_string_within_one_text_node() {
        let root = block("Hello world");
        let range = DomRange::within_text(vec![0], 6, 11);
        assert_eq!(range_to_string(&root, &range), "world");
    }

    #[test]
    fn range_to_string_across_elements() {
        let root = block("ab<b>cd<i>ef</i></b>gh");
        // from "b" in "ab" to "g" in "gh"
        let range = DomRange::new(Boundary::new(vec![0], 1), Boundary::new(vec![2], 1));
        assert_eq!(range_to_string(&root, &range), "bcdefg");
    }

    #[test]
    fn delete_contents_trims_and_removes() {
        let mut root = block("ab<b>cd<i>ef</i></b>gh<br>ij");
        let range = DomRange::new(Boundary::new(vec![1, 0], 1), Boundary::new(vec![4], 1));
        let at = delete_contents(&mut root, &range);
        assert_eq!(at, Boundary::new(vec![1, 0], 1));
        assert_eq!(inner_html(&root), "ab<b>c</b>j");
    }

    #[test]
    fn delete_contents_with_element_boundaries() {
        let mut root = block("a<b>b</b>c<i>d</i>");
        let range = DomRange::new(Boundary::new(vec![], 1), Boundary::new(vec![], 3));
        delete_contents(&mut root, &range);
        assert_eq!(inner_html(&root), "a<i>d</i>");
    }

    #[test]
    fn delete_contents_collapsed_is_noop() {
        let mut root = block("abc");
        let range = DomRange::collapsed_at(Boundary::new(vec![0], 1));
        delete_contents(&mut root, &range);
        assert_eq!(inner_html(&root), "abc");
    }

    #[test]
    fn insert_node_splits_text() {
        let mut root = block("Hello !");
        let path = insert_node(&mut root, &Boundary::new(vec![0], 6), Node::element("hr"));
        assert_eq!(path, Some(NodePath::from(vec![1])));
        assert_eq!(inner_html(&root), "Hello <hr>!");
        assert_eq!(root.children().len(), 3);
    }

    #[test]
    fn insert_node_at_text_edges_leaves_no_empty_text() {
        let mut root = block("ab");
        insert_node(&mut root, &Boundary::new(vec![0], 0), Node::element("br"));
        assert_eq!(root.children().len(), 2);
        insert_node(&mut root, &Boundary::new(vec![1], 2), Node::element("hr"));
        assert_eq!(inner_html(&root), "<br>ab<hr>");
        assert_eq!(root.children().len(), 3);
    }

    #[test]
    fn insert_node_rejects_non_char_boundary() {
        let mut root = block("é");
        assert!(insert_node(&mut root, &Boundary::new(vec![0], 1), Node::element("br")).is_none());
    }

    #[test]
    fn node_contents_spans_children() {
        let root = block("<span>x</span>");
        let range = DomRange::node_contents(&root, &NodePath::from(vec![0])).unwrap();
        assert_eq!(range.start, Boundary::new(vec![0], 0));
        assert_eq!(range.end, Boundary::new(vec![0], 1));
        assert_eq!(range_to_string(&root, &range), "x");
    }

    #[test]
    fn unwrap_element_splices_children() {
        let mut root = block("a<span>b<i>c</i></span>d");
        assert!(unwrap_element(&mut root, &NodePath::from(vec![1])));
        assert_eq!(inner_html(&root), "ab<i>c</i>d");
        assert!(!unwrap_element(&mut root, &NodePath::root()));
        assert!(!unwrap_element(&mut root, &NodePath::from(vec![0])));
    }

    #[test]
    fn ancestors_from_root() {
        let root = block("<b><i>x</i></b>");
        let chain = ancestors(&root, &NodePath::from(vec![0, 0, 0]));
        let names: Vec<_> = chain.iter().map(|n| n.name().unwrap_or("#text")).collect();
        assert_eq!(names, ["p", "b", "i", "#text"]);
    }
}
