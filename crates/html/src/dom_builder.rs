//! Fragment tree builder.
//!
//! Builds the children of an editable block the way a browser's `innerHTML`
//! setter does for the constructs that appear in rich text:
//! - void elements never take children, `/>` on other elements is ignored;
//! - block starts close an open `p`, headings close a directly open heading,
//!   `li`/`dd`/`dt`/`option` close their open siblings;
//! - an end tag closes the nearest matching element in scope and is ignored
//!   when there is none; a stray `</p>` yields an empty `<p></p>`, `</br>` is
//!   a `<br>`;
//! - formatting elements closed implicitly are reopened before the next
//!   content (`<p><b>x</p>y` keeps `y` bold).
//!
//! Table foster-parenting and the full adoption agency algorithm are out of
//! reach of this builder; misnested tables are kept in token order.
use crate::tokenizer::tokenize;
use crate::types::{Node, Token};

type Attributes = Vec<(String, Option<String>)>;

pub fn parse_fragment(input: &str) -> Vec<Node> {
    build_fragment(&tokenize(input))
}

pub fn build_fragment(tokens: &[Token]) -> Vec<Node> {
    let mut arena = NodeArena::new();
    let root = arena.push(ArenaNode::Element {
        name: String::new(),
        attributes: Vec::new(),
        children: Vec::new(),
    });
    let mut builder = Builder {
        arena,
        root,
        open: Vec::new(),
        reopen: Vec::new(),
    };

    for token in tokens {
        builder.push_token(token);
    }

    builder.arena.into_children(root)
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn closes_p(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "header"
            | "hgroup"
            | "hr"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "search"
            | "section"
            | "summary"
            | "table"
            | "ul"
            | "li"
            | "dd"
            | "dt"
    ) || is_heading(name)
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_formatting(name: &str) -> bool {
    matches!(
        name,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

fn is_scope_boundary(name: &str) -> bool {
    matches!(
        name,
        "applet" | "caption" | "html" | "marquee" | "object" | "table" | "td" | "th" | "template"
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Default,
    Button,
    ListItem,
}

impl Scope {
    fn is_boundary(self, name: &str) -> bool {
        is_scope_boundary(name)
            || match self {
                Scope::Default => false,
                Scope::Button => name == "button",
                Scope::ListItem => name == "ol" || name == "ul",
            }
    }
}

struct Builder {
    arena: NodeArena,
    root: usize,
    /// Stack of open elements (arena indices); the fragment root is implicit.
    open: Vec<usize>,
    /// Formatting elements closed implicitly, in open order.
    reopen: Vec<(String, Attributes)>,
}

impl Builder {
    fn current(&self) -> usize {
        self.open.last().copied().unwrap_or(self.root)
    }

    fn current_name(&self) -> Option<&str> {
        self.open.last().and_then(|&i| self.arena.name(i))
    }

    fn push_token(&mut self, token: &Token) {
        match token {
            Token::Doctype(_) => {
                log::trace!(target: "html::dom_builder", "doctype in fragment ignored");
            }
            Token::Comment(text) => {
                let parent = self.current();
                self.arena.add_child(parent, ArenaNode::Comment { text: text.clone() });
            }
            Token::Text(text) => {
                if text.is_empty() {
                    return;
                }
                self.reopen_formatting();
                let parent = self.current();
                self.arena.append_text(parent, text);
            }
            Token::StartTag {
                name, attributes, ..
            } => self.start_tag(name, attributes),
            Token::EndTag(name) => self.end_tag(name),
        }
    }

    fn start_tag(&mut self, name: &str, attributes: &Attributes) {
        if matches!(name, "html" | "head" | "body") {
            log::trace!(target: "html::dom_builder", "<{name}> in fragment ignored");
            return;
        }

        if closes_p(name) {
            match name {
                "li" => self.close_list_item(&["li"]),
                "dd" | "dt" => self.close_list_item(&["dd", "dt"]),
                _ => {}
            }
            if self.in_scope("p", Scope::Button) {
                self.close_element("p");
            }
            if is_heading(name) && self.current_name().is_some_and(is_heading) {
                log::trace!(target: "html::dom_builder", "<{name}> closes open heading");
                self.open.pop();
            }
        } else if name == "option" && self.current_name() == Some("option") {
            self.open.pop();
        }

        if !closes_p(name) {
            self.reopen_formatting();
        }

        self.insert_element(name, attributes.clone());
    }

    fn insert_element(&mut self, name: &str, attributes: Attributes) -> usize {
        let parent = self.current();
        let index = self.arena.add_child(
            parent,
            ArenaNode::Element {
                name: name.to_string(),
                attributes,
                children: Vec::new(),
            },
        );
        if !is_void_element(name) {
            self.open.push(index);
        }
        index
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "br" => {
                log::trace!(target: "html::dom_builder", "</br> treated as <br>");
                self.reopen_formatting();
                self.insert_element("br", Vec::new());
                return;
            }
            "p" if !self.in_scope("p", Scope::Button) => {
                log::trace!(target: "html::dom_builder", "stray </p> inserts empty paragraph");
                self.insert_element("p", Vec::new());
                self.open.pop();
                return;
            }
            "html" | "head" | "body" => return,
            _ => {}
        }

        let scope = match name {
            "li" => Scope::ListItem,
            "p" => Scope::Button,
            _ => Scope::Default,
        };
        if !self.in_scope(name, scope) {
            log::trace!(target: "html::dom_builder", "unmatched </{name}> ignored");
            return;
        }
        self.reopen.retain(|(n, _)| n != name);
        self.close_element(name);
    }

    fn in_scope(&self, target: &str, scope: Scope) -> bool {
        for &index in self.open.iter().rev() {
            let Some(name) = self.arena.name(index) else {
                continue;
            };
            if name == target {
                return true;
            }
            if scope.is_boundary(name) {
                return false;
            }
        }
        false
    }

    /// Pop through `target`, remembering formatting elements popped on the way.
    fn close_element(&mut self, target: &str) {
        let mut skipped = Vec::new();
        while let Some(index) = self.open.pop() {
            let Some(name) = self.arena.name(index) else {
                continue;
            };
            if name == target {
                break;
            }
            if is_formatting(name) {
                skipped.push((name.to_string(), self.arena.attributes(index)));
            }
        }
        skipped.reverse();
        self.reopen.extend(skipped);
    }

    fn close_list_item(&mut self, names: &[&str]) {
        let found = self.open.iter().rev().find_map(|&index| {
            let name = self.arena.name(index)?;
            if names.contains(&name) {
                return Some(Some(name.to_string()));
            }
            let special = closes_p(name) && !matches!(name, "address" | "div" | "p");
            (special || Scope::ListItem.is_boundary(name)).then_some(None)
        });
        if let Some(Some(name)) = found {
            self.close_element(&name);
        }
    }

    fn reopen_formatting(&mut self) {
        if self.reopen.is_empty() {
            return;
        }
        for (name, attributes) in std::mem::take(&mut self.reopen) {
            log::trace!(target: "html::dom_builder", "reopening <{name}>");
            self.insert_element(&name, attributes);
        }
    }
}

#[derive(Debug)]
enum ArenaNode {
    Element {
        name: String,
        attributes: Attributes,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn name(&self, index: usize) -> Option<&str> {
        match &self.nodes[index] {
            ArenaNode::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    fn attributes(&self, index: usize) -> Attributes {
        match &self.nodes[index] {
            ArenaNode::Element { attributes, .. } => attributes.clone(),
            _ => Vec::new(),
        }
    }

    fn add_child(&mut self, parent: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        if let ArenaNode::Element { children, .. } = &mut self.nodes[parent] {
            children.push(child_index);
        }
        child_index
    }

    /// Adjacent text merges into one node, as the browser's insertion does.
    fn append_text(&mut self, parent: usize, text: &str) {
        let last = match &self.nodes[parent] {
            ArenaNode::Element { children, .. } => children.last().copied(),
            _ => None,
        };
        if let Some(last) = last {
            if let ArenaNode::Text { text: existing } = &mut self.nodes[last] {
                existing.push_str(text);
                return;
            }
        }
        self.add_child(
            parent,
            ArenaNode::Text {
                text: text.to_string(),
            },
        );
    }

    fn into_children(self, root: usize) -> Vec<Node> {
        let mut nodes: Vec<Option<ArenaNode>> = self.nodes.into_iter().map(Some).collect();
        let mut built: Vec<Node> = Vec::new();

        // Iterative postorder so deeply nested input cannot overflow the stack:
        // once a node is revisited, its children are the last `n` entries of
        // `built`, in source order.
        let mut stack: Vec<(usize, bool)> = vec![(root, false)];
        while let Some((index, visited)) = stack.pop() {
            if !visited {
                stack.push((index, true));
                if let Some(ArenaNode::Element { children, .. }) = &nodes[index] {
                    for &child in children.iter().rev() {
                        stack.push((child, false));
                    }
                }
                continue;
            }

            let node = match nodes[index].take() {
                Some(ArenaNode::Element {
                    name,
                    attributes,
                    children,
                }) => {
                    let split = built.len() - children.len();
                    Node::Element {
                        name,
                        attributes,
                        children: built.split_off(split),
                    }
                }
                Some(ArenaNode::Text { text }) => Node::Text { text },
                Some(ArenaNode::Comment { text }) => Node::Comment { text },
                None => continue,
            };
            built.push(node);
        }

        match built.pop() {
            Some(Node::Element { children, .. }) => children,
            _ => Vec::new(),
        }
    }
}
