//! Forgiving HTML fragment parsing, serialization and live-range editing for
//! the contents of editable blocks.

pub mod range;
pub mod snapshot;

mod dom_builder;
mod entities;
mod serialize;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_fragment, parse_fragment};
pub use crate::range::{Boundary, DomRange};
pub use crate::serialize::{inner_html, outer_html, serialize_fragment};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Node, Token};

/// Concatenated text of a fragment, like `textContent` on its container.
pub fn fragment_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&node.text_content());
    }
    out
}
