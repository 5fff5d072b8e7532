//! Seams between the engine and the document host.
//!
//! The host owns the component tree, the live selection and the formatting
//! command machinery. The engine only talks to it through these traits.
use crate::model::{BlockKind, EditableBlock};
use core_types::{ComponentId, ComponentRef, NodePath};
use html::{DomRange, Node};

/// Error type shared by the mutating host traits.
pub trait Host {
    type Error: std::error::Error + 'static;
}

/// Read-only snapshot of a component's rendered element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementView {
    pub tag: String,
    pub classes: Vec<String>,
    pub inner_markup: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentView {
    pub component: ComponentRef,
    /// Declared type of the owning block.
    pub kind: BlockKind,
    /// `None` when the component has no attached element.
    pub element: Option<ElementView>,
}

/// The live text selection: a range inside one block's element tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveRange {
    pub block: ComponentId,
    pub range: DomRange,
}

pub trait ComponentTree: Host {
    fn selected(&self) -> Option<ComponentRef>;
    fn component(&self, component: &ComponentRef) -> Option<ComponentView>;
    fn block_index(&self, block: ComponentId) -> Option<usize>;
    /// Materializes `block` at `index` and returns the new block's id.
    fn insert_block(&mut self, index: usize, block: &EditableBlock) -> Result<ComponentId, Self::Error>;
    fn remove_block(&mut self, block: ComponentId) -> Result<(), Self::Error>;
    /// Changes the selection. Hosts notify selection listeners from here.
    fn select(&mut self, component: Option<ComponentRef>);
}

/// DOM `Range`-style access to the active selection.
pub trait RangeHost: Host {
    fn active_range(&self) -> Option<ActiveRange>;
    /// Tag names of the elements from the block root down to `path`, root
    /// first. Text nodes contribute nothing.
    fn ancestor_tags(&self, block: ComponentId, path: &NodePath) -> Vec<String>;
    fn range_text(&self) -> Result<String, Self::Error>;
    /// Removes the selected content and collapses the range to its start.
    fn delete_contents(&mut self) -> Result<(), Self::Error>;
    /// Inserts `node` at the range start and returns its path.
    fn insert_node(&mut self, node: Node) -> Result<NodePath, Self::Error>;
    fn select_node_contents(&mut self, block: ComponentId, path: &NodePath) -> Result<(), Self::Error>;
    /// Replaces the element at `component` with its children.
    fn unwrap_element(&mut self, component: &ComponentRef) -> Result<(), Self::Error>;
}

/// `execCommand` / `queryCommandValue` of the host document.
pub trait CommandHost {
    fn exec_command(&mut self, name: &str, value: Option<&str>) -> bool;
    fn query_command_value(&self, name: &str) -> Option<String>;
}
