//! In-memory host document.
//!
//! A flat, ordered list of blocks, each owning its element tree, plus the
//! selection state a browser editor would keep: the selected component, the
//! live text range and the formatting-command state. Selection changes are
//! forwarded to an attached event bus sender.
mod commands;
mod error;

pub use crate::commands::ExecutedCommand;
pub use crate::error::DomStoreError;

use crate::commands::CommandState;
use bus::EditorEvent;
use core_types::{ComponentId, ComponentRef, NodePath};
use editor::{
    ActiveRange, BlockKind, CommandHost, ComponentTree, ComponentView, EditableBlock, ElementView,
    Host, RangeHost,
};
use html::range::{self, Boundary, DomRange};
use html::{Node, inner_html, parse_fragment, serialize_fragment};
use std::sync::mpsc::Sender;

/// Attribute naming a block's declared component type in source markup.
pub const TYPE_ATTRIBUTE: &str = "data-gjs-type";

#[derive(Clone, Debug)]
struct Block {
    id: ComponentId,
    kind: BlockKind,
    element: Option<Node>,
}

#[derive(Debug, Default)]
pub struct DomStore {
    blocks: Vec<Block>,
    next_id: u64,
    selected: Option<ComponentRef>,
    range: Option<ActiveRange>,
    commands: CommandState,
    events: Option<Sender<EditorEvent>>,
}

impl DomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One block per top-level element of `markup`. Loose top-level text and
    /// comments are dropped.
    pub fn from_markup(markup: &str) -> Self {
        let mut store = Self::new();
        for node in parse_fragment(markup) {
            if let Node::Element { .. } = node {
                let kind = BlockKind::from_name(node.attr(TYPE_ATTRIBUTE).unwrap_or(""));
                store.push_block(kind, node);
            } else if !node.text_content().trim().is_empty() {
                log::trace!(target: "dom_store", "dropping loose top-level text {node:?}");
            }
        }
        store
    }

    /// Forward selection changes to `tx`.
    pub fn connect(&mut self, tx: Sender<EditorEvent>) {
        self.events = Some(tx);
    }

    pub fn push_block(&mut self, kind: BlockKind, element: Node) -> ComponentId {
        let id = self.allocate_id();
        self.blocks.push(Block {
            id,
            kind,
            element: Some(element),
        });
        id
    }

    pub fn push_detached(&mut self, kind: BlockKind) -> ComponentId {
        let id = self.allocate_id();
        self.blocks.push(Block {
            id,
            kind,
            element: None,
        });
        id
    }

    pub fn detach(&mut self, block: ComponentId) -> Result<(), DomStoreError> {
        self.block_mut(block)?.element = None;
        self.forget_range_in(block);
        Ok(())
    }

    pub fn block_ids(&self) -> Vec<ComponentId> {
        self.blocks.iter().map(|b| b.id).collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn kind(&self, block: ComponentId) -> Option<&BlockKind> {
        self.blocks.iter().find(|b| b.id == block).map(|b| &b.kind)
    }

    pub fn element(&self, block: ComponentId) -> Option<&Node> {
        self.blocks
            .iter()
            .find(|b| b.id == block)
            .and_then(|b| b.element.as_ref())
    }

    /// Serialized document: every attached block, in order.
    pub fn to_markup(&self) -> String {
        let nodes: Vec<Node> = self
            .blocks
            .iter()
            .filter_map(|b| b.element.clone())
            .collect();
        serialize_fragment(&nodes)
    }

    /// Places the text selection. The range must resolve inside the block.
    pub fn set_range(&mut self, block: ComponentId, range: DomRange) -> Result<(), DomStoreError> {
        let root = self.root(block)?;
        if !range.is_valid_in(root) {
            return Err(DomStoreError::InvalidRange(block));
        }
        self.range = Some(ActiveRange { block, range });
        Ok(())
    }

    pub fn clear_range(&mut self) {
        self.range = None;
    }

    /// Simulates the selection's computed formatting value.
    pub fn set_command_value(&mut self, name: &str, value: &str) {
        self.commands.set(name, value);
    }

    pub fn executed(&self) -> &[ExecutedCommand] {
        self.commands.log()
    }

    fn allocate_id(&mut self) -> ComponentId {
        self.next_id += 1;
        ComponentId(self.next_id)
    }

    fn block_mut(&mut self, block: ComponentId) -> Result<&mut Block, DomStoreError> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == block)
            .ok_or(DomStoreError::UnknownBlock(block))
    }

    fn root(&self, block: ComponentId) -> Result<&Node, DomStoreError> {
        let found = self
            .blocks
            .iter()
            .find(|b| b.id == block)
            .ok_or(DomStoreError::UnknownBlock(block))?;
        found.element.as_ref().ok_or(DomStoreError::Detached(block))
    }

    fn root_mut(&mut self, block: ComponentId) -> Result<&mut Node, DomStoreError> {
        self.block_mut(block)?
            .element
            .as_mut()
            .ok_or(DomStoreError::Detached(block))
    }

    fn active(&self) -> Result<ActiveRange, DomStoreError> {
        self.range.clone().ok_or(DomStoreError::NoActiveRange)
    }

    /// Paths at and after the unwrapped element no longer name the same
    /// nodes. A range touching the element collapses to where it stood; a
    /// range behind it is dropped.
    fn settle_range_after_unwrap(
        &mut self,
        block: ComponentId,
        unwrapped: &NodePath,
        parent: NodePath,
        index: usize,
    ) {
        let Some(active) = &self.range else {
            return;
        };
        if active.block != block {
            return;
        }
        let depth = parent.steps().len();
        let inside = |b: &Boundary| unwrapped.is_prefix_of(&b.container);
        let shifted = |b: &Boundary| {
            (b.container == parent && b.offset > index)
                || (parent.is_prefix_of(&b.container)
                    && b.container.steps().get(depth).is_some_and(|&step| step > index))
        };
        let (start, end) = (&active.range.start, &active.range.end);
        if inside(start) || inside(end) {
            log::trace!(target: "dom_store", "range collapsed onto unwrapped {unwrapped:?}");
            let point = Boundary::new(parent.clone(), index);
            self.range = Some(ActiveRange {
                block,
                range: DomRange::collapsed_at(point),
            });
        } else if shifted(start) || shifted(end) {
            log::trace!(target: "dom_store", "range behind unwrapped {unwrapped:?} dropped");
            self.range = None;
        }
    }

    fn forget_range_in(&mut self, block: ComponentId) {
        if self.range.as_ref().is_some_and(|r| r.block == block) {
            self.range = None;
        }
    }
}

impl Host for DomStore {
    type Error = DomStoreError;
}

impl ComponentTree for DomStore {
    fn selected(&self) -> Option<ComponentRef> {
        self.selected.clone()
    }

    fn component(&self, component: &ComponentRef) -> Option<ComponentView> {
        let block = self.blocks.iter().find(|b| b.id == component.block)?;
        let element = match &block.element {
            None => None,
            Some(root) => {
                let node = range::node_at(root, &component.path)?;
                let tag = node.name()?.to_string();
                Some(ElementView {
                    tag,
                    classes: node.class_list().map(str::to_string).collect(),
                    inner_markup: inner_html(node),
                })
            }
        };
        Some(ComponentView {
            component: component.clone(),
            kind: block.kind.clone(),
            element,
        })
    }

    fn block_index(&self, block: ComponentId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block)
    }

    fn insert_block(&mut self, index: usize, block: &EditableBlock) -> Result<ComponentId, DomStoreError> {
        if index > self.blocks.len() {
            return Err(DomStoreError::IndexOutOfBounds {
                index,
                len: self.blocks.len(),
            });
        }
        let id = self.allocate_id();
        let element = block.to_element();
        self.blocks.insert(
            index,
            Block {
                id,
                kind: block.kind.clone(),
                element: Some(element),
            },
        );
        Ok(id)
    }

    fn remove_block(&mut self, block: ComponentId) -> Result<(), DomStoreError> {
        let index = self
            .block_index(block)
            .ok_or(DomStoreError::UnknownBlock(block))?;
        self.blocks.remove(index);
        self.forget_range_in(block);
        if self.selected.as_ref().is_some_and(|s| s.block == block) {
            self.selected = None;
        }
        Ok(())
    }

    fn select(&mut self, component: Option<ComponentRef>) {
        self.selected = component.clone();
        if let Some(tx) = &self.events {
            if tx
                .send(EditorEvent::SelectionChanged {
                    selected: component,
                })
                .is_err()
            {
                log::trace!(target: "dom_store", "selection listener disconnected");
            }
        }
    }
}

impl RangeHost for DomStore {
    fn active_range(&self) -> Option<ActiveRange> {
        self.range.clone()
    }

    fn ancestor_tags(&self, block: ComponentId, path: &NodePath) -> Vec<String> {
        let Ok(root) = self.root(block) else {
            return Vec::new();
        };
        range::ancestors(root, path)
            .into_iter()
            .filter_map(|node| node.name().map(str::to_string))
            .collect()
    }

    fn range_text(&self) -> Result<String, DomStoreError> {
        let active = self.active()?;
        let root = self.root(active.block)?;
        Ok(range::range_to_string(root, &active.range))
    }

    fn delete_contents(&mut self) -> Result<(), DomStoreError> {
        let active = self.active()?;
        let root = self.root_mut(active.block)?;
        let start = range::delete_contents(root, &active.range);
        self.range = Some(ActiveRange {
            block: active.block,
            range: DomRange::collapsed_at(start),
        });
        Ok(())
    }

    fn insert_node(&mut self, node: Node) -> Result<NodePath, DomStoreError> {
        let active = self.active()?;
        let root = self.root_mut(active.block)?;
        range::insert_node(root, &active.range.start, node)
            .ok_or(DomStoreError::InvalidRange(active.block))
    }

    fn select_node_contents(&mut self, block: ComponentId, path: &NodePath) -> Result<(), DomStoreError> {
        let root = self.root(block)?;
        let range = DomRange::node_contents(root, path).ok_or_else(|| DomStoreError::MissingNode {
            block,
            path: path.clone(),
        })?;
        self.range = Some(ActiveRange { block, range });
        Ok(())
    }

    fn unwrap_element(&mut self, component: &ComponentRef) -> Result<(), DomStoreError> {
        let Some((parent, index)) = component.path.parent() else {
            return Err(DomStoreError::RootNotUnwrappable(component.block));
        };
        let root = self.root_mut(component.block)?;
        if !range::unwrap_element(root, &component.path) {
            return Err(DomStoreError::MissingNode {
                block: component.block,
                path: component.path.clone(),
            });
        }
        self.settle_range_after_unwrap(component.block, &component.path, parent, index);
        Ok(())
    }
}

impl CommandHost for DomStore {
    fn exec_command(&mut self, name: &str, value: Option<&str>) -> bool {
        self.commands.exec(name, value)
    }

    fn query_command_value(&self, name: &str) -> Option<String> {
        self.commands.query(name)
    }
}
