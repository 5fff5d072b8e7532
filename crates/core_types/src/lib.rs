pub type RawComponentId = u64;

/// Host-assigned identity of a block-level component.
///
/// Ids are never reused within one document; a block replaced by the
/// normalizer gets a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub RawComponentId);

impl ComponentId {
    /// Reserved sentinel for "unassigned".
    pub const INVALID: ComponentId = ComponentId(0);
}

/// Child-index path from a block's root element to one of its descendants.
///
/// The empty path addresses the block element itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(index);
        Self(steps)
    }

    pub fn parent(&self) -> Option<(NodePath, usize)> {
        let (last, rest) = self.0.split_last()?;
        Some((NodePath(rest.to_vec()), *last))
    }

    pub fn steps(&self) -> &[usize] {
        &self.0
    }

    /// `true` when `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &NodePath) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(steps: Vec<usize>) -> Self {
        Self(steps)
    }
}

/// A selectable component: a block, or a node inside a block's element tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub block: ComponentId,
    pub path: NodePath,
}

impl ComponentRef {
    pub fn block(block: ComponentId) -> Self {
        Self {
            block,
            path: NodePath::root(),
        }
    }

    pub fn node(block: ComponentId, path: NodePath) -> Self {
        Self { block, path }
    }

    pub fn is_block(&self) -> bool {
        self.path.is_root()
    }
}
