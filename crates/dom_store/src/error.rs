use core_types::{ComponentId, NodePath};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomStoreError {
    UnknownBlock(ComponentId),
    Detached(ComponentId),
    IndexOutOfBounds { index: usize, len: usize },
    NoActiveRange,
    InvalidRange(ComponentId),
    MissingNode { block: ComponentId, path: NodePath },
    /// Block roots cannot be spliced into the (flat) block list.
    RootNotUnwrappable(ComponentId),
}

impl fmt::Display for DomStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomStoreError::UnknownBlock(id) => write!(f, "unknown block {}", id.0),
            DomStoreError::Detached(id) => write!(f, "block {} has no attached element", id.0),
            DomStoreError::IndexOutOfBounds { index, len } => {
                write!(f, "block index {index} out of bounds for {len} block(s)")
            }
            DomStoreError::NoActiveRange => f.write_str("no active range"),
            DomStoreError::InvalidRange(id) => {
                write!(f, "range does not resolve inside block {}", id.0)
            }
            DomStoreError::MissingNode { block, path } => {
                write!(f, "no element at {:?} in block {}", path.steps(), block.0)
            }
            DomStoreError::RootNotUnwrappable(id) => {
                write!(f, "block {} root element cannot be unwrapped", id.0)
            }
        }
    }
}

impl std::error::Error for DomStoreError {}
