//! Selection-driven block normalization and inline wrapping.
//!
//! The engine never owns the document. Every operation borrows a host that
//! implements the traits in [`host`], performs one bounded mutation and
//! reports either [`Outcome::Applied`] or the guard that made it a no-op.

pub mod convert;
pub mod host;
pub mod model;
pub mod normalize;
pub mod outcome;
pub mod sync;
pub mod wrap;

pub use crate::convert::{convert, serialize_nodes, text_content};
pub use crate::host::{ActiveRange, CommandHost, ComponentTree, ComponentView, ElementView, Host, RangeHost};
pub use crate::model::{BlockKind, ContentNode, EditableBlock, NormalizationState, has_nested_same_class};
pub use crate::normalize::normalize_selected;
pub use crate::outcome::{Outcome, SkipReason};
pub use crate::sync::{ToolbarControlState, apply, refresh};
pub use crate::wrap::{TextTransform, apply_text_transform, toggle_wrap, unwrap};

/// Class carried by normalized blocks and by spans created by [`toggle_wrap`].
pub const MARKER_CLASS: &str = "gjs-inline-span-in-paragraph";
/// Tag of the inline styling element.
pub const INLINE_STYLE_TAG: &str = "span";
/// Only blocks rendered with this tag are normalized.
pub const CONVERTIBLE_BLOCK_TAG: &str = "p";
