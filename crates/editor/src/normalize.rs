//! Block normalization on selection.
//!
//! A selected, attached, unconverted `p` block is replaced by a canonical
//! text block built from [`convert`] of its inner markup. The replacement is
//! inserted where the original was, the original is removed and the new block
//! is selected. That selection change fires again and must be a no-op, which
//! the `AlreadyNormalized` guard guarantees.
use crate::convert::convert;
use crate::host::ComponentTree;
use crate::model::EditableBlock;
use crate::outcome::{Outcome, SkipReason};
use crate::CONVERTIBLE_BLOCK_TAG;
use core_types::ComponentRef;

pub fn normalize_selected<H: ComponentTree>(
    host: &mut H,
    selected: Option<&ComponentRef>,
) -> Result<Outcome, H::Error> {
    let Some(selected) = selected else {
        return Ok(skip(SkipReason::NoActiveSelection));
    };
    let Some(view) = host.component(selected) else {
        return Ok(skip(SkipReason::DetachedElement));
    };
    let Some(element) = view.element else {
        return Ok(skip(SkipReason::DetachedElement));
    };
    if !selected.is_block() || !element.tag.eq_ignore_ascii_case(CONVERTIBLE_BLOCK_TAG) {
        return Ok(skip(SkipReason::NotConvertible));
    }
    let current = EditableBlock::from_host(view.kind, element.tag.clone(), &element.classes, Vec::new());
    if current.is_normalized() {
        return Ok(skip(SkipReason::AlreadyNormalized));
    }
    let Some(index) = host.block_index(selected.block) else {
        return Ok(skip(SkipReason::DetachedElement));
    };

    let replacement = EditableBlock::normalized(element.tag, current.classes, convert(&element.inner_markup));
    let new_id = host.insert_block(index, &replacement)?;
    if let Err(err) = host.remove_block(selected.block) {
        log::warn!(
            target: "editor::normalize",
            "could not remove block {:?}; withdrawing replacement {:?}",
            selected.block,
            new_id
        );
        if host.remove_block(new_id).is_err() {
            log::warn!(target: "editor::normalize", "replacement {new_id:?} left in place");
        }
        return Err(err);
    }
    log::debug!(
        target: "editor::normalize",
        "block {:?} replaced by {:?} with {} node(s)",
        selected.block,
        new_id,
        replacement.children.len()
    );
    host.select(Some(ComponentRef::block(new_id)));
    Ok(Outcome::Applied)
}

fn skip(reason: SkipReason) -> Outcome {
    log::debug!(target: "editor::normalize", "skipped: {reason}");
    Outcome::Skipped(reason)
}
