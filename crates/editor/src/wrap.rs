//! Inline wrapping of the active text range.
use crate::host::{ActiveRange, ComponentTree, RangeHost};
use crate::outcome::{Outcome, SkipReason};
use crate::{INLINE_STYLE_TAG, MARKER_CLASS};
use html::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTransform {
    Uppercase,
    Lowercase,
}

impl TextTransform {
    pub fn css_value(self) -> &'static str {
        match self {
            TextTransform::Uppercase => "uppercase",
            TextTransform::Lowercase => "lowercase",
        }
    }
}

/// Wraps the active range in `<span class="gjs-inline-span-in-paragraph">`
/// and selects the new span's contents.
///
/// Refused when the range is collapsed or when either boundary already sits
/// inside a span.
pub fn toggle_wrap<H: RangeHost>(host: &mut H) -> Result<Outcome, H::Error> {
    let span = Node::element(INLINE_STYLE_TAG).with_attr("class", MARKER_CLASS);
    replace_range_with(host, span, "editor::wrap")
}

/// Replaces the active range with a span carrying a `text-transform` style.
pub fn apply_text_transform<H: RangeHost>(
    host: &mut H,
    transform: TextTransform,
) -> Result<Outcome, H::Error> {
    let span = Node::element(INLINE_STYLE_TAG)
        .with_attr("style", format!("text-transform: {}", transform.css_value()));
    replace_range_with(host, span, "editor::transform")
}

fn replace_range_with<H: RangeHost>(
    host: &mut H,
    span: Node,
    target: &str,
) -> Result<Outcome, H::Error> {
    let Some(active) = host.active_range() else {
        return Ok(skip(target, SkipReason::NoActiveSelection));
    };
    if active.range.is_collapsed() {
        return Ok(skip(target, SkipReason::CollapsedRange));
    }
    if inside_inline_span(host, &active) {
        return Ok(skip(target, SkipReason::AlreadyWrapped));
    }

    let text = host.range_text()?;
    host.delete_contents()?;
    let span = if text.is_empty() {
        span
    } else {
        span.with_child(Node::text(text))
    };
    let path = host.insert_node(span)?;
    host.select_node_contents(active.block, &path)?;
    log::debug!(target: target, "wrapped range in block {:?} at {:?}", active.block, path);
    Ok(Outcome::Applied)
}

fn inside_inline_span<H: RangeHost>(host: &H, active: &ActiveRange) -> bool {
    [&active.range.start, &active.range.end].into_iter().any(|boundary| {
        host.ancestor_tags(active.block, &boundary.container)
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(INLINE_STYLE_TAG))
    })
}

/// Replaces the selected span with its children and clears the selection.
pub fn unwrap<H: ComponentTree + RangeHost>(host: &mut H) -> Result<Outcome, H::Error> {
    let target = "editor::unwrap";
    let Some(selected) = host.selected() else {
        return Ok(skip(target, SkipReason::NoActiveSelection));
    };
    let Some(element) = host.component(&selected).and_then(|view| view.element) else {
        return Ok(skip(target, SkipReason::DetachedElement));
    };
    if selected.is_block() || !element.tag.eq_ignore_ascii_case(INLINE_STYLE_TAG) {
        return Ok(skip(target, SkipReason::NotInlineStyled));
    }
    host.unwrap_element(&selected)?;
    host.select(None);
    log::debug!(target: target, "unwrapped {:?}", selected);
    Ok(Outcome::Applied)
}

fn skip(target: &str, reason: SkipReason) -> Outcome {
    log::debug!(target: target, "skipped: {reason}");
    Outcome::Skipped(reason)
}
