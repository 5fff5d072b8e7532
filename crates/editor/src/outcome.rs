use std::fmt;

/// Result of a guarded editor operation.
///
/// A failed precondition is not an error: the operation simply does nothing
/// and says why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    NoActiveSelection,
    DetachedElement,
    NotConvertible,
    AlreadyNormalized,
    CollapsedRange,
    AlreadyWrapped,
    NotInlineStyled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoActiveSelection => "nothing is selected",
            SkipReason::DetachedElement => "selected component has no attached element",
            SkipReason::NotConvertible => "selected component is not a paragraph block",
            SkipReason::AlreadyNormalized => "block is already normalized",
            SkipReason::CollapsedRange => "selection range is collapsed",
            SkipReason::AlreadyWrapped => "selection is already inside an inline span",
            SkipReason::NotInlineStyled => "selected element is not an inline span",
        };
        f.write_str(text)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => f.write_str("applied"),
            Outcome::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}
