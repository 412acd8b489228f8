//! Source location spans.

use std::fmt;

/// Byte-offset range into the source text of a unit.
///
/// Layout mirrors the teacher's compact representation: two `u32` offsets,
/// `Copy`, cheap to carry on every node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span used for generated code that has no source counterpart.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Position lowerings use when a generated subtree replaces a construct:
    /// inherit the replaced construct's span (§3 invariant — generated
    /// subtrees may inherit the position of the construct they replace).
    #[inline]
    #[must_use]
    pub fn inherit(from: Span) -> Self {
        from
    }

    #[must_use]
    pub fn is_dummy(self) -> bool {
        self == Span::DUMMY
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
