//! Source positions.
//!
//! A [`Pos`] is an opaque offset into the file set of the front-end. The
//! lowering never maps it back to a line or column; it only compares
//! positions to emit members in source order.

use std::fmt;

/// A position in the front-end's file set.
///
/// Positions are totally ordered. Synthesized members (such as the package
/// initializer) carry [`Pos::NONE`] and therefore sort before everything else.
///
/// # Example
///
/// ```
/// use llgo_core::Pos;
///
/// assert!(Pos::NONE < Pos::new(1));
/// assert!(!Pos::NONE.is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos(u32);

impl Pos {
    /// The position of synthesized members.
    pub const NONE: Pos = Pos(0);

    /// Create a position from a raw file-set offset.
    #[inline]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// Get the raw file-set offset.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0
    }

    /// Whether this position refers to real source text.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos:{}", self.0)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("-")
        }
    }
}

impl From<u32> for Pos {
    fn from(offset: u32) -> Self {
        Self::new(offset)
    }
}
