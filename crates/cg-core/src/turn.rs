//! Discrete turn counter.

use std::fmt;

/// Number of completed turns of one engine.
///
/// `Turn::ZERO` means no turn has run yet; the first completed turn is
/// `Turn(1)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    #[inline]
    pub fn next(self) -> Turn {
        Turn(self.0 + 1)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
