//! A single mobile point with an infection flag.

use cg_core::{Point, Status};

/// Chebyshev radius within which two agents count as near.  Independent of
/// the bucket size.
pub const NEAR_DISTANCE: u32 = 2;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub x:        i32,
    pub y:        i32,
    pub infected: bool,
}

impl Agent {
    #[inline]
    pub fn new(x: i32, y: i32, infected: bool) -> Self {
        Self { x, y, infected }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn status(&self) -> Status {
        Status::from_infected(self.infected)
    }

    /// `true` if both axis deltas are `<= NEAR_DISTANCE`.
    #[inline]
    pub fn is_near(&self, other: &Agent) -> bool {
        self.position().within(other.position(), NEAR_DISTANCE)
    }

    /// Per-axis step length: infected agents move twice as far.
    #[inline]
    pub fn step_magnitude(&self) -> i32 {
        if self.infected { 2 } else { 1 }
    }
}
