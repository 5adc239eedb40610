//! Board coordinates and the coarse spatial bucketing used for proximity tests.
//!
//! The board is an integer plane.  Agents start inside `[0, board_size)` on
//! both axes but are free to wander past the edges, so bucket mapping must be
//! well defined for negative coordinates too.
//!
//! # Bucket policy
//!
//! A point maps to the bucket whose lower-left corner is the largest multiple
//! of `bucket_size` that is `<=` the coordinate (floor division):
//!
//! ```text
//! bucket(x) = x - x.rem_euclid(size)
//!
//!   size = 5:   x = 7  → 5      x = 0  → 0
//!               x = -1 → -5     x = -5 → -5     x = -6 → -10
//! ```
//!
//! Truncating remainder (`x % size`) would fold `-1` into bucket `0`, making
//! bucket `0` twice as wide as every other bucket.

use std::fmt;

/// A point on the board.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance: the larger of the two axis deltas.
    #[inline]
    pub fn chebyshev(self, other: Point) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// `true` if both axis deltas are `<= radius`.
    #[inline]
    pub fn within(self, other: Point, radius: u32) -> bool {
        self.chebyshev(other) <= radius
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifier of one square bucket: the coordinates of its lower-left corner.
///
/// Both components are always multiples of the bucket size that produced it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketId {
    pub x: i32,
    pub y: i32,
}

impl BucketId {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The bucket's corner as a board point.
    #[inline]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B[{}, {}]", self.x, self.y)
    }
}

/// Map `p` to its bucket using floor division.
///
/// # Panics
/// Panics if `bucket_size == 0`.  Use [`SpatialGrid`] to carry a validated
/// size around.
#[inline]
pub fn to_bucket(p: Point, bucket_size: i32) -> BucketId {
    BucketId {
        x: p.x - p.x.rem_euclid(bucket_size),
        y: p.y - p.y.rem_euclid(bucket_size),
    }
}

/// Bucket mapping bound to one validated bucket size.
///
/// The engine and any view consuming its reports must be built from the same
/// `SpatialGrid` (or at least the same size) so bucket lookups never miss.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialGrid {
    bucket_size: i32,
}

impl SpatialGrid {
    /// Returns `None` unless `bucket_size > 0`.
    pub fn new(bucket_size: i32) -> Option<Self> {
        (bucket_size > 0).then_some(Self { bucket_size })
    }

    #[inline]
    pub fn bucket_size(&self) -> i32 {
        self.bucket_size
    }

    #[inline]
    pub fn bucket_of(&self, p: Point) -> BucketId {
        to_bucket(p, self.bucket_size)
    }

    /// `true` if `p` lies inside `bucket`.
    #[inline]
    pub fn contains(&self, bucket: BucketId, p: Point) -> bool {
        self.bucket_of(p) == bucket
    }
}
