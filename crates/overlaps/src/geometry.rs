//! Integer geometry primitives: points, rectangles, slicing and intersection.
//!
//! Conventions
//! - A rectangle covers the half-open span `[x, x+width) × [y, y+height)`;
//!   touching edges do not overlap.
//! - Rectangles built from input are roots (no lineage). Slices record their
//!   root as an arena index and always carry the root's id.

use std::fmt;

use crate::error::OverlapError;
use crate::orientation::Cut;

/// Scalar coordinate type.
pub type Coord = i64;

/// Point in the integer plane, ordered by `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Identity label of an input rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RectId(pub usize);

impl RectId {
    /// Label carried by computed overlap regions; input ids start at 1.
    pub const UNASSIGNED: RectId = RectId(0);
}

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a rectangle inside a run's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RectRef(pub usize);

/// Axis-aligned rectangle with positive extent.
///
/// Invariants:
/// - `width >= 1`, `height >= 1`, and both far edges fit in `Coord`.
/// - `lineage` is `None` for roots; for slices it names the root (never an
///   intermediate slice) and `id` equals the root's id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    origin: Point,
    width: Coord,
    height: Coord,
    id: RectId,
    lineage: Option<RectRef>,
}

/// Outcome of cutting a rectangle at a split value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slice {
    /// The whole rectangle lies below the cut.
    Below,
    /// The whole rectangle lies at or past the cut.
    Above,
    /// The cut runs through the interior; both halves are new slices.
    Split { below: Rectangle, above: Rectangle },
}

impl Rectangle {
    /// Root rectangle; fails with `InvalidGeometry` on a non-positive extent.
    pub fn new(origin: Point, width: Coord, height: Coord, id: RectId) -> Result<Self, OverlapError> {
        let fits = origin.x.checked_add(width).is_some() && origin.y.checked_add(height).is_some();
        if width < 1 || height < 1 || !fits {
            return Err(OverlapError::InvalidGeometry { width, height });
        }
        Ok(Self {
            origin,
            width,
            height,
            id,
            lineage: None,
        })
    }

    /// Shorthand for `new(Point::new(x, y), w, h, RectId(id))`.
    pub fn from_xywh(x: Coord, y: Coord, w: Coord, h: Coord, id: usize) -> Result<Self, OverlapError> {
        Self::new(Point::new(x, y), w, h, RectId(id))
    }

    /// Slice of a root; callers guarantee a positive extent.
    pub(crate) fn derived(origin: Point, width: Coord, height: Coord, id: RectId, root: RectRef) -> Self {
        debug_assert!(width >= 1 && height >= 1, "slice with empty extent");
        Self {
            origin,
            width,
            height,
            id,
            lineage: Some(root),
        }
    }

    /// Root copy of this rectangle's region under another id.
    #[inline]
    pub fn with_id(&self, id: RectId) -> Self {
        Self {
            id,
            lineage: None,
            ..*self
        }
    }

    /// Same geometry and id, lineage cleared.
    #[inline]
    pub(crate) fn into_root(self) -> Self {
        Self {
            lineage: None,
            ..self
        }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }
    /// `(width, height)` as a point.
    #[inline]
    pub fn extent(&self) -> Point {
        Point::new(self.width, self.height)
    }
    #[inline]
    pub fn width(&self) -> Coord {
        self.width
    }
    #[inline]
    pub fn height(&self) -> Coord {
        self.height
    }
    /// Right edge (exclusive).
    #[inline]
    pub fn x_end(&self) -> Coord {
        self.origin.x + self.width
    }
    /// Bottom edge (exclusive).
    #[inline]
    pub fn y_end(&self) -> Coord {
        self.origin.y + self.height
    }
    #[inline]
    pub fn id(&self) -> RectId {
        self.id
    }
    #[inline]
    pub fn lineage(&self) -> Option<RectRef> {
        self.lineage
    }
    #[inline]
    pub fn is_root(&self) -> bool {
        self.lineage.is_none()
    }

    /// Root of this rectangle, given its own arena slot.
    #[inline]
    pub fn root_ref(&self, own: RectRef) -> RectRef {
        self.lineage.unwrap_or(own)
    }

    /// Same origin and extent, ignoring identity.
    #[inline]
    pub fn same_region(&self, other: &Rectangle) -> bool {
        self.origin == other.origin && self.width == other.width && self.height == other.height
    }

    /// Cut at `cut`; `own` is this rectangle's arena slot, used as lineage
    /// when `self` is a root.
    pub fn slice(&self, own: RectRef, cut: Cut) -> Slice {
        if cut.is_inner_split(self) {
            let (below, above) = cut.split(self, self.root_ref(own));
            return Slice::Split { below, above };
        }
        if cut.is_above(cut.orientation.reference(self)) {
            Slice::Above
        } else {
            Slice::Below
        }
    }

    /// Geometric overlap with `other`, if any.
    pub fn overlap(&self, other: &Rectangle) -> Option<Rectangle> {
        let (x, w) = axis_overlap(self.origin.x, self.width, other.origin.x, other.width)?;
        let (y, h) = axis_overlap(self.origin.y, self.height, other.origin.y, other.height)?;
        Rectangle::new(Point::new(x, y), w, h, RectId::UNASSIGNED).ok()
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Rectangle at {}, w={}, h={}.",
            self.id, self.origin, self.width, self.height
        )
    }
}

/// Pairwise intersection shaped for folding: an absent `b` yields absent.
pub fn intersect(a: &Rectangle, b: Option<&Rectangle>) -> Option<Rectangle> {
    a.overlap(b?)
}

/// Overlap of `[a, a+a_len)` and `[b, b+b_len)` as `(start, len)`.
fn axis_overlap(a: Coord, a_len: Coord, b: Coord, b_len: Coord) -> Option<(Coord, Coord)> {
    let ((near, near_len), (other, other_len)) = if a < b {
        ((a, a_len), (b, b_len))
    } else {
        ((b, b_len), (a, a_len))
    };
    let near_end = near + near_len;
    if near_end <= other {
        return None;
    }
    let end = near_end.min(other + other_len);
    Some((other, end - other))
}
