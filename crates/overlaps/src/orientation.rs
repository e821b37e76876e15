//! Splitting orientations and the cut rule.
//!
//! Four directions: forward (Vertical, Horizontal) cut from the low edge and
//! measure rectangles by their origin; reverse (RevVertical, RevHorizontal)
//! cut from the high edge and measure by the far edge. "Below" always means
//! the side the orientation sweeps from.
//!
//! Code cross-refs: `geometry::Rectangle::slice`, `sorted::SortOrder`,
//! `partition::build`.

use crate::geometry::{Coord, Point, RectRef, Rectangle};
use crate::sorted::SortOrder;

/// Splitting direction. Cycles Vertical → Horizontal → RevVertical →
/// RevHorizontal → Vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
    RevVertical,
    RevHorizontal,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Vertical,
        Orientation::Horizontal,
        Orientation::RevVertical,
        Orientation::RevHorizontal,
    ];

    /// Next orientation of the cycle.
    #[inline]
    pub fn next(self) -> Orientation {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::RevVertical,
            Self::RevVertical => Self::RevHorizontal,
            Self::RevHorizontal => Self::Vertical,
        }
    }

    /// Comparator a set must be keyed by while it is split along `self`.
    #[inline]
    pub fn sort_order(self) -> SortOrder {
        match self {
            Self::Vertical => SortOrder::Horizontal,
            Self::Horizontal => SortOrder::Vertical,
            Self::RevVertical => SortOrder::RevHorizontal,
            Self::RevHorizontal => SortOrder::RevVertical,
        }
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RevVertical | Self::RevHorizontal)
    }

    /// Scalar the orientation measures a rectangle by.
    #[inline]
    pub fn reference(self, r: &Rectangle) -> Coord {
        match self {
            Self::Vertical => r.origin().x,
            Self::Horizontal => r.origin().y,
            Self::RevVertical => r.x_end(),
            Self::RevHorizontal => r.y_end(),
        }
    }

    /// Integer midpoint of `a` and `b`: rounds toward the larger value for
    /// forward orientations and toward the smaller one for reverse ones.
    pub fn midpoint(self, a: Coord, b: Coord) -> Coord {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let span = hi as i128 - lo as i128;
        let half = if self.is_reverse() { span / 2 } else { (span + 1) / 2 };
        (lo as i128 + half) as Coord
    }

    /// Bind a split value.
    #[inline]
    pub fn at(self, value: Coord) -> Cut {
        Cut {
            orientation: self,
            value,
        }
    }
}

/// An orientation bound to a split value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cut {
    pub orientation: Orientation,
    pub value: Coord,
}

impl Cut {
    /// The value lies strictly inside the rectangle's span on the cut axis.
    #[inline]
    pub fn is_inner_split(&self, r: &Rectangle) -> bool {
        let (start, end) = match self.orientation {
            Orientation::Vertical | Orientation::RevVertical => (r.origin().x, r.x_end()),
            Orientation::Horizontal | Orientation::RevHorizontal => (r.origin().y, r.y_end()),
        };
        start < self.value && self.value < end
    }

    /// `c` lies at or past the cut in the orientation's sweep direction.
    #[inline]
    pub fn is_above(&self, c: Coord) -> bool {
        if self.orientation.is_reverse() {
            c <= self.value
        } else {
            c >= self.value
        }
    }

    /// `(below, above)` halves of `r`, both lineage-tagged with `root`.
    /// Requires `is_inner_split(r)`.
    pub(crate) fn split(&self, r: &Rectangle, root: RectRef) -> (Rectangle, Rectangle) {
        debug_assert!(self.is_inner_split(r));
        let o = r.origin();
        let (w, h, id, v) = (r.width(), r.height(), r.id(), self.value);
        let part = |origin: Point, w: Coord, h: Coord| Rectangle::derived(origin, w, h, id, root);
        match self.orientation {
            Orientation::Vertical => {
                let lw = v - o.x;
                (part(o, lw, h), part(Point::new(v, o.y), w - lw, h))
            }
            Orientation::Horizontal => {
                let lh = v - o.y;
                (part(o, w, lh), part(Point::new(o.x, v), w, h - lh))
            }
            Orientation::RevVertical => {
                let rw = r.x_end() - v;
                (part(Point::new(v, o.y), rw, h), part(o, w - rw, h))
            }
            Orientation::RevHorizontal => {
                let rh = r.y_end() - v;
                (part(Point::new(o.x, v), w, rh), part(o, w, h - rh))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{RectId, Slice};

    const OWN: RectRef = RectRef(0);

    fn r(x: Coord, y: Coord, w: Coord, h: Coord, id: usize) -> Rectangle {
        Rectangle::from_xywh(x, y, w, h, id).unwrap()
    }

    fn split(r1: &Rectangle, cut: Cut) -> (Rectangle, Rectangle) {
        match r1.slice(OWN, cut) {
            Slice::Split { below, above } => (below, above),
            other => panic!("expected split, got {other:?}"),
        }
    }

    fn check(part: &Rectangle, x: Coord, y: Coord, w: Coord, h: Coord, id: usize) {
        assert_eq!(part.origin(), Point::new(x, y));
        assert_eq!(part.extent(), Point::new(w, h));
        assert_eq!(part.lineage(), Some(OWN));
        assert_eq!(part.id(), RectId(id));
    }

    #[test]
    fn cycle_visits_all_and_returns() {
        let mut o = Orientation::Vertical;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(o);
            o = o.next();
        }
        assert_eq!(o, Orientation::Vertical);
        assert_eq!(seen, Orientation::ALL.to_vec());
    }

    #[test]
    fn midpoint_rounding_direction() {
        let v = Orientation::Vertical;
        let rv = Orientation::RevVertical;
        assert_eq!(v.midpoint(100, 160), 130);
        assert_eq!(v.midpoint(140, 141), 141);
        assert_eq!(v.midpoint(141, 140), 141);
        assert_eq!(rv.midpoint(140, 141), 140);
        assert_eq!(rv.midpoint(350, 510), 430);
        assert_eq!(rv.midpoint(7, 7), 7);
        assert_eq!(v.midpoint(-3, 0), -1);
        assert_eq!(rv.midpoint(-3, 0), -2);
        assert_eq!(v.midpoint(Coord::MIN, Coord::MAX), 0);
    }

    #[test]
    fn horizontal_slicing() {
        let r1 = r(100, 200, 250, 80, 241);
        let h = Orientation::Horizontal;
        assert_eq!(r1.slice(OWN, h.at(199)), Slice::Above);
        assert_eq!(r1.slice(OWN, h.at(200)), Slice::Above);
        let (b, a) = split(&r1, h.at(201));
        check(&b, 100, 200, 250, 1, 241);
        check(&a, 100, 201, 250, 79, 241);
        let (b, a) = split(&r1, h.at(237));
        check(&b, 100, 200, 250, 37, 241);
        check(&a, 100, 237, 250, 43, 241);
        let (b, a) = split(&r1, h.at(279));
        check(&b, 100, 200, 250, 79, 241);
        check(&a, 100, 279, 250, 1, 241);
        assert_eq!(r1.slice(OWN, h.at(280)), Slice::Below);
        assert_eq!(r1.slice(OWN, h.at(281)), Slice::Below);
    }

    #[test]
    fn vertical_slicing() {
        let r1 = r(100, 200, 250, 80, 241);
        let v = Orientation::Vertical;
        assert_eq!(r1.slice(OWN, v.at(99)), Slice::Above);
        assert_eq!(r1.slice(OWN, v.at(100)), Slice::Above);
        let (b, a) = split(&r1, v.at(101));
        check(&b, 100, 200, 1, 80, 241);
        check(&a, 101, 200, 249, 80, 241);
        let (b, a) = split(&r1, v.at(151));
        check(&b, 100, 200, 51, 80, 241);
        check(&a, 151, 200, 199, 80, 241);
        let (b, a) = split(&r1, v.at(349));
        check(&b, 100, 200, 249, 80, 241);
        check(&a, 349, 200, 1, 80, 241);
        assert_eq!(r1.slice(OWN, v.at(350)), Slice::Below);
        assert_eq!(r1.slice(OWN, v.at(351)), Slice::Below);
    }

    #[test]
    fn rev_vertical_slicing() {
        let r1 = r(160, 200, 210, 150, 2);
        let rv = Orientation::RevVertical;
        assert_eq!(r1.slice(OWN, rv.at(370)), Slice::Above);
        let (b, a) = split(&r1, rv.at(369));
        check(&b, 369, 200, 1, 150, 2);
        check(&a, 160, 200, 209, 150, 2);
        let (b, a) = split(&r1, rv.at(161));
        check(&b, 161, 200, 209, 150, 2);
        check(&a, 160, 200, 1, 150, 2);
        assert_eq!(r1.slice(OWN, rv.at(160)), Slice::Below);
    }

    #[test]
    fn rev_horizontal_slicing() {
        let r1 = r(160, 200, 210, 150, 2);
        let rh = Orientation::RevHorizontal;
        assert_eq!(r1.slice(OWN, rh.at(350)), Slice::Above);
        let (b, a) = split(&r1, rh.at(349));
        check(&b, 160, 349, 210, 1, 2);
        check(&a, 160, 200, 210, 149, 2);
        let (b, a) = split(&r1, rh.at(201));
        check(&b, 160, 201, 210, 149, 2);
        check(&a, 160, 200, 210, 1, 2);
        assert_eq!(r1.slice(OWN, rh.at(200)), Slice::Below);
    }

    #[test]
    fn slicing_a_slice_keeps_the_root() {
        let root = r(0, 0, 10, 10, 5);
        let (_, right) = split(&root, Orientation::Vertical.at(4));
        match right.slice(RectRef(42), Orientation::Horizontal.at(3)) {
            Slice::Split { below, above } => {
                assert_eq!(below.lineage(), Some(OWN));
                assert_eq!(above.lineage(), Some(OWN));
                assert_eq!(below.id(), RectId(5));
            }
            other => panic!("expected split, got {other:?}"),
        }
    }
}
