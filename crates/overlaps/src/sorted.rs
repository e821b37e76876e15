//! Ordered rectangle collection keyed by a runtime-selected comparator.
//!
//! Purpose
//! - Hold non-owning handles (`RectRef`) to rectangles of an arena in the
//!   total order of one of four comparators, and answer range queries on the
//!   comparator's primary reference coordinate.
//!
//! Invariants
//! - `items` is strictly increasing under `order.compare` (no two handles
//!   compare equal; adding an equal rectangle is a no-op, set semantics).
//! - Forward orders ascend by origin; reverse orders descend by far edge.

use std::cmp::Ordering;

use crate::geometry::{Coord, RectRef, Rectangle};

/// Resolves arena handles to rectangles.
pub trait RectLookup {
    fn rect(&self, r: RectRef) -> &Rectangle;
}

impl RectLookup for [Rectangle] {
    #[inline]
    fn rect(&self, r: RectRef) -> &Rectangle {
        &self[r.0]
    }
}

impl RectLookup for Vec<Rectangle> {
    #[inline]
    fn rect(&self, r: RectRef) -> &Rectangle {
        &self[r.0]
    }
}

/// The four comparators. Ties fall through to extents and finally the id, so
/// the order is total and iteration is reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending `(x, y, width, height, id)`.
    Horizontal,
    /// Ascending `(y, x, height, width, id)`.
    Vertical,
    /// Descending `(x_end, y_end, width, height, id)`.
    RevHorizontal,
    /// Descending `(y_end, x_end, height, width, id)`.
    RevVertical,
}

impl SortOrder {
    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RevHorizontal | Self::RevVertical)
    }

    /// Primary key of the order.
    #[inline]
    pub fn reference(self, r: &Rectangle) -> Coord {
        match self {
            Self::Horizontal => r.origin().x,
            Self::Vertical => r.origin().y,
            Self::RevHorizontal => r.x_end(),
            Self::RevVertical => r.y_end(),
        }
    }

    /// Total order over rectangles.
    pub fn compare(self, a: &Rectangle, b: &Rectangle) -> Ordering {
        let key = |r: &Rectangle| match self {
            Self::Horizontal => (r.origin().x, r.origin().y, r.width(), r.height(), r.id()),
            Self::Vertical => (r.origin().y, r.origin().x, r.height(), r.width(), r.id()),
            Self::RevHorizontal => (r.x_end(), r.y_end(), r.width(), r.height(), r.id()),
            Self::RevVertical => (r.y_end(), r.x_end(), r.height(), r.width(), r.id()),
        };
        if self.is_reverse() {
            key(b).cmp(&key(a))
        } else {
            key(a).cmp(&key(b))
        }
    }

    /// `r` is ordered strictly before the scalar `v`.
    #[inline]
    pub fn precedes(self, r: &Rectangle, v: Coord) -> bool {
        let c = self.reference(r);
        if self.is_reverse() {
            c > v
        } else {
            c < v
        }
    }

    /// The scalar `v` is ordered strictly before `r`.
    #[inline]
    pub fn follows(self, r: &Rectangle, v: Coord) -> bool {
        let c = self.reference(r);
        if self.is_reverse() {
            c < v
        } else {
            c > v
        }
    }
}

/// Handles sorted by one `SortOrder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortedRects {
    order: SortOrder,
    items: Vec<RectRef>,
}

impl SortedRects {
    #[inline]
    pub fn new(order: SortOrder) -> Self {
        Self {
            order,
            items: Vec::new(),
        }
    }

    /// Sort `refs` under `order`, dropping handles that compare equal.
    pub fn from_refs<L, I>(order: SortOrder, refs: I, store: &L) -> Self
    where
        L: RectLookup + ?Sized,
        I: IntoIterator<Item = RectRef>,
    {
        let mut out = Self {
            order,
            items: refs.into_iter().collect(),
        };
        out.normalize(store);
        out
    }

    /// Same handles under another order.
    pub fn resorted<L: RectLookup + ?Sized>(&self, order: SortOrder, store: &L) -> Self {
        Self::from_refs(order, self.items.iter().copied(), store)
    }

    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    #[inline]
    pub fn first(&self) -> Option<RectRef> {
        self.items.first().copied()
    }
    #[inline]
    pub fn last(&self) -> Option<RectRef> {
        self.items.last().copied()
    }
    #[inline]
    pub fn as_slice(&self) -> &[RectRef] {
        &self.items
    }
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = RectRef> + '_ {
        self.items.iter().copied()
    }

    /// Position of the first handle not ordered before `v`.
    pub fn lower_bound<L: RectLookup + ?Sized>(&self, v: Coord, store: &L) -> usize {
        self.items
            .partition_point(|&r| self.order.precedes(store.rect(r), v))
    }

    /// Position of the first handle ordered after `v`.
    pub fn upper_bound<L: RectLookup + ?Sized>(&self, v: Coord, store: &L) -> usize {
        self.items
            .partition_point(|&r| !self.order.follows(store.rect(r), v))
    }

    /// Insert keeping the order; returns false if an equal handle exists.
    #[cfg(test)]
    pub(crate) fn insert<L: RectLookup + ?Sized>(&mut self, r: RectRef, store: &L) -> bool {
        let order = self.order;
        let key = store.rect(r);
        match self
            .items
            .binary_search_by(|&probe| order.compare(store.rect(probe), key))
        {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, r);
                true
            }
        }
    }

    /// Append many handles and restore the invariant once.
    pub fn extend<L, I>(&mut self, refs: I, store: &L)
    where
        L: RectLookup + ?Sized,
        I: IntoIterator<Item = RectRef>,
    {
        self.items.extend(refs);
        self.normalize(store);
    }

    fn normalize<L: RectLookup + ?Sized>(&mut self, store: &L) {
        let order = self.order;
        self.items
            .sort_by(|&a, &b| order.compare(store.rect(a), store.rect(b)));
        self.items
            .dedup_by(|a, b| order.compare(store.rect(*a), store.rect(*b)) == Ordering::Equal);
    }
}
