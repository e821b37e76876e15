//! Stack-like rectangle storage for one run.

use crate::geometry::{RectRef, Rectangle};
use crate::sorted::RectLookup;

/// Owns every rectangle of a run. Input rectangles occupy the first
/// `root_count` slots and are never removed; slices are appended after them
/// and released in LIFO order with `truncate_slices`. A slice handle stays
/// valid until the arena is truncated below it.
#[derive(Clone, Debug, Default)]
pub struct RectArena {
    rects: Vec<Rectangle>,
    root_count: usize,
}

impl RectArena {
    /// Arena seeded with input rectangles. Any lineage they carry is dropped:
    /// inputs are roots of this run by definition.
    pub fn with_roots(inputs: Vec<Rectangle>) -> Self {
        let rects: Vec<Rectangle> = inputs.into_iter().map(Rectangle::into_root).collect();
        let root_count = rects.len();
        Self { rects, root_count }
    }

    /// Append a slice and return its handle.
    #[inline]
    pub fn push(&mut self, r: Rectangle) -> RectRef {
        debug_assert!(
            r.lineage().map_or(true, |root| root.0 < self.root_count),
            "slice lineage must name an input slot"
        );
        self.rects.push(r);
        RectRef(self.rects.len() - 1)
    }

    #[inline]
    pub fn get(&self, r: RectRef) -> &Rectangle {
        &self.rects[r.0]
    }

    /// Input rectangle that `r` was sliced from (itself for inputs).
    #[inline]
    pub fn root(&self, r: RectRef) -> &Rectangle {
        let own = self.get(r);
        self.get(own.root_ref(r))
    }

    #[inline]
    pub fn roots(&self) -> &[Rectangle] {
        &self.rects[..self.root_count]
    }

    pub fn root_refs(&self) -> impl Iterator<Item = RectRef> {
        (0..self.root_count).map(RectRef)
    }

    /// Total slots, inputs included.
    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Slices currently held.
    #[inline]
    pub fn slice_count(&self) -> usize {
        self.rects.len() - self.root_count
    }

    /// Drop every slice at or past `mark`. Inputs are kept whatever `mark` is.
    #[inline]
    pub fn truncate_slices(&mut self, mark: usize) {
        self.rects.truncate(mark.max(self.root_count));
    }
}

impl RectLookup for RectArena {
    #[inline]
    fn rect(&self, r: RectRef) -> &Rectangle {
        self.get(r)
    }
}
