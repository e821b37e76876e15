//! Recursive construction: split points, space slicing and the engine loop.

use std::time::{Duration, Instant};

use super::arena::RectArena;
use super::intersection::{Intersection, IntersectionSet};
use crate::error::OverlapError;
use crate::geometry::{Coord, RectRef, Rectangle, Slice};
use crate::orientation::{Cut, Orientation};
use crate::sorted::{RectLookup, SortedRects};

/// Result of cutting a sorted set at one value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpaceSlice {
    pub below: SortedRects,
    pub above: SortedRects,
    /// Slices pushed into the arena by this cut, in creation order.
    pub created: Vec<RectRef>,
}

/// Cut every rectangle of `set` at `cut`.
///
/// `set` must be keyed by `cut.orientation.sort_order()`. Only the prefix
/// ordered before the cut value can straddle it; the suffix is carried over to
/// the above side untouched. Both outputs keep the input's order.
pub fn space_slice(cut: Cut, set: &SortedRects, arena: &mut RectArena) -> Result<SpaceSlice, OverlapError> {
    let expected = cut.orientation.sort_order();
    if set.order() != expected {
        return Err(OverlapError::InvalidOrdering {
            expected,
            found: set.order(),
        });
    }
    let (prefix, suffix) = set.as_slice().split_at(set.lower_bound(cut.value, &*arena));

    let mut below = Vec::with_capacity(prefix.len());
    let mut above = Vec::with_capacity(prefix.len());
    let mut created = Vec::new();
    for &r in prefix {
        let piece = arena.get(r).slice(r, cut);
        match piece {
            Slice::Below => below.push(r),
            Slice::Above => above.push(r),
            Slice::Split {
                below: low,
                above: high,
            } => {
                let low = arena.push(low);
                let high = arena.push(high);
                created.extend([low, high]);
                below.push(low);
                above.push(high);
            }
        }
    }

    let below = SortedRects::from_refs(expected, below, &*arena);
    let mut above_set = SortedRects::from_refs(expected, suffix.iter().copied(), &*arena);
    above_set.extend(above, &*arena);
    Ok(SpaceSlice {
        below,
        above: above_set,
        created,
    })
}

/// Value at which `orientation` cuts `set`: the reference coordinate of the
/// first element at or past the midpoint of the set's reference range, or the
/// midpoint itself when no element reaches it.
pub fn split_point<L>(orientation: Orientation, set: &SortedRects, store: &L) -> Result<Coord, OverlapError>
where
    L: RectLookup + ?Sized,
{
    let expected = orientation.sort_order();
    if set.order() != expected {
        return Err(OverlapError::InvalidOrdering {
            expected,
            found: set.order(),
        });
    }
    let (Some(first), Some(last)) = (set.first(), set.last()) else {
        return Err(OverlapError::Invariant {
            reason: "split point of an empty set",
        });
    };
    let mid = orientation.midpoint(
        orientation.reference(store.rect(first)),
        orientation.reference(store.rect(last)),
    );
    let split = set
        .as_slice()
        .get(set.lower_bound(mid, store))
        .map_or(mid, |&r| orientation.reference(store.rect(r)));
    Ok(split)
}

/// Every element has the first element's origin and extent.
pub fn is_homogeneous<L>(set: &SortedRects, store: &L) -> bool
where
    L: RectLookup + ?Sized,
{
    let Some(first) = set.first() else {
        return true;
    };
    let head = store.rect(first);
    set.iter().all(|r| store.rect(r).same_region(head))
}

/// Counters gathered while building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Calls into the recursive partition step.
    pub calls: usize,
    /// Deepest recursion level reached (the initial call is level 0).
    pub max_depth: usize,
    /// Input rectangles.
    pub inputs: usize,
    /// Slices created by cuts over the whole run.
    pub slices: usize,
    /// Most arena slots held at once, inputs included.
    pub peak_arena: usize,
    /// Groups recorded.
    pub groups: usize,
    pub elapsed: Duration,
}

/// All groups of input rectangles sharing a region.
///
/// Construction runs the whole decomposition; a finished tree is immutable.
#[derive(Clone, Debug)]
pub struct PartitionTree {
    arena: RectArena,
    intersections: IntersectionSet,
    stats: BuildStats,
}

impl PartitionTree {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Decompose `rects`. With `timeout = None` the run is unbounded; with
    /// `Some(limit)` it fails with `Timeout` once `limit` has elapsed.
    pub fn new(rects: Vec<Rectangle>, timeout: Option<Duration>) -> Result<Self, OverlapError> {
        let arena = RectArena::with_roots(rects);
        let mut run = Run {
            peak_arena: arena.len(),
            arena,
            found: IntersectionSet::new(),
            start: Instant::now(),
            timeout,
            calls: 0,
            max_depth: 0,
            slices: 0,
        };
        let orientation = Orientation::Vertical;
        let initial = SortedRects::from_refs(orientation.sort_order(), run.arena.root_refs(), &run.arena);
        run.partition(orientation, initial, 0)?;

        let stats = BuildStats {
            calls: run.calls,
            max_depth: run.max_depth,
            inputs: run.arena.roots().len(),
            slices: run.slices,
            peak_arena: run.peak_arena,
            groups: run.found.len(),
            elapsed: run.start.elapsed(),
        };
        Ok(Self {
            arena: run.arena,
            intersections: run.found,
            stats,
        })
    }

    #[inline]
    pub fn intersections(&self) -> &IntersectionSet {
        &self.intersections
    }

    /// Input rectangles in input order.
    #[inline]
    pub fn rectangles(&self) -> &[Rectangle] {
        self.arena.roots()
    }

    /// Arena of the finished run; every slice has been released, so only the
    /// inputs remain.
    #[inline]
    pub fn arena(&self) -> &RectArena {
        &self.arena
    }

    #[inline]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

/// Mutable state of one construction.
struct Run {
    arena: RectArena,
    found: IntersectionSet,
    start: Instant,
    timeout: Option<Duration>,
    calls: usize,
    max_depth: usize,
    slices: usize,
    peak_arena: usize,
}

impl Run {
    /// One partition step. Slices made by this step or below it are only
    /// referenced from this subtree, so they are released on return.
    fn partition(&mut self, orientation: Orientation, set: SortedRects, depth: usize) -> Result<(), OverlapError> {
        let mark = self.arena.len();
        let outcome = self.step(orientation, set, depth);
        self.arena.truncate_slices(mark);
        outcome
    }

    fn step(&mut self, orientation: Orientation, set: SortedRects, depth: usize) -> Result<(), OverlapError> {
        self.check_deadline()?;
        self.calls += 1;
        self.max_depth = self.max_depth.max(depth);
        if set.len() < 2 || self.already_recorded(&set) {
            return Ok(());
        }

        let value = split_point(orientation, &set, &self.arena)?;
        let SpaceSlice { below, above, created } = space_slice(orientation.at(value), &set, &mut self.arena)?;
        self.slices += created.len();
        self.peak_arena = self.peak_arena.max(self.arena.len());
        if above.is_empty() {
            return Err(OverlapError::Invariant {
                reason: "split left the above partition empty",
            });
        }

        if below.is_empty() {
            // Nothing was cut along this axis.
            if is_homogeneous(&above, &self.arena) {
                return self.record(&above);
            }
            let next = orientation.next();
            let resorted = above.resorted(next.sort_order(), &self.arena);
            return self.partition(next, resorted, depth + 1);
        }
        self.partition(orientation, below, depth + 1)?;
        self.partition(orientation, above, depth + 1)
    }

    fn check_deadline(&self) -> Result<(), OverlapError> {
        let Some(limit) = self.timeout else {
            return Ok(());
        };
        let elapsed = self.start.elapsed();
        if elapsed > limit {
            return Err(OverlapError::Timeout { limit, elapsed });
        }
        Ok(())
    }

    /// Input rectangles behind `set`, one per handle.
    fn roots_of<'a>(&'a self, set: &'a SortedRects) -> impl Iterator<Item = &'a Rectangle> + 'a {
        set.iter().map(move |r| self.arena.root(r))
    }

    /// The distinct inputs behind `set` already form a recorded group.
    fn already_recorded(&self, set: &SortedRects) -> bool {
        Intersection::new(self.roots_of(set)).map_or(false, |group| self.found.contains(&group))
    }

    fn record(&mut self, set: &SortedRects) -> Result<(), OverlapError> {
        if set.len() < 2 {
            return Ok(());
        }
        let group = Intersection::new(self.roots_of(set))?;
        self.found.insert(group);
        Ok(())
    }
}
