//! Partition tree: find every group of input rectangles that share a region.
//!
//! Purpose
//! - Cut the plane recursively at split points chosen from the rectangles'
//!   own edges, alternating through the four orientations, until every working
//!   set is either trivial (fewer than two members) or homogeneous (all members
//!   cover the same region). Homogeneous sets are the intersection groups.
//!
//! Why this design
//! - Slices live in a stack-like arena (`RectArena`) and name their input
//!   rectangle by index, so working sets are plain vectors of handles and a
//!   finished tree has no self-references. Each recursive step truncates the
//!   arena back to its entry length, which keeps memory proportional to the
//!   slices alive on the current path rather than to all slices ever made.
//! - The orientation is passed explicitly on every recursive call and checked
//!   against the set's comparator, which turns an ordering mix-up into an
//!   `InvalidOrdering` error instead of a wrong answer.
//!
//! Invariants
//! - A split never leaves the above side empty (the split value is the
//!   reference of an element of the set, or the range midpoint if none reaches
//!   it).
//! - Recorded groups name input rectangles only and have at least two
//!   distinct ids.
//! - Construction either completes or fails as a whole (`Timeout` included).
//! - Groups hold copies of input rectangles, never slice handles; a finished
//!   arena holds the inputs only.
//!
//! Code cross-refs: `orientation::{Orientation, Cut}`, `sorted::SortedRects`,
//! `geometry::{Rectangle::slice, intersect}`.
//!
//! Module layout: `arena.rs` (slot storage), `intersection.rs` (groups and the
//! result set), `build.rs` (split point, space slicing, recursion).

mod arena;
mod build;
mod intersection;

pub use arena::RectArena;
pub use build::{is_homogeneous, space_slice, split_point, BuildStats, PartitionTree, SpaceSlice};
pub use intersection::{Intersection, IntersectionSet};
