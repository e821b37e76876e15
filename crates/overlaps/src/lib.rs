//! Overlap decomposition of axis-aligned integer rectangles.
//!
//! Given a list of rectangles, find every group of two or more whose regions
//! share a common area, and the area itself. The engine cuts the plane
//! recursively along the rectangles' own edges (`partition`), cycling through
//! four orientations until each working set is trivial or covers one region.
//!
//! Module map
//! - `geometry`: points, rectangles, slicing and pairwise intersection.
//! - `orientation`: the four cut directions and the cut rule.
//! - `sorted`: comparator-keyed rectangle sets with range queries.
//! - `partition`: arena, intersection groups and the recursive engine.
//! - `layout`: seeded input generators.
//!
//! The library never logs or prints; callers read `PartitionTree::stats`.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod orientation;
pub mod partition;
pub mod sorted;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::OverlapError;
pub use geometry::{intersect, Coord, Point, RectId, RectRef, Rectangle};
pub use partition::{Intersection, IntersectionSet, PartitionTree};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::OverlapError;
    pub use crate::geometry::{intersect, Coord, Point, RectId, RectRef, Rectangle, Slice};
    pub use crate::layout::{generate, Layout, LayoutCfg};
    pub use crate::orientation::{Cut, Orientation};
    pub use crate::partition::{BuildStats, Intersection, IntersectionSet, PartitionTree};
    pub use crate::sorted::{SortOrder, SortedRects};
}
