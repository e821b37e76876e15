//! Seeded input layouts for tests, benchmarks and the CLI.
//!
//! Every generator numbers its rectangles `1..=count` in output order, the way
//! the input reader does, so a generated layout can be written to disk and
//! read back unchanged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{Coord, RectId, Rectangle};

/// Largest coordinate handed out; keeps every far edge representable.
const COORD_LIMIT: Coord = Coord::MAX / 4;

/// Layout families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Uniform origins and sides.
    Random,
    /// Strictly nested squares sharing a center.
    Concentric,
    /// Copies of one square.
    Identical,
    /// Squares on a lattice, each overlapping its right and lower neighbors.
    Grid,
}

/// Parameters of a generated layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutCfg {
    pub count: usize,
    /// Random origins are drawn from `[0, span)` on both axes.
    pub span: Coord,
    /// Side length cap; random sides are drawn from `[1, max_side]`.
    pub max_side: Coord,
    /// Only `Layout::Random` consumes the seed.
    pub seed: u64,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            count: 100,
            span: 1000,
            max_side: 200,
            seed: 0,
        }
    }
}

/// Draw a layout of the given family.
pub fn generate(layout: Layout, cfg: &LayoutCfg) -> Vec<Rectangle> {
    let side = cfg.max_side.clamp(1, COORD_LIMIT);
    match layout {
        Layout::Random => random_layout(cfg),
        Layout::Concentric => concentric(cfg.count),
        Layout::Identical => match Rectangle::from_xywh(0, 0, side, side, 1) {
            Ok(template) => identical(cfg.count, template),
            Err(_) => Vec::new(),
        },
        Layout::Grid => grid(cfg.count, side, (side * 2 / 3).max(1)),
    }
}

/// Uniformly placed rectangles; reproducible for a fixed `cfg`.
pub fn random_layout(cfg: &LayoutCfg) -> Vec<Rectangle> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let span = cfg.span.clamp(1, COORD_LIMIT);
    let max_side = cfg.max_side.clamp(1, COORD_LIMIT);
    (1..=cfg.count)
        .filter_map(|id| {
            let x = rng.gen_range(0..span);
            let y = rng.gen_range(0..span);
            let w = rng.gen_range(1..=max_side);
            let h = rng.gen_range(1..=max_side);
            Rectangle::from_xywh(x, y, w, h, id).ok()
        })
        .collect()
}

/// `count` nested squares: id `k` sits at `(k-1, k-1)` with side
/// `2 * (count - k) + 1`, so every square strictly contains the next one.
pub fn concentric(count: usize) -> Vec<Rectangle> {
    let n = count as Coord;
    (1..=count)
        .filter_map(|id| {
            let k = id as Coord;
            let side = 2 * (n - k) + 1;
            Rectangle::from_xywh(k - 1, k - 1, side, side, id).ok()
        })
        .collect()
}

/// `count` copies of `template`'s region with ids `1..=count`.
pub fn identical(count: usize, template: Rectangle) -> Vec<Rectangle> {
    (1..=count).map(|id| template.with_id(RectId(id))).collect()
}

/// Squares of side `side` on a square lattice with pitch `step`, filled row by
/// row. Neighbors overlap whenever `step < side`.
pub fn grid(count: usize, side: Coord, step: Coord) -> Vec<Rectangle> {
    let cols = (count as f64).sqrt().ceil().max(1.0) as usize;
    (1..=count)
        .filter_map(|id| {
            let i = id - 1;
            let (col, row) = ((i % cols) as Coord, (i / cols) as Coord);
            Rectangle::from_xywh(col * step, row * step, side, side, id).ok()
        })
        .collect()
}
