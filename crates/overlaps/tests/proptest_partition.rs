//! Property-based invariant tests for the partition tree.
//!
//! 1. Determinism: the same input always yields the same groups and regions.
//! 2. Input order does not change the groups.
//! 3. Coverage: every overlapping pair shares at least one group.
//! 4. No false positives: every group has a common region inside each member.
//! 5. Groups are strictly ordered by (size, ids) with no repeated id.
//! 6. Pairwise intersection is symmetric.
//! 7. Every slice resolves to the input rectangle it was cut from.
//! 8. A finished run holds only its inputs; the peak arena never exceeds
//!    inputs plus slices created.

use overlaps::partition::{space_slice, RectArena};
use overlaps::prelude::*;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn layout(max_len: usize) -> impl Strategy<Value = Vec<Rectangle>> {
    proptest::collection::vec((0i64..24, 0i64..24, 1i64..10, 1i64..10), 0..=max_len).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(k, (x, y, w, h))| Rectangle::from_xywh(x, y, w, h, k + 1).expect("positive extent"))
            .collect()
    })
}

fn rect() -> impl Strategy<Value = Rectangle> {
    (-20i64..20, -20i64..20, 1i64..15, 1i64..15)
        .prop_map(|(x, y, w, h)| Rectangle::from_xywh(x, y, w, h, 1).expect("positive extent"))
}

fn build(rects: Vec<Rectangle>) -> PartitionTree {
    PartitionTree::new(rects, None).expect("unbounded run succeeds")
}

fn groups(tree: &PartitionTree) -> Vec<(Vec<usize>, Rectangle)> {
    tree.intersections()
        .iter()
        .map(|g| {
            let ids = g.ids().map(|id| id.0).collect();
            (ids, g.calculate().expect("common region"))
        })
        .collect()
}

fn contains(outer: &Rectangle, inner: &Rectangle) -> bool {
    outer.origin().x <= inner.origin().x
        && outer.origin().y <= inner.origin().y
        && inner.x_end() <= outer.x_end()
        && inner.y_end() <= outer.y_end()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn runs_are_deterministic(rects in layout(12)) {
        let a = groups(&build(rects.clone()));
        let b = groups(&build(rects));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn input_order_is_irrelevant(rects in layout(12)) {
        let mut reversed = rects.clone();
        reversed.reverse();
        let a = build(rects);
        let b = build(reversed);
        prop_assert_eq!(a.intersections(), b.intersections());
    }

    #[test]
    fn every_overlapping_pair_is_grouped(rects in layout(12)) {
        let tree = build(rects.clone());
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                if intersect(a, Some(b)).is_none() {
                    continue;
                }
                let together = tree.intersections().iter().any(|g| {
                    let ids: Vec<RectId> = g.ids().collect();
                    ids.contains(&a.id()) && ids.contains(&b.id())
                });
                prop_assert!(together, "{} and {} overlap but share no group", a, b);
            }
        }
    }

    #[test]
    fn groups_have_a_common_region(rects in layout(12)) {
        let tree = build(rects.clone());
        for g in tree.intersections() {
            let region = g.calculate();
            prop_assert!(region.is_ok(), "group {:?} has no common region", g.ids().collect::<Vec<_>>());
            let region = region.unwrap();
            for m in g.constituents() {
                prop_assert!(m.is_root());
                prop_assert_eq!(m, &rects[m.id().0 - 1]);
                prop_assert!(contains(m, &region));
            }
        }
    }

    #[test]
    fn groups_are_strictly_ordered(rects in layout(12)) {
        let tree = build(rects);
        let all: Vec<Vec<RectId>> = tree.intersections().iter().map(|g| g.ids().collect()).collect();
        for ids in &all {
            prop_assert!(ids.len() >= 2);
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
        for pair in all.windows(2) {
            let key = |ids: &Vec<RectId>| (ids.len(), ids.clone());
            prop_assert!(key(&pair[0]) < key(&pair[1]));
        }
    }

    #[test]
    fn intersect_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(intersect(&a, Some(&b)), intersect(&b, Some(&a)));
    }

    #[test]
    fn slices_resolve_to_inputs(rects in layout(12), value in 0i64..34) {
        let mut arena = RectArena::with_roots(rects);
        for orientation in Orientation::ALL {
            let set = SortedRects::from_refs(orientation.sort_order(), arena.root_refs(), &arena);
            let out = space_slice(orientation.at(value), &set, &mut arena).expect("set keyed by the cut");
            for h in out.below.iter().chain(out.above.iter()) {
                let root = arena.root(h);
                prop_assert!(root.is_root());
                prop_assert_eq!(root.id(), arena.get(h).id());
                prop_assert!(contains(root, arena.get(h)));
            }
        }
    }

    #[test]
    fn finished_runs_release_every_slice(rects in layout(12)) {
        let inputs = rects.len();
        let tree = build(rects);
        let stats = tree.stats();
        prop_assert_eq!(tree.arena().len(), inputs);
        prop_assert!(stats.peak_arena >= inputs);
        prop_assert!(stats.peak_arena <= inputs + stats.slices);
    }
}
