//! Intersection groups and their ordered collection.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::error::OverlapError;
use crate::geometry::{intersect, RectId, Rectangle};

/// A set of at least two input rectangles that share a common region.
///
/// Invariants
/// - Members are root rectangles, sorted by id with no id repeated.
/// - Equality and ordering look only at the ids: fewer members first, then
///   lexicographic by id.
#[derive(Clone, Debug)]
pub struct Intersection {
    members: Vec<Rectangle>,
}

impl Intersection {
    /// Group from any rectangles; repeated ids keep their first occurrence.
    /// Fails with `InvalidIntersection` if fewer than two distinct ids remain.
    pub fn new<I>(rects: I) -> Result<Self, OverlapError>
    where
        I: IntoIterator,
        I::Item: Borrow<Rectangle>,
    {
        let mut members: Vec<Rectangle> = rects.into_iter().map(|r| *r.borrow()).collect();
        members.sort_by_key(|r| r.id());
        members.dedup_by_key(|r| r.id());
        if members.len() < 2 {
            return Err(OverlapError::InvalidIntersection {
                distinct: members.len(),
            });
        }
        Ok(Self { members })
    }

    /// Members ordered by id.
    #[inline]
    pub fn constituents(&self) -> &[Rectangle] {
        &self.members
    }

    pub fn ids(&self) -> impl Iterator<Item = RectId> + '_ {
        self.members.iter().map(|r| r.id())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a group has at least two members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Shared region of all members, labelled `RectId::UNASSIGNED`.
    ///
    /// Recomputed on every call. Members without a common region are an
    /// internal defect and yield `Invariant`.
    pub fn calculate(&self) -> Result<Rectangle, OverlapError> {
        let (first, rest) = self.members.split_first().ok_or(OverlapError::Invariant {
            reason: "intersection group without members",
        })?;
        rest.iter()
            .fold(Some(*first), |acc, r| intersect(r, acc.as_ref()))
            .ok_or(OverlapError::Invariant {
                reason: "intersection group members share no region",
            })
    }
}

impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Intersection {}

impl PartialOrd for Intersection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Intersection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.ids().cmp(other.ids()))
    }
}

/// Ordered, duplicate-free collection of groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntersectionSet {
    groups: BTreeSet<Intersection>,
}

impl IntersectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if a group with the same ids is already present.
    pub fn insert(&mut self, group: Intersection) -> bool {
        self.groups.insert(group)
    }

    pub fn contains(&self, group: &Intersection) -> bool {
        self.groups.contains(group)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersection> + '_ {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a IntersectionSet {
    type Item = &'a Intersection;
    type IntoIter = std::collections::btree_set::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl FromIterator<Intersection> for IntersectionSet {
    fn from_iter<T: IntoIterator<Item = Intersection>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
