//! Error taxonomy shared by geometry, sorting and the partitioning engine.
//!
//! Every variant aborts the whole construction of a `PartitionTree`; there is
//! no partial result. `Invariant` marks internal defects and is kept apart from
//! the input-facing variants so callers can report it differently.

use std::fmt;
use std::time::Duration;

use crate::sorted::SortOrder;

/// Errors surfaced by the overlap engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlapError {
    /// A rectangle with a non-positive width or height.
    InvalidGeometry { width: i64, height: i64 },
    /// A sorted set was split under a comparator it was not built with.
    InvalidOrdering { expected: SortOrder, found: SortOrder },
    /// An intersection group with fewer than two distinct identities.
    InvalidIntersection { distinct: usize },
    /// The configured deadline elapsed during partitioning.
    Timeout { limit: Duration, elapsed: Duration },
    /// An internal invariant does not hold (a defect, not bad input).
    Invariant { reason: &'static str },
}

impl OverlapError {
    /// True for errors caused by the input or the caller's configuration.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Invariant { .. } | Self::InvalidOrdering { .. })
    }
}

impl fmt::Display for OverlapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { width, height } => {
                write!(f, "invalid height or width (w={width}, h={height})")
            }
            Self::InvalidOrdering { expected, found } => write!(
                f,
                "invalid sorting of rectangles: expected {expected:?}, found {found:?}"
            ),
            Self::InvalidIntersection { distinct } => write!(
                f,
                "intersection must be at least between two rectangles (got {distinct})"
            ),
            Self::Timeout { limit, elapsed } => write!(
                f,
                "calculation timed out after {:.3}s (limit {:.3}s)",
                elapsed.as_secs_f64(),
                limit.as_secs_f64()
            ),
            Self::Invariant { reason } => write!(f, "internal invariant violated: {reason}"),
        }
    }
}

impl std::error::Error for OverlapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_and_ordering_are_not_user_facing() {
        assert!(!OverlapError::Invariant { reason: "x" }.is_user_facing());
        assert!(!OverlapError::InvalidOrdering {
            expected: SortOrder::Horizontal,
            found: SortOrder::Vertical,
        }
        .is_user_facing());
        assert!(OverlapError::InvalidGeometry {
            width: 0,
            height: 1
        }
        .is_user_facing());
        assert!(OverlapError::Timeout {
            limit: Duration::from_secs(1),
            elapsed: Duration::from_secs(2),
        }
        .is_user_facing());
    }

    #[test]
    fn display_mentions_extent() {
        let e = OverlapError::InvalidGeometry {
            width: -3,
            height: 4,
        };
        assert_eq!(e.to_string(), "invalid height or width (w=-3, h=4)");
    }
}
