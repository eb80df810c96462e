use serde::{Deserialize, Serialize};

/// Aggregate counts describing how well the two datasets joined.
///
/// Returned by [`ChoroplethMap::stats`](crate::ChoroplethMap::stats).
/// `buckets[k]` counts the regions painted with the `k`-th color of the
/// scale, unmatched regions included (they land in bucket 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    pub regions: usize,
    pub records: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub buckets: Vec<usize>,
}
