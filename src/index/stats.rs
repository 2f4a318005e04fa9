use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::RouteIndex;
use crate::classify::RouteClass;

/// Estimated share of the route table each cheap filter stage removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FilterReduction {
    /// Mean % of routes excluded by the method lookup
    pub method_pct: f64,
    /// Mean % of routes excluded by the exact segment-count lookup
    pub segment_count_pct: f64,
}

/// Read-only diagnostic view of a [`RouteIndex`].
///
/// Intended for an admin or metrics endpoint, not for the request path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexStatistics {
    pub total_routes: usize,
    pub static_routes: usize,
    pub dynamic_routes: usize,
    pub wildcard_routes: usize,
    /// Distinct first-segment literals
    pub static_buckets: usize,
    /// Distinct (position, literal) pairs
    pub multi_level_entries: usize,
    pub trie_depth: usize,
    pub trie_nodes: usize,
    pub trie_routes: usize,
    /// Pattern length -> route count
    pub segment_count_buckets: BTreeMap<usize, usize>,
    /// HTTP method -> route count
    pub method_buckets: BTreeMap<String, usize>,
    pub estimated_reduction: FilterReduction,
}

impl IndexStatistics {
    pub(crate) fn collect(index: &RouteIndex) -> Self {
        let total = index.len();
        let count = |class: RouteClass| index.routes().iter().filter(|r| r.class == class).count();

        let segment_count_buckets: BTreeMap<usize, usize> = index.segment_count_buckets().collect();
        let method_buckets: BTreeMap<String, usize> = index
            .method_buckets()
            .map(|(m, n)| (m.as_str().to_string(), n))
            .collect();

        let estimated_reduction = FilterReduction {
            method_pct: mean_exclusion(total, method_buckets.values().copied()),
            segment_count_pct: mean_exclusion(total, segment_count_buckets.values().copied()),
        };

        Self {
            total_routes: total,
            static_routes: count(RouteClass::Static),
            dynamic_routes: count(RouteClass::Dynamic),
            wildcard_routes: count(RouteClass::Wildcard),
            static_buckets: index.static_bucket_count(),
            multi_level_entries: index.multi_level_entry_count(),
            trie_depth: index.trie().depth(),
            trie_nodes: index.trie().node_count(),
            trie_routes: index.trie().len(),
            segment_count_buckets,
            method_buckets,
            estimated_reduction,
        }
    }

    /// JSON form for admin endpoints.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn mean_exclusion<I>(total: usize, bucket_sizes: I) -> f64
where
    I: Iterator<Item = usize>,
{
    if total == 0 {
        return 0.0;
    }
    let (sum, buckets) = bucket_sizes.fold((0.0, 0usize), |(sum, n), size| {
        (sum + (1.0 - size as f64 / total as f64) * 100.0, n + 1)
    });
    if buckets == 0 {
        0.0
    } else {
        sum / buckets as f64
    }
}
