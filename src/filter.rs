//! Candidate pre-filtering
//!
//! Narrows the route table to the handful of routes worth running the full
//! segment matcher against. Four cheap stages:
//!
//! 1. **Method** - `http_methods[method]`; nothing there means no candidates
//! 2. **Segment count** - routes with exactly as many segments as the URL,
//!    plus shorter routes that carry a variable-length segment
//! 3. **Multi-level static** - every URL position holding a literal some
//!    reachable route expects there votes for those routes; the routes with
//!    the most votes survive
//! 4. **Trie** - fully static routes whose path equals the URL are added
//!    back, so exact static routes never fall to the approximate stages
//!
//! Stages 1 and 2 are expressed as a per-route predicate
//! ([`IndexedRoute::fits_depth`] plus `accepts`), so a request only touches
//! the buckets it actually reads. Membership and deduplication work on
//! ordinals and key ids, never on the string keys.
//!
//! With no disagreement between positions the vote is the intersection of
//! every position's bucket. When positions disagree (two routes each
//! expecting a literal the other leaves variable) the tied routes all stay,
//! so stage 3 never empties a non-empty candidate set on its own.

use http::Method;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::index::{IndexedRoute, RouteIndex, RouteRef};
use crate::route::Segment;

/// URL split into components. Inline for paths up to 8 components deep.
pub type UrlSegments<'a> = SmallVec<[&'a str; 8]>;

/// Split a request path into components.
///
/// Any query string is ignored and empty components are dropped, so `/`,
/// `/users/` and `/users?x=1` split to `[]`, `["users"]` and `["users"]`.
#[must_use]
pub fn split_path(path: &str) -> UrlSegments<'_> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Candidate routes for a request, ordered by descending priority with
/// equal priorities in registration order.
#[must_use]
pub fn filtered_candidates(
    url_segments: &[&str],
    method: &Method,
    index: &RouteIndex,
) -> Vec<RouteRef> {
    // Stage 1: method
    let by_method = index.method_bucket(method);
    if by_method.is_empty() {
        debug!(method = %method, "No routes registered for method");
        return Vec::new();
    }

    // Stage 2: segment count, rescuing shorter variable-length routes
    let depth = url_segments.len();
    let reachable = |r: &IndexedRoute| r.route.accepts(method) && r.fits_depth(depth);

    // Stage 3: literal votes, falling back to stage 2 alone without any
    let mut candidates = match literal_votes(url_segments, index, &reachable) {
        Some(voted) => voted,
        None => by_length(depth, method, index),
    };

    // Stage 4: exact static lookup
    candidates.extend(
        index
            .trie()
            .lookup(url_segments)
            .iter()
            .filter(|r| r.route.accepts(method))
            .map(Arc::clone),
    );

    candidates.sort_by(|a, b| {
        b.route
            .priority
            .cmp(&a.route.priority)
            .then(a.ordinal.cmp(&b.ordinal))
    });
    let mut seen: HashSet<usize> = HashSet::with_capacity(candidates.len());
    candidates.retain(|r| seen.insert(r.key_id));

    debug!(
        method = %method,
        depth,
        method_routes = by_method.len(),
        candidates = candidates.len(),
        "Candidate filtering complete"
    );

    candidates
}

/// Every reachable route of the right length, read from whichever of the
/// method and segment-count buckets is smaller.
fn by_length(depth: usize, method: &Method, index: &RouteIndex) -> Vec<RouteRef> {
    let by_method = index.method_bucket(method);
    let exact = index.segment_count_bucket(depth);

    let mut candidates: Vec<RouteRef> = if by_method.len() < exact.len() {
        by_method
            .iter()
            .filter(|r| r.route.pattern.len() == depth)
            .map(Arc::clone)
            .collect()
    } else {
        exact
            .iter()
            .filter(|r| r.route.accepts(method))
            .map(Arc::clone)
            .collect()
    };
    for (_, bucket) in index.shorter_variable_length(depth) {
        candidates.extend(
            bucket
                .iter()
                .filter(|r| r.route.accepts(method))
                .map(Arc::clone),
        );
    }
    candidates
}

/// Number of URL positions where `route` expects exactly the literal found
/// there. Equals the number of multi-level buckets for this URL that hold it.
fn literal_hits(route: &IndexedRoute, url_segments: &[&str]) -> usize {
    route
        .route
        .pattern
        .iter()
        .zip(url_segments)
        .filter(|(segment, component)| {
            matches!(segment, Segment::Static { original } if &**original == **component)
        })
        .count()
}

/// Reachable routes with the most literal hits, or `None` when no reachable
/// route expects any of the URL's literals.
///
/// The smallest non-empty position bucket is tried first: if one of its
/// reachable routes hits every position that has a bucket at all, no route
/// outside that bucket can tie it and the rest of the index is never read.
fn literal_votes<F>(
    url_segments: &[&str],
    index: &RouteIndex,
    reachable: &F,
) -> Option<Vec<RouteRef>>
where
    F: Fn(&IndexedRoute) -> bool,
{
    let mut buckets: SmallVec<[&[RouteRef]; 8]> = url_segments
        .iter()
        .enumerate()
        .map(|(position, component)| index.multi_level_bucket(position, component))
        .filter(|bucket| !bucket.is_empty())
        .collect();
    if buckets.is_empty() {
        return None;
    }
    buckets.sort_by_key(|bucket| bucket.len());
    let informative = buckets.len();

    // Fast path through the most selective bucket holding a reachable route
    if let Some(smallest) = buckets
        .iter()
        .find(|bucket| bucket.iter().any(|r| reachable(r)))
    {
        let best: Vec<RouteRef> = smallest
            .iter()
            .filter(|r| reachable(r) && literal_hits(r, url_segments) == informative)
            .map(Arc::clone)
            .collect();
        if !best.is_empty() {
            return Some(best);
        }
    }

    // Positions disagree: count hits across every bucket
    let mut hits: HashMap<usize, (&RouteRef, usize)> = HashMap::new();
    for bucket in &buckets {
        for route in bucket.iter().filter(|r| reachable(r)) {
            hits.entry(route.ordinal).or_insert((route, 0)).1 += 1;
        }
    }
    let top = hits.values().map(|(_, n)| *n).max()?;
    Some(
        hits.into_values()
            .filter(|(_, n)| *n == top)
            .map(|(route, _)| Arc::clone(route))
            .collect(),
    )
}
