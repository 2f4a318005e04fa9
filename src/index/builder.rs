use http::Method;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

use super::stats::IndexStatistics;
use super::trie::PrefixTrie;
use crate::classify::{classify, RouteClass};
use crate::route::{Route, RouteKey, Segment};

/// A route as stored in the index.
///
/// Carries the registration order (`ordinal`), the precomputed
/// classification and the logical key. `key_id` is the ordinal of the first
/// route registered under an equal key, so the filter can deduplicate by
/// logical identity without hashing strings per request.
#[derive(Debug)]
pub struct IndexedRoute {
    pub ordinal: usize,
    pub key_id: usize,
    pub class: RouteClass,
    pub key: RouteKey,
    pub route: Route,
}

impl IndexedRoute {
    /// Whether this route can absorb a URL of `depth` components: same
    /// length, or shorter with a variable-length segment.
    #[inline]
    #[must_use]
    pub fn fits_depth(&self, depth: usize) -> bool {
        let len = self.route.pattern.len();
        len == depth || (len < depth && self.route.has_variable_length_segment())
    }
}

/// Shared handle to an indexed route; every bucket holds these.
pub type RouteRef = Arc<IndexedRoute>;

/// Composite route index, built once per route-set generation.
///
/// The index is immutable after [`RouteIndex::build`]; a changed route set
/// produces a new index that replaces this one wholesale.
///
/// | Structure       | Key                          | Holds                          |
/// |-----------------|------------------------------|--------------------------------|
/// | `static_routes` | first static component       | routes starting with a literal |
/// | `dynamic_routes`| -                            | routes starting with a variable|
/// | `wildcard_routes`| -                           | routes starting with a wildcard|
/// | `multi_level`   | position, then literal       | every static segment of every route |
/// | `segment_count` | pattern length               | all routes                     |
/// | `variable_length`| pattern length              | routes with a variable-length segment |
/// | `http_methods`  | HTTP method                  | once per declared method       |
/// | `trie`          | literal components           | fully static routes            |
///
/// Every list is sorted by descending priority; equal priorities keep
/// registration order.
#[derive(Debug, Default)]
pub struct RouteIndex {
    routes: Vec<RouteRef>,
    static_routes: HashMap<Arc<str>, Vec<RouteRef>>,
    dynamic_routes: Vec<RouteRef>,
    wildcard_routes: Vec<RouteRef>,
    multi_level: Vec<HashMap<Arc<str>, Vec<RouteRef>>>,
    segment_count: BTreeMap<usize, Vec<RouteRef>>,
    variable_length: BTreeMap<usize, Vec<RouteRef>>,
    http_methods: HashMap<Method, Vec<RouteRef>>,
    trie: PrefixTrie,
}

impl RouteIndex {
    /// Build the full index from a route set.
    #[must_use]
    pub fn build<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        let mut index = RouteIndex::default();
        let mut key_ids: HashMap<RouteKey, usize> = HashMap::new();

        for (ordinal, route) in routes.into_iter().enumerate() {
            let key = route.key();
            let key_id = *key_ids.entry(key.clone()).or_insert(ordinal);
            let entry = Arc::new(IndexedRoute {
                ordinal,
                key_id,
                class: classify(&route),
                key,
                route,
            });
            index.insert(entry);
        }
        index.sort_buckets();

        info!(
            routes_count = index.routes.len(),
            static_buckets = index.static_routes.len(),
            dynamic_routes = index.dynamic_routes.len(),
            wildcard_routes = index.wildcard_routes.len(),
            trie_routes = index.trie.len(),
            "Route index built"
        );

        index
    }

    fn insert(&mut self, entry: RouteRef) {
        let pattern = &entry.route.pattern;

        match pattern.first() {
            None => push(self.static_routes.entry(Arc::from("")).or_default(), &entry),
            Some(Segment::Static { original }) => push(
                self.static_routes
                    .entry(Arc::clone(original))
                    .or_default(),
                &entry,
            ),
            Some(Segment::SingleWildcard { .. } | Segment::MultiWildcard { .. }) => {
                push(&mut self.wildcard_routes, &entry)
            }
            Some(Segment::Variable { .. } | Segment::PartialVariable { .. }) => {
                push(&mut self.dynamic_routes, &entry)
            }
        }

        for (position, segment) in pattern.iter().enumerate() {
            let Segment::Static { original } = segment else {
                continue;
            };
            if self.multi_level.len() <= position {
                self.multi_level.resize_with(position + 1, HashMap::new);
            }
            push(
                self.multi_level[position]
                    .entry(Arc::clone(original))
                    .or_default(),
                &entry,
            );
        }

        push(
            self.segment_count.entry(pattern.len()).or_default(),
            &entry,
        );
        if entry.route.has_variable_length_segment() {
            push(
                self.variable_length.entry(pattern.len()).or_default(),
                &entry,
            );
        }

        for method in &entry.route.methods {
            let bucket = self.http_methods.entry(method.clone()).or_default();
            // A route listing the same method twice is indexed once for it
            if !bucket.last().is_some_and(|r| Arc::ptr_eq(r, &entry)) {
                push(bucket, &entry);
            }
        }

        if self.trie.insert(Arc::clone(&entry)) {
            debug!(path = %entry.route.path, "Static route added to prefix trie");
        }

        self.routes.push(entry);
    }

    fn sort_buckets(&mut self) {
        for bucket in self.static_routes.values_mut() {
            sort_by_priority(bucket);
        }
        sort_by_priority(&mut self.dynamic_routes);
        sort_by_priority(&mut self.wildcard_routes);
        for position in &mut self.multi_level {
            for bucket in position.values_mut() {
                sort_by_priority(bucket);
            }
        }
        for bucket in self.segment_count.values_mut() {
            sort_by_priority(bucket);
        }
        for bucket in self.variable_length.values_mut() {
            sort_by_priority(bucket);
        }
        for bucket in self.http_methods.values_mut() {
            sort_by_priority(bucket);
        }
        self.trie.finish();
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteRef] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes whose first segment is the literal `first` (`""` for root).
    #[must_use]
    pub fn static_bucket(&self, first: &str) -> &[RouteRef] {
        bucket(self.static_routes.get(first))
    }

    pub(crate) fn static_bucket_count(&self) -> usize {
        self.static_routes.len()
    }

    #[must_use]
    pub fn dynamic_routes(&self) -> &[RouteRef] {
        &self.dynamic_routes
    }

    #[must_use]
    pub fn wildcard_routes(&self) -> &[RouteRef] {
        &self.wildcard_routes
    }

    /// Routes with literal `literal` at `position`.
    #[must_use]
    pub fn multi_level_bucket(&self, position: usize, literal: &str) -> &[RouteRef] {
        bucket(self.multi_level.get(position).and_then(|m| m.get(literal)))
    }

    pub(crate) fn multi_level_entry_count(&self) -> usize {
        self.multi_level.iter().map(HashMap::len).sum()
    }

    /// Routes whose pattern has exactly `count` segments.
    #[must_use]
    pub fn segment_count_bucket(&self, count: usize) -> &[RouteRef] {
        bucket(self.segment_count.get(&count))
    }

    /// Variable-length routes with fewer than `count` segments, grouped by
    /// pattern length.
    #[must_use]
    pub fn shorter_variable_length(
        &self,
        count: usize,
    ) -> impl Iterator<Item = (usize, &[RouteRef])> {
        self.variable_length
            .range(..count)
            .map(|(len, routes)| (*len, routes.as_slice()))
    }

    pub(crate) fn segment_count_buckets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segment_count.iter().map(|(len, r)| (*len, r.len()))
    }

    /// Routes accepting `method`.
    #[must_use]
    pub fn method_bucket(&self, method: &Method) -> &[RouteRef] {
        bucket(self.http_methods.get(method))
    }

    pub(crate) fn method_buckets(&self) -> impl Iterator<Item = (&Method, usize)> + '_ {
        self.http_methods.iter().map(|(m, r)| (m, r.len()))
    }

    #[must_use]
    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    /// Derived diagnostic view; never mutates the index.
    #[must_use]
    pub fn statistics(&self) -> IndexStatistics {
        IndexStatistics::collect(self)
    }
}

impl FromIterator<Route> for RouteIndex {
    fn from_iter<T: IntoIterator<Item = Route>>(iter: T) -> Self {
        RouteIndex::build(iter)
    }
}

fn push(bucket: &mut Vec<RouteRef>, entry: &RouteRef) {
    bucket.push(Arc::clone(entry));
}

fn bucket(routes: Option<&Vec<RouteRef>>) -> &[RouteRef] {
    routes.map(Vec::as_slice).unwrap_or(&[])
}

/// Stable sort: equal priorities keep registration order.
fn sort_by_priority(bucket: &mut [RouteRef]) {
    bucket.sort_by(|a, b| b.route.priority.cmp(&a.route.priority));
}
