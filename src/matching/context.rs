use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::route::{ANONYMOUS_MULTI, ANONYMOUS_SINGLE};

/// Maximum number of captured variables before heap allocation.
/// Most routes have ≤4 variables (e.g. `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured variables in capture order.
///
/// Names are `Arc<str>` shared with the route pattern, so capturing a
/// variable only allocates its value.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Values captured by anonymous wildcards, in URL order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedArrays {
    single: SmallVec<[String; 2]>,
    multi: SmallVec<[String; 1]>,
}

impl CapturedArrays {
    fn push(&mut self, marker: &str, value: String) {
        if marker == ANONYMOUS_MULTI {
            self.multi.push(value);
        } else {
            self.single.push(value);
        }
    }

    /// Values captured under `*` or `**`; empty for any other marker.
    #[must_use]
    pub fn get(&self, marker: &str) -> &[String] {
        match marker {
            ANONYMOUS_SINGLE => &self.single,
            ANONYMOUS_MULTI => &self.multi,
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.single.is_empty() && self.multi.is_empty()
    }
}

/// Per-attempt matching state for one (candidate, request) pairing.
///
/// Tracks the current position in the URL and in the route pattern
/// separately because a multi wildcard may consume any number of URL
/// components while occupying a single pattern slot.
#[derive(Debug)]
pub struct MatchingContext<'a> {
    url_segments: &'a [&'a str],
    route_len: usize,
    url_position: usize,
    route_position: usize,
    captured_variables: ParamVec,
    captured_arrays: CapturedArrays,
}

impl<'a> MatchingContext<'a> {
    #[must_use]
    pub fn new(url_segments: &'a [&'a str], route_len: usize) -> Self {
        Self {
            url_segments,
            route_len,
            url_position: 0,
            route_position: 0,
            captured_variables: ParamVec::new(),
            captured_arrays: CapturedArrays::default(),
        }
    }

    /// URL component at the current position.
    #[must_use]
    pub fn current(&self) -> Option<&'a str> {
        self.url_segments.get(self.url_position).copied()
    }

    /// URL components not consumed yet.
    #[must_use]
    pub fn remaining_url(&self) -> &'a [&'a str] {
        self.url_segments.get(self.url_position..).unwrap_or(&[])
    }

    /// Route segments after the one currently being matched.
    #[must_use]
    pub fn remaining_route_after_current(&self) -> usize {
        self.route_len.saturating_sub(self.route_position + 1)
    }

    #[must_use]
    pub fn url_position(&self) -> usize {
        self.url_position
    }

    #[must_use]
    pub fn route_position(&self) -> usize {
        self.route_position
    }

    /// Mark `count` URL components as consumed.
    pub fn consume(&mut self, count: usize) {
        self.url_position = (self.url_position + count).min(self.url_segments.len());
    }

    /// Move on to the next route segment.
    pub fn advance_route(&mut self) {
        self.route_position += 1;
    }

    #[must_use]
    pub fn is_url_exhausted(&self) -> bool {
        self.url_position >= self.url_segments.len()
    }

    #[must_use]
    pub fn is_route_exhausted(&self) -> bool {
        self.route_position >= self.route_len
    }

    /// Store a named capture, or append to the anonymous array for `*`/`**`.
    pub fn capture(&mut self, name: &Arc<str>, value: String) {
        let key = name.as_ref();
        if key == ANONYMOUS_SINGLE || key == ANONYMOUS_MULTI {
            self.captured_arrays.push(key, value);
        } else {
            self.captured_variables.push((Arc::clone(name), value));
        }
    }

    #[must_use]
    pub fn captured_variables(&self) -> &ParamVec {
        &self.captured_variables
    }

    #[must_use]
    pub fn captured_arrays(&self) -> &CapturedArrays {
        &self.captured_arrays
    }

    #[must_use]
    pub fn into_params(self) -> RouteParams {
        RouteParams {
            variables: self.captured_variables,
            arrays: self.captured_arrays,
        }
    }
}

/// Parameters resolved for an accepted candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    variables: ParamVec,
    arrays: CapturedArrays,
}

impl RouteParams {
    /// Get a captured variable by name
    ///
    /// Uses "last write wins" semantics if the same name was captured twice.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Values captured by anonymous `*` or `**` wildcards.
    #[must_use]
    pub fn wildcards(&self, marker: &str) -> &[String] {
        self.arrays.get(marker)
    }

    #[must_use]
    pub fn variables(&self) -> &ParamVec {
        &self.variables
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.arrays.is_empty()
    }

    /// Convert named captures to a HashMap.
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}
