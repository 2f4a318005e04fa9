use http::Method;

use super::context::{MatchingContext, RouteParams};
use super::strategy::{match_segment, MatchResult};
use crate::filter::{filtered_candidates, split_path};
use crate::index::{RouteIndex, RouteRef};
use crate::route::{HandlerRef, Route};

/// Result of successfully resolving a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The accepted candidate (shared with the index, no clone of the route)
    pub route: RouteRef,
    /// Variables and anonymous wildcard values captured from the URL
    pub params: RouteParams,
}

impl RouteMatch {
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.route.route.handler
    }

    /// Get a captured variable by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Run one candidate's segments against the URL.
///
/// The candidate is rejected on the first `NoMatch`, or if its segments run
/// out while URL components remain. It is accepted on `CompleteMatch` or when
/// both sequences are exhausted together.
#[must_use]
pub fn match_route(route: &Route, url_segments: &[&str]) -> Option<RouteParams> {
    let mut ctx = MatchingContext::new(url_segments, route.pattern.len());

    for segment in &route.pattern {
        match match_segment(segment, &mut ctx) {
            MatchResult::NoMatch => return None,
            MatchResult::CompleteMatch => return Some(ctx.into_params()),
            MatchResult::ContinueMatching => ctx.advance_route(),
        }
    }

    if ctx.is_url_exhausted() {
        Some(ctx.into_params())
    } else {
        None
    }
}

/// Try filtered candidates for already-split URL components, highest
/// priority first, and return the first one that matches.
#[must_use]
pub fn resolve_segments(
    index: &RouteIndex,
    method: &Method,
    url_segments: &[&str],
) -> Option<RouteMatch> {
    filtered_candidates(url_segments, method, index)
        .into_iter()
        .find_map(|candidate| {
            match_route(&candidate.route, url_segments).map(|params| RouteMatch {
                route: candidate,
                params,
            })
        })
}

/// Resolve a request path against `index`.
#[must_use]
pub fn resolve(index: &RouteIndex, method: &Method, path: &str) -> Option<RouteMatch> {
    let url_segments = split_path(path);
    resolve_segments(index, method, &url_segments)
}
