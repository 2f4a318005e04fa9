//! Route classification used to group routes coarsely inside the index.

use serde::Serialize;
use std::fmt;

use crate::route::{Route, SegmentKind};

/// Coarse label for a compiled route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    /// Only literal segments
    Static,
    /// At least one variable or partial variable, no wildcards
    Dynamic,
    /// At least one single or multi wildcard
    Wildcard,
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteClass::Static => write!(f, "static"),
            RouteClass::Dynamic => write!(f, "dynamic"),
            RouteClass::Wildcard => write!(f, "wildcard"),
        }
    }
}

/// Classify a route. Wildcards take precedence over variables.
#[must_use]
pub fn classify(route: &Route) -> RouteClass {
    let mut class = RouteClass::Static;
    for segment in &route.pattern {
        match segment.kind() {
            SegmentKind::SingleWildcard | SegmentKind::MultiWildcard => {
                return RouteClass::Wildcard
            }
            SegmentKind::Variable | SegmentKind::PartialVariable => class = RouteClass::Dynamic,
            SegmentKind::Static => {}
        }
    }
    class
}

/// First component of a route path; `""` for the root path.
#[must_use]
pub fn first_segment(route_path: &str) -> &str {
    route_path
        .split('/')
        .find(|s| !s.is_empty())
        .unwrap_or("")
}
