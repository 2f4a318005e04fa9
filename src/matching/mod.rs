//! # Matching Module
//!
//! Full segment-by-segment matching of one candidate route against a URL.
//!
//! ## State machine
//!
//! ```text
//! position 0 ──► match_segment ──► NoMatch ─────────────► reject
//!                    │
//!                    ├──► ContinueMatching ──► next segment
//!                    │        (route exhausted, URL not ──► reject)
//!                    │        (both exhausted ──────────► accept)
//!                    │
//!                    └──► CompleteMatch ────────────────► accept
//! ```
//!
//! A [`MatchingContext`] is created per (candidate, request) attempt and
//! dropped afterwards; it is never shared.

mod context;
mod resolver;
mod strategy;
#[cfg(test)]
mod tests;

pub use context::{CapturedArrays, MatchingContext, ParamVec, RouteParams, MAX_INLINE_PARAMS};
pub use resolver::{match_route, resolve, resolve_segments, RouteMatch};
pub use strategy::{match_segment, MatchResult};
