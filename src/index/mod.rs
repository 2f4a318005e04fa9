//! # Index Module
//!
//! Builds the composite [`RouteIndex`] the candidate filter runs against.
//!
//! ## Overview
//!
//! A route set is consumed once and spread over several complementary
//! lookup structures, each answering one cheap question about a request:
//!
//! - **Method** - which routes accept this HTTP method?
//! - **Segment count** - which routes have exactly this many segments?
//! - **Multi-level static** - which routes have literal `x` at position `p`?
//! - **Prefix trie** - which fully static routes have exactly this path?
//! - **First segment** - coarse static/dynamic/wildcard grouping
//!
//! ## Lifecycle
//!
//! There is no incremental update. A changed route set is rebuilt in full
//! and swapped in by the [`crate::router::Router`]; readers holding the old
//! index finish against a consistent snapshot.

mod builder;
mod stats;
mod trie;

pub use builder::{IndexedRoute, RouteIndex, RouteRef};
pub use stats::{FilterReduction, IndexStatistics};
pub use trie::PrefixTrie;
