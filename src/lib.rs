//! # route-index
//!
//! **route-index** is a layered route index and segment matcher for HTTP
//! routers. It resolves `(method, path)` requests against thousands of
//! registered patterns by narrowing the candidate set with cheap lookups
//! before running a full segment-by-segment match.
//!
//! ## Overview
//!
//! Routes are compiled from path templates into typed segments (literals,
//! variables, partial variables and wildcards), spread over complementary
//! index structures, and matched by a small state machine. The index is
//! immutable once built; a changed route set is rebuilt in full and swapped
//! in atomically.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`route`]** - Route and segment value types, plus the path compiler
//! - **[`classify`]** - Static / dynamic / wildcard classification
//! - **[`index`]** - The composite [`index::RouteIndex`] and its statistics
//! - **[`filter`]** - Four-stage candidate pre-filter
//! - **[`matching`]** - Per-segment strategies, matching context and resolver
//! - **[`router`]** - Thread-safe front end with atomic rebuilds and logging
//! - **[`runtime_config`]** - Environment variable tuning
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router as router::Router
//!     participant Filter as filter::filtered_candidates
//!     participant Index as index::RouteIndex
//!     participant Matcher as matching::match_route
//!
//!     Caller->>Router: route(GET, "/users/42")
//!     Router->>Router: split_path, depth check
//!     Router->>Index: load snapshot
//!     Router->>Filter: filtered_candidates(segments, GET, index)
//!     Filter->>Index: method, segment count, multi-level, trie
//!     Index-->>Filter: buckets
//!     Filter-->>Router: candidates by priority
//!     loop each candidate
//!         Router->>Matcher: match_route(route, segments)
//!         Matcher-->>Router: Option<RouteParams>
//!     end
//!     Router-->>Caller: Option<RouteMatch>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use route_index::route::Route;
//! use route_index::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::new(vec![
//!     Route::compile("/users", [Method::GET], "list_users")?,
//!     Route::compile("/users/{id:\\d+}", [Method::GET], "get_user")?,
//!     Route::compile("/assets/**path", [Method::GET], "assets")?.with_priority(-10),
//! ]);
//!
//! let m = router.route(&Method::GET, "/users/42").ok_or("no match")?;
//! assert_eq!(m.handler().as_str(), "get_user");
//! assert_eq!(m.get_path_param("id"), Some("42"));
//!
//! let m = router.route(&Method::GET, "/assets/css/site.css").ok_or("no match")?;
//! assert_eq!(m.get_path_param("path"), Some("css/site.css"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! - Candidate filtering is a handful of hash lookups per request
//! - Captured parameters stay inline (no heap allocation) up to 8 values
//! - Readers never take a lock; rebuilds publish through `arc_swap`

pub mod classify;
pub mod filter;
pub mod index;
pub mod matching;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use index::{IndexStatistics, RouteIndex};
pub use matching::{RouteMatch, RouteParams};
pub use route::{compile_path, HandlerRef, Route, RouteError, Segment};
pub use router::Router;
pub use runtime_config::RouterConfig;
