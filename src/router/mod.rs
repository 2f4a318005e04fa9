//! # Router Module
//!
//! The router module ties the index, the candidate filter and the matcher
//! together behind a single entry point.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Building a [`crate::index::RouteIndex`] from compiled routes
//! - Resolving incoming requests to the highest-priority matching route
//! - Rebuilding the index and publishing it atomically while requests are in flight
//! - Reporting index statistics for diagnostics
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Indexing**: Routes are classified and placed into static, dynamic,
//!    wildcard, per-position, segment-count, method and prefix-trie buckets.
//!
//! 2. **Matching**: For each incoming request, the candidate filter narrows the
//!    route set through those buckets, and the survivors are matched segment by
//!    segment in priority order until one accepts.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use route_index::route::Route;
//! use route_index::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::new(vec![
//!     Route::compile("/pets", [Method::GET], "list_pets")?,
//!     Route::compile("/pets/{id:\\d+}", [Method::GET, Method::HEAD], "get_pet")?,
//! ]);
//!
//! if let Some(route_match) = router.route(&Method::GET, "/pets/123") {
//!     println!("Handler: {}", route_match.handler());
//!     println!("Path params: {:?}", route_match.params.variables());
//! }
//! # Ok(())
//! # }
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use crate::matching::RouteMatch;
pub use core::Router;
