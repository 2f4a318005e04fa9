//! Router core module - hot path for request routing.
//!
//! The router owns the current [`RouteIndex`] behind an [`ArcSwap`]. Every
//! request loads a snapshot without locking; a rebuild constructs a complete
//! new index off to the side and publishes it with a single atomic store.

use arc_swap::ArcSwap;
use http::Method;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::filter::split_path;
use crate::index::{IndexStatistics, RouteIndex};
use crate::matching::{resolve_segments, RouteMatch};
use crate::route::Route;
use crate::runtime_config::RouterConfig;

/// Router that resolves HTTP requests against a layered route index
///
/// # Performance
///
/// - Candidate filtering: a handful of hash lookups per request
/// - Full matching: O(pattern length) per surviving candidate
/// - Reads never block: the index is immutable and swapped atomically
pub struct Router {
    /// Current index generation
    index: ArcSwap<RouteIndex>,
    config: RouterConfig,
}

impl Router {
    /// Create a new router, configured from the environment
    ///
    /// # Arguments
    ///
    /// * `routes` - Compiled routes to index
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self::with_config(routes, RouterConfig::from_env())
    }

    #[must_use]
    pub fn with_config(routes: Vec<Route>, config: RouterConfig) -> Self {
        let index = RouteIndex::build(routes);
        if index.is_empty() {
            info!(routes_count = 0, "Routing table loaded with no routes");
        } else {
            let routes_summary: Vec<String> = index
                .routes()
                .iter()
                .take(10)
                .map(|r| format!("{:?} {}", r.route.methods.as_slice(), r.route.path))
                .collect();
            info!(
                routes_count = index.len(),
                routes_summary = ?routes_summary,
                routing_algorithm = "layered_index",
                "Routing table loaded"
            );
        }

        Self {
            index: ArcSwap::from_pointee(index),
            config,
        }
    }

    /// Rebuild the index from a new route set and swap it in.
    ///
    /// Requests already resolving against the previous index finish against
    /// that snapshot.
    pub fn reload(&self, routes: Vec<Route>) {
        let build_start = Instant::now();
        let index = RouteIndex::build(routes);
        let routes_count = index.len();
        self.index.store(Arc::new(index));
        info!(
            routes_count,
            build_us = build_start.elapsed().as_micros(),
            "Routing table reloaded"
        );
    }

    /// Current index generation.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RouteIndex> {
        self.index.load_full()
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Match an HTTP request to a route
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `path` - Request path (e.g., `/users/123`); a query string is ignored
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - The highest-priority route that matched
    /// * `None` - If no route matches (results in 404)
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::Method;
    /// use route_index::route::Route;
    /// use route_index::router::Router;
    ///
    /// let router = Router::new(vec![
    ///     Route::compile("/users/{id}", [Method::GET], "users::show").unwrap(),
    /// ]);
    /// let m = router.route(&Method::GET, "/users/123").unwrap();
    /// assert_eq!(m.handler().as_str(), "users::show");
    /// assert_eq!(m.get_path_param("id"), Some("123"));
    /// ```
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let url_segments = split_path(path);
        if url_segments.len() > self.config.max_path_depth {
            warn!(
                method = %method,
                depth = url_segments.len(),
                max_depth = self.config.max_path_depth,
                "Request path exceeds maximum depth"
            );
            return None;
        }

        let index = self.index.load();
        let result = resolve_segments(&index, method, &url_segments);
        let match_duration = match_start.elapsed();

        match &result {
            Some(m) if match_duration > self.config.slow_match_threshold => {
                warn!(
                    method = %method,
                    path = %path,
                    handler = %m.handler(),
                    route_pattern = %m.route.route.path,
                    path_params = ?m.params.variables(),
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            }
            Some(m) => {
                info!(
                    method = %method,
                    path = %path,
                    handler = %m.handler(),
                    route_pattern = %m.route.route.path,
                    path_params = ?m.params.variables(),
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            None => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }

        result
    }

    /// Number of routes in the current index.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.index.load().len()
    }

    /// Diagnostic statistics for the current index.
    #[must_use]
    pub fn statistics(&self) -> IndexStatistics {
        self.index.load().statistics()
    }

    /// All registered path templates, in registration order.
    #[must_use]
    pub fn path_patterns(&self) -> Vec<String> {
        self.index
            .load()
            .routes()
            .iter()
            .map(|r| r.route.path.to_string())
            .collect()
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        let index = self.index.load();
        println!("[routes] count={}", index.len());
        for entry in index.routes() {
            println!(
                "[route] {:?} {} -> {} (priority {}, {})",
                entry.route.methods.as_slice(),
                entry.route.path,
                entry.route.handler,
                entry.route.priority,
                entry.class
            );
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
