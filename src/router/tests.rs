use super::Router;
use crate::route::{Route, ANONYMOUS_MULTI};
use crate::runtime_config::RouterConfig;
use http::Method;
use std::time::Duration;

fn create_route(method: Method, path: &str, handler: &str) -> Route {
    Route::compile(path, [method], handler).unwrap()
}

fn router(routes: Vec<Route>) -> Router {
    Router::with_config(routes, RouterConfig::default())
}

#[test]
fn test_root_path() {
    let router = router(vec![create_route(Method::GET, "/", "root")]);
    let m = router.route(&Method::GET, "/").unwrap();
    assert_eq!(m.handler().as_str(), "root");
    assert!(m.params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let router = router(vec![create_route(Method::GET, "/items/{id}", "get_item")]);
    let m = router.route(&Method::GET, "/items/123").unwrap();
    assert_eq!(m.get_path_param("id"), Some("123"));
}

#[test]
fn test_nested_path() {
    let router = router(vec![create_route(Method::GET, "/a/{b}/c", "nested")]);
    assert_eq!(
        router.route(&Method::GET, "/a/1/c").unwrap().get_path_param("b"),
        Some("1")
    );
    assert!(router.route(&Method::GET, "/a/1/d").is_none());
}

#[test]
fn test_query_string_and_trailing_slash_ignored() {
    let router = router(vec![create_route(Method::GET, "/search/{term}", "search")]);
    let m = router.route(&Method::GET, "/search/rust/?page=2").unwrap();
    assert_eq!(m.get_path_param("term"), Some("rust"));
}

#[test]
fn test_method_mismatch() {
    let router = router(vec![create_route(Method::POST, "/orders", "create_order")]);
    assert!(router.route(&Method::GET, "/orders").is_none());
    assert!(router.route(&Method::POST, "/orders").is_some());
}

#[test]
fn test_max_path_depth_rejects() {
    let config = RouterConfig {
        slow_match_threshold: Duration::from_millis(1),
        max_path_depth: 2,
    };
    let router = Router::with_config(vec![create_route(Method::GET, "/files/**", "files")], config);
    assert!(router.route(&Method::GET, "/files/a").is_some());
    assert!(router.route(&Method::GET, "/files/a/b").is_none());
}

#[test]
fn test_reload_swaps_index() {
    let router = router(vec![create_route(Method::GET, "/old", "old")]);
    let before = router.snapshot();
    assert!(router.route(&Method::GET, "/old").is_some());

    router.reload(vec![
        create_route(Method::GET, "/new", "new"),
        create_route(Method::GET, "/static/**", "assets"),
    ]);

    assert!(router.route(&Method::GET, "/old").is_none());
    assert_eq!(router.route_count(), 2);
    let m = router.route(&Method::GET, "/static/css/site.css").unwrap();
    assert_eq!(m.params.wildcards(ANONYMOUS_MULTI), &["css/site.css"]);

    // Previously loaded snapshot is untouched
    assert_eq!(before.len(), 1);
    assert_eq!(before.routes()[0].route.path.as_ref(), "/old");
}

#[test]
fn test_path_patterns_in_registration_order() {
    let router = router(vec![
        create_route(Method::GET, "/b", "b"),
        create_route(Method::GET, "/a/{id}", "a").with_priority(50),
    ]);
    assert_eq!(router.path_patterns(), vec!["/b".to_string(), "/a/{id}".to_string()]);
}

#[test]
fn test_statistics_through_router() {
    let router = router(vec![
        create_route(Method::GET, "/health", "health"),
        create_route(Method::GET, "/users/{id}", "user"),
        create_route(Method::GET, "/*/raw", "raw"),
    ]);
    let stats = router.statistics();
    assert_eq!(stats.total_routes, 3);
    assert_eq!(stats.static_routes, 1);
    assert_eq!(stats.dynamic_routes, 1);
    assert_eq!(stats.wildcard_routes, 1);
}

#[test]
fn test_empty_router() {
    let router = router(Vec::new());
    assert_eq!(router.route_count(), 0);
    assert!(router.route(&Method::GET, "/").is_none());
    router.dump_routes();
}
