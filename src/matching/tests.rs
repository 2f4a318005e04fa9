use super::*;
use crate::filter::split_path;
use crate::index::RouteIndex;
use crate::route::{compile_path, Route, Segment, ANONYMOUS_MULTI, ANONYMOUS_SINGLE};
use http::Method;

fn create_route(method: Method, path: &str, handler: &str) -> Route {
    Route::compile(path, [method], handler).unwrap()
}

fn params(route_path: &str, url: &str) -> Option<RouteParams> {
    let route = create_route(Method::GET, route_path, "test");
    match_route(&route, &split_path(url))
}

#[test]
fn test_static_segment() {
    let segment = Segment::literal("user");
    let url = ["user", "42"];
    let mut ctx = MatchingContext::new(&url, 2);
    assert_eq!(match_segment(&segment, &mut ctx), MatchResult::ContinueMatching);
    assert_eq!(ctx.url_position(), 1);
    assert!(ctx.captured_variables().is_empty());

    let url = ["admin"];
    let mut ctx = MatchingContext::new(&url, 1);
    assert_eq!(match_segment(&segment, &mut ctx), MatchResult::NoMatch);
}

#[test]
fn test_variable_capture() {
    let route = create_route(Method::GET, "/user/{id}", "get_user");
    let url = ["user", "42"];
    let mut ctx = MatchingContext::new(&url, route.pattern.len());

    assert_eq!(
        match_segment(&route.pattern[0], &mut ctx),
        MatchResult::ContinueMatching
    );
    ctx.advance_route();
    assert_eq!(
        match_segment(&route.pattern[1], &mut ctx),
        MatchResult::ContinueMatching
    );
    assert!(ctx.is_url_exhausted());

    let params = ctx.into_params();
    assert_eq!(params.get("id"), Some("42"));
    assert_eq!(params.len(), 1);
}

#[test]
fn test_constrained_variable() {
    assert_eq!(
        params("/items/{id:\\d+}", "/items/42").unwrap().get("id"),
        Some("42")
    );
    assert!(params("/items/{id:\\d+}", "/items/4x2").is_none());
}

#[test]
fn test_unanchored_external_constraint_must_cover_component() {
    let segment = Segment::Variable {
        original: "{id}".into(),
        name: "id".into(),
        pattern: Some(regex::Regex::new(r"\d+").unwrap()),
        multi: false,
    };
    let url = ["a42b"];
    let mut ctx = MatchingContext::new(&url, 1);
    assert_eq!(match_segment(&segment, &mut ctx), MatchResult::NoMatch);
}

#[test]
fn test_catch_all_variable_completes() {
    let segment = Segment::catch_all_variable("path");
    let url = ["docs", "guide", "intro.md"];
    let mut ctx = MatchingContext::new(&url, 1);
    assert_eq!(match_segment(&segment, &mut ctx), MatchResult::CompleteMatch);
    assert!(ctx.is_url_exhausted());
    assert_eq!(ctx.into_params().get("path"), Some("docs/guide/intro.md"));
}

#[test]
fn test_partial_variable() {
    let pattern = compile_path("/user-{id}").unwrap();

    let url = ["user-42"];
    let mut ctx = MatchingContext::new(&url, 1);
    assert_eq!(match_segment(&pattern[0], &mut ctx), MatchResult::ContinueMatching);
    assert_eq!(ctx.into_params().get("id"), Some("42"));

    let url = ["admin-42"];
    let mut ctx = MatchingContext::new(&url, 1);
    assert_eq!(match_segment(&pattern[0], &mut ctx), MatchResult::NoMatch);
}

#[test]
fn test_partial_variable_with_several_captures() {
    let p = params("/archive/{year:\\d{4}}-{month:\\d{2}}", "/archive/2024-05").unwrap();
    assert_eq!(p.get("year"), Some("2024"));
    assert_eq!(p.get("month"), Some("05"));
    assert!(params("/archive/{year:\\d{4}}-{month:\\d{2}}", "/archive/24-05").is_none());
}

#[test]
fn test_partial_multi_wildcard_spans_components() {
    let p = params("/v{path:**}", "/v10/20").unwrap();
    assert_eq!(p.get("path"), Some("10/20"));
}

#[test]
fn test_single_wildcards() {
    let p = params("/*/files/*", "/alice/files/report").unwrap();
    assert_eq!(p.wildcards(ANONYMOUS_SINGLE), &["alice", "report"]);
    assert!(p.wildcards(ANONYMOUS_MULTI).is_empty());

    let p = params("/*owner/files", "/bob/files").unwrap();
    assert_eq!(p.get("owner"), Some("bob"));
    assert!(p.wildcards(ANONYMOUS_SINGLE).is_empty());
}

#[test]
fn test_multi_wildcard_at_end() {
    let p = params("/api/**", "/api/a/b/c").unwrap();
    assert_eq!(p.wildcards(ANONYMOUS_MULTI), &["a/b/c"]);
}

#[test]
fn test_multi_wildcard_leaves_room_for_trailing_segments() {
    let p = params("/files/**path/meta/{field}", "/files/a/b/c/meta/size").unwrap();
    assert_eq!(p.get("path"), Some("a/b/c"));
    assert_eq!(p.get("field"), Some("size"));
}

#[test]
fn test_multi_wildcard_may_consume_nothing() {
    let p = params("/files/**/meta", "/files/meta").unwrap();
    assert_eq!(p.wildcards(ANONYMOUS_MULTI), &[""]);
}

#[test]
fn test_multi_wildcard_underflow_is_no_match() {
    let segment = Segment::multi_wildcard(ANONYMOUS_MULTI);
    let url = ["x"];
    // Three more route segments after the wildcard, one URL component left
    let mut ctx = MatchingContext::new(&url, 4);
    assert_eq!(match_segment(&segment, &mut ctx), MatchResult::NoMatch);
    assert_eq!(ctx.url_position(), 0);
}

#[test]
fn test_trailing_url_components_reject() {
    assert!(params("/user/{id}", "/user/42/extra").is_none());
}

#[test]
fn test_missing_url_components_reject() {
    assert!(params("/user/{id}", "/user").is_none());
    assert!(params("/user/*", "/user").is_none());
}

#[test]
fn test_root_route() {
    assert!(params("/", "/").unwrap().is_empty());
    assert!(params("/", "/anything").is_none());
}

#[test]
fn test_resolve_prefers_higher_priority() {
    let index = RouteIndex::build(vec![
        create_route(Method::GET, "/items/{id}", "low").with_priority(5),
        create_route(Method::GET, "/items/{slug}", "high").with_priority(10),
    ]);
    let matched = resolve(&index, &Method::GET, "/items/7").unwrap();
    assert_eq!(matched.handler().as_str(), "high");
    assert_eq!(matched.get_path_param("slug"), Some("7"));
}

#[test]
fn test_resolve_falls_through_to_next_candidate() {
    let index = RouteIndex::build(vec![
        create_route(Method::GET, "/items/{id:\\d+}", "by_id").with_priority(10),
        create_route(Method::GET, "/items/{slug}", "by_slug"),
    ]);
    let matched = resolve(&index, &Method::GET, "/items/blue-chair").unwrap();
    assert_eq!(matched.handler().as_str(), "by_slug");
    let matched = resolve(&index, &Method::GET, "/items/12").unwrap();
    assert_eq!(matched.handler().as_str(), "by_id");
}

#[test]
fn test_resolve_no_match() {
    let index = RouteIndex::build(vec![create_route(Method::GET, "/users/{id}", "get_user")]);
    assert!(resolve(&index, &Method::GET, "/posts/1").is_none());
    assert!(resolve(&index, &Method::DELETE, "/users/1").is_none());
}

#[test]
fn test_params_to_map() {
    let p = params("/orgs/{org}/repos/{repo}", "/orgs/acme/repos/engine").unwrap();
    let map = p.to_map();
    assert_eq!(map.get("org").map(String::as_str), Some("acme"));
    assert_eq!(map.get("repo").map(String::as_str), Some("engine"));
}

#[test]
fn test_params_serialize() {
    let p = params("/*/files/{name}", "/alice/files/report").unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["variables"][0][0], "name");
    assert_eq!(json["variables"][0][1], "report");
    assert_eq!(json["arrays"]["single"][0], "alice");
}
