use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use http::Method;
use route_index::{filter, route::Route, Router, RouterConfig};
use std::hint::black_box;

fn zoo_routes() -> Vec<Route> {
    let table: &[(Method, &str, &str)] = &[
        (Method::GET, "/", "root_handler"),
        (Method::GET, "/zoo/animals", "get_animals"),
        (Method::POST, "/zoo/animals", "create_animal"),
        (Method::GET, "/zoo/animals/{id}", "get_animal"),
        (Method::PUT, "/zoo/animals/{id}", "update_animal"),
        (Method::GET, "/zoo/animals/{id}/toys/{toy_id}", "animal_toy"),
        (
            Method::GET,
            "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}",
            "habitat_section",
        ),
        (
            Method::POST,
            "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}",
            "post_item_batch",
        ),
        (
            Method::GET,
            "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}",
            "complex_many_params",
        ),
        (Method::GET, "/static/**path", "static_files"),
        (Method::GET, "/reports/{year:\\d{4}}-{month:\\d{2}}.csv", "report"),
        (Method::HEAD, "/zoo/health", "health_check"),
    ];
    table
        .iter()
        .map(|(method, path, handler)| {
            Route::compile(path, [method.clone()], *handler).expect("valid route")
        })
        .collect()
}

/// Large synthetic table: `count` services with a handful of endpoints each.
fn synthetic_routes(count: usize) -> Vec<Route> {
    let mut routes = Vec::with_capacity(count * 4);
    for i in 0..count {
        for (method, suffix) in [
            (Method::GET, ""),
            (Method::GET, "/{id}"),
            (Method::PUT, "/{id}"),
            (Method::GET, "/{id}/history/**"),
        ] {
            let path = format!("/svc{i}/items{suffix}");
            routes.push(Route::compile(&path, [method], "handler").expect("valid route"));
        }
    }
    routes
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = Router::with_config(zoo_routes(), RouterConfig::default());
    c.bench_function("route_match", |b| {
        let test_paths = [
            (Method::GET, "/zoo/animals/123"),
            (Method::GET, "/zoo/animals/123/toys/456"),
            (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
            (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
            (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
            (Method::GET, "/static/css/app/site.css"),
            (Method::GET, "/reports/2024-05.csv"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.route(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_large_table(c: &mut Criterion) {
    let router = Router::with_config(synthetic_routes(1000), RouterConfig::default());
    let index = router.snapshot();
    let segments = filter::split_path("/svc731/items/42/history/2024/01");

    c.bench_function("filter_4000_routes", |b| {
        b.iter(|| black_box(filter::filtered_candidates(&segments, &Method::GET, &index)))
    });
    c.bench_function("route_4000_routes", |b| {
        b.iter(|| black_box(router.route(&Method::GET, "/svc731/items/42")))
    });
}

/// Filter and route cost for the same request as the table grows 16x.
fn bench_table_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_growth");
    for services in [250, 1000, 4000] {
        let router = Router::with_config(synthetic_routes(services), RouterConfig::default());
        let index = router.snapshot();
        let segments = filter::split_path("/svc123/items/42/history/2024/01");

        group.bench_with_input(
            BenchmarkId::new("filter", services * 4),
            &segments,
            |b, segments| {
                b.iter(|| black_box(filter::filtered_candidates(segments, &Method::GET, &index)))
            },
        );
        group.bench_with_input(
            BenchmarkId::new("route", services * 4),
            &services,
            |b, _| b.iter(|| black_box(router.route(&Method::GET, "/svc123/items/42"))),
        );
    }
    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    c.bench_function("build_4000_routes", |b| {
        b.iter_batched(
            || synthetic_routes(1000),
            |routes| black_box(route_index::RouteIndex::build(routes)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_route_throughput,
    bench_large_table,
    bench_table_growth,
    bench_index_build
);
criterion_main!(benches);
