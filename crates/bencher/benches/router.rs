use std::hint::black_box;

use bencher::SMALL_REQUEST;
#[cfg(feature = "codspeed")]
use codspeed_criterion_compat::{criterion_group, criterion_main, BenchmarkId, Criterion};
#[cfg(not(feature = "codspeed"))]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use futures::FutureExt;
use relay_http::codec::decode_request;
use relay_web::{handler_fn, Method, Response, Router};
use tokio::runtime::Builder;

fn router(extra_routes: usize) -> Router {
    let mut builder = Router::builder().use_global(handler_fn(|req, res, next| {
        async move {
            res.set_header("X-Powered-By", "relay");
            next.run(req, res).await
        }
        .boxed()
    }));

    // routes are matched in registration order, the benchmarked one is registered last
    for i in 0..extra_routes {
        builder = builder.route(
            Method::Get,
            format!("/filler/{i}"),
            handler_fn(|_req, _res, _next| async move { Ok(()) }.boxed()),
        );
    }

    builder
        .get(
            "/index.html",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_text_body("hello world");
                    Ok(())
                }
                .boxed()
            }),
        )
        .build()
}

fn benchmark_router_dispatch(criterion: &mut Criterion) {
    let runtime = Builder::new_current_thread().build().expect("runtime should build");
    let request = decode_request(&SMALL_REQUEST.wire_text()).expect("fixture should be a valid http request");
    let mut group = criterion.benchmark_group("router_dispatch");

    for extra_routes in [0, 16, 128] {
        let router = router(extra_routes);
        group.bench_with_input(BenchmarkId::from_parameter(extra_routes), &router, |b, router| {
            b.iter(|| {
                let mut response = Response::new();
                runtime.block_on(router.dispatch(&request, &mut response)).expect("route should be registered");
                black_box(response);
            });
        });
    }

    group.finish();
}

criterion_group!(router_benches, benchmark_router_dispatch);
criterion_main!(router_benches);
