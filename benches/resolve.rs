use criterion::{criterion_group, criterion_main, Criterion};
use hashroute::Router;
use std::hint::black_box;

fn example_router() -> Router {
    Router::new()
        .go("/", |_h, _v| {})
        .expect("register /")
        .go("/inbox", |_h, _v| {})
        .expect("register /inbox")
        .go("/users/:id", |_h, _v| {})
        .expect("register /users/:id")
        .go("/users/:id/posts/:post", |_h, _v| {})
        .expect("register /users/:id/posts/:post")
        .go("/orgs/:org/teams/:team/members/:member", |_h, _v| {})
        .expect("register /orgs/..")
        .go("/settings/profile", |_h, _v| {})
        .expect("register /settings/profile")
        .otherwise("/")
}

fn bench_resolve_throughput(c: &mut Criterion) {
    let router = example_router();
    c.bench_function("resolve_hash", |b| {
        let test_hashes = [
            "/inbox",
            "/users/1234",
            "/users/1234/posts/99",
            "/orgs/acme/teams/core/members/jo",
            "/settings/profile",
            "/no/such/route",
        ];
        b.iter(|| {
            for hash in test_hashes.iter() {
                let res = router.resolve(hash);
                black_box(&res);
            }
        })
    });
}

fn bench_exact_vs_variable(c: &mut Criterion) {
    let router = example_router();
    let mut group = c.benchmark_group("resolve_kind");
    group.bench_function("exact", |b| {
        b.iter(|| black_box(router.resolve(black_box("/inbox"))))
    });
    group.bench_function("variable", |b| {
        b.iter(|| black_box(router.resolve(black_box("/users/1234"))))
    });
    group.bench_function("miss", |b| {
        b.iter(|| black_box(router.resolve(black_box("/no/such/route"))))
    });
    group.finish();
}

criterion_group!(benches, bench_resolve_throughput, bench_exact_vs_variable);
criterion_main!(benches);
