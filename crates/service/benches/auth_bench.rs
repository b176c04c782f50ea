use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::articles::{domain::NewArticle, ArticleService};
use service::auth::domain::AuthUser;
use service::auth::token::TokenKeys;
use service::storage::memory::InMemoryStore;

fn bench_token(c: &mut Criterion) {
    let keys = TokenKeys::new("bench-secret", 1);
    let user = AuthUser { id: uuid::Uuid::new_v4(), email: "bench@example.com".into(), name: "Bench".into() };
    let token = keys.issue(&user).unwrap();

    c.bench_function("token_issue", |b| b.iter(|| keys.issue(&user).unwrap()));
    c.bench_function("token_verify", |b| b.iter(|| keys.verify(&token).unwrap()));
}

fn bench_article_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = ArticleService::new(Arc::new(InMemoryStore::default()));
    let owner = uuid::Uuid::new_v4();

    c.bench_function("article_create_memory", |b| {
        b.to_async(&rt).iter(|| async {
            let input = NewArticle { title: "Bench".into(), content: "body".into(), tags: vec!["x".into()] };
            svc.create(owner, input).await.unwrap()
        });
    });
}

criterion_group!(benches, bench_token, bench_article_create);
criterion_main!(benches);
