//! Benchmarks for the recommendation engine
//!
//! Run with: cargo bench --package recommender
//!
//! Both engine slots are served by the bundled catalog, so the numbers
//! reflect genre resolution, deduplication and padding without network
//! noise.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

use emotion_client::{ClassificationResult, EmotionLabel};
use movie_data::MovieCatalog;
use recommender::{EmotionGenreMap, RecommendationEngine};
use sources::LocalSource;

fn build_engine() -> RecommendationEngine {
    let catalog = Arc::new(MovieCatalog::builtin().expect("builtin catalog"));
    let local = Arc::new(LocalSource::new(catalog));
    let padding = local.padding_records();

    RecommendationEngine::new(local.clone(), local, EmotionGenreMap::default())
        .expect("default mapping is valid")
        .with_padding_pool(padding)
}

fn bench_recommend_mapped_genres(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let engine = build_engine();

    c.bench_function("recommend_joy_high_confidence", |b| {
        b.iter(|| {
            let result = rt.block_on(engine.recommend(black_box(
                ClassificationResult::new(EmotionLabel::Joy, 0.92),
            )));
            black_box(result)
        })
    });
}

fn bench_recommend_trending(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let engine = build_engine();

    c.bench_function("recommend_low_confidence_trending", |b| {
        b.iter(|| {
            let result = rt.block_on(engine.recommend(black_box(
                ClassificationResult::new(EmotionLabel::Sadness, 0.2),
            )));
            black_box(result)
        })
    });
}

criterion_group!(
    benches,
    bench_recommend_mapped_genres,
    bench_recommend_trending
);
criterion_main!(benches);
