//! Inference benchmark: request → encode → forest majority vote.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use response_recommender::config::RecommenderConfig;
use response_recommender::features::encode;
use response_recommender::pipeline;
use response_recommender::records::{sample_records, PredictionRequest};

fn bench_predict(c: &mut Criterion) {
    let (ctx, _) = pipeline::build(sample_records(), &RecommenderConfig::default())
        .unwrap()
        .serve();
    let seen = PredictionRequest::new("Flood", "Urban", 3);
    let unseen = PredictionRequest::new("Wildfire", "Desert", 5);

    c.bench_function("predict_seen_100_trees", |b| b.iter(|| ctx.predict(black_box(&seen))));
    c.bench_function("predict_unseen_100_trees", |b| b.iter(|| ctx.predict(black_box(&unseen))));
    c.bench_function("encode_request", |b| b.iter(|| encode(black_box(&seen), ctx.schema())));
}

fn bench_predict_by_ensemble_size(c: &mut Criterion) {
    let request = PredictionRequest::new("Earthquake", "Coastal", 4);
    let mut g = c.benchmark_group("predict_by_n_estimators");
    for n in [10, 50, 100, 500] {
        let mut config = RecommenderConfig::default();
        config.forest.n_estimators = n;
        let (ctx, _) = pipeline::build(sample_records(), &config).unwrap().serve();
        g.bench_function(format!("trees_{}", n).as_str(), |b| {
            b.iter(|| ctx.predict(black_box(&request)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_predict, bench_predict_by_ensemble_size);
criterion_main!(benches);
