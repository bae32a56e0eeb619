use criterion::{black_box, criterion_group, criterion_main, Criterion};

use careerfit_core::aggregate::{aggregate, DimensionWeights, Thresholds};
use careerfit_core::catalog::QuestionCatalog;
use careerfit_core::config::ScoringConfig;
use careerfit_core::model::{DimensionId, QuestionKind};
use careerfit_core::responses::ResponseStore;
use careerfit_core::scoring::{normalize_likert, score_dimensions, DimensionScores};
use careerfit_core::session::compute_report;

fn answered_store(catalog: &QuestionCatalog) -> ResponseStore {
    let mut store = ResponseStore::new();
    for (i, q) in catalog.questions().iter().enumerate() {
        let raw = match &q.kind {
            QuestionKind::Likert => ((i % 5) + 1).to_string(),
            QuestionKind::MultipleChoice { correct_index, .. } => correct_index.to_string(),
        };
        store
            .submit(catalog, &q.id, &raw)
            .expect("bench answers are valid");
    }
    store
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_likert", |b| {
        b.iter(|| {
            for v in 1..=5u8 {
                black_box(normalize_likert(black_box(v)));
            }
        })
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let catalog = QuestionCatalog::medical_coding();
    let store = answered_store(&catalog);
    let config = ScoringConfig::default();

    group.bench_function("score_dimensions", |b| {
        b.iter(|| score_dimensions(black_box(&catalog), black_box(&store)))
    });

    let scores: DimensionScores = DimensionId::ALL.into_iter().map(|d| (d, 72.5)).collect();
    let weights = DimensionWeights::default();
    let thresholds = Thresholds::default();
    group.bench_function("aggregate", |b| {
        b.iter(|| aggregate(black_box(&scores), &weights, &thresholds))
    });

    group.bench_function("compute_report", |b| {
        b.iter(|| compute_report(black_box(&catalog), black_box(&store), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_pipeline);
criterion_main!(benches);
