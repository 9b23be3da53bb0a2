use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizportal_core::ledger::{mean_score, summarize, ProgressLedger};
use quizportal_core::mock::MemoryStore;
use quizportal_core::model::ScoreRecord;
use quizportal_core::records::{Collection, Record};

fn make_results(n: usize) -> Vec<ScoreRecord> {
    (0..n)
        .map(|i| ScoreRecord {
            student_name: format!("student{}", i % 40),
            level: (i % 3) as i32 + 1,
            score: (i % 4) as u32,
        })
        .collect()
}

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");

    for n in [100, 10_000] {
        let results = make_results(n);
        group.bench_function(format!("mean_score/{n}"), |b| {
            b.iter(|| mean_score(black_box(&results)))
        });
        group.bench_function(format!("summarize/{n}"), |b| {
            b.iter(|| summarize(black_box(&results), black_box(2)))
        });
    }

    group.finish();
}

fn bench_unlock_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("unlock_check");

    let lines: Vec<String> = make_results(10_000).iter().map(ScoreRecord::encode).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let store = MemoryStore::new().with_lines(Collection::Results, &refs);
    let ledger = ProgressLedger::new(Arc::new(store));

    group.bench_function("has_qualifying_prior_score/10000", |b| {
        b.iter(|| ledger.has_qualifying_prior_score(black_box("student7")))
    });

    group.finish();
}

criterion_group!(benches, bench_aggregates, bench_unlock_check);
criterion_main!(benches);
