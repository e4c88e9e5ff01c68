use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sme_ledger::{
    domain::{SmeDraft, TransactionDraft},
    ledger::{project, LedgerStore},
    report::sme_csv_string,
    services::{SearchService, SummaryService},
};

fn build_sample_store(sme_count: usize, txn_count: usize) -> LedgerStore {
    let mut store = LedgerStore::new();
    for idx in 0..sme_count {
        let draft = SmeDraft::new(format!("Bench SME {idx}"), format!("Tool {}", idx % 12))
            .total_cost(500 + (idx % 50) * 10)
            .daily_rate(10);
        store.add_sme(&draft).expect("add sme");
    }

    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let draft = TransactionDraft::new(
            date.format("%Y-%m-%d").to_string(),
            format!("{:03}", idx % sme_count + 1),
            5.0 + (idx % 20) as f64,
            "Bench Collector",
        );
        store.append_transaction(&draft).expect("append");
    }
    store
}

fn bench_projection(c: &mut Criterion) {
    let store = build_sample_store(black_box(500), black_box(50_000));

    c.bench_function("project_500_smes_50k_txns", |b| {
        b.iter(|| {
            let projection = project(store.smes(), store.transactions());
            black_box(projection);
        })
    });

    c.bench_function("dashboard_summary", |b| {
        b.iter_batched(
            || store.project(),
            |projection| black_box(SummaryService::dashboard(&projection)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_reports(c: &mut Criterion) {
    let store = build_sample_store(black_box(500), black_box(50_000));
    let projection = store.project();

    c.bench_function("search_transactions", |b| {
        b.iter(|| {
            let hits = SearchService::search_transactions(&store, "sme 42");
            black_box(hits.len());
        })
    });

    c.bench_function("csv_export_500", |b| {
        b.iter(|| {
            let csv = sme_csv_string(&projection).expect("csv");
            black_box(csv);
        })
    });
}

criterion_group!(benches, bench_projection, bench_reports);
criterion_main!(benches);
