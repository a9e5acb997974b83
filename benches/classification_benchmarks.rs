//! Performance benchmarks for the Leave Engine.
//!
//! This benchmark suite covers the day classifier on its own and the
//! timesheet endpoint end to end:
//! - Classifying a full year with a handful of leave spans
//! - Scaling with the number of overlapping leave spans
//! - GET /employees/timesheet for a month and for a year
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use leave_engine::api::{AppState, create_router};
use leave_engine::calculation::{LeaveSpan, classify_days};
use leave_engine::clock::FixedClock;
use leave_engine::config::ConfigLoader;
use leave_engine::models::{Holiday, LeavePolicy};
use leave_engine::service::LeaveService;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Loads the default configuration with the clock pinned to 2024-03-01.
fn create_test_state() -> (AppState, ConfigLoader) {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let clock = Arc::new(FixedClock(date("2024-03-01")));
    let service = LeaveService::new(Arc::new(config.in_memory_store()), clock);
    let state = AppState::new(service, config.settings().session.default_employee_id);
    (state, config)
}

/// Builds `count` one-week spans starting every other Monday of 2024,
/// cycling through the configured policies.
fn create_spans(policies: &[LeavePolicy], count: usize) -> Vec<LeaveSpan> {
    let first_monday = date("2024-01-08");
    (0..count)
        .map(|i| {
            let start_date = first_monday + Days::new(14 * (i as u64 % 26));
            LeaveSpan {
                start_date,
                end_date: start_date + Days::new(4),
                policy: policies[i % policies.len()].clone(),
            }
        })
        .collect()
}

/// Benchmark: Classify every day of 2024.
fn bench_classify_year(c: &mut Criterion) {
    let (_, config) = create_test_state();
    let spans = create_spans(config.leave_policies(), 8);
    let holidays: Vec<Holiday> = config.holidays().to_vec();
    let (start, end) = (date("2024-01-01"), date("2024-12-31"));

    c.bench_function("classify_year", |b| {
        b.iter(|| {
            black_box(classify_days(
                black_box(start),
                black_box(end),
                &spans,
                &holidays,
            ))
        })
    });
}

/// Benchmark: Classification cost as leave spans pile up.
fn bench_span_scaling(c: &mut Criterion) {
    let (_, config) = create_test_state();
    let holidays: Vec<Holiday> = config.holidays().to_vec();
    let (start, end) = (date("2024-01-01"), date("2024-12-31"));

    let mut group = c.benchmark_group("span_scaling");

    for span_count in [0, 4, 16, 64].iter() {
        let spans = create_spans(config.leave_policies(), *span_count);

        group.throughput(Throughput::Elements(366));
        group.bench_with_input(BenchmarkId::new("spans", span_count), span_count, |b, _| {
            b.iter(|| black_box(classify_days(start, end, &spans, &holidays)))
        });
    }

    group.finish();
}

/// Benchmark: GET /employees/timesheet over a month and a year.
fn bench_timesheet_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (state, _) = create_test_state();
    let router = create_router(state);

    let mut group = c.benchmark_group("timesheet_endpoint");

    for (label, end_date) in [("month", "2024-03-31"), ("year", "2025-02-28")] {
        let uri = format!(
            "/employees/timesheet?start_date=2024-03-01&end_date={}",
            end_date
        );

        group.bench_function(label, |b| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(Request::builder().uri(uri.as_str()).body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify_year,
    bench_span_scaling,
    bench_timesheet_endpoint,
);
criterion_main!(benches);
