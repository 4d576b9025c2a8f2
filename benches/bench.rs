// Criterion benchmarks for Sentra Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use sentra_match::core::scoring::{calculate_package_score, score_dates, score_destination};
use sentra_match::core::{normalize, PackageMatcher};
use sentra_match::models::{
    DateFlexibility, DateWindow, PackageCandidate, PackageDocument, ScoringWeights,
    TripRequirement,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_trip() -> TripRequirement {
    TripRequirement {
        destinations: vec!["singapore".to_string(), "kuala lumpur".to_string()],
        window: Some(DateWindow::new(date(2025, 6, 1), date(2025, 6, 10))),
        flexibility: DateFlexibility::WithinWeek,
        group_size: 4,
        budget: Some(8000.0),
        activities: vec!["city tour".to_string(), "snorkeling".to_string()],
    }
}

fn create_candidate(i: usize) -> PackageCandidate {
    let cities = ["singapore", "kuala lumpur", "bangkok", "penang", "phuket"];
    PackageCandidate {
        name: format!("STD-PKG-{:04}", i),
        package_name: format!("Catalog Entry {}", i),
        destinations: vec![cities[i % cities.len()].to_string()],
        validity: Some(DateWindow::new(
            date(2025, 4 + (i % 3) as u32, 1),
            date(2025, 7 + (i % 4) as u32, 28),
        )),
        min_group_size: 1 + (i % 4) as u32,
        max_group_size: 6 + (i % 10) as u32,
        unit_price: Some(500.0 + (i as f64) * 100.0),
        activities: vec!["city tour".to_string(), "river cruise".to_string()],
    }
}

fn bench_score_destination(c: &mut Criterion) {
    let requested = vec!["singapore".to_string(), "kuala lumpur".to_string()];
    let offered = vec![
        "singapore".to_string(),
        "penang".to_string(),
        "phuket".to_string(),
    ];

    c.bench_function("score_destination", |b| {
        b.iter(|| score_destination(black_box(&requested), black_box(&offered)));
    });
}

fn bench_score_dates(c: &mut Criterion) {
    let window = DateWindow::new(date(2025, 6, 1), date(2025, 6, 10));
    let validity = DateWindow::new(date(2025, 6, 5), date(2025, 6, 20));

    c.bench_function("score_dates", |b| {
        b.iter(|| {
            score_dates(
                black_box(Some(&window)),
                black_box(DateFlexibility::WithinWeek),
                black_box(Some(&validity)),
            )
        });
    });
}

fn bench_package_score(c: &mut Criterion) {
    let trip = create_trip();
    let package = create_candidate(0);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_package_score", |b| {
        b.iter(|| {
            calculate_package_score(
                black_box(&trip),
                black_box(&package),
                black_box(&weights),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = PackageMatcher::with_default_weights();
    let trip = create_trip();

    let mut group = c.benchmark_group("matching");

    for catalog_size in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<PackageCandidate> =
            (0..*catalog_size).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("match_trip", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| {
                    matcher.match_trip(
                        black_box(&trip),
                        black_box(candidates.clone()),
                        black_box(&[]),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let documents: Vec<PackageDocument> = (0..100)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "name": format!("STD-PKG-{:04}", i),
                "package_name": format!("Catalog Entry {}", i),
                "status": "Active",
                "valid_from": "2025-05-01",
                "valid_to": "2025-09-30",
                "min_group_size": 2,
                "max_group_size": 12,
                "base_cost": 1200.0,
                "destinations": [{"destination": "Singapore"}, {"destination": "Penang"}],
                "activities": [{"activity": "City Tour"}],
                "itinerary_data":
                    "[{\"day\": 1, \"destination\": \"Sentosa\", \"activities\": [\"Snorkeling\"]}]"
            }))
            .unwrap()
        })
        .collect();

    c.bench_function("normalize_catalog_100_documents", |b| {
        b.iter(|| {
            let candidates: Vec<PackageCandidate> = documents
                .iter()
                .map(normalize::package_candidate)
                .collect();
            black_box(candidates)
        });
    });
}

criterion_group!(
    benches,
    bench_score_destination,
    bench_score_dates,
    bench_package_score,
    bench_matching,
    bench_normalization
);

criterion_main!(benches);
