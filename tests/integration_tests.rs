// Integration tests for Sentra Match

use sentra_match::core::normalize;
use sentra_match::core::{MatchOutcome, PackageMatcher, MIN_VIABLE_SCORE};
use sentra_match::models::{
    DateFlexibility, DateWindow, PackageCandidate, PackageDocument, TripDocument, TripRequirement,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn create_test_trip() -> TripRequirement {
    TripRequirement {
        destinations: strings(&["singapore", "kuala lumpur"]),
        window: Some(DateWindow::new(date(2025, 6, 1), date(2025, 6, 10))),
        flexibility: DateFlexibility::WithinWeek,
        group_size: 4,
        budget: Some(8000.0),
        activities: strings(&["city tour", "snorkeling"]),
    }
}

#[allow(clippy::too_many_arguments)]
fn create_test_package(
    name: &str,
    display: &str,
    destinations: &[&str],
    validity: Option<DateWindow>,
    min_group: u32,
    max_group: u32,
    unit_price: f64,
    activities: &[&str],
) -> PackageCandidate {
    PackageCandidate {
        name: name.to_string(),
        package_name: display.to_string(),
        destinations: strings(destinations),
        validity,
        min_group_size: min_group,
        max_group_size: max_group,
        unit_price: Some(unit_price),
        activities: strings(activities),
    }
}

fn create_test_catalog() -> Vec<PackageCandidate> {
    vec![
        // Covers everything the trip asks for
        create_test_package(
            "STD-PKG-0001",
            "Twin City Explorer",
            &["singapore", "kuala lumpur"],
            Some(DateWindow::new(date(2025, 5, 1), date(2025, 8, 31))),
            1,
            10,
            1500.0,
            &["guided city tour", "snorkeling trip"],
        ),
        // Half the destinations, late validity, off-budget
        create_test_package(
            "STD-PKG-0002",
            "Singapore Sampler",
            &["singapore"],
            Some(DateWindow::new(date(2025, 6, 5), date(2025, 6, 20))),
            5,
            20,
            2500.0,
            &["city tour"],
        ),
        // Wrong destination entirely
        create_test_package(
            "STD-PKG-0003",
            "Bangkok Break",
            &["bangkok"],
            Some(DateWindow::new(date(2025, 5, 1), date(2025, 8, 31))),
            1,
            10,
            800.0,
            &[],
        ),
    ]
}

#[test]
fn test_integration_end_to_end_catalog_analysis() {
    let matcher = PackageMatcher::with_default_weights();
    let trip = create_test_trip();

    let outcome = matcher.match_trip(&trip, create_test_catalog(), &[]);

    let report = match outcome {
        MatchOutcome::Matched(report) => report,
        other => panic!("expected a match, got {:?}", other),
    };

    assert_eq!(report.package.name, "STD-PKG-0001");
    assert!((report.total_score - 100.0).abs() < 1e-9);
    assert!(!report.destination_mismatch);

    // Runner-ups in rank order with their exact totals
    assert_eq!(report.alternatives.len(), 2);
    assert_eq!(report.alternatives[0].name, "STD-PKG-0002");
    assert!((report.alternatives[0].total_score - 49.0).abs() < 1e-9);
    assert_eq!(report.alternatives[1].name, "STD-PKG-0003");
    assert!((report.alternatives[1].total_score - 46.0).abs() < 1e-9);

    // Gap summaries call out each alternative's weak criteria
    assert_eq!(report.alternatives[0].gaps, vec!["budget: 10% match"]);
    assert_eq!(
        report.alternatives[1].gaps,
        vec!["destination: 0% match", "activities: 0% match"]
    );
}

#[test]
fn test_integration_raw_documents_to_outcome() {
    // The inline-scoring path: raw CRM documents in, outcome out
    let trip_doc: TripDocument = serde_json::from_value(serde_json::json!({
        "name": "TRIP-0042",
        "start_date": "2025-06-01",
        "end_date": "2025-06-10",
        "flexible_days": "Within the week",
        "budget": 8000.0,
        "destination_city": [{"destination": "Singapore"}, {"destination": "Kuala Lumpur"}],
        "activity": [{"activity": "City Tour"}],
        "passenger_details": [
            {"full_name": "Ana"}, {"full_name": "Ben"},
            {"full_name": "Cho"}, {"full_name": "Dee"}
        ]
    }))
    .unwrap();

    let package_docs: Vec<PackageDocument> = serde_json::from_value(serde_json::json!([
        {
            "name": "STD-PKG-0001",
            "package_name": "Twin City Explorer",
            "status": "Active",
            "valid_from": "2025-05-01",
            "valid_to": "2025-08-31",
            "min_group_size": 1,
            "max_group_size": 10,
            "base_cost": 1500.0,
            "destinations": [{"destination": "Singapore"}, {"destination": "Kuala Lumpur"}],
            "activities": [{"activity": "Guided City Tour"}]
        },
        {
            "name": "STD-PKG-0003",
            "package_name": "Bangkok Break",
            "status": "Active",
            "valid_from": "2025-05-01",
            "valid_to": "2025-08-31",
            "base_cost": 800.0,
            "destinations": [{"destination": "Bangkok"}]
        }
    ]))
    .unwrap();

    let trip = normalize::trip_requirement(&trip_doc);
    assert_eq!(trip.group_size, 4);

    let candidates: Vec<PackageCandidate> =
        package_docs.iter().map(normalize::package_candidate).collect();

    let matcher = PackageMatcher::with_default_weights();
    match matcher.match_trip(&trip, candidates, &[]) {
        MatchOutcome::Matched(report) => {
            assert_eq!(report.package.name, "STD-PKG-0001");
            assert!(!report.destination_mismatch);
            assert!(report.total_score > 90.0);
        }
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_integration_destination_mismatch() {
    let matcher = PackageMatcher::with_default_weights();
    let mut trip = create_test_trip();
    trip.destinations = strings(&["paris"]);

    match matcher.match_trip(&trip, create_test_catalog(), &[]) {
        MatchOutcome::NoViableMatch {
            message,
            destination_mismatch,
            diagnostics,
        } => {
            assert_eq!(message, "No suitable package found for the trip requirements");
            assert!(destination_mismatch);
            assert!(diagnostics.len() <= 3);
            assert!(diagnostics
                .iter()
                .all(|d| d.breakdown.destination.raw_score == 0.0));
        }
        other => panic!("expected no-viable-match, got {:?}", other),
    }
}

#[test]
fn test_integration_empty_catalog() {
    let matcher = PackageMatcher::with_default_weights();

    match matcher.match_trip(&create_test_trip(), vec![], &[]) {
        MatchOutcome::NoPackages { message } => {
            assert_eq!(message, "No active standard packages found");
        }
        other => panic!("expected no-packages, got {:?}", other),
    }
}

#[test]
fn test_integration_below_threshold_rejection() {
    let matcher = PackageMatcher::with_default_weights();

    // Trip with no destination requirement, so the filter stays off
    // and only the threshold can reject
    let trip = TripRequirement {
        destinations: vec![],
        window: Some(DateWindow::new(date(2025, 6, 1), date(2025, 6, 10))),
        flexibility: DateFlexibility::Exact,
        group_size: 30,
        budget: Some(1000.0),
        activities: strings(&["diving"]),
    };

    // Wrong dates, capacity blown by 20, far over budget
    let weak = create_test_package(
        "STD-PKG-0009",
        "Boutique Escape",
        &["tokyo"],
        Some(DateWindow::new(date(2025, 12, 1), date(2025, 12, 31))),
        2,
        10,
        5000.0,
        &["wine tasting"],
    );

    match matcher.match_trip(&trip, vec![weak], &[]) {
        MatchOutcome::NoViableMatch {
            destination_mismatch,
            diagnostics,
            ..
        } => {
            assert!(!destination_mismatch);
            assert_eq!(diagnostics.len(), 1);
            assert!(diagnostics[0].total_score < MIN_VIABLE_SCORE);
        }
        other => panic!("expected no-viable-match, got {:?}", other),
    }
}

#[test]
fn test_integration_recommendations_order_dedup_cap() {
    let matcher = PackageMatcher::with_default_weights();
    let trip = create_test_trip();

    // Perfect on destination, dates, and group; silent on activities
    // and 50% over budget
    let package = create_test_package(
        "STD-PKG-0004",
        "Premium Twin City",
        &["singapore", "kuala lumpur"],
        Some(DateWindow::new(date(2025, 5, 1), date(2025, 8, 31))),
        1,
        10,
        3000.0,
        &[],
    );

    let advisor = strings(&[
        "Upsell the spa day",
        "Upsell the spa day",
        "Offer premium transfers",
        "Split the group across departures",
    ]);

    match matcher.match_trip(&trip, vec![package], &advisor) {
        MatchOutcome::Matched(report) => {
            // Advisor entries deduplicate, then remediation messages
            // fill up to the cap of five
            assert_eq!(report.recommendations.len(), 5);
            assert_eq!(report.recommendations[0], "Upsell the spa day");
            assert_eq!(report.recommendations[1], "Offer premium transfers");
            assert_eq!(report.recommendations[2], "Split the group across departures");
            assert_eq!(
                report.recommendations[3],
                "Add custom activities to meet specific requirements"
            );
            assert_eq!(
                report.recommendations[4],
                "Discuss budget adjustments or consider package modifications"
            );
        }
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_integration_scores_sorted_and_in_range() {
    let matcher = PackageMatcher::with_default_weights();
    let trip = create_test_trip();

    let cities = ["singapore", "kuala lumpur", "bangkok", "penang", "phuket"];
    let candidates: Vec<PackageCandidate> = (0..50)
        .map(|i| {
            let validity = if i % 7 == 0 {
                None
            } else {
                Some(DateWindow::new(
                    date(2025, 4 + (i % 3) as u32, 1),
                    date(2025, 7 + (i % 4) as u32, 28),
                ))
            };
            create_test_package(
                &format!("STD-PKG-{:04}", i),
                &format!("Catalog Entry {}", i),
                &[cities[i % cities.len()]],
                validity,
                1 + (i % 4) as u32,
                6 + (i % 10) as u32,
                500.0 + (i as f64) * 100.0,
                &["city tour"],
            )
        })
        .collect();

    let ranked = matcher.rank_packages(&trip, candidates);

    assert_eq!(ranked.len(), 50);
    for entry in &ranked {
        assert!(
            (0.0..=100.0).contains(&entry.total_score),
            "score {} out of range",
            entry.total_score
        );
    }
    for pair in ranked.windows(2) {
        assert!(
            pair[0].total_score >= pair[1].total_score,
            "ranking not sorted by score"
        );
    }
}
