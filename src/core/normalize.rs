//! One-shot normalization of raw CRM documents into scoring inputs.
//!
//! All field fallbacks live here: blank and duplicate names are
//! dropped, text is lowercased, zero-or-negative numerics count as
//! unset, and the nested itinerary is mined for destination and
//! activity names. The scorers downstream never see a raw document.

use chrono::NaiveDate;

use crate::models::records::{ActivityEntry, ItineraryData, ItineraryDay, PackageDocument, TripDocument};
use crate::models::{DateFlexibility, DateWindow, PackageCandidate, TripRequirement};

/// Extract the comparable requirements from a trip document.
///
/// Group size prefers the passenger list length and falls back to the
/// stated pax count; neither present means zero (unspecified).
pub fn trip_requirement(doc: &TripDocument) -> TripRequirement {
    let group_size = if !doc.passenger_details.is_empty() {
        doc.passenger_details.len() as u32
    } else {
        positive_count(doc.pax).unwrap_or(0)
    };

    TripRequirement {
        destinations: collect_unique(doc.destination_city.iter().map(|row| row.destination.as_str())),
        window: fold_window(doc.start_date, doc.end_date),
        flexibility: DateFlexibility::parse(doc.flexible_days.as_deref()),
        group_size,
        budget: positive(doc.budget),
        activities: collect_unique(doc.activity.iter().map(|row| row.activity.as_str())),
    }
}

/// Extract the scorable offering from a package document.
///
/// Destinations take the structured rows first, then any named in
/// itinerary days. Activities are mined from itinerary day entries,
/// whole day descriptions, and the legacy per-day activity field,
/// then the structured rows. The per-person price prefers base_cost
/// over net_price, ignoring non-positive values.
pub fn package_candidate(doc: &PackageDocument) -> PackageCandidate {
    let days = itinerary_days(doc.itinerary_data.as_ref());

    let mut destinations: Vec<String> = Vec::new();
    push_unique_all(
        &mut destinations,
        doc.destinations.iter().map(|row| row.destination.as_str()),
    );
    push_unique_all(
        &mut destinations,
        days.iter().filter_map(|day| day.destination.as_deref()),
    );

    let mut activities: Vec<String> = Vec::new();
    for day in &days {
        push_unique_all(
            &mut activities,
            day.activities.iter().filter_map(ActivityEntry::name),
        );
        if let Some(description) = day.description.as_deref() {
            push_unique(&mut activities, description);
        }
        if let Some(activity) = day.activity.as_deref() {
            push_unique(&mut activities, activity);
        }
    }
    push_unique_all(
        &mut activities,
        doc.activities.iter().map(|row| row.activity.as_str()),
    );

    PackageCandidate {
        name: doc.name.clone(),
        package_name: doc.package_name.clone(),
        destinations,
        validity: fold_window(doc.valid_from, doc.valid_to),
        min_group_size: positive_count(doc.min_group_size).unwrap_or(1),
        max_group_size: positive_count(doc.max_group_size).unwrap_or(999),
        unit_price: positive(doc.base_cost).or(positive(doc.net_price)),
        activities,
    }
}

/// Decode the itinerary day list, whichever encoding the document uses
fn itinerary_days(data: Option<&ItineraryData>) -> Vec<ItineraryDay> {
    match data {
        Some(ItineraryData::Days(days)) => days.clone(),
        Some(ItineraryData::Encoded(raw)) => match serde_json::from_str::<Vec<ItineraryDay>>(raw) {
            Ok(days) => days,
            Err(err) => {
                tracing::debug!("Ignoring undecodable itinerary_data: {}", err);
                Vec::new()
            }
        },
        Some(ItineraryData::Other(_)) | None => Vec::new(),
    }
}

fn fold_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<DateWindow> {
    match (start, end) {
        (Some(start), Some(end)) => Some(DateWindow { start, end }),
        _ => None,
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Positive integer or nothing; zero and negatives count as unset
fn positive_count(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

fn push_unique(values: &mut Vec<String>, raw: &str) {
    let cleaned = raw.trim().to_lowercase();
    if !cleaned.is_empty() && !values.contains(&cleaned) {
        values.push(cleaned);
    }
}

fn push_unique_all<'a>(values: &mut Vec<String>, raw: impl Iterator<Item = &'a str>) {
    for item in raw {
        push_unique(values, item);
    }
}

fn collect_unique<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut values = Vec::new();
    push_unique_all(&mut values, raw);
    values
}
