//! Serde shapes of the raw CRM documents.
//!
//! These mirror the Frappe doctypes as they arrive over the REST API.
//! Parsing is deliberately forgiving: missing or blank fields become
//! `None`, malformed dates are dropped rather than failing the whole
//! document, and unknown keys are ignored. Normalization into the
//! scoring value types happens in [`crate::core::normalize`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A `Trip` document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    /// Flexibility label, e.g. "Exact dates" or "Fully flexible"
    #[serde(default)]
    pub flexible_days: Option<String>,
    #[serde(default)]
    pub pax: Option<i64>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub destination_city: Vec<DestinationRow>,
    #[serde(default)]
    pub activity: Vec<ActivityRow>,
    #[serde(default)]
    pub passenger_details: Vec<PassengerRow>,
}

/// A `Standard Package` document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub package_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub valid_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub min_group_size: Option<i64>,
    #[serde(default)]
    pub max_group_size: Option<i64>,
    #[serde(default)]
    pub base_cost: Option<f64>,
    #[serde(default)]
    pub net_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub dmc: Option<String>,
    #[serde(default)]
    pub hotel: Option<String>,
    #[serde(default)]
    pub no_of_days: Option<i64>,
    #[serde(default)]
    pub no_of_nights: Option<i64>,
    #[serde(default)]
    pub destinations: Vec<DestinationRow>,
    #[serde(default)]
    pub activities: Vec<ActivityRow>,
    /// Day-wise itinerary; either a JSON array or a JSON-encoded string
    #[serde(default)]
    pub itinerary_data: Option<ItineraryData>,
}

/// Child-table row naming a destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRow {
    #[serde(default)]
    pub destination: String,
}

/// Child-table row naming an activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRow {
    #[serde(default)]
    pub activity: String,
}

/// Child-table row for one traveler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerRow {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// The `itinerary_data` field as stored by the CRM.
///
/// Older documents hold the day list doubly encoded as a JSON string;
/// newer ones hold the array directly. Anything else is carried as an
/// opaque value and ignored during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItineraryData {
    Days(Vec<ItineraryDay>),
    Encoded(String),
    Other(serde_json::Value),
}

/// One day of a package itinerary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItineraryDay {
    #[serde(default)]
    pub day: Option<i64>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Legacy single-activity field
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
}

/// Itinerary activity entry; plain string or `{ "name": ... }` object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityEntry {
    Name(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

impl ActivityEntry {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Detailed { name } => name.as_deref(),
            Self::Other(_) => None,
        }
    }
}

/// Accepts `YYYY-MM-DD`, treating null, blank, or malformed values as
/// absent so one bad field never sinks the document.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_document_tolerates_blank_and_bad_dates() {
        let doc: TripDocument = serde_json::from_str(
            r#"{"name": "TRIP-0001", "start_date": "", "end_date": "not-a-date"}"#,
        )
        .unwrap();
        assert_eq!(doc.start_date, None);
        assert_eq!(doc.end_date, None);
    }

    #[test]
    fn package_document_parses_dates_and_children() {
        let doc: PackageDocument = serde_json::from_str(
            r#"{
                "name": "STD-PKG-0001",
                "package_name": "Bali Explorer",
                "valid_from": "2025-01-01",
                "valid_to": "2025-12-31",
                "destinations": [{"destination": "Bali"}],
                "activities": [{"activity": "Surfing"}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            doc.valid_from,
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(doc.destinations.len(), 1);
        assert_eq!(doc.activities[0].activity, "Surfing");
    }

    #[test]
    fn itinerary_data_accepts_array_and_encoded_string() {
        let array: ItineraryData =
            serde_json::from_str(r#"[{"day": 1, "destination": "Ubud", "activities": ["Temple tour"]}]"#)
                .unwrap();
        assert!(matches!(array, ItineraryData::Days(ref days) if days.len() == 1));

        let encoded: ItineraryData =
            serde_json::from_str(r#""[{\"day\": 1, \"destination\": \"Ubud\"}]""#).unwrap();
        assert!(matches!(encoded, ItineraryData::Encoded(_)));
    }

    #[test]
    fn itinerary_activity_entries_take_both_shapes() {
        let day: ItineraryDay = serde_json::from_str(
            r#"{"activities": ["Snorkeling", {"name": "Beach BBQ"}, {"time": "18:00"}, 42]}"#,
        )
        .unwrap();
        let names: Vec<_> = day.activities.iter().filter_map(ActivityEntry::name).collect();
        assert_eq!(names, vec!["Snorkeling", "Beach BBQ"]);
    }

    #[test]
    fn unexpected_itinerary_shape_is_preserved_as_other() {
        let odd: ItineraryData = serde_json::from_str(r#"{"days": []}"#).unwrap();
        assert!(matches!(odd, ItineraryData::Other(_)));
    }
}
