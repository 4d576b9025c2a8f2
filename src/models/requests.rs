use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::records::{PackageDocument, TripDocument};

/// Request to analyze a trip against the active package catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeTripRequest {
    /// CRM document id of the trip
    #[validate(length(min = 1))]
    #[serde(alias = "tripName")]
    pub trip_name: String,
    /// Advisor recommendations to surface ahead of the rule-based ones
    #[serde(default, alias = "aiRecommendations")]
    pub ai_recommendations: Vec<String>,
    /// Skip the cached catalog and refetch from the CRM
    #[serde(default, alias = "refreshCatalog")]
    pub refresh_catalog: bool,
}

/// Request to score an inline catalog without touching the CRM
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreCatalogRequest {
    pub trip: TripDocument,
    #[serde(default)]
    pub packages: Vec<PackageDocument>,
    #[serde(default, alias = "aiRecommendations")]
    pub ai_recommendations: Vec<String>,
}

/// Query parameters for the analysis history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "tripName")]
    pub trip_name: String,
    pub limit: Option<u16>,
}
