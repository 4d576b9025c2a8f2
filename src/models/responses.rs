use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{PackageCandidate, RankedPackage, ScoreBreakdown, ScoringWeights};
use crate::models::records::PackageDocument;

/// Successful analysis: a package was selected for the trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysisResponse {
    pub success: bool,
    pub selected_package: SelectedPackage,
    pub match_score: f64,
    pub match_score_breakdown: ScoreBreakdown,
    pub destination_mismatch_warning: bool,
    pub alternative_packages: Vec<AlternativePackage>,
    pub recommendations: Vec<String>,
}

/// Commercial details of the selected package, echoed from the CRM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedPackage {
    pub name: String,
    pub package_name: String,
    pub package_code: Option<String>,
    pub description: Option<String>,
    pub base_cost: Option<f64>,
    pub currency: Option<String>,
    pub dmc: Option<String>,
    pub hotel_category: Option<String>,
    pub no_of_days: Option<i64>,
    pub no_of_nights: Option<i64>,
}

impl SelectedPackage {
    /// Builds the wire shape from the scored candidate plus the raw
    /// document it was normalized from, when still at hand.
    pub fn build(candidate: &PackageCandidate, document: Option<&PackageDocument>) -> Self {
        match document {
            Some(doc) => Self {
                name: doc.name.clone(),
                package_name: doc.package_name.clone(),
                package_code: doc.package_code.clone(),
                description: doc.description.clone(),
                base_cost: doc.base_cost,
                currency: doc.currency.clone(),
                dmc: doc.dmc.clone(),
                hotel_category: doc.hotel.clone(),
                no_of_days: doc.no_of_days,
                no_of_nights: doc.no_of_nights,
            },
            None => Self {
                name: candidate.name.clone(),
                package_name: candidate.package_name.clone(),
                package_code: None,
                description: None,
                base_cost: None,
                currency: None,
                dmc: None,
                hotel_category: None,
                no_of_days: None,
                no_of_nights: None,
            },
        }
    }
}

/// Runner-up package with its score and weakest criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativePackage {
    pub name: String,
    pub package_name: String,
    pub score: f64,
    pub main_gaps: Vec<String>,
}

/// Analysis that ended without a viable package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoMatchResponse {
    pub success: bool,
    pub message: String,
    pub destination_mismatch_warning: bool,
    /// Top-ranked candidates with full breakdowns, for diagnosis
    pub all_scores: Vec<DiagnosticScore>,
}

/// Scored candidate as shown in no-match diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticScore {
    pub name: String,
    pub package_name: String,
    pub total_score: f64,
    pub score_breakdown: ScoreBreakdown,
}

impl From<&RankedPackage> for DiagnosticScore {
    fn from(ranked: &RankedPackage) -> Self {
        Self {
            name: ranked.package.name.clone(),
            package_name: ranked.package.package_name.clone(),
            total_score: ranked.total_score,
            score_breakdown: ranked.breakdown.clone(),
        }
    }
}

/// One persisted analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub id: Uuid,
    pub package_name: Option<String>,
    pub total_score: Option<f64>,
    pub destination_mismatch: bool,
    pub breakdown: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Response for the analysis history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub trip_name: String,
    pub analyses: Vec<AnalysisEntry>,
    pub count: usize,
}

/// Response for the scoring weights endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResponse {
    pub weights: ScoringWeights,
    pub max_score: f64,
    pub min_viable_score: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
