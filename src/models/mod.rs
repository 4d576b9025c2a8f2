// Model exports
pub mod domain;
pub mod records;
pub mod requests;
pub mod responses;

pub use domain::{
    CriterionScore, DateFlexibility, DateWindow, PackageCandidate, RankedPackage, ScoreBreakdown,
    ScoringWeights, TripRequirement,
};
pub use records::{ItineraryData, ItineraryDay, PackageDocument, TripDocument};
pub use requests::{AnalyzeTripRequest, HistoryQuery, ScoreCatalogRequest};
pub use responses::{
    AlternativePackage, AnalysisEntry, DiagnosticScore, ErrorResponse, HealthResponse,
    HistoryResponse, MatchAnalysisResponse, NoMatchResponse, SelectedPackage, WeightsResponse,
};
