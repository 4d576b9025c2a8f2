//! Sentra Match - Package matching service for the Sentra travel CRM
//!
//! This library scores a trip's requirements against the active package
//! catalog on five weighted criteria and selects the best viable
//! package, with alternatives and advisory recommendations attached.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, MatchOutcome, MatchReport, PackageMatcher, MIN_VIABLE_SCORE};
pub use crate::models::{
    DateFlexibility, DateWindow, PackageCandidate, PackageDocument, RankedPackage,
    ScoreBreakdown, ScoringWeights, TripDocument, TripRequirement,
};
