use crate::core::diagnostics::{build_recommendations, identify_gaps};
use crate::core::scoring::calculate_package_score;
use crate::models::{PackageCandidate, RankedPackage, ScoreBreakdown, ScoringWeights, TripRequirement};

/// Minimum total score a package needs to be offered as the match
pub const MIN_VIABLE_SCORE: f64 = 10.0;

/// Maximum number of runner-up packages returned alongside the match
pub const MAX_ALTERNATIVES: usize = 3;

/// Maximum number of scored candidates surfaced when nothing matched
pub const MAX_DIAGNOSTICS: usize = 3;

/// Outcome of matching one trip against a package catalog
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// A package cleared every filter and the viability threshold
    Matched(MatchReport),
    /// Packages were scored but none was viable for this trip
    NoViableMatch {
        message: String,
        /// True when the trip names destinations and no candidate
        /// covers any of them
        destination_mismatch: bool,
        /// Top-ranked candidates with full breakdowns, for diagnosis
        diagnostics: Vec<RankedPackage>,
    },
    /// The catalog was empty; nothing was scored
    NoPackages { message: String },
}

/// Selected package with its score context and advisory output
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub package: PackageCandidate,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub destination_mismatch: bool,
    pub alternatives: Vec<AlternativeMatch>,
    pub recommendations: Vec<String>,
}

/// Runner-up package with its weakest criteria called out
#[derive(Debug, Clone)]
pub struct AlternativeMatch {
    pub name: String,
    pub package_name: String,
    pub total_score: f64,
    pub gaps: Vec<String>,
}

/// Main matching orchestrator - scores, ranks, filters, and selects
///
/// # Pipeline stages
/// 1. Score every candidate on the five criteria
/// 2. Rank by total score, catalog order breaking ties
/// 3. Destination-coverage filter (when the trip names destinations)
/// 4. Viability threshold on the selected package
/// 5. Alternatives, gap summaries, and recommendations
#[derive(Debug, Clone)]
pub struct PackageMatcher {
    weights: ScoringWeights,
}

impl PackageMatcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score and rank a catalog against a trip's requirements.
    ///
    /// Candidates keep their catalog position on equal scores, so
    /// identical inputs always produce identical orderings.
    pub fn rank_packages(
        &self,
        trip: &TripRequirement,
        candidates: Vec<PackageCandidate>,
    ) -> Vec<RankedPackage> {
        let mut ranked: Vec<RankedPackage> = candidates
            .into_iter()
            .map(|package| {
                let (total_score, breakdown) =
                    calculate_package_score(trip, &package, &self.weights);
                RankedPackage {
                    package,
                    total_score,
                    breakdown,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (i, entry) in ranked.iter().take(3).enumerate() {
            tracing::debug!(
                "Rank {}: {} - score {:.1} (destination {:.0}%)",
                i + 1,
                entry.package.package_name,
                entry.total_score,
                entry.breakdown.destination.percentage
            );
        }

        ranked
    }

    /// Run the full pipeline and select a package for the trip.
    ///
    /// Never fails: an empty catalog, a destination nobody covers, or
    /// a sub-threshold best score each map to their own outcome
    /// variant with diagnostics attached. Inputs are never mutated.
    pub fn match_trip(
        &self,
        trip: &TripRequirement,
        candidates: Vec<PackageCandidate>,
        advisor_recommendations: &[String],
    ) -> MatchOutcome {
        if candidates.is_empty() {
            return MatchOutcome::NoPackages {
                message: "No active standard packages found".to_string(),
            };
        }

        let ranked = self.rank_packages(trip, candidates);

        // Destination-coverage filter: when the trip names cities, a
        // package covering none of them cannot be the primary pick
        let destination_required = !trip.destinations.is_empty();
        let selected_index = if destination_required {
            match ranked
                .iter()
                .position(|entry| entry.breakdown.destination.raw_score > 0.0)
            {
                Some(index) => index,
                None => {
                    tracing::warn!(
                        "No package covers any requested destination: {:?}",
                        trip.destinations
                    );
                    return MatchOutcome::NoViableMatch {
                        message: "No suitable package found for the trip requirements"
                            .to_string(),
                        destination_mismatch: true,
                        diagnostics: self.top_diagnostics(ranked),
                    };
                }
            }
        } else {
            0
        };

        if ranked[selected_index].total_score < MIN_VIABLE_SCORE {
            return MatchOutcome::NoViableMatch {
                message: "No suitable package found for the trip requirements".to_string(),
                destination_mismatch: false,
                diagnostics: self.top_diagnostics(ranked),
            };
        }

        let alternatives: Vec<AlternativeMatch> = ranked
            .iter()
            .enumerate()
            .filter(|(i, entry)| *i != selected_index && entry.total_score > MIN_VIABLE_SCORE)
            .take(MAX_ALTERNATIVES)
            .map(|(_, entry)| AlternativeMatch {
                name: entry.package.name.clone(),
                package_name: entry.package.package_name.clone(),
                total_score: entry.total_score,
                gaps: identify_gaps(&entry.breakdown),
            })
            .collect();

        let mut ranked = ranked;
        let best = ranked.swap_remove(selected_index);
        let destination_mismatch =
            destination_required && best.breakdown.destination.raw_score == 0.0;
        let recommendations = build_recommendations(advisor_recommendations, &best.breakdown);

        MatchOutcome::Matched(MatchReport {
            package: best.package,
            total_score: best.total_score,
            breakdown: best.breakdown,
            destination_mismatch,
            alternatives,
            recommendations,
        })
    }

    fn top_diagnostics(&self, ranked: Vec<RankedPackage>) -> Vec<RankedPackage> {
        ranked.into_iter().take(MAX_DIAGNOSTICS).collect()
    }
}

impl Default for PackageMatcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
