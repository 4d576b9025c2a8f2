use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How strictly a trip's travel dates must be honoured.
///
/// Parsed from the free-text flexibility label on the trip document.
/// Unknown labels fall back to [`DateFlexibility::Exact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFlexibility {
    Exact,
    WithinWeek,
    WithinMonth,
    FullyFlexible,
}

impl DateFlexibility {
    /// Parses the CRM label ("Exact dates", "Within the week", ...).
    pub fn parse(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("Within the week") => Self::WithinWeek,
            Some("Within the month") => Self::WithinMonth,
            Some("Fully flexible") => Self::FullyFlexible,
            _ => Self::Exact,
        }
    }

    /// Days the requested window may slide in either direction.
    ///
    /// [`DateFlexibility::FullyFlexible`] is handled before any window
    /// expansion, so it reports no slack here.
    pub fn slack_days(&self) -> i64 {
        match self {
            Self::WithinWeek => 3,
            Self::WithinMonth => 15,
            Self::Exact | Self::FullyFlexible => 0,
        }
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Normalized trip requirements extracted from a CRM trip document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequirement {
    /// Requested destinations, lowercased, in document order
    pub destinations: Vec<String>,
    /// Requested travel window; `None` when either date is missing
    pub window: Option<DateWindow>,
    pub flexibility: DateFlexibility,
    /// Traveler count; zero when the trip does not state one
    pub group_size: u32,
    /// Total trip budget; `None` when absent or non-positive
    pub budget: Option<f64>,
    /// Requested activities, lowercased, in document order
    pub activities: Vec<String>,
}

/// Normalized package offering extracted from a CRM package document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageCandidate {
    /// CRM document id
    pub name: String,
    /// Display name of the package
    pub package_name: String,
    /// Covered destinations, lowercased, structured rows first then
    /// itinerary-derived entries, deduplicated in first-seen order
    pub destinations: Vec<String>,
    /// Validity window; `None` when either bound is missing
    pub validity: Option<DateWindow>,
    /// Smallest bookable group; unset or zero in the CRM becomes 1
    pub min_group_size: u32,
    /// Largest bookable group; unset or zero in the CRM becomes 999
    pub max_group_size: u32,
    /// Per-person price; `None` when no positive price is on record
    pub unit_price: Option<f64>,
    /// Offered activities, lowercased, deduplicated in first-seen order
    pub activities: Vec<String>,
}

/// Per-criterion scoring weights. Each weight is the number of points
/// the criterion contributes at a perfect raw score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub destination: f64,
    pub dates: f64,
    pub activities: f64,
    pub group_size: f64,
    pub budget: f64,
}

impl ScoringWeights {
    /// Maximum attainable total score
    pub fn total(&self) -> f64 {
        self.destination + self.dates + self.activities + self.group_size + self.budget
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            destination: 30.0,
            dates: 25.0,
            activities: 20.0,
            group_size: 15.0,
            budget: 10.0,
        }
    }
}

/// Score of a single criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CriterionScore {
    /// Raw compatibility in [0.0, 1.0]
    pub raw_score: f64,
    /// Points available for this criterion
    pub weight: f64,
    /// Weighted points earned (`raw_score * weight`)
    pub score: f64,
    /// Raw compatibility as a percentage
    pub percentage: f64,
}

impl CriterionScore {
    pub fn new(raw_score: f64, weight: f64) -> Self {
        Self {
            raw_score,
            weight,
            score: raw_score * weight,
            percentage: raw_score * 100.0,
        }
    }
}

/// Full per-criterion breakdown of a package's match score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub destination: CriterionScore,
    pub dates: CriterionScore,
    pub activities: CriterionScore,
    pub group_size: CriterionScore,
    pub budget: CriterionScore,
}

impl ScoreBreakdown {
    /// Sum of the weighted criterion scores
    pub fn total_score(&self) -> f64 {
        self.destination.score
            + self.dates.score
            + self.activities.score
            + self.group_size.score
            + self.budget.score
    }

    /// Criteria in report order, labelled as they appear on the wire
    pub fn entries(&self) -> [(&'static str, &CriterionScore); 5] {
        [
            ("destination", &self.destination),
            ("dates", &self.dates),
            ("activities", &self.activities),
            ("group_size", &self.group_size),
            ("budget", &self.budget),
        ]
    }
}

/// A scored catalog package
#[derive(Debug, Clone, Serialize)]
pub struct RankedPackage {
    pub package: PackageCandidate,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
}
