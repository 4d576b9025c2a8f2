// Core algorithm exports
pub mod dates;
pub mod diagnostics;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use dates::{covers, expand_window, overlap_days, window_days};
pub use diagnostics::{build_recommendations, identify_gaps, MAX_RECOMMENDATIONS};
pub use matcher::{AlternativeMatch, MatchOutcome, MatchReport, PackageMatcher, MIN_VIABLE_SCORE};
pub use scoring::{
    calculate_package_score, score_activities, score_budget, score_dates, score_destination,
    score_group_size,
};
