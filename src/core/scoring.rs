use crate::core::dates::{covers, expand_window, overlap_days, window_days};
use crate::models::{
    CriterionScore, DateFlexibility, DateWindow, PackageCandidate, ScoreBreakdown, ScoringWeights,
    TripRequirement,
};

/// Calculate a match score (0-100) for a package against a trip's requirements
///
/// Scoring formula:
/// total = (
///     destination_score * 30 +     # fraction of requested cities covered
///     date_score * 25 +            # validity window vs. travel window
///     activity_score * 20 +        # requested activities on offer
///     group_size_score * 15 +      # group fits the bookable range
///     budget_score * 10            # group cost vs. stated budget
/// )
pub fn calculate_package_score(
    trip: &TripRequirement,
    package: &PackageCandidate,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let destination = CriterionScore::new(
        score_destination(&trip.destinations, &package.destinations),
        weights.destination,
    );

    let dates = CriterionScore::new(
        score_dates(
            trip.window.as_ref(),
            trip.flexibility,
            package.validity.as_ref(),
        ),
        weights.dates,
    );

    let activities = CriterionScore::new(
        score_activities(&trip.activities, &package.activities),
        weights.activities,
    );

    let group_size = CriterionScore::new(
        score_group_size(trip.group_size, package.min_group_size, package.max_group_size),
        weights.group_size,
    );

    let budget = CriterionScore::new(
        score_budget(trip.budget, package.unit_price, trip.group_size),
        weights.budget,
    );

    let breakdown = ScoreBreakdown {
        destination,
        dates,
        activities,
        group_size,
        budget,
    };

    (breakdown.total_score(), breakdown)
}

/// Fraction of requested destinations the package covers (0-1)
///
/// Strict membership against the package's destination set; offering
/// extra cities earns nothing. A trip with no destinations has no
/// basis for matching and scores 0, as does a package listing none.
pub fn score_destination(requested: &[String], offered: &[String]) -> f64 {
    if requested.is_empty() || offered.is_empty() {
        return 0.0;
    }

    let matched = requested
        .iter()
        .filter(|city| offered.iter().any(|o| o == *city))
        .count();

    matched as f64 / requested.len() as f64
}

/// Date compatibility between the travel window and package validity (0-1)
///
/// The requested window is widened per the trip's flexibility before
/// comparison. Full coverage scores 1.0; a partial overlap scores the
/// covered share of the requested days, capped at 1.0. Either window
/// missing is neutral (0.5), overlap with an inverted request is 0.
pub fn score_dates(
    window: Option<&DateWindow>,
    flexibility: DateFlexibility,
    validity: Option<&DateWindow>,
) -> f64 {
    let (window, validity) = match (window, validity) {
        (Some(w), Some(v)) => (w, v),
        _ => return 0.5,
    };

    // Fully flexible trips only need the package to be bookable at all
    if flexibility == DateFlexibility::FullyFlexible {
        return 1.0;
    }

    let requested_days = window_days(window);
    if requested_days <= 0 {
        return 0.0;
    }

    let search = expand_window(window, flexibility.slack_days());
    if covers(validity, &search) {
        return 1.0;
    }

    let overlap = overlap_days(&search, validity);
    if overlap == 0 {
        0.0
    } else {
        (overlap as f64 / requested_days as f64).min(1.0)
    }
}

/// Fraction of requested activities the package offers (0-1)
///
/// Matching is substring containment in either direction, so a request
/// for "snorkeling" is satisfied by "snorkeling tour" and vice versa.
/// Each requested activity counts at most once. No requested
/// activities is neutral (0.5); a package listing none scores 0.
pub fn score_activities(requested: &[String], offered: &[String]) -> f64 {
    if requested.is_empty() {
        return 0.5;
    }
    if offered.is_empty() {
        return 0.0;
    }

    let matched = requested
        .iter()
        .filter(|want| {
            offered
                .iter()
                .any(|have| have.contains(want.as_str()) || want.contains(have.as_str()))
        })
        .count();

    matched as f64 / requested.len() as f64
}

/// Group size compatibility against the package's bookable range (0-1)
///
/// Undershooting the minimum is treated as more negotiable than
/// overshooting the maximum by the same amount.
#[inline]
pub fn score_group_size(group_size: u32, min_size: u32, max_size: u32) -> f64 {
    if group_size == 0 {
        return 0.5;
    }

    if group_size >= min_size && group_size <= max_size {
        return 1.0;
    }

    if group_size < min_size {
        match min_size - group_size {
            1..=2 => 0.7,
            3..=5 => 0.4,
            _ => 0.1,
        }
    } else {
        match group_size - max_size {
            1..=2 => 0.6,
            3..=5 => 0.3,
            _ => 0.0,
        }
    }
}

/// Budget alignment for the whole group (0-1)
///
/// Compares `unit_price * travelers` against the trip's total budget.
/// Spending well under budget is a mild negative signal, not a win.
/// A missing budget or price is neutral (0.5). An unstated group size
/// is costed as one traveler here, unlike the group-size criterion
/// where it stays neutral.
#[inline]
pub fn score_budget(budget: Option<f64>, unit_price: Option<f64>, group_size: u32) -> f64 {
    let budget = match budget.filter(|b| *b > 0.0) {
        Some(b) => b,
        None => return 0.5,
    };
    let unit_price = match unit_price.filter(|p| *p > 0.0) {
        Some(p) => p,
        None => return 0.5,
    };

    let travelers = group_size.max(1) as f64;
    let total_cost = unit_price * travelers;

    if total_cost <= budget {
        let utilization = total_cost / budget;
        if utilization >= 0.7 {
            1.0
        } else if utilization >= 0.5 {
            0.8
        } else {
            0.6
        }
    } else {
        let overage = (total_cost - budget) / budget;
        if overage <= 0.1 {
            0.7
        } else if overage <= 0.2 {
            0.4
        } else {
            0.1
        }
    }
}
