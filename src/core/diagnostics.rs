use std::collections::HashSet;

use crate::models::ScoreBreakdown;

/// Criteria scoring below this percentage count as gaps
pub const GAP_THRESHOLD_PCT: f64 = 50.0;

/// Criteria scoring below this percentage trigger a remediation message
pub const RECOMMENDATION_THRESHOLD_PCT: f64 = 30.0;

/// Upper bound on returned recommendations
pub const MAX_RECOMMENDATIONS: usize = 5;

/// List the criteria of a breakdown that scored under 50%, formatted
/// for advisor-facing gap summaries, e.g. `"dates: 30% match"`.
pub fn identify_gaps(breakdown: &ScoreBreakdown) -> Vec<String> {
    breakdown
        .entries()
        .iter()
        .filter(|(_, criterion)| criterion.percentage < GAP_THRESHOLD_PCT)
        .map(|(name, criterion)| format!("{}: {:.0}% match", name, criterion.percentage))
        .collect()
}

/// Build the recommendation list for a selected package.
///
/// Advisor-supplied recommendations come first, then a fixed
/// remediation message per criterion under 30%. Group size has no
/// remediation message; shortfalls there surface through gaps only.
/// The result is deduplicated in first-seen order and capped at
/// [`MAX_RECOMMENDATIONS`].
pub fn build_recommendations(advisor: &[String], breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut recommendations: Vec<String> = advisor.to_vec();

    for (name, criterion) in breakdown.entries() {
        if criterion.percentage < RECOMMENDATION_THRESHOLD_PCT {
            if let Some(message) = remediation_for(name) {
                recommendations.push(message.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for rec in recommendations {
        if seen.insert(rec.clone()) {
            unique.push(rec);
        }
    }

    unique.truncate(MAX_RECOMMENDATIONS);
    unique
}

fn remediation_for(criterion: &str) -> Option<&'static str> {
    match criterion {
        "destination" => Some("Consider adding more destinations to match the trip requirements"),
        "dates" => Some("Review date flexibility or consider alternative packages for the travel period"),
        "activities" => Some("Add custom activities to meet specific requirements"),
        "budget" => Some("Discuss budget adjustments or consider package modifications"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CriterionScore;

    fn breakdown(raw: [f64; 5]) -> ScoreBreakdown {
        ScoreBreakdown {
            destination: CriterionScore::new(raw[0], 30.0),
            dates: CriterionScore::new(raw[1], 25.0),
            activities: CriterionScore::new(raw[2], 20.0),
            group_size: CriterionScore::new(raw[3], 15.0),
            budget: CriterionScore::new(raw[4], 10.0),
        }
    }

    #[test]
    fn test_gaps_list_weak_criteria() {
        let gaps = identify_gaps(&breakdown([1.0, 0.3, 0.45, 1.0, 0.5]));

        assert_eq!(gaps, vec!["dates: 30% match", "activities: 45% match"]);
    }

    #[test]
    fn test_gaps_empty_for_strong_breakdown() {
        assert!(identify_gaps(&breakdown([1.0, 1.0, 0.5, 1.0, 0.8])).is_empty());
    }

    #[test]
    fn test_recommendations_keyed_by_criterion() {
        let recs = build_recommendations(&[], &breakdown([0.2, 1.0, 0.1, 1.0, 1.0]));

        assert_eq!(
            recs,
            vec![
                "Consider adding more destinations to match the trip requirements",
                "Add custom activities to meet specific requirements",
            ]
        );
    }

    #[test]
    fn test_group_size_has_no_remediation() {
        let recs = build_recommendations(&[], &breakdown([1.0, 1.0, 1.0, 0.0, 1.0]));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_advisor_recommendations_come_first() {
        let advisor = vec!["Offer the premium hotel upgrade".to_string()];
        let recs = build_recommendations(&advisor, &breakdown([0.2, 1.0, 1.0, 1.0, 1.0]));

        assert_eq!(recs[0], "Offer the premium hotel upgrade");
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_recommendations_dedup_and_cap() {
        let advisor = vec![
            "Add custom activities to meet specific requirements".to_string(),
            "Suggest a shoulder-season departure".to_string(),
            "Suggest a shoulder-season departure".to_string(),
            "Bundle airport transfers".to_string(),
            "Offer the premium hotel upgrade".to_string(),
            "Split the group across two departures".to_string(),
        ];
        let recs = build_recommendations(&advisor, &breakdown([0.2, 0.2, 0.2, 1.0, 0.2]));

        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        // The duplicated advisor line appears once, in its first slot
        assert_eq!(
            recs,
            vec![
                "Add custom activities to meet specific requirements",
                "Suggest a shoulder-season departure",
                "Bundle airport transfers",
                "Offer the premium hotel upgrade",
                "Split the group across two departures",
            ]
        );
    }
}
