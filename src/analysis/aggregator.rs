//! Recommendation and issue aggregation.
//!
//! Helpers for ordering and grouping what the facets and the summary pass
//! report, used by the report renderer and the CLI summary.

use crate::models::{ComprehensiveAnalysis, PrioritizedRecommendation, Priority, TechnicalIssue};
use std::collections::BTreeMap;

/// Sort recommendations by priority (high first). Ties keep their order.
pub fn sort_by_priority(recommendations: &mut [PrioritizedRecommendation]) {
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// A sorted copy of the report's recommendations.
pub fn prioritized(analysis: &ComprehensiveAnalysis) -> Vec<PrioritizedRecommendation> {
    let mut sorted = analysis.prioritized_recommendations.clone();
    sort_by_priority(&mut sorted);
    sorted
}

/// Group recommendations by category.
pub fn group_by_category(
    recommendations: &[PrioritizedRecommendation],
) -> BTreeMap<String, Vec<PrioritizedRecommendation>> {
    let mut grouped: BTreeMap<String, Vec<PrioritizedRecommendation>> = BTreeMap::new();

    for rec in recommendations {
        grouped.entry(rec.category.clone()).or_default().push(rec.clone());
    }

    grouped
}

/// Count recommendations per priority.
pub fn priority_counts(recommendations: &[PrioritizedRecommendation]) -> BTreeMap<Priority, usize> {
    let mut counts = BTreeMap::new();
    for rec in recommendations {
        *counts.entry(rec.priority).or_default() += 1;
    }
    counts
}

/// Rank of a free-form severity label; unknown labels sort last.
fn severity_rank(severity: &str) -> u8 {
    match severity.trim().to_lowercase().as_str() {
        "critical" => 4,
        "high" => 3,
        "medium" => 2,
        "low" => 1,
        _ => 0,
    }
}

/// Technical issues, most severe first.
pub fn issues_by_severity(issues: &[TechnicalIssue]) -> Vec<TechnicalIssue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by_key(|i| std::cmp::Reverse(severity_rank(&i.severity)));
    sorted
}

/// The `n` lowest-scoring sections.
pub fn weakest_sections(analysis: &ComprehensiveAnalysis, n: usize) -> Vec<(&'static str, f64)> {
    let mut scores = analysis.section_scores();
    scores.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    scores.truncate(n);
    scores
}
