//! Score grades and Core Web Vitals ratings.

use crate::models::WebVitals;
use serde::Serialize;
use std::fmt;

/// Coarse band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            Grade::Good
        } else if score >= 60.0 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Grade::Good => "✅",
            Grade::Fair => "⚠️",
            Grade::Poor => "❌",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Good => write!(f, "Good"),
            Grade::Fair => write!(f, "Fair"),
            Grade::Poor => write!(f, "Poor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalStatus {
    Good,
    NeedsImprovement,
    Poor,
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalStatus::Good => write!(f, "Good"),
            VitalStatus::NeedsImprovement => write!(f, "Needs Improvement"),
            VitalStatus::Poor => write!(f, "Poor"),
        }
    }
}

/// One rated performance metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalRating {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub status: VitalStatus,
    pub impact: &'static str,
}

/// Values up to `good` are good, up to `poor` need improvement.
fn rate(value: f64, good: f64, poor: f64) -> VitalStatus {
    if value > poor {
        VitalStatus::Poor
    } else if value > good {
        VitalStatus::NeedsImprovement
    } else {
        VitalStatus::Good
    }
}

struct Threshold {
    name: &'static str,
    unit: &'static str,
    good: f64,
    poor: f64,
    /// Impact text for poor, needs-improvement and good.
    impact: [&'static str; 3],
}

const THRESHOLDS: [Threshold; 5] = [
    Threshold {
        name: "Largest Contentful Paint (LCP)",
        unit: "ms",
        good: 2500.0,
        poor: 4000.0,
        impact: [
            "Slow content loading may reduce conversions by 7-15%",
            "Moderate delays may reduce conversions by 3-7%",
            "Good performance supports optimal user experience",
        ],
    },
    Threshold {
        name: "First Input Delay (FID)",
        unit: "ms",
        good: 100.0,
        poor: 300.0,
        impact: [
            "Poor interactivity may increase bounce rate by 10-20%",
            "Delayed interactivity may increase bounce rate by 5-10%",
            "Good interactivity supports user engagement",
        ],
    },
    Threshold {
        name: "Cumulative Layout Shift (CLS)",
        unit: "",
        good: 0.1,
        poor: 0.25,
        impact: [
            "Significant layout shifts may increase exit rate by 15-25%",
            "Moderate layout shifts may increase exit rate by 5-15%",
            "Stable layout supports positive user experience",
        ],
    },
    Threshold {
        name: "Time to First Byte (TTFB)",
        unit: "ms",
        good: 500.0,
        poor: 1000.0,
        impact: [
            "Slow server response may reduce overall site performance by 10-20%",
            "Moderate server delays may reduce overall site performance by 5-10%",
            "Fast server response supports optimal page loading",
        ],
    },
    Threshold {
        name: "First Contentful Paint (FCP)",
        unit: "ms",
        good: 1800.0,
        poor: 3000.0,
        impact: [
            "Slow initial rendering may increase perceived load time by 15-25%",
            "Moderate delays in initial rendering may increase perceived load time by 5-15%",
            "Fast initial rendering improves perceived performance",
        ],
    },
];

/// Rates LCP, FID, CLS, TTFB and FCP, in that order.
pub fn rate_vitals(metrics: &WebVitals) -> Vec<VitalRating> {
    let values = [metrics.lcp, metrics.fid, metrics.cls, metrics.ttfb, metrics.fcp];

    THRESHOLDS
        .iter()
        .zip(values)
        .map(|(t, value)| {
            let status = rate(value, t.good, t.poor);
            let impact = match status {
                VitalStatus::Poor => t.impact[0],
                VitalStatus::NeedsImprovement => t.impact[1],
                VitalStatus::Good => t.impact[2],
            };
            VitalRating {
                name: t.name,
                value,
                unit: t.unit,
                status,
                impact,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceImpact {
    pub score: u32,
    pub description: &'static str,
    pub primary_issue: Option<&'static str>,
}

/// Business impact of the rated metrics: 100, minus 10 per metric needing
/// improvement and 20 per poor metric.
pub fn performance_impact(ratings: &[VitalRating]) -> PerformanceImpact {
    let count = |status| ratings.iter().filter(|r| r.status == status).count() as i64;
    let needs_improvement = count(VitalStatus::NeedsImprovement);
    let poor = count(VitalStatus::Poor);

    let score = (100 - needs_improvement * 10 - poor * 20).clamp(0, 100) as u32;

    let primary_issue = ratings
        .iter()
        .find(|r| r.status == VitalStatus::Poor)
        .or_else(|| ratings.iter().find(|r| r.status == VitalStatus::NeedsImprovement))
        .map(|r| r.name);

    let description = match score {
        90.. => "Excellent performance with minimal business impact",
        70..=89 => "Good performance with minor business impact",
        50..=69 => "Moderate performance issues may be affecting business metrics",
        _ => "Significant performance issues likely impacting business metrics",
    };

    PerformanceImpact {
        score,
        description,
        primary_issue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::of(80.0), Grade::Good);
        assert_eq!(Grade::of(79.9), Grade::Fair);
        assert_eq!(Grade::of(60.0), Grade::Fair);
        assert_eq!(Grade::of(59.0), Grade::Poor);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(rate(2500.0, 2500.0, 4000.0), VitalStatus::Good);
        assert_eq!(rate(2501.0, 2500.0, 4000.0), VitalStatus::NeedsImprovement);
        assert_eq!(rate(4000.0, 2500.0, 4000.0), VitalStatus::NeedsImprovement);
        assert_eq!(rate(4001.0, 2500.0, 4000.0), VitalStatus::Poor);
    }

    #[test]
    fn test_placeholder_metrics() {
        let ratings = rate_vitals(&WebVitals::placeholder());
        let statuses: Vec<_> = ratings.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                VitalStatus::Good,
                VitalStatus::NeedsImprovement,
                VitalStatus::NeedsImprovement,
                VitalStatus::Good,
                VitalStatus::Good,
            ]
        );

        let impact = performance_impact(&ratings);
        assert_eq!(impact.score, 80);
        assert_eq!(impact.description, "Good performance with minor business impact");
        assert_eq!(impact.primary_issue, Some("First Input Delay (FID)"));
    }

    #[test]
    fn test_poor_metric_is_primary_and_score_clamps() {
        let metrics = WebVitals {
            lcp: 9000.0,
            fid: 900.0,
            cls: 0.9,
            ttfb: 3000.0,
            fcp: 2000.0,
            ..Default::default()
        };
        let impact = performance_impact(&rate_vitals(&metrics));
        assert_eq!(impact.score, 10);
        assert_eq!(impact.primary_issue, Some("Largest Contentful Paint (LCP)"));
        assert_eq!(
            impact.description,
            "Significant performance issues likely impacting business metrics"
        );

        let all_good = performance_impact(&rate_vitals(&WebVitals::default()));
        assert_eq!(all_good.score, 100);
        assert_eq!(all_good.primary_issue, None);
    }
}
