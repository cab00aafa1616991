//! Data models for the SEO analyzer.
//!
//! This module contains the aggregate report produced by one analysis run
//! and re-exports the per-facet records it is assembled from.

mod lenient;
mod records;

pub use records::*;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Priority of a recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl Priority {
    /// Reads a model-supplied label; unknown labels count as medium.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "critical" | "urgent" | "high" => Priority::High,
            "low" | "minor" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    /// Returns an emoji representation of the priority.
    pub fn emoji(&self) -> &'static str {
        match self {
            Priority::Low => "🟢",
            Priority::Medium => "🟡",
            Priority::High => "🔴",
        }
    }
}

/// Page-speed measurements attached to every report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebVitals {
    /// Largest Contentful Paint, ms.
    #[serde(deserialize_with = "lenient::number")]
    pub lcp: f64,
    /// First Input Delay, ms.
    #[serde(deserialize_with = "lenient::number")]
    pub fid: f64,
    /// Cumulative Layout Shift (unitless).
    #[serde(deserialize_with = "lenient::number")]
    pub cls: f64,
    /// Time To First Byte, ms.
    #[serde(deserialize_with = "lenient::number")]
    pub ttfb: f64,
    /// First Contentful Paint, ms.
    #[serde(deserialize_with = "lenient::number")]
    pub fcp: f64,
    /// Speed Index, ms.
    #[serde(deserialize_with = "lenient::number")]
    pub si: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub mobile_score: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub content_score: f64,
}

impl WebVitals {
    /// The fixed measurements used until a real lab run is wired in.
    pub fn placeholder() -> Self {
        Self {
            lcp: 2500.0,
            fid: 120.0,
            cls: 0.15,
            ttfb: 350.0,
            fcp: 1800.0,
            si: 3200.0,
            mobile_score: 78.0,
            content_score: 85.0,
        }
    }
}

/// One actionable recommendation from the final summary pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrioritizedRecommendation {
    #[serde(deserialize_with = "lenient::or_default")]
    pub priority: Priority,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub recommendation: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub impact: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub effort: String,
}

impl PrioritizedRecommendation {
    pub fn new(priority: Priority, category: &str, recommendation: &str, impact: &str, effort: &str) -> Self {
        Self {
            priority,
            category: category.to_string(),
            recommendation: recommendation.to_string(),
            impact: impact.to_string(),
            effort: effort.to_string(),
        }
    }
}

/// Strengths, weaknesses and opportunities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisSummary {
    #[serde(deserialize_with = "lenient::list")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub weaknesses: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub opportunities: Vec<String>,
}

impl AnalysisSummary {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.weaknesses.is_empty() && self.opportunities.is_empty()
    }
}

/// The part of the report written by the final summary pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverallAssessment {
    #[serde(deserialize_with = "lenient::number")]
    pub overall_score: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub prioritized_recommendations: Vec<PrioritizedRecommendation>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub summary: AnalysisSummary,
}

/// The complete SEO report for one URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComprehensiveAnalysis {
    /// The analyzed URL.
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
    /// RFC 3339 timestamp of when the report was finished.
    #[serde(deserialize_with = "lenient::or_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient::number")]
    pub overall_score: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub metrics: WebVitals,
    #[serde(deserialize_with = "lenient::or_default")]
    pub technical: TechnicalSeoAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub content: ContentAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub on_page: OnPageAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user_experience: UserExperienceAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mobile: MobileOptimizationAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub site_description: SiteDescriptionAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub competitor_analysis: CompetitorAnalysis,
    #[serde(deserialize_with = "lenient::or_default")]
    pub keyword_research: KeywordResearchAnalysis,
    #[serde(deserialize_with = "lenient::list")]
    pub prioritized_recommendations: Vec<PrioritizedRecommendation>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub summary: AnalysisSummary,
}

impl ComprehensiveAnalysis {
    /// Applies the summary pass onto the merged facet results.
    pub fn apply_assessment(&mut self, assessment: OverallAssessment) {
        self.overall_score = assessment.overall_score;
        self.prioritized_recommendations = assessment.prioritized_recommendations;
        self.summary = assessment.summary;
    }

    /// Per-section scores, in report order.
    pub fn section_scores(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Technical SEO", self.technical.scores.overall),
            ("Content", self.content.scores.overall),
            ("On-Page", self.on_page.scores.overall),
            ("User Experience", self.user_experience.scores.overall),
            ("Mobile", self.mobile.scores.overall),
        ]
    }
}

/// Owned copies of string literals, for building records.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
