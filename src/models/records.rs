//! Per-facet analysis records.
//!
//! Each record is the JSON shape one agent asks the model to produce. All of
//! them deserialize leniently: any field the model leaves out is filled from
//! the record's default, so a partial answer never fails the whole record.

use super::lenient;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Technical SEO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalScores {
    #[serde(deserialize_with = "lenient::number")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub security: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub performance: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub structure: f64,
}

/// A single technical problem reported by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalIssue {
    #[serde(deserialize_with = "lenient::or_default")]
    pub severity: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub impact: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteStructure {
    #[serde(deserialize_with = "lenient::count")]
    pub depth: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub internal_links: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub broken_links: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub redirects: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub canonicals: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityReport {
    #[serde(deserialize_with = "lenient::or_default")]
    pub https: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mixed_content: bool,
    #[serde(deserialize_with = "lenient::list")]
    pub security_headers: Vec<String>,
    /// Certificate expiry as the model reported it (a date or a timestamp).
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub ssl_expiry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerPerformance {
    /// Server response time in milliseconds.
    #[serde(deserialize_with = "lenient::number")]
    pub server_response: f64,
    /// Total page weight in megabytes.
    #[serde(deserialize_with = "lenient::number")]
    pub resource_size: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub compression: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub caching: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalSeoAnalysis {
    #[serde(deserialize_with = "lenient::or_default")]
    pub scores: TechnicalScores,
    #[serde(deserialize_with = "lenient::list")]
    pub issues: Vec<TechnicalIssue>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub structure: SiteStructure,
    #[serde(deserialize_with = "lenient::or_default")]
    pub security: SecurityReport,
    #[serde(deserialize_with = "lenient::or_default")]
    pub performance: ServerPerformance,
    #[serde(deserialize_with = "lenient::list")]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Content strategy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentScores {
    #[serde(deserialize_with = "lenient::number")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub readability: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub relevance: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub optimization: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentStats {
    #[serde(deserialize_with = "lenient::count")]
    pub word_count: u32,
    /// Estimated reading time in minutes.
    #[serde(deserialize_with = "lenient::number")]
    pub reading_time: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub readability_score: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub paragraph_count: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub sentence_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentKeywords {
    #[serde(deserialize_with = "lenient::or_default")]
    pub primary: String,
    #[serde(deserialize_with = "lenient::list")]
    pub secondary: Vec<String>,
    #[serde(deserialize_with = "lenient::number_map")]
    pub density: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient::number_map")]
    pub distribution: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Semantics {
    #[serde(deserialize_with = "lenient::list")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub entities: Vec<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub sentiment: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentAnalysis {
    #[serde(deserialize_with = "lenient::or_default")]
    pub scores: ContentScores,
    #[serde(deserialize_with = "lenient::or_default")]
    pub content: ContentStats,
    #[serde(deserialize_with = "lenient::or_default")]
    pub keywords: ContentKeywords,
    #[serde(deserialize_with = "lenient::or_default")]
    pub semantics: Semantics,
    #[serde(deserialize_with = "lenient::list")]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// On-page optimization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnPageScores {
    #[serde(deserialize_with = "lenient::number")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub titles: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub meta: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub headings: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub images: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleElement {
    #[serde(deserialize_with = "lenient::or_default")]
    pub content: String,
    #[serde(deserialize_with = "lenient::count")]
    pub length: u32,
    #[serde(deserialize_with = "lenient::list")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaElement {
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::list")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub robots: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub canonical: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingElement {
    #[serde(deserialize_with = "lenient::count")]
    pub level: u8,
    #[serde(deserialize_with = "lenient::or_default")]
    pub content: String,
    #[serde(deserialize_with = "lenient::list")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(deserialize_with = "lenient::or_default")]
    pub src: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub alt: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub optimized: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageElements {
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: TitleElement,
    #[serde(deserialize_with = "lenient::or_default")]
    pub meta: MetaElement,
    #[serde(deserialize_with = "lenient::list")]
    pub headings: Vec<HeadingElement>,
    #[serde(deserialize_with = "lenient::list")]
    pub images: Vec<ImageElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnPageAnalysis {
    #[serde(deserialize_with = "lenient::or_default")]
    pub scores: OnPageScores,
    #[serde(deserialize_with = "lenient::or_default")]
    pub elements: PageElements,
    #[serde(deserialize_with = "lenient::list")]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// User experience
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UxScores {
    #[serde(deserialize_with = "lenient::number")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub navigation: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub accessibility: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub interactivity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub layout: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuStructure {
    #[serde(deserialize_with = "lenient::count")]
    pub depth: u32,
    #[serde(deserialize_with = "lenient::number")]
    pub clarity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub consistency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserFlow {
    #[serde(deserialize_with = "lenient::count")]
    pub path_length: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub click_depth: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub dead_ends: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Searchability {
    #[serde(deserialize_with = "lenient::or_default")]
    pub search_present: bool,
    #[serde(deserialize_with = "lenient::count")]
    pub filter_options: u32,
    #[serde(deserialize_with = "lenient::or_default")]
    pub search_placement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Navigation {
    #[serde(deserialize_with = "lenient::or_default")]
    pub menu_structure: MenuStructure,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user_flow: UserFlow,
    #[serde(deserialize_with = "lenient::or_default")]
    pub searchability: Searchability,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Accessibility {
    /// Contrast ratio (e.g. 4.5 for WCAG AA body text).
    #[serde(deserialize_with = "lenient::number")]
    pub contrast: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub focusability: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub aria_labels: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub keyboard_nav: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub text_scaling: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallToAction {
    #[serde(deserialize_with = "lenient::number")]
    pub visibility: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub placement: Vec<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub effectiveness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Forms {
    #[serde(deserialize_with = "lenient::number")]
    pub usability: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub validation: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub feedback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Engagement {
    #[serde(deserialize_with = "lenient::number")]
    pub scroll_depth: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub interaction_rate: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub bounce_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interactivity {
    #[serde(deserialize_with = "lenient::or_default")]
    pub cta: CallToAction,
    #[serde(deserialize_with = "lenient::or_default")]
    pub forms: Forms,
    #[serde(deserialize_with = "lenient::or_default")]
    pub engagement: Engagement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserExperienceAnalysis {
    #[serde(deserialize_with = "lenient::or_default")]
    pub scores: UxScores,
    #[serde(deserialize_with = "lenient::or_default")]
    pub navigation: Navigation,
    #[serde(deserialize_with = "lenient::or_default")]
    pub accessibility: Accessibility,
    #[serde(deserialize_with = "lenient::or_default")]
    pub interactivity: Interactivity,
    #[serde(deserialize_with = "lenient::list")]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Mobile optimization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileScores {
    #[serde(deserialize_with = "lenient::number")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub responsiveness: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub performance: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub usability: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub compatibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    #[serde(deserialize_with = "lenient::or_default")]
    pub configured: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub responsive: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub initial_scale: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user_scalable: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            configured: false,
            responsive: false,
            initial_scale: 1.0,
            user_scalable: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TapTargets {
    #[serde(deserialize_with = "lenient::count")]
    pub total: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub problematic: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TouchTargets {
    #[serde(deserialize_with = "lenient::or_default")]
    pub adequate_size: bool,
    /// Spacing between targets in pixels.
    #[serde(deserialize_with = "lenient::number")]
    pub spacing: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub tap_targets: TapTargets,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobilePerformance {
    #[serde(deserialize_with = "lenient::number")]
    pub mobile_speed: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub resource_size: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub image_optimization: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub lazy_loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileCompatibility {
    #[serde(deserialize_with = "lenient::or_default")]
    pub mobile_first: bool,
    #[serde(deserialize_with = "lenient::list")]
    pub media_queries: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub font_scaling: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub orientation_support: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileOptimizationAnalysis {
    #[serde(deserialize_with = "lenient::or_default")]
    pub scores: MobileScores,
    #[serde(deserialize_with = "lenient::or_default")]
    pub viewport: Viewport,
    #[serde(deserialize_with = "lenient::or_default")]
    pub touch_targets: TouchTargets,
    #[serde(deserialize_with = "lenient::or_default")]
    pub performance: MobilePerformance,
    #[serde(deserialize_with = "lenient::or_default")]
    pub compatibility: MobileCompatibility,
    #[serde(deserialize_with = "lenient::list")]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Site description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteDescriptionAnalysis {
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient::list")]
    pub target_audience: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub main_purpose: String,
    #[serde(deserialize_with = "lenient::list")]
    pub content_type: Vec<String>,
}

impl Default for SiteDescriptionAnalysis {
    fn default() -> Self {
        Self {
            description: "Unable to generate a description for this website.".to_string(),
            category: "Unknown".to_string(),
            target_audience: vec!["General audience".to_string()],
            main_purpose: "Information".to_string(),
            content_type: vec!["Web pages".to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// Competitors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competitor {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
    /// How much the competitor's offering overlaps, 0-100.
    #[serde(deserialize_with = "lenient::number")]
    pub overlap_score: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub common_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    #[serde(deserialize_with = "lenient::list")]
    pub main_competitors: Vec<Competitor>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub competitive_landscape: String,
    #[serde(deserialize_with = "lenient::list")]
    pub market_gaps: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub recommended_strategies: Vec<String>,
}

// ---------------------------------------------------------------------------
// Keyword research
// ---------------------------------------------------------------------------

/// Search intent behind a keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    #[default]
    Informational,
    Navigational,
    Transactional,
    Commercial,
}

impl SearchIntent {
    /// Parses an intent label case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "informational" => Some(Self::Informational),
            "navigational" => Some(Self::Navigational),
            "transactional" => Some(Self::Transactional),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for SearchIntent {
    /// Case-insensitive; unknown labels read as the default intent.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label).unwrap_or_default())
    }
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchIntent::Informational => write!(f, "informational"),
            SearchIntent::Navigational => write!(f, "navigational"),
            SearchIntent::Transactional => write!(f, "transactional"),
            SearchIntent::Commercial => write!(f, "commercial"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Keyword {
    #[serde(deserialize_with = "lenient::or_default")]
    pub keyword: String,
    /// Estimated monthly search volume.
    #[serde(deserialize_with = "lenient::count")]
    pub volume: u64,
    /// Ranking difficulty, 0-100.
    #[serde(deserialize_with = "lenient::number")]
    pub difficulty: f64,
    /// Relevance to the site, 0-10.
    #[serde(deserialize_with = "lenient::number")]
    pub relevance: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub intent: SearchIntent,
}

impl Keyword {
    pub fn new(keyword: impl Into<String>, volume: u64, difficulty: f64, relevance: f64, intent: SearchIntent) -> Self {
        Self {
            keyword: keyword.into(),
            volume,
            difficulty,
            relevance,
            intent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeywordResearchAnalysis {
    #[serde(deserialize_with = "lenient::list")]
    pub primary_keywords: Vec<Keyword>,
    #[serde(deserialize_with = "lenient::list")]
    pub secondary_keywords: Vec<Keyword>,
    #[serde(deserialize_with = "lenient::list")]
    pub long_tail_keywords: Vec<Keyword>,
    #[serde(deserialize_with = "lenient::list")]
    pub keyword_gaps: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub recommended_focus: Vec<String>,
}

impl KeywordResearchAnalysis {
    /// Iterates over every keyword across all tiers.
    pub fn all_keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.primary_keywords
            .iter()
            .chain(self.secondary_keywords.iter())
            .chain(self.long_tail_keywords.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fill_from_default() {
        let parsed: TechnicalSeoAnalysis =
            serde_json::from_str(r#"{"scores": {"overall": 81}}"#).unwrap();
        assert_eq!(parsed.scores.overall, 81.0);
        assert_eq!(parsed.scores.security, 0.0);
        assert!(parsed.issues.is_empty());
        assert!(!parsed.security.https);
    }

    #[test]
    fn test_loose_field_types_do_not_drop_the_record() {
        let parsed: TechnicalSeoAnalysis = serde_json::from_str(
            r#"{
                "scores": {"overall": 82, "performance": "74"},
                "security": {"https": true, "sslExpiry": "2025-06-30"},
                "structure": {"depth": null, "internalLinks": 45.0, "brokenLinks": "2"}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.scores.overall, 82.0);
        assert_eq!(parsed.scores.performance, 74.0);
        assert_eq!(parsed.security.ssl_expiry.as_deref(), Some("2025-06-30"));
        assert!(parsed.security.https);
        assert_eq!(parsed.structure.depth, 0);
        assert_eq!(parsed.structure.internal_links, 45);
        assert_eq!(parsed.structure.broken_links, 2);
    }

    #[test]
    fn test_keyword_intent_falls_back() {
        let keyword: Keyword = serde_json::from_str(
            r#"{"keyword": "sourdough lisbon", "volume": 1200.0, "intent": "local"}"#,
        )
        .unwrap();
        assert_eq!(keyword.volume, 1200);
        assert_eq!(keyword.intent, SearchIntent::default());
    }

    #[test]
    fn test_viewport_default_is_scalable() {
        let mobile: MobileOptimizationAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(mobile.viewport.initial_scale, 1.0);
        assert!(mobile.viewport.user_scalable);
    }

    #[test]
    fn test_site_description_default() {
        let parsed: SiteDescriptionAnalysis =
            serde_json::from_str(r#"{"description": "A bakery in Lisbon"}"#).unwrap();
        assert_eq!(parsed.description, "A bakery in Lisbon");
        assert_eq!(parsed.category, "Unknown");
        assert_eq!(parsed.target_audience, vec!["General audience"]);
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let mut ux = UserExperienceAnalysis::default();
        ux.navigation.user_flow.click_depth = 2;
        let json = serde_json::to_value(&ux).unwrap();
        assert_eq!(json["navigation"]["userFlow"]["clickDepth"], 2);
    }

    #[test]
    fn test_search_intent_parse() {
        assert_eq!(SearchIntent::parse("Commercial"), Some(SearchIntent::Commercial));
        assert_eq!(SearchIntent::parse(" navigational "), Some(SearchIntent::Navigational));
        assert_eq!(SearchIntent::parse("buying"), None);
    }

    #[test]
    fn test_all_keywords_spans_tiers() {
        let research = KeywordResearchAnalysis {
            primary_keywords: vec![Keyword::new("a", 1, 1.0, 1.0, SearchIntent::Commercial)],
            secondary_keywords: vec![Keyword::new("b", 1, 1.0, 1.0, SearchIntent::Commercial)],
            long_tail_keywords: vec![Keyword::new("c", 1, 1.0, 1.0, SearchIntent::Commercial)],
            ..Default::default()
        };
        let names: Vec<_> = research.all_keywords().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
