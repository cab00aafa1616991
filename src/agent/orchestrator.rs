//! Runs every facet against one page and merges the results.

use super::facet::{analyze_facet, parse_json_object, PageInput};
use super::facets::{
    CompetitorResearch, ContentStrategy, KeywordResearch, MobileOptimization, OnPageOptimization,
    SiteDescription, TechnicalSeo, UserExperience,
};
use crate::llm::{LlmError, TextGenerator};
use crate::models::{ComprehensiveAnalysis, OverallAssessment, WebVitals};
use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

const SYSTEM_PROMPT: &str = r#"You are an SEO Orchestrator agent. Your role is to:
1. Coordinate analysis from multiple specialized agents
2. Identify patterns and relationships between different aspects
3. Prioritize recommendations based on impact and effort
4. Create a comprehensive SEO strategy
5. Generate detailed, actionable reports

Combine insights from all agents to provide a holistic SEO analysis.
Focus on creating actionable, prioritized recommendations."#;

/// Coordinates the facets and the final summary pass.
pub struct Orchestrator<'a> {
    generator: &'a dyn TextGenerator,
}

impl<'a> Orchestrator<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self { generator }
    }

    /// Runs all eight facets concurrently, then asks for an overall assessment.
    ///
    /// Fails only on credential errors; everything else degrades to fallback
    /// records.
    pub async fn analyze(&self, url: &str, html: &str) -> Result<ComprehensiveAnalysis, LlmError> {
        let page = PageInput::new(url, html);
        let generator = self.generator;

        info!("Running 8 analysis facets for {}", url);

        let (
            technical,
            content,
            on_page,
            user_experience,
            mobile,
            site_description,
            competitor_analysis,
            keyword_research,
        ) = futures::try_join!(
            analyze_facet::<TechnicalSeo>(generator, &page),
            analyze_facet::<ContentStrategy>(generator, &page),
            analyze_facet::<OnPageOptimization>(generator, &page),
            analyze_facet::<UserExperience>(generator, &page),
            analyze_facet::<MobileOptimization>(generator, &page),
            analyze_facet::<SiteDescription>(generator, &page),
            analyze_facet::<CompetitorResearch>(generator, &page),
            analyze_facet::<KeywordResearch>(generator, &page),
        )?;

        let mut analysis = ComprehensiveAnalysis {
            url: url.to_string(),
            timestamp: timestamp(),
            metrics: WebVitals::placeholder(),
            technical,
            content,
            on_page,
            user_experience,
            mobile,
            site_description,
            competitor_analysis,
            keyword_research,
            ..Default::default()
        };

        let assessment = self.assess(&analysis).await?;
        analysis.apply_assessment(assessment);
        analysis.timestamp = timestamp();

        info!(
            "Analysis for {} complete: overall score {:.0}, {} recommendations",
            url,
            analysis.overall_score,
            analysis.prioritized_recommendations.len()
        );
        Ok(analysis)
    }

    /// The summary pass: score, prioritized recommendations and summary.
    async fn assess(&self, combined: &ComprehensiveAnalysis) -> Result<OverallAssessment, LlmError> {
        let data = match serde_json::to_string_pretty(combined) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot serialize combined analysis: {}", e);
                return Ok(OverallAssessment::default());
            }
        };

        let prompt = format!(
            r#"Generate a comprehensive SEO analysis based on the following data:
{data}

Provide:
1. Overall score calculation
2. Prioritized recommendations
3. Strengths and weaknesses analysis
4. Strategic opportunities

Format the response as JSON with the following structure:
{{
  "overallScore": number,
  "prioritizedRecommendations": [{{ "priority": "high" | "medium" | "low", "category": string, "recommendation": string, "impact": string, "effort": string }}],
  "summary": {{ "strengths": string[], "weaknesses": string[], "opportunities": string[] }}
}}"#
        );

        match self.generator.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(response) => Ok(parse_json_object(&response).unwrap_or_else(|| {
                warn!("Failed to parse comprehensive analysis, scoring as 0");
                OverallAssessment::default()
            })),
            Err(e) if e.is_credential_error() => Err(e),
            Err(e) => {
                warn!("Summary pass failed: {}", e);
                Ok(OverallAssessment::default())
            }
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
