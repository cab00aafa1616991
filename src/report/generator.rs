//! Markdown report generation.
//!
//! Renders a [`ComprehensiveAnalysis`] as a readable Markdown document, or
//! as the same JSON the HTTP endpoint returns.

use super::scoring::{performance_impact, rate_vitals, Grade, VitalStatus};
use crate::analysis::{group_by_category, group_keywords, intent_mix, issues_by_severity, prioritized};
use crate::models::{
    AnalysisSummary, CompetitorAnalysis, ComprehensiveAnalysis, KeywordResearchAnalysis,
    SiteDescriptionAnalysis, TechnicalSeoAnalysis,
};
use anyhow::Result;

/// How the report was produced.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Model name, or a note that canned data was used.
    pub source: String,
    pub duration_seconds: f64,
    /// Target keywords the user supplied, if any.
    pub target_keywords: Vec<String>,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(analysis: &ComprehensiveAnalysis, metadata: &ReportMetadata) -> String {
    let mut output = String::new();

    output.push_str("# SeoLens Report\n\n");
    output.push_str(&generate_metadata_section(analysis, metadata));
    output.push_str(&generate_overview_section(&analysis.site_description));
    output.push_str(&generate_scores_section(analysis));
    output.push_str(&generate_vitals_section(analysis));
    output.push_str(&generate_technical_section(&analysis.technical));
    output.push_str(&generate_recommendations_section(analysis));
    output.push_str(&generate_competitors_section(&analysis.competitor_analysis));
    output.push_str(&generate_keywords_section(&analysis.keyword_research, &metadata.target_keywords));
    output.push_str(&generate_summary_section(&analysis.summary));
    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(analysis: &ComprehensiveAnalysis, metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **URL:** {}\n", analysis.url));
    section.push_str(&format!("- **Analysis Date:** {}\n", analysis.timestamp));
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    let grade = Grade::of(analysis.overall_score);
    section.push_str(&format!(
        "- **Overall Score:** {:.0}/100 {} {}\n\n",
        analysis.overall_score,
        grade.emoji(),
        grade
    ));

    section
}

fn generate_overview_section(site: &SiteDescriptionAnalysis) -> String {
    let mut section = String::new();

    section.push_str("## Site Overview\n\n");
    section.push_str(&site.description);
    section.push_str("\n\n");
    section.push_str(&format!("- **Category:** {}\n", site.category));
    section.push_str(&format!("- **Main Purpose:** {}\n", site.main_purpose));
    if !site.target_audience.is_empty() {
        section.push_str(&format!(
            "- **Target Audience:** {}\n",
            site.target_audience.join(", ")
        ));
    }
    if !site.content_type.is_empty() {
        section.push_str(&format!("- **Content Types:** {}\n", site.content_type.join(", ")));
    }
    section.push('\n');

    section
}

fn generate_scores_section(analysis: &ComprehensiveAnalysis) -> String {
    let mut section = String::new();

    section.push_str("## Scores\n\n");
    section.push_str("| Section | Score | Grade |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for (name, score) in analysis.section_scores() {
        let grade = Grade::of(score);
        section.push_str(&format!("| {} | {:.0} | {} {} |\n", name, score, grade.emoji(), grade));
    }
    section.push('\n');

    section
}

fn generate_vitals_section(analysis: &ComprehensiveAnalysis) -> String {
    let mut section = String::new();
    let ratings = rate_vitals(&analysis.metrics);
    let impact = performance_impact(&ratings);

    section.push_str("## Core Web Vitals\n\n");
    section.push_str("| Metric | Value | Status | Impact |\n");
    section.push_str("|:---|:---:|:---:|:---|\n");
    for rating in &ratings {
        let badge = match rating.status {
            VitalStatus::Good => "🟢",
            VitalStatus::NeedsImprovement => "🟡",
            VitalStatus::Poor => "🔴",
        };
        section.push_str(&format!(
            "| {} | {}{} | {} {} | {} |\n",
            rating.name, rating.value, rating.unit, badge, rating.status, rating.impact
        ));
    }
    section.push('\n');

    section.push_str(&format!(
        "**Performance impact:** {}/100 ({})\n",
        impact.score, impact.description
    ));
    if let Some(issue) = impact.primary_issue {
        section.push_str(&format!("\n**Primary issue:** {}\n", issue));
    }
    section.push_str(&format!(
        "\nMobile score: {:.0} | Content score: {:.0}\n\n",
        analysis.metrics.mobile_score, analysis.metrics.content_score
    ));

    section
}

fn generate_technical_section(technical: &TechnicalSeoAnalysis) -> String {
    let mut section = String::new();

    section.push_str("## Technical Issues\n\n");

    if technical.issues.is_empty() {
        section.push_str("No technical issues were reported.\n\n");
        return section;
    }

    for issue in issues_by_severity(&technical.issues) {
        section.push_str(&format!(
            "### **{}** {}\n\n",
            issue.severity.to_uppercase(),
            issue.category
        ));
        if !issue.description.is_empty() {
            section.push_str(&format!("**Description:** {}\n\n", issue.description));
        }
        if !issue.impact.is_empty() {
            section.push_str(&format!("**Impact:** {}\n\n", issue.impact));
        }
        if !issue.recommendation.is_empty() {
            section.push_str(&format!("> 💡 **Fix:** {}\n\n", issue.recommendation));
        }
        section.push_str("---\n\n");
    }

    section
}

fn generate_recommendations_section(analysis: &ComprehensiveAnalysis) -> String {
    let recommendations = prioritized(analysis);
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Recommendations\n\n");
    let by_category: Vec<String> = group_by_category(&recommendations)
        .iter()
        .map(|(category, recs)| format!("{} ({})", category, recs.len()))
        .collect();
    section.push_str(&format!("**By category:** {}\n\n", by_category.join(", ")));
    section.push_str("| Priority | Category | Recommendation | Impact | Effort |\n");
    section.push_str("|:---:|:---|:---|:---|:---:|\n");
    for rec in &recommendations {
        section.push_str(&format!(
            "| {} {} | {} | {} | {} | {} |\n",
            rec.priority.emoji(),
            rec.priority,
            rec.category,
            rec.recommendation,
            rec.impact,
            rec.effort
        ));
    }
    section.push('\n');

    section
}

fn generate_competitors_section(competitors: &CompetitorAnalysis) -> String {
    if competitors.main_competitors.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Competitors\n\n");
    if !competitors.competitive_landscape.is_empty() {
        section.push_str(&competitors.competitive_landscape);
        section.push_str("\n\n");
    }

    section.push_str("| Competitor | Overlap | Strengths | Weaknesses |\n");
    section.push_str("|:---|:---:|:---|:---|\n");
    for c in &competitors.main_competitors {
        section.push_str(&format!(
            "| {} ({}) | {:.0}% | {} | {} |\n",
            c.name,
            c.url,
            c.overlap_score,
            c.strengths.join(", "),
            c.weaknesses.join(", ")
        ));
    }
    section.push('\n');

    push_list(&mut section, "Market Gaps", &competitors.market_gaps);
    push_list(&mut section, "Recommended Strategies", &competitors.recommended_strategies);

    section
}

fn generate_keywords_section(research: &KeywordResearchAnalysis, targets: &[String]) -> String {
    let keywords: Vec<_> = research.all_keywords().cloned().collect();
    if keywords.is_empty() && targets.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Keywords\n\n");

    if !targets.is_empty() {
        section.push_str(&format!("**Target keywords:** {}\n\n", targets.join(", ")));
    }

    let mix = intent_mix(research);
    section.push_str(&format!(
        "**Search intent mix:** {}% transactional, {}% informational, {}% navigational\n\n",
        mix.transactional, mix.informational, mix.navigational
    ));

    let groups = group_keywords(&keywords);
    if !groups.is_empty() {
        section.push_str("| Group | Keywords | Total Volume | Avg. Difficulty |\n");
        section.push_str("|:---|:---|:---:|:---:|\n");
        for group in &groups {
            let names: Vec<&str> = group.keywords.iter().map(|k| k.keyword.as_str()).collect();
            section.push_str(&format!(
                "| {} | {} | {} | {:.0} |\n",
                group.name,
                names.join(", "),
                group.total_volume,
                group.average_difficulty
            ));
        }
        section.push('\n');
    }

    push_list(&mut section, "Keyword Gaps", &research.keyword_gaps);
    push_list(&mut section, "Recommended Focus", &research.recommended_focus);

    section
}

fn generate_summary_section(summary: &AnalysisSummary) -> String {
    if summary.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Summary\n\n");
    push_list(&mut section, "Strengths", &summary.strengths);
    push_list(&mut section, "Weaknesses", &summary.weaknesses);
    push_list(&mut section, "Opportunities", &summary.opportunities);

    section
}

fn push_list(section: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    section.push_str(&format!("### {}\n\n", title));
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');
}

fn generate_footer() -> String {
    "---\n\n*Report generated by SeoLens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(analysis: &ComprehensiveAnalysis) -> Result<String> {
    serde_json::to_string_pretty(analysis).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::mock_analysis;
    use crate::models::{PrioritizedRecommendation, Priority};

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            source: "gpt-4-turbo-preview".to_string(),
            duration_seconds: 12.5,
            target_keywords: vec!["sourdough".to_string()],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let analysis = mock_analysis("https://example.com");
        let markdown = generate_markdown_report(&analysis, &metadata());

        assert!(markdown.contains("# SeoLens Report"));
        assert!(markdown.contains("- **URL:** https://example.com"));
        assert!(markdown.contains("- **Overall Score:** 75/100 ⚠️ Fair"));
        assert!(markdown.contains("## Core Web Vitals"));
        assert!(markdown.contains("**Primary issue:** First Input Delay (FID)"));
        assert!(markdown.contains("Competitor 3 (competitor3.com)"));
        assert!(markdown.contains("**Target keywords:** sourdough"));
        assert!(markdown.contains("### Opportunities"));
        assert!(markdown.contains("*Report generated by SeoLens*"));
    }

    #[test]
    fn test_recommendations_sorted_high_first() {
        let mut analysis = mock_analysis("https://example.com");
        analysis.prioritized_recommendations.reverse();
        let markdown = generate_markdown_report(&analysis, &metadata());

        let high = markdown.find("Fix small touch targets").unwrap();
        let medium = markdown.find("Improve keyword density").unwrap();
        assert!(high < medium);
    }

    #[test]
    fn test_recommendations_grouped_by_category() {
        let mut analysis = ComprehensiveAnalysis::default();
        analysis.prioritized_recommendations = vec![
            PrioritizedRecommendation::new(Priority::Low, "Performance", "Cache fonts", "Minor", "Low"),
            PrioritizedRecommendation::new(Priority::High, "Content", "Add FAQ", "Better reach", "Medium"),
            PrioritizedRecommendation::new(Priority::High, "Performance", "Compress images", "Faster LCP", "Low"),
        ];
        let markdown = generate_markdown_report(&analysis, &metadata());
        assert!(markdown.contains("**By category:** Content (1), Performance (2)"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut analysis = ComprehensiveAnalysis::default();
        analysis.url = "https://empty.example".to_string();
        let markdown = generate_markdown_report(
            &analysis,
            &ReportMetadata {
                source: "mock".to_string(),
                duration_seconds: 0.0,
                target_keywords: Vec::new(),
            },
        );

        assert!(markdown.contains("No technical issues were reported."));
        assert!(!markdown.contains("## Recommendations"));
        assert!(!markdown.contains("## Competitors"));
        assert!(!markdown.contains("## Keywords"));
        assert!(!markdown.contains("## Summary"));
    }

    #[test]
    fn test_generate_json_report() {
        let analysis = mock_analysis("https://example.com");
        let json = generate_json_report(&analysis).unwrap();

        let parsed: ComprehensiveAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, analysis);
    }
}
