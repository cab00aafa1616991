//! The eight analysis facets.
//!
//! Each facet differs only in its prompts and in how it repairs a partial
//! answer from the model.

use super::facet::{
    analyze_facet, domain_of, number_field, parse_json_value, string_field, string_list, Facet,
    PageInput,
};
use super::html_text::{extract_text, truncate_chars};
use crate::models::{
    CompetitorAnalysis, Competitor, ContentAnalysis, Keyword, KeywordResearchAnalysis,
    MobileOptimizationAnalysis, OnPageAnalysis, SearchIntent, SiteDescriptionAnalysis,
    TechnicalSeoAnalysis, UserExperienceAnalysis, strings,
};
use crate::llm::{LlmError, TextGenerator};
use clap::ValueEnum;
use serde_json::{Map, Value};
use tracing::warn;

/// Pages shorter than this are not worth a model call.
const MIN_CONTENT_CHARS: usize = 100;

/// Text budget for the site description prompt.
const DESCRIPTION_TEXT_CHARS: usize = 12_000;

/// Text budget for competitor and keyword prompts.
const RESEARCH_TEXT_CHARS: usize = 10_000;

/// Extracted page text, or `None` when the page is too thin to analyze.
fn page_text(page: &PageInput<'_>) -> Option<String> {
    if page.html.len() < MIN_CONTENT_CHARS {
        return None;
    }
    let text = extract_text(page.html);
    if text.chars().count() < MIN_CONTENT_CHARS {
        return None;
    }
    Some(text)
}

// ---------------------------------------------------------------------------

pub struct TechnicalSeo;

impl Facet for TechnicalSeo {
    type Output = TechnicalSeoAnalysis;
    const NAME: &'static str = "technical-seo";
    const SYSTEM_PROMPT: &'static str = r#"You are a Technical SEO expert agent. Analyze the provided URL and data to evaluate:
1. Site structure and architecture
2. Page load speed and performance metrics
3. Security implementation and best practices
4. Server configuration and response times
5. Resource optimization and delivery

Provide analysis in a structured JSON format with specific metrics and recommendations.
Focus on technical aspects that affect SEO performance."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        Some(format!(
            r#"Analyze the technical SEO aspects of: {url}

HTML Content:
{html}

Provide detailed analysis including:
1. Site structure evaluation
2. Security assessment
3. Performance metrics
4. Technical optimization recommendations

Format the response as JSON with the following structure:
{{
  "scores": {{ "overall": number, "security": number, "performance": number, "structure": number }},
  "issues": [{{ "severity": string, "category": string, "description": string, "impact": string, "recommendation": string }}],
  "structure": {{ "depth": number, "internalLinks": number, "brokenLinks": number, "redirects": number, "canonicals": number }},
  "security": {{ "https": boolean, "mixedContent": boolean, "securityHeaders": string[] }},
  "performance": {{ "serverResponse": number, "resourceSize": number, "compression": boolean, "caching": boolean }},
  "recommendations": string[]
}}"#,
            url = page.url,
            html = page.html
        ))
    }
}

// ---------------------------------------------------------------------------

pub struct ContentStrategy;

impl Facet for ContentStrategy {
    type Output = ContentAnalysis;
    const NAME: &'static str = "content-strategy";
    const SYSTEM_PROMPT: &'static str = r#"You are a Content Strategy expert agent. Analyze the provided content to evaluate:
1. Content quality and readability
2. Keyword usage and optimization
3. Topic coverage and semantic relevance
4. Content structure and organization
5. User engagement potential

Provide analysis in a structured JSON format with specific metrics and recommendations.
Focus on content aspects that affect SEO performance and user engagement."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        Some(format!(
            r#"Analyze the content strategy for: {url}

Content to analyze:
{html}

Provide detailed analysis including:
1. Content quality assessment
2. Keyword analysis
3. Semantic evaluation
4. Content optimization recommendations

Format the response as JSON with the following structure:
{{
  "scores": {{ "overall": number, "readability": number, "relevance": number, "optimization": number }},
  "content": {{ "wordCount": number, "readingTime": number, "readabilityScore": number, "paragraphCount": number, "sentenceCount": number }},
  "keywords": {{ "primary": string, "secondary": string[], "density": Object, "distribution": Object }},
  "semantics": {{ "topics": string[], "entities": string[], "sentiment": number }},
  "recommendations": string[]
}}"#,
            url = page.url,
            html = page.html
        ))
    }
}

// ---------------------------------------------------------------------------

pub struct OnPageOptimization;

impl Facet for OnPageOptimization {
    type Output = OnPageAnalysis;
    const NAME: &'static str = "on-page";
    const SYSTEM_PROMPT: &'static str = r#"You are an On-Page SEO expert agent. Analyze the provided page elements to evaluate:
1. Title tag optimization
2. Meta tags implementation
3. Heading structure and hierarchy
4. Image optimization
5. URL structure

Provide analysis in a structured JSON format with specific metrics and recommendations.
Focus on on-page elements that affect SEO performance."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        Some(format!(
            r#"Analyze the on-page optimization for: {url}

HTML Content:
{html}

Provide detailed analysis including:
1. Title and meta tags assessment
2. Heading structure analysis
3. Image optimization check
4. On-page element recommendations

Format the response as JSON with the following structure:
{{
  "scores": {{ "overall": number, "titles": number, "meta": number, "headings": number, "images": number }},
  "elements": {{
    "title": {{ "content": string, "length": number, "keywords": string[] }},
    "meta": {{ "description": string, "keywords": string[], "robots": string, "canonical": string }},
    "headings": [{{ "level": number, "content": string, "keywords": string[] }}],
    "images": [{{ "src": string, "alt": string, "optimized": boolean }}]
  }},
  "recommendations": string[]
}}"#,
            url = page.url,
            html = page.html
        ))
    }
}

// ---------------------------------------------------------------------------

pub struct UserExperience;

impl Facet for UserExperience {
    type Output = UserExperienceAnalysis;
    const NAME: &'static str = "user-experience";
    const SYSTEM_PROMPT: &'static str = r#"You are a UX expert agent. Analyze the provided page to evaluate:
1. Navigation structure and user flow
2. Accessibility implementation
3. Interactive elements and engagement
4. Layout effectiveness
5. User behavior patterns

Provide analysis in a structured JSON format with specific metrics and recommendations.
Focus on user experience aspects that affect SEO and user engagement."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        Some(format!(
            r#"Analyze the user experience for: {url}

HTML Content:
{html}

Provide detailed analysis including:
1. Navigation assessment
2. Accessibility evaluation
3. Interaction analysis
4. UX optimization recommendations

Format the response as JSON with the following structure:
{{
  "scores": {{ "overall": number, "navigation": number, "accessibility": number, "interactivity": number, "layout": number }},
  "navigation": {{
    "menuStructure": {{ "depth": number, "clarity": number, "consistency": number }},
    "userFlow": {{ "pathLength": number, "clickDepth": number, "deadEnds": number }},
    "searchability": {{ "searchPresent": boolean, "filterOptions": number, "searchPlacement": string }}
  }},
  "accessibility": {{ "contrast": number, "focusability": boolean, "ariaLabels": boolean, "keyboardNav": boolean, "textScaling": boolean }},
  "interactivity": {{
    "cta": {{ "visibility": number, "placement": string[], "effectiveness": number }},
    "forms": {{ "usability": number, "validation": boolean, "feedback": boolean }},
    "engagement": {{ "scrollDepth": number, "interactionRate": number, "bounceRate": number }}
  }},
  "recommendations": string[]
}}"#,
            url = page.url,
            html = page.html
        ))
    }
}

// ---------------------------------------------------------------------------

pub struct MobileOptimization;

impl Facet for MobileOptimization {
    type Output = MobileOptimizationAnalysis;
    const NAME: &'static str = "mobile";
    const SYSTEM_PROMPT: &'static str = r#"You are a Mobile Optimization expert agent. Analyze the provided page to evaluate:
1. Mobile responsiveness and adaptation
2. Touch interaction optimization
3. Mobile performance metrics
4. Device compatibility
5. Mobile-specific features

Provide analysis in a structured JSON format with specific metrics and recommendations.
Focus on mobile optimization aspects that affect SEO and user experience."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        Some(format!(
            r#"Analyze the mobile optimization for: {url}

HTML Content:
{html}

Provide detailed analysis including:
1. Responsive design assessment
2. Touch target evaluation
3. Mobile performance metrics
4. Mobile optimization recommendations

Format the response as JSON with the following structure:
{{
  "scores": {{ "overall": number, "responsiveness": number, "performance": number, "usability": number, "compatibility": number }},
  "viewport": {{ "configured": boolean, "responsive": boolean, "initialScale": number, "userScalable": boolean }},
  "touchTargets": {{ "adequateSize": boolean, "spacing": number, "tapTargets": {{ "total": number, "problematic": number }} }},
  "performance": {{ "mobileSpeed": number, "resourceSize": number, "imageOptimization": boolean, "lazyLoading": boolean }},
  "compatibility": {{ "mobileFirst": boolean, "mediaQueries": string[], "fontScaling": boolean, "orientationSupport": boolean }},
  "recommendations": string[]
}}"#,
            url = page.url,
            html = page.html
        ))
    }
}

// ---------------------------------------------------------------------------

pub struct SiteDescription;

impl Facet for SiteDescription {
    type Output = SiteDescriptionAnalysis;
    const NAME: &'static str = "site-description";
    const SYSTEM_PROMPT: &'static str = r#"You are a Site Description expert agent. Your task is to analyze website content and provide a comprehensive description.

Follow these guidelines:
1. Extract the main purpose and focus of the website
2. Identify the industry/category the site belongs to
3. Determine the likely target audience based on content, tone, and offerings
4. Assess the main purpose (e.g., e-commerce, information, lead generation)
5. Categorize the types of content present (e.g., blog posts, product pages)

Provide a concise but informative description that captures the essence of the website.
Focus on accuracy and objectivity in your analysis."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        let text = page_text(page)?;
        Some(format!(
            r#"Analyze the following website and provide a comprehensive description:
URL: {url}

Website Content:
{text}

Based on this content, provide:
1. A concise 2-3 sentence overview of what the site is about
2. The industry/category the site belongs to
3. The likely target audience
4. The main purpose of the site (e.g., e-commerce, information, lead generation)
5. The type of content on the site

Format the response as JSON with the following structure:
{{
  "description": "A concise description of the website",
  "category": "The industry/category",
  "targetAudience": ["Primary audience", "Secondary audience"],
  "mainPurpose": "The main purpose of the site",
  "contentType": ["Blog posts", "Product pages"]
}}"#,
            url = page.url,
            text = truncate_chars(&text, DESCRIPTION_TEXT_CHARS)
        ))
    }

    fn interpret(response: &str, _url: &str) -> SiteDescriptionAnalysis {
        let defaults = SiteDescriptionAnalysis::default();

        match parse_json_value(response) {
            Some(Value::Object(map)) => match string_field(&map, "description") {
                Some(description) => SiteDescriptionAnalysis {
                    description,
                    category: string_field(&map, "category").unwrap_or(defaults.category),
                    target_audience: string_list(&map, "targetAudience")
                        .unwrap_or(defaults.target_audience),
                    main_purpose: string_field(&map, "mainPurpose").unwrap_or(defaults.main_purpose),
                    content_type: string_list(&map, "contentType").unwrap_or(defaults.content_type),
                },
                None => {
                    warn!("site-description: response has no description field");
                    SiteDescriptionAnalysis {
                        description: "Invalid response format".to_string(),
                        ..defaults
                    }
                }
            },
            Some(Value::String(text)) if !text.trim().is_empty() => SiteDescriptionAnalysis {
                description: text,
                ..defaults
            },
            Some(_) => SiteDescriptionAnalysis {
                description: "Invalid response format".to_string(),
                ..defaults
            },
            None if !response.trim().is_empty() => {
                warn!("site-description: response is not JSON, using it as the description");
                SiteDescriptionAnalysis {
                    description: truncate_chars(response, 500).to_string(),
                    ..defaults
                }
            }
            None => defaults,
        }
    }
}

// ---------------------------------------------------------------------------

pub struct CompetitorResearch;

impl Facet for CompetitorResearch {
    type Output = CompetitorAnalysis;
    const NAME: &'static str = "competitors";
    const SYSTEM_PROMPT: &'static str = r#"You are a Competitor Analysis expert agent. Your task is to analyze a website and identify its main competitors.

Follow these guidelines:
1. Identify the main competitors in the same niche based on the website's content and purpose
2. Assess the competitive landscape
3. Identify market gaps and opportunities
4. Suggest competitive strategies
5. Analyze competitor strengths and weaknesses

Provide a comprehensive analysis with specific insights.
Focus on providing actionable competitive intelligence."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        let text = page_text(page)?;
        Some(format!(
            r#"Analyze the following website and identify its main competitors:
URL: {url}

Website Content:
{text}

Based on this content, provide:
1. Identify 3-5 main competitors in the same niche
2. For each competitor, provide:
   - Their name
   - Their URL (make an educated guess if not mentioned)
   - An overlap score (0-100) indicating how much their offerings overlap
   - Common keywords they might target
   - Their strengths
   - Their weaknesses
3. Assess the competitive landscape
4. Identify market gaps and opportunities
5. Suggest competitive strategies

Format the response as JSON with the following structure:
{{
  "mainCompetitors": [
    {{
      "name": "Competitor Name",
      "url": "competitor-url.com",
      "overlapScore": 85,
      "commonKeywords": ["keyword1", "keyword2"],
      "strengths": ["strength1", "strength2"],
      "weaknesses": ["weakness1", "weakness2"]
    }}
  ],
  "competitiveLandscape": "Description of the competitive landscape",
  "marketGaps": ["Gap 1", "Gap 2"],
  "recommendedStrategies": ["Strategy 1", "Strategy 2"]
}}"#,
            url = page.url,
            text = truncate_chars(&text, RESEARCH_TEXT_CHARS)
        ))
    }

    fn fallback(url: &str) -> CompetitorAnalysis {
        let domain = domain_of(url);
        CompetitorAnalysis {
            main_competitors: vec![
                Competitor {
                    name: format!("Competitor 1 for {}", domain),
                    url: format!("competitor1-for-{}", domain),
                    overlap_score: 75.0,
                    common_keywords: strings(&["industry term", "service keyword", "product type"]),
                    strengths: strings(&["Established brand", "Comprehensive offering"]),
                    weaknesses: strings(&["Outdated interface", "Higher pricing"]),
                },
                Competitor {
                    name: format!("Competitor 2 for {}", domain),
                    url: format!("competitor2-for-{}", domain),
                    overlap_score: 65.0,
                    common_keywords: strings(&[
                        "industry term",
                        "alternative solution",
                        "service type",
                    ]),
                    strengths: strings(&["Modern design", "Competitive pricing"]),
                    weaknesses: strings(&["Limited features", "Newer to market"]),
                },
            ],
            competitive_landscape: format!(
                "The market for services similar to {} is competitive with several established players.",
                domain
            ),
            market_gaps: strings(&[
                "Budget-friendly solutions",
                "Specialized features for niche segments",
            ]),
            recommended_strategies: strings(&[
                "Highlight unique value proposition",
                "Target underserved market segments",
            ]),
        }
    }

    fn interpret(response: &str, url: &str) -> CompetitorAnalysis {
        let Some(Value::Object(map)) = parse_json_value(response) else {
            warn!("competitors: could not parse model response, using defaults");
            return Self::fallback(url);
        };

        let main_competitors: Vec<Competitor> = map
            .get("mainCompetitors")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(normalize_competitor).collect())
            .unwrap_or_default();

        CompetitorAnalysis {
            main_competitors: if main_competitors.is_empty() {
                Self::fallback(url).main_competitors
            } else {
                main_competitors
            },
            competitive_landscape: string_field(&map, "competitiveLandscape").unwrap_or_else(|| {
                "No competitive landscape analysis available.".to_string()
            }),
            market_gaps: string_list(&map, "marketGaps").unwrap_or_default(),
            recommended_strategies: string_list(&map, "recommendedStrategies").unwrap_or_default(),
        }
    }
}

fn normalize_competitor(value: &Value) -> Competitor {
    let empty = Map::new();
    let map = value.as_object().unwrap_or(&empty);
    Competitor {
        name: string_field(map, "name").unwrap_or_else(|| "Unknown Competitor".to_string()),
        url: string_field(map, "url").unwrap_or_else(|| "unknown-competitor.com".to_string()),
        overlap_score: number_field(map, "overlapScore").unwrap_or(50.0),
        common_keywords: string_list(map, "commonKeywords").unwrap_or_default(),
        strengths: string_list(map, "strengths").unwrap_or_default(),
        weaknesses: string_list(map, "weaknesses").unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------

pub struct KeywordResearch;

impl Facet for KeywordResearch {
    type Output = KeywordResearchAnalysis;
    const NAME: &'static str = "keywords";
    const SYSTEM_PROMPT: &'static str = r#"You are a Keyword Research expert agent. Your task is to analyze website content and identify relevant keywords.

Follow these guidelines:
1. Identify primary and secondary keywords based on the website's content
2. Discover long-tail keyword opportunities
3. Assess keyword difficulty and search volume
4. Identify keyword gaps
5. Recommend keyword focus areas

Provide a comprehensive analysis with specific insights.
Focus on providing actionable keyword intelligence."#;

    fn user_prompt(page: &PageInput<'_>) -> Option<String> {
        let text = page_text(page)?;
        Some(format!(
            r#"Analyze the following website and identify its main keywords:
URL: {url}

Website Content:
{text}

Based on this content, provide:
1. Identify 5-10 primary keywords that are most relevant to this website
2. Identify 5-10 secondary keywords that support the primary keywords
3. Discover 5-10 long-tail keyword opportunities
4. Identify keyword gaps (keywords the site should target but doesn't)
5. Recommend keyword focus areas

For each keyword, estimate:
- Monthly search volume (realistic estimate)
- Keyword difficulty (0-100)
- Relevance to the website (0-10)
- Search intent (informational, navigational, transactional, commercial)

Format the response as JSON with the following structure:
{{
  "primaryKeywords": [
    {{ "keyword": "main keyword", "volume": 1000, "difficulty": 65, "relevance": 9, "intent": "informational" }}
  ],
  "secondaryKeywords": [],
  "longTailKeywords": [],
  "keywordGaps": ["Gap 1", "Gap 2"],
  "recommendedFocus": ["Focus 1", "Focus 2"]
}}"#,
            url = page.url,
            text = truncate_chars(&text, RESEARCH_TEXT_CHARS)
        ))
    }

    fn fallback(url: &str) -> KeywordResearchAnalysis {
        let domain = domain_of(url);
        let base = domain.split('.').next().unwrap_or(&domain).to_string();
        KeywordResearchAnalysis {
            primary_keywords: vec![
                Keyword::new(base.clone(), 1200, 65.0, 10.0, SearchIntent::Navigational),
                Keyword::new(format!("{} services", base), 880, 55.0, 9.0, SearchIntent::Commercial),
                Keyword::new(format!("{} reviews", base), 590, 40.0, 8.0, SearchIntent::Informational),
            ],
            secondary_keywords: vec![
                Keyword::new(format!("{} pricing", base), 320, 35.0, 7.0, SearchIntent::Commercial),
                Keyword::new(format!("{} alternatives", base), 210, 45.0, 6.0, SearchIntent::Commercial),
            ],
            long_tail_keywords: vec![
                Keyword::new(format!("how to use {}", base), 140, 25.0, 8.0, SearchIntent::Informational),
                Keyword::new(format!("is {} worth it", base), 90, 20.0, 7.0, SearchIntent::Informational),
            ],
            keyword_gaps: vec![format!("{} tutorial", base), format!("{} vs competitors", base)],
            recommended_focus: vec![format!("{} benefits", base), format!("{} features", base)],
        }
    }

    fn interpret(response: &str, url: &str) -> KeywordResearchAnalysis {
        let Some(Value::Object(map)) = parse_json_value(response) else {
            warn!("keywords: could not parse model response, using defaults");
            return Self::fallback(url);
        };

        let tier = |key: &str| -> Vec<Keyword> {
            map.get(key)
                .and_then(Value::as_array)
                .map(|items| items.iter().map(normalize_keyword).collect())
                .unwrap_or_default()
        };

        let fallback = Self::fallback(url);
        let or_default = |parsed: Vec<Keyword>, default: Vec<Keyword>| {
            if parsed.is_empty() {
                default
            } else {
                parsed
            }
        };

        KeywordResearchAnalysis {
            primary_keywords: or_default(tier("primaryKeywords"), fallback.primary_keywords),
            secondary_keywords: or_default(tier("secondaryKeywords"), fallback.secondary_keywords),
            long_tail_keywords: or_default(tier("longTailKeywords"), fallback.long_tail_keywords),
            keyword_gaps: string_list(&map, "keywordGaps").unwrap_or_default(),
            recommended_focus: string_list(&map, "recommendedFocus").unwrap_or_default(),
        }
    }
}

/// Fills the gaps in one keyword entry. Missing numbers get mid-range values.
fn normalize_keyword(value: &Value) -> Keyword {
    let empty = Map::new();
    let map = value.as_object().unwrap_or(&empty);
    Keyword {
        keyword: string_field(map, "keyword").unwrap_or_else(|| "Unknown Keyword".to_string()),
        volume: number_field(map, "volume")
            .map(|v| v.max(0.0).round() as u64)
            .unwrap_or(500),
        difficulty: number_field(map, "difficulty").unwrap_or(50.0),
        relevance: number_field(map, "relevance").unwrap_or(5.0),
        intent: map
            .get("intent")
            .and_then(Value::as_str)
            .and_then(SearchIntent::parse)
            .unwrap_or_default(),
    }
}

/// Facet selector for running a single analysis from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FacetKind {
    Technical,
    Content,
    OnPage,
    UserExperience,
    Mobile,
    SiteDescription,
    Competitors,
    Keywords,
}

impl FacetKind {
    /// Runs the selected facet and returns its record as JSON.
    pub async fn run(
        self,
        generator: &dyn TextGenerator,
        page: &PageInput<'_>,
    ) -> Result<Value, LlmError> {
        match self {
            FacetKind::Technical => to_value(analyze_facet::<TechnicalSeo>(generator, page).await?),
            FacetKind::Content => to_value(analyze_facet::<ContentStrategy>(generator, page).await?),
            FacetKind::OnPage => to_value(analyze_facet::<OnPageOptimization>(generator, page).await?),
            FacetKind::UserExperience => {
                to_value(analyze_facet::<UserExperience>(generator, page).await?)
            }
            FacetKind::Mobile => to_value(analyze_facet::<MobileOptimization>(generator, page).await?),
            FacetKind::SiteDescription => {
                to_value(analyze_facet::<SiteDescription>(generator, page).await?)
            }
            FacetKind::Competitors => {
                to_value(analyze_facet::<CompetitorResearch>(generator, page).await?)
            }
            FacetKind::Keywords => to_value(analyze_facet::<KeywordResearch>(generator, page).await?),
        }
    }
}

fn to_value<T: serde::Serialize>(record: T) -> Result<Value, LlmError> {
    serde_json::to_value(record).map_err(|e| LlmError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_page() -> String {
        let body = "Handmade sourdough bread and pastries baked fresh every morning in Lisbon. ".repeat(4);
        format!("<html><head><title>Padaria</title></head><body><p>{}</p></body></html>", body)
    }

    #[test]
    fn test_research_prompts_need_content() {
        let short = PageInput::new("https://example.com", "<p>hi</p>");
        assert!(SiteDescription::user_prompt(&short).is_none());
        assert!(CompetitorResearch::user_prompt(&short).is_none());
        assert!(KeywordResearch::user_prompt(&short).is_none());

        // long markup, but almost no text
        let markup = format!("<div>{}</div>", "<span></span>".repeat(20));
        let thin = PageInput::new("https://example.com", &markup);
        assert!(SiteDescription::user_prompt(&thin).is_none());

        let html = long_page();
        let page = PageInput::new("https://example.com", &html);
        let prompt = SiteDescription::user_prompt(&page).unwrap();
        assert!(prompt.contains("Handmade sourdough"));
        assert!(!prompt.contains("<p>"));
    }

    #[test]
    fn test_html_facets_always_prompt() {
        let page = PageInput::new("https://example.com", "");
        assert!(TechnicalSeo::user_prompt(&page).is_some());
        assert!(ContentStrategy::user_prompt(&page).is_some());
        assert!(OnPageOptimization::user_prompt(&page).is_some());
        assert!(UserExperience::user_prompt(&page).is_some());
        assert!(MobileOptimization::user_prompt(&page).is_some());
    }

    #[test]
    fn test_site_description_interpret() {
        let parsed = SiteDescription::interpret(
            r#"{"description": "A bakery", "targetAudience": ["Locals"]}"#,
            "https://example.com",
        );
        assert_eq!(parsed.description, "A bakery");
        assert_eq!(parsed.target_audience, vec!["Locals"]);
        assert_eq!(parsed.main_purpose, "Information");

        let missing = SiteDescription::interpret(r#"{"category": "Food"}"#, "https://example.com");
        assert_eq!(missing.description, "Invalid response format");

        let prose = SiteDescription::interpret("This is a bakery website.", "https://example.com");
        assert_eq!(prose.description, "This is a bakery website.");

        let long = "x".repeat(900);
        let clipped = SiteDescription::interpret(&long, "https://example.com");
        assert_eq!(clipped.description.len(), 500);

        let empty = SiteDescription::interpret("", "https://example.com");
        assert_eq!(empty, SiteDescriptionAnalysis::default());
    }

    #[test]
    fn test_competitor_interpret_normalizes() {
        let parsed = CompetitorResearch::interpret(
            r#"{"mainCompetitors": [{"name": "Rival Bakery"}, {}], "marketGaps": ["Vegan"]}"#,
            "https://example.com",
        );
        assert_eq!(parsed.main_competitors.len(), 2);
        assert_eq!(parsed.main_competitors[0].name, "Rival Bakery");
        assert_eq!(parsed.main_competitors[0].overlap_score, 50.0);
        assert_eq!(parsed.main_competitors[1].url, "unknown-competitor.com");
        assert_eq!(parsed.competitive_landscape, "No competitive landscape analysis available.");
        assert_eq!(parsed.market_gaps, vec!["Vegan"]);
    }

    #[test]
    fn test_competitor_fallbacks() {
        let empty = CompetitorResearch::interpret(r#"{"mainCompetitors": []}"#, "https://www.padaria.pt");
        assert_eq!(empty.main_competitors[0].name, "Competitor 1 for padaria.pt");

        let broken = CompetitorResearch::interpret("{{{", "https://www.padaria.pt");
        assert_eq!(broken, CompetitorResearch::fallback("https://www.padaria.pt"));
        assert!(broken.competitive_landscape.contains("padaria.pt"));
    }

    #[test]
    fn test_keyword_interpret_normalizes() {
        let parsed = KeywordResearch::interpret(
            r#"{"primaryKeywords": [{"keyword": "sourdough", "volume": 880.4, "intent": "Transactional"},
                                    {"intent": "shopping"}],
                "keywordGaps": ["gluten free bread"]}"#,
            "https://www.padaria.pt",
        );
        assert_eq!(parsed.primary_keywords.len(), 2);
        assert_eq!(parsed.primary_keywords[0].volume, 880);
        assert_eq!(parsed.primary_keywords[0].intent, SearchIntent::Transactional);
        assert_eq!(parsed.primary_keywords[0].difficulty, 50.0);
        assert_eq!(parsed.primary_keywords[1].keyword, "Unknown Keyword");
        assert_eq!(parsed.primary_keywords[1].intent, SearchIntent::Informational);
        // empty tiers come from the domain-based defaults
        assert_eq!(parsed.secondary_keywords[0].keyword, "padaria pricing");
        assert_eq!(parsed.keyword_gaps, vec!["gluten free bread"]);
        assert!(parsed.recommended_focus.is_empty());
    }

    #[tokio::test]
    async fn test_facet_kind_dispatch() {
        struct Fixed;

        #[async_trait::async_trait]
        impl TextGenerator for Fixed {
            async fn generate(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
                Ok(r#"{"scores": {"overall": 61}}"#.to_string())
            }
        }

        let page = PageInput::new("https://example.com", "<html><body>hi</body></html>");
        let technical = FacetKind::Technical.run(&Fixed, &page).await.unwrap();
        assert_eq!(technical["scores"]["overall"], 61.0);

        // too little text for the description prompt
        let described = FacetKind::SiteDescription.run(&Fixed, &page).await.unwrap();
        assert_eq!(described["category"], "Unknown");
    }

    #[test]
    fn test_keyword_fallback_uses_domain_label() {
        let fallback = KeywordResearch::fallback("https://www.example.com/");
        assert_eq!(fallback.primary_keywords[0].keyword, "example");
        assert_eq!(fallback.primary_keywords[0].intent, SearchIntent::Navigational);
        assert_eq!(fallback.long_tail_keywords[1].keyword, "is example worth it");
    }
}
