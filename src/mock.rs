//! Canned analysis used when no API key is configured, by the `/analyze`
//! endpoint, and when a keyed analysis fails for a reason other than
//! credentials.

use crate::models::*;
use chrono::{Duration, SecondsFormat, Utc};
use std::collections::BTreeMap;

/// A complete report for `url` with plausible fixed values.
pub fn mock_analysis(url: &str) -> ComprehensiveAnalysis {
    let now = Utc::now();

    ComprehensiveAnalysis {
        url: url.to_string(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        overall_score: 75.0,
        metrics: WebVitals::placeholder(),
        technical: technical(now + Duration::days(90)),
        content: content(),
        on_page: on_page(url),
        user_experience: user_experience(),
        mobile: mobile(),
        site_description: SiteDescriptionAnalysis {
            description: "This website appears to be focused on providing information and services related to its industry. It features a modern design with clear navigation and multiple content sections.".to_string(),
            category: "Business / Services".to_string(),
            target_audience: strings(&["Business professionals", "Potential customers", "Industry enthusiasts"]),
            main_purpose: "Information / Lead Generation".to_string(),
            content_type: strings(&["Product information", "Blog posts", "Contact information"]),
        },
        competitor_analysis: competitors(),
        keyword_research: keywords(),
        prioritized_recommendations: vec![
            PrioritizedRecommendation::new(
                Priority::High,
                "Performance",
                "Implement code splitting",
                "Significant improvement in load times",
                "Medium",
            ),
            PrioritizedRecommendation::new(
                Priority::High,
                "Mobile",
                "Fix small touch targets",
                "Better mobile usability",
                "Low",
            ),
            PrioritizedRecommendation::new(
                Priority::Medium,
                "Content",
                "Improve keyword density",
                "Better search ranking",
                "Medium",
            ),
        ],
        summary: AnalysisSummary {
            strengths: strings(&[
                "Good mobile responsiveness",
                "Proper HTTPS implementation",
                "Clear navigation structure",
            ]),
            weaknesses: strings(&[
                "JavaScript performance issues",
                "Missing alt text on images",
                "Keyword optimization",
            ]),
            opportunities: strings(&[
                "Implement structured data",
                "Optimize for Core Web Vitals",
                "Enhance content depth",
            ]),
        },
    }
}

fn technical(ssl_expiry: chrono::DateTime<Utc>) -> TechnicalSeoAnalysis {
    TechnicalSeoAnalysis {
        scores: TechnicalScores {
            overall: 78.0,
            security: 85.0,
            performance: 72.0,
            structure: 80.0,
        },
        issues: vec![
            TechnicalIssue {
                severity: "high".to_string(),
                category: "Performance".to_string(),
                description: "Large JavaScript bundles are slowing down page load".to_string(),
                impact: "Increases LCP and reduces user engagement".to_string(),
                recommendation: "Implement code splitting and lazy loading".to_string(),
            },
            TechnicalIssue {
                severity: "medium".to_string(),
                category: "Security".to_string(),
                description: "Missing Content-Security-Policy header".to_string(),
                impact: "Increases vulnerability to XSS attacks".to_string(),
                recommendation: "Implement a strict CSP header".to_string(),
            },
        ],
        structure: SiteStructure {
            depth: 3,
            internal_links: 45,
            broken_links: 2,
            redirects: 5,
            canonicals: 12,
        },
        security: SecurityReport {
            https: true,
            mixed_content: false,
            security_headers: strings(&["X-Content-Type-Options", "X-Frame-Options"]),
            ssl_expiry: Some(ssl_expiry.to_rfc3339_opts(SecondsFormat::Millis, true)),
        },
        performance: ServerPerformance {
            server_response: 250.0,
            resource_size: 2.5,
            compression: true,
            caching: true,
        },
        recommendations: strings(&[
            "Implement code splitting for JavaScript bundles",
            "Add missing security headers",
            "Fix broken links on pages",
        ]),
    }
}

fn content() -> ContentAnalysis {
    ContentAnalysis {
        scores: ContentScores {
            overall: 75.0,
            readability: 80.0,
            relevance: 70.0,
            optimization: 75.0,
        },
        content: ContentStats {
            word_count: 1200,
            reading_time: 5.0,
            readability_score: 65.0,
            paragraph_count: 12,
            sentence_count: 48,
        },
        keywords: ContentKeywords {
            primary: "seo analysis".to_string(),
            secondary: strings(&["technical seo", "content optimization"]),
            density: BTreeMap::from([("seo analysis".to_string(), 2.5)]),
            distribution: BTreeMap::from([("seo analysis".to_string(), 0.8)]),
        },
        semantics: Semantics {
            topics: strings(&["SEO", "Web Performance", "Content Strategy"]),
            entities: strings(&["Google", "Search Console"]),
            sentiment: 0.6,
        },
        recommendations: strings(&["Improve keyword density", "Add more relevant entities"]),
    }
}

fn on_page(url: &str) -> OnPageAnalysis {
    OnPageAnalysis {
        scores: OnPageScores {
            overall: 70.0,
            titles: 85.0,
            meta: 65.0,
            headings: 75.0,
            images: 60.0,
        },
        elements: PageElements {
            title: TitleElement {
                content: "SEO Analysis Tool | Optimize Your Website".to_string(),
                length: 42,
                keywords: strings(&["SEO", "Analysis", "Optimize"]),
            },
            meta: MetaElement {
                description: "Analyze your website for SEO issues and get recommendations".to_string(),
                keywords: strings(&["SEO", "Analysis"]),
                robots: "index,follow".to_string(),
                canonical: url.to_string(),
            },
            headings: vec![
                HeadingElement {
                    level: 1,
                    content: "SEO Analysis Dashboard".to_string(),
                    keywords: strings(&["SEO", "Analysis"]),
                },
                HeadingElement {
                    level: 2,
                    content: "Technical Performance".to_string(),
                    keywords: strings(&["Technical", "Performance"]),
                },
            ],
            images: vec![
                ImageElement {
                    src: "/logo.png".to_string(),
                    alt: "SEO Analysis Tool Logo".to_string(),
                    optimized: true,
                },
                ImageElement {
                    src: "/hero.jpg".to_string(),
                    alt: String::new(),
                    optimized: false,
                },
            ],
        },
        recommendations: strings(&["Add alt text to all images", "Improve meta description"]),
    }
}

fn user_experience() -> UserExperienceAnalysis {
    UserExperienceAnalysis {
        scores: UxScores {
            overall: 72.0,
            navigation: 75.0,
            accessibility: 68.0,
            interactivity: 70.0,
            layout: 80.0,
        },
        navigation: Navigation {
            menu_structure: MenuStructure {
                depth: 2,
                clarity: 80.0,
                consistency: 90.0,
            },
            user_flow: UserFlow {
                path_length: 3,
                click_depth: 2,
                dead_ends: 0,
            },
            searchability: Searchability {
                search_present: true,
                filter_options: 3,
                search_placement: "header".to_string(),
            },
        },
        accessibility: Accessibility {
            contrast: 4.5,
            focusability: true,
            aria_labels: false,
            keyboard_nav: true,
            text_scaling: true,
        },
        interactivity: Interactivity {
            cta: CallToAction {
                visibility: 85.0,
                placement: strings(&["above fold", "end of content"]),
                effectiveness: 75.0,
            },
            forms: Forms {
                usability: 80.0,
                validation: true,
                feedback: true,
            },
            engagement: Engagement {
                scroll_depth: 65.0,
                interaction_rate: 35.0,
                bounce_rate: 45.0,
            },
        },
        recommendations: strings(&[
            "Add ARIA labels to interactive elements",
            "Improve CTA visibility",
        ]),
    }
}

fn mobile() -> MobileOptimizationAnalysis {
    MobileOptimizationAnalysis {
        scores: MobileScores {
            overall: 80.0,
            responsiveness: 85.0,
            performance: 75.0,
            usability: 80.0,
            compatibility: 85.0,
        },
        viewport: Viewport {
            configured: true,
            responsive: true,
            initial_scale: 1.0,
            user_scalable: true,
        },
        touch_targets: TouchTargets {
            adequate_size: true,
            spacing: 12.0,
            tap_targets: TapTargets {
                total: 24,
                problematic: 2,
            },
        },
        performance: MobilePerformance {
            mobile_speed: 75.0,
            resource_size: 1.8,
            image_optimization: true,
            lazy_loading: true,
        },
        compatibility: MobileCompatibility {
            mobile_first: true,
            media_queries: strings(&["screen", "max-width"]),
            font_scaling: true,
            orientation_support: true,
        },
        recommendations: strings(&["Fix small touch targets", "Optimize images further for mobile"]),
    }
}

fn competitor(n: u8, overlap_score: f64, strengths: &[&str], weaknesses: &[&str]) -> Competitor {
    let keywords = if n == 1 {
        strings(&["industry term 1", "service keyword", "product type"])
    } else {
        vec![
            format!("industry term {}", n),
            format!("service keyword {}", n),
            format!("product type {}", n),
        ]
    };
    Competitor {
        name: format!("Competitor {}", n),
        url: format!("competitor{}.com", n),
        overlap_score,
        common_keywords: keywords,
        strengths: strings(strengths),
        weaknesses: strings(weaknesses),
    }
}

fn competitors() -> CompetitorAnalysis {
    CompetitorAnalysis {
        main_competitors: vec![
            competitor(
                1,
                85.0,
                &["Strong brand recognition", "Comprehensive feature set"],
                &["Outdated interface", "Limited mobile support"],
            ),
            competitor(
                2,
                75.0,
                &["Advanced features", "Modern interface"],
                &["Higher price point", "Steeper learning curve"],
            ),
            competitor(
                3,
                60.0,
                &["Brand recognition", "Large user base"],
                &["Less specialized", "Different target audience"],
            ),
        ],
        competitive_landscape: "The market is competitive with several established players offering similar services with different specializations and price points.".to_string(),
        market_gaps: strings(&[
            "Budget-friendly solutions",
            "Specialized features for niche segments",
            "Simplified user experience",
        ]),
        recommended_strategies: strings(&[
            "Highlight unique value proposition",
            "Target underserved market segments",
            "Improve content marketing",
        ]),
    }
}

fn keywords() -> KeywordResearchAnalysis {
    use SearchIntent::*;

    KeywordResearchAnalysis {
        primary_keywords: vec![
            Keyword::new("main industry keyword", 2200, 65.0, 9.0, Commercial),
            Keyword::new("main product keyword", 1800, 55.0, 9.0, Transactional),
            Keyword::new("main service keyword", 1200, 45.0, 8.0, Informational),
            Keyword::new("competitor keyword", 1500, 70.0, 8.0, Commercial),
            Keyword::new("specific feature keyword", 900, 40.0, 7.0, Transactional),
        ],
        secondary_keywords: vec![
            Keyword::new("secondary keyword 1", 800, 35.0, 6.0, Informational),
            Keyword::new("secondary keyword 2", 1100, 50.0, 6.0, Informational),
            Keyword::new("secondary keyword 3", 750, 30.0, 7.0, Informational),
        ],
        long_tail_keywords: vec![
            Keyword::new("long tail keyword 1", 320, 25.0, 7.0, Informational),
            Keyword::new("long tail keyword 2", 210, 20.0, 8.0, Commercial),
            Keyword::new("long tail keyword 3", 280, 15.0, 8.0, Informational),
        ],
        keyword_gaps: strings(&[
            "Budget solutions",
            "Industry-specific applications",
            "Integration capabilities",
        ]),
        recommended_focus: strings(&[
            "Main product features",
            "Industry-specific solutions",
            "Cost-effective alternatives",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_is_complete() {
        let mock = mock_analysis("https://example.com");
        assert_eq!(mock.url, "https://example.com");
        assert_eq!(mock.overall_score, 75.0);
        assert_eq!(mock.metrics, WebVitals::placeholder());
        assert_eq!(mock.competitor_analysis.main_competitors.len(), 3);
        assert_eq!(mock.keyword_research.all_keywords().count(), 11);
        assert_eq!(mock.on_page.elements.meta.canonical, "https://example.com");
        assert_eq!(mock.prioritized_recommendations.len(), 3);
        assert!(!mock.summary.is_empty());
    }

    #[test]
    fn test_mock_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(mock_analysis("https://example.com")).unwrap();
        assert_eq!(value["overallScore"], 75.0);
        assert_eq!(value["metrics"]["mobileScore"], 78.0);
        assert_eq!(value["competitorAnalysis"]["mainCompetitors"][1]["url"], "competitor2.com");
        assert_eq!(value["keywordResearch"]["primaryKeywords"][0]["intent"], "commercial");
        assert!(value["technical"]["security"]["sslExpiry"].is_string());
    }

    #[test]
    fn test_ssl_expiry_is_in_the_future() {
        let mock = mock_analysis("https://example.com");
        let expiry = mock.technical.security.ssl_expiry.unwrap();
        let expiry = chrono::DateTime::parse_from_rfc3339(&expiry).unwrap().with_timezone(&Utc);
        assert!(expiry > Utc::now() + Duration::days(89));
    }
}
