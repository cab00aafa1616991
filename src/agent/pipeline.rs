//! Top-level analysis runs with their give-up timers.
//!
//! Without a generator the canned report is returned. With one, the eight
//! facets run under a deadline; credential failures reach the caller, any
//! other failure or an expired deadline falls back to the canned report.

use super::deadline::{race_deadline, DeadlineError};
use super::facet::PageInput;
use super::facets::FacetKind;
use super::orchestrator::Orchestrator;
use crate::llm::{LlmError, TextGenerator};
use crate::mock::mock_analysis;
use crate::models::ComprehensiveAnalysis;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Where a finished report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Model,
    /// Canned data, with the reason it was used.
    Mock(MockReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReason {
    NoApiKey,
    Requested,
    TimedOut,
    Failed,
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: ComprehensiveAnalysis,
    pub source: AnalysisSource,
}

#[derive(Debug, Error)]
pub enum FacetRunError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Deadline(#[from] DeadlineError),
}

/// Runs the full analysis for `url`.
pub async fn analyze_website(
    generator: Option<Arc<dyn TextGenerator>>,
    url: &str,
    html: &str,
    limit: Duration,
) -> Result<AnalysisOutcome, LlmError> {
    let Some(generator) = generator else {
        info!("No API key configured, using mock analysis for {}", url);
        return Ok(AnalysisOutcome::mocked(url, MockReason::NoApiKey));
    };

    let owned_url = url.to_string();
    let owned_html = html.to_string();
    let run = async move {
        Orchestrator::new(generator.as_ref())
            .analyze(&owned_url, &owned_html)
            .await
    };

    match race_deadline("Website analysis", limit, run).await {
        Ok(Ok(analysis)) => Ok(AnalysisOutcome {
            analysis,
            source: AnalysisSource::Model,
        }),
        Ok(Err(e)) if e.is_credential_error() => Err(e),
        Ok(Err(e)) => {
            warn!("Analysis failed, falling back to mock data: {}", e);
            Ok(AnalysisOutcome::mocked(url, MockReason::Failed))
        }
        Err(DeadlineError::Elapsed { seconds, .. }) => {
            warn!("Analysis gave no answer within {}s, falling back to mock data", seconds);
            Ok(AnalysisOutcome::mocked(url, MockReason::TimedOut))
        }
        Err(e) => {
            warn!("{}, falling back to mock data", e);
            Ok(AnalysisOutcome::mocked(url, MockReason::Failed))
        }
    }
}

/// Runs one facet on its own under `limit`.
pub async fn run_facet(
    generator: Arc<dyn TextGenerator>,
    kind: FacetKind,
    url: &str,
    html: &str,
    limit: Duration,
) -> Result<Value, FacetRunError> {
    let owned_url = url.to_string();
    let owned_html = html.to_string();
    let run = async move {
        let page = PageInput::new(&owned_url, &owned_html);
        kind.run(generator.as_ref(), &page).await
    };

    let label = format!("{:?} analysis", kind);
    Ok(race_deadline(&label, limit, run).await??)
}

impl AnalysisOutcome {
    /// The canned report for `url`.
    pub fn mocked(url: &str, reason: MockReason) -> Self {
        Self {
            analysis: mock_analysis(url),
            source: AnalysisSource::Mock(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(&'static str);

    #[async_trait]
    impl TextGenerator for Fixed {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct Rejecting;

    #[async_trait]
    impl TextGenerator for Rejecting {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Err(LlmError::Unauthorized("Incorrect API key provided".into()))
        }
    }

    struct Stalling;

    #[async_trait]
    impl TextGenerator for Stalling {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("{}".to_string())
        }
    }

    const PAGE: &str = "<html><body><h1>Bike repair in Ghent</h1></body></html>";

    #[tokio::test]
    async fn test_no_generator_uses_mock() {
        let outcome = analyze_website(None, "https://example.com", PAGE, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(outcome.source, AnalysisSource::Mock(MockReason::NoApiKey));
        assert_eq!(outcome.analysis.overall_score, 75.0);
    }

    #[tokio::test]
    async fn test_model_answers_are_used() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Fixed(r#"{"scores": {"overall": 61}}"#));
        let outcome = analyze_website(Some(generator), "https://example.com", PAGE, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(outcome.source, AnalysisSource::Model);
        assert_eq!(outcome.analysis.technical.scores.overall, 61.0);
    }

    #[tokio::test]
    async fn test_credential_error_reaches_caller() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Rejecting);
        let err = analyze_website(Some(generator), "https://example.com", PAGE, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(err.is_credential_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_falls_back_to_mock() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Stalling);
        let outcome = analyze_website(Some(generator), "https://example.com", PAGE, Duration::from_secs(300))
            .await
            .unwrap();
        assert_eq!(outcome.source, AnalysisSource::Mock(MockReason::TimedOut));
    }

    #[tokio::test]
    async fn test_single_facet_run() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Fixed(r#"{"scores": {"overall": 88}}"#));
        let value = run_facet(generator, FacetKind::Mobile, "https://example.com", PAGE, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(value["scores"]["overall"], 88.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_facet_deadline() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Stalling);
        let err = run_facet(generator, FacetKind::Technical, "https://example.com", PAGE, Duration::from_secs(60))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Technical analysis timed out after 60 seconds");
    }
}
