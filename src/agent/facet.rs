//! The single request path every analysis facet goes through.
//!
//! A facet is a prompt template plus a result shape. Running one means:
//! build the prompt (or bail out to the fallback when a precondition fails),
//! ask the model, pull the JSON object out of whatever text comes back, and
//! fall back to a static record whenever that does not work. Only
//! credential failures escape to the caller.

use crate::llm::{LlmError, TextGenerator};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// The page being analyzed.
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    pub url: &'a str,
    pub html: &'a str,
}

impl<'a> PageInput<'a> {
    pub fn new(url: &'a str, html: &'a str) -> Self {
        Self { url, html }
    }
}

/// One analysis facet: a fixed prompt and the record it expects back.
pub trait Facet {
    type Output: Serialize + DeserializeOwned + Default + Send + 'static;

    /// Short name used in logs.
    const NAME: &'static str;

    const SYSTEM_PROMPT: &'static str;

    /// Builds the user prompt, or `None` when the page cannot be analyzed.
    fn user_prompt(page: &PageInput<'_>) -> Option<String>;

    /// The record returned when anything goes wrong.
    fn fallback(_url: &str) -> Self::Output {
        Self::Output::default()
    }

    /// Turns the raw model output into a record.
    fn interpret(response: &str, url: &str) -> Self::Output {
        match parse_json_object::<Self::Output>(response) {
            Some(parsed) => parsed,
            None => {
                warn!("{}: could not parse model response, using defaults", Self::NAME);
                Self::fallback(url)
            }
        }
    }
}

/// Run one facet against a page.
pub async fn analyze_facet<F: Facet>(
    generator: &dyn TextGenerator,
    page: &PageInput<'_>,
) -> Result<F::Output, LlmError> {
    let Some(prompt) = F::user_prompt(page) else {
        warn!(
            "{}: page content missing or too short ({} bytes), using defaults",
            F::NAME,
            page.html.len()
        );
        return Ok(F::fallback(page.url));
    };

    debug!("{}: prompt is {} chars", F::NAME, prompt.len());

    match generator.generate(F::SYSTEM_PROMPT, &prompt).await {
        Ok(response) => {
            info!("{}: analysis completed ({} chars)", F::NAME, response.len());
            Ok(F::interpret(&response, page.url))
        }
        Err(e) if e.is_credential_error() => Err(e),
        Err(e) => {
            warn!("{}: AI analysis failed: {}", F::NAME, e);
            Ok(F::fallback(page.url))
        }
    }
}

/// Returns the span from the first `{` to the last `}`, or the whole text.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Parses the JSON object embedded in a model response.
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_str(extract_json_object(text)).ok()
}

/// Parses the embedded JSON into an untyped value for manual normalization.
pub fn parse_json_value(text: &str) -> Option<Value> {
    parse_json_object::<Value>(text)
}

/// A non-empty string field.
pub(crate) fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// A numeric field.
pub(crate) fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

/// An array field, keeping only its string elements.
pub(crate) fn string_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    map.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect()
    })
}

/// Host of a URL without a leading `www.`, or the input when it does not parse.
pub fn domain_of(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(e) => {
            debug!("Cannot extract domain from {}: {}", url, e);
            url.to_string()
        }
    }
}
