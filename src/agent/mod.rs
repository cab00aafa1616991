//! Analysis agents.
//!
//! Every facet shares one request path ([`facet::analyze_facet`]); the
//! [`orchestrator::Orchestrator`] fans out to all of them and runs the final
//! summary pass.

pub mod deadline;
pub mod facet;
pub mod facets;
pub mod html_text;
pub mod orchestrator;
pub mod pipeline;

pub use deadline::{ANALYSIS_DEADLINE, FACET_DEADLINE};
pub use facets::FacetKind;
pub use html_text::truncate_chars;
pub use pipeline::{analyze_website, run_facet, AnalysisOutcome, AnalysisSource, MockReason};
