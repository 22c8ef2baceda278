pub mod aggregator;
pub mod classifier;
pub mod confidence;
pub mod correction;
pub mod engine;
pub mod extractor;
pub mod messages;
pub mod normalize;
pub mod recommend;
pub mod report;
pub mod types;

pub use engine::{ReportAnalyzer, RuleBasedAnalyzer};
pub use report::render_report;
pub use types::*;

use thiserror::Error;

/// Analysis failures are narrow by design: unrecognized text is "no
/// observation", not an error, and malformed numbers degrade to non-matches.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("nothing to analyze: input text is empty or whitespace only")]
    EmptyInput,
}
