//! Document analysis against an external LLM backend.

pub mod client;
pub mod error;
pub mod prompt;
pub mod verdict;

use async_trait::async_trait;

pub use client::GeminiClient;
pub use error::{AnalyzerError, AnalyzerErrorKind, ANALYZER_FAILURE_MARKER};
pub use verdict::{parse_verdict, Issue, Verdict};

/// Turns document text into a verdict.
///
/// Callers only pass text that is non-blank after trimming. Implementations
/// make a single request per call with no retry.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Verdict, AnalyzerError>;
}
