pub mod analyzer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod pipeline;
pub mod sanitize;
pub mod secrets;
pub mod session;

pub use analyzer::{AnalyzerError, DocumentAnalyzer, GeminiClient, Issue, Verdict};
pub use config::{load_config, Config};
pub use error::{ConfigError, ExtractError, Result, SpoofscanError};
pub use extractor::{extract, DocumentFormat, ExtractedText, InputFile};
pub use logging::init_logging;
pub use pipeline::{BatchOutcome, BatchPipeline, FileVerdict, ProgressEvent, ProgressReporter};
pub use secrets::{resolve_secret, SecretError};
pub use session::{Session, SessionPhase, SessionState};
