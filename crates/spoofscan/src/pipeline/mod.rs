pub mod outcome;
pub mod progress;
pub mod runner;

pub use outcome::{BatchOutcome, FileVerdict, EMPTY_FILE_SUMMARY};
pub use progress::{CallbackProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use runner::BatchPipeline;
