use serde::{Deserialize, Serialize};

use crate::analyzer::Verdict;

/// Summary given to files with nothing to analyze.
pub const EMPTY_FILE_SUMMARY: &str = "File is empty or contains no extractable text.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVerdict {
    pub file_name: String,
    pub verdict: Verdict,
}

impl FileVerdict {
    pub fn new(file_name: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            file_name: file_name.into(),
            verdict,
        }
    }
}

/// Result of one batch. A batch either completes with one verdict per input
/// file, in input order, or aborts with nothing but a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Completed(Vec<FileVerdict>),
    Aborted(String),
}

impl BatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, BatchOutcome::Completed(_))
    }

    /// Verdicts of a completed batch; `None` when aborted.
    pub fn verdicts(&self) -> Option<&[FileVerdict]> {
        match self {
            BatchOutcome::Completed(verdicts) => Some(verdicts),
            BatchOutcome::Aborted(_) => None,
        }
    }
}
