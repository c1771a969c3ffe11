use thiserror::Error;

/// Prefix carried by every failure the analyzer client reports. The batch
/// pipeline aborts on errors whose message starts with it.
pub const ANALYZER_FAILURE_MARKER: &str = "Failed to analyze document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerErrorKind {
    /// Connection, timeout or other transport-level failure.
    Transport,
    /// The backend answered with a non-success status.
    Backend { status: u16 },
    /// The backend answered, but not with a valid verdict.
    InvalidResponse,
    /// A problem with one document only.
    Local,
}

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct AnalyzerError {
    kind: AnalyzerErrorKind,
    message: String,
}

impl AnalyzerError {
    /// A failure of the analyzer itself. The message gets the failure marker.
    pub fn failed(kind: AnalyzerErrorKind, detail: impl AsRef<str>) -> Self {
        Self {
            kind,
            message: format!("{}: {}", ANALYZER_FAILURE_MARKER, detail.as_ref()),
        }
    }

    pub fn transport(detail: impl AsRef<str>) -> Self {
        Self::failed(AnalyzerErrorKind::Transport, detail)
    }

    pub fn backend(status: u16, detail: impl AsRef<str>) -> Self {
        Self::failed(AnalyzerErrorKind::Backend { status }, detail)
    }

    pub fn invalid_response(detail: impl AsRef<str>) -> Self {
        Self::failed(
            AnalyzerErrorKind::InvalidResponse,
            format!("Invalid response format from API: {}", detail.as_ref()),
        )
    }

    /// A failure tied to one document; carries no marker and so does not
    /// abort a batch.
    pub fn local(detail: impl Into<String>) -> Self {
        Self {
            kind: AnalyzerErrorKind::Local,
            message: detail.into(),
        }
    }

    pub fn kind(&self) -> &AnalyzerErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_systemic(&self) -> bool {
        self.message.starts_with(ANALYZER_FAILURE_MARKER)
    }
}
