use std::fmt;

/// Progress notices emitted by the batch pipeline, twice per analyzed file.
/// Positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Processing { index: usize, total: usize },
    Analyzing { index: usize, total: usize },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Processing { index, total } => {
                write!(f, "Processing file {} of {}", index, total)
            }
            ProgressEvent::Analyzing { index, total } => {
                write!(f, "Analyzing file {} of {}", index, total)
            }
        }
    }
}

/// Advisory sink for progress notices; nothing is acknowledged.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Adapts a plain string callback.
pub struct CallbackProgress<F>(pub F);

impl<F> ProgressReporter for CallbackProgress<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, event: ProgressEvent) {
        (self.0)(&event.to_string());
    }
}
