use std::fmt;

use tracing::debug;

use crate::extractor::InputFile;
use crate::pipeline::{BatchOutcome, FileVerdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Results,
    Fatal,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Running => write!(f, "running"),
            SessionPhase::Results => write!(f, "results"),
            SessionPhase::Fatal => write!(f, "fatal"),
        }
    }
}

/// Everything the rendering side may show, carried in the phase it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a submission; `files` is the pending selection.
    Idle { files: Vec<InputFile> },
    Running {
        file_names: Vec<String>,
        progress: String,
    },
    Results { verdicts: Vec<FileVerdict> },
    Fatal { reason: String },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle { files: Vec::new() }
    }
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle { .. } => SessionPhase::Idle,
            SessionState::Running { .. } => SessionPhase::Running,
            SessionState::Results { .. } => SessionPhase::Results,
            SessionState::Fatal { .. } => SessionPhase::Fatal,
        }
    }

    pub fn files(&self) -> &[InputFile] {
        match self {
            SessionState::Idle { files } => files,
            _ => &[],
        }
    }

    pub fn progress(&self) -> &str {
        match self {
            SessionState::Running { progress, .. } => progress,
            _ => "",
        }
    }

    pub fn verdicts(&self) -> &[FileVerdict] {
        match self {
            SessionState::Results { verdicts } => verdicts,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Fatal { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Replaces the pending selection.
    SelectFiles(Vec<InputFile>),
    AddFiles(Vec<InputFile>),
    RemoveFile(usize),
    Submit,
    Progress(String),
    Finished(BatchOutcome),
    Reset,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::SelectFiles(_) => "select_files",
            SessionEvent::AddFiles(_) => "add_files",
            SessionEvent::RemoveFile(_) => "remove_file",
            SessionEvent::Submit => "submit",
            SessionEvent::Progress(_) => "progress",
            SessionEvent::Finished(_) => "finished",
            SessionEvent::Reset => "reset",
        }
    }
}

/// Applies one event. Events that are not legal in the current phase leave
/// the state untouched; in particular a submit while running is dropped, not
/// queued.
pub fn transition(state: SessionState, event: SessionEvent) -> SessionState {
    match (state, event) {
        (SessionState::Idle { .. }, SessionEvent::SelectFiles(files)) => {
            SessionState::Idle { files }
        }
        (SessionState::Idle { mut files }, SessionEvent::AddFiles(more)) => {
            files.extend(more);
            SessionState::Idle { files }
        }
        (SessionState::Idle { mut files }, SessionEvent::RemoveFile(index)) => {
            if index < files.len() {
                files.remove(index);
            }
            SessionState::Idle { files }
        }
        (SessionState::Idle { files }, SessionEvent::Submit) if !files.is_empty() => {
            SessionState::Running {
                file_names: files.iter().map(|f| f.name().to_string()).collect(),
                progress: String::new(),
            }
        }
        (SessionState::Running { file_names, .. }, SessionEvent::Progress(progress)) => {
            SessionState::Running {
                file_names,
                progress,
            }
        }
        (SessionState::Running { .. }, SessionEvent::Finished(outcome)) => match outcome {
            BatchOutcome::Completed(verdicts) => SessionState::Results { verdicts },
            BatchOutcome::Aborted(reason) => SessionState::Fatal { reason },
        },
        (SessionState::Results { .. } | SessionState::Fatal { .. }, SessionEvent::Reset) => {
            SessionState::default()
        }
        (state, event) => {
            debug!(
                phase = %state.phase(),
                event = event.name(),
                "Ignoring event not valid in current phase"
            );
            state
        }
    }
}
