//! Session driver that owns the current state and publishes every change.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::analyzer::DocumentAnalyzer;
use crate::extractor::InputFile;
use crate::pipeline::{BatchOutcome, BatchPipeline, ProgressEvent, ProgressReporter};

use super::state::{transition, SessionEvent, SessionPhase, SessionState};

/// One user's scanning session.
///
/// The state lives in a watch channel, so renderers hold a receiver and
/// always see the latest snapshot. Only one batch runs at a time; a second
/// submit while a batch is in flight is ignored.
pub struct Session<A> {
    pipeline: BatchPipeline<A>,
    state: watch::Sender<SessionState>,
}

/// Feeds pipeline progress into the session state.
struct SessionProgress<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl ProgressReporter for SessionProgress<'_> {
    fn report(&self, event: ProgressEvent) {
        apply(self.state, SessionEvent::Progress(event.to_string()));
    }
}

/// Reason recorded when a running batch is dropped before it finishes.
pub const BATCH_CANCELLED: &str = "Batch was cancelled";

/// Moves a running session to Fatal if the batch future is dropped midway,
/// so a reset can bring it back to Idle.
struct RunGuard<'a> {
    state: &'a watch::Sender<SessionState>,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self, outcome: BatchOutcome) {
        self.finished = true;
        apply(self.state, SessionEvent::Finished(outcome));
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Batch dropped before completion");
            apply(
                self.state,
                SessionEvent::Finished(BatchOutcome::Aborted(BATCH_CANCELLED.to_string())),
            );
        }
    }
}

fn apply(state: &watch::Sender<SessionState>, event: SessionEvent) {
    state.send_modify(|current| {
        *current = transition(std::mem::take(current), event);
    });
}

impl<A: DocumentAnalyzer> Session<A> {
    pub fn new(pipeline: BatchPipeline<A>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { pipeline, state }
    }

    pub fn with_analyzer(analyzer: A) -> Self {
        Self::new(BatchPipeline::new(analyzer))
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    pub fn pipeline(&self) -> &BatchPipeline<A> {
        &self.pipeline
    }

    pub fn select_files(&self, files: Vec<InputFile>) {
        apply(&self.state, SessionEvent::SelectFiles(files));
    }

    pub fn add_files(&self, files: Vec<InputFile>) {
        apply(&self.state, SessionEvent::AddFiles(files));
    }

    pub fn remove_file(&self, index: usize) {
        apply(&self.state, SessionEvent::RemoveFile(index));
    }

    /// Runs the pending selection to completion.
    ///
    /// Returns `false` without doing anything when the session is not idle
    /// or nothing is selected.
    pub async fn submit(&self) -> bool {
        let mut pending = None;
        self.state.send_if_modified(|current| {
            let files = current.files().to_vec();
            let next = transition(std::mem::take(current), SessionEvent::Submit);
            let started = next.phase() == SessionPhase::Running && !files.is_empty();
            *current = next;
            if started {
                pending = Some(files);
            }
            started
        });

        let Some(files) = pending else {
            return false;
        };

        info!("Submitting {} file(s) for scanning", files.len());
        let guard = RunGuard {
            state: &self.state,
            finished: false,
        };
        let progress = SessionProgress { state: &self.state };
        let outcome = self.pipeline.run(files, &progress).await;

        guard.finish(outcome);
        true
    }

    /// Returns to an empty idle session from results or a fatal error.
    pub fn reset(&self) {
        apply(&self.state, SessionEvent::Reset);
    }
}
