use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analyzer::{DocumentAnalyzer, Verdict};
use crate::extractor::{self, InputFile};

use super::outcome::{BatchOutcome, FileVerdict, EMPTY_FILE_SUMMARY};
use super::progress::{ProgressEvent, ProgressReporter};

/// Drives a batch of files through extraction and analysis, one file at a
/// time and in input order.
///
/// A file that cannot be read or analyzed on its own gets an unsafe verdict
/// and the batch moves on. An analyzer failure that marks the backend itself
/// as broken ends the whole batch.
pub struct BatchPipeline<A> {
    analyzer: A,
}

/// Why a single file stopped the batch.
struct Abort(String);

impl<A: DocumentAnalyzer> BatchPipeline<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub async fn run(&self, files: Vec<InputFile>, progress: &dyn ProgressReporter) -> BatchOutcome {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", batch_id = %batch_id, file_count = files.len());

        self.run_files(files, progress).instrument(span).await
    }

    async fn run_files(&self, files: Vec<InputFile>, progress: &dyn ProgressReporter) -> BatchOutcome {
        let total = files.len();
        let mut verdicts = Vec::with_capacity(total);

        info!("Starting batch of {} file(s)", total);

        for (position, file) in files.iter().enumerate() {
            let index = position + 1;
            let span = info_span!("file", index, name = %file.name());

            match self
                .process_file(file, index, total, progress)
                .instrument(span)
                .await
            {
                Ok(verdict) => verdicts.push(FileVerdict::new(file.name(), verdict)),
                Err(Abort(reason)) => {
                    error!(
                        "Aborting batch at file {} of {}: {}",
                        index, total, reason
                    );
                    return BatchOutcome::Aborted(reason);
                }
            }
        }

        let flagged = verdicts.iter().filter(|v| !v.verdict.is_safe).count();
        info!(
            "Batch completed: {} file(s), {} flagged",
            verdicts.len(),
            flagged
        );

        BatchOutcome::Completed(verdicts)
    }

    async fn process_file(
        &self,
        file: &InputFile,
        index: usize,
        total: usize,
        progress: &dyn ProgressReporter,
    ) -> Result<Verdict, Abort> {
        progress.report(ProgressEvent::Processing { index, total });

        let extracted = match extractor::extract(file) {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!("Skipping file: {}", e);
                return Ok(Verdict::unsafe_without_issues(format!(
                    "File could not be processed: {}",
                    e
                )));
            }
        };

        if extracted.is_blank() {
            info!("No extractable text, marking safe without analysis");
            return Ok(Verdict::safe(EMPTY_FILE_SUMMARY));
        }

        progress.report(ProgressEvent::Analyzing { index, total });

        match self.analyzer.analyze(&extracted.text).await {
            Ok(verdict) => {
                info!(
                    is_safe = verdict.is_safe,
                    issues = verdict.issues.len(),
                    "File analyzed"
                );
                Ok(verdict)
            }
            Err(e) if e.is_systemic() => Err(Abort(e.to_string())),
            Err(e) => {
                warn!("Analysis failed for this file only: {}", e);
                Ok(Verdict::unsafe_without_issues(format!(
                    "Analysis failed for this file: {}",
                    e
                )))
            }
        }
    }
}
