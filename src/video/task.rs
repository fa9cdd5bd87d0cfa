use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use crate::core::{ExtractionError, ExtractionOutcome};
use crate::video::processor::FrameExtractor;

/// Lifecycle of a spawned extraction run. An unspawned [`ExtractionTask`] is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Succeeded,
    Failed,
}

/// One extraction run, executed on its own background thread.
pub struct ExtractionTask {
    source: PathBuf,
    extractor: FrameExtractor,
}

impl ExtractionTask {
    pub fn new(source: PathBuf, extractor: FrameExtractor) -> Self {
        Self { source, extractor }
    }

    /// Start the run. `on_complete` is called on the worker thread once the
    /// outcome has been handed over, e.g. to wake up the UI.
    pub fn spawn<F>(self, on_complete: F) -> ExtractionHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let (outcome_tx, outcome_rx) = oneshot::channel::<ExtractionOutcome>();
        let source = self.source.clone();

        log::info!("Starting frame extraction for {}", source.display());

        let spawned = std::thread::Builder::new()
            .name("frame-extraction".into())
            .spawn(move || {
                let outcome = self.run();
                if outcome_tx.send(outcome).is_err() {
                    log::warn!("Extraction finished but nobody is waiting for the result");
                }
                on_complete();
            });

        // A failed spawn drops the sender, which the handle reports as a failure
        if let Err(e) = spawned {
            log::error!("Failed to spawn extraction thread: {}", e);
        }

        ExtractionHandle {
            source,
            receiver: Some(outcome_rx),
            state: TaskState::Running,
        }
    }

    /// Run to completion on the current thread. Never panics.
    pub fn run(self) -> ExtractionOutcome {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.extractor.extract(&self.source)));

        let outcome = match result {
            Ok(result) => ExtractionOutcome::from(result),
            Err(payload) => ExtractionOutcome::from(Err(ExtractionError::Panicked(panic_message(
                payload.as_ref(),
            )))),
        };

        match &outcome {
            ExtractionOutcome::Succeeded(report) => log::info!(
                "Extracted {} frames into {} in {:.1}s",
                report.frames_written,
                report.output_directory.display(),
                report.elapsed.as_secs_f64()
            ),
            ExtractionOutcome::Failed(message) => {
                log::error!("Frame extraction failed for {}: {}", self.source.display(), message)
            }
        }

        outcome
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Receiving end of a running extraction. Yields its outcome exactly once.
pub struct ExtractionHandle {
    source: PathBuf,
    receiver: Option<oneshot::Receiver<ExtractionOutcome>>,
    state: TaskState,
}

impl ExtractionHandle {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Non-blocking poll for the UI thread. Returns the outcome the first time
    /// it is available and `None` before and after that.
    pub fn try_outcome(&mut self) -> Option<ExtractionOutcome> {
        let receiver = self.receiver.as_mut()?;
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => worker_lost(),
        };
        Some(self.finish(outcome))
    }

    /// Block until the run is over.
    pub fn wait(mut self) -> ExtractionOutcome {
        match self.receiver.take() {
            Some(receiver) => {
                let outcome = receiver.blocking_recv().unwrap_or_else(|_| worker_lost());
                self.finish(outcome)
            }
            None => worker_lost(),
        }
    }

    /// Await the run from async code.
    pub async fn outcome(mut self) -> ExtractionOutcome {
        match self.receiver.take() {
            Some(receiver) => {
                let outcome = receiver.await.unwrap_or_else(|_| worker_lost());
                self.finish(outcome)
            }
            None => worker_lost(),
        }
    }

    fn finish(&mut self, outcome: ExtractionOutcome) -> ExtractionOutcome {
        self.receiver = None;
        self.state = if outcome.is_success() {
            TaskState::Succeeded
        } else {
            TaskState::Failed
        };
        outcome
    }
}

fn worker_lost() -> ExtractionOutcome {
    ExtractionOutcome::Failed("Extraction worker stopped without reporting a result".to_string())
}
