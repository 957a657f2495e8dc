//! Upload orchestrator
//!
//! Drives one batch at a time through `Idle -> Validating -> Uploading ->
//! Settled -> Idle`. Uploads inside a batch run concurrently and every call is
//! allowed to settle: one failed file never cancels its siblings, and files
//! that did upload are kept even when others failed.
//!
//! State lives behind a `std::sync::Mutex` that is only locked in short scopes
//! and never across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use campus_api_client::FileUrlResolver;
use campus_core::{
    log_error, validate_selection, CandidateFile, StoredFileDescriptor, UploadBatchResult,
    UploadConfiguration, UploadError, UploadTransport,
};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use uuid::Uuid;

use crate::drop_zone::DropZone;
use crate::notice::{BatchNotice, FileFailure, Notifier};
use crate::preview::PreviewEntry;

/// Receives the successful descriptors of a batch, once per batch with at
/// least one success.
pub type UploadCallback = Arc<dyn Fn(UploadBatchResult) + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    #[default]
    Idle,
    Validating,
    Uploading,
    Settled,
}

#[derive(Debug, Default)]
struct UploaderState {
    phase: UploadPhase,
    uploaded: Vec<StoredFileDescriptor>,
    drop_zone: DropZone,
}

/// Outcome of one submitted batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub notice: BatchNotice,
    /// What the callback received, if anything succeeded
    pub result: Option<UploadBatchResult>,
    pub finished_at: DateTime<Utc>,
}

/// Puts the orchestrator back to `Idle` however the batch ends, including when
/// the `submit` future is dropped mid-flight.
struct BusyGuard<'a> {
    state: &'a Mutex<UploaderState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.phase = UploadPhase::Idle;
    }
}

/// Controller behind one upload widget. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct UploadOrchestrator {
    config: Arc<UploadConfiguration>,
    transport: Arc<dyn UploadTransport>,
    on_uploaded: Option<UploadCallback>,
    notifier: Option<Arc<dyn Notifier>>,
    state: Arc<Mutex<UploaderState>>,
}

impl UploadOrchestrator {
    pub fn new(config: UploadConfiguration, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            on_uploaded: None,
            notifier: None,
            state: Arc::new(Mutex::new(UploaderState::default())),
        }
    }

    pub fn on_uploaded<F>(mut self, callback: F) -> Self
    where
        F: Fn(UploadBatchResult) + Send + Sync + 'static,
    {
        self.on_uploaded = Some(Arc::new(callback));
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(&self) -> &UploadConfiguration {
        &self.config
    }

    fn lock_state(&self) -> MutexGuard<'_, UploaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> UploadPhase {
        self.lock_state().phase
    }

    /// True from the moment a batch is accepted until it has settled.
    pub fn is_busy(&self) -> bool {
        self.phase() != UploadPhase::Idle
    }

    /// Validate and upload one selection.
    ///
    /// Returns `Err(UploadError::Busy)` while another batch is in flight.
    /// Policy rejections are not errors here: they come back as a report with a
    /// [`BatchNotice::Rejected`] notice, and no upload call is made.
    pub async fn submit(&self, files: Vec<CandidateFile>) -> Result<BatchReport, UploadError> {
        {
            let mut state = self.lock_state();
            if state.phase != UploadPhase::Idle {
                return Err(UploadError::Busy);
            }
            state.phase = UploadPhase::Validating;
        }
        let guard = BusyGuard { state: &self.state };
        let batch_id = Uuid::new_v4();

        let selection = match validate_selection(files, &self.config) {
            Ok(selection) => selection,
            Err(rejection) => {
                tracing::debug!(batch_id = %batch_id, "Selection rejected by upload policy");
                log_error(&UploadError::Policy(rejection.clone()));
                drop(guard);
                return Ok(self.finish(batch_id, BatchNotice::Rejected(rejection), None));
            }
        };

        self.lock_state().phase = UploadPhase::Uploading;

        let category = self.config.upload_category();
        tracing::info!(
            batch_id = %batch_id,
            files = selection.accepted.len(),
            skipped = selection.rejected.len(),
            category = %category,
            "Dispatching uploads"
        );

        let transport = self.transport.as_ref();
        let mut in_flight: FuturesUnordered<_> = selection
            .accepted
            .iter()
            .map(|file| async move { (file, transport.upload(file, category).await) })
            .collect();

        let mut succeeded = Vec::with_capacity(selection.accepted.len());
        let mut failures = Vec::new();
        while let Some((file, outcome)) = in_flight.next().await {
            match outcome {
                Ok(descriptor) => {
                    tracing::debug!(
                        batch_id = %batch_id,
                        file = %file.name(),
                        stored_as = %descriptor.filename,
                        "Upload succeeded"
                    );
                    succeeded.push(descriptor);
                }
                Err(error) => {
                    let error = UploadError::Transport(error);
                    tracing::debug!(batch_id = %batch_id, file = %file.name(), "Upload failed");
                    log_error(&error);
                    failures.push(FileFailure::new(file.name(), &error));
                }
            }
        }
        drop(in_flight);

        {
            let mut state = self.lock_state();
            state.phase = UploadPhase::Settled;
            state.uploaded.extend(succeeded.iter().cloned());
        }

        let result = self.config.result_shape().wrap(succeeded);
        let succeeded_count = result.as_ref().map_or(0, UploadBatchResult::len);
        let notice = BatchNotice::settled(succeeded_count, failures, selection.rejected);

        // Idle again before anyone is told, so a callback may resubmit.
        drop(guard);

        if let (Some(result), Some(callback)) = (&result, &self.on_uploaded) {
            callback(result.clone());
        }

        Ok(self.finish(batch_id, notice, result))
    }

    fn finish(
        &self,
        batch_id: Uuid,
        notice: BatchNotice,
        result: Option<UploadBatchResult>,
    ) -> BatchReport {
        if let Some(notifier) = &self.notifier {
            notifier.notify(&notice);
        }
        BatchReport {
            batch_id,
            notice,
            result,
            finished_at: Utc::now(),
        }
    }

    pub fn drag_enter(&self) {
        self.with_drop_zone(DropZone::enter);
    }

    pub fn drag_over(&self) {
        self.with_drop_zone(DropZone::over);
    }

    pub fn drag_leave(&self) {
        self.with_drop_zone(DropZone::leave);
    }

    pub fn is_drag_over(&self) -> bool {
        self.lock_state().drop_zone.is_drag_over()
    }

    /// Drag events are ignored while a batch is in flight.
    fn with_drop_zone(&self, event: fn(&mut DropZone)) {
        let mut state = self.lock_state();
        if state.phase == UploadPhase::Idle {
            event(&mut state.drop_zone);
        }
    }

    /// Files dropped onto the surface. Discarded with `Busy` during a batch.
    pub async fn drop_files(&self, files: Vec<CandidateFile>) -> Result<BatchReport, UploadError> {
        {
            let mut state = self.lock_state();
            if state.phase != UploadPhase::Idle {
                return Err(UploadError::Busy);
            }
            state.drop_zone.reset();
        }
        self.submit(files).await
    }

    /// Everything uploaded through this orchestrator and not removed, in
    /// completion order.
    pub fn uploaded_files(&self) -> Vec<StoredFileDescriptor> {
        self.lock_state().uploaded.clone()
    }

    /// Remove a preview entry by position. Local only: the stored file stays on
    /// the remote store and the calling form's state is not touched.
    pub fn remove_uploaded(&self, index: usize) -> Result<StoredFileDescriptor, UploadError> {
        let mut state = self.lock_state();
        let len = state.uploaded.len();
        if index >= len {
            return Err(UploadError::IndexOutOfRange { index, len });
        }
        Ok(state.uploaded.remove(index))
    }

    /// Preview rows, or nothing when the configuration hides previews.
    pub fn previews(&self, resolver: &FileUrlResolver) -> Vec<PreviewEntry> {
        if !self.config.show_preview() {
            return Vec::new();
        }
        let uploaded = self.uploaded_files();
        PreviewEntry::build(&uploaded, resolver, self.config.upload_category())
    }
}
