//! Pipeline orchestration for one pet form.
//!
//! A submission is processed to completion sequentially: validate, upload the
//! image, then persist the record. The record is never sent to the backend
//! unless the upload succeeded, so the backend only ever references media that
//! already exists remotely.

use chrono::Utc;
use std::sync::Arc;

use pawhaven_api_client::RecordSubmitter;
use pawhaven_core::models::{StoredPet, SubmitTarget, UploadResult};
use pawhaven_core::validation::ImageValidator;
use pawhaven_core::{log_error, ErrorMetadata, Notifier, Session, SubmissionError};
use pawhaven_media::MediaUploader;

use crate::form::{ImageSource, PetForm};
use crate::state::{Outcome, Phase, PhaseKind, SubmissionReport};

/// Services a form submits through. Cheap to clone and share between forms.
#[derive(Clone)]
pub struct Collaborators {
    pub uploader: Arc<dyn MediaUploader>,
    pub submitter: Arc<dyn RecordSubmitter>,
    pub notifier: Arc<dyn Notifier>,
    pub image_validator: ImageValidator,
}

/// One pet form and its submission lifecycle.
pub struct FormCapture {
    form: PetForm,
    session: Session,
    target: SubmitTarget,
    /// Record being edited, for the update flow
    existing: Option<StoredPet>,
    collaborators: Collaborators,
    phase: Phase,
}

impl FormCapture {
    /// Empty form that creates a new pet on submit.
    pub fn for_create(session: Session, collaborators: Collaborators) -> Self {
        Self {
            form: PetForm::default(),
            session,
            target: SubmitTarget::Create,
            existing: None,
            collaborators,
            phase: Phase::Idle,
        }
    }

    /// Form pre-filled from a stored pet that updates it on submit.
    pub fn for_update(stored: StoredPet, session: Session, collaborators: Collaborators) -> Self {
        Self {
            form: PetForm::from(&stored),
            session,
            target: SubmitTarget::Update {
                id: stored.id.clone(),
            },
            existing: Some(stored),
            collaborators,
            phase: Phase::Idle,
        }
    }

    pub fn form(&self) -> &PetForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PetForm {
        &mut self.form
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn target(&self) -> &SubmitTarget {
        &self.target
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.phase.is_in_flight()
    }

    /// Force the form back to `Idle`, keeping field values.
    ///
    /// Only needed when a `submit` future was dropped before it settled.
    pub fn reset_phase(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Run one submission attempt to completion.
    pub async fn submit(&mut self) -> SubmissionReport {
        let mut trail = vec![self.phase.kind()];

        if self.phase.is_in_flight() {
            tracing::debug!(phase = ?self.phase.kind(), "Submit ignored while in flight");
            return SubmissionReport {
                outcome: Outcome::Failed(SubmissionError::InFlight),
                trail,
            };
        }

        // Each click is a fresh attempt, re-validated from current field values
        self.phase = Phase::Idle;
        if trail.last() != Some(&PhaseKind::Idle) {
            trail.push(PhaseKind::Idle);
        }

        let existing_image_url = self.existing.as_ref().map(|s| s.record.image_url.as_str());
        let draft = match self
            .form
            .to_draft(&self.collaborators.image_validator, existing_image_url)
        {
            Ok(draft) => draft,
            Err(error) => {
                log_error(&error, "validate");
                self.collaborators.notifier.error(&error.client_message());
                return SubmissionReport {
                    outcome: Outcome::Failed(error),
                    trail,
                };
            }
        };

        let mut uploaded_media_id = None;
        let image_url = match draft.image.clone() {
            ImageSource::New(file) => {
                self.enter(Phase::Uploading, &mut trail);
                // The uploader has already notified the user on failure
                let uploaded = self.collaborators.uploader.upload(&file).await;
                match uploaded {
                    UploadResult::Success(image) => {
                        uploaded_media_id = Some(image.media_id);
                        image.url
                    }
                    UploadResult::Failure { error } => {
                        return self.settle(Outcome::Failed(error), trail);
                    }
                }
            }
            ImageSource::Existing(url) => url,
        };

        self.enter(Phase::Persisting, &mut trail);

        // An edit keeps the stored owner, adoption flag and creation time
        let (owner, adopted, created_at) = match &self.existing {
            Some(stored) => (
                stored.record.added_by_user_id.clone(),
                stored.record.adopted,
                stored.record.created_at,
            ),
            None => (self.session.user_id.clone(), false, Utc::now()),
        };
        let record = draft.into_record(image_url, &owner, adopted, created_at);

        let persisted = self.collaborators.submitter.submit(&record, &self.target).await;
        match persisted {
            Ok(stored) => {
                let message = match self.target {
                    SubmitTarget::Create => "Pet added successfully",
                    SubmitTarget::Update { .. } => "Pet updated successfully",
                };
                self.collaborators.notifier.success(message);

                match self.target {
                    SubmitTarget::Create => self.form = PetForm::default(),
                    SubmitTarget::Update { .. } => {
                        self.form = PetForm::from(&stored);
                        self.existing = Some(stored.clone());
                    }
                }
                self.settle(Outcome::Success(stored), trail)
            }
            Err(error) => {
                log_error(&error, "persist");
                if let Some(media_id) = uploaded_media_id {
                    // No rollback: the uploaded image stays on the media host
                    tracing::warn!(
                        media_id = %media_id,
                        image_url = %record.image_url,
                        "Uploaded image left without a pet record"
                    );
                }
                self.collaborators.notifier.error(&error.client_message());
                self.settle(Outcome::Failed(error), trail)
            }
        }
    }

    fn enter(&mut self, phase: Phase, trail: &mut Vec<PhaseKind>) {
        tracing::debug!(phase = ?phase.kind(), "Submission phase");
        trail.push(phase.kind());
        self.phase = phase;
    }

    /// Record the terminal outcome. A failed attempt hands the form back in
    /// `Idle` with its field values intact.
    fn settle(&mut self, outcome: Outcome, mut trail: Vec<PhaseKind>) -> SubmissionReport {
        trail.push(PhaseKind::Settled);
        self.phase = match &outcome {
            Outcome::Success(_) => Phase::Settled(outcome.clone()),
            Outcome::Failed(_) => Phase::Idle,
        };
        SubmissionReport { outcome, trail }
    }
}
