//! Pet record submission pipeline.
//!
//! [`FormCapture`] holds one pet form, validates it, uploads the chosen image
//! through a [`MediaUploader`](pawhaven_media::MediaUploader) and persists the
//! assembled record through a [`RecordSubmitter`](pawhaven_api_client::RecordSubmitter).
//! [`Pipeline`] wires the production collaborators from a [`PipelineConfig`].

pub mod capture;
pub mod form;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use std::sync::Arc;

use pawhaven_api_client::ApiClient;
use pawhaven_core::models::StoredPet;
use pawhaven_core::{Notifier, PipelineConfig, Session, SubmissionError};
use pawhaven_media::CloudinaryUploader;

pub use capture::{Collaborators, FormCapture};
pub use form::{ImageSource, PetDraft, PetForm};
pub use state::{Outcome, Phase, PhaseKind, SubmissionReport};

/// Production wiring: Cloudinary uploads and the PawHaven backend.
pub struct Pipeline {
    config: PipelineConfig,
    api: ApiClient,
    uploader: Arc<CloudinaryUploader>,
    notifier: Arc<dyn Notifier>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        config.validate()?;
        let api = ApiClient::from_config(&config)?;
        let uploader = Arc::new(CloudinaryUploader::new(&config, notifier.clone())?);

        tracing::info!(
            api_base_url = %config.api_base_url,
            upload_url = %uploader.upload_url(),
            environment = %config.environment,
            "Submission pipeline configured"
        );

        Ok(Self {
            config,
            api,
            uploader,
            notifier,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Collaborators authenticated as `session`'s user.
    pub fn collaborators(&self, session: &Session) -> Collaborators {
        Collaborators {
            uploader: self.uploader.clone(),
            submitter: Arc::new(self.api.for_session(session)),
            notifier: self.notifier.clone(),
            image_validator: self.config.image_validator(),
        }
    }

    /// Empty form for adding a pet.
    pub fn create_form(&self, session: Session) -> FormCapture {
        let collaborators = self.collaborators(&session);
        FormCapture::for_create(session, collaborators)
    }

    /// Form pre-filled from an already fetched pet.
    pub fn update_form(&self, stored: StoredPet, session: Session) -> FormCapture {
        let collaborators = self.collaborators(&session);
        FormCapture::for_update(stored, session, collaborators)
    }

    /// Fetch a pet and open it for editing.
    pub async fn load_for_update(
        &self,
        id: &str,
        session: Session,
    ) -> Result<FormCapture, SubmissionError> {
        let stored = self.api.for_session(&session).get_pet(id).await?;
        Ok(self.update_form(stored, session))
    }
}
